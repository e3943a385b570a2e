use log::trace;

use super::Sweep;
use crate::error::EpiabmError;
use crate::infection::{infection_probability, place_foi};
use crate::population::PersonId;
use crate::{define_rng, Context, ContextParametersExt, ContextPopulationExt, ContextRandomExt};

define_rng!(PlaceSweepRng);

/// Exposes susceptible people who attend a place with an infectious person.
pub struct PlaceSweep;

impl Sweep for PlaceSweep {
    fn name(&self) -> &'static str {
        "place"
    }

    fn run(&mut self, context: &mut Context, time: f64) -> Result<(), EpiabmError> {
        let time_steps_per_day = context.parameters().time_steps_per_day;
        let mut infected: Vec<PersonId> = Vec::new();
        {
            let population = context.population();
            for infector in population.person_ids() {
                let person = population.person(infector);
                if !person.is_infectious() {
                    continue;
                }
                for (place, _) in person.places() {
                    for infectee in population.place(*place).persons() {
                        if !population.person(*infectee).is_susceptible() {
                            continue;
                        }
                        let foi = place_foi(context, *place, infector, *infectee, time);
                        let probability = infection_probability(foi, time_steps_per_day);
                        if context.sample_bool(PlaceSweepRng, probability) {
                            trace!("{infector:?} infects {infectee:?} at {place:?}");
                            infected.push(*infectee);
                        }
                    }
                }
            }
        }
        let population = context.population_mut();
        for person in infected {
            population.enqueue_person(person);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::test_support::{context_with, household_population};
    use crate::{InfectionStatus, Parameters, PlaceType};

    #[test]
    fn only_fellow_attendees_are_exposed() {
        let (mut population, microcell, persons) = household_population(3);
        let workplace = population.add_place(microcell, PlaceType::Workplace, 10);
        population.add_person_to_place(persons[0], workplace);
        population.add_person_to_place(persons[1], workplace);
        population.update_status(persons[0], InfectionStatus::InfectMild);
        population.person_mut(persons[0]).infectiousness = 1e6;
        let parameters = Parameters {
            place_transmission: 1.0,
            ..Parameters::default()
        };
        let mut context = context_with(2, parameters, population);

        PlaceSweep.run(&mut context, 1.0).unwrap();
        let population = context.population();
        let cell = population.person(persons[0]).cell();
        let queue: Vec<PersonId> = population.cell(cell).queue().iter().copied().collect();
        assert_eq!(queue, vec![persons[1]]);
    }
}
