use log::trace;

use super::Sweep;
use crate::error::EpiabmError;
use crate::infection::{household_foi, infection_probability};
use crate::population::PersonId;
use crate::{define_rng, Context, ContextParametersExt, ContextPopulationExt, ContextRandomExt};

define_rng!(HouseholdSweepRng);

/// Exposes the susceptible members of every infectious person's household.
pub struct HouseholdSweep;

impl Sweep for HouseholdSweep {
    fn name(&self) -> &'static str {
        "household"
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
                for infectee in population.household(person.household()).persons() {
                    if !population.person(*infectee).is_susceptible() {
                        continue;
                    }
                    let foi = household_foi(context, infector, *infectee, time);
                    let probability = infection_probability(foi, time_steps_per_day);
                    if context.sample_bool(HouseholdSweepRng, probability) {
                        trace!("{infector:?} infects {infectee:?} at home");
                        infected.push(*infectee);
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
