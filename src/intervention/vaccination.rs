use log::debug;

use super::Intervention;
use crate::error::EpiabmError;
use crate::parameters::{ActivationWindow, VaccinationParams};
use crate::{Context, ContextPopulationExt};

/// Gives up to `daily_doses` doses per step to the people at the front of
/// the vaccine queue. Protection lasts for the rest of the run.
pub struct Vaccination {
    params: VaccinationParams,
}

impl Vaccination {
    #[must_use]
    pub fn new(params: VaccinationParams) -> Vaccination {
        Vaccination { params }
    }
}

impl Intervention for Vaccination {
    fn name(&self) -> &'static str {
        "vaccination"
    }

    fn window(&self) -> &ActivationWindow {
        &self.params.window
    }

    fn apply(&mut self, context: &mut Context, time: f64) -> Result<(), EpiabmError> {
        let population = context.population_mut();
        let mut doses = 0;
        while doses < self.params.daily_doses {
            let Some(person) = population.vaccine_queue_mut().pop() else {
                break;
            };
            // Visitors may have left since they were queued
            if population.person(person).has_departed() {
                continue;
            }
            population.person_mut(person).date_vaccinated = Some(time);
            doses += 1;
        }
        debug!("{doses} doses given at {time}");
        Ok(())
    }

    fn turn_off(&mut self, _context: &mut Context) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::test_support::{context_with, household_population};
    use crate::Parameters;

    #[test]
    fn vaccinates_from_the_front_of_the_queue() {
        let (population, _, persons) = household_population(3);
        let mut context = context_with(1, Parameters::default(), population);
        let queue = context.population_mut().vaccine_queue_mut();
        queue.push(1, persons[0]);
        queue.push(0, persons[1]);
        queue.push(2, persons[2]);

        let mut vaccination = Vaccination::new(VaccinationParams {
            daily_doses: 2,
            ..VaccinationParams::default()
        });
        vaccination.apply(&mut context, 4.0).unwrap();
        let population = context.population();
        assert_eq!(population.person(persons[1]).date_vaccinated, Some(4.0));
        assert_eq!(population.person(persons[0]).date_vaccinated, Some(4.0));
        assert_eq!(population.person(persons[2]).date_vaccinated, None);
        assert_eq!(population.vaccine_queue().len(), 1);

        vaccination.apply(&mut context, 5.0).unwrap();
        vaccination.apply(&mut context, 6.0).unwrap();
        let population = context.population();
        assert_eq!(population.person(persons[2]).date_vaccinated, Some(5.0));
        assert!(population.vaccine_queue().is_empty());
        assert!(population.person(persons[2]).is_vaccinated(6.0));
    }
}
