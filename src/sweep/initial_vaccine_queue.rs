use log::info;
use rand::seq::SliceRandom;

use super::Sweep;
use crate::error::EpiabmError;
use crate::parameters::VaccinationParams;
use crate::population::{Person, PersonId};
use crate::{
    define_rng, Context, ContextParametersExt, ContextPopulationExt, ContextRandomExt, PlaceType,
};

define_rng!(VaccineQueueRng);

/// Fills the vaccine queue in a random order, by priority level. Does
/// nothing unless vaccination is configured.
pub struct InitialVaccineQueueSweep;

/// Care home residents and the oldest age groups come first; people younger
/// than every threshold are not offered a dose.
fn priority_level(person: &Person, vaccination: &VaccinationParams) -> Option<usize> {
    if person.attends(PlaceType::CareHome) {
        return Some(0);
    }
    vaccination
        .min_age_groups
        .iter()
        .position(|min_age_group| person.age_group >= *min_age_group)
}

impl Sweep for InitialVaccineQueueSweep {
    fn name(&self) -> &'static str {
        "initial_vaccine_queue"
    }

    fn run(&mut self, context: &mut Context, _time: f64) -> Result<(), EpiabmError> {
        let Some(vaccination) = context.parameters().intervention_params.vaccination.clone()
        else {
            return Ok(());
        };
        let mut persons: Vec<PersonId> = context.population().person_ids().collect();
        context.sample(VaccineQueueRng, |rng| persons.shuffle(rng));

        let mut queued = Vec::new();
        for person in persons {
            let Some(level) = priority_level(context.population().person(person), &vaccination)
            else {
                continue;
            };
            let probability = vaccination.prob_vaccinated.get(level).copied().unwrap_or(0.0);
            if context.sample_bool(VaccineQueueRng, probability) {
                queued.push((level, person));
            }
        }
        info!("{} people queued for vaccination", queued.len());
        let queue = context.population_mut().vaccine_queue_mut();
        for (level, person) in queued {
            queue.push(u32::try_from(level).unwrap_or(u32::MAX), person);
        }
        Ok(())
    }
}
