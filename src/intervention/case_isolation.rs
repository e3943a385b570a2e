use log::debug;

use super::Intervention;
use crate::error::EpiabmError;
use crate::parameters::{ActivationWindow, CaseIsolationParams};
use crate::population::PersonId;
use crate::{define_rng, Context, ContextPopulationExt, ContextRandomExt, HashSet, HashSetExt};

define_rng!(CaseIsolationRng);

/// Symptomatic people isolate at home for `isolation_duration` days, starting
/// `isolation_delay` days after they are found. Whether someone complies is
/// decided once, the first time they are seen with symptoms.
pub struct CaseIsolation {
    params: CaseIsolationParams,
    decided: HashSet<PersonId>,
}

impl CaseIsolation {
    #[must_use]
    pub fn new(params: CaseIsolationParams) -> CaseIsolation {
        CaseIsolation {
            params,
            decided: HashSet::new(),
        }
    }
}

impl Intervention for CaseIsolation {
    fn name(&self) -> &'static str {
        "case_isolation"
    }

    fn window(&self) -> &ActivationWindow {
        &self.params.window
    }

    fn apply(&mut self, context: &mut Context, time: f64) -> Result<(), EpiabmError> {
        let population = context.population();
        let mut expired = Vec::new();
        let mut isolating = Vec::new();
        for person_id in population.person_ids() {
            let person = population.person(person_id);
            if let Some(start) = person.isolation_start_time {
                if time > start + self.params.isolation_duration {
                    expired.push(person_id);
                }
            } else if person.infection_status().is_symptomatic()
                && self.decided.insert(person_id)
                && context.sample_bool(CaseIsolationRng, self.params.isolation_probability)
            {
                isolating.push(person_id);
            }
        }
        debug!(
            "{} people start and {} stop isolating at {time}",
            isolating.len(),
            expired.len()
        );

        let population = context.population_mut();
        for person in expired {
            population.person_mut(person).isolation_start_time = None;
        }
        for person in isolating {
            population.person_mut(person).isolation_start_time =
                Some(time + self.params.isolation_delay);
        }
        Ok(())
    }

    fn turn_off(&mut self, context: &mut Context) {
        let population = context.population_mut();
        let persons: Vec<PersonId> = population.person_ids().collect();
        for person in persons {
            population.person_mut(person).isolation_start_time = None;
        }
        self.decided.clear();
    }
}
