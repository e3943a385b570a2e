use log::debug;

use super::Intervention;
use crate::error::EpiabmError;
use crate::parameters::{ActivationWindow, PlaceClosureParams};
use crate::population::MicrocellId;
use crate::{Context, ContextPopulationExt};

/// Closes the places of `closure_place_type` in every microcell with at
/// least `case_microcell_threshold` infectious residents. People kept home
/// are more infectious to their household while the closure lasts.
pub struct PlaceClosure {
    params: PlaceClosureParams,
}

impl PlaceClosure {
    #[must_use]
    pub fn new(params: PlaceClosureParams) -> PlaceClosure {
        PlaceClosure { params }
    }
}

impl Intervention for PlaceClosure {
    fn name(&self) -> &'static str {
        "place_closure"
    }

    fn window(&self) -> &ActivationWindow {
        &self.params.window
    }

    fn apply(&mut self, context: &mut Context, time: f64) -> Result<(), EpiabmError> {
        let population = context.population();
        let mut reopening = Vec::new();
        let mut closing = Vec::new();
        for microcell_id in population.microcell_ids() {
            let microcell = population.microcell(microcell_id);
            match microcell.closure_start_time {
                Some(start) if time > start + self.params.closure_duration => {
                    reopening.push(microcell_id);
                }
                Some(_) => {}
                None if microcell.count_infectious() >= self.params.case_microcell_threshold => {
                    closing.push(microcell_id);
                }
                None => {}
            }
        }
        if !closing.is_empty() {
            debug!("closing places in {} microcells at {time}", closing.len());
        }

        let population = context.population_mut();
        for microcell in reopening {
            population.microcell_mut(microcell).closure_start_time = None;
        }
        for microcell in closing {
            population.microcell_mut(microcell).closure_start_time =
                Some(time + self.params.closure_delay);
        }
        Ok(())
    }

    fn turn_off(&mut self, context: &mut Context) {
        let population = context.population_mut();
        let microcells: Vec<MicrocellId> = population.microcell_ids().collect();
        for microcell in microcells {
            population.microcell_mut(microcell).closure_start_time = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::Population;
    use crate::sweep::test_support::context_with;
    use crate::{InfectionStatus, Parameters};

    /// Two microcells, only the first of which has an infectious resident.
    fn context() -> (Context, MicrocellId, MicrocellId) {
        let mut population = Population::new();
        let cell = population.add_cell((0.0, 0.0));
        let infected = population.add_microcell(cell, (0.0, 0.0));
        let healthy = population.add_microcell(cell, (1.0, 0.0));
        let household = population.add_household(infected);
        population.add_person_with_status(household, 0, InfectionStatus::InfectGP);
        population.add_person(household, 0);
        let household = population.add_household(healthy);
        population.add_person(household, 0);
        (
            context_with(2, Parameters::default(), population),
            infected,
            healthy,
        )
    }

    fn closure() -> PlaceClosure {
        PlaceClosure::new(PlaceClosureParams {
            closure_duration: 10.0,
            closure_delay: 2.0,
            case_microcell_threshold: 1,
            ..PlaceClosureParams::default()
        })
    }

    #[test]
    fn closes_microcells_with_cases() {
        let (mut context, infected, healthy) = context();
        closure().apply(&mut context, 1.0).unwrap();
        let population = context.population();
        assert_eq!(population.microcell(infected).closure_start_time, Some(3.0));
        assert!(!population.microcell(infected).is_closed(2.0));
        assert!(population.microcell(infected).is_closed(3.0));
        assert_eq!(population.microcell(healthy).closure_start_time, None);
    }

    #[test]
    fn reopens_after_the_duration() {
        let (mut context, infected, _) = context();
        let mut closure = closure();
        closure.apply(&mut context, 1.0).unwrap();
        closure.apply(&mut context, 13.0).unwrap();
        assert_eq!(
            context.population().microcell(infected).closure_start_time,
            Some(3.0)
        );
        closure.apply(&mut context, 14.0).unwrap();
        assert_eq!(
            context.population().microcell(infected).closure_start_time,
            None
        );
        // Still infectious, so it closes again on the following step
        closure.apply(&mut context, 15.0).unwrap();
        assert_eq!(
            context.population().microcell(infected).closure_start_time,
            Some(17.0)
        );
    }

    #[test]
    fn turn_off_reopens_everything() {
        let (mut context, infected, _) = context();
        let mut closure = closure();
        closure.apply(&mut context, 1.0).unwrap();
        closure.turn_off(&mut context);
        assert_eq!(
            context.population().microcell(infected).closure_start_time,
            None
        );
    }
}
