use log::info;

use super::Sweep;
use crate::error::EpiabmError;
use crate::intervention::{interventions_from_parameters, Intervention};
use crate::{Context, ContextParametersExt, ContextPopulationExt};

struct Scheduled {
    intervention: Box<dyn Intervention>,
    active: bool,
}

/// Applies the configured interventions at the start of every step.
///
/// Activity is judged against the number of infectious people before the
/// step. An intervention that was active on the previous step and no
/// longer is gets turned off.
#[derive(Default)]
pub struct InterventionSweep {
    interventions: Vec<Scheduled>,
}

impl InterventionSweep {
    #[must_use]
    pub fn new() -> InterventionSweep {
        InterventionSweep::default()
    }
}

impl Sweep for InterventionSweep {
    fn name(&self) -> &'static str {
        "intervention"
    }

    fn bind(&mut self, context: &mut Context) -> Result<(), EpiabmError> {
        self.interventions =
            interventions_from_parameters(&context.parameters().intervention_params)
                .into_iter()
                .map(|intervention| Scheduled {
                    intervention,
                    active: false,
                })
                .collect();
        Ok(())
    }

    fn run(&mut self, context: &mut Context, time: f64) -> Result<(), EpiabmError> {
        let cases = context.population().number_infectious();
        for scheduled in &mut self.interventions {
            if scheduled.intervention.is_active(time, cases) {
                if !scheduled.active {
                    info!("{} starts at {time}", scheduled.intervention.name());
                }
                scheduled.intervention.apply(context, time)?;
                scheduled.active = true;
            } else if scheduled.active {
                info!("{} stops at {time}", scheduled.intervention.name());
                scheduled.intervention.turn_off(context);
                scheduled.active = false;
            }
        }
        Ok(())
    }
}
