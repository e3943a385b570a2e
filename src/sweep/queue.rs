use super::Sweep;
use crate::error::EpiabmError;
use crate::progression::ContextProgressionExt;
use crate::{Context, ContextPopulationExt, InfectionStatus};

/// Commits everyone waiting in a cell's pending-infection queue to
/// `Exposed` and schedules the end of their latent period.
pub struct QueueSweep;

impl Sweep for QueueSweep {
    fn name(&self) -> &'static str {
        "queue"
    }

    fn bind(&mut self, context: &mut Context) -> Result<(), EpiabmError> {
        context.init_progression()
    }

    fn run(&mut self, context: &mut Context, time: f64) -> Result<(), EpiabmError> {
        let cells: Vec<_> = context.population().cell_ids().collect();
        for cell in cells {
            let queued = context.population_mut().drain_queue(cell);
            for person in queued {
                // Someone may be queued by several sweeps or have been
                // infected by other means since
                if !context.population().person(person).is_susceptible() {
                    continue;
                }
                context.progress_person(person, InfectionStatus::Exposed, time)?;
            }
        }
        Ok(())
    }
}
