//! Passes over the population run by the [`Simulation`](crate::Simulation).
//!
//! A sweep is bound to the `Context` once, when the simulation is
//! configured, and then run either once before the main loop (initial
//! sweeps) or once per time step. Within a step the order is significant:
//! sweeps that detect infections only enqueue people, [`QueueSweep`] commits
//! them to `Exposed`, and [`HostProgressionSweep`] then advances everyone
//! whose transition is due. Running host progression before the queue sweep
//! would let a person be infected and progressed in the same step.
mod host_progression;
mod household;
mod initial_infected;
mod initial_vaccine_queue;
mod intervention;
mod place;
mod place_assignment;
mod queue;
mod spatial;
mod travel;

pub use host_progression::HostProgressionSweep;
pub use household::HouseholdSweep;
pub use initial_infected::InitialInfectedSweep;
pub use initial_vaccine_queue::InitialVaccineQueueSweep;
pub use intervention::InterventionSweep;
pub use place::PlaceSweep;
pub use place_assignment::{InitialisePlaceSweep, UpdatePlaceSweep};
pub use queue::QueueSweep;
pub use spatial::SpatialSweep;
pub use travel::TravelSweep;

use crate::error::EpiabmError;
use crate::Context;

pub trait Sweep {
    fn name(&self) -> &'static str;

    /// Prepares the sweep for a run, after parameters and population are set.
    #[allow(clippy::missing_errors_doc)]
    fn bind(&mut self, _context: &mut Context) -> Result<(), EpiabmError> {
        Ok(())
    }

    /// Applies the sweep at simulation time `time`.
    #[allow(clippy::missing_errors_doc)]
    fn run(&mut self, context: &mut Context, time: f64) -> Result<(), EpiabmError>;
}

/// The per-step sweeps of a model without interventions or travel, in
/// their required order.
#[must_use]
pub fn default_sweeps() -> Vec<Box<dyn Sweep>> {
    vec![
        Box::new(UpdatePlaceSweep),
        Box::new(HouseholdSweep),
        Box::new(PlaceSweep),
        Box::new(SpatialSweep),
        Box::new(QueueSweep),
        Box::new(HostProgressionSweep),
    ]
}

/// The initial sweeps matching [`default_sweeps`].
#[must_use]
pub fn default_initial_sweeps() -> Vec<Box<dyn Sweep>> {
    vec![
        Box::new(InitialisePlaceSweep),
        Box::new(InitialInfectedSweep),
    ]
}
