//! Non-pharmaceutical interventions and vaccination.
//!
//! An intervention is switched on while its [`ActivationWindow`] is open and
//! enough people are infectious, and leaves its mark on the population
//! through the intervention fields of people and microcells (for example
//! `isolation_start_time` or `closure_start_time`). The force of infection
//! functions in [`crate::infection`] read those fields back. Interventions are
//! driven by the [`InterventionSweep`](crate::sweep::InterventionSweep), which
//! calls [`Intervention::turn_off`] when an intervention stops being active.
mod case_isolation;
mod household_quarantine;
mod place_closure;
mod social_distancing;
mod travel_isolation;
mod vaccination;

pub use case_isolation::CaseIsolation;
pub use household_quarantine::HouseholdQuarantine;
pub use place_closure::PlaceClosure;
pub use social_distancing::SocialDistancing;
pub use travel_isolation::TravelIsolation;
pub use vaccination::Vaccination;

use crate::error::EpiabmError;
use crate::parameters::{ActivationWindow, InterventionParams};
use crate::Context;

pub trait Intervention {
    fn name(&self) -> &'static str;

    fn window(&self) -> &ActivationWindow;

    /// Whether the intervention applies at `time` with `cases` people
    /// infectious.
    fn is_active(&self, time: f64, cases: usize) -> bool {
        self.window().is_active(time, cases)
    }

    /// Applies one step of the intervention.
    #[allow(clippy::missing_errors_doc)]
    fn apply(&mut self, context: &mut Context, time: f64) -> Result<(), EpiabmError>;

    /// Undoes whatever the intervention still has in effect.
    fn turn_off(&mut self, context: &mut Context);
}

/// The configured interventions, in the order they are applied. Isolation
/// comes before quarantine since households are quarantined around
/// isolating people.
#[must_use]
pub fn interventions_from_parameters(params: &InterventionParams) -> Vec<Box<dyn Intervention>> {
    let mut interventions: Vec<Box<dyn Intervention>> = Vec::new();
    if let Some(params) = &params.case_isolation {
        interventions.push(Box::new(CaseIsolation::new(params.clone())));
    }
    if let Some(params) = &params.place_closure {
        interventions.push(Box::new(PlaceClosure::new(params.clone())));
    }
    if let Some(params) = &params.household_quarantine {
        interventions.push(Box::new(HouseholdQuarantine::new(params.clone())));
    }
    if let Some(params) = &params.social_distancing {
        interventions.push(Box::new(SocialDistancing::new(params.clone())));
    }
    if let Some(params) = &params.travel_isolation {
        interventions.push(Box::new(TravelIsolation::new(params.clone())));
    }
    if let Some(params) = &params.vaccination {
        interventions.push(Box::new(Vaccination::new(params.clone())));
    }
    interventions
}
