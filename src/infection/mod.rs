//! Force of infection between an infector and an infectee.
//!
//! Every setting (household, place, spatial) computes an infectiousness for
//! the infector and a susceptibility for the infectee and multiplies them.
//! Interventions in effect at the current time scale either side by their
//! configured factors; an intervention that is not configured contributes a
//! factor of one. The probability that a force of infection `foi` causes an
//! infection within one time step is given by [`infection_probability`].
mod household;
mod personal;
mod place;
mod spatial;

pub use household::{household_foi, household_inf, household_susc};
pub use personal::{person_inf, person_susc};
pub use place::{place_foi, place_inf, place_susc};
pub use spatial::{spatial_inf, spatial_kernel, spatial_susc};

use crate::parameters::Parameters;
use crate::population::Person;

/// Probability that a force of infection `foi` acting over one time step
/// infects.
#[must_use]
pub fn infection_probability(foi: f64, time_steps_per_day: f64) -> f64 {
    1.0 - (-foi / time_steps_per_day).exp()
}

/// Factor applied to an isolating infector: `house` selects the household
/// effectiveness, otherwise the place and spatial one.
fn isolation_factor(parameters: &Parameters, infector: &Person, time: f64, house: bool) -> f64 {
    match &parameters.intervention_params.case_isolation {
        Some(isolation) if infector.is_isolating(time) => {
            if house {
                isolation.isolation_house_effectiveness
            } else {
                isolation.isolation_effectiveness
            }
        }
        _ => 1.0,
    }
}

/// Distancing factor of a compliant infectee in a distancing microcell,
/// given the normal and enhanced factors.
fn distancing_factor(
    distancing: bool,
    infectee: &Person,
    normal: impl FnOnce() -> f64,
    enhanced: impl FnOnce() -> f64,
) -> f64 {
    if !distancing {
        return 1.0;
    }
    match infectee.distancing_enhanced {
        Some(true) => enhanced(),
        Some(false) => normal(),
        None => 1.0,
    }
}

#[cfg(test)]
mod test_support {
    use crate::population::{PersonId, Population};
    use crate::{
        Context, ContextParametersExt, ContextPopulationExt, ContextRandomExt, InfectionStatus,
        Parameters,
    };

    /// One household of an infectious person and a susceptible one sharing
    /// a microcell, with `infectiousness` 10.
    pub(crate) fn pair(parameters: Parameters) -> (Context, PersonId, PersonId) {
        let mut context = Context::new();
        context.init_random(5);
        context.set_parameters(parameters).unwrap();
        let mut population = Population::new();
        let cell = population.add_cell((0.0, 0.0));
        let microcell = population.add_microcell(cell, (0.0, 0.0));
        let household = population.add_household(microcell);
        let infector =
            population.add_person_with_status(household, 0, InfectionStatus::InfectMild);
        let infectee = population.add_person(household, 0);
        population.person_mut(infector).infectiousness = 10.0;
        context.set_population(population);
        (context, infector, infectee)
    }
}
