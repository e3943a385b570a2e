use super::personal::{person_inf, person_susc};
use super::{distancing_factor, isolation_factor};
use crate::population::PersonId;
use crate::{Context, ContextParametersExt, ContextPopulationExt};

/// Infectiousness of `infector` towards their household. Raised when places
/// the infector attends are closed and they stay home.
#[must_use]
pub fn household_inf(context: &Context, infector: PersonId, time: f64) -> f64 {
    let population = context.population();
    let person = population.person(infector);
    let mut infectiousness =
        person_inf(context, infector, time) * population.household(person.household()).infectiousness;
    if let Some(closure) = &context.parameters().intervention_params.place_closure {
        let kept_home = population.microcell(person.microcell()).is_closed(time)
            && closure
                .closure_place_type
                .iter()
                .any(|place_type| person.attends(*place_type));
        if kept_home {
            infectiousness *= closure.closure_household_infectiousness;
        }
    }
    infectiousness
}

/// Susceptibility of `infectee` to a member of their household.
#[must_use]
pub fn household_susc(context: &Context, _infector: PersonId, infectee: PersonId, time: f64) -> f64 {
    let population = context.population();
    let person = population.person(infectee);
    let susceptibility = person_susc(context, infectee, time)
        * population.household(person.household()).susceptibility;
    match &context.parameters().intervention_params.social_distancing {
        Some(distancing) => {
            susceptibility
                * distancing_factor(
                    population.microcell(person.microcell()).is_distancing(time),
                    person,
                    || distancing.distancing_house_susc,
                    || distancing.distancing_house_enhanced_susc,
                )
        }
        None => susceptibility,
    }
}

/// Force of infection from `infector` on `infectee` within a household.
#[must_use]
pub fn household_foi(context: &Context, infector: PersonId, infectee: PersonId, time: f64) -> f64 {
    let parameters = context.parameters();
    let person = context.population().person(infector);
    let quarantine = match &parameters.intervention_params.household_quarantine {
        Some(quarantine) if person.is_quarantined(time) => quarantine.quarantine_house_effectiveness,
        _ => 1.0,
    };
    let infectiousness = household_inf(context, infector, time)
        * parameters.false_positive_correction()
        * parameters.household_transmission
        * isolation_factor(parameters, person, time, true)
        * quarantine;
    infectiousness * household_susc(context, infector, infectee, time)
}
