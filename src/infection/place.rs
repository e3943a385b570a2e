use super::personal::{person_inf, person_susc};
use super::{distancing_factor, isolation_factor};
use crate::population::{PersonId, PlaceId};
use crate::{Context, ContextParametersExt, ContextPopulationExt};

/// Infectiousness of `infector` at `place`, shared out over the expected
/// group size of the place type. Zero while the place type is closed in the
/// infector's microcell.
#[must_use]
pub fn place_inf(context: &Context, place: PlaceId, infector: PersonId, time: f64) -> f64 {
    let parameters = context.parameters();
    let population = context.population();
    let place_type = population.place(place).place_type();
    let microcell = population.microcell(population.person(infector).microcell());
    if let Some(closure) = &parameters.intervention_params.place_closure {
        if microcell.is_closed(time) && closure.closure_place_type.contains(&place_type) {
            return 0.0;
        }
    }
    let group_size = parameters
        .place_params
        .mean_group_size
        .get(&place_type)
        .copied()
        .unwrap_or(1.0);
    parameters.place_transmission / group_size * person_inf(context, infector, time)
}

/// Susceptibility of `infectee` at `place`.
#[must_use]
pub fn place_susc(context: &Context, place: PlaceId, infectee: PersonId, time: f64) -> f64 {
    let population = context.population();
    let place_type = population.place(place).place_type();
    let person = population.person(infectee);
    let susceptibility = person_susc(context, infectee, time);
    match &context.parameters().intervention_params.social_distancing {
        Some(distancing) => {
            let lookup = |table: &std::collections::BTreeMap<_, f64>| {
                table.get(&place_type).copied().unwrap_or(1.0)
            };
            susceptibility
                * distancing_factor(
                    population.microcell(person.microcell()).is_distancing(time),
                    person,
                    || lookup(&distancing.distancing_place_susc),
                    || lookup(&distancing.distancing_place_enhanced_susc),
                )
        }
        None => susceptibility,
    }
}

/// Force of infection from `infector` on `infectee` at `place`.
#[must_use]
pub fn place_foi(
    context: &Context,
    place: PlaceId,
    infector: PersonId,
    infectee: PersonId,
    time: f64,
) -> f64 {
    let parameters = context.parameters();
    let population = context.population();
    let person = population.person(infector);
    let quarantine = match &parameters.intervention_params.household_quarantine {
        Some(quarantine) if person.is_quarantined(time) => quarantine
            .quarantine_place_effectiveness
            .get(&population.place(place).place_type())
            .copied()
            .unwrap_or(1.0),
        _ => 1.0,
    };
    let infectiousness = place_inf(context, place, infector, time)
        * parameters.false_positive_correction()
        * isolation_factor(parameters, person, time, false)
        * quarantine;
    infectiousness * place_susc(context, place, infectee, time)
}
