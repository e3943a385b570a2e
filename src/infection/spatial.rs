use super::personal::{person_inf, person_susc};
use super::{distancing_factor, isolation_factor};
use crate::parameters::SpatialParams;
use crate::population::PersonId;
use crate::{Context, ContextParametersExt, ContextPopulationExt};

/// Infectiousness `infector` spreads over the surrounding area.
#[must_use]
pub fn spatial_inf(context: &Context, infector: PersonId, time: f64) -> f64 {
    let parameters = context.parameters();
    let person = context.population().person(infector);
    let quarantine = match &parameters.intervention_params.household_quarantine {
        Some(quarantine) if person.is_quarantined(time) => {
            quarantine.quarantine_spatial_effectiveness
        }
        _ => 1.0,
    };
    person_inf(context, infector, time)
        * parameters.spatial_params.spatial_transmission
        * isolation_factor(parameters, person, time, false)
        * quarantine
}

/// Susceptibility of `infectee` to infection from outside their household
/// and places.
#[must_use]
pub fn spatial_susc(context: &Context, infectee: PersonId, time: f64) -> f64 {
    let population = context.population();
    let person = population.person(infectee);
    let susceptibility = person_susc(context, infectee, time);
    match &context.parameters().intervention_params.social_distancing {
        Some(distancing) => {
            susceptibility
                * distancing_factor(
                    population.microcell(person.microcell()).is_distancing(time),
                    person,
                    || distancing.distancing_spatial_susc,
                    || distancing.distancing_spatial_enhanced_susc,
                )
        }
        None => susceptibility,
    }
}

/// Relative chance of infecting someone at `distance`.
#[must_use]
pub fn spatial_kernel(distance: f64, parameters: &SpatialParams) -> f64 {
    1.0 / (1.0 + (distance / parameters.kernel_scale).powf(parameters.kernel_shape))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_almost_eq;
    use crate::infection::test_support::pair;
    use crate::parameters::{CaseIsolationParams, HouseholdQuarantineParams, SocialDistancingParams};
    use crate::Parameters;

    #[test]
    fn kernel_decays_with_distance() {
        let parameters = SpatialParams::default();
        assert_eq!(spatial_kernel(0.0, &parameters), 1.0);
        assert_eq!(spatial_kernel(1.0, &parameters), 0.5);
        assert!(spatial_kernel(2.0, &parameters) < spatial_kernel(1.5, &parameters));
    }

    #[test]
    fn interventions_scale_spatial_foi() {
        let mut parameters = Parameters::default();
        parameters.spatial_params.spatial_transmission = 1.0;
        parameters.intervention_params.case_isolation = Some(CaseIsolationParams {
            isolation_effectiveness: 0.5,
            ..CaseIsolationParams::default()
        });
        parameters.intervention_params.household_quarantine = Some(HouseholdQuarantineParams {
            quarantine_spatial_effectiveness: 0.25,
            ..HouseholdQuarantineParams::default()
        });
        parameters.intervention_params.social_distancing = Some(SocialDistancingParams {
            distancing_spatial_susc: 0.5,
            ..SocialDistancingParams::default()
        });
        let (mut context, infector, infectee) = pair(parameters);
        assert_eq!(spatial_inf(&context, infector, 0.0), 10.0);
        assert_eq!(spatial_susc(&context, infectee, 0.0), 1.0);

        let population = context.population_mut();
        population.person_mut(infector).isolation_start_time = Some(0.0);
        assert_eq!(spatial_inf(&context, infector, 0.0), 5.0);
        context.population_mut().person_mut(infector).quarantine_start_time = Some(0.0);
        assert_almost_eq!(spatial_inf(&context, infector, 0.0), 1.25, 1e-12);

        let population = context.population_mut();
        let microcell = population.person(infectee).microcell();
        population.microcell_mut(microcell).distancing_start_time = Some(0.0);
        population.person_mut(infectee).distancing_enhanced = Some(false);
        assert_eq!(spatial_susc(&context, infectee, 0.0), 0.5);
    }
}
