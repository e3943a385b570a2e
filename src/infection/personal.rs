use crate::population::PersonId;
use crate::{Context, ContextParametersExt, ContextPopulationExt};

/// Infectiousness of `infector` before any setting-specific factor.
#[must_use]
pub fn person_inf(context: &Context, infector: PersonId, _time: f64) -> f64 {
    context.population().person(infector).infectiousness
}

/// Susceptibility of `infectee` before any setting-specific factor. Reduced
/// by the vaccine protectiveness once vaccinated.
#[must_use]
pub fn person_susc(context: &Context, infectee: PersonId, time: f64) -> f64 {
    let person = context.population().person(infectee);
    match &context.parameters().intervention_params.vaccination {
        Some(vaccination) if person.is_vaccinated(time) => 1.0 - vaccination.vacc_protectiveness,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_almost_eq;
    use crate::infection::test_support::pair;
    use crate::parameters::VaccinationParams;
    use crate::Parameters;

    #[test]
    fn unvaccinated_susceptibility() {
        let (context, infector, infectee) = pair(Parameters::default());
        assert_eq!(person_inf(&context, infector, 0.0), 10.0);
        assert_eq!(person_susc(&context, infectee, 0.0), 1.0);
    }

    #[test]
    fn vaccination_reduces_susceptibility() {
        let mut parameters = Parameters::default();
        parameters.intervention_params.vaccination = Some(VaccinationParams {
            vacc_protectiveness: 0.8,
            ..VaccinationParams::default()
        });
        let (mut context, _, infectee) = pair(parameters);
        context.population_mut().person_mut(infectee).date_vaccinated = Some(2.0);
        assert_eq!(person_susc(&context, infectee, 1.0), 1.0);
        assert_almost_eq!(person_susc(&context, infectee, 2.0), 0.2, 1e-12);
    }
}
