use log::debug;

use super::Intervention;
use crate::error::EpiabmError;
use crate::parameters::{ActivationWindow, HouseholdQuarantineParams};
use crate::population::PersonId;
use crate::{define_rng, Context, ContextPopulationExt, ContextRandomExt, HashSet, HashSetExt};

define_rng!(HouseholdQuarantineRng);

/// The household of an isolating person quarantines if the household
/// complies, and then each other member complies individually. Members who
/// isolate themselves are not quarantined. Each isolating person triggers at
/// most one quarantine decision.
pub struct HouseholdQuarantine {
    params: HouseholdQuarantineParams,
    index_cases: HashSet<PersonId>,
}

impl HouseholdQuarantine {
    #[must_use]
    pub fn new(params: HouseholdQuarantineParams) -> HouseholdQuarantine {
        HouseholdQuarantine {
            params,
            index_cases: HashSet::new(),
        }
    }

    /// Members of the household of `index_case` who are to start quarantine.
    fn quarantined_members(&self, context: &Context, index_case: PersonId) -> Vec<PersonId> {
        if !context.sample_bool(
            HouseholdQuarantineRng,
            self.params.quarantine_house_compliant,
        ) {
            return Vec::new();
        }
        let population = context.population();
        let household = population.person(index_case).household();
        population
            .household(household)
            .persons()
            .iter()
            .copied()
            .filter(|member| {
                let member = population.person(*member);
                member.isolation_start_time.is_none() && member.quarantine_start_time.is_none()
            })
            .filter(|_| {
                context.sample_bool(
                    HouseholdQuarantineRng,
                    self.params.quarantine_individual_compliant,
                )
            })
            .collect()
    }
}

impl Intervention for HouseholdQuarantine {
    fn name(&self) -> &'static str {
        "household_quarantine"
    }

    fn window(&self) -> &ActivationWindow {
        &self.params.window
    }

    fn apply(&mut self, context: &mut Context, time: f64) -> Result<(), EpiabmError> {
        let population = context.population();
        let expired: Vec<PersonId> = population
            .person_ids()
            .filter(|person| {
                population
                    .person(*person)
                    .quarantine_start_time
                    .is_some_and(|start| time > start + self.params.quarantine_duration)
            })
            .collect();
        let index_cases: Vec<PersonId> = population
            .person_ids()
            .filter(|person| population.person(*person).isolation_start_time.is_some())
            .filter(|person| !self.index_cases.contains(person))
            .collect();

        let population = context.population_mut();
        for person in expired {
            population.person_mut(person).quarantine_start_time = None;
        }

        let mut quarantined = 0;
        for index_case in index_cases {
            self.index_cases.insert(index_case);
            let members = self.quarantined_members(context, index_case);
            quarantined += members.len();
            let population = context.population_mut();
            for member in members {
                population.person_mut(member).quarantine_start_time =
                    Some(time + self.params.quarantine_delay);
            }
        }
        if quarantined > 0 {
            debug!("{quarantined} people start quarantine at {time}");
        }
        Ok(())
    }

    fn turn_off(&mut self, context: &mut Context) {
        let population = context.population_mut();
        let persons: Vec<PersonId> = population.person_ids().collect();
        for person in persons {
            population.person_mut(person).quarantine_start_time = None;
        }
        self.index_cases.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::test_support::{context_with, household_population};
    use crate::Parameters;

    fn quarantine(house: f64, individual: f64) -> HouseholdQuarantine {
        HouseholdQuarantine::new(HouseholdQuarantineParams {
            quarantine_duration: 14.0,
            quarantine_delay: 1.0,
            quarantine_house_compliant: house,
            quarantine_individual_compliant: individual,
            ..HouseholdQuarantineParams::default()
        })
    }

    /// A household of four in which the first person isolates.
    fn context() -> (Context, Vec<PersonId>) {
        let (mut population, _, persons) = household_population(4);
        population.person_mut(persons[0]).isolation_start_time = Some(0.0);
        (context_with(8, Parameters::default(), population), persons)
    }

    #[test]
    fn household_of_isolating_person_quarantines() {
        let (mut context, persons) = context();
        quarantine(1.0, 1.0).apply(&mut context, 1.0).unwrap();
        let population = context.population();
        assert_eq!(population.person(persons[0]).quarantine_start_time, None);
        for member in &persons[1..] {
            assert_eq!(population.person(*member).quarantine_start_time, Some(2.0));
        }
    }

    #[test]
    fn non_compliant_household_does_not_quarantine() {
        let (mut context, persons) = context();
        let mut quarantine = quarantine(0.0, 1.0);
        quarantine.apply(&mut context, 1.0).unwrap();
        quarantine.apply(&mut context, 2.0).unwrap();
        for person in persons {
            assert_eq!(
                context.population().person(person).quarantine_start_time,
                None
            );
        }
    }

    #[test]
    fn non_compliant_members_stay_out() {
        let (mut context, persons) = context();
        quarantine(1.0, 0.0).apply(&mut context, 1.0).unwrap();
        for person in persons {
            assert_eq!(
                context.population().person(person).quarantine_start_time,
                None
            );
        }
    }

    #[test]
    fn quarantine_expires_once() {
        let (mut context, persons) = context();
        let mut quarantine = quarantine(1.0, 1.0);
        quarantine.apply(&mut context, 1.0).unwrap();
        quarantine.apply(&mut context, 16.5).unwrap();
        // The index case is still isolating but has already been handled
        assert_eq!(
            context.population().person(persons[1]).quarantine_start_time,
            None
        );
    }

    #[test]
    fn turn_off_clears_quarantine() {
        let (mut context, persons) = context();
        let mut quarantine = quarantine(1.0, 1.0);
        quarantine.apply(&mut context, 1.0).unwrap();
        quarantine.turn_off(&mut context);
        for person in persons {
            assert_eq!(
                context.population().person(person).quarantine_start_time,
                None
            );
        }
    }
}
