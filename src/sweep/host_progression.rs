use super::Sweep;
use crate::error::EpiabmError;
use crate::population::PersonId;
use crate::progression::ContextProgressionExt;
use crate::{Context, ContextPopulationExt, InfectionStatus};

/// Advances everyone whose scheduled transition is due. A person can pass
/// through several statuses in one step when the sampled delays are short.
pub struct HostProgressionSweep;

impl HostProgressionSweep {
    /// The status `person` moves to at `time`, or `None` when nothing is due.
    fn due_transition(
        context: &Context,
        person: PersonId,
        time: f64,
    ) -> Result<Option<InfectionStatus>, EpiabmError> {
        let person_data = context.population().person(person);
        let status = person_data.infection_status();
        match person_data.time_of_status_change {
            None if status == InfectionStatus::Susceptible => Ok(None),
            None => Err(EpiabmError::InvariantViolation(format!(
                "{person:?} is {status} without a scheduled transition"
            ))),
            Some(scheduled) if status.is_terminal() => {
                if scheduled.is_finite() {
                    return Err(EpiabmError::InvariantViolation(format!(
                        "{person:?} is {status} but has a transition at {scheduled}"
                    )));
                }
                Ok(None)
            }
            Some(scheduled) if scheduled > time => Ok(None),
            Some(scheduled) => person_data.next_infection_status.map(Some).ok_or_else(|| {
                EpiabmError::InvariantViolation(format!(
                    "{person:?} has a transition due at {scheduled} but no next status"
                ))
            }),
        }
    }
}

impl Sweep for HostProgressionSweep {
    fn name(&self) -> &'static str {
        "host_progression"
    }

    fn bind(&mut self, context: &mut Context) -> Result<(), EpiabmError> {
        context.init_progression()
    }

    fn run(&mut self, context: &mut Context, time: f64) -> Result<(), EpiabmError> {
        if !time.is_finite() {
            return Err(EpiabmError::InputValidationError(format!(
                "host progression needs a finite time, got {time}"
            )));
        }
        let persons: Vec<PersonId> = context.population().person_ids().collect();
        for person in persons {
            while let Some(next_status) = Self::due_transition(context, person, time)? {
                context.progress_person(person, next_status, time)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::{
        DiseaseProgression, StateTransitionMatrix, TransitionTime, TransitionTimeMatrix,
    };
    use crate::sweep::test_support::{context_with, household_population};
    use crate::Parameters;

    #[test]
    fn zero_delays_reach_a_terminal_status() {
        let (mut population, _, persons) = household_population(1);
        population.update_status(persons[0], InfectionStatus::Exposed);
        let person = population.person_mut(persons[0]);
        person.next_infection_status = Some(InfectionStatus::InfectGP);
        person.time_of_status_change = Some(0.0);
        let mut context = context_with(8, Parameters::default(), population);
        let transitions =
            StateTransitionMatrix::new(&Parameters::default().host_progression_lists, false)
                .unwrap();
        context.set_progression(
            DiseaseProgression::new(transitions, TransitionTimeMatrix::constant(0.0), 1.5, 1.0)
                .unwrap(),
        );

        HostProgressionSweep.run(&mut context, 1.0).unwrap();
        let person = context.population().person(persons[0]);
        assert!(person.infection_status().is_terminal());
        assert_eq!(person.next_infection_status, None);
        assert_eq!(person.time_of_status_change, Some(f64::INFINITY));
        assert_eq!(person.infectiousness, 0.0);
    }

    #[test]
    fn transitions_wait_until_due() {
        let (mut population, _, persons) = household_population(1);
        population.update_status(persons[0], InfectionStatus::InfectMild);
        let person = population.person_mut(persons[0]);
        person.next_infection_status = Some(InfectionStatus::Recovered);
        person.time_of_status_change = Some(3.0);
        let mut context = context_with(8, Parameters::default(), population);

        HostProgressionSweep.run(&mut context, 2.0).unwrap();
        assert_eq!(
            context.population().person(persons[0]).infection_status(),
            InfectionStatus::InfectMild
        );
        HostProgressionSweep.run(&mut context, 3.0).unwrap();
        assert_eq!(
            context.population().person(persons[0]).infection_status(),
            InfectionStatus::Recovered
        );
    }

    #[test]
    fn infectiousness_set_on_becoming_infectious() {
        let (mut population, _, persons) = household_population(1);
        population.update_status(persons[0], InfectionStatus::Exposed);
        let person = population.person_mut(persons[0]);
        person.next_infection_status = Some(InfectionStatus::InfectMild);
        person.time_of_status_change = Some(1.0);
        let mut context = context_with(8, Parameters::default(), population);
        let mut progression = context.progression().unwrap().clone();
        progression.times_mut().set(
            InfectionStatus::InfectMild,
            InfectionStatus::Recovered,
            TransitionTime::Constant(5.0),
        );
        context.set_progression(progression);

        HostProgressionSweep.run(&mut context, 1.0).unwrap();
        let person = context.population().person(persons[0]);
        assert_eq!(person.infection_status(), InfectionStatus::InfectMild);
        assert!(person.infectiousness > 0.0);
        assert_eq!(person.time_of_status_change, Some(6.0));
    }

    #[test]
    fn invariant_violations() {
        let (mut population, _, persons) = household_population(2);
        population.update_status(persons[0], InfectionStatus::InfectMild);
        let mut context = context_with(8, Parameters::default(), population);
        assert!(matches!(
            HostProgressionSweep.run(&mut context, 1.0),
            Err(EpiabmError::InvariantViolation(_))
        ));

        let population = context.population_mut();
        population.update_status(persons[0], InfectionStatus::Dead);
        population.person_mut(persons[0]).time_of_status_change = Some(4.0);
        assert!(matches!(
            HostProgressionSweep.run(&mut context, 1.0),
            Err(EpiabmError::InvariantViolation(_))
        ));

        let population = context.population_mut();
        population.update_status(persons[0], InfectionStatus::InfectGP);
        population.person_mut(persons[0]).time_of_status_change = Some(0.0);
        assert!(matches!(
            HostProgressionSweep.run(&mut context, 1.0),
            Err(EpiabmError::InvariantViolation(_))
        ));
    }

    #[test]
    fn rejects_non_finite_time() {
        let (population, _, _) = household_population(1);
        let mut context = context_with(8, Parameters::default(), population);
        assert!(matches!(
            HostProgressionSweep.run(&mut context, f64::NAN),
            Err(EpiabmError::InputValidationError(_))
        ));
    }
}
