//! The disease progression state machine.
//!
//! A person's next status is drawn from a [`StateTransitionMatrix`] and the
//! time until it is reached from a [`TransitionTimeMatrix`]. The combined
//! [`DiseaseProgression`] is stored in the `Context` so that every sweep that
//! moves people between statuses shares the same configuration.
mod inverse_cdf;
mod state_transition_matrix;
mod transition_time_matrix;

pub use inverse_cdf::InverseCdf;
pub use state_transition_matrix::StateTransitionMatrix;
pub use transition_time_matrix::{TransitionTime, TransitionTimeMatrix};

use log::trace;
use rand_distr::Gamma;

use crate::error::EpiabmError;
use crate::population::PersonId;
use crate::{
    define_data_plugin, define_rng, Context, ContextParametersExt, ContextPopulationExt,
    ContextRandomExt, InfectionStatus, Parameters,
};

define_rng!(ProgressionRng);
define_rng!(InfectiousnessRng);

#[derive(Debug, Clone)]
pub struct DiseaseProgression {
    transitions: StateTransitionMatrix,
    times: TransitionTimeMatrix,
    infectiousness: Gamma<f64>,
    sympt_infectiousness: f64,
    asympt_infectiousness: f64,
}

impl DiseaseProgression {
    /// # Errors
    ///
    /// Returns `EpiabmError::ConfigurationError` if an infectiousness scale is
    /// negative.
    pub fn new(
        transitions: StateTransitionMatrix,
        times: TransitionTimeMatrix,
        sympt_infectiousness: f64,
        asympt_infectiousness: f64,
    ) -> Result<DiseaseProgression, EpiabmError> {
        if sympt_infectiousness < 0.0 || asympt_infectiousness < 0.0 {
            return Err(EpiabmError::ConfigurationError(
                "infectiousness scales must be non-negative".to_string(),
            ));
        }
        let infectiousness = Gamma::new(1.0, 1.0).map_err(|e| {
            EpiabmError::ConfigurationError(format!("invalid infectiousness distribution: {e}"))
        })?;
        Ok(DiseaseProgression {
            transitions,
            times,
            infectiousness,
            sympt_infectiousness,
            asympt_infectiousness,
        })
    }

    /// # Errors
    ///
    /// Returns `EpiabmError::ConfigurationError` if the transition
    /// coefficients or delay tables are invalid.
    pub fn from_parameters(parameters: &Parameters) -> Result<DiseaseProgression, EpiabmError> {
        DiseaseProgression::new(
            StateTransitionMatrix::new(&parameters.host_progression_lists, parameters.use_ages)?,
            TransitionTimeMatrix::from_parameters(parameters)?,
            parameters.sympt_infectiousness,
            parameters.asympt_infectiousness,
        )
    }

    #[must_use]
    pub fn transitions(&self) -> &StateTransitionMatrix {
        &self.transitions
    }

    pub fn transitions_mut(&mut self) -> &mut StateTransitionMatrix {
        &mut self.transitions
    }

    #[must_use]
    pub fn times(&self) -> &TransitionTimeMatrix {
        &self.times
    }

    pub fn times_mut(&mut self) -> &mut TransitionTimeMatrix {
        &mut self.times
    }

    /// Draws the status that follows `status` for a person in `age_group`.
    /// Terminal statuses have no successor.
    ///
    /// # Errors
    ///
    /// Returns `EpiabmError::InvariantViolation` if the row of a non-terminal
    /// status has no positive weight or there is no row for `age_group`.
    pub fn next_status(
        &self,
        context: &Context,
        status: InfectionStatus,
        age_group: usize,
    ) -> Result<Option<InfectionStatus>, EpiabmError> {
        if status.is_terminal() {
            return Ok(None);
        }
        let row = self.transitions.row(status, age_group)?;
        if !row.iter().any(|weight| *weight > 0.0) {
            return Err(EpiabmError::InvariantViolation(format!(
                "no transition out of {status}"
            )));
        }
        let index = context.sample_weighted(ProgressionRng, row)?;
        Ok(Some(InfectionStatus::from_ordinal(index)))
    }

    /// Samples the delay before moving from `from` to `to`. Without a next
    /// status the person stays put forever.
    ///
    /// # Errors
    ///
    /// See [`TransitionTimeMatrix::sample`].
    pub fn transition_time(
        &self,
        context: &Context,
        from: InfectionStatus,
        to: Option<InfectionStatus>,
    ) -> Result<f64, EpiabmError> {
        match to {
            None => Ok(f64::INFINITY),
            Some(to) => self.times.sample(context, from, to),
        }
    }

    /// A fresh infectiousness for a person entering `status`: a Gamma(1, 1)
    /// draw scaled by the symptomatic or asymptomatic factor.
    #[must_use]
    pub fn sample_infectiousness(&self, context: &Context, status: InfectionStatus) -> f64 {
        let scale = if status == InfectionStatus::InfectASympt {
            self.asympt_infectiousness
        } else {
            self.sympt_infectiousness
        };
        context.sample_distr(InfectiousnessRng, &self.infectiousness) * scale
    }
}

define_data_plugin!(ProgressionPlugin, Option<DiseaseProgression>, None);

pub trait ContextProgressionExt {
    /// Uses `progression` for the rest of the run.
    fn set_progression(&mut self, progression: DiseaseProgression);

    /// Builds the progression from the parameters unless one was already set.
    ///
    /// # Errors
    ///
    /// See [`DiseaseProgression::from_parameters`].
    fn init_progression(&mut self) -> Result<(), EpiabmError>;

    /// # Errors
    ///
    /// Returns `EpiabmError::ConfigurationError` if neither `set_progression`
    /// nor `init_progression` was called.
    fn progression(&self) -> Result<&DiseaseProgression, EpiabmError>;

    /// Moves `person` into `new_status` at `time` and schedules their next
    /// transition. Infectiousness is drawn when the person becomes infectious
    /// and cleared when they stop being infectious.
    ///
    /// # Errors
    ///
    /// Propagates errors from sampling the next status or its delay.
    fn progress_person(
        &mut self,
        person: PersonId,
        new_status: InfectionStatus,
        time: f64,
    ) -> Result<(), EpiabmError>;
}

impl ContextProgressionExt for Context {
    fn set_progression(&mut self, progression: DiseaseProgression) {
        *self.get_data_mut(ProgressionPlugin) = Some(progression);
    }

    fn init_progression(&mut self) -> Result<(), EpiabmError> {
        if self.get_data(ProgressionPlugin).is_some_and(Option::is_some) {
            return Ok(());
        }
        let progression = DiseaseProgression::from_parameters(self.parameters())?;
        self.set_progression(progression);
        Ok(())
    }

    fn progression(&self) -> Result<&DiseaseProgression, EpiabmError> {
        self.get_data(ProgressionPlugin)
            .and_then(Option::as_ref)
            .ok_or_else(|| {
                EpiabmError::ConfigurationError("disease progression is not initialized".to_string())
            })
    }

    fn progress_person(
        &mut self,
        person: PersonId,
        new_status: InfectionStatus,
        time: f64,
    ) -> Result<(), EpiabmError> {
        let progression = self.progression()?;
        let person_data = self.population().person(person);
        let old_status = person_data.infection_status();
        let infectiousness = if !new_status.is_infectious() {
            0.0
        } else if old_status.is_infectious() {
            person_data.infectiousness
        } else {
            progression.sample_infectiousness(self, new_status)
        };
        let next_status = progression.next_status(self, new_status, person_data.age_group)?;
        let delay = progression.transition_time(self, new_status, next_status)?;
        trace!("{person:?} enters {new_status} at {time}, next {next_status:?} after {delay}");

        self.update_status(person, new_status);
        let person_data = self.population_mut().person_mut(person);
        person_data.infectiousness = infectiousness;
        person_data.next_infection_status = next_status;
        person_data.time_of_status_change = Some(time + delay);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::Coefficient;
    use crate::population::Population;
    use strum::IntoEnumIterator;

    fn context_with_person() -> (Context, PersonId) {
        let mut context = Context::new();
        context.init_random(11);
        let mut population = Population::new();
        let cell = population.add_cell((0.0, 0.0));
        let microcell = population.add_microcell(cell, (0.0, 0.0));
        let household = population.add_household(microcell);
        let person = population.add_person(household, 0);
        context.set_population(population);
        (context, person)
    }

    #[test]
    fn progression_requires_initialization() {
        let context = Context::new();
        assert!(matches!(
            context.progression(),
            Err(EpiabmError::ConfigurationError(_))
        ));
    }

    #[test]
    fn init_keeps_existing_progression() {
        let mut context = Context::new();
        let mut progression = DiseaseProgression::from_parameters(&Parameters::default()).unwrap();
        progression.times_mut().set(
            InfectionStatus::InfectMild,
            InfectionStatus::Recovered,
            TransitionTime::Constant(3.0),
        );
        context.set_progression(progression);
        context.init_progression().unwrap();
        assert_eq!(
            context
                .progression()
                .unwrap()
                .times()
                .get(InfectionStatus::InfectMild, InfectionStatus::Recovered),
            Some(&TransitionTime::Constant(3.0))
        );
    }

    #[test]
    fn next_status_follows_matrix() {
        let mut context = Context::new();
        context.init_random(1);
        context.init_progression().unwrap();
        let progression = context.progression().unwrap();
        for status in InfectionStatus::iter() {
            let next = progression.next_status(&context, status, 0).unwrap();
            match status {
                InfectionStatus::Recovered | InfectionStatus::Dead => assert!(next.is_none()),
                InfectionStatus::Susceptible => assert_eq!(next, Some(InfectionStatus::Exposed)),
                InfectionStatus::InfectMild => assert_eq!(next, Some(InfectionStatus::Recovered)),
                _ => assert!(next.is_some()),
            }
        }
        assert_eq!(
            progression
                .transition_time(&context, InfectionStatus::Dead, None)
                .unwrap(),
            f64::INFINITY
        );
    }

    #[test]
    fn empty_row_is_invariant_violation() {
        let mut context = Context::new();
        context.init_random(1);
        let mut progression = DiseaseProgression::from_parameters(&Parameters::default()).unwrap();
        progression
            .transitions_mut()
            .update_probability(InfectionStatus::InfectMild, InfectionStatus::Recovered, 0.0)
            .unwrap();
        let result = progression.next_status(&context, InfectionStatus::InfectMild, 0);
        assert!(matches!(result, Err(EpiabmError::InvariantViolation(_))));
    }

    #[test]
    fn infectiousness_scales() {
        let mut context = Context::new();
        context.init_random(1);
        let transitions =
            StateTransitionMatrix::new(&Parameters::default().host_progression_lists, false)
                .unwrap();
        let progression =
            DiseaseProgression::new(transitions, TransitionTimeMatrix::constant(1.0), 2.0, 0.0)
                .unwrap();
        assert_eq!(
            progression.sample_infectiousness(&context, InfectionStatus::InfectASympt),
            0.0
        );
        assert!(progression.sample_infectiousness(&context, InfectionStatus::InfectMild) > 0.0);
    }

    #[test]
    fn progress_person_schedules_next_transition() {
        let (mut context, person) = context_with_person();
        let transitions =
            StateTransitionMatrix::new(&Parameters::default().host_progression_lists, false)
                .unwrap();
        context.set_progression(
            DiseaseProgression::new(transitions, TransitionTimeMatrix::constant(2.0), 1.5, 1.0)
                .unwrap(),
        );

        context
            .progress_person(person, InfectionStatus::InfectMild, 3.0)
            .unwrap();
        let person_data = context.population().person(person);
        assert_eq!(person_data.infection_status(), InfectionStatus::InfectMild);
        assert_eq!(
            person_data.next_infection_status,
            Some(InfectionStatus::Recovered)
        );
        assert_eq!(person_data.time_of_status_change, Some(5.0));
        assert!(person_data.infectiousness > 0.0);

        context
            .progress_person(person, InfectionStatus::Recovered, 5.0)
            .unwrap();
        let person_data = context.population().person(person);
        assert_eq!(person_data.next_infection_status, None);
        assert_eq!(person_data.time_of_status_change, Some(f64::INFINITY));
        assert_eq!(person_data.infectiousness, 0.0);
    }

    #[test]
    fn age_group_selects_transition_row() {
        let mut parameters = Parameters::default();
        parameters.use_ages = true;
        let lists = &mut parameters.host_progression_lists;
        lists.insert(
            "prob_exposed_to_asympt".to_string(),
            Coefficient::PerAge(vec![1.0, 0.0]),
        );
        lists.insert(
            "prob_exposed_to_mild".to_string(),
            Coefficient::PerAge(vec![0.0, 1.0]),
        );
        lists.insert(
            "prob_exposed_to_gp".to_string(),
            Coefficient::PerAge(vec![0.0, 0.0]),
        );

        let mut context = Context::new();
        context.init_random(3);
        let mut population = Population::new();
        let cell = population.add_cell((0.0, 0.0));
        let microcell = population.add_microcell(cell, (0.0, 0.0));
        let household = population.add_household(microcell);
        let young = population.add_person(household, 0);
        let old = population.add_person(household, 1);
        context.set_population(population);
        context.set_progression(DiseaseProgression::from_parameters(&parameters).unwrap());

        for time in 0..5 {
            for person in [young, old] {
                context
                    .progress_person(person, InfectionStatus::Exposed, f64::from(time))
                    .unwrap();
            }
            let population = context.population();
            assert_eq!(
                population.person(young).next_infection_status,
                Some(InfectionStatus::InfectASympt)
            );
            assert_eq!(
                population.person(old).next_infection_status,
                Some(InfectionStatus::InfectMild)
            );
        }
    }
}
