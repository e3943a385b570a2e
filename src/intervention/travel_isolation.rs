use log::debug;

use super::Intervention;
use crate::error::EpiabmError;
use crate::parameters::{ActivationWindow, TravelIsolationParams};
use crate::population::{HouseholdId, PersonId};
use crate::{
    define_rng, Context, ContextParametersExt, ContextPopulationExt, ContextRandomExt, HashSet,
    HashSetExt,
};

define_rng!(TravelIsolationRng);

/// Visitors brought in by the travel sweep isolate for
/// `isolation_duration` days, starting `isolation_delay` days after they are
/// found. With `hotel_isolate`, a visitor staying with others moves to an
/// isolation household of their own, and on release may move back into an
/// ordinary household of the microcell with the travel
/// `prob_existing_household`.
pub struct TravelIsolation {
    params: TravelIsolationParams,
    decided: HashSet<PersonId>,
}

impl TravelIsolation {
    #[must_use]
    pub fn new(params: TravelIsolationParams) -> TravelIsolation {
        TravelIsolation {
            params,
            decided: HashSet::new(),
        }
    }

    /// An ordinary household of the microcell of `person`, other than their
    /// own.
    fn pick_household(context: &Context, person: PersonId) -> Option<HouseholdId> {
        let population = context.population();
        let person = population.person(person);
        let candidates: Vec<HouseholdId> = population
            .microcell(person.microcell())
            .households()
            .iter()
            .copied()
            .filter(|household| {
                *household != person.household()
                    && !population.household(*household).is_isolation_location()
            })
            .collect();
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[context.sample_range(TravelIsolationRng, 0..candidates.len())])
    }

    fn release(&self, context: &mut Context, person: PersonId) -> Result<(), EpiabmError> {
        context.population_mut().person_mut(person).travel_isolation_start_time = None;
        if !self.params.hotel_isolate {
            return Ok(());
        }
        let prob_existing_household = context
            .parameters()
            .travel_params
            .as_ref()
            .map_or(0.0, |travel| travel.prob_existing_household);
        if !context.sample_bool(TravelIsolationRng, prob_existing_household) {
            return Ok(());
        }
        match Self::pick_household(context, person) {
            Some(household) => context.population_mut().move_to_household(person, household),
            None => Ok(()),
        }
    }

    fn isolate(
        &self,
        context: &mut Context,
        person: PersonId,
        time: f64,
    ) -> Result<(), EpiabmError> {
        let population = context.population_mut();
        let (household, microcell) = {
            let person_data = population.person(person);
            (person_data.household(), person_data.microcell())
        };
        if self.params.hotel_isolate && population.household(household).persons().len() > 1 {
            let hotel = population.add_isolation_household(microcell);
            population.move_to_household(person, hotel)?;
        }
        population.person_mut(person).travel_isolation_start_time =
            Some(time + self.params.isolation_delay);
        Ok(())
    }
}

impl Intervention for TravelIsolation {
    fn name(&self) -> &'static str {
        "travel_isolation"
    }

    fn window(&self) -> &ActivationWindow {
        &self.params.window
    }

    fn apply(&mut self, context: &mut Context, time: f64) -> Result<(), EpiabmError> {
        let population = context.population();
        let mut expired = Vec::new();
        let mut isolating = Vec::new();
        for person_id in population.person_ids() {
            let person = population.person(person_id);
            if person.travel_end_time.is_none() {
                continue;
            }
            if let Some(start) = person.travel_isolation_start_time {
                if time > start + self.params.isolation_duration {
                    expired.push(person_id);
                }
            } else if (!self.params.use_testing || person.infection_status().is_symptomatic())
                && self.decided.insert(person_id)
                && context.sample_bool(TravelIsolationRng, self.params.isolation_probability)
            {
                isolating.push(person_id);
            }
        }
        debug!(
            "{} travellers start and {} stop isolating at {time}",
            isolating.len(),
            expired.len()
        );

        for person in expired {
            self.release(context, person)?;
        }
        for person in isolating {
            self.isolate(context, person, time)?;
        }
        Ok(())
    }

    fn turn_off(&mut self, context: &mut Context) {
        let population = context.population_mut();
        let persons: Vec<PersonId> = population.person_ids().collect();
        for person in persons {
            population.person_mut(person).travel_isolation_start_time = None;
        }
        self.decided.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::TravelParams;
    use crate::population::{MicrocellId, Population};
    use crate::sweep::test_support::context_with;
    use crate::{InfectionStatus, Parameters};

    fn isolation(hotel_isolate: bool, use_testing: bool) -> TravelIsolation {
        TravelIsolation::new(TravelIsolationParams {
            isolation_duration: 5.0,
            isolation_probability: 1.0,
            isolation_delay: 1.0,
            use_testing,
            hotel_isolate,
            ..TravelIsolationParams::default()
        })
    }

    /// A resident household joined by an asymptomatic visitor, and a
    /// symptomatic visitor alone in a transient household.
    fn context(
        prob_existing_household: f64,
    ) -> (Context, MicrocellId, PersonId, PersonId, PersonId) {
        let mut population = Population::new();
        let cell = population.add_cell((0.0, 0.0));
        let microcell = population.add_microcell(cell, (0.0, 0.0));
        let home = population.add_household(microcell);
        let resident = population.add_person(home, 0);
        let guest = population.add_person_with_status(home, 0, InfectionStatus::InfectASympt);
        population.person_mut(guest).travel_end_time = Some(30.0);
        let lodging = population.add_transient_household(microcell);
        let loner = population.add_person_with_status(lodging, 0, InfectionStatus::InfectMild);
        population.person_mut(loner).travel_end_time = Some(30.0);

        let mut parameters = Parameters::default();
        parameters.travel_params = Some(TravelParams {
            prob_existing_household,
            ..TravelParams::default()
        });
        (
            context_with(31, parameters, population),
            microcell,
            resident,
            guest,
            loner,
        )
    }

    #[test]
    fn travellers_isolate() {
        let (mut context, _, resident, guest, loner) = context(0.0);
        let mut isolation = isolation(false, false);
        isolation.apply(&mut context, 2.0).unwrap();
        let population = context.population();
        assert_eq!(
            population.person(guest).travel_isolation_start_time,
            Some(3.0)
        );
        assert_eq!(
            population.person(loner).travel_isolation_start_time,
            Some(3.0)
        );
        assert_eq!(population.person(resident).travel_isolation_start_time, None);
        // Nobody moved
        assert_eq!(
            population.person(guest).household(),
            population.person(resident).household()
        );
    }

    #[test]
    fn testing_selects_symptomatic_travellers() {
        let (mut context, _, _, guest, loner) = context(0.0);
        let mut isolation = isolation(false, true);
        isolation.apply(&mut context, 2.0).unwrap();
        let population = context.population();
        assert_eq!(population.person(guest).travel_isolation_start_time, None);
        assert_eq!(
            population.person(loner).travel_isolation_start_time,
            Some(3.0)
        );
    }

    #[test]
    fn hotel_isolation_separates_shared_households() {
        let (mut context, microcell, resident, guest, loner) = context(0.0);
        let lodging = context.population().person(loner).household();
        let mut isolation = isolation(true, false);
        isolation.apply(&mut context, 2.0).unwrap();

        let population = context.population();
        let hotel = population.person(guest).household();
        assert_ne!(hotel, population.person(resident).household());
        assert!(population.household(hotel).is_isolation_location());
        assert_eq!(population.household(hotel).persons(), &[guest]);
        // Already alone, so stays put
        assert_eq!(population.person(loner).household(), lodging);
        assert_eq!(population.microcell(microcell).persons().len(), 3);
        assert_eq!(population.microcell(microcell).counter().total(), 3);
    }

    #[test]
    fn release_can_return_to_an_ordinary_household() {
        let (mut context, _, _, guest, _) = context(1.0);
        let mut isolation = isolation(true, false);
        isolation.apply(&mut context, 2.0).unwrap();
        let hotel = context.population().person(guest).household();

        isolation.apply(&mut context, 8.0).unwrap();
        assert_eq!(
            context.population().person(guest).travel_isolation_start_time,
            Some(3.0)
        );
        isolation.apply(&mut context, 8.5).unwrap();
        let population = context.population();
        assert_eq!(population.person(guest).travel_isolation_start_time, None);
        assert_ne!(population.person(guest).household(), hotel);
        assert!(!population
            .household(population.person(guest).household())
            .is_isolation_location());
        assert!(population.household(hotel).is_removed());

        // Decided once, so no second isolation
        isolation.apply(&mut context, 9.0).unwrap();
        assert_eq!(
            context.population().person(guest).travel_isolation_start_time,
            None
        );
    }

    #[test]
    fn non_compliant_never_isolate() {
        let (mut context, _, _, guest, loner) = context(0.0);
        let mut isolation = TravelIsolation::new(TravelIsolationParams {
            isolation_probability: 0.0,
            ..TravelIsolationParams::default()
        });
        for time in 0..5 {
            isolation.apply(&mut context, f64::from(time)).unwrap();
        }
        let population = context.population();
        assert_eq!(population.person(guest).travel_isolation_start_time, None);
        assert_eq!(population.person(loner).travel_isolation_start_time, None);
    }

    #[test]
    fn turn_off_clears_isolation() {
        let (mut context, _, _, guest, _) = context(0.0);
        let mut isolation = isolation(false, false);
        isolation.apply(&mut context, 2.0).unwrap();
        isolation.turn_off(&mut context);
        assert_eq!(
            context.population().person(guest).travel_isolation_start_time,
            None
        );
        isolation.apply(&mut context, 4.0).unwrap();
        assert_eq!(
            context.population().person(guest).travel_isolation_start_time,
            Some(5.0)
        );
    }
}
