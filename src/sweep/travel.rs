use log::debug;

use super::Sweep;
use crate::error::EpiabmError;
use crate::parameters::TravelParams;
use crate::population::{HouseholdId, MicrocellId, PersonId};
use crate::progression::ContextProgressionExt;
use crate::{
    define_rng, Context, ContextParametersExt, ContextPopulationExt, ContextRandomExt,
    InfectionStatus,
};

define_rng!(TravelRng);

/// Brings infectious visitors into the population in proportion to the
/// current number of cases, and removes them once their stay is over.
///
/// Visitors are spread over the most densely populated microcells and either
/// join an existing household there or get a transient household of their
/// own. Does nothing unless travel parameters are configured.
pub struct TravelSweep;

impl TravelSweep {
    /// The `count` microcells with the most residents.
    fn busiest_microcells(context: &Context, count: usize) -> Vec<MicrocellId> {
        let population = context.population();
        let mut microcells: Vec<MicrocellId> = population.microcell_ids().collect();
        // Stable, so ties keep their construction order
        microcells.sort_by_key(|microcell| {
            std::cmp::Reverse(population.microcell(*microcell).persons().len())
        });
        microcells.truncate(count);
        microcells
    }

    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn introduce(
        context: &mut Context,
        travel: &TravelParams,
        time: f64,
    ) -> Result<(), EpiabmError> {
        let cases = context.population().number_infectious();
        let visitors = (cases as f64 * travel.ratio_introduce_cases).floor() as usize;
        if visitors == 0 {
            return Ok(());
        }
        let parameters = context.parameters();
        let asympt_share = parameters
            .host_progression_lists
            .get("prob_exposed_to_asympt")
            .map_or(0.0, crate::parameters::Coefficient::mean);
        let asympt = (asympt_share * visitors as f64).floor() as usize;
        let use_ages = parameters.use_ages;
        let age_proportions = parameters.age_proportions.clone();
        let microcells = Self::busiest_microcells(context, visitors);
        if microcells.is_empty() {
            return Ok(());
        }
        debug!("{visitors} visitors arrive at {time}");

        for i in 0..visitors {
            let microcell = microcells[context.sample_range(TravelRng, 0..microcells.len())];
            let population = context.population();
            let existing: Vec<HouseholdId> = population
                .microcell(microcell)
                .households()
                .iter()
                .copied()
                .filter(|household| !population.household(*household).is_isolation_location())
                .collect();
            let join_existing = !existing.is_empty()
                && context.sample_bool(TravelRng, travel.prob_existing_household);
            let age_group = if use_ages {
                context.sample_weighted(TravelRng, age_proportions.as_slice())?
            } else {
                0
            };
            let stay = context.sample_range(TravelRng, travel.min_stay..=travel.max_stay);
            let household = if join_existing {
                existing[context.sample_range(TravelRng, 0..existing.len())]
            } else {
                context.population_mut().add_transient_household(microcell)
            };

            let visitor = context.population_mut().add_person(household, age_group);
            context.population_mut().person_mut(visitor).travel_end_time =
                Some(time + f64::from(stay));
            let status = if i < asympt {
                InfectionStatus::InfectASympt
            } else {
                InfectionStatus::InfectMild
            };
            context.progress_person(visitor, status, time)?;
        }
        Ok(())
    }

    fn remove_departing(context: &mut Context, time: f64) {
        let population = context.population();
        let departing: Vec<PersonId> = population
            .person_ids()
            .filter(|person| {
                population
                    .person(*person)
                    .travel_end_time
                    .is_some_and(|end| time > end)
            })
            .collect();
        if !departing.is_empty() {
            debug!("{} visitors leave at {time}", departing.len());
        }
        let population = context.population_mut();
        for person in departing {
            population.remove_person(person);
        }
    }
}

impl Sweep for TravelSweep {
    fn name(&self) -> &'static str {
        "travel"
    }

    fn bind(&mut self, context: &mut Context) -> Result<(), EpiabmError> {
        context.init_progression()
    }

    fn run(&mut self, context: &mut Context, time: f64) -> Result<(), EpiabmError> {
        let Some(travel) = context.parameters().travel_params.clone() else {
            return Ok(());
        };
        Self::introduce(context, &travel, time)?;
        Self::remove_departing(context, time);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::Population;
    use crate::sweep::test_support::context_with;
    use crate::Parameters;

    fn travel(ratio_introduce_cases: f64, prob_existing_household: f64) -> TravelParams {
        TravelParams {
            ratio_introduce_cases,
            prob_existing_household,
            min_stay: 2,
            max_stay: 2,
        }
    }

    /// A crowded and a quiet microcell, with ten infectious people in the
    /// crowded one.
    fn setup(travel: TravelParams) -> (Context, MicrocellId, MicrocellId) {
        let mut population = Population::new();
        let cell = population.add_cell((0.0, 0.0));
        let crowded = population.add_microcell(cell, (0.0, 0.0));
        let quiet = population.add_microcell(cell, (0.5, 0.0));
        let household = population.add_household(crowded);
        for _ in 0..10 {
            population.add_person_with_status(household, 0, InfectionStatus::InfectGP);
        }
        let household = population.add_household(quiet);
        population.add_person(household, 0);

        let mut parameters = Parameters::default();
        parameters.travel_params = Some(travel);
        (context_with(12, parameters, population), crowded, quiet)
    }

    fn visitors(context: &Context) -> Vec<PersonId> {
        let population = context.population();
        population
            .person_ids()
            .filter(|person| population.person(*person).travel_end_time.is_some())
            .collect()
    }

    #[test]
    fn visitors_go_to_the_busiest_microcell() {
        let (mut context, crowded, quiet) = setup(travel(0.1, 0.0));
        // Ten cases, so one visitor
        TravelSweep.run(&mut context, 1.0).unwrap();
        let population = context.population();
        assert_eq!(population.size(), 12);
        assert_eq!(population.microcell(crowded).persons().len(), 11);
        assert_eq!(population.microcell(quiet).persons().len(), 1);
        assert_eq!(population.microcell(crowded).households().len(), 2);

        let visitors = visitors(&context);
        assert_eq!(visitors.len(), 1);
        let person = population.person(visitors[0]);
        assert_eq!(person.travel_end_time, Some(3.0));
        assert!(person.is_infectious());
        assert!(population.household(person.household()).is_transient());
    }

    #[test]
    fn visitor_count_follows_cases() {
        let (mut context, _, _) = setup(travel(0.2, 0.0));
        TravelSweep.run(&mut context, 1.0).unwrap();
        assert_eq!(visitors(&context).len(), 2);
        assert_eq!(context.population().size(), 13);
    }

    #[test]
    fn visitors_leave_after_their_stay() {
        let (mut context, crowded, _) = setup(travel(0.1, 0.0));
        let mut sweep = TravelSweep;
        sweep.run(&mut context, 1.0).unwrap();
        // No more arrivals
        context.parameters_mut().travel_params = Some(travel(0.0, 0.0));
        sweep.run(&mut context, 3.0).unwrap();
        assert_eq!(context.population().size(), 12);
        sweep.run(&mut context, 3.5).unwrap();
        let population = context.population();
        assert_eq!(population.size(), 11);
        // The transient household is gone
        assert_eq!(population.microcell(crowded).households().len(), 1);
    }

    #[test]
    fn visitors_can_join_existing_households() {
        let (mut context, crowded, _) = setup(travel(0.1, 1.0));
        TravelSweep.run(&mut context, 1.0).unwrap();
        let population = context.population();
        assert_eq!(population.microcell(crowded).households().len(), 1);
        let household = population.microcell(crowded).households()[0];
        assert_eq!(population.household(household).persons().len(), 11);
    }

    #[test]
    fn visitors_never_join_isolation_households() {
        let (mut context, crowded, _) = setup(travel(0.1, 1.0));
        let hotel = context.population_mut().add_isolation_household(crowded);
        TravelSweep.run(&mut context, 1.0).unwrap();
        let population = context.population();
        assert!(population.household(hotel).persons().is_empty());
        let visitor = visitors(&context)[0];
        assert!(!population
            .household(population.person(visitor).household())
            .is_isolation_location());
    }

    #[test]
    fn nothing_without_travel() {
        let (mut context, _, _) = setup(travel(0.1, 0.0));
        context.parameters_mut().travel_params = None;
        TravelSweep.run(&mut context, 1.0).unwrap();
        assert_eq!(context.population().size(), 11);
    }
}
