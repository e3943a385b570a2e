use log::{debug, trace};
use rand_distr::Poisson;

use super::Sweep;
use crate::error::EpiabmError;
use crate::infection::{spatial_inf, spatial_kernel, spatial_susc};
use crate::population::{distance, CellId, MicrocellId, PersonId};
use crate::{
    define_rng, Context, ContextParametersExt, ContextPopulationExt, ContextRandomExt,
    InfectionStatus,
};

define_rng!(SpatialSweepRng);

/// Spreads infection between microcells, within a cell and into the
/// neighbouring cells closer than the infection radius.
///
/// Each cell emits a Poisson number of infection attempts with a rate
/// proportional to the spatial infectiousness of its infectious members.
/// Every attempt picks an infector weighted by infectiousness, a target
/// microcell weighted by the distance kernel and a susceptible person
/// uniformly from that microcell.
pub struct SpatialSweep;

impl SpatialSweep {
    /// Microcells within `radius` of `origin` that hold someone to infect,
    /// with their kernel weight.
    fn candidates(
        context: &Context,
        cell: CellId,
        origin: MicrocellId,
        radius: f64,
    ) -> Vec<(MicrocellId, f64)> {
        let population = context.population();
        let spatial_params = &context.parameters().spatial_params;
        let origin = population.microcell(origin).location();
        let cell_data = population.cell(cell);
        std::iter::once(cell)
            .chain(cell_data.nearest_neighbours().iter().map(|(id, _)| *id))
            .flat_map(|id| population.cell(id).microcells().iter().copied())
            .filter_map(|microcell| {
                let microcell_data = population.microcell(microcell);
                let d = distance(origin, microcell_data.location());
                (d < radius && microcell_data.counter().count(InfectionStatus::Susceptible) > 0)
                    .then(|| (microcell, spatial_kernel(d, spatial_params)))
            })
            .collect()
    }

    fn attempt(
        context: &Context,
        cell: CellId,
        infectors: &[PersonId],
        weights: &[f64],
        time: f64,
    ) -> Result<Option<PersonId>, EpiabmError> {
        let population = context.population();
        let radius = context.parameters().spatial_params.infection_radius;
        let infector = infectors[context.sample_weighted(SpatialSweepRng, weights)?];
        let candidates = Self::candidates(context, cell, population.person(infector).microcell(), radius);
        if candidates.is_empty() {
            return Ok(None);
        }
        let kernel: Vec<f64> = candidates.iter().map(|(_, weight)| *weight).collect();
        let (microcell, _) = candidates[context.sample_weighted(SpatialSweepRng, &kernel)?];
        let susceptibles: Vec<PersonId> = population
            .microcell(microcell)
            .persons()
            .iter()
            .copied()
            .filter(|person| population.person(*person).is_susceptible())
            .collect();
        let infectee = susceptibles[context.sample_range(SpatialSweepRng, 0..susceptibles.len())];
        if context.sample_bool(SpatialSweepRng, spatial_susc(context, infectee, time)) {
            trace!("{infector:?} infects {infectee:?} in {microcell:?}");
            return Ok(Some(infectee));
        }
        Ok(None)
    }
}

impl Sweep for SpatialSweep {
    fn name(&self) -> &'static str {
        "spatial"
    }

    fn bind(&mut self, context: &mut Context) -> Result<(), EpiabmError> {
        let radius = context.parameters().spatial_params.infection_radius;
        context.population_mut().update_nearest_neighbours(radius);
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn run(&mut self, context: &mut Context, time: f64) -> Result<(), EpiabmError> {
        let time_steps_per_day = context.parameters().time_steps_per_day;
        let mut infected: Vec<PersonId> = Vec::new();
        for cell in context.population().cell_ids() {
            let population = context.population();
            let infectors: Vec<PersonId> = population
                .cell(cell)
                .persons()
                .iter()
                .copied()
                .filter(|person| population.person(*person).is_infectious())
                .collect();
            let weights: Vec<f64> = infectors
                .iter()
                .map(|infector| spatial_inf(context, *infector, time))
                .collect();
            let emission: f64 = weights.iter().sum();
            if emission <= 0.0 {
                continue;
            }
            let rate = emission / time_steps_per_day;
            let poisson = Poisson::new(rate).map_err(|e| {
                EpiabmError::ConfigurationError(format!("invalid spatial infection rate {rate}: {e}"))
            })?;
            let attempts = context.sample_distr(SpatialSweepRng, &poisson) as u64;
            debug!("{cell:?} makes {attempts} spatial infection attempts");
            for _ in 0..attempts {
                if let Some(infectee) = Self::attempt(context, cell, &infectors, &weights, time)? {
                    infected.push(infectee);
                }
            }
        }
        let population = context.population_mut();
        for person in infected {
            population.enqueue_person(person);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::Population;
    use crate::sweep::test_support::context_with;
    use crate::Parameters;

    /// An infectious person and a susceptible one in two microcells of one
    /// cell, one unit apart.
    fn two_microcells(radius: f64) -> (Context, PersonId) {
        let mut population = Population::new();
        let cell = population.add_cell((0.0, 0.0));
        let near = population.add_microcell(cell, (0.0, 0.0));
        let far = population.add_microcell(cell, (1.0, 0.0));
        let home = population.add_household(near);
        let infector = population.add_person_with_status(home, 0, InfectionStatus::InfectMild);
        population.person_mut(infector).infectiousness = 1000.0;
        let household = population.add_household(far);
        let infectee = population.add_person(household, 0);

        let mut parameters = Parameters::default();
        parameters.spatial_params.infection_radius = radius;
        parameters.spatial_params.spatial_transmission = 1.0;
        (context_with(17, parameters, population), infectee)
    }

    fn queued(context: &Context) -> Vec<PersonId> {
        let population = context.population();
        population
            .cell_ids()
            .flat_map(|cell| population.cell(cell).queue().iter().copied())
            .collect()
    }

    #[test]
    fn target_beyond_radius_is_safe() {
        let (mut context, _) = two_microcells(0.5);
        let mut sweep = SpatialSweep;
        sweep.bind(&mut context).unwrap();
        sweep.run(&mut context, 1.0).unwrap();
        assert!(queued(&context).is_empty());
    }

    #[test]
    fn target_within_radius_is_infected() {
        let (mut context, infectee) = two_microcells(2.0);
        let mut sweep = SpatialSweep;
        sweep.bind(&mut context).unwrap();
        sweep.run(&mut context, 1.0).unwrap();
        assert_eq!(queued(&context), vec![infectee]);
    }

    #[test]
    fn neighbours_cached_at_bind() {
        let mut population = Population::new();
        let a = population.add_cell((0.0, 0.0));
        population.add_cell((1.0, 0.0));
        population.add_cell((5.0, 0.0));
        let mut parameters = Parameters::default();
        parameters.spatial_params.infection_radius = 2.0;
        let mut context = context_with(1, parameters, population);
        SpatialSweep.bind(&mut context).unwrap();
        let neighbours = context.population().cell(a).nearest_neighbours();
        assert_eq!(neighbours.len(), 1);
        assert_eq!(neighbours[0].1, 1.0);
    }
}
