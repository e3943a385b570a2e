//! A synthetic population generator.
//!
//! Cells are laid out on a square grid with unit spacing and split into a
//! grid of microcells. People are spread uniformly over the microcells and
//! grouped into households of random size; each microcell receives the
//! configured places.
use serde::{Deserialize, Serialize};

use super::{Location, MicrocellId, Population};
use crate::error::EpiabmError;
use crate::{define_rng, Context, ContextParametersExt, ContextRandomExt, PlaceType};

define_rng!(ToyPopulationRng);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSpec {
    pub place_type: PlaceType,
    pub per_microcell: usize,
    pub capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToyPopulationConfig {
    pub population_size: usize,
    pub cells: usize,
    pub microcells_per_cell: usize,
    pub max_household_size: usize,
    pub places: Vec<PlaceSpec>,
}

impl Default for ToyPopulationConfig {
    fn default() -> Self {
        ToyPopulationConfig {
            population_size: 1000,
            cells: 4,
            microcells_per_cell: 4,
            max_household_size: 5,
            places: vec![
                PlaceSpec {
                    place_type: PlaceType::Workplace,
                    per_microcell: 2,
                    capacity: 20,
                },
                PlaceSpec {
                    place_type: PlaceType::PrimarySchool,
                    per_microcell: 1,
                    capacity: 30,
                },
                PlaceSpec {
                    place_type: PlaceType::OutdoorSpace,
                    per_microcell: 1,
                    capacity: 10,
                },
            ],
        }
    }
}

pub struct ToyPopulationFactory {
    config: ToyPopulationConfig,
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn grid_side(n: usize) -> usize {
    (n as f64).sqrt().ceil() as usize
}

#[allow(clippy::cast_precision_loss)]
fn grid_position(index: usize, side: usize) -> Location {
    ((index % side) as f64, (index / side) as f64)
}

impl ToyPopulationFactory {
    #[must_use]
    pub fn new(config: ToyPopulationConfig) -> ToyPopulationFactory {
        ToyPopulationFactory { config }
    }

    /// Generates a population using the age proportions of the context's
    /// parameters when ages are enabled.
    ///
    /// # Errors
    ///
    /// Returns `EpiabmError::ConfigurationError` if the configuration has no
    /// cells, no microcells, or an empty household size.
    #[allow(clippy::cast_precision_loss)]
    pub fn build(&self, context: &Context) -> Result<Population, EpiabmError> {
        let config = &self.config;
        if config.cells == 0 || config.microcells_per_cell == 0 || config.max_household_size == 0
        {
            return Err(EpiabmError::ConfigurationError(
                "toy population needs at least one cell, microcell and household member"
                    .to_string(),
            ));
        }

        let mut population = Population::new();
        let cell_side = grid_side(config.cells);
        let microcell_side = grid_side(config.microcells_per_cell);
        let mut microcells: Vec<MicrocellId> = Vec::new();
        for i in 0..config.cells {
            let location = grid_position(i, cell_side);
            let cell = population.add_cell(location);
            for j in 0..config.microcells_per_cell {
                let (x, y) = grid_position(j, microcell_side);
                let offset = |v: f64| (v + 0.5) / microcell_side as f64 - 0.5;
                microcells.push(population.add_microcell(
                    cell,
                    (location.0 + offset(x), location.1 + offset(y)),
                ));
            }
        }

        let mut residents = vec![0usize; microcells.len()];
        for _ in 0..config.population_size {
            residents[context.sample_range(ToyPopulationRng, 0..microcells.len())] += 1;
        }

        let parameters = context.parameters();
        for (microcell, mut remaining) in microcells.iter().copied().zip(residents) {
            while remaining > 0 {
                let size = context
                    .sample_range(ToyPopulationRng, 1..=config.max_household_size)
                    .min(remaining);
                let household = population.add_household(microcell);
                for _ in 0..size {
                    let age_group = if parameters.use_ages {
                        context.sample_weighted(ToyPopulationRng, &parameters.age_proportions)?
                    } else {
                        0
                    };
                    population.add_person(household, age_group);
                }
                remaining -= size;
            }
            for spec in &config.places {
                for _ in 0..spec.per_microcell {
                    population.add_place(microcell, spec.place_type, spec.capacity);
                }
            }
        }
        Ok(population)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Parameters;

    #[test]
    fn builds_requested_population() {
        let mut context = Context::new();
        context.init_random(3);
        let config = ToyPopulationConfig {
            population_size: 200,
            cells: 3,
            microcells_per_cell: 2,
            ..ToyPopulationConfig::default()
        };
        let population = ToyPopulationFactory::new(config).build(&context).unwrap();
        assert_eq!(population.size(), 200);
        assert_eq!(population.cells().len(), 3);
        assert_eq!(population.microcell_ids().count(), 6);
        // 4 places per microcell with the default place list
        assert_eq!(population.place_ids().count(), 24);
        for cell in population.cells() {
            for microcell in cell.microcells() {
                for household in population.microcell(*microcell).households() {
                    let size = population.household(*household).persons().len();
                    assert!((1..=5).contains(&size));
                }
            }
        }
    }

    #[test]
    fn ages_follow_proportions() {
        let mut context = Context::new();
        context.init_random(3);
        context
            .set_parameters(Parameters {
                use_ages: true,
                age_proportions: vec![0.0, 1.0, 0.0],
                ..Parameters::default()
            })
            .unwrap();
        let population = ToyPopulationFactory::new(ToyPopulationConfig::default())
            .build(&context)
            .unwrap();
        assert!(population
            .person_ids()
            .all(|person| population.person(person).age_group == 1));
    }

    #[test]
    fn rejects_empty_grid() {
        let mut context = Context::new();
        context.init_random(3);
        let config = ToyPopulationConfig {
            cells: 0,
            ..ToyPopulationConfig::default()
        };
        let result = ToyPopulationFactory::new(config).build(&context);
        assert!(matches!(result, Err(EpiabmError::ConfigurationError(_))));
    }
}
