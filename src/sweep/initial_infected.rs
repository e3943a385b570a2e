use log::info;

use super::Sweep;
use crate::error::EpiabmError;
use crate::population::{CellId, PersonId};
use crate::progression::ContextProgressionExt;
use crate::random::sample_multiple_from_known_length;
use crate::{
    define_rng, Context, ContextParametersExt, ContextPopulationExt, ContextRandomExt,
    InfectionStatus,
};

define_rng!(InitialInfectedRng);

/// Seeds the epidemic with `initial_infected_number` mildly infected people,
/// drawn from the whole population or from a single random cell.
pub struct InitialInfectedSweep;

impl InitialInfectedSweep {
    fn choose(context: &Context, number: usize) -> Result<Vec<PersonId>, EpiabmError> {
        let population = context.population();
        if number > population.size() {
            return Err(EpiabmError::InputValidationError(format!(
                "cannot infect {number} people in a population of {}",
                population.size()
            )));
        }
        let persons: Vec<PersonId> = if context.parameters().simulation.initial_infect_cell {
            let cells: Vec<CellId> = population
                .cell_ids()
                .filter(|cell| {
                    population
                        .cell(*cell)
                        .counter()
                        .count(InfectionStatus::Susceptible)
                        >= number
                })
                .collect();
            if cells.is_empty() {
                return Err(EpiabmError::InputValidationError(format!(
                    "no cell has {number} susceptible people to infect"
                )));
            }
            let cell = cells[context.sample_range(InitialInfectedRng, 0..cells.len())];
            population.cell(cell).persons().to_vec()
        } else {
            population.person_ids().collect()
        };

        let candidates: Vec<PersonId> = persons
            .into_iter()
            .filter(|person| population.person(*person).is_susceptible())
            .collect();
        if number > candidates.len() {
            return Err(EpiabmError::InputValidationError(format!(
                "cannot infect {number} people with only {} susceptible",
                candidates.len()
            )));
        }
        Ok(context.sample(InitialInfectedRng, |rng| {
            sample_multiple_from_known_length(rng, candidates.into_iter(), number)
        }))
    }
}

impl Sweep for InitialInfectedSweep {
    fn name(&self) -> &'static str {
        "initial_infected"
    }

    fn bind(&mut self, context: &mut Context) -> Result<(), EpiabmError> {
        context.init_progression()
    }

    fn run(&mut self, context: &mut Context, time: f64) -> Result<(), EpiabmError> {
        let number = context.parameters().simulation.initial_infected_number;
        let chosen = Self::choose(context, number)?;
        info!("infecting {} people at {time}", chosen.len());
        for person in chosen {
            context.progress_person(person, InfectionStatus::InfectMild, time)?;
        }
        Ok(())
    }
}
