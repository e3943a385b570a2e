use log::info;

use super::{Population, PersonId};
use crate::{define_data_plugin, Context, InfectionStatus};

define_data_plugin!(PopulationPlugin, Population, Population::new());

/// A trait extension for [`Context`] that exposes the population.
pub trait ContextPopulationExt {
    /// Replaces the population of the run.
    fn set_population(&mut self, population: Population);

    /// The population of the run. Empty until one is set.
    fn population(&self) -> &Population;

    fn population_mut(&mut self) -> &mut Population;

    /// Changes the infection status of `person` and keeps the compartment
    /// counters in step. See [`Population::update_status`].
    fn update_status(&mut self, person: PersonId, new_status: InfectionStatus) -> InfectionStatus;
}

static EMPTY_POPULATION: std::sync::LazyLock<Population> =
    std::sync::LazyLock::new(Population::new);

impl ContextPopulationExt for Context {
    fn set_population(&mut self, population: Population) {
        info!(
            "population of {} people in {} cells",
            population.size(),
            population.cells().len()
        );
        *self.get_data_mut(PopulationPlugin) = population;
    }

    fn population(&self) -> &Population {
        self.get_data(PopulationPlugin).unwrap_or(&EMPTY_POPULATION)
    }

    fn population_mut(&mut self) -> &mut Population {
        self.get_data_mut(PopulationPlugin)
    }

    fn update_status(&mut self, person: PersonId, new_status: InfectionStatus) -> InfectionStatus {
        self.population_mut().update_status(person, new_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_until_set() {
        let context = Context::new();
        assert_eq!(context.population().size(), 0);
    }

    #[test]
    fn update_status_through_context() {
        let mut context = Context::new();
        let mut population = Population::new();
        let cell = population.add_cell((0.0, 0.0));
        let microcell = population.add_microcell(cell, (0.0, 0.0));
        let household = population.add_household(microcell);
        let person = population.add_person(household, 0);
        context.set_population(population);

        context.update_status(person, InfectionStatus::Exposed);
        let population = context.population();
        assert_eq!(
            population.person(person).infection_status(),
            InfectionStatus::Exposed
        );
        assert_eq!(
            population.cell(cell).counter().count(InfectionStatus::Exposed),
            1
        );
    }
}
