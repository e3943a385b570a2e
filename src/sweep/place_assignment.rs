//! Assigning people to places.
//!
//! Most places have a fixed membership decided once at the start of the run.
//! Outdoor spaces are instead filled with a fresh random group of people from
//! the surrounding cell at every time step.
use log::debug;

use super::Sweep;
use crate::error::EpiabmError;
use crate::population::{PersonId, PlaceId};
use crate::random::sample_multiple_from_known_length;
use crate::{define_rng, Context, ContextPopulationExt, ContextRandomExt, PlaceType};

define_rng!(PlaceAssignmentRng);

/// Draws up to the capacity of `place` from the people of its cell who do
/// not already attend a place of the same type.
fn draw_members(context: &Context, place: PlaceId) -> Vec<PersonId> {
    let population = context.population();
    let place_data = population.place(place);
    let place_type = place_data.place_type();
    let cell = population.microcell(place_data.microcell()).cell();
    let candidates: Vec<PersonId> = population
        .cell(cell)
        .persons()
        .iter()
        .copied()
        .filter(|person| !population.person(*person).attends(place_type))
        .collect();
    let free = place_data.capacity().saturating_sub(place_data.persons().len());
    context.sample(PlaceAssignmentRng, |rng| {
        sample_multiple_from_known_length(rng, candidates.into_iter(), free)
    })
}

fn fill(context: &mut Context, places: &[PlaceId]) {
    for place in places {
        let members = draw_members(context, *place);
        let population = context.population_mut();
        for person in members {
            population.add_person_to_place(person, *place);
        }
    }
}

/// Gives every place other than outdoor spaces its fixed membership.
pub struct InitialisePlaceSweep;

impl Sweep for InitialisePlaceSweep {
    fn name(&self) -> &'static str {
        "initialise_place"
    }

    fn run(&mut self, context: &mut Context, _time: f64) -> Result<(), EpiabmError> {
        let population = context.population();
        let places: Vec<PlaceId> = population
            .place_ids()
            .filter(|place| population.place(*place).place_type() != PlaceType::OutdoorSpace)
            .collect();
        debug!("assigning members to {} places", places.len());
        fill(context, &places);
        Ok(())
    }
}

/// Re-populates outdoor spaces.
pub struct UpdatePlaceSweep;

impl Sweep for UpdatePlaceSweep {
    fn name(&self) -> &'static str {
        "update_place"
    }

    fn run(&mut self, context: &mut Context, _time: f64) -> Result<(), EpiabmError> {
        let population = context.population();
        let places: Vec<PlaceId> = population
            .place_ids()
            .filter(|place| population.place(*place).place_type() == PlaceType::OutdoorSpace)
            .collect();
        for place in &places {
            context.population_mut().empty_place(*place);
        }
        fill(context, &places);
        Ok(())
    }
}
