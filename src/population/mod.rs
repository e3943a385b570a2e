//! The population and its containment hierarchy.
//!
//! People, households, places, microcells and cells live in arenas owned by
//! [`Population`] and refer to each other through typed ids. Every person
//! belongs to exactly one household and one microcell; a microcell belongs to
//! one cell. Households and places are grouped by microcell.
//!
//! # Status changes
//!
//! Microcells and cells keep a [`CompartmentCounter`] of the infection
//! statuses of their members. The counters are never recomputed by scanning:
//! [`Population::update_status`] is the only way to change a person's status
//! and it moves that person between counter buckets at the same time. As a
//! consequence, the counters of a microcell always add up to its number of
//! members, and a cell's counters are the sum over its microcells.
//!
//! # Pending infections
//!
//! Each cell owns a FIFO of people selected for infection in the current time
//! step. Infection sweeps add to it with [`Population::enqueue_person`] and
//! the queue sweep drains it with [`Population::drain_queue`].
mod cell;
mod compartment_counter;
mod context_extension;
mod household;
mod microcell;
mod person;
mod place;
mod toy;
mod vaccine_queue;

use std::fmt::{Debug, Display, Formatter};

use log::trace;

pub use cell::Cell;
pub use compartment_counter::CompartmentCounter;
pub use context_extension::ContextPopulationExt;
pub use household::Household;
pub use microcell::Microcell;
pub use person::Person;
pub use place::Place;
pub use toy::{ToyPopulationConfig, ToyPopulationFactory};
pub use vaccine_queue::VaccineQueue;

use crate::error::EpiabmError;
use crate::{InfectionStatus, PlaceType};

/// Planar coordinates.
pub type Location = (f64, f64);

#[must_use]
pub fn distance(a: Location, b: Location) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

macro_rules! define_id {
    ($name:ident, $label:literal) => {
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub(crate) usize);

        impl $name {
            #[must_use]
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($label, " {}"), self.0)
            }
        }
    };
}

define_id!(PersonId, "Person");
define_id!(HouseholdId, "Household");
define_id!(PlaceId, "Place");
define_id!(MicrocellId, "Microcell");
define_id!(CellId, "Cell");

#[derive(Debug, Clone, Default)]
pub struct Population {
    persons: Vec<Person>,
    households: Vec<Household>,
    places: Vec<Place>,
    microcells: Vec<Microcell>,
    cells: Vec<Cell>,
    vaccine_queue: VaccineQueue,
}

impl Population {
    #[must_use]
    pub fn new() -> Population {
        Population::default()
    }

    pub fn add_cell(&mut self, location: Location) -> CellId {
        let id = CellId(self.cells.len());
        self.cells.push(Cell::new(id, location));
        id
    }

    pub fn add_microcell(&mut self, cell: CellId, location: Location) -> MicrocellId {
        let id = MicrocellId(self.microcells.len());
        self.microcells.push(Microcell::new(cell, location));
        self.cells[cell.0].microcells.push(id);
        id
    }

    /// Adds a household located at the centre of `microcell`.
    pub fn add_household(&mut self, microcell: MicrocellId) -> HouseholdId {
        self.insert_household(microcell, false)
    }

    /// Adds a household that is discarded once its last member leaves.
    pub fn add_transient_household(&mut self, microcell: MicrocellId) -> HouseholdId {
        self.insert_household(microcell, true)
    }

    /// Adds a transient household where a traveller isolates on their own.
    pub fn add_isolation_household(&mut self, microcell: MicrocellId) -> HouseholdId {
        let id = self.insert_household(microcell, true);
        self.households[id.0].isolation_location = true;
        id
    }

    fn insert_household(&mut self, microcell: MicrocellId, transient: bool) -> HouseholdId {
        let id = HouseholdId(self.households.len());
        let location = self.microcells[microcell.0].location;
        self.households
            .push(Household::new(microcell, location, transient));
        self.microcells[microcell.0].households.push(id);
        id
    }

    pub fn add_place(
        &mut self,
        microcell: MicrocellId,
        place_type: PlaceType,
        capacity: usize,
    ) -> PlaceId {
        let id = PlaceId(self.places.len());
        let location = self.microcells[microcell.0].location;
        self.places.push(Place {
            microcell,
            location,
            place_type,
            capacity,
            persons: Vec::new(),
        });
        self.microcells[microcell.0].places.push(id);
        id
    }

    /// Adds a susceptible person to `household`, and thereby to its
    /// microcell and cell.
    pub fn add_person(&mut self, household: HouseholdId, age_group: usize) -> PersonId {
        self.add_person_with_status(household, age_group, InfectionStatus::Susceptible)
    }

    /// Adds a person who enters the population with `status`. The person is
    /// counted in that status right away; this is not a status change.
    pub fn add_person_with_status(
        &mut self,
        household: HouseholdId,
        age_group: usize,
        status: InfectionStatus,
    ) -> PersonId {
        let id = PersonId(self.persons.len());
        let microcell = self.households[household.0].microcell;
        let cell = self.microcells[microcell.0].cell;
        self.persons
            .push(Person::new(id, household, microcell, cell, age_group, status));

        self.households[household.0].persons.push(id);
        let microcell = &mut self.microcells[microcell.0];
        microcell.persons.push(id);
        microcell.counter.increment(status);
        let cell = &mut self.cells[cell.0];
        cell.persons.push(id);
        cell.counter.increment(status);
        id
    }

    /// Enrols `person` at `place`. Returns false if the place is full or the
    /// person already attends it.
    pub fn add_person_to_place(&mut self, person: PersonId, place: PlaceId) -> bool {
        let place_data = &mut self.places[place.0];
        if place_data.is_full() || place_data.persons.contains(&person) {
            return false;
        }
        place_data.persons.push(person);
        let place_type = place_data.place_type;
        self.persons[person.0].places.push((place, place_type));
        true
    }

    /// Removes everyone from `place`.
    pub fn empty_place(&mut self, place: PlaceId) {
        let members = std::mem::take(&mut self.places[place.0].persons);
        for person in members {
            self.persons[person.0].places.retain(|(p, _)| *p != place);
        }
    }

    /// Sets the infection status of `person`, moving them between the
    /// counter buckets of their microcell and cell. Returns the old status.
    ///
    /// This is the only operation that changes `infection_status`. People who
    /// have departed are no longer counted, so only their record changes.
    pub fn update_status(&mut self, person: PersonId, new_status: InfectionStatus) -> InfectionStatus {
        let person_data = &mut self.persons[person.0];
        let old_status = person_data.infection_status;
        person_data.infection_status = new_status;
        if person_data.departed {
            return old_status;
        }
        let (microcell, cell) = (person_data.microcell, person_data.cell);

        let microcell_counter = &mut self.microcells[microcell.0].counter;
        microcell_counter.decrement(old_status);
        microcell_counter.increment(new_status);
        let cell_counter = &mut self.cells[cell.0].counter;
        cell_counter.decrement(old_status);
        cell_counter.increment(new_status);

        trace!("{person:?} {old_status} -> {new_status}");
        old_status
    }

    /// Detaches `person` from every membership list and counter. Their record
    /// is kept, marked as departed, so that ids remain stable. A transient
    /// household left empty is discarded.
    pub fn remove_person(&mut self, person: PersonId) {
        let person_data = &mut self.persons[person.0];
        if person_data.departed {
            return;
        }
        person_data.departed = true;
        let status = person_data.infection_status;
        let (household, microcell, cell) =
            (person_data.household, person_data.microcell, person_data.cell);
        let places = std::mem::take(&mut person_data.places);

        for (place, _) in places {
            self.places[place.0].persons.retain(|p| *p != person);
        }
        let microcell_data = &mut self.microcells[microcell.0];
        microcell_data.persons.retain(|p| *p != person);
        microcell_data.counter.decrement(status);
        let cell_data = &mut self.cells[cell.0];
        cell_data.persons.retain(|p| *p != person);
        cell_data.counter.decrement(status);

        let household_data = &mut self.households[household.0];
        household_data.persons.retain(|p| *p != person);
        if household_data.transient && household_data.persons.is_empty() {
            self.remove_household(household);
        }
    }

    /// Moves `person` into another household of their microcell. Microcell and
    /// cell memberships, and therefore the counters, are unchanged. A
    /// transient household left empty is discarded.
    ///
    /// # Errors
    ///
    /// Returns `EpiabmError::InvariantViolation` if the person has departed,
    /// or the household is removed or belongs to another microcell.
    pub fn move_to_household(
        &mut self,
        person: PersonId,
        household: HouseholdId,
    ) -> Result<(), EpiabmError> {
        let person_data = &self.persons[person.0];
        let target = &self.households[household.0];
        if person_data.departed || target.removed || target.microcell != person_data.microcell {
            return Err(EpiabmError::InvariantViolation(format!(
                "{person:?} cannot move to {household:?}"
            )));
        }
        let previous = person_data.household;
        if previous == household {
            return Ok(());
        }

        self.persons[person.0].household = household;
        self.households[household.0].persons.push(person);
        let previous_data = &mut self.households[previous.0];
        previous_data.persons.retain(|p| *p != person);
        if previous_data.transient && previous_data.persons.is_empty() {
            self.remove_household(previous);
        }
        trace!("{person:?} moves from {previous:?} to {household:?}");
        Ok(())
    }

    fn remove_household(&mut self, household: HouseholdId) {
        let household_data = &mut self.households[household.0];
        household_data.removed = true;
        let microcell = household_data.microcell;
        self.microcells[microcell.0]
            .households
            .retain(|h| *h != household);
    }

    /// Adds `person` to the pending-infection queue of their cell. Enqueueing
    /// someone who is already waiting has no effect.
    pub fn enqueue_person(&mut self, person: PersonId) -> bool {
        let cell = self.persons[person.0].cell;
        self.cells[cell.0].enqueue_person(person)
    }

    /// Empties the pending-infection queue of `cell`, returning its content in
    /// insertion order.
    pub fn drain_queue(&mut self, cell: CellId) -> Vec<PersonId> {
        self.cells[cell.0].drain_queue()
    }

    /// Recomputes, for every cell, the list of other cells whose centre is
    /// closer than `radius`.
    pub fn update_nearest_neighbours(&mut self, radius: f64) {
        let locations: Vec<Location> = self.cells.iter().map(|cell| cell.location).collect();
        for (i, cell) in self.cells.iter_mut().enumerate() {
            cell.nearest_neighbours = locations
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(j, location)| (CellId(j), distance(cell.location, *location)))
                .filter(|(_, d)| *d < radius)
                .collect();
        }
    }

    #[must_use]
    pub fn person(&self, person: PersonId) -> &Person {
        &self.persons[person.0]
    }

    pub fn person_mut(&mut self, person: PersonId) -> &mut Person {
        &mut self.persons[person.0]
    }

    #[must_use]
    pub fn household(&self, household: HouseholdId) -> &Household {
        &self.households[household.0]
    }

    pub fn household_mut(&mut self, household: HouseholdId) -> &mut Household {
        &mut self.households[household.0]
    }

    #[must_use]
    pub fn place(&self, place: PlaceId) -> &Place {
        &self.places[place.0]
    }

    #[must_use]
    pub fn microcell(&self, microcell: MicrocellId) -> &Microcell {
        &self.microcells[microcell.0]
    }

    pub fn microcell_mut(&mut self, microcell: MicrocellId) -> &mut Microcell {
        &mut self.microcells[microcell.0]
    }

    #[must_use]
    pub fn cell(&self, cell: CellId) -> &Cell {
        &self.cells[cell.0]
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell_ids(&self) -> impl Iterator<Item = CellId> {
        (0..self.cells.len()).map(CellId)
    }

    pub fn microcell_ids(&self) -> impl Iterator<Item = MicrocellId> {
        (0..self.microcells.len()).map(MicrocellId)
    }

    pub fn place_ids(&self) -> impl Iterator<Item = PlaceId> {
        (0..self.places.len()).map(PlaceId)
    }

    /// Everyone currently in the population, in cell order.
    pub fn person_ids(&self) -> impl Iterator<Item = PersonId> + '_ {
        self.cells.iter().flat_map(|cell| cell.persons.iter().copied())
    }

    /// Number of people currently in the population.
    #[must_use]
    pub fn size(&self) -> usize {
        self.cells.iter().map(|cell| cell.persons.len()).sum()
    }

    /// Number of people in each status, summed over all cells.
    #[must_use]
    pub fn compartment_counts(&self) -> CompartmentCounter {
        let mut total = CompartmentCounter::default();
        for cell in &self.cells {
            total.add(&cell.counter);
        }
        total
    }

    #[must_use]
    pub fn number_infectious(&self) -> usize {
        self.cells.iter().map(Cell::number_infectious).sum()
    }

    pub fn vaccine_queue_mut(&mut self) -> &mut VaccineQueue {
        &mut self.vaccine_queue
    }

    #[must_use]
    pub fn vaccine_queue(&self) -> &VaccineQueue {
        &self.vaccine_queue
    }
}
