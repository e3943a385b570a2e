use std::collections::VecDeque;

use super::{CellId, CompartmentCounter, Location, MicrocellId, PersonId};
use crate::{HashSet, HashSetExt};

#[derive(Debug, Clone)]
pub struct Cell {
    pub(super) id: CellId,
    pub(super) location: Location,
    pub(super) microcells: Vec<MicrocellId>,
    pub(super) persons: Vec<PersonId>,
    pub(super) nearest_neighbours: Vec<(CellId, f64)>,
    pub(super) counter: CompartmentCounter,
    queue: VecDeque<PersonId>,
    queued: HashSet<PersonId>,
}

impl Cell {
    pub(super) fn new(id: CellId, location: Location) -> Cell {
        Cell {
            id,
            location,
            microcells: Vec::new(),
            persons: Vec::new(),
            nearest_neighbours: Vec::new(),
            counter: CompartmentCounter::default(),
            queue: VecDeque::new(),
            queued: HashSet::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> CellId {
        self.id
    }

    #[must_use]
    pub fn location(&self) -> Location {
        self.location
    }

    #[must_use]
    pub fn microcells(&self) -> &[MicrocellId] {
        &self.microcells
    }

    #[must_use]
    pub fn persons(&self) -> &[PersonId] {
        &self.persons
    }

    /// Other cells within the infection radius and their distance.
    #[must_use]
    pub fn nearest_neighbours(&self) -> &[(CellId, f64)] {
        &self.nearest_neighbours
    }

    #[must_use]
    pub fn counter(&self) -> &CompartmentCounter {
        &self.counter
    }

    #[must_use]
    pub fn number_infectious(&self) -> usize {
        self.counter.number_infectious()
    }

    /// Adds `person` to the pending-infection queue. Returns false if they
    /// are already waiting.
    pub(super) fn enqueue_person(&mut self, person: PersonId) -> bool {
        if !self.queued.insert(person) {
            return false;
        }
        self.queue.push_back(person);
        true
    }

    pub(super) fn drain_queue(&mut self) -> Vec<PersonId> {
        self.queued.clear();
        self.queue.drain(..).collect()
    }

    #[must_use]
    pub fn queue(&self) -> &VecDeque<PersonId> {
        &self.queue
    }
}
