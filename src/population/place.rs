use super::{Location, MicrocellId, PersonId};
use crate::PlaceType;

#[derive(Debug, Clone)]
pub struct Place {
    pub(super) microcell: MicrocellId,
    pub(super) location: Location,
    pub(super) place_type: PlaceType,
    pub(super) capacity: usize,
    pub(super) persons: Vec<PersonId>,
}

impl Place {
    #[must_use]
    pub fn microcell(&self) -> MicrocellId {
        self.microcell
    }

    #[must_use]
    pub fn location(&self) -> Location {
        self.location
    }

    #[must_use]
    pub fn place_type(&self) -> PlaceType {
        self.place_type
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn persons(&self) -> &[PersonId] {
        &self.persons
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.persons.len() >= self.capacity
    }
}
