use super::{Location, MicrocellId, PersonId};

#[derive(Debug, Clone)]
pub struct Household {
    pub(super) microcell: MicrocellId,
    pub(super) location: Location,
    pub(super) persons: Vec<PersonId>,
    pub(super) transient: bool,
    pub(super) isolation_location: bool,
    pub(super) removed: bool,
    pub susceptibility: f64,
    pub infectiousness: f64,
}

impl Household {
    pub(super) fn new(microcell: MicrocellId, location: Location, transient: bool) -> Household {
        Household {
            microcell,
            location,
            persons: Vec::new(),
            transient,
            isolation_location: false,
            removed: false,
            susceptibility: 1.0,
            infectiousness: 1.0,
        }
    }

    #[must_use]
    pub fn microcell(&self) -> MicrocellId {
        self.microcell
    }

    #[must_use]
    pub fn location(&self) -> Location {
        self.location
    }

    #[must_use]
    pub fn persons(&self) -> &[PersonId] {
        &self.persons
    }

    /// Created for visitors; discarded once nobody lives in it.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        self.transient
    }

    /// Somewhere a traveller isolates away from the people they were staying
    /// with. Never joined by anyone else.
    #[must_use]
    pub fn is_isolation_location(&self) -> bool {
        self.isolation_location
    }

    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.removed
    }
}
