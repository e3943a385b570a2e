use super::{CellId, CompartmentCounter, HouseholdId, Location, PersonId, PlaceId};

#[derive(Debug, Clone)]
pub struct Microcell {
    pub(super) cell: CellId,
    pub(super) location: Location,
    pub(super) persons: Vec<PersonId>,
    pub(super) households: Vec<HouseholdId>,
    pub(super) places: Vec<PlaceId>,
    pub(super) counter: CompartmentCounter,
    /// Places of the closed types shut from this time on.
    pub closure_start_time: Option<f64>,
    pub distancing_start_time: Option<f64>,
}

impl Microcell {
    pub(super) fn new(cell: CellId, location: Location) -> Microcell {
        Microcell {
            cell,
            location,
            persons: Vec::new(),
            households: Vec::new(),
            places: Vec::new(),
            counter: CompartmentCounter::default(),
            closure_start_time: None,
            distancing_start_time: None,
        }
    }

    #[must_use]
    pub fn cell(&self) -> CellId {
        self.cell
    }

    #[must_use]
    pub fn location(&self) -> Location {
        self.location
    }

    #[must_use]
    pub fn persons(&self) -> &[PersonId] {
        &self.persons
    }

    #[must_use]
    pub fn households(&self) -> &[HouseholdId] {
        &self.households
    }

    #[must_use]
    pub fn places(&self) -> &[PlaceId] {
        &self.places
    }

    #[must_use]
    pub fn counter(&self) -> &CompartmentCounter {
        &self.counter
    }

    #[must_use]
    pub fn count_infectious(&self) -> usize {
        self.counter.number_infectious()
    }

    #[must_use]
    pub fn count_icu(&self) -> usize {
        self.counter.number_icu()
    }

    #[must_use]
    pub fn is_closed(&self, time: f64) -> bool {
        self.closure_start_time.is_some_and(|start| start <= time)
    }

    #[must_use]
    pub fn is_distancing(&self, time: f64) -> bool {
        self.distancing_start_time.is_some_and(|start| start <= time)
    }
}
