use super::{CellId, HouseholdId, MicrocellId, PersonId, PlaceId};
use crate::{InfectionStatus, PlaceType};

/// An individual of the population.
///
/// `infection_status` can only be changed through
/// [`Population::update_status`](super::Population::update_status) so that
/// the compartment counters of the owning microcell and cell stay in step.
/// The optional fields are unset until an intervention or the travel sweep
/// sets them.
#[derive(Debug, Clone)]
pub struct Person {
    pub(super) id: PersonId,
    pub(super) household: HouseholdId,
    pub(super) microcell: MicrocellId,
    pub(super) cell: CellId,
    pub(super) infection_status: InfectionStatus,
    pub(super) places: Vec<(PlaceId, PlaceType)>,
    pub(super) departed: bool,
    pub age_group: usize,
    pub next_infection_status: Option<InfectionStatus>,
    pub time_of_status_change: Option<f64>,
    pub infectiousness: f64,
    pub isolation_start_time: Option<f64>,
    pub quarantine_start_time: Option<f64>,
    /// Set for people who comply with social distancing: `true` when they
    /// distance strictly.
    pub distancing_enhanced: Option<bool>,
    pub date_vaccinated: Option<f64>,
    /// Visitors leave the population once this time has passed.
    pub travel_end_time: Option<f64>,
    pub travel_isolation_start_time: Option<f64>,
}

impl Person {
    pub(super) fn new(
        id: PersonId,
        household: HouseholdId,
        microcell: MicrocellId,
        cell: CellId,
        age_group: usize,
        infection_status: InfectionStatus,
    ) -> Person {
        Person {
            id,
            household,
            microcell,
            cell,
            infection_status,
            places: Vec::new(),
            departed: false,
            age_group,
            next_infection_status: None,
            time_of_status_change: None,
            infectiousness: 0.0,
            isolation_start_time: None,
            quarantine_start_time: None,
            distancing_enhanced: None,
            date_vaccinated: None,
            travel_end_time: None,
            travel_isolation_start_time: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> PersonId {
        self.id
    }

    #[must_use]
    pub fn household(&self) -> HouseholdId {
        self.household
    }

    #[must_use]
    pub fn microcell(&self) -> MicrocellId {
        self.microcell
    }

    #[must_use]
    pub fn cell(&self) -> CellId {
        self.cell
    }

    #[must_use]
    pub fn infection_status(&self) -> InfectionStatus {
        self.infection_status
    }

    #[must_use]
    pub fn is_susceptible(&self) -> bool {
        self.infection_status == InfectionStatus::Susceptible
    }

    #[must_use]
    pub fn is_infectious(&self) -> bool {
        self.infection_status.is_infectious()
    }

    /// Places attended, with their type.
    #[must_use]
    pub fn places(&self) -> &[(PlaceId, PlaceType)] {
        &self.places
    }

    #[must_use]
    pub fn attends(&self, place_type: PlaceType) -> bool {
        self.places.iter().any(|(_, t)| *t == place_type)
    }

    /// Visitors that have left are kept as tombstones so ids stay valid.
    #[must_use]
    pub fn has_departed(&self) -> bool {
        self.departed
    }

    #[must_use]
    pub fn is_isolating(&self, time: f64) -> bool {
        self.isolation_start_time.is_some_and(|start| start <= time)
    }

    #[must_use]
    pub fn is_quarantined(&self, time: f64) -> bool {
        self.quarantine_start_time.is_some_and(|start| start <= time)
    }

    #[must_use]
    pub fn is_vaccinated(&self, time: f64) -> bool {
        self.date_vaccinated.is_some_and(|date| date <= time)
    }
}
