//! The disease states a person moves through.
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString, IntoEnumIterator};

/// Infection status of a person. The declaration order is the ordinal used to
/// index transition tables and compartment counters.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
)]
pub enum InfectionStatus {
    Susceptible,
    Exposed,
    InfectASympt,
    InfectMild,
    InfectGP,
    InfectHosp,
    InfectICU,
    InfectICURecov,
    Recovered,
    Dead,
}

impl InfectionStatus {
    /// Position of the status in the enumeration, starting at zero.
    #[must_use]
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// # Panics
    ///
    /// Panics if `ordinal` is not smaller than `InfectionStatus::COUNT`.
    #[must_use]
    pub fn from_ordinal(ordinal: usize) -> InfectionStatus {
        InfectionStatus::iter()
            .nth(ordinal)
            .unwrap_or_else(|| panic!("no infection status with ordinal {ordinal}"))
    }

    /// Statuses in which a person can infect others.
    #[must_use]
    pub fn is_infectious(self) -> bool {
        matches!(
            self,
            InfectionStatus::InfectASympt
                | InfectionStatus::InfectMild
                | InfectionStatus::InfectGP
                | InfectionStatus::InfectHosp
                | InfectionStatus::InfectICU
                | InfectionStatus::InfectICURecov
        )
    }

    /// Statuses with no outgoing transition.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, InfectionStatus::Recovered | InfectionStatus::Dead)
    }

    /// Statuses that show symptoms and can trigger case isolation.
    #[must_use]
    pub fn is_symptomatic(self) -> bool {
        matches!(self, InfectionStatus::InfectMild | InfectionStatus::InfectGP)
    }
}
