use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString};

/// Kind of place a person can attend.
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
pub enum PlaceType {
    PrimarySchool,
    SecondarySchool,
    SixthForm,
    Workplace,
    CareHome,
    /// Re-populated with a fresh random group every time step.
    OutdoorSpace,
}

impl PlaceType {
    #[must_use]
    pub fn is_school(self) -> bool {
        matches!(
            self,
            PlaceType::PrimarySchool | PlaceType::SecondarySchool | PlaceType::SixthForm
        )
    }
}
