//! Probabilities of moving from one infection status to the next.
use std::collections::BTreeMap;
use std::str::FromStr;

use strum::{EnumCount, IntoEnumIterator};

use crate::error::EpiabmError;
use crate::numeric::{almost_eq, is_probability, PROBABILITY_TOLERANCE};
use crate::parameters::Coefficient;
use crate::InfectionStatus;

const N: usize = InfectionStatus::COUNT;

type Table = [[f64; N]; N];

/// Named coefficients and the cell of the table each one fills.
const COEFFICIENTS: [(&str, InfectionStatus, InfectionStatus); 11] = [
    (
        "prob_exposed_to_asympt",
        InfectionStatus::Exposed,
        InfectionStatus::InfectASympt,
    ),
    (
        "prob_exposed_to_mild",
        InfectionStatus::Exposed,
        InfectionStatus::InfectMild,
    ),
    (
        "prob_exposed_to_gp",
        InfectionStatus::Exposed,
        InfectionStatus::InfectGP,
    ),
    (
        "prob_gp_to_recov",
        InfectionStatus::InfectGP,
        InfectionStatus::Recovered,
    ),
    (
        "prob_gp_to_hosp",
        InfectionStatus::InfectGP,
        InfectionStatus::InfectHosp,
    ),
    (
        "prob_gp_to_death",
        InfectionStatus::InfectGP,
        InfectionStatus::Dead,
    ),
    (
        "prob_hosp_to_recov",
        InfectionStatus::InfectHosp,
        InfectionStatus::Recovered,
    ),
    (
        "prob_hosp_to_icu",
        InfectionStatus::InfectHosp,
        InfectionStatus::InfectICU,
    ),
    (
        "prob_hosp_to_death",
        InfectionStatus::InfectHosp,
        InfectionStatus::Dead,
    ),
    (
        "prob_icu_to_icurecov",
        InfectionStatus::InfectICU,
        InfectionStatus::InfectICURecov,
    ),
    (
        "prob_icu_to_death",
        InfectionStatus::InfectICU,
        InfectionStatus::Dead,
    ),
];

/// Transitions that always happen.
const FIXED: [(InfectionStatus, InfectionStatus); 4] = [
    (InfectionStatus::Susceptible, InfectionStatus::Exposed),
    (InfectionStatus::InfectASympt, InfectionStatus::Recovered),
    (InfectionStatus::InfectMild, InfectionStatus::Recovered),
    (InfectionStatus::InfectICURecov, InfectionStatus::Recovered),
];

/// Dense table of transition probabilities indexed by status ordinal, with
/// one extra table per age group when the coefficients are age-stratified.
#[derive(Debug, Clone, PartialEq)]
pub struct StateTransitionMatrix {
    table: Table,
    by_age: Vec<Table>,
}

fn empty_table() -> Table {
    let mut table = [[0.0; N]; N];
    for (from, to) in FIXED {
        table[from.ordinal()][to.ordinal()] = 1.0;
    }
    table
}

impl StateTransitionMatrix {
    /// Builds the matrix from named coefficients. Unknown names are rejected
    /// and missing ones count as zero. With `use_ages`, per-age lists fill one
    /// table per age group; otherwise they are reduced to their mean.
    ///
    /// # Errors
    ///
    /// Returns `EpiabmError::ConfigurationError` if a name is unknown, a value
    /// is not a probability, per-age lists differ in length, or a non-terminal
    /// row does not sum to one.
    pub fn new(
        coefficients: &BTreeMap<String, Coefficient>,
        use_ages: bool,
    ) -> Result<StateTransitionMatrix, EpiabmError> {
        let mut placements = Vec::with_capacity(coefficients.len());
        for (name, coefficient) in coefficients {
            let (_, from, to) = COEFFICIENTS
                .iter()
                .find(|(known, _, _)| known == name)
                .ok_or_else(|| {
                    EpiabmError::ConfigurationError(format!(
                        "unknown transition coefficient {name}"
                    ))
                })?;
            placements.push((*from, *to, coefficient));
        }

        let age_groups = if use_ages {
            let mut lengths = placements.iter().filter_map(|(_, _, c)| match c {
                Coefficient::PerAge(values) => Some(values.len()),
                Coefficient::Scalar(_) => None,
            });
            match lengths.next() {
                None => 0,
                Some(first) => {
                    if lengths.any(|len| len != first) {
                        return Err(EpiabmError::ConfigurationError(
                            "per-age transition coefficients differ in length".to_string(),
                        ));
                    }
                    first
                }
            }
        } else {
            0
        };

        let mut table = empty_table();
        let mut by_age = vec![empty_table(); age_groups];
        for (from, to, coefficient) in &placements {
            table[from.ordinal()][to.ordinal()] = coefficient.mean();
            for (age_group, age_table) in by_age.iter_mut().enumerate() {
                // Lengths were checked above, so every list covers the age group
                age_table[from.ordinal()][to.ordinal()] =
                    coefficient.for_age(age_group).unwrap_or_default();
            }
        }

        let matrix = StateTransitionMatrix { table, by_age };
        matrix.validate()?;
        Ok(matrix)
    }

    fn tables(&self) -> impl Iterator<Item = &Table> {
        std::iter::once(&self.table).chain(self.by_age.iter())
    }

    fn validate(&self) -> Result<(), EpiabmError> {
        for table in self.tables() {
            for status in InfectionStatus::iter() {
                let row = &table[status.ordinal()];
                if let Some(value) = row.iter().find(|value| !is_probability(**value)) {
                    return Err(EpiabmError::ConfigurationError(format!(
                        "transition probability {value} from {status} is not in [0, 1]"
                    )));
                }
                let total: f64 = row.iter().sum();
                let expected = if status.is_terminal() { 0.0 } else { 1.0 };
                if !almost_eq(total, expected, PROBABILITY_TOLERANCE) {
                    return Err(EpiabmError::ConfigurationError(format!(
                        "transition probabilities from {status} sum to {total}, expected {expected}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Number of age-specific tables; zero when not age-stratified.
    #[must_use]
    pub fn age_groups(&self) -> usize {
        self.by_age.len()
    }

    #[must_use]
    pub fn probability(&self, from: InfectionStatus, to: InfectionStatus) -> f64 {
        self.table[from.ordinal()][to.ordinal()]
    }

    /// Sets one entry in every table. Rows are not renormalised, so callers
    /// editing a row are responsible for keeping it summing to one.
    ///
    /// # Errors
    ///
    /// Returns `EpiabmError::ConfigurationError` if `value` is not in `[0, 1]`.
    pub fn update_probability(
        &mut self,
        from: InfectionStatus,
        to: InfectionStatus,
        value: f64,
    ) -> Result<(), EpiabmError> {
        if !is_probability(value) {
            return Err(EpiabmError::ConfigurationError(format!(
                "transition probability {value} from {from} to {to} is not in [0, 1]"
            )));
        }
        self.table[from.ordinal()][to.ordinal()] = value;
        for table in &mut self.by_age {
            table[from.ordinal()][to.ordinal()] = value;
        }
        Ok(())
    }

    /// Like [`update_probability`](Self::update_probability) with the statuses
    /// given by name.
    ///
    /// # Errors
    ///
    /// Returns `EpiabmError::ConfigurationError` if either name is not an
    /// infection status or `value` is not in `[0, 1]`.
    pub fn update_probability_by_name(
        &mut self,
        from: &str,
        to: &str,
        value: f64,
    ) -> Result<(), EpiabmError> {
        let parse = |name: &str| {
            InfectionStatus::from_str(name).map_err(|_| {
                EpiabmError::ConfigurationError(format!("unknown infection status {name}"))
            })
        };
        self.update_probability(parse(from)?, parse(to)?, value)
    }

    /// The outgoing weights of `status` for a person in `age_group`.
    ///
    /// # Errors
    ///
    /// Returns `EpiabmError::InvariantViolation` if the matrix is age-stratified
    /// and has no table for `age_group`.
    pub fn row(&self, status: InfectionStatus, age_group: usize) -> Result<&[f64], EpiabmError> {
        let table = if self.by_age.is_empty() {
            &self.table
        } else {
            self.by_age.get(age_group).ok_or_else(|| {
                EpiabmError::InvariantViolation(format!(
                    "no transition probabilities for age group {age_group}"
                ))
            })?
        };
        Ok(&table[status.ordinal()])
    }
}
