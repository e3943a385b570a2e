use std::fmt::{self, Debug, Display};
use std::io;

/// Provides `EpiabmError` and maps other errors to
/// convert to an `EpiabmError`
///
/// Every failure is fatal for a run: sweeps propagate errors to the
/// scheduler, which aborts the simulation.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum EpiabmError {
    /// Malformed or missing coefficients, row mismatches in the transition
    /// matrix, unknown status names, invalid probabilities.
    ConfigurationError(String),
    /// Internal state that should be impossible, e.g. a negative sampled
    /// transition time or a terminal status scheduled for a change.
    InvariantViolation(String),
    /// Bad arguments supplied by the caller of a sweep or the scheduler.
    InputValidationError(String),
    IoError(io::Error),
    JsonError(serde_json::Error),
    CsvError(csv::Error),
}

impl From<io::Error> for EpiabmError {
    fn from(error: io::Error) -> Self {
        EpiabmError::IoError(error)
    }
}

impl From<serde_json::Error> for EpiabmError {
    fn from(error: serde_json::Error) -> Self {
        EpiabmError::JsonError(error)
    }
}

impl From<csv::Error> for EpiabmError {
    fn from(error: csv::Error) -> Self {
        EpiabmError::CsvError(error)
    }
}

impl std::error::Error for EpiabmError {}

impl Display for EpiabmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EpiabmError::ConfigurationError(msg) => write!(f, "Configuration error: {msg}"),
            EpiabmError::InvariantViolation(msg) => write!(f, "Invariant violation: {msg}"),
            EpiabmError::InputValidationError(msg) => write!(f, "Invalid input: {msg}"),
            _ => write!(f, "Error: {self:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_category() {
        let error = EpiabmError::ConfigurationError("row 3 sums to 0.5".to_string());
        assert_eq!(error.to_string(), "Configuration error: row 3 sums to 0.5");

        let error = EpiabmError::InputValidationError("too many".to_string());
        assert!(error.to_string().starts_with("Invalid input"));
    }

    #[test]
    fn converts_io_errors() {
        let error: EpiabmError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(error, EpiabmError::IoError(_)));
    }
}
