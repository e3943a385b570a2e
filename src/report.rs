//! Per-step compartment counts and where they are written.
use std::ffi::OsStr;
use std::fs::{create_dir_all, File};
use std::path::Path;

use csv::Writer;
use strum::{EnumCount, IntoEnumIterator};

use crate::error::EpiabmError;
use crate::population::CompartmentCounter;
use crate::InfectionStatus;

/// Number of people in each infection status at `time`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompartmentRecord {
    pub time: f64,
    pub counts: [usize; InfectionStatus::COUNT],
}

impl CompartmentRecord {
    #[must_use]
    pub fn new(time: f64, counter: &CompartmentCounter) -> CompartmentRecord {
        CompartmentRecord {
            time,
            counts: *counter.counts(),
        }
    }

    #[must_use]
    pub fn count(&self, status: InfectionStatus) -> usize {
        self.counts[status.ordinal()]
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Receives one record per completed time step, starting with the initial
/// state.
pub trait OutputSink {
    #[allow(clippy::missing_errors_doc)]
    fn write(&mut self, record: &CompartmentRecord) -> Result<(), EpiabmError>;
}

/// Keeps records in memory.
impl OutputSink for Vec<CompartmentRecord> {
    fn write(&mut self, record: &CompartmentRecord) -> Result<(), EpiabmError> {
        self.push(record.clone());
        Ok(())
    }
}

// Checks that the path is valid. Creates the file and all parent directories if
// they do not exist.
fn generate_validate_filepath(path: &Path) -> Result<File, EpiabmError> {
    match path.extension().and_then(OsStr::to_str) {
        Some("csv") => {
            if let Some(parent) = path.parent() {
                create_dir_all(parent)?;
            }
            Ok(File::create(path)?)
        }
        _ => Err(EpiabmError::InputValidationError(format!(
            "output files must be CSVs, got {}",
            path.display()
        ))),
    }
}

/// Writes `time,Susceptible,Exposed,...` rows to a CSV file, flushing after
/// every row.
pub struct CsvOutputSink {
    writer: Writer<File>,
}

impl CsvOutputSink {
    /// Creates the file, and any missing parent directory, and writes the
    /// header row.
    ///
    /// # Errors
    ///
    /// Returns `EpiabmError::InputValidationError` if `path` does not end in
    /// `.csv`, or an I/O or CSV error if the file cannot be written.
    pub fn new(path: &Path) -> Result<CsvOutputSink, EpiabmError> {
        let file = generate_validate_filepath(path)?;
        let mut writer = Writer::from_writer(file);
        let mut header = vec!["time".to_string()];
        header.extend(InfectionStatus::iter().map(|status| status.to_string()));
        writer.write_record(&header)?;
        writer.flush()?;
        Ok(CsvOutputSink { writer })
    }
}

impl OutputSink for CsvOutputSink {
    fn write(&mut self, record: &CompartmentRecord) -> Result<(), EpiabmError> {
        let mut row = vec![record.time.to_string()];
        row.extend(record.counts.iter().map(ToString::to_string));
        self.writer.write_record(&row)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(time: f64, susceptible: usize, exposed: usize) -> CompartmentRecord {
        let mut counts = [0; InfectionStatus::COUNT];
        counts[InfectionStatus::Susceptible.ordinal()] = susceptible;
        counts[InfectionStatus::Exposed.ordinal()] = exposed;
        CompartmentRecord { time, counts }
    }

    #[test]
    fn records_in_memory() {
        let mut sink: Vec<CompartmentRecord> = Vec::new();
        sink.write(&record(0.0, 2, 0)).unwrap();
        sink.write(&record(1.0, 1, 1)).unwrap();
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[1].count(InfectionStatus::Exposed), 1);
        assert_eq!(sink[1].total(), 2);
    }

    #[test]
    fn writes_header_and_rows() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("output.csv");
        let mut sink = CsvOutputSink::new(&path).unwrap();
        sink.write(&record(0.0, 2, 0)).unwrap();
        sink.write(&record(1.0, 1, 1)).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), InfectionStatus::COUNT + 1);
        assert_eq!(&headers[0], "time");
        assert_eq!(&headers[1], "Susceptible");
        assert_eq!(&headers[10], "Dead");

        let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][0], "1");
        assert_eq!(&rows[1][1], "1");
        assert_eq!(&rows[1][2], "1");
        assert_eq!(&rows[1][3], "0");
    }

    #[test]
    fn only_csvs_allowed() {
        let temp_dir = tempdir().unwrap();
        let result = CsvOutputSink::new(&temp_dir.path().join("output.tsv"));
        assert!(matches!(
            result,
            Err(EpiabmError::InputValidationError(_))
        ));
    }
}
