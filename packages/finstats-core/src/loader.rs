//! CSV input of dated prices or returns.
//!
//! Expected layout is a header row followed by `date,value` records with ISO
//! dates (`2024-01-31`). Extra columns are ignored.

use crate::series::Observation;
use crate::{Result, ReturnSeries};
use chrono::NaiveDate;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// Whether a file holds price levels or periodic returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueKind {
    #[default]
    Prices,
    Returns,
}

#[derive(Debug, Deserialize)]
struct Record {
    date: String,
    value: f64,
}

/// Read observations from any CSV source.
pub fn read_observations<R: Read>(reader: R) -> Result<Vec<Observation>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut observations = Vec::new();
    for result in reader.deserialize() {
        let record: Record = result?;
        let date = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d")?;
        observations.push(Observation::new(date, record.value));
    }

    tracing::debug!(rows = observations.len(), "read observations");
    Ok(observations)
}

/// Read a CSV source into a return series.
pub fn read_series<R: Read>(reader: R, kind: ValueKind) -> Result<ReturnSeries> {
    let observations = read_observations(reader)?;
    match kind {
        ValueKind::Prices => ReturnSeries::from_prices(observations),
        ValueKind::Returns => ReturnSeries::from_returns(observations),
    }
}

/// Load a CSV file into a return series.
pub fn load_series(path: &Path, kind: ValueKind) -> Result<ReturnSeries> {
    let file = std::fs::File::open(path)?;
    read_series(file, kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use approx::assert_relative_eq;
    use std::io::Write;

    #[test]
    fn test_read_prices() {
        let csv = "date,value\n2024-01-02,100\n2024-01-03, 102\n2024-01-04,99.96\n";
        let series = read_series(csv.as_bytes(), ValueKind::Prices).unwrap();

        assert_eq!(series.len(), 2);
        assert_relative_eq!(series.values()[0], 0.02, epsilon = 1e-12);
        assert_relative_eq!(series.values()[1], -0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_read_returns() {
        let csv = "date,value,note\n2024-01-31,0.01,jan\n2024-02-29,-0.02,feb\n";
        let series = read_series(csv.as_bytes(), ValueKind::Returns).unwrap();
        assert_eq!(series.values(), &[0.01, -0.02]);
    }

    #[test]
    fn test_bad_date() {
        let csv = "date,value\n31/01/2024,0.01\n";
        assert!(matches!(
            read_series(csv.as_bytes(), ValueKind::Returns),
            Err(Error::Date(_))
        ));
    }

    #[test]
    fn test_bad_value() {
        let csv = "date,value\n2024-01-31,abc\n";
        assert!(matches!(
            read_series(csv.as_bytes(), ValueKind::Returns),
            Err(Error::Csv(_))
        ));
    }

    #[test]
    fn test_unsorted_rows_rejected() {
        let csv = "date,value\n2024-02-01,100\n2024-01-01,101\n";
        assert!(matches!(
            read_series(csv.as_bytes(), ValueKind::Prices),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "date,value").unwrap();
        writeln!(file, "2024-03-01,50").unwrap();
        writeln!(file, "2024-03-04,55").unwrap();

        let series = load_series(file.path(), ValueKind::Prices).unwrap();
        assert_eq!(series.len(), 1);
        assert_relative_eq!(series.values()[0], 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_file() {
        let result = load_series(Path::new("/nonexistent/prices.csv"), ValueKind::Prices);
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
