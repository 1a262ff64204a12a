//! Dataset loaders for the life expectancy table
//!
//! The canonical dataset is JSON (`data/life_expectancy_2023.json`), compiled
//! into the binary so nothing needs a runtime data path. A CSV variant of the
//! same format is supported for externally maintained datasets; age cells may
//! carry a label suffix (e.g. "40 Jahre") and only the leading integer is used.

use super::{LifeExpectancyEntry, LifeExpectancyTable, TableError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default dataset shipped with the crate (ages 0..=100, reference year 2023)
const EMBEDDED_2023: &str = include_str!("../../data/life_expectancy_2023.json");

/// On-disk JSON dataset shape
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Dataset {
    reference_year: i32,
    entries: Vec<LifeExpectancyEntry>,
}

/// Build the table from the embedded 2023 dataset
pub fn embedded_2023() -> Result<LifeExpectancyTable, TableError> {
    from_json_str(EMBEDDED_2023)
}

/// Build the table from a JSON dataset string
pub fn from_json_str(json: &str) -> Result<LifeExpectancyTable, TableError> {
    let dataset: Dataset = serde_json::from_str(json)?;
    LifeExpectancyTable::new(dataset.entries, dataset.reference_year)
}

/// Build the table from a JSON dataset file
pub fn from_json_path(path: &Path) -> Result<LifeExpectancyTable, TableError> {
    let file = File::open(path)?;
    let table = from_json_reader(file)?;
    log::info!(
        "Loaded {} life expectancy entries from {} (ages {}..={}, reference year {})",
        table.len(),
        path.display(),
        table.min_age(),
        table.max_age(),
        table.reference_year()
    );
    Ok(table)
}

/// Build the table from any JSON dataset reader
pub fn from_json_reader<R: Read>(reader: R) -> Result<LifeExpectancyTable, TableError> {
    let dataset: Dataset = serde_json::from_reader(reader)?;
    LifeExpectancyTable::new(dataset.entries, dataset.reference_year)
}

/// Build the table from a CSV dataset file
///
/// Expected columns: `age,total,male,female` with a header row. The reference
/// year is supplied by the caller since the CSV format does not carry it.
pub fn from_csv_path(path: &Path, reference_year: i32) -> Result<LifeExpectancyTable, TableError> {
    let file = File::open(path)?;
    let table = from_csv_reader(file, reference_year)?;
    log::info!(
        "Loaded {} life expectancy entries from {} (ages {}..={}, reference year {})",
        table.len(),
        path.display(),
        table.min_age(),
        table.max_age(),
        reference_year
    );
    Ok(table)
}

/// Build the table from any CSV dataset reader
pub fn from_csv_reader<R: Read>(
    reader: R,
    reference_year: i32,
) -> Result<LifeExpectancyTable, TableError> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut entries = Vec::new();

    for result in reader.records() {
        let record = result?;
        let age_label = &record[0];
        let age = parse_age_label(age_label)?;
        let total = parse_value(age_label, &record[1])?;
        let male = parse_value(age_label, &record[2])?;
        let female = parse_value(age_label, &record[3])?;

        entries.push(LifeExpectancyEntry {
            age,
            total,
            male,
            female,
        });
    }

    LifeExpectancyTable::new(entries, reference_year)
}

/// Serialize a table back to the JSON dataset format
pub fn export_json(table: &LifeExpectancyTable) -> Result<String, TableError> {
    let dataset = Dataset {
        reference_year: table.reference_year(),
        entries: table.entries().copied().collect(),
    };
    Ok(serde_json::to_string_pretty(&dataset)?)
}

/// Extract the leading integer from an age cell ("40 Jahre" -> 40)
fn parse_age_label(label: &str) -> Result<u32, TableError> {
    let digits: String = label
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    digits
        .parse()
        .map_err(|_| TableError::InvalidAgeLabel(label.to_string()))
}

fn parse_value(age_label: &str, raw: &str) -> Result<f64, TableError> {
    raw.trim().parse().map_err(|_| TableError::InvalidNumber {
        age: age_label.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Gender;
    use approx::assert_relative_eq;

    #[test]
    fn test_embedded_dataset_loads() {
        let table = embedded_2023().unwrap();

        assert_eq!(table.reference_year(), 2023);
        assert_eq!(table.min_age(), 0);
        assert_eq!(table.max_age(), 100);
        assert_eq!(table.len(), 101);
    }

    #[test]
    fn test_embedded_dataset_values_decrease_with_age() {
        let table = embedded_2023().unwrap();

        let at_birth = table.expectancy(0, Gender::Total).unwrap();
        let at_sixty = table.expectancy(60, Gender::Total).unwrap();
        let at_max = table.expectancy(100, Gender::Total).unwrap();

        assert!(at_birth > at_sixty);
        assert!(at_sixty > at_max);
        assert!(at_max > 0.0);
    }

    #[test]
    fn test_json_loader_round_trip() {
        let json = r#"{
            "referenceYear": 2023,
            "entries": [
                {"age": 0, "total": 80.6, "male": 78.2, "female": 83.0},
                {"age": 1, "total": 79.9, "male": 77.5, "female": 82.2}
            ]
        }"#;

        let table = from_json_str(json).unwrap();
        assert_eq!(table.min_age(), 0);
        assert_eq!(table.max_age(), 1);
        assert_relative_eq!(table.expectancy(1, Gender::Female).unwrap(), 82.2);

        let exported = export_json(&table).unwrap();
        let reloaded = from_json_str(&exported).unwrap();
        assert_eq!(reloaded.len(), table.len());
        assert_eq!(reloaded.reference_year(), 2023);
    }

    #[test]
    fn test_json_loader_rejects_empty_entries() {
        let json = r#"{"referenceYear": 2023, "entries": []}"#;
        assert!(matches!(from_json_str(json), Err(TableError::EmptyTable)));
    }

    #[test]
    fn test_json_loader_rejects_malformed_input() {
        assert!(matches!(
            from_json_str("not json"),
            Err(TableError::Json(_))
        ));
    }

    #[test]
    fn test_csv_loader_plain_ages() {
        let csv = "age,total,male,female\n0,80.6,78.2,83.0\n1,79.9,77.5,82.2\n";
        let table = from_csv_reader(csv.as_bytes(), 2023).unwrap();

        assert_eq!(table.len(), 2);
        assert_relative_eq!(table.expectancy(0, Gender::Male).unwrap(), 78.2);
    }

    #[test]
    fn test_csv_loader_labeled_ages() {
        let csv = "age,total,male,female\n40 Jahre,41.9,39.7,43.9\n";
        let table = from_csv_reader(csv.as_bytes(), 2023).unwrap();

        assert_eq!(table.min_age(), 40);
        assert_relative_eq!(table.expectancy(40, Gender::Total).unwrap(), 41.9);
    }

    #[test]
    fn test_csv_loader_rejects_non_numeric_age() {
        let csv = "age,total,male,female\nunknown,41.9,39.7,43.9\n";
        assert!(matches!(
            from_csv_reader(csv.as_bytes(), 2023),
            Err(TableError::InvalidAgeLabel(_))
        ));
    }

    #[test]
    fn test_csv_loader_rejects_non_numeric_value() {
        let csv = "age,total,male,female\n40,n/a,39.7,43.9\n";
        assert!(matches!(
            from_csv_reader(csv.as_bytes(), 2023),
            Err(TableError::InvalidNumber { .. })
        ));
    }
}
