//! Static life expectancy table indexed by age and gender
//!
//! The table is read-only configuration: built once at process start from the
//! dataset, then shared by every computation. Lookups clamp into the covered
//! age range instead of extrapolating.

mod data;
pub mod loader;

pub use data::{Gender, LifeExpectancyEntry};

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use thiserror::Error;

/// Fatal dataset/configuration errors raised while building the table
///
/// These abort process initialization; they never surface per-request.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("At least one entry is required to build the life expectancy table.")]
    EmptyTable,

    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse CSV dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unable to parse age label: {0}")]
    InvalidAgeLabel(String),

    #[error("Unexpected numeric value in dataset row for age {age}: {value}")]
    InvalidNumber { age: String, value: String },
}

/// Age-indexed life expectancy table anchored to a reference year
#[derive(Debug, Clone)]
pub struct LifeExpectancyTable {
    /// Entries keyed by age. Duplicate ages in the source dataset resolve
    /// last-write-wins; see `new`.
    entries: BTreeMap<u32, LifeExpectancyEntry>,

    /// Calendar year the age column is anchored to
    reference_year: i32,

    /// Lowest age covered by the dataset
    min_age: u32,

    /// Highest age covered by the dataset
    max_age: u32,
}

impl LifeExpectancyTable {
    /// Build the age→entry mapping from an ordered sequence of entries
    ///
    /// When the sequence contains the same age more than once, the last entry
    /// wins. Fails if the sequence is empty, since min/max bounds would be
    /// undefined.
    pub fn new(
        entries: impl IntoIterator<Item = LifeExpectancyEntry>,
        reference_year: i32,
    ) -> Result<Self, TableError> {
        let entries: BTreeMap<u32, LifeExpectancyEntry> =
            entries.into_iter().map(|e| (e.age, e)).collect();

        let min_age = *entries.keys().next().ok_or(TableError::EmptyTable)?;
        let max_age = *entries.keys().next_back().ok_or(TableError::EmptyTable)?;

        Ok(Self {
            entries,
            reference_year,
            min_age,
            max_age,
        })
    }

    /// Calendar year the table's ages are relative to
    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    /// Lowest covered age
    pub fn min_age(&self) -> u32 {
        self.min_age
    }

    /// Highest covered age
    pub fn max_age(&self) -> u32 {
        self.max_age
    }

    /// Number of distinct ages in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending age order
    pub fn entries(&self) -> impl Iterator<Item = &LifeExpectancyEntry> {
        self.entries.values()
    }

    /// Remaining life expectancy for an age and gender
    ///
    /// The age is clamped into `[min_age, max_age]` before the lookup; the
    /// table does not extrapolate beyond its coverage. Returns `None` only
    /// when the clamped age has no entry, which indicates a dataset with gaps
    /// rather than invalid caller input.
    pub fn expectancy(&self, age: u32, gender: Gender) -> Option<f64> {
        let target_age = age.clamp(self.min_age, self.max_age);
        self.entries
            .get(&target_age)
            .map(|entry| entry.expectancy_for(gender))
    }

    /// Completed-birthday age projected onto the table's reference year
    ///
    /// Subtracts the birth year from the fixed `reference_year`, minus one if
    /// the birthday (month, day) has not yet occurred by `reference_date`'s
    /// (month, day). Note the cutoff uses the reference date's month/day but
    /// the table's year, so the result answers "how old in the reference
    /// year", not "how old today". Clamped to a minimum of 0.
    pub fn age_as_of(&self, birthdate: NaiveDate, reference_date: NaiveDate) -> u32 {
        let mut years = self.reference_year - birthdate.year();
        if (birthdate.month(), birthdate.day()) > (reference_date.month(), reference_date.day()) {
            years -= 1;
        }
        years.max(0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(age: u32, total: f64, male: f64, female: f64) -> LifeExpectancyEntry {
        LifeExpectancyEntry {
            age,
            total,
            male,
            female,
        }
    }

    fn three_row_table() -> LifeExpectancyTable {
        LifeExpectancyTable::new(
            vec![
                entry(40, 41.9, 39.7, 43.9),
                entry(41, 41.0, 38.8, 42.9),
                entry(42, 40.0, 37.9, 42.0),
            ],
            2023,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let result = LifeExpectancyTable::new(Vec::new(), 2023);
        assert!(matches!(result, Err(TableError::EmptyTable)));
    }

    #[test]
    fn test_bounds_derived_from_entries() {
        let table = three_row_table();
        assert_eq!(table.min_age(), 40);
        assert_eq!(table.max_age(), 42);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_lookup_clamps_below_min_age() {
        let table = three_row_table();
        // Ages below coverage use the min-age entry
        assert_eq!(table.expectancy(0, Gender::Male), Some(39.7));
        assert_eq!(table.expectancy(39, Gender::Female), Some(43.9));
    }

    #[test]
    fn test_lookup_clamps_above_max_age() {
        let table = three_row_table();
        assert_eq!(table.expectancy(43, Gender::Total), Some(40.0));
        assert_eq!(table.expectancy(120, Gender::Male), Some(37.9));
    }

    #[test]
    fn test_lookup_in_range() {
        let table = three_row_table();
        assert_eq!(table.expectancy(41, Gender::Male), Some(38.8));
    }

    #[test]
    fn test_duplicate_age_last_entry_wins() {
        let table = LifeExpectancyTable::new(
            vec![entry(50, 1.0, 1.0, 1.0), entry(50, 32.6, 30.5, 34.4)],
            2023,
        )
        .unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.expectancy(50, Gender::Total), Some(32.6));
    }

    #[test]
    fn test_age_before_birthday_cutoff() {
        let table = three_row_table();
        // Birthday (06-15) has not occurred by the reference month/day (01-01)
        let birthdate = NaiveDate::from_ymd_opt(1980, 6, 15).unwrap();
        let reference = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(table.age_as_of(birthdate, reference), 42);
    }

    #[test]
    fn test_age_after_birthday_cutoff() {
        let table = three_row_table();
        let birthdate = NaiveDate::from_ymd_opt(1980, 6, 15).unwrap();
        let reference = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        assert_eq!(table.age_as_of(birthdate, reference), 43);
    }

    #[test]
    fn test_age_on_birthday_counts_as_completed() {
        let table = three_row_table();
        let birthdate = NaiveDate::from_ymd_opt(1980, 6, 15).unwrap();
        let reference = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(table.age_as_of(birthdate, reference), 43);
    }

    #[test]
    fn test_age_clamped_to_zero() {
        let table = three_row_table();
        // Born after the reference year
        let birthdate = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let reference = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(table.age_as_of(birthdate, reference), 0);
    }
}
