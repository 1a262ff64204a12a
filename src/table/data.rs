//! Core data records for the life expectancy table

use serde::{Deserialize, Serialize};

/// One row of the life expectancy dataset: remaining years at a given age,
/// split by gender plus a combined total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifeExpectancyEntry {
    pub age: u32,
    pub total: f64,
    pub male: f64,
    pub female: f64,
}

impl LifeExpectancyEntry {
    /// Select the expectancy value for the given gender
    pub fn expectancy_for(&self, gender: Gender) -> f64 {
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
            Gender::Total => self.total,
        }
    }
}

/// Normalized gender selector for table lookups
///
/// `Total` is the combined column of the dataset, selected by the
/// `all`/`total` input codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Total,
}

impl Gender {
    /// Parse a user-supplied gender code
    ///
    /// Accepts `m`/`male`, `f`/`female`, and `all`/`total`, case-insensitive
    /// with surrounding whitespace ignored. Anything else is rejected.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Some(Gender::Male),
            "f" | "female" => Some(Gender::Female),
            "all" | "total" => Some(Gender::Total),
            _ => None,
        }
    }

    /// Canonical lowercase name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Total => "total",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
