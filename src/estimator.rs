//! Residual life expectancy estimation
//!
//! The single computation of the system: validate and normalize a birthdate
//! and gender, project the age onto the table's reference year, look up the
//! expectancy value, and derive the rounded remainder. Pure function of its
//! inputs and the immutable table; all date math is at UTC day granularity.

use crate::table::{Gender, LifeExpectancyTable};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User-input failures surfaced by the estimator
///
/// All variants are local, synchronous, and non-retryable. `NoDataForAge`
/// should be unreachable with a well-formed table (lookups clamp into the
/// covered range); if it occurs the dataset itself has gaps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimateError {
    #[error("Birthdate must be in YYYY-MM-DD format.")]
    InvalidBirthdateFormat,

    #[error("Birthdate cannot be in the future.")]
    FutureBirthdate,

    #[error("Gender must be one of 'm', 'f', or 'all'.")]
    InvalidGender,

    #[error("No life expectancy data available for age {0}.")]
    NoDataForAge(u32),
}

/// Outcome of one estimation, serialized camelCase for the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeExpectancyResult {
    pub gender: Gender,
    pub reference_year: i32,
    pub age_in_reference_year: u32,
    pub remaining_years: f64,
    pub remaining_years_rounded: u32,
}

/// Compute residual life expectancy for a birthdate and gender
///
/// `reference_date` is the "now" of the computation, normally today's UTC
/// calendar day; it is an explicit parameter so callers and tests can pin it.
///
/// The returned `age_in_reference_year` is the unclamped projected age; only
/// the table lookup clamps into the covered range.
pub fn compute_life_expectancy(
    table: &LifeExpectancyTable,
    birthdate_text: &str,
    gender_text: &str,
    reference_date: NaiveDate,
) -> Result<LifeExpectancyResult, EstimateError> {
    let birthdate = parse_birthdate(birthdate_text)?;

    if birthdate > reference_date {
        return Err(EstimateError::FutureBirthdate);
    }

    let gender = Gender::parse(gender_text).ok_or(EstimateError::InvalidGender)?;

    let age_in_reference_year = table.age_as_of(birthdate, reference_date);
    let remaining_years = table
        .expectancy(age_in_reference_year, gender)
        .ok_or(EstimateError::NoDataForAge(age_in_reference_year))?;
    let remaining_years_rounded = remaining_years.ceil() as u32;

    Ok(LifeExpectancyResult {
        gender,
        reference_year: table.reference_year(),
        age_in_reference_year,
        remaining_years,
        remaining_years_rounded,
    })
}

/// Compute against the current UTC calendar day
pub fn estimate(
    table: &LifeExpectancyTable,
    birthdate_text: &str,
    gender_text: &str,
) -> Result<LifeExpectancyResult, EstimateError> {
    compute_life_expectancy(table, birthdate_text, gender_text, Utc::now().date_naive())
}

/// Parse a strict `YYYY-MM-DD` birthdate
///
/// The shape check is exact (4-digit year, 2-digit month, 2-digit day, `-`
/// separators, nothing else); the components must then form a real calendar
/// date, which rejects overflow dates like `2023-02-30`.
pub fn parse_birthdate(text: &str) -> Result<NaiveDate, EstimateError> {
    let text = text.trim();
    let bytes = text.as_bytes();

    let shape_ok = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shape_ok {
        return Err(EstimateError::InvalidBirthdateFormat);
    }

    // Digits are verified above, so these cannot fail
    let year: i32 = text[0..4].parse().unwrap_or(0);
    let month: u32 = text[5..7].parse().unwrap_or(0);
    let day: u32 = text[8..10].parse().unwrap_or(0);

    NaiveDate::from_ymd_opt(year, month, day).ok_or(EstimateError::InvalidBirthdateFormat)
}
