//! Life Expectancy System - Residual lifespan estimation from a static actuarial table
//!
//! This library provides:
//! - A read-only life expectancy table indexed by age and gender
//! - JSON and CSV dataset loaders plus an embedded 2023 dataset
//! - A pure estimator deriving elapsed and remaining years from a birthdate
//! - A year-by-year lifespan grid for presentation

pub mod estimator;
pub mod grid;
pub mod table;

// Re-export commonly used types
pub use estimator::{compute_life_expectancy, estimate, EstimateError, LifeExpectancyResult};
pub use grid::{CellState, LifespanGrid};
pub use table::{Gender, LifeExpectancyEntry, LifeExpectancyTable, TableError};
