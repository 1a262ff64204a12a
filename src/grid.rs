//! Year-by-year lifespan grid built from an estimation result
//!
//! One cell per year of estimated total lifespan: the first
//! `age_in_reference_year` cells are elapsed, the remaining
//! `remaining_years_rounded` cells lie ahead. Also renders the bordered
//! summary table shown by the CLI.

use crate::estimator::LifeExpectancyResult;
use serde::{Deserialize, Serialize};

/// Whether a year of the grid has already been lived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    Elapsed,
    Remaining,
}

/// One year cell of the lifespan grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCell {
    /// 1-based year of life
    pub year_number: u32,
    pub state: CellState,
}

/// Unit-cell view of an estimated lifespan
#[derive(Debug, Clone, PartialEq)]
pub struct LifespanGrid {
    elapsed_years: u32,
    total_years: u32,
}

impl LifespanGrid {
    pub fn from_result(result: &LifeExpectancyResult) -> Self {
        Self {
            elapsed_years: result.age_in_reference_year,
            total_years: result.age_in_reference_year + result.remaining_years_rounded,
        }
    }

    /// Number of cells marked elapsed
    pub fn elapsed_years(&self) -> u32 {
        self.elapsed_years
    }

    /// Total cell count (elapsed + remaining)
    pub fn total_years(&self) -> u32 {
        self.total_years
    }

    /// Cells in year order
    pub fn cells(&self) -> impl Iterator<Item = YearCell> + '_ {
        let elapsed = self.elapsed_years;
        (0..self.total_years).map(move |index| YearCell {
            year_number: index + 1,
            state: if index < elapsed {
                CellState::Elapsed
            } else {
                CellState::Remaining
            },
        })
    }

    /// Render the grid as text, `#` for elapsed years and `.` for remaining,
    /// wrapped at `per_row` cells
    pub fn render(&self, per_row: u32) -> String {
        let per_row = per_row.max(1);
        let mut out = String::new();

        for cell in self.cells() {
            out.push(match cell.state {
                CellState::Elapsed => '#',
                CellState::Remaining => '.',
            });
            if cell.year_number % per_row == 0 {
                out.push('\n');
            }
        }
        if !out.ends_with('\n') && !out.is_empty() {
            out.push('\n');
        }
        out
    }
}

/// Render the bordered label/value summary table for a result
pub fn render_summary(result: &LifeExpectancyResult) -> String {
    let rows: Vec<(&str, String)> = vec![
        ("Gender", result.gender.to_string()),
        ("Reference year", result.reference_year.to_string()),
        (
            "Age in reference year",
            result.age_in_reference_year.to_string(),
        ),
        (
            "Residual life expectancy (years)",
            format!("{:.1}", result.remaining_years),
        ),
        (
            "Residual life expectancy (rounded)",
            result.remaining_years_rounded.to_string(),
        ),
    ];

    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);
    let border = format!(
        "+{}+{}+",
        "-".repeat(label_width + 2),
        "-".repeat(value_width + 2)
    );

    let mut lines = vec![border.clone()];
    for (label, value) in &rows {
        lines.push(format!(
            "| {:<label_width$} | {:>value_width$} |",
            label, value
        ));
        lines.push(border.clone());
    }
    lines.join("\n")
}
