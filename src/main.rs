//! Life Expectancy System CLI
//!
//! Estimates elapsed and remaining lifespan years for a birthdate and gender,
//! then prints the summary table and the year-by-year life grid.

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use life_expectancy_system::table::loader;
use life_expectancy_system::{compute_life_expectancy, grid, LifeExpectancyTable, LifespanGrid};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "life_expectancy_system",
    version,
    about = "Estimate elapsed and remaining lifespan years from a static life expectancy table"
)]
struct Cli {
    /// Birthdate in YYYY-MM-DD format
    #[arg(long)]
    birthdate: String,

    /// Gender code: m, f, or all (long forms male, female, total also accepted)
    #[arg(long, default_value = "all")]
    gender: String,

    /// Reference date override in YYYY-MM-DD format (defaults to today, UTC)
    #[arg(long)]
    reference_date: Option<String>,

    /// Dataset file (.json or .csv) to use instead of the embedded 2023 table
    #[arg(long)]
    data: Option<PathBuf>,

    /// Reference year to attach to CSV datasets, which do not carry one
    #[arg(long, default_value_t = 2023)]
    csv_reference_year: i32,

    /// Cells per row in the printed life grid
    #[arg(long, default_value_t = 10)]
    row_width: u32,
}

fn load_table(cli: &Cli) -> Result<LifeExpectancyTable> {
    let Some(path) = &cli.data else {
        return loader::embedded_2023().context("Embedded dataset is invalid");
    };

    let table = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => loader::from_json_path(path),
        Some("csv") => loader::from_csv_path(path, cli.csv_reference_year),
        _ => bail!("Unsupported dataset format: {}", path.display()),
    };
    table.with_context(|| format!("Failed to load dataset from {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let reference_date = match &cli.reference_date {
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .with_context(|| format!("Invalid reference date: {text}"))?,
        None => Utc::now().date_naive(),
    };

    let table = load_table(&cli)?;
    let result = compute_life_expectancy(&table, &cli.birthdate, &cli.gender, reference_date)?;

    println!("{}", grid::render_summary(&result));
    println!();

    let life_grid = LifespanGrid::from_result(&result);
    println!(
        "Life grid ({} elapsed, {} remaining, {} total):",
        life_grid.elapsed_years(),
        life_grid.total_years() - life_grid.elapsed_years(),
        life_grid.total_years()
    );
    print!("{}", life_grid.render(cli.row_width));

    Ok(())
}
