use clap::Args;
use colored::Colorize;
use serde_json::{json, Value};

use loan_dca_core::scenarios::{self, ScenarioGrid};

use crate::input;

/// Arguments for a scenario-grid batch run
#[derive(Args)]
pub struct GridArgs {
    /// Path to the price-history CSV (timestamp, high, low columns)
    #[arg(long)]
    pub prices: String,

    /// Path to JSON/YAML grid file; defaults to the standard auto-loan sweep
    #[arg(long)]
    pub input: Option<String>,

    /// Override the grid's payment day (1-28)
    #[arg(long)]
    pub payment_day: Option<u32>,

    /// End of the purchase window (YYYY-MM-DD or "YYYY-MM-DD HH:MM:SS");
    /// defaults to the last sample in the price history
    #[arg(long)]
    pub window_end: Option<String>,
}

pub fn run_grid(args: GridArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let series = input::prices::load_csv(&args.prices)?;
    let window_end = super::resolve_window_end(&series, &args.window_end)?;

    let mut grid: ScenarioGrid = match args.input {
        Some(ref path) => input::file::read_input(path)?,
        None => ScenarioGrid::default(),
    };
    if let Some(day) = args.payment_day {
        grid.payment_day = day;
    }

    let outcomes = scenarios::run_grid(&series, &grid, window_end);

    // The core never prints; failing scenarios are surfaced here, with their
    // parameters, so grid output stays machine-readable on stdout.
    let mut results = Vec::new();
    let mut failed = 0usize;
    for outcome in outcomes {
        match (outcome.report, outcome.error) {
            (Some(report), _) => results.push(serde_json::to_value(&report)?),
            (None, error) => {
                failed += 1;
                let s = &outcome.scenario;
                eprintln!(
                    "{}: principal={} apr={}% term={}m allocation={}% day={}: {}",
                    "scenario failed".yellow(),
                    s.terms.principal,
                    s.terms.apr_pct,
                    s.terms.term_months,
                    s.allocation_pct,
                    s.payment_day,
                    error.unwrap_or_else(|| "unknown error".into()),
                );
            }
        }
    }

    Ok(json!({
        "results": results,
        "scenarios_computed": results.len(),
        "scenarios_failed": failed,
        "window_end": window_end,
    }))
}
