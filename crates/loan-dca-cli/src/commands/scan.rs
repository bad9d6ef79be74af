use clap::Args;
use serde_json::Value;

use loan_dca_core::scanner::{self, ScanInput};

use crate::input;

/// Arguments for the fixed-horizon return scan
#[derive(Args)]
pub struct ScanArgs {
    /// Path to the price-history CSV (timestamp, high, low columns)
    #[arg(long)]
    pub prices: String,

    /// Forward horizon in whole calendar years
    #[arg(long, default_value = "4")]
    pub horizon_years: u32,
}

pub fn run_scan(args: ScanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let series = input::prices::load_csv(&args.prices)?;
    let output = scanner::scan(
        &series,
        &ScanInput {
            horizon_years: args.horizon_years,
        },
    )?;
    Ok(serde_json::to_value(&output)?)
}
