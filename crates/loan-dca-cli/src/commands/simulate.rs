use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_dca_core::amortization::LoanTerms;
use loan_dca_core::analysis::{self, LoanDcaScenario};

use crate::input;

/// Arguments for a single loan + DCA scenario
#[derive(Args)]
pub struct SimulateArgs {
    /// Path to the price-history CSV (timestamp, high, low columns)
    #[arg(long)]
    pub prices: String,

    /// Loan principal in dollars
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual percentage rate (5.99 for 5.99%)
    #[arg(long)]
    pub apr: Option<Decimal>,

    /// Loan term in months
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Share of the monthly payment allocated to the asset, as a percentage
    #[arg(long)]
    pub allocation_pct: Option<Decimal>,

    /// Day of month payments execute (1-28)
    #[arg(long, default_value = "1")]
    pub payment_day: u32,

    /// End of the purchase window (YYYY-MM-DD or "YYYY-MM-DD HH:MM:SS");
    /// defaults to the last sample in the price history
    #[arg(long)]
    pub window_end: Option<String>,

    /// Path to JSON/YAML scenario file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let series = input::prices::load_csv(&args.prices)?;
    let window_end = super::resolve_window_end(&series, &args.window_end)?;

    let scenario: LoanDcaScenario = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(piped) = input::stdin::read_stdin()? {
        piped
    } else {
        LoanDcaScenario {
            terms: LoanTerms {
                principal: args
                    .principal
                    .ok_or("--principal is required (or provide --input)")?,
                apr_pct: args.apr.ok_or("--apr is required (or provide --input)")?,
                term_months: args
                    .term_months
                    .ok_or("--term-months is required (or provide --input)")?,
            },
            allocation_pct: args
                .allocation_pct
                .ok_or("--allocation-pct is required (or provide --input)")?,
            payment_day: args.payment_day,
        }
    };

    let output = analysis::analyze_scenario(&series, &scenario, window_end)?;
    Ok(serde_json::to_value(&output)?)
}
