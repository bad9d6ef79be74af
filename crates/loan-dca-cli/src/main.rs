mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::grid::GridArgs;
use commands::loan::{EffectiveRateArgs, PaymentArgs};
use commands::scan::ScanArgs;
use commands::simulate::SimulateArgs;

/// Loan + DCA blend analysis over historical price data
#[derive(Parser)]
#[command(
    name = "ldca",
    version,
    about = "Loan amortization blended with dollar-cost-averaged asset purchases",
    long_about = "Simulates the outcome of adding a recurring asset purchase on top of a \
                  fixed-schedule loan, replayed against historical hourly price data. \
                  Supports amortization math, effective cost/return rates, fixed-horizon \
                  return scans, single-scenario simulations, and scenario grids."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Level monthly payment, total interest, and total cost of a loan
    Payment(PaymentArgs),
    /// Effective cost or return rate of a loan blended with an asset position
    EffectiveRate(EffectiveRateArgs),
    /// Scan every start point for its forward return over a fixed horizon
    Scan(ScanArgs),
    /// Simulate one loan + DCA scenario against a price history
    Simulate(SimulateArgs),
    /// Run a scenario grid (cross product of parameter lists)
    Grid(GridArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::loan::run_payment(args),
        Commands::EffectiveRate(args) => commands::loan::run_effective_rate(args),
        Commands::Scan(args) => commands::scan::run_scan(args),
        Commands::Simulate(args) => commands::simulate::run_simulate(args),
        Commands::Grid(args) => commands::grid::run_grid(args),
        Commands::Version => {
            println!("ldca {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
