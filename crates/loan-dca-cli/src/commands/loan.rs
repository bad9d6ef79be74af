use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use loan_dca_core::amortization::{self, LoanTerms};
use loan_dca_core::effective_rate::{self, EffectiveRateInput};

use crate::input;

/// Arguments for amortization math
#[derive(Args)]
pub struct PaymentArgs {
    /// Loan principal in dollars
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual percentage rate (5.99 for 5.99%)
    #[arg(long)]
    pub apr: Option<Decimal>,

    /// Loan term in months
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for effective-rate resolution
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct EffectiveRateArgs {
    /// Total loan interest over the term
    #[arg(long)]
    pub total_interest: Option<Decimal>,

    /// Final asset value minus total invested (may be negative)
    #[arg(long)]
    pub net_asset_position: Option<Decimal>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Loan term in months
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms: LoanTerms = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(piped) = input::stdin::read_stdin()? {
        piped
    } else {
        LoanTerms {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            apr_pct: args.apr.ok_or("--apr is required (or provide --input)")?,
            term_months: args
                .term_months
                .ok_or("--term-months is required (or provide --input)")?,
        }
    };

    let payment = amortization::monthly_payment(&terms)?;
    let interest = amortization::total_interest(terms.principal, payment, terms.term_months);
    let cost = amortization::total_cost(payment, terms.term_months);

    Ok(json!({
        "principal": terms.principal,
        "apr_pct": terms.apr_pct,
        "term_months": terms.term_months,
        "monthly_payment": payment.round_dp(2),
        "total_interest": interest.round_dp(2),
        "total_cost": cost.round_dp(2),
    }))
}

pub fn run_effective_rate(args: EffectiveRateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let er_input: EffectiveRateInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(piped) = input::stdin::read_stdin()? {
        piped
    } else {
        EffectiveRateInput {
            total_interest: args
                .total_interest
                .ok_or("--total-interest is required (or provide --input)")?,
            net_asset_position: args
                .net_asset_position
                .ok_or("--net-asset-position is required (or provide --input)")?,
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            term_months: args
                .term_months
                .ok_or("--term-months is required (or provide --input)")?,
        }
    };

    let rate = effective_rate::resolve(&er_input)?;
    Ok(serde_json::to_value(&rate)?)
}
