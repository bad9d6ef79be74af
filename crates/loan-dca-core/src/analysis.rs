//! Combined loan + DCA scenario analysis.
//!
//! Ties the pieces together for one scenario: amortize the loan, carve the
//! asset allocation out of the monthly payment, replay the purchases over
//! the window ending at `window_end`, and resolve the blend's effective
//! cost or return.

use chrono::NaiveDateTime;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{self, LoanTerms};
use crate::effective_rate::{self, EffectiveRate, EffectiveRateInput};
use crate::series::PriceSeries;
use crate::simulation::{self, PurchasePlan};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Quantity};
use crate::LoanDcaResult;

/// One loan-plus-DCA scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanDcaScenario {
    pub terms: LoanTerms,
    /// Share of the monthly loan payment additionally allocated to the
    /// asset, as a percentage (10 = 10%).
    pub allocation_pct: Percent,
    /// Day of month payments execute, 1-28.
    pub payment_day: u32,
}

/// Full per-scenario report row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanDcaReport {
    // Echoed inputs
    pub principal: Money,
    pub apr_pct: Percent,
    pub term_months: u32,
    pub allocation_pct: Percent,
    pub payment_day: u32,

    // Loan side
    pub monthly_payment: Money,
    pub dca_monthly_amount: Money,
    /// Loan payment plus the asset allocation.
    pub blended_monthly_payment: Money,
    pub total_payments: Money,
    pub total_interest: Money,

    // Purchase side
    pub window_start: NaiveDateTime,
    pub window_end: NaiveDateTime,
    pub total_invested: Money,
    pub accumulated_quantity: Quantity,
    pub final_price: Money,
    pub final_value: Money,
    pub net_position: Money,
    pub roi_pct: Option<Percent>,

    // Blend
    /// Loan interest minus the asset's net gain; positive means the loan
    /// still costs money.
    pub net_interest_after_asset: Money,
    pub effective_rate: EffectiveRate,
}

#[derive(Serialize)]
struct AnalysisAssumptions<'a> {
    scenario: &'a LoanDcaScenario,
    window_end: NaiveDateTime,
}

/// Analyze one scenario against a price history.
pub fn analyze_scenario(
    series: &PriceSeries,
    scenario: &LoanDcaScenario,
    window_end: NaiveDateTime,
) -> LoanDcaResult<ComputationOutput<LoanDcaReport>> {
    let start = Instant::now();
    let (report, warnings) = compute_report(series, scenario, window_end)?;
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Loan Amortization + DCA Blend Analysis",
        &AnalysisAssumptions {
            scenario,
            window_end,
        },
        warnings,
        elapsed,
        report,
    ))
}

/// Compute the report row without the envelope. Building block for grid
/// runners.
pub fn compute_report(
    series: &PriceSeries,
    scenario: &LoanDcaScenario,
    window_end: NaiveDateTime,
) -> LoanDcaResult<(LoanDcaReport, Vec<String>)> {
    let mut warnings = Vec::new();

    let monthly_payment = amortization::monthly_payment(&scenario.terms)?;
    let dca_monthly_amount = monthly_payment * scenario.allocation_pct / dec!(100);
    let total_payments = amortization::total_cost(monthly_payment, scenario.terms.term_months);
    let total_interest = amortization::total_interest(
        scenario.terms.principal,
        monthly_payment,
        scenario.terms.term_months,
    );

    if scenario.allocation_pct > dec!(50) {
        warnings.push(format!(
            "Allocation of {}% exceeds half the loan payment",
            scenario.allocation_pct
        ));
    }

    let plan = PurchasePlan {
        monthly_allocation: dca_monthly_amount,
        payment_day: scenario.payment_day,
        term_months: scenario.terms.term_months,
    };
    let sim = simulation::run_plan(series, &plan, window_end)?;

    let effective_rate = effective_rate::resolve(&EffectiveRateInput {
        total_interest,
        net_asset_position: sim.net_position,
        principal: scenario.terms.principal,
        term_months: scenario.terms.term_months,
    })?;

    let report = LoanDcaReport {
        principal: scenario.terms.principal,
        apr_pct: scenario.terms.apr_pct,
        term_months: scenario.terms.term_months,
        allocation_pct: scenario.allocation_pct,
        payment_day: scenario.payment_day,
        monthly_payment,
        dca_monthly_amount,
        blended_monthly_payment: monthly_payment + dca_monthly_amount,
        total_payments,
        total_interest,
        window_start: sim.window_start,
        window_end: sim.window_end,
        total_invested: sim.total_invested,
        accumulated_quantity: sim.accumulated_quantity,
        final_price: sim.final_price,
        final_value: sim.final_value,
        net_position: sim.net_position,
        roi_pct: sim.roi_pct,
        net_interest_after_asset: total_interest - sim.net_position,
        effective_rate,
    };
    Ok((report, warnings))
}
