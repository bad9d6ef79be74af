//! Periodic-purchase (dollar-cost-averaging) simulator.
//!
//! Replays a monthly purchase plan against historical prices: the window is
//! anchored at `window_end` and shifted back by the plan's term, one
//! purchase per month on the plan's payment day, each filled at the nearest
//! available market print. Purchases use absolute-nearest price resolution,
//! unlike the scanner's right-biased lookup; the two policies are
//! intentionally different and documented on [`PriceSeries`].

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::calendar;
use crate::error::LoanDcaError;
use crate::series::PriceSeries;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Quantity};
use crate::LoanDcaResult;

/// A recurring monthly purchase plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchasePlan {
    /// Dollar amount purchased each month (may be zero).
    pub monthly_allocation: Money,
    /// Day of month the payment executes, 1-28.
    pub payment_day: u32,
    /// Number of monthly purchases.
    pub term_months: u32,
}

/// Outcome of replaying a purchase plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub window_start: NaiveDateTime,
    pub window_end: NaiveDateTime,
    /// Asset quantity accumulated across all purchases.
    pub accumulated_quantity: Quantity,
    /// Total dollars paid in.
    pub total_invested: Money,
    /// Price used to mark the final position.
    pub final_price: Money,
    /// `accumulated_quantity × final_price`.
    pub final_value: Money,
    /// `final_value − total_invested`.
    pub net_position: Money,
    /// Return on investment as a percentage; `None` when nothing was
    /// invested.
    pub roi_pct: Option<Percent>,
}

#[derive(Serialize)]
struct SimulationAssumptions<'a> {
    plan: &'a PurchasePlan,
    window_end: NaiveDateTime,
}

/// Replay `plan` against `series`, ending at `window_end`, wrapped in the
/// standard output envelope.
pub fn simulate(
    series: &PriceSeries,
    plan: &PurchasePlan,
    window_end: NaiveDateTime,
) -> LoanDcaResult<ComputationOutput<SimulationResult>> {
    let start = Instant::now();
    let result = run_plan(series, plan, window_end)?;
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Monthly Dollar-Cost-Averaging Purchase Simulation",
        &SimulationAssumptions { plan, window_end },
        Vec::new(),
        elapsed,
        result,
    ))
}

/// Replay `plan` against `series` without the envelope. Building block for
/// batch runners that aggregate many scenarios.
pub fn run_plan(
    series: &PriceSeries,
    plan: &PurchasePlan,
    window_end: NaiveDateTime,
) -> LoanDcaResult<SimulationResult> {
    validate(plan)?;

    let window_start = calendar::add_months(window_end, -(plan.term_months as i32));
    let earliest = series.earliest()?.timestamp;
    if window_start < earliest {
        return Err(LoanDcaError::InsufficientHistory {
            window_start,
            earliest,
        });
    }

    let mut accumulated_quantity = Decimal::ZERO;
    let mut total_invested = Decimal::ZERO;

    for purchase_date in purchase_dates(window_start, plan) {
        let price = series.nearest_price(purchase_date)?;
        if price <= Decimal::ZERO {
            return Err(LoanDcaError::InvalidPrice {
                price,
                at: purchase_date,
            });
        }
        accumulated_quantity += plan.monthly_allocation / price;
        total_invested += plan.monthly_allocation;
    }

    // Mark the position at the window end; nearest-lookup clamps to the last
    // sample when window_end runs past the series.
    let final_price = series.nearest_price(window_end)?;
    let final_value = accumulated_quantity * final_price;
    let net_position = final_value - total_invested;
    let roi_pct = if total_invested > Decimal::ZERO {
        Some(net_position / total_invested * dec!(100))
    } else {
        None
    };

    Ok(SimulationResult {
        window_start,
        window_end,
        accumulated_quantity,
        total_invested,
        final_price,
        final_value,
        net_position,
        roi_pct,
    })
}

/// One purchase per month for the plan's term: the month-end boundary of
/// each month from `window_start`, remapped to the plan's payment day
/// (clamped to the month's length), time-of-day preserved.
fn purchase_dates(
    window_start: NaiveDateTime,
    plan: &PurchasePlan,
) -> impl Iterator<Item = NaiveDateTime> + '_ {
    (0..plan.term_months).map(move |k| {
        let boundary = calendar::month_end(calendar::add_months(window_start, k as i32));
        let year = boundary.date().year();
        let month = boundary.date().month();
        NaiveDate::from_ymd_opt(year, month, calendar::clamp_day(plan.payment_day, year, month))
            .map(|d| d.and_time(boundary.time()))
            .unwrap_or(boundary)
    })
}

fn validate(plan: &PurchasePlan) -> LoanDcaResult<()> {
    if plan.term_months == 0 {
        return Err(LoanDcaError::InvalidTerm(0));
    }
    if !(1..=28).contains(&plan.payment_day) {
        return Err(LoanDcaError::InvalidPaymentDay(plan.payment_day));
    }
    if plan.monthly_allocation < Decimal::ZERO {
        return Err(LoanDcaError::InvalidAllocation(plan.monthly_allocation));
    }
    Ok(())
}
