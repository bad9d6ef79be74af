//! Sliding-window fixed-horizon return scanner.
//!
//! Walks every possible start point in a price history and measures the
//! forward return over a fixed horizon of whole calendar years, then
//! aggregates extremes and summary statistics. The end of each interval is
//! the first sample at or after the exact calendar target; rounding down to
//! an earlier sample would let the interval peek before its own horizon.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::calendar;
use crate::error::LoanDcaError;
use crate::series::PriceSeries;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::LoanDcaResult;

/// Scan parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanInput {
    /// Forward horizon in whole calendar years.
    pub horizon_years: u32,
}

/// One start/end interval and its percentage return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalReturn {
    pub start: chrono::NaiveDateTime,
    pub end: chrono::NaiveDateTime,
    pub start_price: Money,
    pub end_price: Money,
    pub return_pct: Percent,
}

/// Aggregated scan output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Interval with the highest return.
    pub best: IntervalReturn,
    /// Interval with the lowest return.
    pub worst: IntervalReturn,
    pub mean_pct: Percent,
    pub median_pct: Percent,
    /// Population standard deviation of the interval returns.
    pub std_dev_pct: Percent,
    pub intervals_analyzed: usize,
}

/// Scan every start point in `series` for its forward return over
/// `horizon_years`.
///
/// Start points whose horizon target falls past the last sample are skipped;
/// the scan stops at the first such start, since every later one overflows
/// too. No wrap-around, no extrapolation.
pub fn scan(
    series: &PriceSeries,
    input: &ScanInput,
) -> LoanDcaResult<ComputationOutput<ScanSummary>> {
    let start = Instant::now();
    let (summary, warnings) = compute_scan(series, input)?;
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Sliding-Window Fixed-Horizon Return Scan",
        input,
        warnings,
        elapsed,
        summary,
    ))
}

fn compute_scan(
    series: &PriceSeries,
    input: &ScanInput,
) -> LoanDcaResult<(ScanSummary, Vec<String>)> {
    if input.horizon_years == 0 {
        return Err(LoanDcaError::InvalidTerm(0));
    }
    if series.is_empty() {
        return Err(LoanDcaError::EmptySeries);
    }

    let mut returns: Vec<Percent> = Vec::new();
    let mut best: Option<IntervalReturn> = None;
    let mut worst: Option<IntervalReturn> = None;

    for i in 0..series.len() {
        let interval_start = series.timestamp_at(i);
        let target = calendar::add_years(interval_start, input.horizon_years as i32);
        let Some(j) = series.first_at_or_after(target) else {
            // Every later start overflows the series as well.
            break;
        };

        let start_price = series.price_at(i);
        if start_price <= Decimal::ZERO {
            return Err(LoanDcaError::InvalidPrice {
                price: start_price,
                at: interval_start,
            });
        }
        let end_price = series.price_at(j);
        if end_price <= Decimal::ZERO {
            return Err(LoanDcaError::InvalidPrice {
                price: end_price,
                at: series.timestamp_at(j),
            });
        }
        let return_pct = (end_price - start_price) / start_price * dec!(100);

        let interval = IntervalReturn {
            start: interval_start,
            end: series.timestamp_at(j),
            start_price,
            end_price,
            return_pct,
        };
        if best.as_ref().map_or(true, |b| return_pct > b.return_pct) {
            best = Some(interval.clone());
        }
        if worst.as_ref().map_or(true, |w| return_pct < w.return_pct) {
            worst = Some(interval.clone());
        }
        returns.push(return_pct);
    }

    let (Some(best), Some(worst)) = (best, worst) else {
        return Err(LoanDcaError::InsufficientData(format!(
            "no full {}-year interval fits inside the price history",
            input.horizon_years
        )));
    };

    let mut warnings = Vec::new();
    if returns.len() < 30 {
        warnings.push(format!(
            "Only {} interval(s) fit the horizon; summary statistics may be unstable",
            returns.len()
        ));
    }

    let n = Decimal::from(returns.len() as u64);
    let mean = returns.iter().sum::<Decimal>() / n;
    let variance = returns
        .iter()
        .map(|r| (r - mean) * (r - mean))
        .sum::<Decimal>()
        / n;
    let std_dev = variance.sqrt().unwrap_or(Decimal::ZERO);

    let summary = ScanSummary {
        best,
        worst,
        mean_pct: mean,
        median_pct: median(&mut returns),
        std_dev_pct: std_dev,
        intervals_analyzed: returns.len(),
    };
    Ok((summary, warnings))
}

fn median(values: &mut [Decimal]) -> Decimal {
    values.sort_unstable();
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / dec!(2)
    }
}
