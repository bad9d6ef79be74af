//! Scenario grid generation and batch analysis.
//!
//! A grid is the cross product of parameter lists. Batch runs never abort on
//! a bad scenario: each outcome records either the report or the error, so a
//! caller can tell "computed, poor ROI" from "could not be computed".

use chrono::NaiveDateTime;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::LoanTerms;
use crate::analysis::{self, LoanDcaReport, LoanDcaScenario};
use crate::series::PriceSeries;
use crate::types::{Money, Percent};

/// Parameter lists whose cross product forms the scenario set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioGrid {
    pub principals: Vec<Money>,
    pub aprs_pct: Vec<Percent>,
    pub terms_months: Vec<u32>,
    pub allocation_pcts: Vec<Percent>,
    /// Payment day shared by every scenario in the grid.
    pub payment_day: u32,
}

impl Default for ScenarioGrid {
    /// Standard auto-loan sweep: 20k-50k principal, 3.99-7.99% APR,
    /// 4/5/6-year terms, 5-15% allocations.
    fn default() -> Self {
        Self {
            principals: vec![
                dec!(20000),
                dec!(25000),
                dec!(30000),
                dec!(35000),
                dec!(40000),
                dec!(45000),
                dec!(50000),
            ],
            aprs_pct: vec![dec!(3.99), dec!(4.99), dec!(5.99), dec!(6.99), dec!(7.99)],
            terms_months: vec![48, 60, 72],
            allocation_pcts: vec![dec!(5), dec!(7.5), dec!(10), dec!(12.5), dec!(15)],
            payment_day: 1,
        }
    }
}

impl ScenarioGrid {
    /// Cross product of every parameter list.
    pub fn expand(&self) -> Vec<LoanDcaScenario> {
        let mut scenarios = Vec::with_capacity(
            self.principals.len()
                * self.aprs_pct.len()
                * self.terms_months.len()
                * self.allocation_pcts.len(),
        );
        for &principal in &self.principals {
            for &apr_pct in &self.aprs_pct {
                for &term_months in &self.terms_months {
                    for &allocation_pct in &self.allocation_pcts {
                        scenarios.push(LoanDcaScenario {
                            terms: LoanTerms {
                                principal,
                                apr_pct,
                                term_months,
                            },
                            allocation_pct,
                            payment_day: self.payment_day,
                        });
                    }
                }
            }
        }
        scenarios
    }
}

/// One grid entry: either its report or why it could not be computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub scenario: LoanDcaScenario,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<LoanDcaReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScenarioOutcome {
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Run every scenario in the grid against the same price history. Failing
/// scenarios are reported alongside the successes, never dropped.
pub fn run_grid(
    series: &PriceSeries,
    grid: &ScenarioGrid,
    window_end: NaiveDateTime,
) -> Vec<ScenarioOutcome> {
    grid.expand()
        .into_iter()
        .map(|scenario| match analysis::compute_report(series, &scenario, window_end) {
            Ok((report, _warnings)) => ScenarioOutcome {
                scenario,
                report: Some(report),
                error: None,
            },
            Err(e) => ScenarioOutcome {
                scenario,
                report: None,
                error: Some(e.to_string()),
            },
        })
        .collect()
}
