#![cfg(feature = "scenarios")]

use chrono::{NaiveDate, NaiveDateTime};
use loan_dca_core::amortization::LoanTerms;
use loan_dca_core::analysis::{self, LoanDcaScenario};
use loan_dca_core::effective_rate::EffectiveRate;
use loan_dca_core::scenarios::{self, ScenarioGrid};
use loan_dca_core::series::{PricePoint, PriceSeries};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn first_of_month(y: i32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn flat_series(start_year: i32, count: usize) -> PriceSeries {
    let points = (0..count)
        .map(|k| PricePoint {
            timestamp: first_of_month(start_year + (k / 12) as i32, (k % 12) as u32 + 1),
            high: dec!(100),
            low: dec!(100),
        })
        .collect();
    PriceSeries::new(points)
}

#[test]
fn test_flat_market_zero_apr_scenario_is_rate_neutral() {
    // Flat prices and a free loan: the blend neither costs nor returns.
    let series = flat_series(2020, 49);
    let scenario = LoanDcaScenario {
        terms: LoanTerms {
            principal: dec!(20000),
            apr_pct: dec!(0),
            term_months: 48,
        },
        allocation_pct: dec!(10),
        payment_day: 1,
    };
    let report = analysis::analyze_scenario(&series, &scenario, first_of_month(2024, 1))
        .unwrap()
        .result;

    assert_eq!(report.monthly_payment, dec!(20000) / dec!(48));
    assert_eq!(report.dca_monthly_amount, report.monthly_payment / dec!(10));
    assert_eq!(report.total_interest, Decimal::ZERO);
    assert_eq!(report.net_position, Decimal::ZERO);
    assert_eq!(report.net_interest_after_asset, Decimal::ZERO);
    match report.effective_rate {
        EffectiveRate::Return {
            annualized_pct,
            total_return_pct,
        } => {
            assert_eq!(annualized_pct, Decimal::ZERO);
            assert_eq!(total_return_pct, Decimal::ZERO);
        }
        other => panic!("expected return regime at the boundary, got {other:?}"),
    }
}

#[test]
fn test_flat_market_costly_loan_stays_cost_regime() {
    let series = flat_series(2020, 49);
    let scenario = LoanDcaScenario {
        terms: LoanTerms {
            principal: dec!(20000),
            apr_pct: dec!(5.99),
            term_months: 48,
        },
        allocation_pct: dec!(10),
        payment_day: 1,
    };
    let report = analysis::analyze_scenario(&series, &scenario, first_of_month(2024, 1))
        .unwrap()
        .result;
    assert!(report.total_interest > Decimal::ZERO);
    assert_eq!(report.roi_pct, Some(Decimal::ZERO));
    assert!(report.effective_rate.is_cost());
    assert_eq!(
        report.blended_monthly_payment,
        report.monthly_payment + report.dca_monthly_amount
    );
}

#[test]
fn test_grid_reports_failures_instead_of_dropping_them() {
    // Series covers 4 years; 60- and 72-month scenarios cannot be computed
    // and must surface as failures with their parameters intact.
    let series = flat_series(2020, 49);
    let grid = ScenarioGrid {
        principals: vec![dec!(20000)],
        aprs_pct: vec![dec!(5.99)],
        terms_months: vec![48, 60, 72],
        allocation_pcts: vec![dec!(10)],
        payment_day: 1,
    };
    let outcomes = scenarios::run_grid(&series, &grid, first_of_month(2024, 1));

    assert_eq!(outcomes.len(), 3);
    let failures: Vec<_> = outcomes.iter().filter(|o| o.is_failure()).collect();
    assert_eq!(failures.len(), 2);
    for failure in &failures {
        assert!(failure.report.is_none());
        assert!(
            failure.error.as_deref().unwrap().contains("Insufficient history"),
            "unexpected error: {:?}",
            failure.error
        );
        assert!(failure.scenario.terms.term_months > 48);
    }
    let success = outcomes.iter().find(|o| !o.is_failure()).unwrap();
    assert_eq!(success.scenario.terms.term_months, 48);
    assert!(success.report.is_some());
}
