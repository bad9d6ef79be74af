//! Net cost/return rate after combining loan interest with asset gains.
//!
//! The sign of `total_interest − net_asset_position` selects the regime:
//! still paying net interest (cost) or the asset gains exceeded the interest
//! (return). The two regimes carry different companion figures, so the
//! output is a tagged enum rather than a sign-overloaded tuple.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanDcaError;
use crate::types::{Money, Percent};
use crate::LoanDcaResult;

/// Input to effective-rate resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveRateInput {
    /// Total loan interest over the term.
    pub total_interest: Money,
    /// Final asset value minus total invested (may be negative).
    pub net_asset_position: Money,
    /// Loan principal.
    pub principal: Money,
    /// Loan term in months.
    pub term_months: u32,
}

/// Effective rate, tagged by regime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "regime", rename_all = "snake_case")]
pub enum EffectiveRate {
    /// Net interest remains after asset gains: the loan still costs money.
    Cost {
        /// Annualized effective rate on the principal, as a percentage.
        effective_apr_pct: Percent,
        /// Monthly-compounded equivalent of the APR, as a percentage.
        effective_apy_pct: Percent,
    },
    /// Asset gains covered all interest: the blend produced a return.
    Return {
        /// Annualized return on total capital deployed, as a percentage.
        annualized_pct: Percent,
        /// Simple total return on capital deployed, as a percentage.
        total_return_pct: Percent,
    },
}

impl EffectiveRate {
    pub fn is_cost(&self) -> bool {
        matches!(self, EffectiveRate::Cost { .. })
    }
}

/// Resolve the effective rate of a loan blended with an asset position.
pub fn resolve(input: &EffectiveRateInput) -> LoanDcaResult<EffectiveRate> {
    if input.term_months == 0 {
        return Err(LoanDcaError::InvalidTerm(0));
    }
    if input.principal <= Decimal::ZERO {
        return Err(LoanDcaError::InvalidPrincipal(input.principal));
    }

    let net_interest = input.total_interest - input.net_asset_position;
    let annualize = dec!(12) / Decimal::from(input.term_months);

    if net_interest > Decimal::ZERO {
        // Still paying net interest.
        let rate = ((net_interest + input.principal) / input.principal).powd(annualize)
            - Decimal::ONE;
        let apy = (Decimal::ONE + rate / dec!(12)).powi(12) - Decimal::ONE;
        Ok(EffectiveRate::Cost {
            effective_apr_pct: rate * dec!(100),
            effective_apy_pct: apy * dec!(100),
        })
    } else {
        // Gains exceeded interest; measure the return on everything paid in.
        let gain = -net_interest;
        let capital = input.principal + input.total_interest + input.net_asset_position;
        if capital <= Decimal::ZERO {
            return Err(LoanDcaError::InvalidCapital(capital));
        }
        let annual = (Decimal::ONE + gain / capital).powd(annualize) - Decimal::ONE;
        Ok(EffectiveRate::Return {
            annualized_pct: annual * dec!(100),
            total_return_pct: gain / capital * dec!(100),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(
        total_interest: Money,
        net_asset_position: Money,
        principal: Money,
        term_months: u32,
    ) -> EffectiveRateInput {
        EffectiveRateInput {
            total_interest,
            net_asset_position,
            principal,
            term_months,
        }
    }

    #[test]
    fn cost_regime_when_interest_dominates() {
        // net_interest = 2000; ((22000/20000))^(12/48) − 1 = 1.1^0.25 − 1
        // ≈ 0.024114 → 2.4114% APR
        let rate = resolve(&input(dec!(2000), dec!(0), dec!(20000), 48)).unwrap();
        match rate {
            EffectiveRate::Cost {
                effective_apr_pct,
                effective_apy_pct,
            } => {
                assert!(
                    (effective_apr_pct - dec!(2.4114)).abs() < dec!(0.001),
                    "apr {effective_apr_pct}"
                );
                // APY compounds monthly, slightly above the APR
                assert!(effective_apy_pct > effective_apr_pct);
            }
            other => panic!("expected cost regime, got {other:?}"),
        }
    }

    #[test]
    fn return_regime_when_gains_dominate() {
        // net_interest = 2000 − 5000 = −3000; gain 3000
        // capital = 20000 + 2000 + 5000 = 27000
        // total return = 3000/27000 ≈ 11.111%
        // annualized = 1.11111^0.25 − 1 ≈ 2.669%
        let rate = resolve(&input(dec!(2000), dec!(5000), dec!(20000), 48)).unwrap();
        match rate {
            EffectiveRate::Return {
                annualized_pct,
                total_return_pct,
            } => {
                assert!(
                    (total_return_pct - dec!(11.1111)).abs() < dec!(0.001),
                    "total {total_return_pct}"
                );
                assert!(
                    (annualized_pct - dec!(2.669)).abs() < dec!(0.01),
                    "annualized {annualized_pct}"
                );
            }
            other => panic!("expected return regime, got {other:?}"),
        }
    }

    #[test]
    fn continuous_at_the_regime_boundary() {
        // As net interest approaches zero from either side, both branches
        // converge to a zero rate.
        let cost = resolve(&input(dec!(0.0001), dec!(0), dec!(20000), 48)).unwrap();
        let ret = resolve(&input(dec!(0), dec!(0.0001), dec!(20000), 48)).unwrap();
        match (cost, ret) {
            (
                EffectiveRate::Cost {
                    effective_apr_pct, ..
                },
                EffectiveRate::Return { annualized_pct, .. },
            ) => {
                assert!(effective_apr_pct.abs() < dec!(0.0001));
                assert!(annualized_pct.abs() < dec!(0.0001));
            }
            other => panic!("unexpected regimes: {other:?}"),
        }
    }

    #[test]
    fn asset_losses_raise_the_effective_cost() {
        // Losing money on the asset makes the blend dearer than the loan alone.
        let flat = resolve(&input(dec!(2000), dec!(0), dec!(20000), 48)).unwrap();
        let lossy = resolve(&input(dec!(2000), dec!(-1000), dec!(20000), 48)).unwrap();
        match (flat, lossy) {
            (
                EffectiveRate::Cost {
                    effective_apr_pct: flat_apr,
                    ..
                },
                EffectiveRate::Cost {
                    effective_apr_pct: lossy_apr,
                    ..
                },
            ) => assert!(lossy_apr > flat_apr),
            other => panic!("unexpected regimes: {other:?}"),
        }
    }

    #[test]
    fn rejects_degenerate_inputs() {
        assert!(matches!(
            resolve(&input(dec!(100), dec!(0), dec!(20000), 0)),
            Err(LoanDcaError::InvalidTerm(0))
        ));
        assert!(matches!(
            resolve(&input(dec!(100), dec!(0), dec!(0), 48)),
            Err(LoanDcaError::InvalidPrincipal(_))
        ));
        // capital deployed <= 0 in the return branch
        assert!(matches!(
            resolve(&input(dec!(-30000), dec!(500), dec!(20000), 48)),
            Err(LoanDcaError::InvalidCapital(_))
        ));
    }
}
