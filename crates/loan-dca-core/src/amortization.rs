//! Level-payment amortization for fixed-rate installment loans.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanDcaError;
use crate::types::{Money, Percent};
use crate::LoanDcaResult;

/// Fixed-rate installment loan terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed.
    pub principal: Money,
    /// Annual percentage rate (5.99 = 5.99%).
    pub apr_pct: Percent,
    /// Term in months.
    pub term_months: u32,
}

/// Level monthly payment under standard amortization:
/// `P·r·(1+r)^n / ((1+r)^n − 1)` with `r = apr/12/100`.
///
/// The formula is 0/0 at zero APR, so that case falls back to straight
/// principal division.
pub fn monthly_payment(terms: &LoanTerms) -> LoanDcaResult<Money> {
    validate(terms)?;

    if terms.apr_pct.is_zero() {
        return Ok(terms.principal / Decimal::from(terms.term_months));
    }

    let r = terms.apr_pct / dec!(12) / dec!(100);
    let growth = (Decimal::ONE + r).powi(terms.term_months as i64);
    Ok(terms.principal * r * growth / (growth - Decimal::ONE))
}

/// Interest paid over the full term: `payment·n − principal`.
pub fn total_interest(principal: Money, payment: Money, term_months: u32) -> Money {
    payment * Decimal::from(term_months) - principal
}

/// Total of all payments over the term.
pub fn total_cost(payment: Money, term_months: u32) -> Money {
    payment * Decimal::from(term_months)
}

fn validate(terms: &LoanTerms) -> LoanDcaResult<()> {
    if terms.term_months == 0 {
        return Err(LoanDcaError::InvalidTerm(0));
    }
    if terms.principal <= Decimal::ZERO {
        return Err(LoanDcaError::InvalidPrincipal(terms.principal));
    }
    if terms.apr_pct < Decimal::ZERO {
        return Err(LoanDcaError::InvalidRate(terms.apr_pct));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn terms(principal: Money, apr_pct: Percent, term_months: u32) -> LoanTerms {
        LoanTerms {
            principal,
            apr_pct,
            term_months,
        }
    }

    #[test]
    fn zero_apr_is_straight_principal_division() {
        // 20000 / 48 = 416.666...
        let payment = monthly_payment(&terms(dec!(20000), dec!(0), 48)).unwrap();
        assert_eq!(payment, dec!(20000) / dec!(48));
        assert_eq!(total_interest(dec!(20000), payment, 48), Decimal::ZERO);
    }

    #[test]
    fn standard_auto_loan_payment() {
        // 20000 at 5.99% over 48 months:
        // r = 0.0599/12 = 0.00499167
        // payment = 20000·r·(1+r)^48 / ((1+r)^48 − 1) ≈ 469.62
        let payment = monthly_payment(&terms(dec!(20000), dec!(5.99), 48)).unwrap();
        assert!(
            (payment - dec!(469.62)).abs() < dec!(0.25),
            "expected ~469.62, got {payment}"
        );
    }

    #[test]
    fn interest_is_nonnegative_for_nonnegative_apr() {
        for apr in [dec!(0), dec!(0.5), dec!(3.99), dec!(11.99)] {
            let t = terms(dec!(25000), apr, 60);
            let payment = monthly_payment(&t).unwrap();
            let interest = total_interest(t.principal, payment, t.term_months);
            assert!(
                interest >= Decimal::ZERO,
                "apr {apr}: negative interest {interest}"
            );
        }
    }

    #[test]
    fn total_cost_is_payment_times_term() {
        assert_eq!(total_cost(dec!(469.70), 48), dec!(22545.60));
    }

    #[test]
    fn rejects_degenerate_inputs() {
        assert!(matches!(
            monthly_payment(&terms(dec!(20000), dec!(5.99), 0)),
            Err(LoanDcaError::InvalidTerm(0))
        ));
        assert!(matches!(
            monthly_payment(&terms(dec!(0), dec!(5.99), 48)),
            Err(LoanDcaError::InvalidPrincipal(_))
        ));
        assert!(matches!(
            monthly_payment(&terms(dec!(20000), dec!(-1), 48)),
            Err(LoanDcaError::InvalidRate(_))
        ));
    }
}
