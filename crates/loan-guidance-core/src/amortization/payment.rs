use chrono::NaiveDate;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanError;
use crate::types::{Money, Percent, Rate};
use crate::LoanResult;

const MONTHS_PER_YEAR: u32 = 12;

/// Longest accepted term: 50 years of monthly periods.
pub const MAX_TERM_MONTHS: u32 = 50 * MONTHS_PER_YEAR;

/// Loan term, either in whole years or whole months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanTerm {
    Years(u32),
    Months(u32),
}

impl LoanTerm {
    /// Number of monthly payment periods, between 1 and [`MAX_TERM_MONTHS`].
    pub fn months(&self) -> LoanResult<u32> {
        let months = match *self {
            LoanTerm::Years(years) => years.checked_mul(MONTHS_PER_YEAR).ok_or_else(|| {
                LoanError::invalid("term", format!("{years} years is too long a term"))
            })?,
            LoanTerm::Months(months) => months,
        };
        if months == 0 {
            return Err(LoanError::invalid("term", "Loan term must be at least one period"));
        }
        if months > MAX_TERM_MONTHS {
            return Err(LoanError::invalid(
                "term",
                format!("Loan term of {months} months exceeds the {MAX_TERM_MONTHS} month maximum"),
            ));
        }
        Ok(months)
    }
}

/// Input to the amortization calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanParameters {
    pub principal: Money,
    /// Annual interest rate as a percentage (6.5 = 6.5%).
    pub annual_rate_percent: Percent,
    pub term: LoanTerm,
    /// Recurring amount applied to principal every period on top of the
    /// contractual payment.
    #[serde(default)]
    pub extra_payment: Money,
    /// Due date of the first payment. When absent, entries carry no dates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

impl LoanParameters {
    pub fn new(principal: Money, annual_rate_percent: Percent, term: LoanTerm) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term,
            extra_payment: Decimal::ZERO,
            start_date: None,
        }
    }

    pub fn with_extra_payment(mut self, extra_payment: Money) -> Self {
        self.extra_payment = extra_payment;
        self
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }
}

/// Periodic (monthly) rate from an annual percentage: `annual / 100 / 12`.
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / dec!(100) / Decimal::from(MONTHS_PER_YEAR)
}

/// Level monthly payment that retires `principal` over `term`.
///
/// Zero-rate loans divide the principal evenly across the periods. Otherwise
/// the standard annuity formula `P * r * (1+r)^n / ((1+r)^n - 1)` applies.
/// The result is not rounded.
pub fn compute_monthly_payment(
    principal: Money,
    annual_rate_percent: Percent,
    term: LoanTerm,
) -> LoanResult<Money> {
    if principal <= Decimal::ZERO {
        return Err(LoanError::invalid("principal", "Principal must be positive"));
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(LoanError::invalid(
            "annual_rate_percent",
            "Interest rate cannot be negative",
        ));
    }
    let periods = term.months()?;

    let rate = monthly_rate(annual_rate_percent);
    if rate.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    let growth = (Decimal::ONE + rate)
        .checked_powu(u64::from(periods))
        .ok_or_else(|| LoanError::Overflow {
            context: format!("(1 + r)^n for {periods} periods"),
            last_value: rate,
        })?;
    let denominator = growth - Decimal::ONE;
    if denominator.is_zero() {
        return Err(LoanError::DivisionByZero {
            context: "annuity factor".into(),
        });
    }

    Ok(principal * rate * growth / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::round_cents;

    #[test]
    fn test_thirty_year_six_percent() {
        let pmt = compute_monthly_payment(dec!(300000), dec!(6.0), LoanTerm::Years(30)).unwrap();
        assert_eq!(round_cents(pmt), dec!(1798.65));
    }

    #[test]
    fn test_zero_rate_is_even_split() {
        let pmt = compute_monthly_payment(dec!(100000), Decimal::ZERO, LoanTerm::Years(10)).unwrap();
        assert_eq!(pmt, dec!(100000) / dec!(120));
        assert_eq!(round_cents(pmt), dec!(833.33));
    }

    #[test]
    fn test_month_term_matches_year_term() {
        let by_years = compute_monthly_payment(dec!(250000), dec!(5.5), LoanTerm::Years(15)).unwrap();
        let by_months =
            compute_monthly_payment(dec!(250000), dec!(5.5), LoanTerm::Months(180)).unwrap();
        assert_eq!(by_years, by_months);
    }

    #[test]
    fn test_single_period_repays_principal_plus_interest() {
        // One month at 12% APR: 1000 * 1.01
        let pmt = compute_monthly_payment(dec!(1000), dec!(12), LoanTerm::Months(1)).unwrap();
        assert!((pmt - dec!(1010)).abs() < dec!(0.0000001));
    }

    #[test]
    fn test_payment_exceeds_first_month_interest() {
        let principal = dec!(425000);
        let pmt = compute_monthly_payment(principal, dec!(7.25), LoanTerm::Years(30)).unwrap();
        assert!(pmt > principal * monthly_rate(dec!(7.25)));
    }

    #[test]
    fn test_monthly_rate() {
        assert_eq!(monthly_rate(dec!(6)), dec!(0.005));
        assert_eq!(monthly_rate(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_zero_principal_error() {
        let err = compute_monthly_payment(Decimal::ZERO, dec!(6), LoanTerm::Years(30)).unwrap_err();
        assert!(matches!(err, LoanError::InvalidInput { ref field, .. } if field == "principal"));
    }

    #[test]
    fn test_zero_term_error() {
        assert!(compute_monthly_payment(dec!(1000), dec!(6), LoanTerm::Years(0)).is_err());
        assert!(compute_monthly_payment(dec!(1000), dec!(6), LoanTerm::Months(0)).is_err());
    }

    #[test]
    fn test_negative_rate_error() {
        let err = compute_monthly_payment(dec!(1000), dec!(-1), LoanTerm::Years(5)).unwrap_err();
        assert!(
            matches!(err, LoanError::InvalidInput { ref field, .. } if field == "annual_rate_percent")
        );
    }

    #[test]
    fn test_term_overflow_is_rejected() {
        assert!(LoanTerm::Years(u32::MAX).months().is_err());
    }

    #[test]
    fn test_term_cap() {
        assert_eq!(LoanTerm::Years(50).months().unwrap(), MAX_TERM_MONTHS);
        assert_eq!(LoanTerm::Months(600).months().unwrap(), 600);

        for term in [LoanTerm::Years(51), LoanTerm::Months(601), LoanTerm::Months(u32::MAX)] {
            let err = term.months().unwrap_err();
            assert!(matches!(err, LoanError::InvalidInput { ref field, .. } if field == "term"));
        }
    }
}
