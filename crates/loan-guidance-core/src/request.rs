//! Statically-typed loan request and its boundary checks.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::{LoanParameters, LoanTerm};
use crate::error::ValidationErrors;
use crate::types::{Money, Percent};
use crate::LoanResult;

pub const MAX_TERM_YEARS: i32 = 50;
pub const MAX_INTEREST_RATE: Percent = dec!(30);
pub const MIN_CREDIT_SCORE: i32 = 300;
pub const MAX_CREDIT_SCORE: i32 = 850;

/// A borrower's loan scenario as submitted by a caller.
///
/// Integer fields are signed so that out-of-range values reach
/// [`LoanApplication::validate`] and get a field-level message instead of
/// failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanApplication {
    /// Annual gross income
    pub income: Money,
    pub loan_amount: Money,
    /// Term in years
    pub loan_term: i32,
    /// Annual interest rate, percent
    pub interest_rate: Percent,
    pub credit_score: i32,
    /// Monthly debt payments excluding this loan
    pub monthly_debt: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_value: Option<Money>,
    #[serde(default)]
    pub extra_payment: Option<Money>,
}

impl LoanApplication {
    /// Check every field and report all violations at once.
    pub fn validate(&self) -> LoanResult<()> {
        let mut errors = ValidationErrors::new();

        if self.income <= Decimal::ZERO {
            errors.add("income", "Income must be greater than zero");
        }
        if self.loan_amount <= Decimal::ZERO {
            errors.add("loan_amount", "Loan amount must be greater than zero");
        }
        if self.loan_term <= 0 || self.loan_term > MAX_TERM_YEARS {
            errors.add(
                "loan_term",
                format!("Loan term must be between 1 and {MAX_TERM_YEARS} years"),
            );
        }
        if self.interest_rate < Decimal::ZERO || self.interest_rate > MAX_INTEREST_RATE {
            errors.add(
                "interest_rate",
                format!("Interest rate must be between 0 and {MAX_INTEREST_RATE} percent"),
            );
        }
        if self.credit_score < MIN_CREDIT_SCORE || self.credit_score > MAX_CREDIT_SCORE {
            errors.add(
                "credit_score",
                format!("Credit score must be between {MIN_CREDIT_SCORE} and {MAX_CREDIT_SCORE}"),
            );
        }
        if self.monthly_debt < Decimal::ZERO {
            errors.add("monthly_debt", "Monthly debt cannot be negative");
        }
        if self.property_value.is_some_and(|v| v <= Decimal::ZERO) {
            errors.add("property_value", "Property value must be greater than zero");
        }
        if self.extra_payment() < Decimal::ZERO {
            errors.add("extra_payment", "Extra payment cannot be negative");
        }

        errors.into_result()
    }

    pub fn extra_payment(&self) -> Money {
        self.extra_payment.unwrap_or(Decimal::ZERO)
    }

    /// Credit score narrowed for the risk model. Only meaningful after
    /// [`validate`](Self::validate) has passed.
    pub fn credit_score(&self) -> u16 {
        self.credit_score.clamp(0, i32::from(u16::MAX)) as u16
    }

    /// Amortization inputs for this application, after validation.
    pub fn to_parameters(&self) -> LoanResult<LoanParameters> {
        self.validate()?;
        Ok(
            LoanParameters::new(
                self.loan_amount,
                self.interest_rate,
                LoanTerm::Years(self.loan_term as u32),
            )
            .with_extra_payment(self.extra_payment()),
        )
    }
}
