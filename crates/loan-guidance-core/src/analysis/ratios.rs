use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanError;
use crate::types::*;
use crate::LoanResult;

const HUNDRED: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityInput {
    /// Annual gross income
    pub income: Money,
    pub monthly_debt: Money,
    pub monthly_payment: Money,
    pub loan_amount: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_value: Option<Money>,
}

/// Percent-valued ratios are expressed as percentages (36.5 = 36.5%).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityRatios {
    pub monthly_income: Money,
    pub dti_before_loan: Percent,
    pub dti_after_loan: Percent,
    pub loan_to_income: Percent,
    pub payment_to_income: Percent,
    pub loan_to_value: Option<Percent>,
    pub debt_service_coverage: Decimal,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Debt-to-income, loan-to-income, payment-to-income, loan-to-value and
/// debt service coverage for a borrower taking on `monthly_payment`.
pub fn affordability_ratios(input: &AffordabilityInput) -> LoanResult<AffordabilityRatios> {
    validate_input(input)?;

    let monthly_income = input.income / dec!(12);
    let obligations = input.monthly_debt + input.monthly_payment;

    let dti_before_loan = safe_divide(input.monthly_debt, monthly_income, "DTI before loan")? * HUNDRED;
    let dti_after_loan = safe_divide(obligations, monthly_income, "DTI after loan")? * HUNDRED;
    let loan_to_income = safe_divide(input.loan_amount, input.income, "loan / income")? * HUNDRED;
    let payment_to_income =
        safe_divide(input.monthly_payment, monthly_income, "payment / income")? * HUNDRED;
    let loan_to_value = match input.property_value {
        Some(value) => Some(safe_divide(input.loan_amount, value, "loan / value")? * HUNDRED),
        None => None,
    };
    let debt_service_coverage = safe_divide(monthly_income, obligations, "debt service coverage")?;

    Ok(AffordabilityRatios {
        monthly_income,
        dti_before_loan,
        dti_after_loan,
        loan_to_income,
        payment_to_income,
        loan_to_value,
        debt_service_coverage,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_input(input: &AffordabilityInput) -> LoanResult<()> {
    if input.income <= Decimal::ZERO {
        return Err(LoanError::invalid("income", "Income must be positive."));
    }
    if input.monthly_debt < Decimal::ZERO {
        return Err(LoanError::invalid("monthly_debt", "Monthly debt cannot be negative."));
    }
    if input.property_value.is_some_and(|v| v <= Decimal::ZERO) {
        return Err(LoanError::invalid("property_value", "Property value must be positive."));
    }
    Ok(())
}

fn safe_divide(numerator: Decimal, denominator: Decimal, context: &str) -> LoanResult<Decimal> {
    if denominator.is_zero() {
        return Err(LoanError::DivisionByZero {
            context: context.to_string(),
        });
    }
    Ok(numerator / denominator)
}
