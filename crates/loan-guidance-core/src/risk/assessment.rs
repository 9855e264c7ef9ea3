use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::model::{RiskLevel, RiskModel};
use crate::types::{Money, Percent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorLevel {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorImpact {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub risk_level: FactorLevel,
    pub impact: FactorImpact,
    pub suggestion: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_factors: BTreeMap<String, RiskFactor>,
    pub overall_risk: RiskLevel,
    pub recommendations: Vec<String>,
}

/// Borrower signals the classifier looks at.
#[derive(Debug, Clone)]
pub struct RiskInputs {
    pub dti_after_loan: Percent,
    pub credit_score: u16,
    pub loan_to_value: Option<Percent>,
    pub extra_payment: Money,
}

impl RiskModel {
    pub fn assess(&self, inputs: &RiskInputs) -> RiskAssessment {
        let t = self.thresholds();
        let dti = inputs.dti_after_loan;
        let score = inputs.credit_score;

        let mut risk_factors = BTreeMap::new();
        risk_factors.insert(
            "credit_score".to_string(),
            RiskFactor {
                risk_level: if score < t.credit_fair_min {
                    FactorLevel::High
                } else if score < t.credit_good_min {
                    FactorLevel::Moderate
                } else {
                    FactorLevel::Low
                },
                impact: if score < t.credit_good_min {
                    FactorImpact::Negative
                } else {
                    FactorImpact::Positive
                },
                suggestion: if score < t.credit_good_min {
                    "Improve credit score".into()
                } else {
                    "Maintain excellent credit".into()
                },
            },
        );
        risk_factors.insert(
            "debt_to_income".to_string(),
            RiskFactor {
                risk_level: if dti > t.dti_fair_below {
                    FactorLevel::High
                } else if dti > t.dti_good_below {
                    FactorLevel::Moderate
                } else {
                    FactorLevel::Low
                },
                impact: if dti > t.dti_good_below {
                    FactorImpact::Negative
                } else {
                    FactorImpact::Positive
                },
                suggestion: if dti > t.dti_good_below {
                    "Reduce debt or increase income".into()
                } else {
                    "Maintain healthy DTI ratio".into()
                },
            },
        );

        let mut recommendations = Vec::new();
        if dti > t.dti_fair_below {
            recommendations.push(
                "Your debt-to-income ratio is high. Consider reducing other debt or increasing income."
                    .to_string(),
            );
        }
        if score < t.credit_good_min {
            recommendations.push(
                "Work on improving your credit score to qualify for better interest rates."
                    .to_string(),
            );
        }
        if inputs.loan_to_value.is_some_and(|ltv| ltv > t.high_ltv_above) {
            recommendations.push(
                "Consider making a larger down payment to reduce loan-to-value ratio and avoid PMI."
                    .to_string(),
            );
        }
        if inputs.extra_payment.is_zero() {
            recommendations.push(
                "Making extra payments could significantly reduce your total interest paid and loan term."
                    .to_string(),
            );
        }
        if recommendations.is_empty() {
            recommendations.push("Your financial profile appears strong for this loan.".to_string());
        }

        RiskAssessment {
            risk_factors,
            overall_risk: self.overall_risk(dti, score),
            recommendations,
        }
    }
}

impl RiskInputs {
    pub fn new(dti_after_loan: Percent, credit_score: u16) -> Self {
        Self {
            dti_after_loan,
            credit_score,
            loan_to_value: None,
            extra_payment: Decimal::ZERO,
        }
    }
}
