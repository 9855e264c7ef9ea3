use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanError;
use crate::types::Percent;
use crate::LoanResult;

/// Band boundaries for the classifier. DTI bands are upper bounds
/// (exclusive) on post-loan DTI; credit bands are inclusive lower bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    pub dti_excellent_below: Percent,
    pub dti_good_below: Percent,
    pub dti_fair_below: Percent,
    pub dti_poor_below: Percent,
    pub credit_excellent_min: u16,
    pub credit_good_min: u16,
    pub credit_fair_min: u16,
    /// LTV above which mortgage insurance is likely
    pub high_ltv_above: Percent,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            dti_excellent_below: dec!(28),
            dti_good_below: dec!(36),
            dti_fair_below: dec!(43),
            dti_poor_below: dec!(50),
            credit_excellent_min: 740,
            credit_good_min: 670,
            credit_fair_min: 580,
            high_ltv_above: dec!(80),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DtiCategory {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditCategory {
    Excellent,
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    LowModerate,
    Moderate,
    High,
}

impl std::fmt::Display for DtiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
            Self::Critical => "critical",
        };
        write!(f, "{}", s)
    }
}

impl std::fmt::Display for CreditCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        };
        write!(f, "{}", s)
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::LowModerate => "low moderate",
            Self::Moderate => "moderate",
            Self::High => "high",
        };
        write!(f, "{}", s)
    }
}

/// Classifier built once from its thresholds and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct RiskModel {
    thresholds: RiskThresholds,
}

impl RiskModel {
    pub fn new(thresholds: RiskThresholds) -> LoanResult<Self> {
        validate_thresholds(&thresholds)?;
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &RiskThresholds {
        &self.thresholds
    }

    pub fn dti_category(&self, dti: Percent) -> DtiCategory {
        let t = &self.thresholds;
        if dti < t.dti_excellent_below {
            DtiCategory::Excellent
        } else if dti < t.dti_good_below {
            DtiCategory::Good
        } else if dti < t.dti_fair_below {
            DtiCategory::Fair
        } else if dti < t.dti_poor_below {
            DtiCategory::Poor
        } else {
            DtiCategory::Critical
        }
    }

    pub fn credit_category(&self, score: u16) -> CreditCategory {
        let t = &self.thresholds;
        if score >= t.credit_excellent_min {
            CreditCategory::Excellent
        } else if score >= t.credit_good_min {
            CreditCategory::Good
        } else if score >= t.credit_fair_min {
            CreditCategory::Fair
        } else {
            CreditCategory::Poor
        }
    }

    /// Overall risk from post-loan DTI and credit score. The worse of the
    /// two signals wins.
    pub fn overall_risk(&self, dti: Percent, score: u16) -> RiskLevel {
        let t = &self.thresholds;
        if dti > t.dti_fair_below || score < t.credit_fair_min {
            RiskLevel::High
        } else if dti > t.dti_good_below || score < t.credit_good_min {
            RiskLevel::Moderate
        } else if dti > t.dti_excellent_below || score < t.credit_excellent_min {
            RiskLevel::LowModerate
        } else {
            RiskLevel::Low
        }
    }
}

fn validate_thresholds(t: &RiskThresholds) -> LoanResult<()> {
    let dti = [
        t.dti_excellent_below,
        t.dti_good_below,
        t.dti_fair_below,
        t.dti_poor_below,
    ];
    if dti[0] <= Decimal::ZERO || dti.windows(2).any(|w| w[0] >= w[1]) {
        return Err(LoanError::invalid(
            "risk.dti_bands",
            "DTI bands must be positive and strictly ascending",
        ));
    }
    if !(t.credit_fair_min < t.credit_good_min && t.credit_good_min < t.credit_excellent_min) {
        return Err(LoanError::invalid(
            "risk.credit_bands",
            "Credit bands must be strictly ascending (fair < good < excellent)",
        ));
    }
    if t.high_ltv_above <= Decimal::ZERO {
        return Err(LoanError::invalid(
            "risk.high_ltv_above",
            "High-LTV threshold must be positive",
        ));
    }
    Ok(())
}
