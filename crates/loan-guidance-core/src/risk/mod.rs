//! Rule-based borrower risk classification.

pub mod assessment;
pub mod model;

pub use assessment::{FactorImpact, FactorLevel, RiskAssessment, RiskFactor, RiskInputs};
pub use model::{CreditCategory, DtiCategory, RiskLevel, RiskModel, RiskThresholds};
