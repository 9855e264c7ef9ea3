pub mod advisor;
pub mod ratios;

pub use advisor::{
    AnalysisResult, CreditScoreBlock, DebtToIncome, LoanAdvisor, LoanAnalysis, PayoffSummary,
    Recommendations,
};
pub use ratios::{affordability_ratios, AffordabilityInput, AffordabilityRatios};
