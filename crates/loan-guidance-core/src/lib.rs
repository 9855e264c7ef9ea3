pub mod amortization;
pub mod analysis;
pub mod error;
pub mod format;
pub mod narrative;
pub mod request;
pub mod risk;
pub mod types;
pub mod visualization;

pub use error::{LoanError, ValidationErrors};
pub use types::*;

/// Standard result type for all loan-guidance operations
pub type LoanResult<T> = Result<T, LoanError>;
