//! HTTP surface for loan amortization and risk guidance.

pub mod api;
pub mod config;
pub mod error;
pub mod telemetry;

pub use api::{create_router, AppState};
pub use config::AppConfig;
pub use error::ApiError;
