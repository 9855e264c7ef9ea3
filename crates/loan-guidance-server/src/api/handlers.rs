use axum::{extract::State, Json};
use loan_guidance_core::amortization::AmortizationSchedule;
use loan_guidance_core::analysis::{LoanAnalysis, Recommendations};
use loan_guidance_core::request::LoanApplication;
use loan_guidance_core::visualization::{EnhancedVisualization, Visualization};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::api::state::AppState;
use crate::error::ApiError;

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub schedule: AmortizationSchedule,
}

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Loan Guidance System API" }))
}

/// GET /health -- liveness probe
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}

/// POST /analyze
pub async fn analyze(
    State(state): State<AppState>,
    Json(app): Json<LoanApplication>,
) -> ApiResult<LoanAnalysis> {
    let output = state.advisor.analyze(&app)?;
    for warning in &output.warnings {
        debug!(%warning, "analysis warning");
    }
    info!(
        loan_amount = %app.loan_amount,
        overall_risk = %output.result.risk.overall_risk,
        elapsed_us = output.metadata.computation_time_us,
        "loan analysed"
    );
    Ok(Json(output.result))
}

/// POST /payment-schedule
pub async fn payment_schedule(
    State(state): State<AppState>,
    Json(app): Json<LoanApplication>,
) -> ApiResult<ScheduleResponse> {
    let output = state.advisor.payment_schedule(&app)?;
    info!(periods = output.result.periods, "schedule generated");
    Ok(Json(ScheduleResponse {
        schedule: output.result,
    }))
}

/// POST /recommendations
pub async fn recommendations(
    State(state): State<AppState>,
    Json(app): Json<LoanApplication>,
) -> ApiResult<Recommendations> {
    Ok(Json(state.advisor.recommendations(&app)?))
}

/// POST /visualization
pub async fn visualization(
    State(state): State<AppState>,
    Json(app): Json<LoanApplication>,
) -> ApiResult<Visualization> {
    Ok(Json(state.advisor.visualization(&app)?))
}

/// POST /enhanced-visualization
pub async fn enhanced_visualization(
    State(state): State<AppState>,
    Json(app): Json<LoanApplication>,
) -> ApiResult<EnhancedVisualization> {
    Ok(Json(state.advisor.enhanced_visualization(&app)?))
}
