use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Loan guidance
        .route("/analyze", post(handlers::analyze))
        .route("/payment-schedule", post(handlers::payment_schedule))
        .route("/recommendations", post(handlers::recommendations))
        // Chart data
        .route("/visualization", post(handlers::visualization))
        .route("/enhanced-visualization", post(handlers::enhanced_visualization))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
