use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use loan_guidance_core::analysis::LoanAdvisor;
use loan_guidance_server::{create_router, AppState};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    create_router(AppState::new(LoanAdvisor::default()))
}

fn application() -> Value {
    json!({
        "income": 120000,
        "loan_amount": 300000,
        "loan_term": 30,
        "interest_rate": 6.0,
        "credit_score": 760,
        "monthly_debt": 400,
        "property_value": 400000
    })
}

/// Decimals travel as JSON strings; compare them by value, not by scale.
fn decimal(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn health_reports_healthy() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn root_returns_welcome() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn analyze_returns_full_assessment() {
    let (status, body) = post("/analyze", application()).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(decimal(&body["analysis"]["monthly_payment"]), dec!(1798.65));
    assert_eq!(decimal(&body["analysis"]["loan_to_value"]), dec!(75));
    assert_eq!(body["analysis"]["credit_score"]["category"], "excellent");
    assert_eq!(body["risk"]["overall_risk"], "low");
    assert_eq!(body["visualization_available"], true);
    assert_eq!(body["schedule_summary"].as_array().unwrap().len(), 4);
    assert!(body["recommendations"]
        .as_str()
        .unwrap()
        .contains("<h3>Loan Assessment</h3>"));
}

#[tokio::test]
async fn invalid_fields_are_reported_together() {
    let mut request = application();
    request["credit_score"] = json!(200);
    request["loan_term"] = json!(0);

    let (status, body) = post("/analyze", request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Invalid loan parameters");
    assert!(body["fields"]["credit_score"].is_string());
    assert!(body["fields"]["loan_term"].is_string());
    assert!(body["fields"].get("income").is_none());
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/payment-schedule")
                .header("content-type", "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn payment_schedule_lists_every_period() {
    let (status, body) = post("/payment-schedule", application()).await;
    assert_eq!(status, StatusCode::OK);

    let schedule = &body["schedule"];
    let entries = schedule["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 360);
    assert_eq!(decimal(&schedule["monthly_payment"]), dec!(1798.65));
    assert_eq!(decimal(&entries[0]["interest"]), dec!(1500));
    assert_eq!(decimal(&entries[359]["remaining_balance"]), Decimal::ZERO);
}

#[tokio::test]
async fn extra_payment_shortens_schedule() {
    let mut request = application();
    request["extra_payment"] = json!(500);

    let (status, body) = post("/payment-schedule", request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["schedule"]["entries"].as_array().unwrap().len() < 360);
}

#[tokio::test]
async fn recommendations_include_plain_text() {
    let (status, body) = post("/recommendations", application()).await;
    assert_eq!(status, StatusCode::OK);
    let text = body["plain_text"].as_str().unwrap();
    assert!(text.starts_with("** Loan Assessment **"));
    assert!(!text.contains('<'));
}

#[tokio::test]
async fn visualization_endpoints_return_image_and_series() {
    let (status, body) = post("/visualization", application()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["image_data"].as_str().unwrap().is_empty());
    assert_eq!(body["chart"]["points"].as_array().unwrap().len(), 361);

    let (status, body) = post("/enhanced-visualization", application()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["yearly"].as_array().unwrap().len(), 30);
    assert!(body["composition"]["interest_share"].is_string());
}
