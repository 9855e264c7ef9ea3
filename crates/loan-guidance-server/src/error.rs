use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use loan_guidance_core::{LoanError, ValidationErrors};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Errors surfaced by the HTTP handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid loan parameters: {0}")]
    Validation(ValidationErrors),

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<ValidationErrors>,
}

impl From<LoanError> for ApiError {
    fn from(e: LoanError) -> Self {
        match e {
            LoanError::Validation(fields) => ApiError::Validation(fields),
            LoanError::InvalidInput { field, reason } => ApiError::InvalidInput { field, reason },
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, "request rejected");
        }

        let body = match self {
            ApiError::Validation(fields) => ErrorBody {
                error: "Invalid loan parameters".to_string(),
                fields: Some(fields),
            },
            other => ErrorBody {
                error: other.to_string(),
                fields: None,
            },
        };
        (status, Json(body)).into_response()
    }
}
