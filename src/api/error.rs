//! API error types with structured JSON responses.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::core_state::CoreError;
use crate::scheduling::SchedulingError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
    /// Offending input field, for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

/// API-level errors with HTTP status mapping.
///
/// Each scheduling outcome gets its own status and code so clients can
/// tell a stale slot (re-fetch and pick another) from bad input.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
    #[error("Slot conflict: {0}")]
    SlotConflict(String),
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, field) = match self {
            ApiError::Validation { field, reason } => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_FAILED",
                format!("Invalid {field}: {reason}"),
                Some(field),
            ),
            ApiError::SlotConflict(detail) => (StatusCode::CONFLICT, "SLOT_CONFLICT", detail, None),
            ApiError::InvalidTransition(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_TRANSITION",
                detail,
                None,
            ),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail, None),
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail, None),
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message, field },
        };
        (status, Json(body)).into_response()
    }
}

impl From<SchedulingError> for ApiError {
    fn from(err: SchedulingError) -> Self {
        match err {
            SchedulingError::Validation { field, reason } => ApiError::Validation { field, reason },
            e @ SchedulingError::SlotConflict { .. } => ApiError::SlotConflict(e.to_string()),
            e @ SchedulingError::InvalidTransition { .. } => ApiError::InvalidTransition(e.to_string()),
            e @ SchedulingError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            SchedulingError::Storage(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
