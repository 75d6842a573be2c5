// Rust guideline compliant 2026-08-22

//! Translation of core errors into HTTP responses.
//!
//! Validation failures map to 400, unknown record ids to 404, weather
//! provider failures to 502 (the provider is an upstream of this service),
//! and everything else to 500. The core never sees HTTP status codes.

use crate::workflow::WorkflowError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{StoreError, ValidationError, WeatherError};
use serde_json::json;

/// API-level error, produced by handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request payload failed threshold validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),
    /// No record with the requested id exists.
    #[error("record not found")]
    NotFound,
    /// The weather provider call failed.
    #[error("weather provider failure: {0}")]
    Provider(WeatherError),
    /// A store or sink failure with no better classification.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::Weather(e) => Self::Provider(e),
            WorkflowError::Store(_) | WorkflowError::Evaluate(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Provider(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "api.request_failed");
        }
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
