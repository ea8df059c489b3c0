//! # API Errors
//!
//! Maps failures to HTTP status codes and `{"error": ...}` bodies.
//!
//! Only validation errors reveal anything about the cause. Server-side faults
//! get a fixed message; the detail goes to the log.

use crate::application::services::AggregationError;
use crate::domain::errors::{MISSING_PARAMETER_MESSAGE, ValidationError};
use crate::infrastructure::sources::error::SourceError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::any::Any;
use thiserror::Error;

/// Body sent for unexpected server faults.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Body sent when the `/external` upstream fails.
pub const EXTERNAL_ERROR_MESSAGE: &str = "Failed to fetch external data";

/// JSON error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human readable message.
    pub error: String,
}

impl ErrorResponse {
    /// Creates an error body.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Errors a handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Required query parameters are missing.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The aggregator itself failed.
    #[error("aggregation fault: {0}")]
    Aggregation(#[from] AggregationError),

    /// The `/external` upstream could not be fetched.
    #[error("external fetch failed: {0}")]
    External(#[source] SourceError),
}

impl ApiError {
    /// Returns the HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Aggregation(_) | Self::External(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> &'static str {
        match self {
            Self::Validation(_) => MISSING_PARAMETER_MESSAGE,
            Self::Aggregation(_) => SERVER_ERROR_MESSAGE,
            Self::External(_) => EXTERNAL_ERROR_MESSAGE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Validation(e) => {
                tracing::debug!(parameter = e.parameter(), "rejected incomplete request");
            }
            Self::Aggregation(e) => tracing::error!(error = %e, "aggregation fault"),
            Self::External(e) => tracing::error!(error = %e, "external fetch failed"),
        }

        (self.status(), Json(ErrorResponse::new(self.client_message()))).into_response()
    }
}

/// Response for a panic caught while handling a request.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!(panic = detail, "request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(SERVER_ERROR_MESSAGE)),
    )
        .into_response()
}
