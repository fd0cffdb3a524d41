//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::data::SourceError;
use crate::services::dashboard::ParseStatsModeError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request (bad query value)
    BadRequest(String),
    /// Internal server error
    Internal(String),
    /// Dataset source failure
    Source(SourceError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg)),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Source(e) => {
                log::error!("Dataset source error: {}", e);
                let error = ApiError::new("SOURCE_ERROR", "Failed to load datasets");
                let error = match e.context().dataset {
                    Some(kind) => error.with_details(format!("dataset={}: {}", kind, e)),
                    None => error.with_details(e.to_string()),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, error)
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        AppError::Source(err)
    }
}

impl From<ParseStatsModeError> for AppError {
    fn from(err: ParseStatsModeError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("Pipeline task failed: {}", err))
    }
}
