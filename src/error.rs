use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] redis::RedisError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Cold start failed: {message}")]
    ColdStartFailed { message: String, retryable: bool },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::ColdStartFailed { message, retryable } => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({ "error": message, "retryable": retryable }),
            ),
            AppError::Store(_) | AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": self.to_string() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Failures reported by a generative model backend
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Response blocked: SAFETY ({0})")]
    SafetyBlocked(String),

    #[error("Model returned no text")]
    EmptyResponse,

    #[error("Failed to decode model response: {0}")]
    Decode(String),
}

impl ModelError {
    /// Transient failures worth retrying: overload, rate limiting, flaky network
    pub fn is_retryable(&self) -> bool {
        match self {
            ModelError::Status { status, .. } => matches!(status, 429 | 503),
            ModelError::Network(_) => true,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ModelError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            ModelError::Status {
                status: status.as_u16(),
                body: e.to_string(),
            }
        } else if e.is_decode() {
            ModelError::Decode(e.to_string())
        } else {
            ModelError::Network(e.to_string())
        }
    }
}
