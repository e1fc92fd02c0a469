//! Unified error handling with consistent API response envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Error detail in the API response envelope.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

/// Consistent JSON envelope for all API responses.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a successful result in the envelope.
    pub fn success(data: T) -> Json<Self> {
        Json(Self {
            data: Some(data),
            error: None,
        })
    }

    /// Wrap an error in the envelope.
    pub fn error(code: &str, message: &str) -> Json<Self> {
        Json(Self {
            data: None,
            error: Some(ApiError {
                code: code.to_string(),
                message: message.to_string(),
            }),
        })
    }
}

/// Application error type mapping to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A database is required for this operation but none is configured.
    #[error("No database configured: {0}")]
    Unconfigured(String),

    /// A live query failed. The message is a generic per-operation summary
    /// ("Failed to fetch revenue data"); the driver error stays server-side.
    #[error("{message}")]
    Store {
        message: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Wrap a failed live query, logging the underlying driver error.
    pub fn store(message: &str, source: sqlx::Error) -> Self {
        tracing::error!(error = %source, "{message}");
        Self::Store {
            message: message.to_string(),
            source,
        }
    }

    /// Check if this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Unconfigured(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "UNCONFIGURED", msg.clone())
            }
            // Already logged at wrap time; the message carries no driver detail.
            AppError::Store { message, .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR", message.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ApiResponse::<()> {
            data: None,
            error: Some(ApiError {
                code: code.to_string(),
                message,
            }),
        };

        (status, Json(body)).into_response()
    }
}
