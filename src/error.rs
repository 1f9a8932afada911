//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Credential failures (401)
    #[error("Missing Authorization header")]
    MissingCredential,

    #[error("Malformed Authorization header")]
    MalformedCredential,

    #[error("Invalid or expired token")]
    InvalidOrExpiredCredential,

    // Date-range validation failures (400)
    #[error("startDate and endDate query parameters are required")]
    MissingDateRange,

    #[error("Dates must be in YYYY-MM-DD format")]
    InvalidDateFormat,

    // Server errors (5xx)
    #[error("Error fetching transactions: {0}")]
    Query(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Error response body: `{"message": "<human-readable text>"}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl AppError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingCredential
            | AppError::MalformedCredential
            | AppError::InvalidOrExpiredCredential => StatusCode::UNAUTHORIZED,

            AppError::MissingDateRange | AppError::InvalidDateFormat => StatusCode::BAD_REQUEST,

            AppError::Query(_) | AppError::Internal(_) | AppError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Driver and internal errors are logged in full server-side and
        // never echoed verbatim to the caller.
        let message = match &self {
            AppError::Query(e) => {
                tracing::error!("Transaction query failed: {:?}", e);
                "Error fetching transactions".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            AppError::Config(e) => {
                tracing::error!("Config error: {:?}", e);
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_errors_are_unauthorized() {
        assert_eq!(AppError::MissingCredential.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::MalformedCredential.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::InvalidOrExpiredCredential.status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_date_errors_are_bad_request() {
        assert_eq!(AppError::MissingDateRange.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidDateFormat.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_query_error_is_internal_and_generic() {
        let err = AppError::Query(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
