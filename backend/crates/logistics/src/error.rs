//! Logistics Error Types

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::kind::ErrorKind;
use thiserror::Error;

/// Result type for logistics operations
pub type LogisticsResult<T> = Result<T, LogisticsError>;

/// Logistics service errors
#[derive(Debug, Error)]
pub enum LogisticsError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LogisticsError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LogisticsError::NotFound(_) => StatusCode::NOT_FOUND,
            LogisticsError::Validation(_) => StatusCode::BAD_REQUEST,
            LogisticsError::Conflict(_) => StatusCode::CONFLICT,
            LogisticsError::Database(_) | LogisticsError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LogisticsError::NotFound(_) => ErrorKind::NotFound,
            LogisticsError::Validation(_) => ErrorKind::BadRequest,
            LogisticsError::Conflict(_) => ErrorKind::Conflict,
            LogisticsError::Database(_) | LogisticsError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Message safe to show to API consumers. Backend faults are masked.
    pub fn user_message(&self) -> String {
        match self {
            LogisticsError::Database(_) | LogisticsError::Internal(_) => {
                "Something went wrong".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for LogisticsError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "logistics request failed");
        } else {
            tracing::debug!(error = %self, "logistics request rejected");
        }

        let body = serde_json::json!({
            "error": self.kind().as_str(),
            "message": self.user_message(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            LogisticsError::NotFound("shipment").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            LogisticsError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            LogisticsError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_are_masked() {
        let err = LogisticsError::Internal("connection pool exhausted".into());
        assert_eq!(err.user_message(), "Something went wrong");
    }
}
