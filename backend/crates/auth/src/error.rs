//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email unknown or password mismatch (deliberately indistinguishable)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// User has an active ban; carries the configured user-facing message
    #[error("{0}")]
    AccountBanned(String),

    /// Too many attempts from the same key within the window
    #[error("Too many requests. Please try again later")]
    RateLimited,

    /// Password appears in a known breach; carries the remediation message
    #[error("{0}")]
    CompromisedPassword(String),

    /// Session missing, malformed, or past its expiry
    #[error("Session expired")]
    SessionExpired,

    /// Caller lacks the required role
    #[error("Unauthorized")]
    Unauthorized,

    /// Email already registered
    #[error("Email is already registered")]
    EmailTaken,

    /// Input validation failure (email format, password policy)
    #[error("{0}")]
    Validation(String),

    /// Verification token unknown or expired
    #[error("Verification token is invalid or expired")]
    InvalidVerification,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials | AuthError::SessionExpired => StatusCode::UNAUTHORIZED,
            AuthError::AccountBanned(_) | AuthError::Unauthorized => StatusCode::FORBIDDEN,
            AuthError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AuthError::CompromisedPassword(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AuthError::EmailTaken => StatusCode::CONFLICT,
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidVerification => StatusCode::GONE,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials | AuthError::SessionExpired => ErrorKind::Unauthorized,
            AuthError::AccountBanned(_) | AuthError::Unauthorized => ErrorKind::Forbidden,
            AuthError::RateLimited => ErrorKind::TooManyRequests,
            AuthError::CompromisedPassword(_) => ErrorKind::UnprocessableEntity,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::InvalidVerification => ErrorKind::Gone,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Message shown to end users by the sign-in action handler.
    ///
    /// Storage and internal failures degrade to a generic message; typed
    /// failures keep their own wording so a banned user and a rate-limited
    /// user see different texts.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Database(_) | AuthError::Internal(_) => "Something went wrong".to_string(),
            other => other.to_string(),
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid sign-in attempt");
            }
            AuthError::AccountBanned(_) => {
                tracing::warn!("Sign-in attempt on banned account");
            }
            AuthError::RateLimited => {
                tracing::warn!("Rate limit exceeded");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Validation(err.message().to_string())
    }
}

impl From<platform::password::PasswordPolicyError> for AuthError {
    fn from(err: platform::password::PasswordPolicyError) -> Self {
        AuthError::Validation(err.to_string())
    }
}

impl From<platform::password::PasswordHashError> for AuthError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::AccountBanned("banned".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AuthError::RateLimited.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(AuthError::EmailTaken.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_user_message_fallback() {
        assert_eq!(
            AuthError::Internal("boom".into()).user_message(),
            "Something went wrong"
        );
        assert_eq!(
            AuthError::InvalidCredentials.user_message(),
            "Invalid credentials"
        );
    }

    #[test]
    fn test_ban_message_distinct_from_invalid_credentials() {
        let ban = AuthError::AccountBanned(
            "Your account has been suspended, contact Evans for support".to_string(),
        );
        assert_ne!(
            ban.user_message(),
            AuthError::InvalidCredentials.user_message()
        );
        assert!(ban.user_message().contains("suspended"));
    }
}
