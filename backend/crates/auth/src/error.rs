//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::application::token::TokenKind;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Message shared by every credential failure so callers cannot tell
/// an unknown email from a wrong password.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    /// Email already registered
    #[error("User already exists")]
    EmailTaken,

    /// Unknown email or wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// No refresh token in the request body
    #[error("Refresh Token required")]
    MissingRefreshToken,

    /// No usable `Authorization: Bearer` header
    #[error("Access Denied!!! Invalid token")]
    MissingBearerToken,

    /// Bad signature, malformed or expired token
    #[error("{}", invalid_token_message(.0))]
    InvalidToken(TokenKind),

    /// Refresh token is genuine but no longer the one on record
    #[error("Refresh token not recognized")]
    RefreshTokenRevoked,

    /// User referenced by a token no longer exists
    #[error("User not found")]
    UserNotFound,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error (details are logged, never returned)
    #[error("Internal error: {0}")]
    Internal(String),
}

fn invalid_token_message(kind: &TokenKind) -> &'static str {
    match kind {
        TokenKind::Access => "Invalid token",
        TokenKind::Refresh => "Invalid or expired refresh token",
    }
}

impl AuthError {
    pub fn validation(message: impl Into<String>) -> Self {
        AuthError::Validation(message.into())
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::MissingRefreshToken
            | AuthError::MissingBearerToken
            | AuthError::InvalidToken(_) => ErrorKind::Unauthorized,
            AuthError::RefreshTokenRevoked => ErrorKind::Forbidden,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Database errors go through the kernel's sqlx mapping so that pool
    /// exhaustion surfaces as 503 and a racing duplicate email as 409.
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::Database(e) => {
                let mapped = AppError::from(e);
                match mapped.kind() {
                    ErrorKind::Conflict => AppError::conflict("User already exists"),
                    ErrorKind::ServiceUnavailable => {
                        AppError::service_unavailable("Service temporarily unavailable")
                    }
                    _ => AppError::internal("Server error"),
                }
            }
            AuthError::Internal(_) => AppError::internal("Server error"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::RefreshTokenRevoked => {
                tracing::warn!("Revoked or superseded refresh token presented");
            }
            AuthError::InvalidToken(kind) => {
                tracing::debug!(token_kind = ?kind, "Token verification failed");
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
        self.into_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    /// Value objects report bad input as 400; anything else is internal.
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Internal(format!("Blocking task failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::validation("x").kind().status_code(), 400);
        assert_eq!(AuthError::EmailTaken.kind().status_code(), 409);
        assert_eq!(AuthError::InvalidCredentials.kind().status_code(), 401);
        assert_eq!(AuthError::MissingRefreshToken.kind().status_code(), 401);
        assert_eq!(
            AuthError::InvalidToken(TokenKind::Refresh)
                .kind()
                .status_code(),
            401
        );
        assert_eq!(AuthError::RefreshTokenRevoked.kind().status_code(), 403);
        assert_eq!(AuthError::UserNotFound.kind().status_code(), 404);
        assert_eq!(
            AuthError::Internal("boom".into()).kind().status_code(),
            500
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let app = AuthError::Internal("bcrypt exploded".into()).into_app_error();
        assert_eq!(app.message(), "Server error");
    }

    #[test]
    fn test_token_messages_depend_on_kind() {
        assert_eq!(
            AuthError::InvalidToken(TokenKind::Access).to_string(),
            "Invalid token"
        );
        assert_eq!(
            AuthError::InvalidToken(TokenKind::Refresh).to_string(),
            "Invalid or expired refresh token"
        );
    }

    #[test]
    fn test_credentials_message_is_fixed() {
        assert_eq!(
            AuthError::InvalidCredentials.into_app_error().message(),
            INVALID_CREDENTIALS_MESSAGE
        );
    }

    #[test]
    fn test_bad_request_app_error_becomes_validation() {
        let err: AuthError = AppError::bad_request("Invalid email format").into();
        assert!(matches!(err, AuthError::Validation(ref m) if m == "Invalid email format"));

        let err: AuthError = AppError::internal("oops").into();
        assert!(matches!(err, AuthError::Internal(_)));
    }
}
