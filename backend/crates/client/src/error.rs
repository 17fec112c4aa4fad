//! Client Error Types

use thiserror::Error;

use crate::store::StoreError;

pub type ClientResult<T> = Result<T, ClientError>;

pub const UNREACHABLE_MESSAGE: &str = "Unable to reach the server. Please check your connection.";
pub const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again in a moment.";
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";

#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected locally before any request was sent
    #[error("{0}")]
    Validation(&'static str),

    /// Transport failure or undecodable response
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status; `message` is the server's `message` field
    #[error("server responded {status}: {}", message.as_deref().unwrap_or("no message"))]
    Api { status: u16, message: Option<String> },

    /// Access token rejected and the refresh token no longer accepted
    #[error("session expired")]
    SessionExpired,

    #[error("not logged in")]
    NotLoggedIn,

    #[error("invalid response: {0}")]
    InvalidResponse(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Text to show a user
    ///
    /// The server's own message wins; otherwise `status_messages`, then a
    /// generic 5xx text, then `fallback`.
    pub fn user_message(&self, fallback: &str, status_messages: &[(u16, &str)]) -> String {
        match self {
            ClientError::Validation(msg) | ClientError::InvalidResponse(msg) => msg.to_string(),
            ClientError::Http(e) if !e.is_decode() => UNREACHABLE_MESSAGE.to_string(),
            ClientError::Api { status, message } => {
                if let Some(message) = message.as_deref().filter(|m| !m.trim().is_empty()) {
                    return message.to_string();
                }
                if let Some((_, text)) = status_messages.iter().find(|(s, _)| s == status) {
                    return text.to_string();
                }
                if *status >= 500 {
                    return SERVER_ERROR_MESSAGE.to_string();
                }
                fallback.to_string()
            }
            ClientError::SessionExpired | ClientError::NotLoggedIn => {
                SESSION_EXPIRED_MESSAGE.to_string()
            }
            _ => fallback.to_string(),
        }
    }

    pub fn signup_message(&self) -> String {
        self.user_message(
            "Signup failed.",
            &[
                (400, "Please check your input and try again."),
                (409, "User already exists. Please login with this email."),
                (429, "Too many attempts. Please try again later."),
            ],
        )
    }

    pub fn login_message(&self) -> String {
        self.user_message(
            "Login failed.",
            &[
                (400, "All fields are required."),
                (401, "Invalid email or password."),
                (429, "Too many attempts. Please try again later."),
            ],
        )
    }
}
