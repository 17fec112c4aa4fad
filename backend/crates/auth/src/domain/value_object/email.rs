//! Email Value Object
//!
//! Login identifier. Stored and compared in its normalized form:
//! surrounding whitespace removed, lower case.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Create a new email with validation
    pub fn new(email: impl AsRef<str>) -> AppResult<Self> {
        let email = Self::normalize(email.as_ref());

        if email.is_empty() {
            return Err(AppError::bad_request("All fields are required"));
        }

        if email.len() > EMAIL_MAX_LENGTH || !Self::is_valid_format(&email) {
            return Err(AppError::bad_request("Invalid email format")
                .with_action("Please enter a valid email address"));
        }

        Ok(Self(email))
    }

    /// Trim and lowercase
    pub fn normalize(email: &str) -> String {
        email.trim().to_lowercase()
    }

    /// `local@domain.tld`: no whitespace, exactly one `@`, and a dot inside
    /// the domain with at least one character on each side
    fn is_valid_format(email: &str) -> bool {
        if email.chars().any(char::is_whitespace) {
            return false;
        }

        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        if local.is_empty() || domain.contains('@') {
            return false;
        }

        domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_db(self) -> String {
        self.0
    }
}

impl FromStr for Email {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        assert!(Email::new("user@example.com").is_ok());
        assert!(Email::new("user.name@example.co.jp").is_ok());
        assert!(Email::new("user+tag@example.com").is_ok());
        assert!(Email::new("a@b.c").is_ok());
    }

    #[test]
    fn test_email_invalid() {
        assert!(Email::new("userexample.com").is_err());
        assert!(Email::new("user@").is_err());
        assert!(Email::new("@example.com").is_err());
        assert!(Email::new("user@@example.com").is_err());
        assert!(Email::new("user@example").is_err());
        assert!(Email::new("user@.com").is_err());
        assert!(Email::new("user@example.").is_err());
        assert!(Email::new("us er@example.com").is_err());
    }

    #[test]
    fn test_empty_email_reports_missing_field() {
        let err = Email::new("   ").unwrap_err();
        assert_eq!(err.message(), "All fields are required");

        let err = Email::new("nope").unwrap_err();
        assert_eq!(err.message(), "Invalid email format");
    }

    #[test]
    fn test_email_case_normalization() {
        let email = Email::new("  ANN@X.com ").unwrap();
        assert_eq!(email.as_str(), "ann@x.com");
    }
}
