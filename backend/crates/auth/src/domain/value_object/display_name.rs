//! Display Name Value Object
//!
//! Free-form name shown on the profile. Only trimmed; any non-empty text
//! is accepted.

use derive_more::Display;
use kernel::error::app_error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(name: impl AsRef<str>) -> AppResult<Self> {
        let name = name.as_ref().trim();

        if name.is_empty() {
            return Err(AppError::bad_request("All fields are required"));
        }

        Ok(Self(name.to_string()))
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_trimmed() {
        let name = DisplayName::new("  Ann ").unwrap();
        assert_eq!(name.as_str(), "Ann");
        assert_eq!(name.to_string(), "Ann");
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(DisplayName::new("").is_err());
        assert!(DisplayName::new(" \t ").is_err());
    }

    #[test]
    fn test_long_names_accepted() {
        let long = "Ann ".repeat(75);
        let name = DisplayName::new(&long).unwrap();
        assert_eq!(name.as_str(), long.trim());
        assert!(DisplayName::new("é".repeat(1000)).is_ok());
    }
}
