//! User Password Value Object
//!
//! Domain wrapper around `platform::password`.
//!
//! - Strength policy on sign-up only; sign-in accepts any input and lets the
//!   stored hash decide
//! - bcrypt hashing with the configured cost
//! - Clear text zeroized on drop, redacted in `Debug`

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{ClearTextPassword, HashedPassword, PasswordHashError};
use std::fmt;

/// Single message for every strength-rule failure
pub const PASSWORD_POLICY_MESSAGE: &str = "Password must be at least 8 characters and include uppercase, lowercase, number, and special character";

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password that satisfies the strength policy
    ///
    /// The specific rule that failed goes into `action`; the message stays
    /// the same for every rule.
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| {
            AppError::bad_request(PASSWORD_POLICY_MESSAGE).with_action(e.to_string())
        })?;

        Ok(Self(clear_text))
    }

    /// Wrap a login attempt without policy checks
    pub fn for_verification(raw: String) -> Self {
        Self(ClearTextPassword::unchecked(raw))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password for database storage
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password
    ///
    /// CPU bound; use cases run it via `spawn_blocking`.
    pub fn from_raw(raw: &RawPassword, cost: u32) -> AppResult<Self> {
        let hashed = raw.0.hash(cost).map_err(|e| match e {
            PasswordHashError::HashingFailed(msg) => {
                AppError::internal(format!("Password hashing failed: {}", msg))
            }
            _ => AppError::internal("Unexpected error during password hashing"),
        })?;

        Ok(Self(hashed))
    }

    /// Create from a stored hash string
    pub fn from_hash_string(hash: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_hash_string(hash)
            .map_err(|_| AppError::internal("Invalid password hash in database"))?;

        Ok(Self(hashed))
    }

    pub fn as_hash_string(&self) -> &str {
        self.0.as_hash_string()
    }

    /// Verify a raw password against this hash
    ///
    /// CPU bound; use cases run it via `spawn_blocking`.
    pub fn verify(&self, raw: &RawPassword) -> bool {
        self.0.verify(&raw.0)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::MIN_HASH_COST;

    #[test]
    fn test_raw_password_validation() {
        assert!(RawPassword::new("Abcd123!".to_string()).is_ok());

        for weak in ["", "Ab1!", "abcd123!", "ABCD123!", "Abcdefg!", "Abcd1234"] {
            let err = RawPassword::new(weak.to_string()).unwrap_err();
            assert_eq!(err.message(), PASSWORD_POLICY_MESSAGE, "input: {weak:?}");
            assert!(err.action().is_some());
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, MIN_HASH_COST).unwrap();

        assert!(hashed.verify(&raw));

        let wrong = RawPassword::for_verification("WrongPassword123!".to_string());
        assert!(!hashed.verify(&wrong));
    }

    #[test]
    fn test_weak_input_still_verifies_against_hash() {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, MIN_HASH_COST).unwrap();

        let attempt = RawPassword::for_verification("x".to_string());
        assert!(!hashed.verify(&attempt));
    }

    #[test]
    fn test_hash_string_roundtrip() {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, MIN_HASH_COST).unwrap();

        let restored = UserPassword::from_hash_string(hashed.as_hash_string()).unwrap();
        assert!(restored.verify(&raw));
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("SecretPassword123!".to_string()).unwrap();
        let debug = format!("{:?}", raw);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("Secret"));

        let hashed = UserPassword::from_raw(&raw, MIN_HASH_COST).unwrap();
        assert!(format!("{:?}", hashed).contains("HASH"));
    }
}
