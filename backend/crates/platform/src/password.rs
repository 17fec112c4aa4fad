//! Password Policy and Hashing
//!
//! - Strength policy: at least 8 characters with upper case, lower case,
//!   digit and a non-alphanumeric character
//! - bcrypt hashing (salted, configurable cost; 10 is the floor for production)
//! - Zeroization of clear text on drop
//!
//! bcrypt only considers the first 72 bytes of input; longer passwords are
//! accepted and truncated by the algorithm.

use std::fmt;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// bcrypt work factor used by default
pub const DEFAULT_HASH_COST: u32 = 10;

/// Lowest work factor bcrypt accepts (tests only)
pub const MIN_HASH_COST: u32 = 4;

/// Highest work factor bcrypt accepts
pub const MAX_HASH_COST: u32 = 31;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password cannot be empty")]
    Empty,

    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must contain an uppercase letter")]
    MissingUppercase,

    #[error("Password must contain a lowercase letter")]
    MissingLowercase,

    #[error("Password must contain a number")]
    MissingDigit,

    #[error("Password must contain a special character")]
    MissingSpecial,
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Strength checks
// ============================================================================

/// Result of each individual strength rule
///
/// Exposed separately so that a form can show which rules still fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PasswordChecks {
    pub min_length: bool,
    pub uppercase: bool,
    pub lowercase: bool,
    pub number: bool,
    pub special: bool,
}

impl PasswordChecks {
    pub fn evaluate(password: &str) -> Self {
        Self {
            min_length: password.chars().count() >= MIN_PASSWORD_LENGTH,
            uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            number: password.chars().any(|c| c.is_ascii_digit()),
            special: password.chars().any(|c| !c.is_ascii_alphanumeric()),
        }
    }

    pub fn is_strong(&self) -> bool {
        self.min_length && self.uppercase && self.lowercase && self.number && self.special
    }

    /// First failing rule, in the order a user would fix them
    fn first_violation(&self, password: &str) -> Option<PasswordPolicyError> {
        if password.is_empty() {
            return Some(PasswordPolicyError::Empty);
        }
        if !self.min_length {
            return Some(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: password.chars().count(),
            });
        }
        if !self.uppercase {
            return Some(PasswordPolicyError::MissingUppercase);
        }
        if !self.lowercase {
            return Some(PasswordPolicyError::MissingLowercase);
        }
        if !self.number {
            return Some(PasswordPolicyError::MissingDigit);
        }
        if !self.special {
            return Some(PasswordPolicyError::MissingSpecial);
        }
        None
    }
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Does not implement `Clone`; debug output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Validate against the strength policy
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let checks = PasswordChecks::evaluate(&raw);
        if let Some(violation) = checks.first_violation(&raw) {
            let mut raw = raw;
            raw.zeroize();
            return Err(violation);
        }
        Ok(Self(raw))
    }

    /// Wrap without policy checks
    ///
    /// Used for login attempts: stored hashes are the only authority there, and
    /// policy changes must not lock out existing accounts.
    pub fn unchecked(raw: String) -> Self {
        Self(raw)
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash with bcrypt at the given cost
    ///
    /// CPU bound; async callers should run this on a blocking thread.
    pub fn hash(&self, cost: u32) -> Result<HashedPassword, PasswordHashError> {
        let cost = cost.clamp(MIN_HASH_COST, MAX_HASH_COST);
        let hash = bcrypt::hash(self.as_bytes(), cost)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;
        Ok(HashedPassword { hash })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// bcrypt hash in modular crypt format (`$2b$<cost>$<salt+hash>`)
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from a stored hash string
    pub fn from_hash_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        // $2b$10$ + 53 chars of salt and digest
        let well_formed = hash.len() == 60
            && hash.starts_with("$2")
            && hash.as_bytes().get(3) == Some(&b'$')
            && hash.as_bytes().get(6) == Some(&b'$');
        if !well_formed {
            return Err(PasswordHashError::InvalidHashFormat);
        }
        Ok(Self { hash })
    }

    pub fn as_hash_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash
    ///
    /// A malformed hash never verifies.
    pub fn verify(&self, password: &ClearTextPassword) -> bool {
        bcrypt::verify(password.as_bytes(), &self.hash).unwrap_or(false)
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
