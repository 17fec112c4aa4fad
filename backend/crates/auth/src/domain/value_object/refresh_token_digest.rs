//! Refresh Token Digest
//!
//! What the credential store keeps instead of the refresh token itself:
//! the SHA-256 of the encoded token, hex encoded. A presented token is
//! "the current one" iff its digest equals the stored digest.

use platform::crypto::{constant_time_eq, sha256_hex};
use std::fmt;

#[derive(Clone)]
pub struct RefreshTokenDigest(String);

impl RefreshTokenDigest {
    pub fn of(token: &str) -> Self {
        Self(sha256_hex(token.as_bytes()))
    }

    pub fn from_db(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Constant-time check of a presented token against this digest
    pub fn matches(&self, token: &str) -> bool {
        let presented = sha256_hex(token.as_bytes());
        constant_time_eq(presented.as_bytes(), self.0.as_bytes())
    }

    /// Constant-time digest comparison
    pub fn ct_eq(&self, other: &Self) -> bool {
        constant_time_eq(self.0.as_bytes(), other.0.as_bytes())
    }
}

impl PartialEq for RefreshTokenDigest {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other)
    }
}

impl Eq for RefreshTokenDigest {}

impl fmt::Debug for RefreshTokenDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Enough to correlate log lines, not enough to matter.
        let prefix = self.0.get(..8).unwrap_or("");
        write!(f, "RefreshTokenDigest({prefix}…)")
    }
}
