//! Application Configuration
//!
//! Configuration for the Auth application layer. Signing secrets are
//! passed in explicitly; nothing here reads the environment.

use std::fmt;
use std::time::Duration;

use platform::password::{DEFAULT_HASH_COST, MAX_HASH_COST, MIN_HASH_COST};
use thiserror::Error;

use crate::application::token::TokenKind;

/// HMAC signing secret for one token class
#[derive(Clone)]
pub struct TokenSecret(String);

impl TokenSecret {
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenSecret([REDACTED])")
    }
}

/// Invalid auth configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} token secret must not be empty")]
    EmptySecret(TokenKind),

    #[error("access and refresh token secrets must differ")]
    SharedSecret,

    #[error("bcrypt cost must be between 10 and 31 (got {0})")]
    HashCostOutOfRange(u32),
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secret for access tokens
    pub access_secret: TokenSecret,
    /// Secret for refresh tokens (must differ from the access secret)
    pub refresh_secret: TokenSecret,
    /// Access token lifetime (15 minutes)
    pub access_ttl: Duration,
    /// Refresh token lifetime (7 days)
    pub refresh_ttl: Duration,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// `iss` claim written and required on every token
    pub issuer: String,
}

impl AuthConfig {
    pub const DEFAULT_ACCESS_TTL: Duration = Duration::from_secs(15 * 60);
    pub const DEFAULT_REFRESH_TTL: Duration = Duration::from_secs(7 * 24 * 3600);
    pub const DEFAULT_ISSUER: &'static str = "auth";

    /// Create config from the two signing secrets
    pub fn new(
        access_secret: impl Into<String>,
        refresh_secret: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let access_secret = access_secret.into();
        let refresh_secret = refresh_secret.into();

        if access_secret.is_empty() {
            return Err(ConfigError::EmptySecret(TokenKind::Access));
        }
        if refresh_secret.is_empty() {
            return Err(ConfigError::EmptySecret(TokenKind::Refresh));
        }
        if access_secret == refresh_secret {
            return Err(ConfigError::SharedSecret);
        }

        Ok(Self {
            access_secret: TokenSecret(access_secret),
            refresh_secret: TokenSecret(refresh_secret),
            access_ttl: Self::DEFAULT_ACCESS_TTL,
            refresh_ttl: Self::DEFAULT_REFRESH_TTL,
            bcrypt_cost: DEFAULT_HASH_COST,
            issuer: Self::DEFAULT_ISSUER.to_string(),
        })
    }

    /// Create config with random secrets (for development)
    ///
    /// Tokens do not survive a restart.
    pub fn development() -> Self {
        let access = platform::crypto::random_secret_hex(32);
        let refresh = platform::crypto::random_secret_hex(32);
        Self {
            access_secret: TokenSecret(access),
            refresh_secret: TokenSecret(refresh),
            access_ttl: Self::DEFAULT_ACCESS_TTL,
            refresh_ttl: Self::DEFAULT_REFRESH_TTL,
            bcrypt_cost: DEFAULT_HASH_COST,
            issuer: Self::DEFAULT_ISSUER.to_string(),
        }
    }

    pub fn with_access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = ttl;
        self
    }

    pub fn with_refresh_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_ttl = ttl;
        self
    }

    /// Costs below the default are refused; see [`Self::with_test_bcrypt_cost`]
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Result<Self, ConfigError> {
        if !(DEFAULT_HASH_COST..=MAX_HASH_COST).contains(&cost) {
            return Err(ConfigError::HashCostOutOfRange(cost));
        }
        self.bcrypt_cost = cost;
        Ok(self)
    }

    /// Cheapest cost bcrypt accepts. Test suites only.
    pub fn with_test_bcrypt_cost(mut self) -> Self {
        self.bcrypt_cost = MIN_HASH_COST;
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn secret(&self, kind: TokenKind) -> &TokenSecret {
        match kind {
            TokenKind::Access => &self.access_secret,
            TokenKind::Refresh => &self.refresh_secret,
        }
    }

    pub fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::new("access", "refresh").unwrap();
        assert_eq!(config.access_ttl, Duration::from_secs(900));
        assert_eq!(config.refresh_ttl, Duration::from_secs(604_800));
        assert_eq!(config.bcrypt_cost, 10);
        assert_eq!(config.ttl(TokenKind::Refresh), config.refresh_ttl);
    }

    #[test]
    fn test_secrets_must_be_distinct_and_present() {
        assert_eq!(
            AuthConfig::new("", "refresh").unwrap_err(),
            ConfigError::EmptySecret(TokenKind::Access)
        );
        assert_eq!(
            AuthConfig::new("access", "").unwrap_err(),
            ConfigError::EmptySecret(TokenKind::Refresh)
        );
        assert_eq!(
            AuthConfig::new("same", "same").unwrap_err(),
            ConfigError::SharedSecret
        );
    }

    #[test]
    fn test_development_secrets_differ() {
        let config = AuthConfig::development();
        assert_ne!(
            config.access_secret.as_bytes(),
            config.refresh_secret.as_bytes()
        );
    }

    #[test]
    fn test_bcrypt_cost_range() {
        let config = AuthConfig::new("a", "r").unwrap();
        assert_eq!(config.clone().with_bcrypt_cost(12).unwrap().bcrypt_cost, 12);
        assert_eq!(
            config.clone().with_bcrypt_cost(9).unwrap_err(),
            ConfigError::HashCostOutOfRange(9)
        );
        assert_eq!(
            config.clone().with_bcrypt_cost(4).unwrap_err(),
            ConfigError::HashCostOutOfRange(4)
        );
        assert_eq!(
            config.clone().with_bcrypt_cost(32).unwrap_err(),
            ConfigError::HashCostOutOfRange(32)
        );
        assert_eq!(config.with_test_bcrypt_cost().bcrypt_cost, MIN_HASH_COST);
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let config = AuthConfig::new("super-secret-a", "super-secret-r").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
    }
}
