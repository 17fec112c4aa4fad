//! Token Service
//!
//! Issues and verifies HS256-signed JWTs. Access and refresh tokens are
//! signed with different secrets, so one can never stand in for the other.
//!
//! Claims: `userId`, `iat`, `exp`, `iss`, plus a random `jti` so two tokens
//! issued to the same user within one second are still distinct.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Token class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

/// Signed claim set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Issued at (seconds since epoch)
    pub iat: i64,
    /// Expires at (seconds since epoch)
    pub exp: i64,
    pub iss: String,
    pub jti: String,
}

impl Claims {
    /// Parse the embedded user id
    pub fn user_id(&self) -> Option<UserId> {
        UserId::parse_str(&self.user_id).ok()
    }
}

struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl KeyPair {
    fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// Stateless issuer/verifier for both token classes
pub struct TokenService {
    config: Arc<AuthConfig>,
    access: KeyPair,
    refresh: KeyPair,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss"]);

        Self {
            access: KeyPair::from_secret(config.access_secret.as_bytes()),
            refresh: KeyPair::from_secret(config.refresh_secret.as_bytes()),
            validation,
            config,
        }
    }

    /// Short-lived token authorizing API requests
    pub fn issue_access_token(&self, user_id: &UserId) -> AuthResult<String> {
        self.issue(TokenKind::Access, user_id)
    }

    /// Long-lived token exchangeable for new access tokens
    pub fn issue_refresh_token(&self, user_id: &UserId) -> AuthResult<String> {
        self.issue(TokenKind::Refresh, user_id)
    }

    /// Verify signature, issuer and expiry against the secret of `kind`
    pub fn verify(&self, token: &str, kind: TokenKind) -> AuthResult<Claims> {
        decode::<Claims>(token, &self.keys(kind).decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(token_kind = %kind, error = %e, "Token rejected");
                AuthError::InvalidToken(kind)
            })
    }

    /// Verify and extract the user id in one step
    pub fn verify_user(&self, token: &str, kind: TokenKind) -> AuthResult<UserId> {
        self.verify(token, kind)?
            .user_id()
            .ok_or(AuthError::InvalidToken(kind))
    }

    fn issue(&self, kind: TokenKind, user_id: &UserId) -> AuthResult<String> {
        let now = Utc::now().timestamp();
        let ttl = i64::try_from(self.config.ttl(kind).as_secs())
            .map_err(|_| AuthError::Internal(format!("{kind} token TTL out of range")))?;

        let claims = Claims {
            user_id: user_id.to_string(),
            iat: now,
            exp: now.saturating_add(ttl),
            iss: self.config.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        self.sign(kind, &claims)
    }

    fn sign(&self, kind: TokenKind, claims: &Claims) -> AuthResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.keys(kind).encoding)
            .map_err(|e| AuthError::Internal(format!("Failed to sign {kind} token: {e}")))
    }

    fn keys(&self, kind: TokenKind) -> &KeyPair {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }
}
