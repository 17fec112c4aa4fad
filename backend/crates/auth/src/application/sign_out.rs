//! Sign Out Use Case
//!
//! Revokes the user's refresh token. Access tokens already issued stay
//! valid until they expire.

use std::sync::Arc;

use crate::application::token::{TokenKind, TokenService};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::refresh_token_digest::RefreshTokenDigest;
use crate::error::{AuthError, AuthResult};

#[derive(Debug)]
pub struct SignOutOutput {
    /// `false` when the presented token had already been superseded or
    /// revoked, so there was nothing left to clear
    pub revoked: bool,
}

/// Sign out use case
pub struct SignOutUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenService>,
}

impl<U> SignOutUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenService>) -> Self {
        Self { user_repo, tokens }
    }

    pub async fn execute(&self, refresh_token: &str) -> AuthResult<SignOutOutput> {
        if refresh_token.is_empty() {
            return Err(AuthError::validation("Refresh token required"));
        }

        let user_id = self.tokens.verify_user(refresh_token, TokenKind::Refresh)?;

        if self.user_repo.find_by_id(&user_id).await?.is_none() {
            return Err(AuthError::UserNotFound);
        }

        // Only clear if the stored token is still this one, so a stale
        // logout cannot end a newer session.
        let digest = RefreshTokenDigest::of(refresh_token);
        let revoked = self
            .user_repo
            .compare_and_set_refresh_token(&user_id, &digest, None)
            .await?;

        if revoked {
            tracing::info!(user_id = %user_id, "User signed out");
        } else {
            tracing::debug!(user_id = %user_id, "Sign out with stale refresh token");
        }

        Ok(SignOutOutput { revoked })
    }
}
