//! Refresh Access Token Use Case
//!
//! Exchanges the user's current refresh token for a new access token.
//! The refresh token itself is not rotated.

use std::sync::Arc;

use crate::application::token::{TokenKind, TokenService};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct RefreshOutput {
    pub access_token: String,
}

pub struct RefreshAccessTokenUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenService>,
}

impl<U> RefreshAccessTokenUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenService>) -> Self {
        Self { user_repo, tokens }
    }

    /// - missing token → 401
    /// - bad signature / expired → 401
    /// - genuine but not the one on record (logged out, superseded by a
    ///   later login, or user gone) → 403
    pub async fn execute(&self, refresh_token: &str) -> AuthResult<RefreshOutput> {
        if refresh_token.is_empty() {
            return Err(AuthError::MissingRefreshToken);
        }

        let user_id = self.tokens.verify_user(refresh_token, TokenKind::Refresh)?;

        let user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::RefreshTokenRevoked)?;

        if !user.holds_refresh_token(refresh_token) {
            return Err(AuthError::RefreshTokenRevoked);
        }

        let access_token = self.tokens.issue_access_token(&user.user_id)?;

        tracing::debug!(user_id = %user.user_id, "Access token refreshed");

        Ok(RefreshOutput { access_token })
    }
}
