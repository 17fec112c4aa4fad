//! Sign In Use Case
//!
//! Checks credentials, issues an access/refresh token pair and records the
//! refresh token as the user's only valid one.

use std::sync::Arc;

use crate::application::token::TokenService;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, refresh_token_digest::RefreshTokenDigest, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    pub user_id: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// Sign in use case
pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenService>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenService>) -> Self {
        Self { user_repo, tokens }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        if input.email.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::validation("All fields are required"));
        }

        let email = Email::new(&input.email)?;

        // Unknown email and wrong password must be indistinguishable.
        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let raw_password = RawPassword::for_verification(input.password);
        let password_hash = user.password_hash.clone();
        let password_valid =
            tokio::task::spawn_blocking(move || password_hash.verify(&raw_password)).await?;

        if !password_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.tokens.issue_access_token(&user.user_id)?;
        let refresh_token = self.tokens.issue_refresh_token(&user.user_id)?;

        // Overwrites any earlier token: the previous session's refresh token
        // stops working from here on.
        let digest = RefreshTokenDigest::of(&refresh_token);
        if !self
            .user_repo
            .set_refresh_token(&user.user_id, Some(&digest))
            .await?
        {
            // Deleted between lookup and update
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInOutput {
            user_id: user.user_id.to_string(),
            access_token,
            refresh_token,
        })
    }
}
