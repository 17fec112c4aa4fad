//! Sign Up Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName,
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub user_id: String,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// All input checks run before the store is touched.
    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        if input.name.trim().is_empty()
            || input.email.trim().is_empty()
            || input.password.is_empty()
        {
            return Err(AuthError::validation("All fields are required"));
        }

        let name = DisplayName::new(&input.name)?;
        let email = Email::new(&input.email)?;
        let raw_password = RawPassword::new(input.password)?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let cost = self.config.bcrypt_cost;
        let password_hash =
            tokio::task::spawn_blocking(move || UserPassword::from_raw(&raw_password, cost))
                .await??;

        let user = User::new(name, email, password_hash);

        // A concurrent sign-up may still win the race; the store reports it
        // as EmailTaken.
        self.user_repo.create(&user).await?;

        tracing::info!(user_id = %user.user_id, "User signed up");

        Ok(SignUpOutput {
            user_id: user.user_id.to_string(),
        })
    }
}
