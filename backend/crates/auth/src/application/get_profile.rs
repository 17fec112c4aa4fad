//! Get Profile Use Case

use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Public profile: never includes the password hash
pub struct ProfileOutput {
    pub name: String,
    pub email: String,
}

pub struct GetProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> GetProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> AuthResult<ProfileOutput> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(ProfileOutput {
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
        })
    }
}
