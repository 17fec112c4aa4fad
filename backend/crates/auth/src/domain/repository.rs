//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the
//! infrastructure layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::{
    email::Email, refresh_token_digest::RefreshTokenDigest, user_id::UserId,
};
use crate::error::AuthResult;

/// User (credential store) repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    ///
    /// Fails with `AuthError::EmailTaken` when the email is already stored,
    /// including when another request registered it in the meantime.
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by normalized email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if email is registered
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Overwrite the stored refresh token digest (`None` clears it)
    ///
    /// Last writer wins. Returns `false` if the user does not exist.
    async fn set_refresh_token(
        &self,
        user_id: &UserId,
        digest: Option<&RefreshTokenDigest>,
    ) -> AuthResult<bool>;

    /// Replace the stored digest only if it still equals `expected`
    ///
    /// Returns `true` if the swap happened.
    async fn compare_and_set_refresh_token(
        &self,
        user_id: &UserId,
        expected: &RefreshTokenDigest,
        new: Option<&RefreshTokenDigest>,
    ) -> AuthResult<bool>;
}
