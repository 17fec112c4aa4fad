//! User Entity
//!
//! The single record kept per account: profile, credentials and the
//! digest of the one refresh token currently honoured.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    display_name::DisplayName, email::Email, refresh_token_digest::RefreshTokenDigest,
    user_id::UserId, user_password::UserPassword,
};

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub name: DisplayName,
    /// Unique, normalized
    pub email: Email,
    pub password_hash: UserPassword,
    /// `None` until the first login and after logout
    pub refresh_token: Option<RefreshTokenDigest>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with no active refresh token
    pub fn new(name: DisplayName, email: Email, password_hash: UserPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            name,
            email,
            password_hash,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `token` is the refresh token currently on record
    pub fn holds_refresh_token(&self, token: &str) -> bool {
        self.refresh_token
            .as_ref()
            .is_some_and(|digest| digest.matches(token))
    }
}
