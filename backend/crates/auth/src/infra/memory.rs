//! In-Memory Repository
//!
//! Process-local credential store for development runs without a database
//! and for tests. Same uniqueness and compare-and-set guarantees as the
//! PostgreSQL store.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, refresh_token_digest::RefreshTokenDigest, user_id::UserId,
};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Inner {
    users: HashMap<UserId, User>,
    by_email: HashMap<String, UserId>,
}

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Remove a user (account deletion is not exposed over HTTP)
    pub async fn remove(&self, user_id: &UserId) -> Option<User> {
        let mut inner = self.inner.write().await;
        let user = inner.users.remove(user_id)?;
        inner.by_email.remove(user.email.as_str());
        Some(user)
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut inner = self.inner.write().await;

        if inner.by_email.contains_key(user.email.as_str()) {
            return Err(AuthError::EmailTaken);
        }

        inner
            .by_email
            .insert(user.email.as_str().to_string(), user.user_id);
        inner.users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.inner.read().await.users.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .by_email
            .get(email.as_str())
            .and_then(|id| inner.users.get(id))
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.inner.read().await.by_email.contains_key(email.as_str()))
    }

    async fn set_refresh_token(
        &self,
        user_id: &UserId,
        digest: Option<&RefreshTokenDigest>,
    ) -> AuthResult<bool> {
        let mut inner = self.inner.write().await;
        let Some(user) = inner.users.get_mut(user_id) else {
            return Ok(false);
        };

        user.refresh_token = digest.cloned();
        user.updated_at = Utc::now();
        Ok(true)
    }

    async fn compare_and_set_refresh_token(
        &self,
        user_id: &UserId,
        expected: &RefreshTokenDigest,
        new: Option<&RefreshTokenDigest>,
    ) -> AuthResult<bool> {
        let mut inner = self.inner.write().await;
        let Some(user) = inner.users.get_mut(user_id) else {
            return Ok(false);
        };

        let current = user.refresh_token.as_ref();
        if !current.is_some_and(|digest| digest.ct_eq(expected)) {
            return Ok(false);
        }

        user.refresh_token = new.cloned();
        user.updated_at = Utc::now();
        Ok(true)
    }
}
