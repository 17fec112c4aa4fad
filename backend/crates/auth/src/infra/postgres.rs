//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName, email::Email, refresh_token_digest::RefreshTokenDigest,
    user_id::UserId, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL unique_violation
const UNIQUE_VIOLATION: &str = "23505";

const USER_COLUMNS: &str = r#"
    user_id,
    name,
    email,
    password_hash,
    refresh_token_hash,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply `database/migrations`
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../../database/migrations")
            .run(&self.pool)
            .await
    }
}

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                name,
                email,
                password_hash,
                refresh_token_hash,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_hash_string())
        .bind(user.refresh_token.as_ref().map(RefreshTokenDigest::as_str))
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            // The unique index on email decides concurrent sign-ups.
            Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                Err(AuthError::EmailTaken)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn set_refresh_token(
        &self,
        user_id: &UserId,
        digest: Option<&RefreshTokenDigest>,
    ) -> AuthResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE users
            SET refresh_token_hash = $2, updated_at = $3
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(digest.map(RefreshTokenDigest::as_str))
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn compare_and_set_refresh_token(
        &self,
        user_id: &UserId,
        expected: &RefreshTokenDigest,
        new: Option<&RefreshTokenDigest>,
    ) -> AuthResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE users
            SET refresh_token_hash = $3, updated_at = $4
            WHERE user_id = $1 AND refresh_token_hash = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(expected.as_str())
        .bind(new.map(RefreshTokenDigest::as_str))
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    refresh_token_hash: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password_hash = UserPassword::from_hash_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password_hash: {}", e)))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            name: DisplayName::from_db(self.name),
            email: Email::from_db(self.email),
            password_hash,
            refresh_token: self.refresh_token_hash.map(RefreshTokenDigest::from_db),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
