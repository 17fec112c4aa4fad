//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Token Service, use cases, configuration
//! - `infra/` - Credential store implementations (PostgreSQL, in-memory)
//! - `presentation/` - HTTP handlers, DTOs, middleware, router
//!
//! ## Features
//! - Signup / login with email + password
//! - Short-lived access tokens, long-lived refresh tokens (separate secrets)
//! - Exactly one valid refresh token per user; login replaces it, logout clears it
//! - Bearer-token middleware for protected routes
//!
//! ## Security Model
//! - Passwords hashed with bcrypt (cost ≥ 10 outside tests)
//! - Refresh tokens stored as SHA-256 digests, compared in constant time
//! - One generic message for unknown email and wrong password

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{AuthConfig, ConfigError};
pub use application::token::{Claims, TokenKind, TokenService};
pub use error::{AuthError, AuthResult};
pub use infra::{memory::InMemoryUserRepository, postgres::PgUserRepository};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
