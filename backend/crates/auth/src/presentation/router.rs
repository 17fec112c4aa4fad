//! Auth Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_access_token;

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgUserRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    let state = AuthAppState::new(repo, config);

    let protected = Router::new()
        .route("/profile", get(handlers::profile::<R>))
        .route_layer(from_fn_with_state(
            state.tokens.clone(),
            require_access_token,
        ));

    Router::new()
        .route("/signup", post(handlers::sign_up::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/refresh", post(handlers::refresh::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .merge(protected)
        .with_state(state)
}
