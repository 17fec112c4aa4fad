//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::application::{
    GetProfileUseCase, RefreshAccessTokenUseCase, SignInInput, SignInUseCase, SignOutUseCase,
    SignUpInput, SignUpUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    LoginRequest, LoginResponse, MessageResponse, ProfileResponse, RefreshResponse,
    RefreshTokenRequest, SignUpRequest, SignUpResponse,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenService>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AuthConfig) -> Self {
        let config = Arc::new(config);
        Self {
            repo: Arc::new(repo),
            tokens: Arc::new(TokenService::new(config.clone())),
            config,
        }
    }
}

// Manual impl: `R` itself need not be `Clone`.
impl<R> Clone for AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

/// Unwrap a JSON body, turning axum's rejection into a 400
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AuthResult<T> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected request body");
        AuthError::validation("Invalid request body")
    })
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> AuthResult<(StatusCode, Json<SignUpResponse>)>
where
    R: UserRepository + Send + Sync + 'static,
{
    let req = json_body(payload)?;
    let use_case = SignUpUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignUpInput {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            message: "User registered successfully".to_string(),
            user_id: output.user_id,
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let req = json_body(payload)?;
    let use_case = SignInUseCase::new(state.repo.clone(), state.tokens.clone());

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        message: "Login Successful".to_string(),
        access_token: output.access_token,
        refresh_token: output.refresh_token,
    }))
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /api/auth/refresh
pub async fn refresh<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> AuthResult<Json<RefreshResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let req = json_body(payload)?;
    let use_case = RefreshAccessTokenUseCase::new(state.repo.clone(), state.tokens.clone());

    let output = use_case.execute(&req.refresh_token).await?;

    Ok(Json(RefreshResponse {
        access_token: output.access_token,
    }))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
///
/// A genuine but already superseded token still gets 200; nothing is
/// cleared in that case.
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let req = json_body(payload)?;
    let use_case = SignOutUseCase::new(state.repo.clone(), state.tokens.clone());

    use_case.execute(&req.refresh_token).await?;

    Ok(Json(MessageResponse::new("Logged out successfully")))
}

// ============================================================================
// Profile (requires access token)
// ============================================================================

/// GET /api/auth/profile
pub async fn profile<R>(
    State(state): State<AuthAppState<R>>,
    CurrentUser(user_id): CurrentUser,
) -> AuthResult<Json<ProfileResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = GetProfileUseCase::new(state.repo.clone());
    let output = use_case.execute(&user_id).await?;

    Ok(Json(ProfileResponse {
        name: output.name,
        email: output.email,
    }))
}
