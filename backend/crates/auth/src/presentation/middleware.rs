//! Auth Middleware
//!
//! Gate for protected routes: a request passes only with a valid
//! `Authorization: Bearer <access token>` header.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::{HeaderMap, header, request::Parts};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use crate::application::token::{Claims, TokenKind, TokenService};
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthError;

const BEARER_PREFIX: &str = "Bearer ";

/// Middleware that requires a valid access token
///
/// On success the verified [`Claims`] (reachable via `Extension<Claims>`)
/// and a [`CurrentUser`] are stored in the request extensions. Nothing is kept between requests.
pub async fn require_access_token(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(req.headers()).ok_or(AuthError::MissingBearerToken)?;

    let claims: Claims = tokens.verify(token, TokenKind::Access)?;
    let user_id = claims
        .user_id()
        .ok_or(AuthError::InvalidToken(TokenKind::Access))?;

    req.extensions_mut().insert(CurrentUser(user_id));
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Token part of an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Authenticated user, available behind [`require_access_token`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub UserId);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Absent only when a route was mounted without the middleware.
        parts
            .extensions
            .get::<CurrentUser>()
            .copied()
            .ok_or(AuthError::MissingBearerToken)
    }
}
