//! API DTOs (Data Transfer Objects)
//!
//! Missing or `null` request fields deserialize as empty strings so the use
//! cases report them with their own messages instead of a body rejection.

use serde::{Deserialize, Deserializer, Serialize};

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(d).map(Option::unwrap_or_default)
}

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignUpRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub password: String,
}

/// Sign up response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    pub message: String,
    pub user_id: String,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub access_token: String,
    pub refresh_token: String,
}

// ============================================================================
// Refresh / Logout
// ============================================================================

/// Body of both `/refresh` and `/logout`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RefreshTokenRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub refresh_token: String,
}

/// Refresh response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

/// Plain `{ "message": ... }` body
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Profile
// ============================================================================

/// Profile of the authenticated user (never includes the password hash)
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub name: String,
    pub email: String,
}
