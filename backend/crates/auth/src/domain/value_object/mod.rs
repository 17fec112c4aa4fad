//! Value Object Module

pub mod display_name;
pub mod email;
pub mod refresh_token_digest;
pub mod user_id;
pub mod user_password;
