//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, constant-time comparison, random secrets)
//! - Password strength policy and bcrypt hashing

pub mod crypto;
pub mod password;
