//! Auth Client
//!
//! Client-side session manager for the auth API:
//! - `store/` - where the token pair lives between calls (memory or a JSON file)
//! - `client` - signup / login / logout and authorized requests with one
//!   refresh-and-retry on 401
//! - `validation` - the same input rules the server enforces, for forms
//! - `error` - failures and their user-facing messages

pub mod client;
pub mod error;
pub mod store;
pub mod validation;

pub use client::{AuthClient, Profile, SignupResponse};
pub use error::{ClientError, ClientResult};
pub use store::{FileTokenStore, MemoryTokenStore, StoreError, StoredTokens, TokenStore};
