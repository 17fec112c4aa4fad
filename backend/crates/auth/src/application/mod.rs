//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod get_profile;
pub mod refresh;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod token;

// Re-exports
pub use config::AuthConfig;
pub use get_profile::{GetProfileUseCase, ProfileOutput};
pub use refresh::{RefreshAccessTokenUseCase, RefreshOutput};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::{SignOutOutput, SignOutUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use token::{Claims, TokenKind, TokenService};
