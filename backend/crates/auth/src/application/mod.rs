//! Application Layer
//!
//! Use cases and application services.

pub mod admin;
pub mod config;
pub mod cookie_cache;
pub mod get_session;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod verify_email;

// Re-exports
pub use admin::{AdminUseCase, BanInput, ImpersonateOutput};
pub use config::AuthConfig;
pub use cookie_cache::SessionCachePayload;
pub use get_session::{GetSessionUseCase, ResolvedSession, SessionView};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use verify_email::VerifyEmailUseCase;
