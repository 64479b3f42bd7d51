//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, dashboard gate
//!
//! ## Features
//! - Email + password sign-up and sign-in
//! - Server-side sessions with HMAC-signed cookie snapshots
//! - Role-based access (User, Admin) with a role-routing dashboard gate
//! - Admin tooling: bans, role changes, impersonation
//!
//! ## Security Model
//! - Passwords hashed with Argon2id and screened against known breaches
//! - Database-backed fixed-window rate limiting on sign-in
//! - Banned users lose all sessions immediately

pub mod application;
pub mod client;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::get_session::SessionView;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::{PgAuthRepository, PgRateLimitStore};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod gate {
    pub use crate::presentation::gate::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}
