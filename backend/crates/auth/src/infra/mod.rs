//! Infrastructure Layer
//!
//! Repository implementations against external systems.

pub mod postgres;

pub use postgres::{PgAuthRepository, PgRateLimitStore};
