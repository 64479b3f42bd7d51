//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{Account, Session, User, Verification, CREDENTIAL_PROVIDER};
pub use repository::{
    AccountRepository, SessionRepository, UserRepository, VerificationRepository,
};
pub use value_object::{BanState, Email, UserRole};
