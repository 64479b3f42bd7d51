//! Value Objects

pub mod ban;
pub mod email;
pub mod user_role;

pub use ban::BanState;
pub use email::Email;
pub use user_role::UserRole;
