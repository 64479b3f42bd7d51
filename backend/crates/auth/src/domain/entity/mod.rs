//! Domain Entities

pub mod account;
pub mod session;
pub mod user;
pub mod verification;

pub use account::{Account, CREDENTIAL_PROVIDER};
pub use session::Session;
pub use user::User;
pub use verification::Verification;
