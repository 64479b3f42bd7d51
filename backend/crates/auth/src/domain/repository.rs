//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{
    account::Account, session::Session, user::User, verification::Verification,
};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;
use kernel::id::UserId;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if an email is already registered
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Update user
    async fn update(&self, user: &User) -> AuthResult<()>;

    /// Delete user (sessions and accounts cascade)
    async fn delete(&self, user_id: &UserId) -> AuthResult<()>;
}

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Create an account
    async fn create(&self, account: &Account) -> AuthResult<()>;

    /// Find the credential account for a user
    async fn find_credential_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<Account>>;

    /// Update an account (e.g. password change)
    async fn update(&self, account: &Account) -> AuthResult<()>;
}

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Create a new session
    async fn create(&self, session: &Session) -> AuthResult<()>;

    /// Find session by its token
    async fn find_by_token(&self, token: &str) -> AuthResult<Option<Session>>;

    /// Update session (expiry extension)
    async fn update(&self, session: &Session) -> AuthResult<()>;

    /// Delete a session by token
    async fn delete_by_token(&self, token: &str) -> AuthResult<()>;

    /// Delete all sessions for a user, returning how many were removed
    async fn delete_all_for_user(&self, user_id: &UserId) -> AuthResult<u64>;

    /// Clean up expired sessions
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}

/// Verification repository trait
#[trait_variant::make(VerificationRepository: Send)]
pub trait LocalVerificationRepository {
    /// Create a verification record
    async fn create(&self, verification: &Verification) -> AuthResult<()>;

    /// Find a verification by its secret value
    async fn find_by_value(&self, value: &str) -> AuthResult<Option<Verification>>;

    /// Delete a verification (consume)
    async fn delete(&self, value: &str) -> AuthResult<()>;

    /// Clean up expired verifications
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
