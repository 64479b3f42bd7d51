//! User Entity
//!
//! Core user profile entity. Credential material lives on the linked
//! Account entity, never here.

use chrono::{DateTime, Duration, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{ban::BanState, email::Email, user_role::UserRole};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Display name
    pub name: String,
    /// Email address (globally unique)
    pub email: Email,
    /// Whether the email address has been confirmed
    pub email_verified: bool,
    /// Optional avatar URL
    pub image: Option<String>,
    /// Role (user or admin, defaults to user)
    pub role: UserRole,
    /// Ban state
    pub ban: BanState,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp, refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with the default role
    pub fn new(name: String, email: Email) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            name,
            email,
            email_verified: false,
            image: None,
            role: UserRole::default(),
            ban: BanState::none(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether an active ban currently blocks this user
    pub fn is_banned(&self, now: DateTime<Utc>) -> bool {
        self.ban.is_active(now)
    }

    /// Update user role
    pub fn set_role(&mut self, role: UserRole) {
        self.role = role;
        self.updated_at = Utc::now();
    }

    /// Apply a ban, permanent when `expires_in` is `None`
    pub fn apply_ban(&mut self, reason: String, expires_in: Option<Duration>) {
        let now = Utc::now();
        self.ban = BanState::new(reason, expires_in.map(|d| now + d));
        self.updated_at = now;
    }

    /// Clear any ban
    pub fn clear_ban(&mut self) {
        self.ban = BanState::none();
        self.updated_at = Utc::now();
    }

    /// Mark the email address as confirmed
    pub fn mark_email_verified(&mut self) {
        self.email_verified = true;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User::new("Ada".to_string(), Email::new("ada@example.com").unwrap())
    }

    #[test]
    fn test_new_user_defaults() {
        let user = test_user();
        assert_eq!(user.role, UserRole::User);
        assert!(!user.email_verified);
        assert!(!user.is_banned(Utc::now()));
    }

    #[test]
    fn test_ban_lifecycle() {
        let mut user = test_user();
        user.apply_ban("spam".to_string(), Some(Duration::hours(1)));
        assert!(user.is_banned(Utc::now()));

        user.clear_ban();
        assert!(!user.is_banned(Utc::now()));
        assert!(user.ban.reason.is_none());
    }

    #[test]
    fn test_mutations_refresh_updated_at() {
        let mut user = test_user();
        let before = user.updated_at;
        std::thread::sleep(std::time::Duration::from_millis(5));
        user.set_role(UserRole::Admin);
        assert!(user.updated_at > before);
    }
}
