//! Account Entity
//!
//! One user may have multiple linked accounts (credential or OAuth
//! providers). The password hash lives on the credential account row.

use chrono::{DateTime, Utc};
use kernel::id::{AccountId, UserId};
use platform::password::HashedPassword;

/// Provider id for password-based accounts
pub const CREDENTIAL_PROVIDER: &str = "credential";

/// Account entity
#[derive(Debug, Clone)]
pub struct Account {
    pub account_id: AccountId,
    /// Provider-side account identifier (user id for credential accounts)
    pub provider_account_id: String,
    /// Provider id, e.g. "credential"
    pub provider_id: String,
    pub user_id: UserId,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub id_token: Option<String>,
    pub access_token_expires_at: Option<DateTime<Utc>>,
    pub refresh_token_expires_at: Option<DateTime<Utc>>,
    pub scope: Option<String>,
    /// Argon2id PHC hash, present only for credential accounts
    pub password: Option<HashedPassword>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a credential (email + password) account for a user
    pub fn credential(user_id: UserId, password: HashedPassword) -> Self {
        let now = Utc::now();

        Self {
            account_id: AccountId::new(),
            provider_account_id: user_id.to_string(),
            provider_id: CREDENTIAL_PROVIDER.to_string(),
            user_id,
            access_token: None,
            refresh_token: None,
            id_token: None,
            access_token_expires_at: None,
            refresh_token_expires_at: None,
            scope: None,
            password: Some(password),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_credential(&self) -> bool {
        self.provider_id == CREDENTIAL_PROVIDER
    }

    /// Replace the stored password hash
    pub fn set_password(&mut self, password: HashedPassword) {
        self.password = Some(password);
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::ClearTextPassword;

    #[test]
    fn test_credential_account() {
        let user_id = UserId::new();
        let hash = ClearTextPassword::new("longenoughpassword".to_string())
            .unwrap()
            .hash(None)
            .unwrap();
        let account = Account::credential(user_id, hash);

        assert!(account.is_credential());
        assert_eq!(account.user_id, user_id);
        assert!(account.password.is_some());
        assert!(account.access_token.is_none());
    }
}
