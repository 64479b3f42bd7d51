//! Verification Entity
//!
//! Ephemeral identifier-to-value record with an expiry, used for
//! email-confirmation style flows. Rows are consumed on use and swept
//! at startup.

use chrono::{DateTime, Duration, Utc};
use kernel::id::VerificationId;

/// Verification entity
#[derive(Debug, Clone)]
pub struct Verification {
    pub verification_id: VerificationId,
    /// What is being verified, e.g. an email address
    pub identifier: String,
    /// The secret token handed to the user
    pub value: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Verification {
    pub fn new(identifier: String, value: String, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            verification_id: VerificationId::new(),
            identifier,
            value,
            expires_at: now + ttl,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry() {
        let v = Verification::new(
            "ada@example.com".to_string(),
            "token".to_string(),
            Duration::hours(24),
        );
        let now = Utc::now();
        assert!(!v.is_expired(now));
        assert!(v.is_expired(now + Duration::hours(25)));
    }
}
