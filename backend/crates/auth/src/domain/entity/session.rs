//! Session Entity
//!
//! A server-issued, time-bounded proof of authentication tied to one user.
//! Stored in the database and referenced from a signed cookie by its token.

use chrono::{DateTime, Duration, Utc};
use kernel::id::{SessionId, UserId};

/// Session entity
#[derive(Debug, Clone)]
pub struct Session {
    /// Session ID (UUID v4)
    pub session_id: SessionId,
    /// Owning user (cascade-deleted with the user)
    pub user_id: UserId,
    /// Opaque random token, unique, carried in the cookie
    pub token: String,
    /// Absolute expiry
    pub expires_at: DateTime<Utc>,
    /// Client IP at creation (for display/audit)
    pub ip_address: Option<String>,
    /// Client User-Agent at creation
    pub user_agent: Option<String>,
    /// Admin driving this session, if impersonated
    pub impersonated_by: Option<UserId>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp, refreshed when the session is extended
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session
    ///
    /// TTL comes from the application layer (config), not hard-coded here.
    pub fn new(
        user_id: UserId,
        token: String,
        ttl: Duration,
        ip_address: Option<String>,
        user_agent: Option<String>,
        impersonated_by: Option<UserId>,
    ) -> Self {
        let now = Utc::now();

        Self {
            session_id: SessionId::new(),
            user_id,
            token,
            expires_at: now + ttl,
            ip_address,
            user_agent,
            impersonated_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the session has expired
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether the absolute lifetime should be re-anchored
    ///
    /// True once the row has not been touched for `update_age`; a fresh
    /// ttl is applied at the next revalidation instead of on every read.
    pub fn needs_refresh(&self, now: DateTime<Utc>, update_age: Duration) -> bool {
        now - self.updated_at >= update_age
    }

    /// Extend the absolute expiry to `now + ttl`
    pub fn extend(&mut self, ttl: Duration) {
        let now = Utc::now();
        self.expires_at = now + ttl;
        self.updated_at = now;
    }

    /// Whether this session was issued by an admin impersonating the user
    pub fn is_impersonated(&self) -> bool {
        self.impersonated_by.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_session(ttl: Duration) -> Session {
        Session::new(UserId::new(), "tok".to_string(), ttl, None, None, None)
    }

    #[test]
    fn test_expiry() {
        let session = test_session(Duration::hours(1));
        let now = Utc::now();
        assert!(!session.is_expired(now));
        assert!(session.is_expired(now + Duration::hours(2)));
    }

    #[test]
    fn test_needs_refresh_after_update_age() {
        let session = test_session(Duration::days(7));
        let now = Utc::now();
        assert!(!session.needs_refresh(now, Duration::days(1)));
        assert!(session.needs_refresh(now + Duration::days(2), Duration::days(1)));
    }

    #[test]
    fn test_extend_re_anchors_expiry() {
        let mut session = test_session(Duration::hours(1));
        let old_expiry = session.expires_at;
        session.extend(Duration::days(7));
        assert!(session.expires_at > old_expiry);
        assert!(session.updated_at >= session.created_at);
    }

    #[test]
    fn test_impersonation_marker() {
        let mut session = test_session(Duration::hours(1));
        assert!(!session.is_impersonated());
        session.impersonated_by = Some(UserId::new());
        assert!(session.is_impersonated());
    }
}
