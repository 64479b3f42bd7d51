//! Application Configuration
//!
//! Configuration for the Auth application layer. Every knob has a
//! documented default matching the deployment this backend serves.

use std::time::Duration;

use platform::rate_limit::RateLimitConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Cookie name prefix; all auth cookies are `<prefix>.<name>`
    pub cookie_prefix: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; 32],
    /// Absolute session lifetime (7 days)
    pub session_expires_in: Duration,
    /// How stale a session row may get before its absolute lifetime is
    /// re-anchored on revalidation (1 day)
    pub session_update_age: Duration,
    /// How long a signed cookie snapshot stays usable at all (1 hour)
    pub cookie_cache_max_age: Duration,
    /// Snapshot age past which a read revalidates against storage and
    /// reissues the cookie (10 minutes)
    pub cookie_cache_refresh_age: Duration,
    /// Lifetime of an impersonation session (1 hour)
    pub impersonation_ttl: Duration,
    /// Lifetime of email verification tokens (24 hours)
    pub verification_ttl: Duration,
    /// Sign-in rate limiting (10 attempts per 60 seconds)
    pub rate_limit: RateLimitConfig,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Ban reason applied when an admin gives none
    pub default_ban_reason: String,
    /// Message shown to a banned user at sign-in
    pub banned_user_message: String,
    /// Message shown when a password appears in a known breach
    pub compromised_password_message: String,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_prefix: "mpk-dashboard".to_string(),
            session_secret: [0u8; 32],
            session_expires_in: Duration::from_secs(7 * 24 * 3600),
            session_update_age: Duration::from_secs(24 * 3600),
            cookie_cache_max_age: Duration::from_secs(3600),
            cookie_cache_refresh_age: Duration::from_secs(10 * 60),
            impersonation_ttl: Duration::from_secs(3600),
            verification_ttl: Duration::from_secs(24 * 3600),
            rate_limit: RateLimitConfig::new(10, 60),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            default_ban_reason: "You have been banned for violating our rules".to_string(),
            banned_user_message: "Your account has been suspended, contact Evans for support"
                .to_string(),
            compromised_password_message:
                "Your password has been found in a data breach please create a new one".to_string(),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            session_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Session lifetime as chrono duration
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.session_expires_in)
            .unwrap_or_else(|_| chrono::Duration::days(7))
    }

    /// Update age as chrono duration
    pub fn update_age(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.session_update_age)
            .unwrap_or_else(|_| chrono::Duration::days(1))
    }

    /// Impersonation lifetime as chrono duration
    pub fn impersonation_duration(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.impersonation_ttl)
            .unwrap_or_else(|_| chrono::Duration::hours(1))
    }

    /// Verification token lifetime as chrono duration
    pub fn verification_duration(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.verification_ttl)
            .unwrap_or_else(|_| chrono::Duration::hours(24))
    }

    /// Cookie cache refresh threshold in milliseconds
    pub fn cache_refresh_age_ms(&self) -> i64 {
        self.cookie_cache_refresh_age.as_millis() as i64
    }

    /// Cookie cache hard ceiling in milliseconds
    pub fn cache_max_age_ms(&self) -> i64 {
        self.cookie_cache_max_age.as_millis() as i64
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
