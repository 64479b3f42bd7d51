//! Signed Session Cookie Snapshot
//!
//! The session cookie carries a short-lived, HMAC-signed snapshot of the
//! session so that most requests resolve without touching storage. The
//! value is `base64url(payload).base64url(signature)` where the payload
//! is a JSON document and the signature is HMAC-SHA256 over the payload
//! bytes under the session secret.
//!
//! A snapshot younger than the refresh age is served as-is. An older one
//! forces revalidation against storage and reissue of the cookie, so a
//! role change or a ban becomes visible within the refresh window.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

use crate::domain::UserRole;

type HmacSha256 = Hmac<Sha256>;

/// The snapshot embedded in the session cookie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionCachePayload {
    /// Opaque session token (storage lookup key)
    pub token: String,
    /// Owning user
    pub user_id: Uuid,
    /// User role at issue time
    pub role: UserRole,
    /// Whether the user was banned at issue time
    pub banned: bool,
    /// Session expiry, unix milliseconds
    pub expires_at_ms: i64,
    /// Admin running this session, when impersonating
    pub impersonated_by: Option<Uuid>,
    /// When this snapshot was sealed, unix milliseconds
    pub issued_at_ms: i64,
}

impl SessionCachePayload {
    /// Snapshot age in milliseconds at `now_ms`. Clock skew clamps to zero.
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        (now_ms - self.issued_at_ms).max(0)
    }

    /// Whether the underlying session had already expired at `now_ms`.
    pub fn session_expired(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at_ms
    }
}

/// Seal a payload into a cookie value under `secret`.
pub fn seal(payload: &SessionCachePayload, secret: &[u8]) -> String {
    let json = serde_json::to_vec(payload).unwrap_or_default();
    let mut mac = HmacSha256::new_from_slice(secret).expect("hmac accepts any key length");
    mac.update(&json);
    let sig = mac.finalize().into_bytes();
    format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(&json),
        URL_SAFE_NO_PAD.encode(sig)
    )
}

/// Open a cookie value, verifying its signature. Returns `None` for any
/// malformed or tampered value; the caller treats that as no session.
pub fn open(value: &str, secret: &[u8]) -> Option<SessionCachePayload> {
    let (payload_b64, sig_b64) = value.split_once('.')?;
    let json = URL_SAFE_NO_PAD.decode(payload_b64).ok()?;
    let sig = URL_SAFE_NO_PAD.decode(sig_b64).ok()?;

    let mut mac = HmacSha256::new_from_slice(secret).ok()?;
    mac.update(&json);
    mac.verify_slice(&sig).ok()?;

    serde_json::from_slice(&json).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> SessionCachePayload {
        SessionCachePayload {
            token: "tok_abc123".to_string(),
            user_id: Uuid::new_v4(),
            role: UserRole::User,
            banned: false,
            expires_at_ms: 2_000_000_000_000,
            impersonated_by: None,
            issued_at_ms: 1_000_000_000_000,
        }
    }

    #[test]
    fn test_seal_open_round_trip() {
        let secret = b"0123456789abcdef0123456789abcdef";
        let payload = sample_payload();
        let sealed = seal(&payload, secret);
        let opened = open(&sealed, secret).unwrap();
        assert_eq!(opened, payload);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let payload = sample_payload();
        let sealed = seal(&payload, b"secret-one-secret-one-secret-one");
        assert!(open(&sealed, b"secret-two-secret-two-secret-two").is_none());
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let secret = b"0123456789abcdef0123456789abcdef";
        let payload = sample_payload();
        let sealed = seal(&payload, secret);

        // Flip the role inside the payload without re-signing
        let (payload_b64, sig_b64) = sealed.split_once('.').unwrap();
        let mut json = URL_SAFE_NO_PAD.decode(payload_b64).unwrap();
        let text = String::from_utf8(json.clone()).unwrap();
        let forged = text.replace("\"user\"", "\"admin\"");
        json = forged.into_bytes();
        let tampered = format!("{}.{}", URL_SAFE_NO_PAD.encode(&json), sig_b64);

        assert!(open(&tampered, secret).is_none());
    }

    #[test]
    fn test_garbage_values_rejected() {
        let secret = b"0123456789abcdef0123456789abcdef";
        assert!(open("", secret).is_none());
        assert!(open("no-dot-here", secret).is_none());
        assert!(open("a.b", secret).is_none());
        assert!(open("!!!.###", secret).is_none());
    }

    #[test]
    fn test_age_and_expiry() {
        let payload = sample_payload();
        assert_eq!(payload.age_ms(1_000_000_600_000), 600_000);
        assert_eq!(payload.age_ms(999_999_999_999), 0);
        assert!(!payload.session_expired(1_999_999_999_999));
        assert!(payload.session_expired(2_000_000_000_000));
    }
}
