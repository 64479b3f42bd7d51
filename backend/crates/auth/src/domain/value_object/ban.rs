//! Ban State Value Object
//!
//! A ban is either permanent (no expiry) or time-bounded. An expired ban
//! no longer blocks authentication but stays on the record until cleared.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ban state attached to a user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanState {
    pub banned: bool,
    pub reason: Option<String>,
    pub expires: Option<DateTime<Utc>>,
}

impl BanState {
    /// No ban
    pub fn none() -> Self {
        Self::default()
    }

    /// A new ban, permanent when `expires` is `None`
    pub fn new(reason: String, expires: Option<DateTime<Utc>>) -> Self {
        Self {
            banned: true,
            reason: Some(reason),
            expires,
        }
    }

    /// Whether the ban currently blocks authentication
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.banned && self.expires.is_none_or(|e| now < e)
    }

    /// Whether a ban exists but its expiry has passed
    pub fn is_lapsed(&self, now: DateTime<Utc>) -> bool {
        self.banned && self.expires.is_some_and(|e| now >= e)
    }
}
