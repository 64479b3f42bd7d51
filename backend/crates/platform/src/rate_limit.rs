//! Rate Limiting Infrastructure
//!
//! Common rate limiting abstractions. The window model is a fixed window:
//! each key carries a counter and the timestamp of the window's first
//! request; a request arriving after the window has elapsed resets the
//! counter, anything earlier increments it.

use std::time::Duration;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }
}

/// Rate limit check result
#[derive(Debug, Clone)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

/// Fixed-window counter state for one key, as persisted by a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitWindow {
    pub count: u32,
    pub last_request_ms: i64,
}

impl RateLimitWindow {
    /// Register one request at `now_ms`, returning the updated window and
    /// the decision for this request.
    ///
    /// The counter is updated whether or not the request is allowed, so
    /// hammering a limited key keeps it limited.
    pub fn register(self, now_ms: i64, config: &RateLimitConfig) -> (Self, RateLimitDecision) {
        let window_ms = config.window_ms();

        let next = if now_ms - self.last_request_ms >= window_ms {
            // Window elapsed, start a fresh one
            Self {
                count: 1,
                last_request_ms: now_ms,
            }
        } else {
            Self {
                count: self.count.saturating_add(1),
                last_request_ms: self.last_request_ms,
            }
        };

        let allowed = next.count <= config.max_requests;
        let decision = RateLimitDecision {
            allowed,
            remaining: config.max_requests.saturating_sub(next.count),
            reset_at_ms: next.last_request_ms + window_ms,
        };

        (next, decision)
    }

    /// Decision for a window a store has already updated, e.g. via an
    /// atomic database upsert that did the register step server-side.
    pub fn decision(&self, config: &RateLimitConfig) -> RateLimitDecision {
        RateLimitDecision {
            allowed: self.count <= config.max_requests,
            remaining: config.max_requests.saturating_sub(self.count),
            reset_at_ms: self.last_request_ms + config.window_ms(),
        }
    }

    /// Window state for a key never seen before
    pub fn first(now_ms: i64) -> Self {
        Self {
            count: 0,
            last_request_ms: now_ms,
        }
    }
}

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Record one request for `key` and return the decision
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitDecision, Box<dyn std::error::Error + Send + Sync>>;
}
