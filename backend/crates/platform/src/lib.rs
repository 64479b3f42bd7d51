//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, random bytes, Base64)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant) with
//!   HIBP breach checking
//! - Cookie management with a configurable name prefix
//! - Rate limiting infrastructure (fixed window)
//! - Client identification (IP / User-Agent extraction)

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod password;
pub mod rate_limit;
