//! Sign Out Use Case
//!
//! Deletes the session behind the presented cookie. A missing or invalid
//! cookie is a no-op; sign-out always succeeds from the caller's side.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::cookie_cache;
use crate::domain::repository::SessionRepository;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, cookie_value: Option<&str>) -> AuthResult<()> {
        let Some(value) = cookie_value else {
            return Ok(());
        };
        let Some(payload) = cookie_cache::open(value, &self.config.session_secret) else {
            return Ok(());
        };

        self.session_repo.delete_by_token(&payload.token).await?;
        tracing::info!(user_id = %payload.user_id, "user signed out");
        Ok(())
    }
}
