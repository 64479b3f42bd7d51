//! Get Session Use Case
//!
//! Resolves the current session from the signed cookie. A fresh snapshot
//! answers straight from the cookie; a stale one revalidates against
//! storage and reissues the cookie so role changes and bans propagate.
//!
//! Missing or invalid sessions resolve to `Ok(None)`, never an error, so
//! callers can always fall through to "not signed in".

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::application::cookie_cache::{self, SessionCachePayload};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::UserRole;
use crate::error::AuthResult;

/// A resolved view of the signed-in user, cheap to clone into handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub token: String,
    pub user_id: UserId,
    pub role: UserRole,
    pub expires_at_ms: i64,
    pub impersonated_by: Option<UserId>,
}

impl SessionView {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn is_impersonated(&self) -> bool {
        self.impersonated_by.is_some()
    }
}

/// Resolution result: the view plus a reissued cookie when the snapshot
/// was refreshed.
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    pub view: SessionView,
    /// Set when the caller must reissue the session cookie
    pub refreshed_cookie: Option<String>,
}

/// Get session use case
pub struct GetSessionUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> GetSessionUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, cookie_value: Option<&str>) -> AuthResult<Option<ResolvedSession>> {
        self.execute_at(cookie_value, Utc::now()).await
    }

    /// Resolution with an explicit clock, for tests.
    pub async fn execute_at(
        &self,
        cookie_value: Option<&str>,
        now: DateTime<Utc>,
    ) -> AuthResult<Option<ResolvedSession>> {
        let Some(value) = cookie_value else {
            return Ok(None);
        };
        let Some(payload) = cookie_cache::open(value, &self.config.session_secret) else {
            return Ok(None);
        };

        let now_ms = now.timestamp_millis();
        if payload.banned || payload.session_expired(now_ms) {
            return Ok(None);
        }

        let age = payload.age_ms(now_ms);
        if age < self.config.cache_refresh_age_ms() && age < self.config.cache_max_age_ms() {
            return Ok(Some(ResolvedSession {
                view: view_from_payload(&payload),
                refreshed_cookie: None,
            }));
        }

        self.revalidate(payload, now).await
    }

    async fn revalidate(
        &self,
        payload: SessionCachePayload,
        now: DateTime<Utc>,
    ) -> AuthResult<Option<ResolvedSession>> {
        let Some(mut session) = self.session_repo.find_by_token(&payload.token).await? else {
            return Ok(None);
        };
        if session.is_expired(now) {
            self.session_repo.delete_by_token(&session.token).await?;
            return Ok(None);
        }

        let Some(user) = self.user_repo.find_by_id(&session.user_id).await? else {
            self.session_repo.delete_by_token(&session.token).await?;
            return Ok(None);
        };
        if user.is_banned(now) {
            self.session_repo.delete_all_for_user(&user.user_id).await?;
            return Ok(None);
        }

        if session.needs_refresh(now, self.config.update_age()) {
            session.extend(self.config.session_ttl());
            self.session_repo.update(&session).await?;
        }

        let fresh = SessionCachePayload {
            token: session.token.clone(),
            user_id: user.user_id.into_uuid(),
            role: user.role,
            banned: false,
            expires_at_ms: session.expires_at.timestamp_millis(),
            impersonated_by: session.impersonated_by.map(|id| id.into_uuid()),
            issued_at_ms: now.timestamp_millis(),
        };
        let cookie = cookie_cache::seal(&fresh, &self.config.session_secret);

        Ok(Some(ResolvedSession {
            view: view_from_payload(&fresh),
            refreshed_cookie: Some(cookie),
        }))
    }
}

fn view_from_payload(payload: &SessionCachePayload) -> SessionView {
    SessionView {
        token: payload.token.clone(),
        user_id: UserId::from_uuid(payload.user_id),
        role: payload.role,
        expires_at_ms: payload.expires_at_ms,
        impersonated_by: payload.impersonated_by.map(UserId::from_uuid),
    }
}
