//! Admin Use Cases
//!
//! Role management, bans, and impersonation. Every operation first checks
//! that the acting session belongs to an admin.

use std::sync::Arc;

use chrono::{Duration, Utc};
use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::application::cookie_cache::{self, SessionCachePayload};
use crate::application::get_session::SessionView;
use crate::domain::entity::Session;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::UserRole;
use crate::error::{AuthError, AuthResult};
use platform::crypto;

/// Ban input
pub struct BanInput {
    pub target: UserId,
    pub reason: Option<String>,
    /// Ban duration; `None` is permanent
    pub expires_in_secs: Option<i64>,
}

/// Impersonation output
pub struct ImpersonateOutput {
    /// The impersonation session
    pub session: Session,
    /// Signed cookie value for the impersonation session
    pub cookie_value: String,
}

/// Admin use cases
pub struct AdminUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> AdminUseCase<U, S>
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

    fn ensure_admin(actor: &SessionView) -> AuthResult<()> {
        if actor.is_admin() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized)
        }
    }

    /// Change a user's role.
    pub async fn set_role(
        &self,
        actor: &SessionView,
        target: UserId,
        role: UserRole,
    ) -> AuthResult<()> {
        Self::ensure_admin(actor)?;

        let mut user = self
            .user_repo
            .find_by_id(&target)
            .await?
            .ok_or_else(|| AuthError::Validation("User not found".to_string()))?;
        user.set_role(role);
        self.user_repo.update(&user).await?;

        tracing::info!(actor = %actor.user_id, target = %target, role = %role, "role changed");
        Ok(())
    }

    /// Ban a user and revoke all their sessions.
    pub async fn ban(&self, actor: &SessionView, input: BanInput) -> AuthResult<()> {
        Self::ensure_admin(actor)?;
        if input.target == actor.user_id {
            return Err(AuthError::Validation(
                "You cannot ban yourself".to_string(),
            ));
        }

        let mut user = self
            .user_repo
            .find_by_id(&input.target)
            .await?
            .ok_or_else(|| AuthError::Validation("User not found".to_string()))?;

        let reason = input
            .reason
            .unwrap_or_else(|| self.config.default_ban_reason.clone());
        user.apply_ban(reason, input.expires_in_secs.map(Duration::seconds));
        self.user_repo.update(&user).await?;

        let revoked = self.session_repo.delete_all_for_user(&input.target).await?;
        tracing::info!(actor = %actor.user_id, target = %input.target, revoked, "user banned");
        Ok(())
    }

    /// Lift a user's ban.
    pub async fn unban(&self, actor: &SessionView, target: UserId) -> AuthResult<()> {
        Self::ensure_admin(actor)?;

        let mut user = self
            .user_repo
            .find_by_id(&target)
            .await?
            .ok_or_else(|| AuthError::Validation("User not found".to_string()))?;
        user.clear_ban();
        self.user_repo.update(&user).await?;

        tracing::info!(actor = %actor.user_id, target = %target, "user unbanned");
        Ok(())
    }

    /// Start an impersonation session for `target`. The session is
    /// short-lived and marked with the acting admin's id. The caller
    /// parks the admin's own cookie so it can be restored later.
    pub async fn impersonate(
        &self,
        actor: &SessionView,
        target: UserId,
    ) -> AuthResult<ImpersonateOutput> {
        Self::ensure_admin(actor)?;
        if target == actor.user_id {
            return Err(AuthError::Validation(
                "You cannot impersonate yourself".to_string(),
            ));
        }

        let now = Utc::now();
        let user = self
            .user_repo
            .find_by_id(&target)
            .await?
            .ok_or_else(|| AuthError::Validation("User not found".to_string()))?;
        if user.is_banned(now) {
            return Err(AuthError::Validation(
                "Cannot impersonate a banned user".to_string(),
            ));
        }

        let session = Session::new(
            target,
            crypto::random_token(32),
            self.config.impersonation_duration(),
            None,
            None,
            Some(actor.user_id),
        );
        self.session_repo.create(&session).await?;

        let payload = SessionCachePayload {
            token: session.token.clone(),
            user_id: target.into_uuid(),
            role: user.role,
            banned: false,
            expires_at_ms: session.expires_at.timestamp_millis(),
            impersonated_by: Some(actor.user_id.into_uuid()),
            issued_at_ms: now.timestamp_millis(),
        };
        let cookie_value = cookie_cache::seal(&payload, &self.config.session_secret);

        tracing::info!(actor = %actor.user_id, target = %target, "impersonation started");
        Ok(ImpersonateOutput {
            session,
            cookie_value,
        })
    }

    /// End an impersonation session. Only the impersonation session
    /// itself may call this; the caller restores the parked admin cookie.
    pub async fn stop_impersonating(&self, current: &SessionView) -> AuthResult<()> {
        if current.impersonated_by.is_none() {
            return Err(AuthError::Validation(
                "Not an impersonation session".to_string(),
            ));
        }

        self.session_repo.delete_by_token(&current.token).await?;
        tracing::info!(user_id = %current.user_id, "impersonation ended");
        Ok(())
    }
}
