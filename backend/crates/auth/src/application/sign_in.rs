//! Sign In Use Case
//!
//! Authenticates a user by email and password and issues a session. The
//! rate limiter runs before credential lookup so it also shields the
//! existence check on the email.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::cookie_cache::{self, SessionCachePayload};
use crate::domain::entity::Session;
use crate::domain::repository::{AccountRepository, SessionRepository, UserRepository};
use crate::domain::value_object::Email;
use crate::error::{AuthError, AuthResult};
use platform::client::ClientInfo;
use platform::crypto;
use platform::password::ClearTextPassword;
use platform::rate_limit::RateLimitStore;

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    /// The created session
    pub session: Session,
    /// Signed value for the session cookie
    pub cookie_value: String,
}

/// Sign in use case
pub struct SignInUseCase<U, A, S, R>
where
    U: UserRepository,
    A: AccountRepository,
    S: SessionRepository,
    R: RateLimitStore,
{
    user_repo: Arc<U>,
    account_repo: Arc<A>,
    session_repo: Arc<S>,
    rate_limiter: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<U, A, S, R> SignInUseCase<U, A, S, R>
where
    U: UserRepository,
    A: AccountRepository,
    S: SessionRepository,
    R: RateLimitStore,
{
    pub fn new(
        user_repo: Arc<U>,
        account_repo: Arc<A>,
        session_repo: Arc<S>,
        rate_limiter: Arc<R>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            account_repo,
            session_repo,
            rate_limiter,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput, client: ClientInfo) -> AuthResult<SignInOutput> {
        let key = client.rate_limit_key(&input.email);
        let decision = self
            .rate_limiter
            .check_and_increment(&key, &self.config.rate_limit)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        if !decision.allowed {
            tracing::warn!(key = %key, "sign-in rate limited");
            return Err(AuthError::RateLimited);
        }

        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let mut user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let now = Utc::now();
        if user.ban.is_active(now) {
            return Err(AuthError::AccountBanned(
                self.config.banned_user_message.clone(),
            ));
        }
        if user.ban.is_lapsed(now) {
            // Temporary ban ran out; lift it on first contact
            user.clear_ban();
            self.user_repo.update(&user).await?;
        }

        let account = self
            .account_repo
            .find_credential_by_user_id(&user.user_id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let hash = account
            .password
            .as_ref()
            .ok_or(AuthError::InvalidCredentials)?;

        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;
        if !hash.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let session = Session::new(
            user.user_id,
            crypto::random_token(32),
            self.config.session_ttl(),
            client.ip_string(),
            client.user_agent.clone(),
            None,
        );
        self.session_repo.create(&session).await?;

        let payload = SessionCachePayload {
            token: session.token.clone(),
            user_id: user.user_id.into_uuid(),
            role: user.role,
            banned: false,
            expires_at_ms: session.expires_at.timestamp_millis(),
            impersonated_by: None,
            issued_at_ms: now.timestamp_millis(),
        };
        let cookie_value = cookie_cache::seal(&payload, &self.config.session_secret);

        tracing::info!(user_id = %user.user_id, "user signed in");

        Ok(SignInOutput {
            session,
            cookie_value,
        })
    }
}
