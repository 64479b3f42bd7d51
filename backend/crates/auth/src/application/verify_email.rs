//! Verify Email Use Case
//!
//! Consumes a verification token and marks the owning user's email as
//! verified. Tokens are single-use.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::repository::{UserRepository, VerificationRepository};
use crate::domain::value_object::Email;
use crate::error::{AuthError, AuthResult};

/// Verify email use case
pub struct VerifyEmailUseCase<U, V>
where
    U: UserRepository,
    V: VerificationRepository,
{
    user_repo: Arc<U>,
    verification_repo: Arc<V>,
}

impl<U, V> VerifyEmailUseCase<U, V>
where
    U: UserRepository,
    V: VerificationRepository,
{
    pub fn new(user_repo: Arc<U>, verification_repo: Arc<V>) -> Self {
        Self {
            user_repo,
            verification_repo,
        }
    }

    pub async fn execute(&self, token: &str) -> AuthResult<()> {
        let verification = self
            .verification_repo
            .find_by_value(token)
            .await?
            .ok_or(AuthError::InvalidVerification)?;

        if verification.is_expired(Utc::now()) {
            self.verification_repo.delete(token).await?;
            return Err(AuthError::InvalidVerification);
        }

        let email = Email::new(&verification.identifier)
            .map_err(|_| AuthError::InvalidVerification)?;
        let mut user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidVerification)?;

        user.mark_email_verified();
        self.user_repo.update(&user).await?;
        self.verification_repo.delete(token).await?;

        tracing::info!(user_id = %user.user_id, "email verified");
        Ok(())
    }
}
