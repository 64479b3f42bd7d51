//! Sign Up Use Case
//!
//! Registers a new user with a credential account and issues an email
//! verification token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::{Account, User, Verification};
use crate::domain::repository::{AccountRepository, UserRepository, VerificationRepository};
use crate::domain::value_object::Email;
use crate::error::{AuthError, AuthResult};
use platform::crypto;
use platform::password::ClearTextPassword;

/// Sign up input
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Sign up output
pub struct SignUpOutput {
    pub user: User,
    /// Token the verification email embeds
    pub verification_token: String,
}

/// Sign up use case
pub struct SignUpUseCase<U, A, V>
where
    U: UserRepository,
    A: AccountRepository,
    V: VerificationRepository,
{
    user_repo: Arc<U>,
    account_repo: Arc<A>,
    verification_repo: Arc<V>,
    config: Arc<AuthConfig>,
}

impl<U, A, V> SignUpUseCase<U, A, V>
where
    U: UserRepository,
    A: AccountRepository,
    V: VerificationRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        account_repo: Arc<A>,
        verification_repo: Arc<V>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            account_repo,
            verification_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AuthError::Validation("Name is required".to_string()));
        }

        let email =
            Email::new(&input.email).map_err(|e| AuthError::Validation(e.to_string()))?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password = ClearTextPassword::new(input.password)?;

        // Reject passwords found in known breaches before hashing. An
        // unreachable breach API never blocks registration.
        let breached = match password.check_breach().await {
            Ok(breached) => breached,
            Err(e) => {
                tracing::warn!(error = %e, "breach check unavailable, skipping");
                false
            }
        };
        if breached {
            return Err(AuthError::CompromisedPassword(
                self.config.compromised_password_message.clone(),
            ));
        }

        let hash = password.hash(self.config.pepper())?;

        let user = User::new(name.to_string(), email);
        self.user_repo.create(&user).await?;

        let account = Account::credential(user.user_id, hash);
        self.account_repo.create(&account).await?;

        let verification = Verification::new(
            user.email.as_str().to_string(),
            crypto::random_token(32),
            self.config.verification_duration(),
        );
        self.verification_repo.create(&verification).await?;

        tracing::info!(user_id = %user.user_id, "user registered");

        let verification_token = verification.value;
        Ok(SignUpOutput {
            user,
            verification_token,
        })
    }
}
