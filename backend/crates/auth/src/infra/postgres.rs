//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{Account, Session, User, Verification, CREDENTIAL_PROVIDER};
use crate::domain::repository::{
    AccountRepository, SessionRepository, UserRepository, VerificationRepository,
};
use crate::domain::value_object::{BanState, Email, UserRole};
use crate::error::{AuthError, AuthResult};
use kernel::id::{AccountId, SessionId, UserId, VerificationId};
use platform::password::HashedPassword;
use platform::rate_limit::{RateLimitConfig, RateLimitDecision, RateLimitStore, RateLimitWindow};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO "user" (
                id,
                name,
                email,
                email_verified,
                image,
                role,
                banned,
                ban_reason,
                ban_expires,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(user.email_verified)
        .bind(&user.image)
        .bind(user.role.code())
        .bind(user.ban.banned)
        .bind(&user.ban.reason)
        .bind(user.ban.expires)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id, name, email, email_verified, image, role,
                banned, ban_reason, ban_expires, created_at, updated_at
            FROM "user"
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id, name, email, email_verified, image, role,
                banned, ban_reason, ban_expires, created_at, updated_at
            FROM "user"
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM "user" WHERE email = $1)"#,
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE "user" SET
                name = $2,
                email = $3,
                email_verified = $4,
                image = $5,
                role = $6,
                banned = $7,
                ban_reason = $8,
                ban_expires = $9,
                updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(user.email_verified)
        .bind(&user.image)
        .bind(user.role.code())
        .bind(user.ban.banned)
        .bind(&user.ban.reason)
        .bind(user.ban.expires)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> AuthResult<()> {
        // Sessions and accounts cascade
        sqlx::query(r#"DELETE FROM "user" WHERE id = $1"#)
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Account Repository Implementation
// ============================================================================

impl AccountRepository for PgAuthRepository {
    async fn create(&self, account: &Account) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO account (
                id,
                account_id,
                provider_id,
                user_id,
                access_token,
                refresh_token,
                id_token,
                access_token_expires_at,
                refresh_token_expires_at,
                scope,
                password,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(&account.provider_account_id)
        .bind(&account.provider_id)
        .bind(account.user_id.as_uuid())
        .bind(&account.access_token)
        .bind(&account.refresh_token)
        .bind(&account.id_token)
        .bind(account.access_token_expires_at)
        .bind(account.refresh_token_expires_at)
        .bind(&account.scope)
        .bind(account.password.as_ref().map(|p| p.as_phc_string()))
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_credential_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                id, account_id, provider_id, user_id,
                access_token, refresh_token, id_token,
                access_token_expires_at, refresh_token_expires_at,
                scope, password, created_at, updated_at
            FROM account
            WHERE user_id = $1 AND provider_id = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(CREDENTIAL_PROVIDER)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn update(&self, account: &Account) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE account SET
                access_token = $2,
                refresh_token = $3,
                id_token = $4,
                access_token_expires_at = $5,
                refresh_token_expires_at = $6,
                scope = $7,
                password = $8,
                updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(&account.access_token)
        .bind(&account.refresh_token)
        .bind(&account.id_token)
        .bind(account.access_token_expires_at)
        .bind(account.refresh_token_expires_at)
        .bind(&account.scope)
        .bind(account.password.as_ref().map(|p| p.as_phc_string()))
        .bind(account.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgAuthRepository {
    async fn create(&self, session: &Session) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO session (
                id,
                user_id,
                token,
                expires_at,
                ip_address,
                user_agent,
                impersonated_by,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(session.session_id.as_uuid())
        .bind(session.user_id.as_uuid())
        .bind(&session.token)
        .bind(session.expires_at)
        .bind(&session.ip_address)
        .bind(&session.user_agent)
        .bind(session.impersonated_by.map(|id| id.into_uuid()))
        .bind(session.created_at)
        .bind(session.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> AuthResult<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                id, user_id, token, expires_at, ip_address,
                user_agent, impersonated_by, created_at, updated_at
            FROM session
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_session()))
    }

    async fn update(&self, session: &Session) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE session SET
                expires_at = $2,
                updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(session.session_id.as_uuid())
        .bind(session.expires_at)
        .bind(session.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_by_token(&self, token: &str) -> AuthResult<()> {
        sqlx::query("DELETE FROM session WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_all_for_user(&self, user_id: &UserId) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM session WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM session WHERE expires_at < $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Verification Repository Implementation
// ============================================================================

impl VerificationRepository for PgAuthRepository {
    async fn create(&self, verification: &Verification) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO verification (
                id,
                identifier,
                value,
                expires_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(verification.verification_id.as_uuid())
        .bind(&verification.identifier)
        .bind(&verification.value)
        .bind(verification.expires_at)
        .bind(verification.created_at)
        .bind(verification.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_value(&self, value: &str) -> AuthResult<Option<Verification>> {
        let row = sqlx::query_as::<_, VerificationRow>(
            r#"
            SELECT id, identifier, value, expires_at, created_at, updated_at
            FROM verification
            WHERE value = $1
            "#,
        )
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_verification()))
    }

    async fn delete(&self, value: &str) -> AuthResult<()> {
        sqlx::query("DELETE FROM verification WHERE value = $1")
            .bind(value)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM verification WHERE expires_at < $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(verifications_deleted = deleted, "Cleaned up expired verifications");

        Ok(deleted)
    }
}

// ============================================================================
// Rate Limit Store Implementation
// ============================================================================

/// PostgreSQL-backed fixed-window rate limiter. One atomic upsert either
/// resets the window or bumps the counter, so concurrent attempts cannot
/// lose increments.
#[derive(Clone)]
pub struct PgRateLimitStore {
    pool: PgPool,
}

impl PgRateLimitStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Remove windows idle for longer than `max_idle_ms`.
    pub async fn cleanup_stale(&self, max_idle_ms: i64) -> AuthResult<u64> {
        let cutoff = Utc::now().timestamp_millis() - max_idle_ms;
        let deleted = sqlx::query("DELETE FROM rate_limit WHERE last_request < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

impl RateLimitStore for PgRateLimitStore {
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitDecision, Box<dyn std::error::Error + Send + Sync>> {
        let now_ms = Utc::now().timestamp_millis();
        let window_ms = config.window.as_millis() as i64;

        let (count, last_request) = sqlx::query_as::<_, (i32, i64)>(
            r#"
            INSERT INTO rate_limit (key, count, last_request)
            VALUES ($1, 1, $2)
            ON CONFLICT (key) DO UPDATE SET
                count = CASE
                    WHEN $2 - rate_limit.last_request >= $3 THEN 1
                    ELSE rate_limit.count + 1
                END,
                last_request = CASE
                    WHEN $2 - rate_limit.last_request >= $3 THEN $2
                    ELSE rate_limit.last_request
                END
            RETURNING count, last_request
            "#,
        )
        .bind(key)
        .bind(now_ms)
        .bind(window_ms)
        .fetch_one(&self.pool)
        .await
        .map_err(AuthError::from)?;

        let window = RateLimitWindow {
            count: count as u32,
            last_request_ms: last_request,
        };
        Ok(window.decision(config))
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    email_verified: bool,
    image: Option<String>,
    role: String,
    banned: bool,
    ban_reason: Option<String>,
    ban_expires: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let email = Email::new(&self.email)
            .map_err(|e| AuthError::Internal(format!("Invalid stored email: {}", e)))?;

        let ban = BanState {
            banned: self.banned,
            reason: self.ban_reason,
            expires: self.ban_expires,
        };

        Ok(User {
            user_id: UserId::from_uuid(self.id),
            name: self.name,
            email,
            email_verified: self.email_verified,
            image: self.image,
            role: UserRole::from_code(&self.role).unwrap_or_default(),
            ban,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    account_id: String,
    provider_id: String,
    user_id: Uuid,
    access_token: Option<String>,
    refresh_token: Option<String>,
    id_token: Option<String>,
    access_token_expires_at: Option<DateTime<Utc>>,
    refresh_token_expires_at: Option<DateTime<Utc>>,
    scope: Option<String>,
    password: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> AuthResult<Account> {
        let password = self
            .password
            .map(HashedPassword::from_phc_string)
            .transpose()
            .map_err(|e| AuthError::Internal(format!("Invalid stored password hash: {}", e)))?;

        Ok(Account {
            account_id: AccountId::from_uuid(self.id),
            provider_account_id: self.account_id,
            provider_id: self.provider_id,
            user_id: UserId::from_uuid(self.user_id),
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            id_token: self.id_token,
            access_token_expires_at: self.access_token_expires_at,
            refresh_token_expires_at: self.refresh_token_expires_at,
            scope: self.scope,
            password,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: Uuid,
    user_id: Uuid,
    token: String,
    expires_at: DateTime<Utc>,
    ip_address: Option<String>,
    user_agent: Option<String>,
    impersonated_by: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> Session {
        Session {
            session_id: SessionId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            token: self.token,
            expires_at: self.expires_at,
            ip_address: self.ip_address,
            user_agent: self.user_agent,
            impersonated_by: self.impersonated_by.map(UserId::from_uuid),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct VerificationRow {
    id: Uuid,
    identifier: String,
    value: String,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl VerificationRow {
    fn into_verification(self) -> Verification {
        Verification {
            verification_id: VerificationId::from_uuid(self.id),
            identifier: self.identifier,
            value: self.value,
            expires_at: self.expires_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
