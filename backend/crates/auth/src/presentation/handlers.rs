//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{AppendHeaders, IntoResponse};
use std::sync::Arc;

use platform::client::extract_client_info;
use platform::cookie::{CookieConfig, extract_cookie};
use platform::rate_limit::RateLimitStore;

use crate::application::cookie_cache;
use crate::application::{
    AdminUseCase, AuthConfig, BanInput, GetSessionUseCase, ResolvedSession, SignInInput,
    SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase, VerifyEmailUseCase,
};
use crate::domain::repository::{
    AccountRepository, SessionRepository, UserRepository, VerificationRepository,
};
use crate::domain::value_object::UserRole;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    BanUserRequest, ImpersonateRequest, OkResponse, SessionStatusResponse, SetRoleRequest,
    SignInActionResponse, SignInRequest, SignUpRequest, SignUpResponse, UnbanUserRequest,
    VerifyEmailRequest,
};
use kernel::id::UserId;

/// Name of the session cookie (prefixed with the configured prefix)
pub const SESSION_COOKIE: &str = "session_token";
/// Cookie holding the admin's parked session during impersonation
pub const ADMIN_COOKIE: &str = "admin_token";

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R, L>
where
    R: UserRepository
        + AccountRepository
        + SessionRepository
        + VerificationRepository
        + Clone
        + Send
        + Sync
        + 'static,
    L: RateLimitStore + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub rate_limiter: Arc<L>,
    pub config: Arc<AuthConfig>,
}

impl<R, L> AuthAppState<R, L>
where
    R: UserRepository
        + AccountRepository
        + SessionRepository
        + VerificationRepository
        + Clone
        + Send
        + Sync
        + 'static,
    L: RateLimitStore + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, rate_limiter: L, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            rate_limiter: Arc::new(rate_limiter),
            config: Arc::new(config),
        }
    }

    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            prefix: self.config.cookie_prefix.clone(),
            name: SESSION_COOKIE.to_string(),
            secure: self.config.cookie_secure,
            http_only: true,
            same_site: self.config.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.config.session_expires_in.as_secs() as i64),
        }
    }

    fn admin_cookie(&self) -> CookieConfig {
        CookieConfig {
            prefix: self.config.cookie_prefix.clone(),
            name: ADMIN_COOKIE.to_string(),
            secure: self.config.cookie_secure,
            http_only: true,
            same_site: self.config.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.config.impersonation_ttl.as_secs() as i64),
        }
    }

    fn session_cookie_value(&self, headers: &HeaderMap) -> Option<String> {
        extract_cookie(headers, &self.session_cookie().full_name())
    }

    fn admin_cookie_value(&self, headers: &HeaderMap) -> Option<String> {
        extract_cookie(headers, &self.admin_cookie().full_name())
    }

    /// Resolve the current session from request headers.
    pub async fn resolve_session(&self, headers: &HeaderMap) -> AuthResult<Option<ResolvedSession>> {
        let cookie = self.session_cookie_value(headers);
        let use_case = GetSessionUseCase::new(
            self.repo.clone(),
            self.repo.clone(),
            self.config.clone(),
        );
        use_case.execute(cookie.as_deref()).await
    }

    /// Resolve the session or fail. A cookie with a valid signature that
    /// no longer resolves means a session that lapsed or was revoked, so
    /// the caller can tell a timed-out user from an anonymous one.
    pub async fn require_session(&self, headers: &HeaderMap) -> AuthResult<ResolvedSession> {
        let cookie = self.session_cookie_value(headers);
        if let Some(resolved) = self.resolve_session(headers).await? {
            return Ok(resolved);
        }

        let signed = cookie
            .as_deref()
            .and_then(|v| cookie_cache::open(v, &self.config.session_secret))
            .is_some();
        if signed {
            Err(AuthError::SessionExpired)
        } else {
            Err(AuthError::Unauthorized)
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/sign-up
pub async fn sign_up<R, L>(
    State(state): State<AuthAppState<R, L>>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<Json<SignUpResponse>>
where
    R: UserRepository
        + AccountRepository
        + SessionRepository
        + VerificationRepository
        + Clone
        + Send
        + Sync
        + 'static,
    L: RateLimitStore + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let input = SignUpInput {
        name: req.name,
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok(Json(SignUpResponse {
        user_id: output.user.user_id.into_uuid(),
        email: output.user.email.into_string(),
    }))
}

// ============================================================================
// Sign In (form action contract)
// ============================================================================

/// POST /api/auth/sign-in
///
/// Always answers HTTP 200 with `{success, error}` so form clients never
/// see a thrown failure; the session cookie rides along on success.
pub async fn sign_in<R, L>(
    State(state): State<AuthAppState<R, L>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Json(req): Json<SignInRequest>,
) -> impl IntoResponse
where
    R: UserRepository
        + AccountRepository
        + SessionRepository
        + VerificationRepository
        + Clone
        + Send
        + Sync
        + 'static,
    L: RateLimitStore + Clone + Send + Sync + 'static,
{
    let client = extract_client_info(&headers, Some(addr.ip()));

    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.rate_limiter.clone(),
        state.config.clone(),
    );

    let input = SignInInput {
        email: req.email,
        password: req.password,
    };

    match use_case.execute(input, client).await {
        Ok(output) => {
            let cookie = state.session_cookie().build_set_cookie(&output.cookie_value);
            (
                StatusCode::OK,
                [(header::SET_COOKIE, cookie)],
                Json(SignInActionResponse::ok()),
            )
                .into_response()
        }
        Err(e) => {
            e.log();
            (StatusCode::OK, Json(SignInActionResponse::failed(e.user_message())))
                .into_response()
        }
    }
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /api/auth/sign-out
pub async fn sign_out<R, L>(
    State(state): State<AuthAppState<R, L>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    R: UserRepository
        + AccountRepository
        + SessionRepository
        + VerificationRepository
        + Clone
        + Send
        + Sync
        + 'static,
    L: RateLimitStore + Clone + Send + Sync + 'static,
{
    let cookie = state.session_cookie_value(&headers);

    let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
    // Clear the cookie even if session deletion fails
    let _ = use_case.execute(cookie.as_deref()).await;

    (
        StatusCode::NO_CONTENT,
        AppendHeaders([
            (header::SET_COOKIE, state.session_cookie().build_delete_cookie()),
            (header::SET_COOKIE, state.admin_cookie().build_delete_cookie()),
        ]),
    )
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/session
pub async fn session_status<R, L>(
    State(state): State<AuthAppState<R, L>>,
    headers: HeaderMap,
) -> AuthResult<axum::response::Response>
where
    R: UserRepository
        + AccountRepository
        + SessionRepository
        + VerificationRepository
        + Clone
        + Send
        + Sync
        + 'static,
    L: RateLimitStore + Clone + Send + Sync + 'static,
{
    let resolved = state.resolve_session(&headers).await?;

    let Some(resolved) = resolved else {
        return Ok(Json(SessionStatusResponse::anonymous()).into_response());
    };

    let body = SessionStatusResponse {
        authenticated: true,
        user_id: Some(resolved.view.user_id.into_uuid()),
        role: Some(resolved.view.role.code().to_string()),
        expires_at_ms: Some(resolved.view.expires_at_ms),
        impersonated_by: resolved.view.impersonated_by.map(|id| id.into_uuid()),
    };

    // Reissue the cookie when the snapshot was refreshed
    if let Some(fresh) = resolved.refreshed_cookie {
        let cookie = state.session_cookie().build_set_cookie(&fresh);
        Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], Json(body)).into_response())
    } else {
        Ok(Json(body).into_response())
    }
}

// ============================================================================
// Email Verification
// ============================================================================

/// POST /api/auth/verify-email
pub async fn verify_email<R, L>(
    State(state): State<AuthAppState<R, L>>,
    Json(req): Json<VerifyEmailRequest>,
) -> AuthResult<Json<OkResponse>>
where
    R: UserRepository
        + AccountRepository
        + SessionRepository
        + VerificationRepository
        + Clone
        + Send
        + Sync
        + 'static,
    L: RateLimitStore + Clone + Send + Sync + 'static,
{
    let use_case = VerifyEmailUseCase::new(state.repo.clone(), state.repo.clone());
    use_case.execute(&req.token).await?;
    Ok(Json(OkResponse::ok()))
}

// ============================================================================
// Admin
// ============================================================================

fn admin_use_case<R, L>(state: &AuthAppState<R, L>) -> AdminUseCase<R, R>
where
    R: UserRepository
        + AccountRepository
        + SessionRepository
        + VerificationRepository
        + Clone
        + Send
        + Sync
        + 'static,
    L: RateLimitStore + Clone + Send + Sync + 'static,
{
    AdminUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone())
}

/// POST /api/auth/admin/set-role
pub async fn set_role<R, L>(
    State(state): State<AuthAppState<R, L>>,
    headers: HeaderMap,
    Json(req): Json<SetRoleRequest>,
) -> AuthResult<Json<OkResponse>>
where
    R: UserRepository
        + AccountRepository
        + SessionRepository
        + VerificationRepository
        + Clone
        + Send
        + Sync
        + 'static,
    L: RateLimitStore + Clone + Send + Sync + 'static,
{
    let actor = state.require_session(&headers).await?.view;
    let role = UserRole::from_code(&req.role)
        .ok_or_else(|| AuthError::Validation(format!("Unknown role: {}", req.role)))?;

    admin_use_case(&state)
        .set_role(&actor, UserId::from_uuid(req.user_id), role)
        .await?;

    Ok(Json(OkResponse::ok()))
}

/// POST /api/auth/admin/ban-user
pub async fn ban_user<R, L>(
    State(state): State<AuthAppState<R, L>>,
    headers: HeaderMap,
    Json(req): Json<BanUserRequest>,
) -> AuthResult<Json<OkResponse>>
where
    R: UserRepository
        + AccountRepository
        + SessionRepository
        + VerificationRepository
        + Clone
        + Send
        + Sync
        + 'static,
    L: RateLimitStore + Clone + Send + Sync + 'static,
{
    let actor = state.require_session(&headers).await?.view;

    admin_use_case(&state)
        .ban(
            &actor,
            BanInput {
                target: UserId::from_uuid(req.user_id),
                reason: req.ban_reason,
                expires_in_secs: req.ban_expires_in,
            },
        )
        .await?;

    Ok(Json(OkResponse::ok()))
}

/// POST /api/auth/admin/unban-user
pub async fn unban_user<R, L>(
    State(state): State<AuthAppState<R, L>>,
    headers: HeaderMap,
    Json(req): Json<UnbanUserRequest>,
) -> AuthResult<Json<OkResponse>>
where
    R: UserRepository
        + AccountRepository
        + SessionRepository
        + VerificationRepository
        + Clone
        + Send
        + Sync
        + 'static,
    L: RateLimitStore + Clone + Send + Sync + 'static,
{
    let actor = state.require_session(&headers).await?.view;

    admin_use_case(&state)
        .unban(&actor, UserId::from_uuid(req.user_id))
        .await?;

    Ok(Json(OkResponse::ok()))
}

/// POST /api/auth/admin/impersonate
///
/// Parks the admin's own cookie under the admin cookie name and swaps the
/// session cookie for the impersonation session.
pub async fn impersonate<R, L>(
    State(state): State<AuthAppState<R, L>>,
    headers: HeaderMap,
    Json(req): Json<ImpersonateRequest>,
) -> AuthResult<axum::response::Response>
where
    R: UserRepository
        + AccountRepository
        + SessionRepository
        + VerificationRepository
        + Clone
        + Send
        + Sync
        + 'static,
    L: RateLimitStore + Clone + Send + Sync + 'static,
{
    let actor = state.require_session(&headers).await?.view;
    let admin_cookie_value = state
        .session_cookie_value(&headers)
        .ok_or(AuthError::Unauthorized)?;

    let output = admin_use_case(&state)
        .impersonate(&actor, UserId::from_uuid(req.user_id))
        .await?;

    let session_cookie = state.session_cookie().build_set_cookie(&output.cookie_value);
    let parked_admin = state.admin_cookie().build_set_cookie(&admin_cookie_value);

    Ok((
        StatusCode::OK,
        AppendHeaders([
            (header::SET_COOKIE, session_cookie),
            (header::SET_COOKIE, parked_admin),
        ]),
        Json(OkResponse::ok()),
    )
        .into_response())
}

/// POST /api/auth/admin/stop-impersonating
///
/// Deletes the impersonation session and restores the parked admin cookie.
pub async fn stop_impersonating<R, L>(
    State(state): State<AuthAppState<R, L>>,
    headers: HeaderMap,
) -> AuthResult<axum::response::Response>
where
    R: UserRepository
        + AccountRepository
        + SessionRepository
        + VerificationRepository
        + Clone
        + Send
        + Sync
        + 'static,
    L: RateLimitStore + Clone + Send + Sync + 'static,
{
    let current = state.require_session(&headers).await?.view;
    let parked = state.admin_cookie_value(&headers);

    admin_use_case(&state).stop_impersonating(&current).await?;

    let mut response_cookies = Vec::new();
    match parked {
        Some(admin_value) => {
            response_cookies.push((
                header::SET_COOKIE,
                state.session_cookie().build_set_cookie(&admin_value),
            ));
        }
        None => {
            response_cookies.push((
                header::SET_COOKIE,
                state.session_cookie().build_delete_cookie(),
            ));
        }
    }
    response_cookies.push((header::SET_COOKIE, state.admin_cookie().build_delete_cookie()));

    let mut response = (StatusCode::OK, Json(OkResponse::ok())).into_response();
    for (name, value) in response_cookies {
        if let Ok(value) = axum::http::HeaderValue::from_str(&value) {
            response.headers_mut().append(name, value);
        }
    }
    Ok(response)
}
