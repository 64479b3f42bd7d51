//! Auth Router

use axum::{
    Router,
    middleware,
    routing::{get, post},
};

use platform::rate_limit::RateLimitStore;

use crate::application::AuthConfig;
use crate::domain::repository::{
    AccountRepository, SessionRepository, UserRepository, VerificationRepository,
};
use crate::infra::postgres::{PgAuthRepository, PgRateLimitStore};
use crate::presentation::gate;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL backing stores
pub fn auth_router(
    repo: PgAuthRepository,
    rate_limiter: PgRateLimitStore,
    config: AuthConfig,
) -> Router {
    auth_router_generic(repo, rate_limiter, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R, L>(repo: R, rate_limiter: L, config: AuthConfig) -> Router
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
    let state = AuthAppState::new(repo, rate_limiter, config);

    Router::new()
        .route("/sign-up", post(handlers::sign_up::<R, L>))
        .route("/sign-in", post(handlers::sign_in::<R, L>))
        .route("/sign-out", post(handlers::sign_out::<R, L>))
        .route("/session", get(handlers::session_status::<R, L>))
        .route("/verify-email", post(handlers::verify_email::<R, L>))
        .route("/admin/set-role", post(handlers::set_role::<R, L>))
        .route("/admin/ban-user", post(handlers::ban_user::<R, L>))
        .route("/admin/unban-user", post(handlers::unban_user::<R, L>))
        .route("/admin/impersonate", post(handlers::impersonate::<R, L>))
        .route(
            "/admin/stop-impersonating",
            post(handlers::stop_impersonating::<R, L>),
        )
        .with_state(state)
}

/// Router exposing the gated dashboard entry point
pub fn gate_router<R, L>(repo: R, rate_limiter: L, config: AuthConfig) -> Router
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
    let state = AuthAppState::new(repo, rate_limiter, config);

    Router::new()
        .route(gate::PROTECTED_PATH, get(gate::dashboard_redirect::<R, L>))
        .with_state(state)
}

/// Layer a router so only admins can reach it
pub fn admin_gated<R, L>(router: Router, repo: R, rate_limiter: L, config: AuthConfig) -> Router
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
    let state = AuthAppState::new(repo, rate_limiter, config);
    router.layer(middleware::from_fn_with_state(
        state,
        gate::require_admin::<R, L>,
    ))
}
