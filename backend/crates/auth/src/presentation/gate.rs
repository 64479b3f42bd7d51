//! Dashboard Gate
//!
//! `/dashboard` is never rendered. Every hit is redirected by role:
//! anonymous visitors to the sign-in page, admins to the admin area,
//! everyone else to the user area. The decision itself is a pure
//! function so the middleware and the handler cannot drift apart.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use platform::cookie::set_cookie_header;
use platform::rate_limit::RateLimitStore;

use crate::application::SessionView;
use crate::domain::repository::{
    AccountRepository, SessionRepository, UserRepository, VerificationRepository,
};
use crate::presentation::handlers::AuthAppState;

/// The gated entry path
pub const PROTECTED_PATH: &str = "/dashboard";
/// Where anonymous visitors land
pub const SIGN_IN_PATH: &str = "/sign-in";
/// Where admins land
pub const ADMIN_AREA_PATH: &str = "/admin";
/// Where regular users land
pub const USER_AREA_PATH: &str = "/user";

/// Whether a path falls under the gate. Everything else passes through
/// with no session check.
pub fn is_protected(path: &str) -> bool {
    path == PROTECTED_PATH
}

/// Decide where a dashboard hit goes. Total over its input: any session
/// state maps to exactly one destination.
pub fn redirect_target(session: Option<&SessionView>) -> &'static str {
    match session {
        None => SIGN_IN_PATH,
        Some(view) if view.is_admin() => ADMIN_AREA_PATH,
        Some(_) => USER_AREA_PATH,
    }
}

/// Middleware form of the gate. Requests outside the protected path pass
/// through untouched; dashboard hits are answered with a redirect and
/// never reach an inner handler. Session resolution failures count as
/// anonymous, so the gate always redirects and never errors.
pub async fn dashboard_gate<R, L>(
    axum::extract::State(state): axum::extract::State<AuthAppState<R, L>>,
    req: Request<Body>,
    next: Next,
) -> Response
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
    if !is_protected(req.uri().path()) {
        return next.run(req).await;
    }

    let resolved = state
        .resolve_session(req.headers())
        .await
        .unwrap_or_default();

    let target = redirect_target(resolved.as_ref().map(|r| &r.view));

    match resolved.and_then(|r| r.refreshed_cookie) {
        Some(cookie) => {
            let mut response = Redirect::temporary(target).into_response();
            response.headers_mut().append(
                header::SET_COOKIE,
                set_cookie_header(&state.session_cookie(), &cookie),
            );
            response
        }
        None => Redirect::temporary(target).into_response(),
    }
}

/// Handler form of the gate, for mounting `/dashboard` directly.
pub async fn dashboard_redirect<R, L>(
    axum::extract::State(state): axum::extract::State<AuthAppState<R, L>>,
    headers: axum::http::HeaderMap,
) -> Response
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
    let resolved = state.resolve_session(&headers).await.unwrap_or_default();
    let target = redirect_target(resolved.as_ref().map(|r| &r.view));
    Redirect::temporary(target).into_response()
}

/// Middleware that only lets admins through. Anonymous and regular users
/// get 401 and 403 respectively.
pub async fn require_admin<R, L>(
    axum::extract::State(state): axum::extract::State<AuthAppState<R, L>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
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
    let resolved = state
        .resolve_session(req.headers())
        .await
        .unwrap_or_default();

    match resolved {
        Some(r) if r.view.is_admin() => Ok(next.run(req).await),
        Some(_) => Err(StatusCode::FORBIDDEN.into_response()),
        None => Err(StatusCode::UNAUTHORIZED.into_response()),
    }
}
