//! Use-case level tests over in-memory stores.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};

use crate::application::cookie_cache::{self, SessionCachePayload};
use crate::application::{
    AdminUseCase, AuthConfig, BanInput, GetSessionUseCase, SignInInput, SignInUseCase,
    SignOutUseCase,
};
use crate::domain::entity::{Account, Session, User, Verification};
use crate::domain::repository::{
    AccountRepository, SessionRepository, UserRepository, VerificationRepository,
};
use crate::domain::value_object::{Email, UserRole};
use crate::error::{AuthError, AuthResult};
use crate::presentation::gate::{
    ADMIN_AREA_PATH, PROTECTED_PATH, SIGN_IN_PATH, USER_AREA_PATH, dashboard_gate,
    dashboard_redirect, is_protected, redirect_target,
};
use crate::presentation::handlers::AuthAppState;
use kernel::id::UserId;
use platform::client::ClientInfo;
use platform::password::ClearTextPassword;
use platform::rate_limit::{
    RateLimitConfig, RateLimitDecision, RateLimitStore, RateLimitWindow,
};

// ============================================================================
// In-memory stores
// ============================================================================

#[derive(Clone, Default)]
struct MemStore {
    inner: Arc<Mutex<MemStoreInner>>,
}

#[derive(Default)]
struct MemStoreInner {
    users: HashMap<UserId, User>,
    accounts: Vec<Account>,
    sessions: HashMap<String, Session>,
    verifications: HashMap<String, Verification>,
}

impl UserRepository for MemStore {
    async fn create(&self, user: &User) -> AuthResult<()> {
        self.inner
            .lock()
            .unwrap()
            .users
            .insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.inner.lock().unwrap().users.get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .users
            .values()
            .find(|u| u.email == *email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .users
            .values()
            .any(|u| u.email == *email))
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        self.inner
            .lock()
            .unwrap()
            .users
            .insert(user.user_id, user.clone());
        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> AuthResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.users.remove(user_id);
        inner.sessions.retain(|_, s| s.user_id != *user_id);
        inner.accounts.retain(|a| a.user_id != *user_id);
        Ok(())
    }
}

impl AccountRepository for MemStore {
    async fn create(&self, account: &Account) -> AuthResult<()> {
        self.inner.lock().unwrap().accounts.push(account.clone());
        Ok(())
    }

    async fn find_credential_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<Account>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .accounts
            .iter()
            .find(|a| a.user_id == *user_id && a.is_credential())
            .cloned())
    }

    async fn update(&self, account: &Account) -> AuthResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(slot) = inner
            .accounts
            .iter_mut()
            .find(|a| a.account_id == account.account_id)
        {
            *slot = account.clone();
        }
        Ok(())
    }
}

impl SessionRepository for MemStore {
    async fn create(&self, session: &Session) -> AuthResult<()> {
        self.inner
            .lock()
            .unwrap()
            .sessions
            .insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> AuthResult<Option<Session>> {
        Ok(self.inner.lock().unwrap().sessions.get(token).cloned())
    }

    async fn update(&self, session: &Session) -> AuthResult<()> {
        self.inner
            .lock()
            .unwrap()
            .sessions
            .insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn delete_by_token(&self, token: &str) -> AuthResult<()> {
        self.inner.lock().unwrap().sessions.remove(token);
        Ok(())
    }

    async fn delete_all_for_user(&self, user_id: &UserId) -> AuthResult<u64> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.sessions.len();
        inner.sessions.retain(|_, s| s.user_id != *user_id);
        Ok((before - inner.sessions.len()) as u64)
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now = Utc::now();
        let mut inner = self.inner.lock().unwrap();
        let before = inner.sessions.len();
        inner.sessions.retain(|_, s| !s.is_expired(now));
        Ok((before - inner.sessions.len()) as u64)
    }
}

impl VerificationRepository for MemStore {
    async fn create(&self, verification: &Verification) -> AuthResult<()> {
        self.inner
            .lock()
            .unwrap()
            .verifications
            .insert(verification.value.clone(), verification.clone());
        Ok(())
    }

    async fn find_by_value(&self, value: &str) -> AuthResult<Option<Verification>> {
        Ok(self.inner.lock().unwrap().verifications.get(value).cloned())
    }

    async fn delete(&self, value: &str) -> AuthResult<()> {
        self.inner.lock().unwrap().verifications.remove(value);
        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now = Utc::now();
        let mut inner = self.inner.lock().unwrap();
        let before = inner.verifications.len();
        inner.verifications.retain(|_, v| !v.is_expired(now));
        Ok((before - inner.verifications.len()) as u64)
    }
}

#[derive(Clone, Default)]
struct MemRateLimit {
    windows: Arc<Mutex<HashMap<String, RateLimitWindow>>>,
}

impl RateLimitStore for MemRateLimit {
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitDecision, Box<dyn std::error::Error + Send + Sync>> {
        let now_ms = Utc::now().timestamp_millis();
        let mut windows = self.windows.lock().unwrap();
        let window = windows
            .get(key)
            .copied()
            .unwrap_or_else(|| RateLimitWindow::first(now_ms));
        let (next, decision) = window.register(now_ms, config);
        windows.insert(key.to_string(), next);
        Ok(decision)
    }
}

// ============================================================================
// Fixtures
// ============================================================================

fn test_config() -> Arc<AuthConfig> {
    let mut config = AuthConfig::with_random_secret();
    config.cookie_secure = false;
    Arc::new(config)
}

fn client() -> ClientInfo {
    ClientInfo::new(Some("203.0.113.7".parse().unwrap()), None)
}

async fn seed_user(
    store: &MemStore,
    email: &str,
    password: &str,
    role: UserRole,
    config: &AuthConfig,
) -> User {
    let mut user = User::new("Test User".to_string(), Email::new(email).unwrap());
    user.set_role(role);
    UserRepository::create(store, &user).await.unwrap();

    let hash = ClearTextPassword::new(password.to_string())
        .unwrap()
        .hash(config.pepper())
        .unwrap();
    AccountRepository::create(store, &Account::credential(user.user_id, hash))
        .await
        .unwrap();

    user
}

fn sign_in_use_case(
    store: &MemStore,
    limiter: &MemRateLimit,
    config: &Arc<AuthConfig>,
) -> SignInUseCase<MemStore, MemStore, MemStore, MemRateLimit> {
    SignInUseCase::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(limiter.clone()),
        config.clone(),
    )
}

fn get_session_use_case(
    store: &MemStore,
    config: &Arc<AuthConfig>,
) -> GetSessionUseCase<MemStore, MemStore> {
    GetSessionUseCase::new(Arc::new(store.clone()), Arc::new(store.clone()), config.clone())
}

// ============================================================================
// Sign in
// ============================================================================

#[tokio::test]
async fn sign_in_with_correct_password_creates_session() {
    let store = MemStore::default();
    let limiter = MemRateLimit::default();
    let config = test_config();
    let user = seed_user(&store, "alice@example.com", "correct horse battery", UserRole::User, &config).await;

    let output = sign_in_use_case(&store, &limiter, &config)
        .execute(
            SignInInput {
                email: "alice@example.com".to_string(),
                password: "correct horse battery".to_string(),
            },
            client(),
        )
        .await
        .unwrap();

    assert_eq!(output.session.user_id, user.user_id);

    // The sealed cookie resolves straight back to the session
    let resolved = get_session_use_case(&store, &config)
        .execute(Some(&output.cookie_value))
        .await
        .unwrap()
        .expect("session should resolve");
    assert_eq!(resolved.view.user_id, user.user_id);
    assert!(resolved.refreshed_cookie.is_none(), "fresh snapshot needs no reissue");
}

#[tokio::test]
async fn sign_in_with_wrong_password_is_invalid_credentials() {
    let store = MemStore::default();
    let limiter = MemRateLimit::default();
    let config = test_config();
    seed_user(&store, "alice@example.com", "correct horse battery", UserRole::User, &config).await;

    let err = sign_in_use_case(&store, &limiter, &config)
        .execute(
            SignInInput {
                email: "alice@example.com".to_string(),
                password: "wrong password".to_string(),
            },
            client(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials));
    assert_eq!(err.user_message(), "Invalid credentials");
}

#[tokio::test]
async fn sign_in_with_unknown_email_is_indistinguishable_from_wrong_password() {
    let store = MemStore::default();
    let limiter = MemRateLimit::default();
    let config = test_config();

    let err = sign_in_use_case(&store, &limiter, &config)
        .execute(
            SignInInput {
                email: "nobody@example.com".to_string(),
                password: "whatever password".to_string(),
            },
            client(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn banned_user_gets_the_configured_ban_message() {
    let store = MemStore::default();
    let limiter = MemRateLimit::default();
    let config = test_config();
    let mut user =
        seed_user(&store, "bob@example.com", "some good password", UserRole::User, &config).await;

    user.apply_ban("violation".to_string(), None);
    UserRepository::update(&store, &user).await.unwrap();

    let err = sign_in_use_case(&store, &limiter, &config)
        .execute(
            SignInInput {
                email: "bob@example.com".to_string(),
                password: "some good password".to_string(),
            },
            client(),
        )
        .await
        .unwrap_err();

    match err {
        AuthError::AccountBanned(msg) => assert_eq!(msg, config.banned_user_message),
        other => panic!("expected AccountBanned, got {:?}", other),
    }
}

#[tokio::test]
async fn lapsed_temporary_ban_is_lifted_on_sign_in() {
    let store = MemStore::default();
    let limiter = MemRateLimit::default();
    let config = test_config();
    let mut user =
        seed_user(&store, "carol@example.com", "some good password", UserRole::User, &config).await;

    user.apply_ban("cooldown".to_string(), Some(Duration::seconds(-60)));
    UserRepository::update(&store, &user).await.unwrap();

    sign_in_use_case(&store, &limiter, &config)
        .execute(
            SignInInput {
                email: "carol@example.com".to_string(),
                password: "some good password".to_string(),
            },
            client(),
        )
        .await
        .expect("lapsed ban should not block sign-in");

    let stored = UserRepository::find_by_id(&store, &user.user_id)
        .await
        .unwrap()
        .unwrap();
    assert!(!stored.ban.banned);
}

#[tokio::test]
async fn eleventh_attempt_in_window_is_rate_limited() {
    let store = MemStore::default();
    let limiter = MemRateLimit::default();
    let config = test_config();
    seed_user(&store, "dave@example.com", "correct horse battery", UserRole::User, &config).await;

    let use_case = sign_in_use_case(&store, &limiter, &config);
    for _ in 0..10 {
        let _ = use_case
            .execute(
                SignInInput {
                    email: "dave@example.com".to_string(),
                    password: "wrong password".to_string(),
                },
                client(),
            )
            .await;
    }

    // Even the correct password is refused once the window is spent
    let err = use_case
        .execute(
            SignInInput {
                email: "dave@example.com".to_string(),
                password: "correct horse battery".to_string(),
            },
            client(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::RateLimited));
}

// ============================================================================
// Session resolution and the gate
// ============================================================================

#[tokio::test]
async fn missing_and_garbage_cookies_resolve_to_no_session() {
    let store = MemStore::default();
    let config = test_config();
    let use_case = get_session_use_case(&store, &config);

    assert!(use_case.execute(None).await.unwrap().is_none());
    assert!(use_case.execute(Some("garbage")).await.unwrap().is_none());
    assert!(use_case.execute(Some("a.b.c")).await.unwrap().is_none());
}

#[test]
fn gate_only_covers_the_dashboard_path() {
    assert!(is_protected(PROTECTED_PATH));
    assert!(!is_protected("/"));
    assert!(!is_protected("/api/auth/sign-in"));
    assert!(!is_protected("/dashboard/nested"));
}

#[tokio::test]
async fn gate_routes_anonymous_users_and_admins() {
    let store = MemStore::default();
    let limiter = MemRateLimit::default();
    let config = test_config();

    assert_eq!(redirect_target(None), SIGN_IN_PATH);

    seed_user(&store, "user@example.com", "some good password", UserRole::User, &config).await;
    seed_user(&store, "admin@example.com", "some good password", UserRole::Admin, &config).await;

    let use_case = sign_in_use_case(&store, &limiter, &config);
    let session_uc = get_session_use_case(&store, &config);

    for (email, expected) in [
        ("user@example.com", USER_AREA_PATH),
        ("admin@example.com", ADMIN_AREA_PATH),
    ] {
        let output = use_case
            .execute(
                SignInInput {
                    email: email.to_string(),
                    password: "some good password".to_string(),
                },
                client(),
            )
            .await
            .unwrap();

        let resolved = session_uc
            .execute(Some(&output.cookie_value))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(redirect_target(Some(&resolved.view)), expected);
    }
}

#[tokio::test]
async fn promotion_becomes_visible_after_snapshot_refresh() {
    let store = MemStore::default();
    let limiter = MemRateLimit::default();
    let config = test_config();
    let user =
        seed_user(&store, "eve@example.com", "some good password", UserRole::User, &config).await;
    let admin =
        seed_user(&store, "root@example.com", "some good password", UserRole::Admin, &config).await;

    let output = sign_in_use_case(&store, &limiter, &config)
        .execute(
            SignInInput {
                email: "eve@example.com".to_string(),
                password: "some good password".to_string(),
            },
            client(),
        )
        .await
        .unwrap();

    let session_uc = get_session_use_case(&store, &config);

    // Fresh snapshot still says user, even after the promotion lands
    let admin_view = crate::application::SessionView {
        token: "admin-token".to_string(),
        user_id: admin.user_id,
        role: UserRole::Admin,
        expires_at_ms: i64::MAX,
        impersonated_by: None,
    };
    AdminUseCase::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        config.clone(),
    )
    .set_role(&admin_view, user.user_id, UserRole::Admin)
    .await
    .unwrap();

    let cached = session_uc
        .execute(Some(&output.cookie_value))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(redirect_target(Some(&cached.view)), USER_AREA_PATH);

    // Re-seal the same snapshot as if it were eleven minutes old
    let payload = cookie_cache::open(&output.cookie_value, &config.session_secret).unwrap();
    let stale = SessionCachePayload {
        issued_at_ms: payload.issued_at_ms - 11 * 60 * 1000,
        ..payload
    };
    let stale_cookie = cookie_cache::seal(&stale, &config.session_secret);

    let refreshed = session_uc
        .execute(Some(&stale_cookie))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(redirect_target(Some(&refreshed.view)), ADMIN_AREA_PATH);
    assert!(refreshed.refreshed_cookie.is_some(), "stale snapshot must be reissued");
}

#[tokio::test]
async fn gate_decision_is_stable_across_repeated_resolution() {
    let store = MemStore::default();
    let limiter = MemRateLimit::default();
    let config = test_config();
    seed_user(&store, "grace@example.com", "some good password", UserRole::User, &config).await;

    let output = sign_in_use_case(&store, &limiter, &config)
        .execute(
            SignInInput {
                email: "grace@example.com".to_string(),
                password: "some good password".to_string(),
            },
            client(),
        )
        .await
        .unwrap();

    let session_uc = get_session_use_case(&store, &config);

    // Fresh cookie twice
    for _ in 0..2 {
        let resolved = session_uc
            .execute(Some(&output.cookie_value))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(redirect_target(Some(&resolved.view)), USER_AREA_PATH);
    }

    // A stale cookie revalidates and is reissued; the reissued cookie and
    // the original stale one keep landing on the same target
    let payload = cookie_cache::open(&output.cookie_value, &config.session_secret).unwrap();
    let stale = SessionCachePayload {
        issued_at_ms: payload.issued_at_ms - 11 * 60 * 1000,
        ..payload
    };
    let stale_cookie = cookie_cache::seal(&stale, &config.session_secret);

    let first = session_uc
        .execute(Some(&stale_cookie))
        .await
        .unwrap()
        .unwrap();
    let reissued = first.refreshed_cookie.clone().unwrap();
    let second = session_uc
        .execute(Some(&stale_cookie))
        .await
        .unwrap()
        .unwrap();
    let via_reissued = session_uc
        .execute(Some(&reissued))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        redirect_target(Some(&first.view)),
        redirect_target(Some(&second.view)),
    );
    assert_eq!(
        redirect_target(Some(&first.view)),
        redirect_target(Some(&via_reissued.view)),
    );
}

#[tokio::test]
async fn gate_middleware_redirects_dashboard_and_passes_everything_else() {
    use axum::body::Body;
    use axum::http::Request;
    use axum::http::StatusCode;
    use axum::http::header;
    use axum::routing::get;
    use axum::{Router, middleware};
    use tower::ServiceExt;

    let store = MemStore::default();
    let limiter = MemRateLimit::default();
    let config = test_config();
    seed_user(
        &store,
        "root@example.com",
        "some good password",
        UserRole::Admin,
        &config,
    )
    .await;

    let state = AuthAppState::new(store.clone(), limiter.clone(), (*config).clone());
    let app = Router::new()
        .route("/api/health", get(|| async { "ok" }))
        .route(
            PROTECTED_PATH,
            get(dashboard_redirect::<MemStore, MemRateLimit>),
        )
        .with_state(state.clone())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            dashboard_gate::<MemStore, MemRateLimit>,
        ));

    // Anonymous dashboard hit redirects to sign-in
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(PROTECTED_PATH)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        SIGN_IN_PATH,
    );

    // Signed-in admin is routed to the admin area
    let output = sign_in_use_case(&store, &limiter, &config)
        .execute(
            SignInInput {
                email: "root@example.com".to_string(),
                password: "some good password".to_string(),
            },
            client(),
        )
        .await
        .unwrap();
    let cookie = format!(
        "{}={}",
        state.session_cookie().full_name(),
        output.cookie_value,
    );

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(PROTECTED_PATH)
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        ADMIN_AREA_PATH,
    );

    // Other paths pass straight through: no redirect, and a stale cookie
    // is not revalidated or reissued along the way
    let payload = cookie_cache::open(&output.cookie_value, &config.session_secret).unwrap();
    let stale = SessionCachePayload {
        issued_at_ms: payload.issued_at_ms - 11 * 60 * 1000,
        ..payload
    };
    let stale_cookie = format!(
        "{}={}",
        state.session_cookie().full_name(),
        cookie_cache::seal(&stale, &config.session_secret),
    );

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header(header::COOKIE, &stale_cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    // On the dashboard itself the same stale cookie is revalidated and
    // reissued alongside the redirect
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(PROTECTED_PATH)
                .header(header::COOKIE, &stale_cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        ADMIN_AREA_PATH,
    );
    assert!(response.headers().get(header::SET_COOKIE).is_some());
}

#[tokio::test]
async fn lapsed_session_cookie_is_reported_as_expired() {
    use axum::http::{HeaderMap, HeaderValue, header};

    let store = MemStore::default();
    let limiter = MemRateLimit::default();
    let config = test_config();
    seed_user(&store, "henry@example.com", "some good password", UserRole::User, &config).await;

    let output = sign_in_use_case(&store, &limiter, &config)
        .execute(
            SignInInput {
                email: "henry@example.com".to_string(),
                password: "some good password".to_string(),
            },
            client(),
        )
        .await
        .unwrap();

    let state = AuthAppState::new(store.clone(), limiter.clone(), (*config).clone());

    // No cookie at all is an anonymous caller
    let err = state.require_session(&HeaderMap::new()).await.unwrap_err();
    assert!(matches!(err, AuthError::Unauthorized));

    // A tampered cookie is treated the same way
    let mut headers = HeaderMap::new();
    headers.insert(
        header::COOKIE,
        HeaderValue::from_str(&format!(
            "{}=not-a-signed-value",
            state.session_cookie().full_name(),
        ))
        .unwrap(),
    );
    let err = state.require_session(&headers).await.unwrap_err();
    assert!(matches!(err, AuthError::Unauthorized));

    // A validly signed snapshot whose session has lapsed is expiry
    let payload = cookie_cache::open(&output.cookie_value, &config.session_secret).unwrap();
    let lapsed = SessionCachePayload {
        expires_at_ms: payload.issued_at_ms - 1,
        ..payload
    };
    let lapsed_cookie = cookie_cache::seal(&lapsed, &config.session_secret);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::COOKIE,
        HeaderValue::from_str(&format!(
            "{}={}",
            state.session_cookie().full_name(),
            lapsed_cookie,
        ))
        .unwrap(),
    );
    let err = state.require_session(&headers).await.unwrap_err();
    assert!(matches!(err, AuthError::SessionExpired));
}

#[tokio::test]
async fn sign_out_invalidates_the_session() {
    let store = MemStore::default();
    let limiter = MemRateLimit::default();
    let config = test_config();
    seed_user(&store, "frank@example.com", "some good password", UserRole::User, &config).await;

    let output = sign_in_use_case(&store, &limiter, &config)
        .execute(
            SignInInput {
                email: "frank@example.com".to_string(),
                password: "some good password".to_string(),
            },
            client(),
        )
        .await
        .unwrap();

    SignOutUseCase::new(Arc::new(store.clone()), config.clone())
        .execute(Some(&output.cookie_value))
        .await
        .unwrap();

    // The snapshot is still signed, but revalidation finds nothing
    let payload = cookie_cache::open(&output.cookie_value, &config.session_secret).unwrap();
    let stale = SessionCachePayload {
        issued_at_ms: payload.issued_at_ms - 11 * 60 * 1000,
        ..payload
    };
    let stale_cookie = cookie_cache::seal(&stale, &config.session_secret);

    let resolved = get_session_use_case(&store, &config)
        .execute(Some(&stale_cookie))
        .await
        .unwrap();
    assert!(resolved.is_none());
}

// ============================================================================
// Admin operations
// ============================================================================

fn admin_use_case(store: &MemStore, config: &Arc<AuthConfig>) -> AdminUseCase<MemStore, MemStore> {
    AdminUseCase::new(Arc::new(store.clone()), Arc::new(store.clone()), config.clone())
}

fn view_for(user: &User) -> crate::application::SessionView {
    crate::application::SessionView {
        token: format!("tok-{}", user.user_id),
        user_id: user.user_id,
        role: user.role,
        expires_at_ms: i64::MAX,
        impersonated_by: None,
    }
}

#[tokio::test]
async fn non_admin_cannot_use_admin_operations() {
    let store = MemStore::default();
    let config = test_config();
    let user =
        seed_user(&store, "user@example.com", "some good password", UserRole::User, &config).await;
    let other =
        seed_user(&store, "other@example.com", "some good password", UserRole::User, &config).await;

    let err = admin_use_case(&store, &config)
        .ban(
            &view_for(&user),
            BanInput {
                target: other.user_id,
                reason: None,
                expires_in_secs: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::Unauthorized));
}

#[tokio::test]
async fn ban_uses_default_reason_and_revokes_sessions() {
    let store = MemStore::default();
    let limiter = MemRateLimit::default();
    let config = test_config();
    let admin =
        seed_user(&store, "root@example.com", "some good password", UserRole::Admin, &config).await;
    let target =
        seed_user(&store, "mallory@example.com", "some good password", UserRole::User, &config).await;

    sign_in_use_case(&store, &limiter, &config)
        .execute(
            SignInInput {
                email: "mallory@example.com".to_string(),
                password: "some good password".to_string(),
            },
            client(),
        )
        .await
        .unwrap();

    admin_use_case(&store, &config)
        .ban(
            &view_for(&admin),
            BanInput {
                target: target.user_id,
                reason: None,
                expires_in_secs: None,
            },
        )
        .await
        .unwrap();

    let stored = UserRepository::find_by_id(&store, &target.user_id)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.ban.banned);
    assert_eq!(stored.ban.reason.as_deref(), Some(config.default_ban_reason.as_str()));
    assert_eq!(store.inner.lock().unwrap().sessions.len(), 0);
}

#[tokio::test]
async fn admin_cannot_ban_themselves() {
    let store = MemStore::default();
    let config = test_config();
    let admin =
        seed_user(&store, "root@example.com", "some good password", UserRole::Admin, &config).await;

    let err = admin_use_case(&store, &config)
        .ban(
            &view_for(&admin),
            BanInput {
                target: admin.user_id,
                reason: None,
                expires_in_secs: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::Validation(_)));
}

#[tokio::test]
async fn impersonation_marks_the_session_and_can_be_stopped() {
    let store = MemStore::default();
    let config = test_config();
    let admin =
        seed_user(&store, "root@example.com", "some good password", UserRole::Admin, &config).await;
    let target =
        seed_user(&store, "victim@example.com", "some good password", UserRole::User, &config).await;

    let output = admin_use_case(&store, &config)
        .impersonate(&view_for(&admin), target.user_id)
        .await
        .unwrap();

    assert_eq!(output.session.user_id, target.user_id);
    assert_eq!(output.session.impersonated_by, Some(admin.user_id));

    let resolved = get_session_use_case(&store, &config)
        .execute(Some(&output.cookie_value))
        .await
        .unwrap()
        .unwrap();
    assert!(resolved.view.is_impersonated());
    assert_eq!(redirect_target(Some(&resolved.view)), USER_AREA_PATH);

    admin_use_case(&store, &config)
        .stop_impersonating(&resolved.view)
        .await
        .unwrap();
    assert!(
        SessionRepository::find_by_token(&store, &output.session.token)
            .await
            .unwrap()
            .is_none()
    );
}
