//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level failures
//! are handled by each crate's own error type.

use auth::domain::repository::{SessionRepository, VerificationRepository};
use auth::presentation::router::{admin_gated, gate_router};
use auth::presentation::{AuthAppState, dashboard_gate};
use auth::{AuthConfig, PgAuthRepository, PgRateLimitStore, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
    middleware,
};
use base64::Engine;
use base64::engine::general_purpose;
use logistics::{PgLogisticsRepository, logistics_router};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,logistics=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let auth_config = auth_config_from_env()?;

    // Startup cleanup: remove expired sessions, verification tokens and
    // stale rate-limit counters. Errors here should not prevent startup.
    let auth_store = PgAuthRepository::new(pool.clone());
    match SessionRepository::cleanup_expired(&auth_store).await {
        Ok(deleted) => tracing::info!(sessions_deleted = deleted, "Session cleanup completed"),
        Err(e) => tracing::warn!(error = %e, "Session cleanup failed, continuing anyway"),
    }
    match VerificationRepository::cleanup_expired(&auth_store).await {
        Ok(deleted) => {
            tracing::info!(verifications_deleted = deleted, "Verification cleanup completed");
        }
        Err(e) => tracing::warn!(error = %e, "Verification cleanup failed, continuing anyway"),
    }

    let rate_limiter = PgRateLimitStore::new(pool.clone());
    let max_idle_ms = auth_config.rate_limit.window.as_millis() as i64 * 10;
    match rate_limiter.cleanup_stale(max_idle_ms).await {
        Ok(deleted) => {
            tracing::info!(rate_limits_deleted = deleted, "Rate limit cleanup completed");
        }
        Err(e) => tracing::warn!(error = %e, "Rate limit cleanup failed, continuing anyway"),
    }

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router: auth endpoints, the admin-gated logistics API and the
    // role-routing dashboard gate.
    let logistics_repo = PgLogisticsRepository::new(pool.clone());
    let logistics_api = admin_gated(
        logistics_router(logistics_repo),
        auth_store.clone(),
        rate_limiter.clone(),
        auth_config.clone(),
    );

    let app = Router::new()
        .nest(
            "/api/auth",
            auth_router(
                auth_store.clone(),
                rate_limiter.clone(),
                auth_config.clone(),
            ),
        )
        .nest("/api/logistics", logistics_api)
        .merge(gate_router(
            auth_store.clone(),
            rate_limiter.clone(),
            auth_config.clone(),
        ))
        .layer(middleware::from_fn_with_state(
            AuthAppState::new(auth_store, rate_limiter, auth_config),
            dashboard_gate::<PgAuthRepository, PgRateLimitStore>,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 3001));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Build the auth configuration. Development builds fall back to a random
/// session secret; production requires `SESSION_SECRET` (base64, 32 bytes).
fn auth_config_from_env() -> anyhow::Result<AuthConfig> {
    if cfg!(debug_assertions) {
        return Ok(AuthConfig::development());
    }

    let secret_b64 =
        env::var("SESSION_SECRET").expect("SESSION_SECRET must be set in production");
    let secret_bytes = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;
    anyhow::ensure!(
        secret_bytes.len() == 32,
        "SESSION_SECRET must decode to exactly 32 bytes"
    );
    let mut secret = [0u8; 32];
    secret.copy_from_slice(&secret_bytes);

    Ok(AuthConfig {
        session_secret: secret,
        ..AuthConfig::default()
    })
}
