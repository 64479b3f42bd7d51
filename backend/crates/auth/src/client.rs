//! Auth HTTP Client
//!
//! Thin reqwest wrapper for services and scripts that talk to the auth
//! API over HTTP instead of calling the use cases directly. The base URL
//! comes from `AUTH_BASE_URL` unless given explicitly.

use serde::Deserialize;

use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::SignInActionResponse;

const DEFAULT_BASE_URL: &str = "http://localhost:3001/api/auth";

/// Session info as reported by the auth API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSession {
    pub authenticated: bool,
    pub user_id: Option<uuid::Uuid>,
    pub role: Option<String>,
    pub expires_at_ms: Option<i64>,
    pub impersonated_by: Option<uuid::Uuid>,
}

/// HTTP client for the auth API
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    /// Captured session cookie from the last successful sign-in
    session_cookie: Option<String>,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>) -> AuthResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            session_cookie: None,
        })
    }

    /// Base URL from `AUTH_BASE_URL`, falling back to localhost.
    pub fn from_env() -> AuthResult<Self> {
        let base_url =
            std::env::var("AUTH_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// Sign in and capture the session cookie on success.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> AuthResult<SignInActionResponse> {
        let response = self
            .http
            .post(format!("{}/sign-in", self.base_url))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        // The Set-Cookie pair, without attributes
        let cookie = response
            .headers()
            .get(reqwest::header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::to_string);

        let body: SignInActionResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        if body.success {
            self.session_cookie = cookie;
        }

        Ok(body)
    }

    /// Fetch the current session status.
    pub async fn session_status(&self) -> AuthResult<RemoteSession> {
        let mut request = self.http.get(format!("{}/session", self.base_url));
        if let Some(cookie) = &self.session_cookie {
            request = request.header(reqwest::header::COOKIE, cookie);
        }

        request
            .send()
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .json()
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    /// Sign out and drop the captured cookie.
    pub async fn sign_out(&mut self) -> AuthResult<()> {
        let mut request = self.http.post(format!("{}/sign-out", self.base_url));
        if let Some(cookie) = &self.session_cookie {
            request = request.header(reqwest::header::COOKIE, cookie);
        }

        request
            .send()
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        self.session_cookie = None;
        Ok(())
    }
}
