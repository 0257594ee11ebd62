//! Route guard
//!
//! Every request passes through [`require_session`]. Public paths go
//! straight through. Anything else needs a token (session cookie or
//! `Authorization: Bearer` header) that `/profile` resolves to a user with an
//! id; otherwise the request is redirected to the login path. A cookie that
//! does not hold a valid token does not hide a valid header. The profile
//! check is repeated on every protected request, nothing is cached.
//!
//! On success the [`Session`] is inserted into the request extensions, and
//! every request gets a [`RequestId`].

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use budgetweb_client::{ClientResult, ProfileRepository};
use budgetweb_config::AuthConfig;
use budgetweb_core::{BearerToken, Session, UserProfile};

use crate::AppState;

/// Resolves a token to its user
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    async fn profile(&self, token: &BearerToken) -> ClientResult<UserProfile>;
}

#[async_trait]
impl ProfileProvider for ProfileRepository {
    async fn profile(&self, token: &BearerToken) -> ClientResult<UserProfile> {
        ProfileRepository::profile(self, token).await
    }
}

/// Shared provider handle
pub type ProfileProviderRef = Arc<dyn ProfileProvider>;

/// Outcome of guarding one navigation
#[derive(Debug, Clone)]
pub enum GuardDecision {
    /// Path is public; no token was looked at
    Public,
    /// Token resolved to a user
    Authenticated(Session),
    /// Send the client to the login path
    RedirectToLogin,
}

/// Per-request correlation id, also used in error logs
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

#[derive(Clone)]
pub struct RouteGuard {
    auth: AuthConfig,
    profiles: ProfileProviderRef,
}

impl RouteGuard {
    pub fn new(auth: AuthConfig, profiles: ProfileProviderRef) -> Self {
        Self { auth, profiles }
    }

    pub fn login_path(&self) -> &str {
        &self.auth.login_path
    }

    /// Decide whether `path` may be served for the given token
    pub async fn evaluate(&self, path: &str, token: Option<BearerToken>) -> GuardDecision {
        if self.auth.is_public(path) {
            return GuardDecision::Public;
        }

        let Some(token) = token else {
            log::debug!(target: "budgetweb::guard", "No token for {}", path);
            return GuardDecision::RedirectToLogin;
        };

        match self.profiles.profile(&token).await {
            Ok(profile) => match Session::establish(token, profile) {
                Some(session) => GuardDecision::Authenticated(session),
                None => {
                    log::info!(target: "budgetweb::guard", "Profile without user id for {}", path);
                    GuardDecision::RedirectToLogin
                }
            },
            Err(e) => {
                log::warn!(target: "budgetweb::guard", "Profile check failed for {}: {}", path, e);
                GuardDecision::RedirectToLogin
            }
        }
    }

    /// Token from the session cookie, falling back to a bearer header.
    ///
    /// Values that are not valid tokens count as absent.
    pub fn token_from_headers(&self, headers: &HeaderMap) -> Option<BearerToken> {
        let from_cookie = CookieJar::from_headers(headers)
            .get(&self.auth.cookie_name)
            .and_then(|cookie| BearerToken::new(cookie.value()).ok());

        from_cookie.or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .and_then(|token| BearerToken::new(token).ok())
        })
    }
}

/// axum middleware applying the [`RouteGuard`] to every request
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let request_id = RequestId(budgetweb_utils::generate_id());
    let path = request.uri().path().to_string();
    let token = state.guard.token_from_headers(request.headers());

    match state.guard.evaluate(&path, token).await {
        GuardDecision::Public => {}
        GuardDecision::Authenticated(session) => {
            log::debug!(
                target: "budgetweb::guard",
                "[{}] {} allowed for user {}",
                request_id.0,
                path,
                session.user_id()
            );
            request.extensions_mut().insert(session);
        }
        GuardDecision::RedirectToLogin => {
            return Redirect::temporary(state.guard.login_path()).into_response();
        }
    }

    request.extensions_mut().insert(request_id);
    next.run(request).await
}
