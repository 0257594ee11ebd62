//! Sign-in and sign-out
//!
//! `POST /session` checks a token against `/profile` and stores it in the
//! session cookie; `DELETE /session` expires the cookie. Both paths are
//! public so a signed-out client can reach them.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use budgetweb_config::AuthConfig;
use budgetweb_core::{BearerToken, Session};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::guard::ProfileProvider;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub token: String,
}

/// Landing target of guard redirects
pub async fn page_login(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "authenticated": false,
        "message": "Sign in required",
        "session_endpoint": budgetweb_config::SESSION_PATH,
        "cookie": state.config.auth.cookie_name,
    }))
}

pub async fn api_session_create(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(body): ApiJson<SessionRequest>,
) -> ApiResult<(CookieJar, Json<Session>)> {
    let token = BearerToken::new(body.token)?;

    let profile = state.profiles.profile(&token).await.map_err(|e| {
        if e.is_unauthorized() {
            ApiError::Unauthorized
        } else {
            ApiError::Backend(e)
        }
    })?;

    let cookie = session_cookie(&state.config.auth, token.as_str());
    let session = Session::establish(token, profile).ok_or(ApiError::Unauthorized)?;
    log::info!(target: "budgetweb::api", "Session started for user {}", session.user_id());

    Ok((jar.add(cookie), Json(session)))
}

pub async fn api_session_delete(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, StatusCode) {
    let mut cookie = session_cookie(&state.config.auth, "");
    cookie.make_removal();
    (jar.add(cookie), StatusCode::NO_CONTENT)
}

/// Session cookie carrying `value`
fn session_cookie(auth: &AuthConfig, value: &str) -> Cookie<'static> {
    Cookie::build((auth.cookie_name.clone(), value.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(auth.secure_cookie)
        .build()
}
