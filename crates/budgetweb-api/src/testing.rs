//! Shared fixtures for router and dashboard tests

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, request, Request};
use axum::response::Response;
use budgetweb_client::{ApiClient, ClientError, ClientResult};
use budgetweb_config::Config;
use budgetweb_core::{BearerToken, Session, UserId, UserProfile};

use crate::guard::ProfileProvider;
use crate::AppState;

pub(crate) use budgetweb_client::testing::{spawn_backend, unreachable_base_url};

/// `valid` is user 7, `no-id` has no id, anything else is rejected
pub(crate) struct FakeProfiles;

#[async_trait]
impl ProfileProvider for FakeProfiles {
    async fn profile(&self, token: &BearerToken) -> ClientResult<UserProfile> {
        match token.as_str() {
            "valid" => Ok(UserProfile {
                id: Some(UserId::Number(7)),
                name: Some("Test User".to_string()),
                ..UserProfile::default()
            }),
            "no-id" => Ok(UserProfile::default()),
            _ => Err(ClientError::Unauthorized),
        }
    }
}

pub(crate) fn fake_state(base_url: &str) -> AppState {
    AppState::with_profiles(
        Config::default(),
        ApiClient::new(base_url).unwrap(),
        Arc::new(FakeProfiles),
    )
}

pub(crate) fn valid_session() -> Session {
    let profile = UserProfile {
        id: Some(UserId::Number(7)),
        ..UserProfile::default()
    };
    Session::establish(BearerToken::new("valid").unwrap(), profile).unwrap()
}

pub(crate) fn with_cookie(builder: request::Builder, token: &str) -> Request<Body> {
    builder
        .header(header::COOKIE, format!("token={}", token))
        .body(Body::empty())
        .unwrap()
}

pub(crate) fn with_cookie_json(builder: request::Builder, token: &str, json: &str) -> Request<Body> {
    builder
        .header(header::COOKIE, format!("token={}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

pub(crate) async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
