//! Authenticated REST access to the budget backend
//!
//! Every call takes the caller's [`BearerToken`] and sends it as
//! `Authorization: Bearer <token>`. Repositories are organized by resource:
//! - repository: generic list/find/create/delete over one resource type
//! - search: cross-resource query returning a [`SearchResult`] aggregate
//! - analytics: read-only reports
//! - profile: resolves a token to its user
//!
//! All operations return [`ClientResult`]. Callers that prefer an empty
//! value over an error opt in with [`Fallback::or_empty`].

pub mod analytics;
pub mod error;
pub mod fallback;
pub mod profile;
pub mod repository;
pub mod search;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

use budgetweb_config::BackendConfig;
use budgetweb_core::{Account, BearerToken, Budget, Category, Transaction};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

pub use analytics::AnalyticsRepository;
pub use error::{ClientError, ClientResult};
pub use fallback::Fallback;
pub use profile::ProfileRepository;
pub use repository::{Repository, Resource};
pub use search::SearchRepository;

/// Shared HTTP client bound to one backend base URL.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
}

impl ApiClient {
    /// Client without a request timeout
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::build(base_url.into(), None)
    }

    /// Client configured from the `backend` config section
    pub fn from_config(config: &BackendConfig) -> ClientResult<Self> {
        Self::build(
            config.base_url.clone(),
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    fn build(base_url: String, timeout: Option<Duration>) -> ClientResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if reqwest::Url::parse(&base_url).is_err() {
            return Err(ClientError::InvalidUrl { url: base_url });
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path under the base URL
    pub fn url(&self, segments: &[&str]) -> String {
        budgetweb_utils::join_url(&self.base_url, segments)
    }

    pub fn transactions(&self) -> Repository<Transaction> {
        Repository::new(self.clone())
    }

    pub fn accounts(&self) -> Repository<Account> {
        Repository::new(self.clone())
    }

    pub fn categories(&self) -> Repository<Category> {
        Repository::new(self.clone())
    }

    pub fn budgets(&self) -> Repository<Budget> {
        Repository::new(self.clone())
    }

    pub fn search(&self) -> SearchRepository {
        SearchRepository::new(self.clone())
    }

    pub fn analytics(&self) -> AnalyticsRepository {
        AnalyticsRepository::new(self.clone())
    }

    pub fn profile(&self) -> ProfileRepository {
        ProfileRepository::new(self.clone())
    }

    /// GET `url` and decode the JSON body
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        token: &BearerToken,
        url: &str,
        resource: &str,
    ) -> ClientResult<T> {
        log::debug!(target: "budgetweb::client", "GET {}", url);

        let response = self
            .http
            .get(url)
            .header(reqwest::header::AUTHORIZATION, token.authorization())
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(ClientError::from_status(
                status.as_u16(),
                resource,
                &String::from_utf8_lossy(&bytes),
            ));
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send a request whose response body is not needed
    pub(crate) async fn send<B: Serialize + ?Sized>(
        &self,
        token: &BearerToken,
        method: Method,
        url: &str,
        resource: &str,
        body: Option<&B>,
    ) -> ClientResult<()> {
        log::debug!(target: "budgetweb::client", "{} {}", method, url);

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(reqwest::header::AUTHORIZATION, token.authorization());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            log::warn!(
                target: "budgetweb::client",
                "{} {} failed with status {}",
                method,
                url,
                status
            );
            return Err(ClientError::from_status(status.as_u16(), resource, &text));
        }

        Ok(())
    }
}
