//! In-process stub backend for repository tests
//!
//! Enabled for this crate's tests and, through the `test-support` feature,
//! for the tests of crates built on the client.

use axum::http::HeaderMap;
use axum::Router;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn spawn_backend(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Base URL of a port nothing listens on
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// What the stub backend saw
#[derive(Clone, Default)]
pub struct Recorder {
    hits: Arc<AtomicUsize>,
    authorization: Arc<Mutex<Option<String>>>,
    path: Arc<Mutex<Option<String>>>,
    body: Arc<Mutex<Option<serde_json::Value>>>,
}

impl Recorder {
    pub fn record(&self, headers: &HeaderMap, path: &str) {
        self.hits.fetch_add(1, Ordering::SeqCst);
        *self.authorization.lock().unwrap() = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        *self.path.lock().unwrap() = Some(path.to_string());
    }

    pub fn store_body(&self, body: serde_json::Value) {
        *self.body.lock().unwrap() = Some(body);
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_authorization(&self) -> Option<String> {
        self.authorization.lock().unwrap().clone()
    }

    pub fn last_path(&self) -> Option<String> {
        self.path.lock().unwrap().clone()
    }

    pub fn last_body(&self) -> Option<serde_json::Value> {
        self.body.lock().unwrap().clone()
    }
}
