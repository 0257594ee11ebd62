//! Guarded HTTP gateway in front of the budget backend
//!
//! Routes are organized into modules:
//! - routes::resources: transactions, accounts, categories, budgets
//! - routes::insights: analytics reports, search, current profile
//! - routes::session: sign-in, sign-out, login landing
//! - routes::dashboard: aggregated snapshot with timeout fallback
//!
//! Every route sits behind [`guard::require_session`]; only the paths in
//! `auth.public_paths` are reachable without a session.

pub mod error;
pub mod extract;
pub mod guard;
pub mod routes;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use budgetweb_client::ApiClient;
use budgetweb_config::{Config, SESSION_PATH};
use budgetweb_core::{Account, Budget, Category, Transaction};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub use error::{ApiError, ApiResult};
pub use guard::{GuardDecision, ProfileProvider, ProfileProviderRef, RouteGuard};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub client: ApiClient,
    pub config: Config,
    pub guard: RouteGuard,
    pub profiles: ProfileProviderRef,
}

impl AppState {
    /// State backed by the configured backend for both data and profile checks
    pub fn new(config: Config) -> Result<Self, budgetweb_client::ClientError> {
        let client = ApiClient::from_config(&config.backend)?;
        let profiles: ProfileProviderRef = Arc::new(client.profile());
        Ok(Self::with_profiles(config, client, profiles))
    }

    /// State with a custom profile provider
    pub fn with_profiles(config: Config, client: ApiClient, profiles: ProfileProviderRef) -> Self {
        let guard = RouteGuard::new(config.auth.clone(), profiles.clone());
        Self {
            client,
            config,
            guard,
            profiles,
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::dashboard::api_dashboard;
    use routes::insights::{api_category_expenses, api_monthly_summary, api_profile, api_search};
    use routes::resources::resource_routes;
    use routes::session::{api_session_create, api_session_delete, page_login};

    let login_path = state.config.auth.login_path.clone();

    let router = Router::new()
        // Public
        .route("/api/health", get(health_check))
        .route(&login_path, get(page_login))
        .route(SESSION_PATH, post(api_session_create).delete(api_session_delete))
        // Protected
        .route("/api/profile", get(api_profile))
        .route("/api/dashboard", get(api_dashboard))
        .route("/api/search", get(api_search))
        .route("/api/analytics/category-expenses", get(api_category_expenses))
        .route("/api/analytics/monthly-summary", get(api_monthly_summary))
        .merge(resource_routes::<Transaction>("/api/transactions"))
        .merge(resource_routes::<Account>("/api/accounts"))
        .merge(resource_routes::<Category>("/api/categories"))
        .merge(resource_routes::<Budget>("/api/budgets"))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            guard::require_session,
        ));

    let router = match cors_layer(&state.config) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.with_state(state)
}

/// Credentialed CORS for the configured frontend origins
fn cors_layer(config: &Config) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = config
        .server
        .allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_credentials(true)
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
    )
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Start the HTTP server
///
/// # Arguments
///
/// * `config` - The validated application configuration
pub async fn start_server(config: Config) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    let state = AppState::new(config)?;
    log::info!(
        target: "budgetweb::api",
        "Using budget backend at {}",
        state.client.base_url()
    );

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!(target: "budgetweb::api", "Starting budgetweb on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!(target: "budgetweb::api", "Failed to listen for shutdown signal: {}", e);
            }
        })
        .await?;

    log::info!(target: "budgetweb::api", "Server stopped gracefully");
    Ok(())
}

// ==================== Tests ====================
