//! Configuration management for budgetweb
//!
//! This module handles loading, validation, and management of
//! budgetweb configuration from YAML files and environment overrides.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::ConfigError;

/// Environment variable overriding `backend.base_url`
pub const ENV_BACKEND_URL: &str = "BUDGETWEB_BACKEND_URL";
/// Environment variable overriding `server.port`
pub const ENV_PORT: &str = "BUDGETWEB_PORT";
/// Sign-in and sign-out route; always reachable without a session
pub const SESSION_PATH: &str = "/session";

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Browser origins allowed to call the API with credentials (empty = same-origin only)
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: Vec::new(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Remote budget backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL every resource path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds (none = wait for the backend)
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Upper bound for the dashboard load before it reports finished anyway
    #[serde(default = "default_dashboard_timeout")]
    pub dashboard_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
            dashboard_timeout_secs: default_dashboard_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_dashboard_timeout() -> u64 {
    5
}

/// Session cookie and route guard settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Name of the cookie carrying the bearer token
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Where unauthenticated navigation is redirected
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Paths reachable without a session
    #[serde(default = "default_public_paths")]
    pub public_paths: Vec<String>,
    /// Mark the session cookie `Secure`
    #[serde(default)]
    pub secure_cookie: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            login_path: default_login_path(),
            public_paths: default_public_paths(),
            secure_cookie: false,
        }
    }
}

fn default_cookie_name() -> String {
    "token".to_string()
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_public_paths() -> Vec<String> {
    vec![
        "/login".to_string(),
        SESSION_PATH.to_string(),
        "/api/health".to_string(),
    ]
}

impl AuthConfig {
    /// Check whether a request path is in the public allow-list.
    ///
    /// An entry matches the path itself and anything nested below it,
    /// so `/login` admits `/login/reset` but not `/loginx`.
    pub fn is_public(&self, path: &str) -> bool {
        self.public_paths.iter().any(|public| {
            let public = public.trim_end_matches('/');
            if public.is_empty() {
                return path == "/";
            }
            path == public
                || path
                    .strip_prefix(public)
                    .map_or(false, |rest| rest.starts_with('/'))
        })
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Backend settings
    #[serde(default)]
    pub backend: BackendConfig,
    /// Session and guard settings
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file, apply environment overrides and validate
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            });
        }

        let content = std::fs::read_to_string(&path).map_err(|_| ConfigError::IoError)?;

        let mut config = Self::from_yaml(&content)?;
        config.apply_env()?;
        config.validate()?;

        Ok(config)
    }

    /// Load the file when present, otherwise start from defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::load(path.to_path_buf());
        }

        let mut config = Config::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse YAML content without touching the environment
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|_| ConfigError::InvalidYaml)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BACKEND_URL) {
            self.backend.base_url = url;
        }

        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: ENV_PORT.to_string(),
                reason: format!("'{}' is not a valid port", port),
            })?;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if let Some(origin) = self
            .server
            .allowed_origins
            .iter()
            .find(|o| !(o.starts_with("http://") || o.starts_with("https://")))
        {
            return Err(ConfigError::InvalidValue {
                field: "server.allowed_origins".to_string(),
                reason: format!("'{}' is not an http(s) origin", origin),
            });
        }

        let base_url = self.backend.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "backend.base_url".to_string(),
                reason: "Base URL must start with http:// or https://".to_string(),
            });
        }

        if self.backend.dashboard_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "backend.dashboard_timeout_secs".to_string(),
                reason: "Dashboard timeout must be greater than 0".to_string(),
            });
        }

        if self.backend.request_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "backend.request_timeout_secs".to_string(),
                reason: "Request timeout must be greater than 0 when set".to_string(),
            });
        }

        if self.auth.cookie_name.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "auth.cookie_name".to_string(),
            });
        }

        if !self.auth.login_path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "auth.login_path".to_string(),
                reason: "Login path must start with '/'".to_string(),
            });
        }

        // Otherwise every redirect lands on another redirect.
        if !self.auth.is_public(&self.auth.login_path) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "auth.login_path '{}' must be listed in auth.public_paths",
                    self.auth.login_path
                ),
            });
        }

        if !self.auth.is_public(SESSION_PATH) {
            return Err(ConfigError::ValidationError {
                message: format!("'{}' must be listed in auth.public_paths", SESSION_PATH),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Socket address string the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.auth.cookie_name, "token");
        assert_eq!(config.auth.login_path, "/login");
        assert_eq!(config.backend.dashboard_timeout_secs, 5);
    }

    #[test]
    fn test_default_template_parses() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.backend.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = Config::from_yaml("backend:\n  base_url: \"https://api.example.com\"\n").unwrap();
        assert_eq!(config.backend.base_url, "https://api.example.com");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.public_paths.len(), 3);
    }

    #[test]
    fn test_invalid_yaml() {
        let result = Config::from_yaml("server: [unclosed");
        assert!(matches!(result, Err(ConfigError::InvalidYaml)));
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let mut config = Config::default();
        config.backend.base_url = "localhost:8000".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "backend.base_url"));
    }

    #[test]
    fn test_rejects_zero_timeouts() {
        let mut config = Config::default();
        config.backend.dashboard_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.backend.request_timeout_secs = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_login_path_must_be_public() {
        let mut config = Config::default();
        config.auth.public_paths = vec!["/api/health".to_string()];
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn test_session_path_must_be_public() {
        let mut config = Config::default();
        config.auth.public_paths = vec!["/login".to_string()];
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref message } if message.contains(SESSION_PATH)));

        config.auth.public_paths.push(SESSION_PATH.to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_BACKEND_URL, "https://budget.example.com/api"),
            (ENV_PORT, "9090"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.backend.base_url, "https://budget.example.com/api");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.bind_addr(), "0.0.0.0:9090");
    }

    #[test]
    fn test_env_override_bad_port() {
        let mut config = Config::default();
        let result = config.apply_overrides(|key| (key == ENV_PORT).then(|| "http".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_public_path_matching() {
        let auth = AuthConfig::default();
        assert!(auth.is_public("/login"));
        assert!(auth.is_public("/login/reset"));
        assert!(auth.is_public("/api/health"));
        assert!(!auth.is_public("/loginx"));
        assert!(!auth.is_public("/api/transactions"));
        assert!(!auth.is_public("/"));
    }

    #[test]
    fn test_root_public_entry_matches_only_root() {
        let auth = AuthConfig {
            public_paths: vec!["/".to_string()],
            ..AuthConfig::default()
        };
        assert!(auth.is_public("/"));
        assert!(!auth.is_public("/dashboard"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(PathBuf::from("/nonexistent/budgetweb.yaml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }
}
