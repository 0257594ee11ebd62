//! Error types for budgetweb-client

use budgetweb_core::{CoreError, ErrorCode, ErrorDetails, ErrorSeverity, Reportable};
use thiserror::Error;

/// Longest backend error body kept in [`ClientError::Status`]
const MAX_BODY_LEN: usize = 512;

/// Why a backend call did not produce a value
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Backend unreachable: {message}")]
    Network { message: String },

    #[error("Backend did not respond in time")]
    Timeout,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Backend returned status {status}")]
    Status { status: u16, body: String },

    #[error("Unexpected response body: {message}")]
    Decode { message: String },

    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },

    #[error(transparent)]
    InvalidInput(#[from] CoreError),
}

impl ClientError {
    /// Map a non-success HTTP status to an error
    pub fn from_status(status: u16, resource: &str, body: &str) -> Self {
        match status {
            401 | 403 => ClientError::Unauthorized,
            404 => ClientError::NotFound {
                resource: resource.to_string(),
            },
            _ => {
                let mut body = body.trim().to_string();
                if body.len() > MAX_BODY_LEN {
                    let mut cut = MAX_BODY_LEN;
                    while !body.is_char_boundary(cut) {
                        cut -= 1;
                    }
                    body.truncate(cut);
                }
                ClientError::Status { status, body }
            }
        }
    }

    /// Whether the failure says anything about the session
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ClientError::Timeout
        } else if error.is_decode() {
            ClientError::Decode {
                message: error.to_string(),
            }
        } else if error.is_builder() {
            ClientError::InvalidUrl {
                url: error.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else {
            ClientError::Network {
                message: error.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(error: serde_json::Error) -> Self {
        ClientError::Decode {
            message: error.to_string(),
        }
    }
}

impl Reportable for ClientError {
    fn code(&self) -> ErrorCode {
        match self {
            ClientError::Network { .. } => ErrorCode::NetworkError,
            ClientError::Timeout => ErrorCode::Timeout,
            ClientError::Unauthorized => ErrorCode::Unauthorized,
            ClientError::NotFound { .. } => ErrorCode::NotFound,
            ClientError::Status { .. } => ErrorCode::BackendError,
            ClientError::Decode { .. } => ErrorCode::DecodeError,
            ClientError::InvalidUrl { .. } => ErrorCode::ConfigError,
            ClientError::InvalidInput(inner) => inner.code(),
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            ClientError::NotFound { .. } => ErrorSeverity::Info,
            ClientError::Unauthorized | ClientError::InvalidInput(_) => ErrorSeverity::Warning,
            ClientError::Network { .. } | ClientError::Timeout => ErrorSeverity::Error,
            ClientError::Status { .. } | ClientError::Decode { .. } => ErrorSeverity::Error,
            ClientError::InvalidUrl { .. } => ErrorSeverity::Critical,
        }
    }

    fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            ClientError::Network { .. } | ClientError::Timeout => {
                details = details.with_suggestion(
                    "Check that the budget backend is running and reachable.".to_string(),
                );
                details = details.with_suggestion(
                    "Verify backend.base_url or BUDGETWEB_BACKEND_URL.".to_string(),
                );
            }
            ClientError::Unauthorized => {
                details = details
                    .with_suggestion("Sign in again; the session token was rejected.".to_string());
            }
            ClientError::NotFound { resource } => {
                details = details.with_detail(serde_json::json!({ "resource": resource }));
            }
            ClientError::Status { status, body } => {
                details = details.with_detail(serde_json::json!({
                    "status": status,
                    "body": body,
                }));
            }
            ClientError::Decode { message } => {
                details = details.with_detail(serde_json::json!({ "decode_message": message }));
                details = details.with_suggestion(
                    "The backend response shape changed; check the API version.".to_string(),
                );
            }
            ClientError::InvalidUrl { .. } => {
                details = details
                    .with_suggestion("backend.base_url must be an absolute http(s) URL.".to_string());
            }
            ClientError::InvalidInput(inner) => return inner.to_details(),
        }

        details
    }
}

/// Result type with ClientError
pub type ClientResult<T> = Result<T, ClientError>;
