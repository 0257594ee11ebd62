//! Error types shared across budgetweb crates
//!
//! Every error that can reach a log line or an HTTP response carries an
//! [`ErrorCode`], an [`ErrorSeverity`] and can be expanded into
//! [`ErrorDetails`] with resolution hints. The [`Reportable`] trait is the
//! common surface, [`ErrorContext`] says what was being attempted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Backend could not be reached
    NetworkError,
    /// Backend did not answer in time
    Timeout,
    /// Token missing, rejected or expired
    Unauthorized,
    /// Resource or record does not exist
    NotFound,
    /// Backend answered with an unexpected status
    BackendError,
    /// Response body did not match the expected shape
    DecodeError,
    /// Caller supplied something unusable
    InvalidRequest,
    /// Configuration error
    ConfigError,
    /// Internal error
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::NetworkError => write!(f, "NETWORK_ERROR"),
            ErrorCode::Timeout => write!(f, "TIMEOUT"),
            ErrorCode::Unauthorized => write!(f, "UNAUTHORIZED"),
            ErrorCode::NotFound => write!(f, "NOT_FOUND"),
            ErrorCode::BackendError => write!(f, "BACKEND_ERROR"),
            ErrorCode::DecodeError => write!(f, "DECODE_ERROR"),
            ErrorCode::InvalidRequest => write!(f, "INVALID_REQUEST"),
            ErrorCode::ConfigError => write!(f, "CONFIG_ERROR"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Debug information
    Debug,
    /// Informational
    Info,
    /// Warning - operation may be affected
    Warning,
    /// Error - operation failed
    Error,
    /// Critical - application may be unstable
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Debug => write!(f, "debug"),
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Common surface of errors that get logged or returned to callers
pub trait Reportable: std::error::Error {
    fn code(&self) -> ErrorCode;
    fn severity(&self) -> ErrorSeverity;
    fn to_details(&self) -> ErrorDetails;
}

/// Errors raised while validating a bearer token
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Bearer token is empty")]
    EmptyToken,

    #[error("Bearer token contains characters not allowed in a header")]
    InvalidToken,
}

impl Reportable for CoreError {
    fn code(&self) -> ErrorCode {
        match self {
            CoreError::EmptyToken | CoreError::InvalidToken => ErrorCode::Unauthorized,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Warning
    }

    fn to_details(&self) -> ErrorDetails {
        ErrorDetails::new(self.code(), self.to_string())
            .with_suggestion("Sign in again to obtain a fresh session token.".to_string())
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Request ID for tracing
    pub request_id: Option<String>,
    /// User ID (if authenticated)
    pub user_id: Option<String>,
    /// Operation being performed
    pub operation: String,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            request_id: None,
            user_id: None,
            operation: operation.into(),
        }
    }

    /// Add request ID
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Add user ID
    pub fn with_user_id(mut self, user_id: impl ToString) -> Self {
        self.user_id = Some(user_id.to_string());
        self
    }
}

/// Log a reportable error at the level its severity implies
pub fn log_error<E: Reportable + ?Sized>(error: &E, context: &ErrorContext) {
    let level = match error.severity() {
        ErrorSeverity::Debug => log::Level::Debug,
        ErrorSeverity::Info => log::Level::Info,
        ErrorSeverity::Warning => log::Level::Warn,
        ErrorSeverity::Error | ErrorSeverity::Critical => log::Level::Error,
    };
    log::log!(
        target: "budgetweb::error",
        level,
        "[{}] {} - Operation: {} - Request: {:?} - User: {:?}",
        error.code(),
        error,
        context.operation,
        context.request_id,
        context.user_id
    );
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::NetworkError.to_string(), "NETWORK_ERROR");
        assert_eq!(ErrorCode::Unauthorized.to_string(), "UNAUTHORIZED");
        assert_eq!(ErrorCode::DecodeError.to_string(), "DECODE_ERROR");
    }

    #[test]
    fn test_error_code_serializes_screaming_case() {
        let json = serde_json::to_string(&ErrorCode::BackendError).unwrap();
        assert_eq!(json, "\"BACKEND_ERROR\"");
    }

    #[test]
    fn test_error_severity_display() {
        assert_eq!(ErrorSeverity::Debug.to_string(), "debug");
        assert_eq!(ErrorSeverity::Warning.to_string(), "warning");
        assert_eq!(ErrorSeverity::Critical.to_string(), "critical");
    }

    #[test]
    fn test_core_error_details() {
        let details = CoreError::EmptyToken.to_details();
        assert_eq!(details.code, ErrorCode::Unauthorized);
        assert_eq!(details.suggestions.len(), 1);

        let details = CoreError::InvalidToken.to_details();
        assert!(details.message.contains("header"));
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("transactions.find_all")
            .with_request_id("req-123")
            .with_user_id(42);

        assert_eq!(context.operation, "transactions.find_all");
        assert_eq!(context.request_id, Some("req-123".to_string()));
        assert_eq!(context.user_id, Some("42".to_string()));
    }

    #[test]
    fn test_error_details_display() {
        let details = ErrorDetails::new(ErrorCode::NotFound, "Not found: budget/7".to_string())
            .with_detail(serde_json::json!({"resource": "budget"}))
            .with_suggestion("Refresh the list".to_string());

        let text = details.to_string();
        assert!(text.starts_with("[NOT_FOUND] Not found: budget/7"));
        assert!(text.contains("Refresh the list"));
    }
}
