//! Error types for budgetweb-api

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use budgetweb_client::ClientError;
use budgetweb_core::{CoreError, ErrorCode, ErrorDetails, Reportable};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Unauthorized")]
    Unauthorized,

    #[error(transparent)]
    Backend(#[from] ClientError),

    #[error("Internal server error")]
    InternalError,
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        ApiError::BadRequest {
            message: error.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Backend(error) => match error {
                ClientError::Unauthorized => StatusCode::UNAUTHORIZED,
                ClientError::NotFound { .. } => StatusCode::NOT_FOUND,
                ClientError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                ClientError::Timeout => StatusCode::GATEWAY_TIMEOUT,
                ClientError::Status { status, .. } if (400..500).contains(status) => {
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
                }
                _ => StatusCode::BAD_GATEWAY,
            },
        }
    }

    pub fn to_details(&self) -> ErrorDetails {
        match self {
            ApiError::Backend(error) => error.to_details(),
            ApiError::BadRequest { .. } => {
                ErrorDetails::new(ErrorCode::InvalidRequest, self.to_string())
            }
            ApiError::Unauthorized => ErrorDetails::new(ErrorCode::Unauthorized, self.to_string()),
            ApiError::InternalError => ErrorDetails::new(ErrorCode::InternalError, self.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!(target: "budgetweb::api", "{} -> {}", self, status);
        } else {
            log::debug!(target: "budgetweb::api", "{} -> {}", self, status);
        }
        (status, Json(self.to_details())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
