//! Extractors that reject with [`ApiError`]
//!
//! axum's own `Json`, `Path` and `Query` answer malformed input with a plain
//! text body. These wrappers route the rejection through `ApiError`, so the
//! client always gets a 400 with an `ErrorDetails` body.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
