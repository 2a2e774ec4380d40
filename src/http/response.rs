//! Fallback responses.
//!
//! Handler errors render through [`ApiError`]'s `IntoResponse`; this module
//! covers the cases no handler produced: unmatched routes, expired request
//! deadlines and panics. All keep the same shape, a status plus a bare JSON
//! string body.

use std::any::Any;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Response, StatusCode},
    response::IntoResponse,
    BoxError, Json,
};
use tower::timeout::error::Elapsed;

use crate::error::ApiError;

/// Router fallback for unmatched paths and methods.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Error handler for the whole-request timeout layer.
pub async fn request_timeout(err: BoxError, deadline: Duration) -> Response<Body> {
    if err.is::<Elapsed>() {
        return ApiError::Timeout(deadline).into_response();
    }

    tracing::error!(error = %err, "Unhandled middleware error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json("Internal Server Error"),
    )
        .into_response()
}

/// Response used when a handler panics.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    tracing::error!(panic = %detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json("Internal Server Error"),
    )
        .into_response()
}
