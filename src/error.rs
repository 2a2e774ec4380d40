//! Error types returned by the hero handlers.
//!
//! Every failure is forwarded unchanged to the response boundary: the HTTP
//! status mirrors the upstream status when there is one (500 otherwise) and
//! the body is the bare message encoded as a JSON string.

use std::fmt;
use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::upstream::UpstreamError;

/// Which upstream interaction a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Credential check. A failure here is an authentication rejection.
    Auth,
    /// Base hero list fetch.
    HeroList,
    /// Base single-hero fetch.
    Hero,
    /// Per-hero profile fetch during enrichment.
    Profile,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Auth => "auth",
            Stage::HeroList => "hero_list",
            Stage::Hero => "hero",
            Stage::Profile => "profile",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while serving a hero request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An upstream call failed at `stage`.
    #[error("{stage} request failed: {source}")]
    Upstream {
        stage: Stage,
        #[source]
        source: UpstreamError,
    },

    /// Upstream returned 200 with a body that is not the expected JSON.
    #[error("{stage} response could not be decoded: {source}")]
    Decode {
        stage: Stage,
        #[source]
        source: serde_json::Error,
    },

    /// No inbound route matched, or the hero id cannot address a resource.
    #[error("Not Found")]
    NotFound,

    /// The whole inbound request outlived `timeouts.request_secs`.
    #[error("request exceeded its {0:?} deadline")]
    Timeout(Duration),
}

impl ApiError {
    pub fn upstream(stage: Stage, source: UpstreamError) -> Self {
        ApiError::Upstream { stage, source }
    }

    pub fn decode(stage: Stage, source: serde_json::Error) -> Self {
        ApiError::Decode { stage, source }
    }

    /// True when the credential check itself was rejected.
    pub fn is_auth_rejection(&self) -> bool {
        matches!(
            self,
            ApiError::Upstream {
                stage: Stage::Auth,
                source: UpstreamError::Status { .. },
            }
        )
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            ApiError::Upstream { stage, .. } | ApiError::Decode { stage, .. } => Some(*stage),
            ApiError::NotFound | ApiError::Timeout(_) => None,
        }
    }

    /// Response status: mirrored from upstream when available, 504 when the
    /// request deadline expired, else 500.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Upstream { source, .. } => {
                source.status().unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            ApiError::Decode { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Client-facing message.
    pub fn message(&self) -> String {
        match self {
            ApiError::Upstream { source, .. } => source.message(),
            ApiError::Decode { source, .. } => source.to_string(),
            ApiError::NotFound => "Not Found".to_string(),
            ApiError::Timeout(_) => "Gateway Timeout".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self.stage() {
            Some(stage) if status.is_server_error() => {
                tracing::error!(stage = %stage, status = %status, error = %self, "Request failed");
            }
            Some(stage) => {
                tracing::warn!(stage = %stage, status = %status, error = %self, "Request failed");
            }
            None if matches!(self, ApiError::Timeout(_)) => {
                tracing::warn!(status = %status, error = %self, "Request deadline exceeded");
            }
            None => tracing::debug!(status = %status, "Not found"),
        }
        (status, Json(self.message())).into_response()
    }
}
