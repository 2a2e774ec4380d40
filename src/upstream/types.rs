//! Request and outcome types for upstream calls.

use std::fmt;

use axum::body::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Transport scheme for an upstream call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single call against the configured upstream host.
///
/// The path is upstream-relative; host and port come from configuration.
/// `segments` are appended after `path`, each percent-encoded as exactly one
/// segment, so caller-supplied values can never add `/` or dot segments.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub scheme: Scheme,
    pub method: Method,
    pub path: String,
    pub segments: Vec<String>,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl RequestSpec {
    /// A `GET` over plain HTTP.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            scheme: Scheme::Http,
            method: Method::GET,
            path: path.into(),
            segments: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// A `POST` carrying `body`, over plain HTTP unless overridden.
    pub fn post(path: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Self::get(path)
        }
    }

    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Append one opaque path segment.
    pub fn with_segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Default JSON content type merged with the caller's headers.
    /// Caller values win on conflict.
    pub fn merged_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.extend(self.headers.clone());
        headers
    }
}

/// Classified failure of an upstream call.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Upstream answered with something other than 200.
    #[error("upstream responded with {status}: {message}")]
    Status { status: StatusCode, message: String },

    /// The call never produced a response (DNS, refused, reset, timeout).
    #[error("upstream transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Host and path did not form a valid URL.
    #[error("invalid upstream url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl UpstreamError {
    /// Build a status error carrying the canonical reason phrase.
    pub fn from_status(status: StatusCode) -> Self {
        UpstreamError::Status {
            status,
            message: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }

    /// Status to mirror to the client, if upstream produced one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            UpstreamError::Transport(_) | UpstreamError::InvalidUrl(_) => None,
        }
    }

    /// Client-facing message: the reason phrase, or the transport fault.
    pub fn message(&self) -> String {
        match self {
            UpstreamError::Status { message, .. } => message.clone(),
            UpstreamError::Transport(e) => e.to_string(),
            UpstreamError::InvalidUrl(_) => self.to_string(),
        }
    }
}

/// Raw, undecoded body of a successful call.
pub type UpstreamResult = Result<Bytes, UpstreamError>;
