//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and the upstream authority
//! - Validate value ranges (timeouts > 0, request deadline above the per-call one)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ProxyConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid socket address for {field}: '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("upstream.host must not be empty")]
    EmptyUpstreamHost,

    #[error("upstream.host is not a valid authority: '{0}'")]
    InvalidUpstreamHost(String),

    #[error("upstream.auth_path must start with '/': '{0}'")]
    RelativeAuthPath(String),

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("timeouts.request_secs ({request_secs}) must exceed timeouts.upstream_secs ({upstream_secs})")]
    RequestTimeoutTooShort { request_secs: u64, upstream_secs: u64 },
}

/// Validate a loaded configuration, collecting every problem.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    let host = config.upstream.host.trim();
    if host.is_empty() {
        errors.push(ValidationError::EmptyUpstreamHost);
    } else if !is_valid_authority(host) {
        errors.push(ValidationError::InvalidUpstreamHost(host.to_string()));
    }

    if !config.upstream.auth_path.starts_with('/') {
        errors.push(ValidationError::RelativeAuthPath(
            config.upstream.auth_path.clone(),
        ));
    }

    let timeouts = &config.timeouts;
    for (name, value) in [
        ("connect_secs", timeouts.connect_secs),
        ("upstream_secs", timeouts.upstream_secs),
        ("request_secs", timeouts.request_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout(name));
        }
    }

    // A single upstream call must be able to time out on its own before the
    // whole request is cut off.
    if timeouts.upstream_secs > 0
        && timeouts.request_secs > 0
        && timeouts.request_secs <= timeouts.upstream_secs
    {
        errors.push(ValidationError::RequestTimeoutTooShort {
            request_secs: timeouts.request_secs,
            upstream_secs: timeouts.upstream_secs,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// The host must be a bare authority: no scheme, path, query or credentials.
fn is_valid_authority(host: &str) -> bool {
    match url::Url::parse(&format!("http://{}/", host)) {
        Ok(url) => {
            url.host_str().is_some()
                && url.path() == "/"
                && url.query().is_none()
                && url.username().is_empty()
                && !host.contains('/')
        }
        Err(_) => false,
    }
}
