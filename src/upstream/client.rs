//! Upstream HTTP(S) client.
//!
//! # Responsibilities
//! - Address every call at the single configured upstream host
//! - Buffer the full response body before resolving
//! - Classify the outcome: 200 body, status error, or transport fault
//! - Enforce per-call connect and total timeouts

use std::time::{Duration, Instant};

use reqwest::{Client, StatusCode};
use url::Url;

use crate::config::{TimeoutConfig, UpstreamConfig};
use crate::observability::metrics;
use crate::upstream::types::{RequestSpec, UpstreamError, UpstreamResult};

/// Client bound to one upstream host.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct UpstreamClient {
    client: Client,
    host: String,
}

impl UpstreamClient {
    /// Build a client from explicit configuration.
    pub fn new(upstream: &UpstreamConfig, timeouts: &TimeoutConfig) -> Result<Self, UpstreamError> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.upstream_secs));
        if !upstream.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        tracing::info!(
            host = %upstream.host,
            upstream_timeout_secs = timeouts.upstream_secs,
            "Upstream client initialized"
        );

        Ok(Self {
            client,
            host: upstream.host.clone(),
        })
    }

    /// Absolute URL for a request: configured host, the spec's path, then
    /// each extra segment encoded on its own.
    pub fn url_for(&self, spec: &RequestSpec) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!("{}://{}/", spec.scheme, self.host))?;
        url.set_path(&spec.path);
        if !spec.segments.is_empty() {
            url.path_segments_mut()
                .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
                .pop_if_empty()
                .extend(&spec.segments);
        }
        Ok(url)
    }

    /// Perform one upstream call.
    ///
    /// Resolves with the raw body on 200. Any other status becomes
    /// [`UpstreamError::Status`]; connection-level faults become
    /// [`UpstreamError::Transport`].
    pub async fn call(&self, spec: RequestSpec) -> UpstreamResult {
        let start_time = Instant::now();
        let method_str = spec.method.to_string();

        let url = match self.url_for(&spec) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(host = %self.host, path = %spec.path, error = %e, "Invalid upstream URL");
                return Err(UpstreamError::InvalidUrl(e));
            }
        };

        let mut request = self
            .client
            .request(spec.method.clone(), url.clone())
            .headers(spec.merged_headers());
        if let Some(body) = spec.body {
            request = request.body(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(method = %method_str, url = %url, error = %e, "Upstream transport error");
                metrics::record_upstream_call(&method_str, None, start_time);
                return Err(UpstreamError::Transport(e));
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            tracing::debug!(method = %method_str, url = %url, status = %status, "Upstream rejected request");
            metrics::record_upstream_call(&method_str, Some(status.as_u16()), start_time);
            return Err(UpstreamError::from_status(status));
        }

        let body = response.bytes().await.map_err(|e| {
            tracing::warn!(method = %method_str, url = %url, error = %e, "Upstream body read failed");
            metrics::record_upstream_call(&method_str, None, start_time);
            UpstreamError::Transport(e)
        })?;

        tracing::debug!(
            method = %method_str,
            url = %url,
            bytes = body.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Upstream call succeeded"
        );
        metrics::record_upstream_call(&method_str, Some(status.as_u16()), start_time);

        Ok(body)
    }
}
