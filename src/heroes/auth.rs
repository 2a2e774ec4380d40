//! Credential check against the upstream auth endpoint.

use axum::http::HeaderMap;

use crate::config::UpstreamConfig;
use crate::error::{ApiError, Stage};
use crate::heroes::types::Credential;
use crate::upstream::{RequestSpec, Scheme, UpstreamClient};

/// Inbound header carrying the credential name.
pub const NAME_HEADER: &str = "name";
/// Inbound header carrying the credential password.
pub const PASSWORD_HEADER: &str = "password";

/// Decides whether a request may see private profiles.
#[derive(Clone, Debug)]
pub struct Authenticator {
    client: UpstreamClient,
    scheme: Scheme,
    path: String,
}

impl Authenticator {
    pub fn new(client: UpstreamClient, config: &UpstreamConfig) -> Self {
        Self {
            client,
            scheme: config.auth_scheme,
            path: config.auth_path.clone(),
        }
    }

    /// Extract a credential from request headers.
    ///
    /// Returns `None` when the name is missing, empty or not valid UTF-8,
    /// whatever the password header holds.
    pub fn credential_from_headers(headers: &HeaderMap) -> Option<Credential> {
        let name = header_str(headers, NAME_HEADER).filter(|n| !n.is_empty())?;
        let password = header_str(headers, PASSWORD_HEADER);

        Some(Credential {
            name: name.to_string(),
            password: password.map(str::to_string),
        })
    }

    /// Resolve the authorized flag for a request.
    ///
    /// No credential means `Ok(false)` without touching the network. A
    /// supplied credential is posted upstream; 200 means `Ok(true)` and any
    /// failure is returned as an [`Stage::Auth`] error, never downgraded.
    pub async fn authorize(&self, headers: &HeaderMap) -> Result<bool, ApiError> {
        let credential = match Self::credential_from_headers(headers) {
            Some(c) => c,
            None => {
                tracing::debug!("No credential supplied, serving public data");
                return Ok(false);
            }
        };

        let body = serde_json::to_vec(&credential).map_err(|e| ApiError::decode(Stage::Auth, e))?;
        let spec = RequestSpec::post(self.path.clone(), body).with_scheme(self.scheme);

        // Response content is not inspected; only the status matters.
        self.client
            .call(spec)
            .await
            .map_err(|e| ApiError::upstream(Stage::Auth, e))?;

        tracing::debug!(name = %credential.name, "Credential accepted");
        Ok(true)
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
