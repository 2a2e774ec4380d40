//! Request orchestration for the hero endpoints.
//!
//! ```text
//! Start → Authenticating ─┬─ AuthFailed ──────────────────────────────→ error
//!                         ├─ Unauthorized ─→ FetchingBaseData ────────→ respond
//!                         └─ Authorized ───→ FetchingBaseData → Enriching → respond
//! ```
//! Any fetch failure goes straight to the response with that error.

use axum::http::HeaderMap;

use crate::config::ProxyConfig;
use crate::error::{ApiError, Stage};
use crate::heroes::aggregator::ProfileAggregator;
use crate::heroes::auth::Authenticator;
use crate::heroes::types::{EnrichedHero, Hero, HeroId};
use crate::heroes::{decode, hero_request, HEROES_PATH};
use crate::upstream::{RequestSpec, Scheme, UpstreamClient, UpstreamError};

/// Per-process service; holds no per-request state.
#[derive(Clone, Debug)]
pub struct HeroService {
    client: UpstreamClient,
    scheme: Scheme,
    authenticator: Authenticator,
    aggregator: ProfileAggregator,
}

impl HeroService {
    /// Wire the upstream client, authenticator and aggregator from config.
    pub fn from_config(config: &ProxyConfig) -> Result<Self, UpstreamError> {
        let client = UpstreamClient::new(&config.upstream, &config.timeouts)?;
        Ok(Self::new(client, config))
    }

    pub fn new(client: UpstreamClient, config: &ProxyConfig) -> Self {
        Self {
            authenticator: Authenticator::new(client.clone(), &config.upstream),
            aggregator: ProfileAggregator::new(client.clone(), &config.upstream),
            scheme: config.upstream.data_scheme,
            client,
        }
    }

    /// `GET /heroes`: authenticate, fetch the list, enrich when authorized.
    pub async fn list(&self, headers: &HeaderMap) -> Result<Vec<EnrichedHero>, ApiError> {
        let authorized = self.authenticator.authorize(headers).await?;

        let spec = RequestSpec::get(HEROES_PATH).with_scheme(self.scheme);
        let body = self
            .client
            .call(spec)
            .await
            .map_err(|e| ApiError::upstream(Stage::HeroList, e))?;
        let heroes: Vec<Hero> = decode(Stage::HeroList, &body)?;

        self.aggregator.enrich(heroes, authorized).await
    }

    /// `GET /heroes/{id}`: authenticate, fetch the hero, then its profile
    /// when authorized. An unknown hero never triggers a profile fetch.
    pub async fn get(&self, id: &HeroId, headers: &HeaderMap) -> Result<EnrichedHero, ApiError> {
        let authorized = self.authenticator.authorize(headers).await?;

        let spec = hero_request(id, &[])?.with_scheme(self.scheme);
        let body = self
            .client
            .call(spec)
            .await
            .map_err(|e| ApiError::upstream(Stage::Hero, e))?;
        let hero: Hero = decode(Stage::Hero, &body)?;

        if !authorized {
            return Ok(EnrichedHero::public(hero));
        }

        let profile = self.aggregator.fetch_profile(id).await?;
        Ok(EnrichedHero::with_profile(hero, profile))
    }
}
