//! Concurrent profile enrichment.
//!
//! One profile fetch per hero, all in flight at once, joined fail-fast.
//! Output order always follows input order regardless of completion order,
//! and a failed fetch drops every other in-flight fetch.

use futures_util::future::try_join_all;

use crate::config::UpstreamConfig;
use crate::error::{ApiError, Stage};
use crate::heroes::types::{EnrichedHero, Hero, HeroId, Profile};
use crate::heroes::{decode, hero_request};
use crate::upstream::{Scheme, UpstreamClient};

#[derive(Clone, Debug)]
pub struct ProfileAggregator {
    client: UpstreamClient,
    scheme: Scheme,
}

impl ProfileAggregator {
    pub fn new(client: UpstreamClient, config: &UpstreamConfig) -> Self {
        Self {
            client,
            scheme: config.data_scheme,
        }
    }

    /// Fetch and decode one hero's profile.
    pub async fn fetch_profile(&self, id: &HeroId) -> Result<Profile, ApiError> {
        let spec = hero_request(id, &["profile"])?.with_scheme(self.scheme);
        let body = self
            .client
            .call(spec)
            .await
            .map_err(|e| ApiError::upstream(Stage::Profile, e))?;
        decode(Stage::Profile, &body)
    }

    /// Attach profiles to `heroes` when `authorized`, otherwise pass them through.
    pub async fn enrich(
        &self,
        heroes: Vec<Hero>,
        authorized: bool,
    ) -> Result<Vec<EnrichedHero>, ApiError> {
        if !authorized {
            return Ok(heroes.into_iter().map(EnrichedHero::public).collect());
        }

        tracing::debug!(count = heroes.len(), "Fetching hero profiles");

        let fetches = heroes.into_iter().map(|hero| async move {
            let profile = self.fetch_profile(&hero.id).await?;
            Ok::<_, ApiError>(EnrichedHero::with_profile(hero, profile))
        });

        try_join_all(fetches).await
    }
}
