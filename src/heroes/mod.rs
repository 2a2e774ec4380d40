//! Hero catalog subsystem.
//!
//! # Data Flow
//! ```text
//! inbound headers
//!     → auth.rs (credential check, may call upstream)
//!     → service.rs (base hero fetch, always)
//!     → aggregator.rs (profile fan-out, only when authorized)
//!     → EnrichedHero(s) for the response layer
//! ```
//!
//! # Design Decisions
//! - Base data is fetched only after authentication resolves
//! - Enrichment only augments heroes; it never adds or drops any
//! - Upstream bodies are decoded fallibly into typed records

pub mod aggregator;
pub mod auth;
pub mod service;
pub mod types;

pub use aggregator::ProfileAggregator;
pub use auth::Authenticator;
pub use service::HeroService;
pub use types::{Credential, EnrichedHero, Hero, HeroId, Profile};

use serde::de::DeserializeOwned;

use crate::error::{ApiError, Stage};
use crate::upstream::RequestSpec;

/// Upstream path of the hero list.
pub const HEROES_PATH: &str = "/heroes";

/// `GET /heroes/{id}` followed by `tail`.
///
/// The id is always exactly one encoded segment below `/heroes`. Ids that
/// cannot be one (empty, `.` or `..`) are reported as not found without
/// contacting upstream.
pub(crate) fn hero_request(id: &HeroId, tail: &[&str]) -> Result<RequestSpec, ApiError> {
    let segment = id.as_segment().ok_or_else(|| {
        tracing::debug!(hero_id = %id, "Hero id is not a path segment");
        ApiError::NotFound
    })?;
    let spec = RequestSpec::get(HEROES_PATH).with_segment(segment);
    Ok(tail.iter().fold(spec, |spec, s| spec.with_segment(*s)))
}

/// Decode an upstream body, tagging failures with the stage.
pub(crate) fn decode<T: DeserializeOwned>(stage: Stage, body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::decode(stage, e))
}
