//! Hero endpoint handlers.
//!
//! # Responsibilities
//! - Extract state, the raw path id and inbound headers
//! - Delegate to [`HeroService`](crate::heroes::HeroService)
//! - Serialize the result as JSON; errors render through `ApiError`
//!
//! # Design Decisions
//! - The path id stays an opaque string; upstream decides whether it exists

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};

use crate::error::ApiError;
use crate::heroes::{EnrichedHero, HeroId};
use crate::http::request::RequestIdExt;
use crate::http::server::AppState;

pub async fn list_heroes(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<EnrichedHero>>, ApiError> {
    let heroes = state.heroes.list(&headers).await?;
    tracing::debug!(request_id = %headers.request_id(), count = heroes.len(), "Listed heroes");
    Ok(Json(heroes))
}

pub async fn get_hero(
    State(state): State<AppState>,
    Path(hero_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<EnrichedHero>, ApiError> {
    let id = HeroId::Text(hero_id);
    let hero = state.heroes.get(&id, &headers).await?;
    tracing::debug!(
        request_id = %headers.request_id(),
        hero_id = %id,
        enriched = hero.profile.is_some(),
        "Fetched hero"
    );
    Ok(Json(hero))
}
