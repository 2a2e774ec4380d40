//! Hero catalog types.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Upstream hero identifier.
///
/// The upstream may use numbers or strings; the received form is kept so
/// responses echo it unchanged. Any JSON number is accepted, including
/// negative and fractional ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum HeroId {
    Number(Number),
    Text(String),
}

impl fmt::Display for HeroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeroId::Number(n) => write!(f, "{}", n),
            HeroId::Text(s) => f.write_str(s),
        }
    }
}

impl HeroId {
    /// The id as a single upstream path segment.
    ///
    /// `None` for ids that cannot name a resource below `/heroes`: the
    /// empty string and the dot segments.
    pub fn as_segment(&self) -> Option<String> {
        let segment = self.to_string();
        match segment.as_str() {
            "" | "." | ".." => None,
            _ => Some(segment),
        }
    }
}

impl From<&str> for HeroId {
    fn from(id: &str) -> Self {
        HeroId::Text(id.to_string())
    }
}

impl From<u64> for HeroId {
    fn from(id: u64) -> Self {
        HeroId::Number(id.into())
    }
}

/// Public hero record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Hero {
    pub id: HeroId,
    pub name: String,
    pub image: String,
}

/// Private attribute bundle, one per hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    pub str: i64,
    pub int: i64,
    pub agi: i64,
    pub luk: i64,
}

/// Hero plus its profile when the request was authorized.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EnrichedHero {
    #[serde(flatten)]
    pub hero: Hero,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
}

impl EnrichedHero {
    pub fn public(hero: Hero) -> Self {
        Self { hero, profile: None }
    }

    pub fn with_profile(hero: Hero, profile: Profile) -> Self {
        Self {
            hero,
            profile: Some(profile),
        }
    }
}

/// Body of the upstream credential check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credential {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
