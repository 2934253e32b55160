use serde::{Deserialize, Serialize};

use super::{CatalogCandidate, ClimateArchetype, DroughtTolerance, TraitRecord};

/// Outcome of resolving a scientific name against the trait table
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraitMatch<'a> {
    Found {
        key: &'a str,
        record: &'a TraitRecord,
        via: MatchKind,
    },
    /// No curated profile; scored with a weak baseline rather than rejected
    Absent,
}

impl<'a> TraitMatch<'a> {
    pub fn record(&self) -> Option<&'a TraitRecord> {
        match *self {
            TraitMatch::Found { record, .. } => Some(record),
            TraitMatch::Absent => None,
        }
    }
}

/// Which lookup step resolved a name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Genus,
    Containment,
}

/// A catalog candidate with its resolved profile and score, built per request
#[derive(Debug, Clone)]
pub struct ScoredCandidate<'a> {
    pub candidate: CatalogCandidate,
    pub traits: TraitMatch<'a>,
    pub score: u32,
}

/// Which rung of the fallback ladder produced a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTier {
    /// Catalog results scored against the trait table
    Catalog,
    /// Trait table scored directly, catalog bypassed
    CuratedDatabase,
    /// Fixed Mediterranean list when the pipeline fails
    StaticDefault,
}

/// One ranked, explained plant suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    pub species: String,
    pub family: String,
    pub drought: DroughtTolerance,
    pub sun: u8,
    pub humidity: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub score: u32,
    pub weather_note: String,
    pub climate: ClimateArchetype,
}

/// Recommendations tagged with the ladder tier that produced them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationOutcome {
    pub tier: RecommendationTier,
    pub recommendations: Vec<Recommendation>,
}
