use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::{
    config::Config,
    error::AppResult,
    models::{
        CatalogCandidate, ClimateArchetype, DroughtTolerance, Recommendation,
        RecommendationOutcome, RecommendationTier, ScoredCandidate, WeatherSnapshot,
    },
    services::{
        candidates::{gather_candidates, DEFAULT_SEARCH_TERMS},
        climate::{aggregate, classify_snapshot},
        providers::{PlantCatalog, WeatherProvider},
        scoring::{breakdown, score},
        trait_table::{display_name, TraitTable},
    },
};

pub const MAX_RECOMMENDATIONS: usize = 5;
/// Catalog candidates must score strictly above this
pub const CATALOG_MIN_SCORE: u32 = 30;
/// Curated entries must score strictly above this when the catalog is bypassed
pub const CURATED_MIN_SCORE: u32 = 40;

const DEFAULT_SEARCH_LIMIT: u32 = 10;
const DEFAULT_DEADLINE: Duration = Duration::from_secs(10);
const CURATED_FAMILY: &str = "Mediterranean Native";
const UNKNOWN_FAMILY: &str = "Unknown";

/// Weather-aware plant recommendations for a point
///
/// Runs a three-rung ladder: catalog candidates scored against the trait
/// table, then the trait table scored on its own, then a fixed Mediterranean
/// list. A weather failure or a snapshot that misses the deadline lands on
/// the fixed list, so callers never see an error.
#[derive(Clone)]
pub struct RecommendationEngine {
    weather: Arc<dyn WeatherProvider>,
    catalog: Arc<dyn PlantCatalog>,
    traits: Arc<TraitTable>,
    search_terms: Vec<String>,
    search_limit: u32,
    deadline: Duration,
}

impl RecommendationEngine {
    pub fn new(weather: Arc<dyn WeatherProvider>, catalog: Arc<dyn PlantCatalog>) -> Self {
        Self {
            weather,
            catalog,
            traits: TraitTable::curated(),
            search_terms: DEFAULT_SEARCH_TERMS.iter().map(|t| t.to_string()).collect(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            deadline: DEFAULT_DEADLINE,
        }
    }

    pub fn from_config(
        config: &Config,
        weather: Arc<dyn WeatherProvider>,
        catalog: Arc<dyn PlantCatalog>,
    ) -> Self {
        Self::new(weather, catalog)
            .with_search_limit(config.catalog_search_limit)
            .with_deadline(Duration::from_secs(config.request_timeout_secs))
    }

    pub fn with_traits(mut self, traits: Arc<TraitTable>) -> Self {
        self.traits = traits;
        self
    }

    pub fn with_search_terms(mut self, terms: Vec<String>) -> Self {
        self.search_terms = terms;
        self
    }

    pub fn with_search_limit(mut self, limit: u32) -> Self {
        self.search_limit = limit;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Up to five ranked recommendations; never fails
    pub async fn recommend(&self, lat: f64, lon: f64) -> Vec<Recommendation> {
        self.recommend_with_tier(lat, lon).await.recommendations
    }

    /// Like [`recommend`](Self::recommend), tagged with the tier that answered
    ///
    /// The deadline covers the whole request. A snapshot that misses it means
    /// static defaults; a catalog that misses it only empties the candidate
    /// pool, so the curated tier still answers.
    pub async fn recommend_with_tier(&self, lat: f64, lon: f64) -> RecommendationOutcome {
        let started = Instant::now();

        let outcome = match tokio::time::timeout(self.deadline, self.snapshot(lat, lon)).await {
            Ok(Ok((weather, climate))) => {
                let remaining = self.deadline.saturating_sub(started.elapsed());
                self.run_ladder(&weather, climate, remaining).await
            }
            Ok(Err(e)) if e.is_provider_failure() => {
                tracing::warn!(lat, lon, error = %e, "Weather unavailable, using static defaults");
                static_default_outcome()
            }
            Ok(Err(e)) => {
                tracing::error!(lat, lon, error = %e, "Recommendation pipeline failed, using static defaults");
                static_default_outcome()
            }
            Err(_) => {
                tracing::error!(
                    lat,
                    lon,
                    deadline_ms = self.deadline.as_millis() as u64,
                    "Weather snapshot missed the deadline, using static defaults"
                );
                static_default_outcome()
            }
        };

        tracing::info!(
            lat,
            lon,
            tier = ?outcome.tier,
            count = outcome.recommendations.len(),
            "Recommendations ready"
        );

        outcome
    }

    /// Fetches current conditions and forecast together and aggregates them
    pub async fn snapshot(&self, lat: f64, lon: f64) -> AppResult<(WeatherSnapshot, ClimateArchetype)> {
        let (current, forecast) = tokio::try_join!(
            self.weather.current(lat, lon),
            self.weather.forecast(lat, lon)
        )?;

        let weather = aggregate(&current, &forecast)?;
        let climate = classify_snapshot(&weather);

        tracing::info!(
            temp = weather.temp,
            rain_days = weather.rain_days,
            humidity = weather.humidity,
            climate = %climate,
            provider = self.weather.name(),
            "Weather snapshot built"
        );

        Ok((weather, climate))
    }

    async fn run_ladder(
        &self,
        weather: &WeatherSnapshot,
        climate: ClimateArchetype,
        budget: Duration,
    ) -> RecommendationOutcome {
        let gather = gather_candidates(Arc::clone(&self.catalog), &self.search_terms, self.search_limit);
        let candidates = match tokio::time::timeout(budget, gather).await {
            Ok(pool) => pool,
            Err(_) => {
                tracing::warn!(
                    budget_ms = budget.as_millis() as u64,
                    provider = self.catalog.name(),
                    "Catalog search missed the deadline, continuing without candidates"
                );
                Vec::new()
            }
        };

        let ranked = rank_catalog(&self.traits, &candidates, weather, climate);
        if !ranked.is_empty() {
            return RecommendationOutcome {
                tier: RecommendationTier::Catalog,
                recommendations: ranked,
            };
        }

        tracing::info!(
            candidates = candidates.len(),
            "No usable catalog matches, scoring curated table directly"
        );

        let curated = rank_curated(&self.traits, weather, climate);
        if !curated.is_empty() {
            return RecommendationOutcome {
                tier: RecommendationTier::CuratedDatabase,
                recommendations: curated,
            };
        }

        tracing::warn!("Curated table produced no strong matches, using static defaults");
        static_default_outcome()
    }
}

/// Scores catalog candidates, keeping only resolved ones scoring above the floor
pub fn rank_catalog(
    traits: &TraitTable,
    candidates: &[CatalogCandidate],
    weather: &WeatherSnapshot,
    climate: ClimateArchetype,
) -> Vec<Recommendation> {
    let mut scored: Vec<ScoredCandidate<'_>> = candidates
        .iter()
        .map(|candidate| {
            let resolved = traits.lookup(&candidate.scientific_name);
            ScoredCandidate {
                candidate: candidate.clone(),
                traits: resolved,
                score: score(&resolved, weather),
            }
        })
        .filter(|s| s.traits.record().is_some() && s.score > CATALOG_MIN_SCORE)
        .collect();

    // Stable sort keeps catalog order among equal scores
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(MAX_RECOMMENDATIONS);

    for s in &scored {
        tracing::debug!(
            catalog_id = %s.candidate.id,
            scientific_name = %s.candidate.scientific_name,
            score = s.score,
            "Catalog candidate kept"
        );
    }

    let note = format!(
        "Ideal for {} ({:.1}°C, {:.1} rainy days)",
        weather.description, weather.temp, weather.rain_days
    );

    scored
        .into_iter()
        .filter_map(|s| {
            let record = s.traits.record()?;
            let candidate = s.candidate;
            Some(Recommendation {
                name: candidate
                    .common_name
                    .clone()
                    .unwrap_or_else(|| candidate.scientific_name.clone()),
                species: candidate.scientific_name,
                family: candidate.family.unwrap_or_else(|| UNKNOWN_FAMILY.to_string()),
                drought: record.drought,
                sun: record.sun,
                humidity: record.humidity,
                image: candidate.image_url,
                score: s.score,
                weather_note: note.clone(),
                climate,
            })
        })
        .collect()
}

/// Scores every curated entry directly, bypassing the catalog
pub fn rank_curated(
    traits: &TraitTable,
    weather: &WeatherSnapshot,
    climate: ClimateArchetype,
) -> Vec<Recommendation> {
    let mut scored: Vec<_> = traits
        .iter()
        .map(|(key, record)| (key, record, breakdown(record, weather).total()))
        .filter(|(_, _, score)| *score > CURATED_MIN_SCORE)
        .collect();

    scored.sort_by(|a, b| b.2.cmp(&a.2));
    scored.truncate(MAX_RECOMMENDATIONS);

    let note = format!("Perfect for {} ({:.1}°C)", weather.description, weather.temp);

    scored
        .into_iter()
        .map(|(key, record, score)| Recommendation {
            name: display_name(key),
            species: key.to_string(),
            family: CURATED_FAMILY.to_string(),
            drought: record.drought,
            sun: record.sun,
            humidity: record.humidity,
            image: None,
            score,
            weather_note: note.clone(),
            climate,
        })
        .collect()
}

/// Guaranteed non-empty answer when the pipeline cannot run
pub fn static_defaults() -> Vec<Recommendation> {
    let entry = |name: &str, species: &str, family: &str, sun, humidity, score, note: &str| {
        Recommendation {
            name: name.to_string(),
            species: species.to_string(),
            family: family.to_string(),
            drought: DroughtTolerance::High,
            sun,
            humidity,
            image: None,
            score,
            weather_note: note.to_string(),
            climate: ClimateArchetype::Mediterranean,
        }
    };

    vec![
        entry("Olive Tree", "Olea europaea", "Oleaceae", 9, 4, 95, "Perfect Mediterranean climate plant"),
        entry("Lavender", "Lavandula angustifolia", "Lamiaceae", 8, 3, 90, "Drought-tolerant and aromatic"),
        entry("Rosemary", "Rosmarinus officinalis", "Lamiaceae", 8, 4, 88, "Hardy herb for dry conditions"),
    ]
}

fn static_default_outcome() -> RecommendationOutcome {
    RecommendationOutcome {
        tier: RecommendationTier::StaticDefault,
        recommendations: static_defaults(),
    }
}
