use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::{models::CatalogCandidate, services::providers::PlantCatalog};

/// Search panel biased toward Mediterranean, drought-tolerant vocabulary
pub const DEFAULT_SEARCH_TERMS: &[&str] = &[
    "mediterranean",
    "lavender",
    "olive",
    "rosemary",
    "sage",
    "thyme",
];

/// Runs every search term concurrently and merges the results
///
/// A failing term is logged and skipped. Results are merged in term order,
/// not completion order, so the first-seen record for an identifier is
/// always the same one. Dropping the returned future aborts any searches
/// still in flight.
pub async fn gather_candidates(
    catalog: Arc<dyn PlantCatalog>,
    terms: &[String],
    limit: u32,
) -> Vec<CatalogCandidate> {
    let mut tasks = JoinSet::new();

    for (index, term) in terms.iter().enumerate() {
        let catalog = Arc::clone(&catalog);
        let query = term.clone();
        tasks.spawn(async move { (index, catalog.search(&query, limit).await) });
    }

    let mut slots: Vec<Option<Vec<CatalogCandidate>>> = vec![None; terms.len()];
    let mut failed = 0usize;

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, Ok(candidates))) => slots[index] = Some(candidates),
            Ok((index, Err(e))) => {
                failed += 1;
                tracing::warn!(term = %terms[index], error = %e, "Catalog search failed, skipping term");
            }
            Err(e) => {
                failed += 1;
                tracing::warn!(error = %e, "Catalog search task join error");
            }
        }
    }

    let batches = slots.into_iter().flatten();
    let pool = dedupe(batches);

    tracing::info!(
        terms = terms.len(),
        failed_terms = failed,
        unique_candidates = pool.len(),
        provider = catalog.name(),
        "Candidate pool assembled"
    );

    pool
}

/// Flattens batches keeping the first record seen for each identifier
pub fn dedupe(batches: impl IntoIterator<Item = Vec<CatalogCandidate>>) -> Vec<CatalogCandidate> {
    let mut seen = HashSet::new();
    batches
        .into_iter()
        .flatten()
        .filter(|candidate| seen.insert(candidate.id))
        .collect()
}
