use axum::{
    extract::{Query, State},
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::RecommendationOutcome,
    routes::{AppState, Location},
};

/// Handler for the recommendations endpoint
///
/// Only coordinate validation can fail; the engine always answers.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(location): Query<Location>,
) -> AppResult<Json<RecommendationOutcome>> {
    let location = location.validate()?;

    tracing::info!(
        request_id = %request_id,
        lat = location.lat,
        lon = location.lon,
        "Processing recommendation request"
    );

    let outcome = state
        .engine
        .recommend_with_tier(location.lat, location.lon)
        .await;

    tracing::info!(
        request_id = %request_id,
        tier = ?outcome.tier,
        count = outcome.recommendations.len(),
        "Recommendation request completed"
    );

    Ok(Json(outcome))
}
