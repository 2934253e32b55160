use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{ClimateArchetype, DroughtTolerance, WeatherSnapshot},
    routes::{AppState, Location},
    services::{
        seasonal::{seasonal_pattern, SeasonalPattern},
        watering::predict_water_interval_days,
    },
};

#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    pub weather: WeatherSnapshot,
    pub climate: ClimateArchetype,
}

#[derive(Debug, Deserialize)]
pub struct WateringQuery {
    pub lat: f64,
    pub lon: f64,
    pub drought: String,
}

#[derive(Debug, Serialize)]
pub struct WateringResponse {
    pub drought: DroughtTolerance,
    pub water_in_days: u32,
    pub weather: WeatherSnapshot,
}

/// Handler for the weather snapshot endpoint; provider failures surface as 502
pub async fn snapshot(
    State(state): State<Arc<AppState>>,
    Query(location): Query<Location>,
) -> AppResult<Json<SnapshotResponse>> {
    let location = location.validate()?;
    let (weather, climate) = state.engine.snapshot(location.lat, location.lon).await?;
    Ok(Json(SnapshotResponse { weather, climate }))
}

/// Handler for the seasonal pattern endpoint
pub async fn seasonal(Query(location): Query<Location>) -> AppResult<Json<SeasonalPattern>> {
    let location = location.validate()?;
    let month = Utc::now().month0();
    Ok(Json(seasonal_pattern(location.lat, location.lon, month)))
}

/// Handler for the watering interval endpoint
pub async fn watering(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WateringQuery>,
) -> AppResult<Json<WateringResponse>> {
    let location = Location {
        lat: query.lat,
        lon: query.lon,
    }
    .validate()?;
    let drought: DroughtTolerance = query.drought.parse().map_err(AppError::InvalidInput)?;

    let (weather, _) = state.engine.snapshot(location.lat, location.lon).await?;
    let water_in_days = predict_water_interval_days(drought, &weather);

    tracing::info!(
        lat = location.lat,
        lon = location.lon,
        drought = %drought,
        water_in_days,
        "Watering interval predicted"
    );

    Ok(Json(WateringResponse {
        drought,
        water_in_days,
        weather,
    }))
}
