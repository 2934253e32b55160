/// External data provider abstraction
///
/// Weather and plant catalog sources sit behind traits so the recommendation
/// engine can be driven by stubs in tests and by HTTP clients in production.
use crate::{
    error::AppResult,
    models::{CatalogCandidate, CurrentConditions, ForecastSample},
};

pub mod openweather;
pub mod trefle;

pub use openweather::OpenWeatherProvider;
pub use trefle::TrefleCatalog;

/// Source of current conditions and a 3-hourly forecast
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions at a point
    async fn current(&self, lat: f64, lon: f64) -> AppResult<CurrentConditions>;

    /// Multi-day forecast in 3-hour intervals, nearest first
    async fn forecast(&self, lat: f64, lon: f64) -> AppResult<Vec<ForecastSample>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Free-text plant search
///
/// Missing credentials yield an empty result rather than an error, so one
/// unconfigured catalog never aborts a recommendation.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PlantCatalog: Send + Sync {
    async fn search(&self, query: &str, limit: u32) -> AppResult<Vec<CatalogCandidate>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
