use serde::{Deserialize, Serialize};

/// Current conditions at a point, in provider units (wind in m/s)
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub description: String,
}

/// One 3-hour forecast interval, in provider units (wind in m/s)
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    /// Rainfall during the interval in mm
    pub rain_mm: f64,
    /// Probability of precipitation, 0..1
    pub precipitation_probability: Option<f64>,
}

/// Weather derived once per request from current conditions and the forecast
///
/// `temp_min <= forecast_temp <= temp_max` and `rain_days >= 0` always hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Current temperature in °C
    pub temp: f64,
    /// Current relative humidity in %
    pub humidity: f64,
    /// Nearest-term probability of precipitation in %
    pub precipitation: f64,
    /// Current wind speed in km/h
    pub wind_speed: f64,
    pub description: String,
    /// Median forecast temperature
    pub forecast_temp: f64,
    /// Approximate rainy days per week, not an exact count
    pub rain_days: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub climate_summary: String,
}

/// Coarse climate category, first-match classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimateArchetype {
    Mediterranean,
    Tropical,
    TemperateWet,
    Cold,
    Arid,
    Temperate,
}

impl ClimateArchetype {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClimateArchetype::Mediterranean => "mediterranean",
            ClimateArchetype::Tropical => "tropical",
            ClimateArchetype::TemperateWet => "temperate_wet",
            ClimateArchetype::Cold => "cold",
            ClimateArchetype::Arid => "arid",
            ClimateArchetype::Temperate => "temperate",
        }
    }
}

impl std::fmt::Display for ClimateArchetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// OpenWeather API Types
// ============================================================================

/// Raw response from GET /weather
#[derive(Debug, Clone, Deserialize)]
pub struct OwmCurrentResponse {
    pub main: OwmMain,
    #[serde(default)]
    pub wind: OwmWind,
    #[serde(default)]
    pub weather: Vec<OwmCondition>,
}

/// Raw response from GET /forecast
#[derive(Debug, Clone, Deserialize)]
pub struct OwmForecastResponse {
    #[serde(default)]
    pub list: Vec<OwmForecastItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwmForecastItem {
    pub main: OwmMain,
    #[serde(default)]
    pub wind: OwmWind,
    #[serde(default)]
    pub rain: Option<OwmRain>,
    #[serde(default)]
    pub pop: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwmMain {
    pub temp: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwmWind {
    #[serde(default)]
    pub speed: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwmCondition {
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwmRain {
    #[serde(rename = "3h", default)]
    pub three_hour: Option<f64>,
}

impl From<OwmCurrentResponse> for CurrentConditions {
    fn from(raw: OwmCurrentResponse) -> Self {
        Self {
            temperature: raw.main.temp,
            humidity: raw.main.humidity,
            wind_speed: raw.wind.speed,
            description: raw
                .weather
                .into_iter()
                .next()
                .map(|c| c.description)
                .unwrap_or_default(),
        }
    }
}

impl From<OwmForecastItem> for ForecastSample {
    fn from(item: OwmForecastItem) -> Self {
        Self {
            temperature: item.main.temp,
            humidity: item.main.humidity,
            wind_speed: item.wind.speed,
            rain_mm: item.rain.and_then(|r| r.three_hour).unwrap_or(0.0),
            precipitation_probability: item.pop,
        }
    }
}
