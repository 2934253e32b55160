use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// OpenWeather API key; the weather provider refuses to start without it
    #[serde(default)]
    pub openweather_api_key: Option<String>,

    /// OpenWeather API base URL
    #[serde(default = "default_openweather_api_url")]
    pub openweather_api_url: String,

    /// Trefle API token; searches return nothing when absent
    #[serde(default)]
    pub trefle_token: Option<String>,

    /// Trefle API base URL
    #[serde(default = "default_trefle_api_url")]
    pub trefle_api_url: String,

    /// Result cap passed to every catalog search term
    #[serde(default = "default_catalog_search_limit")]
    pub catalog_search_limit: u32,

    /// Overall deadline for one recommendation request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_openweather_api_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_trefle_api_url() -> String {
    "https://trefle.io/api/v1".to_string()
}

fn default_catalog_search_limit() -> u32 {
    10
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Returns the weather credential or a configuration error if it is missing or blank
    pub fn weather_api_key(&self) -> AppResult<&str> {
        match self.openweather_api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(AppError::Configuration(
                "OPENWEATHER_API_KEY is not set".to_string(),
            )),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
