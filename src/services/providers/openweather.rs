/// OpenWeather provider
///
/// Uses the free /weather and /forecast endpoints in metric units. The forecast
/// covers five days in 3-hour intervals.
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{CurrentConditions, ForecastSample, OwmCurrentResponse, OwmForecastResponse},
    services::providers::WeatherProvider,
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::time::Duration;

const HTTP_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Clone)]
pub struct OpenWeatherProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl OpenWeatherProvider {
    /// Creates the provider, failing fast when no API key is configured
    pub fn new(api_key: String, api_url: String) -> AppResult<Self> {
        if api_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "OpenWeather API key missing".to_string(),
            ));
        }

        let http_client = HttpClient::builder().timeout(HTTP_TIMEOUT).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        let api_key = config.weather_api_key()?.to_string();
        Self::new(api_key, config.openweather_api_url.clone())
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, lat: f64, lon: f64) -> AppResult<T> {
        let url = format!("{}/{}", self.api_url, endpoint);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                endpoint = %endpoint,
                status = %status,
                body = %body,
                "OpenWeather request failed"
            );
            return Err(AppError::ProviderUnavailable(format!(
                "OpenWeather {} returned status {}",
                endpoint, status
            )));
        }

        response.json::<T>().await.map_err(|e| {
            AppError::ProviderUnavailable(format!("Invalid OpenWeather {} response: {}", endpoint, e))
        })
    }
}

#[async_trait::async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, lat: f64, lon: f64) -> AppResult<CurrentConditions> {
        let raw: OwmCurrentResponse = self.get_json("weather", lat, lon).await?;
        let current = CurrentConditions::from(raw);

        tracing::info!(
            lat,
            lon,
            temp = current.temperature,
            provider = "openweather",
            "Current conditions fetched"
        );

        Ok(current)
    }

    async fn forecast(&self, lat: f64, lon: f64) -> AppResult<Vec<ForecastSample>> {
        let raw: OwmForecastResponse = self.get_json("forecast", lat, lon).await?;
        let samples: Vec<ForecastSample> = raw.list.into_iter().map(ForecastSample::from).collect();

        tracing::info!(
            lat,
            lon,
            samples = samples.len(),
            provider = "openweather",
            "Forecast fetched"
        );

        Ok(samples)
    }

    fn name(&self) -> &'static str {
        "openweather"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_missing_key_is_configuration_error() {
        let result = OpenWeatherProvider::new("  ".to_string(), "http://test.local".to_string());
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_current_conditions() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("appid", "test_key"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "main": { "temp": 27.3, "humidity": 41 },
                "wind": { "speed": 5.0 },
                "weather": [{ "description": "clear sky" }]
            })))
            .mount(&mock_server)
            .await;

        let provider =
            OpenWeatherProvider::new("test_key".to_string(), mock_server.uri()).unwrap();
        let current = tokio_test::assert_ok!(provider.current(37.98, 23.72).await);

        assert_eq!(current.temperature, 27.3);
        assert_eq!(current.humidity, 41.0);
        assert_eq!(current.wind_speed, 5.0);
        assert_eq!(current.description, "clear sky");
    }

    #[tokio::test]
    async fn test_forecast_samples() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "list": [
                    { "main": { "temp": 20.0, "humidity": 50 }, "wind": { "speed": 3.0 }, "pop": 0.2 },
                    { "main": { "temp": 18.0, "humidity": 70 }, "wind": { "speed": 4.0 }, "rain": { "3h": 0.7 }, "pop": 0.6 }
                ]
            })))
            .mount(&mock_server)
            .await;

        let provider =
            OpenWeatherProvider::new("test_key".to_string(), mock_server.uri()).unwrap();
        let samples = provider.forecast(37.98, 23.72).await.unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].rain_mm, 0.0);
        assert_eq!(samples[0].precipitation_probability, Some(0.2));
        assert_eq!(samples[1].rain_mm, 0.7);
    }

    #[tokio::test]
    async fn test_error_status_is_provider_unavailable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
            .mount(&mock_server)
            .await;

        let provider =
            OpenWeatherProvider::new("bad_key".to_string(), mock_server.uri()).unwrap();
        let result = provider.current(0.0, 0.0).await;

        let err = tokio_test::assert_err!(result);
        assert!(matches!(err, AppError::ProviderUnavailable(_)));
    }
}
