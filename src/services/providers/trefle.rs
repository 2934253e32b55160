/// Trefle plant catalog
///
/// Search results carry identity and taxonomy only; growth data is not
/// reliably populated, which is why candidates are resolved against the
/// curated trait table.
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{CatalogCandidate, TrefleSearchResponse},
    services::providers::PlantCatalog,
};
use reqwest::Client as HttpClient;
use std::time::Duration;

const HTTP_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Clone)]
pub struct TrefleCatalog {
    http_client: HttpClient,
    token: Option<String>,
    api_url: String,
}

impl TrefleCatalog {
    pub fn new(token: Option<String>, api_url: String) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(HTTP_TIMEOUT).build()?;
        let token = token.filter(|t| !t.trim().is_empty());

        if token.is_none() {
            tracing::warn!("Trefle token missing, catalog searches will return no results");
        }

        Ok(Self {
            http_client,
            token,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(config.trefle_token.clone(), config.trefle_api_url.clone())
    }

    async fn fetch(&self, token: &str, query: &str, limit: u32) -> AppResult<Vec<CatalogCandidate>> {
        let url = format!("{}/plants/search", self.api_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("token", token.to_string()),
                ("q", query.to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ProviderUnavailable(format!(
                "Trefle search returned status {}",
                status
            )));
        }

        let results: TrefleSearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::ProviderUnavailable(format!("Invalid Trefle response: {}", e)))?;

        Ok(results
            .data
            .into_iter()
            .filter_map(|plant| plant.into_candidate())
            .collect())
    }
}

#[async_trait::async_trait]
impl PlantCatalog for TrefleCatalog {
    async fn search(&self, query: &str, limit: u32) -> AppResult<Vec<CatalogCandidate>> {
        let Some(token) = self.token.as_deref() else {
            tracing::warn!(query = %query, "Trefle token missing");
            return Ok(Vec::new());
        };

        match self.fetch(token, query, limit).await {
            Ok(candidates) => {
                tracing::info!(
                    query = %query,
                    results = candidates.len(),
                    provider = "trefle",
                    "Plant search completed"
                );
                Ok(candidates)
            }
            Err(e) => {
                tracing::error!(query = %query, error = %e, provider = "trefle", "Plant search failed");
                Ok(Vec::new())
            }
        }
    }

    fn name(&self) -> &'static str {
        "trefle"
    }
}
