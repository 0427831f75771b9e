//! Fetches the full station catalogue from the schedule source.

use super::error::CatalogueError;
use super::model::StationsListResponse;

const DEFAULT_BASE_URL: &str = "https://api.rasp.yandex.net/v3.0";

#[derive(Debug, Clone)]
pub struct CatalogueClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl CatalogueClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Client for the schedule source's `stations_list` endpoint.
pub struct CatalogueClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CatalogueClient {
    pub fn new(config: CatalogueClientConfig) -> Result<Self, CatalogueError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// Fetch and parse the entire station/settlement catalogue.
    pub async fn fetch_all(&self) -> Result<StationsListResponse, CatalogueError> {
        let url = format!(
            "{}/stations_list/?apikey={}&format=json&lang=en_US",
            self.base_url, self.api_key
        );
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(CatalogueError::Unauthorized);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogueError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<StationsListResponse>()
            .await
            .map_err(|e| CatalogueError::Json(e.to_string()))
    }
}
