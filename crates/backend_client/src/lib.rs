use std::time::Duration;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use site_model::{AnalysisService, AssessmentBundle, LiveWeatherSnapshot, WeatherService};

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP client for the site analysis backend.
pub struct BackendClient {
    http_client: reqwest::Client,
    base_url: String,
}

pub struct BackendClientBuilder {
    http_client: Option<reqwest::Client>,
    base_url: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct LocationRequest {
    lat: f64,
    lon: f64,
}

impl BackendClient {
    pub fn builder() -> BackendClientBuilder {
        BackendClientBuilder {
            http_client: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_location<T: DeserializeOwned>(&self, endpoint: &str, lat: f64, lon: f64) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        log::debug!("POST {} lat={} lon={}", url, lat, lon);

        let response = self
            .http_client
            .post(&url)
            .header("Accept", "application/json")
            .json(&LocationRequest { lat, lon })
            .send()
            .await
            .map_err(|e| anyhow!("Request to {} failed: {}", endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            if status.as_u16() == 404 {
                return Err(anyhow!("Endpoint not found: {}", endpoint));
            }

            return Err(anyhow!("HTTP error {}: {}", status, error_body));
        }

        response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse JSON response from {}: {}", endpoint, e))
    }
}

impl BackendClientBuilder {
    pub fn with_http_client(&mut self, http_client: reqwest::Client) -> &mut Self {
        self.http_client = Some(http_client);
        self
    }

    pub fn with_base_url<U: Into<String>>(&mut self, base_url: U) -> &mut Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = timeout;
        self
    }

    pub fn build(&self) -> Result<BackendClient> {
        let http_client = match &self.http_client {
            Some(client) => client.clone(),
            None => reqwest::Client::builder()
                .user_agent(concat!("site-assessment/", env!("CARGO_PKG_VERSION")))
                .timeout(self.timeout)
                .build()?,
        };

        Ok(BackendClient {
            http_client,
            base_url: self.base_url.clone(),
        })
    }
}

#[async_trait]
impl AnalysisService for BackendClient {
    async fn analyze_location(&self, lat: f64, lon: f64) -> Result<AssessmentBundle> {
        self.post_location("/analyze", lat, lon).await
    }
}

#[async_trait]
impl WeatherService for BackendClient {
    async fn live_weather(&self, lat: f64, lon: f64) -> Result<LiveWeatherSnapshot> {
        self.post_location("/live-weather", lat, lon).await
    }
}
