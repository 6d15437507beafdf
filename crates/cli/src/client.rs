//! HTTP client for the prediction service

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use service_lib::health::HealthResponse;
use service_lib::models::{EventBatch, PredictionResponse};
use url::Url;

/// Client for a running prediction service
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(base_url).context("Invalid service URL")?;

        Ok(Self { client, base_url })
    }

    /// Send an event batch to the invocation endpoint
    pub async fn invoke(&self, batch: &EventBatch) -> Result<PredictionResponse> {
        self.post("invoke", batch).await
    }

    /// Query the health endpoint
    pub async fn health(&self) -> Result<HealthResponse> {
        self.get("healthz").await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        Self::parse(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        Self::parse(response).await
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Service error ({}): {}", status, body);
        }

        response.json().await.context("Failed to parse response")
    }
}
