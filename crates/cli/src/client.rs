//! API client for communicating with the uptrack server

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

/// HTTP client for the uptrack report and ingestion API
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(base_url).context("Invalid API URL")?;

        Ok(Self { client, base_url })
    }

    /// Fetch the report for one resource prefix
    pub async fn report(&self, resource: &str, interval_hours: u32) -> Result<Report> {
        let mut url = self.base_url.join("/report").context("Invalid path")?;
        url.query_pairs_mut()
            .append_pair("url", resource)
            .append_pair("intervalHour", &interval_hours.to_string());
        self.get(url).await
    }

    /// Fetch the fleet-wide report
    pub async fn fleet_report(&self) -> Result<Report> {
        let url = self.base_url.join("/report-common").context("Invalid path")?;
        self.get(url).await
    }

    /// Push a raw JSON batch of checks
    pub async fn ingest(&self, payload: Vec<u8>) -> Result<IngestResponse> {
        let url = self.base_url.join("/checks").context("Invalid path")?;

        let response = self
            .client
            .post(url)
            .header("content-type", "application/json")
            .body(payload)
            .send()
            .await
            .context("Failed to send request")?;

        Self::parse(response).await
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        Self::parse(response).await
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API error ({}): {}", status, body);
        }

        response.json().await.context("Failed to parse response")
    }
}

// API response types

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub uptime: f64,
    pub avg_response_time: f64,
    pub incidents: u64,
    pub mttr: f64,
    pub sla_compliance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimestampValue {
    pub timestamp: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailuresByTypes {
    pub critical: u64,
    pub warning: u64,
    pub resolved: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapEntry {
    pub day: String,
    pub hour: u32,
    pub value: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dependency {
    pub from: String,
    pub to: String,
    pub correlation: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub failures_count: Vec<TimestampValue>,
    pub response_time: Vec<TimestampValue>,
    pub failures_by_types: FailuresByTypes,
    pub heatmap: Vec<HeatmapEntry>,
    pub dependencies: Vec<Dependency>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub metrics: Metrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<Stats>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    pub accepted: usize,
}
