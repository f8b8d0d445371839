use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::GatewayError;
use crate::models::job::{DatasetStatus, JobPosting, ScrapeStatus, ScrapeTrigger};

const DATASET_CHECK_PATH: &str = "/dataset-check";
const DATASET_PATH: &str = "/dataset";
const TRIGGER_SCRAPE_PATH: &str = "/trigger-scrape";
const SCRAPE_STATUS_PATH: &str = "/scrape-status";

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Outcome of a full dataset fetch. A missing dataset is a state, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetFetch {
    Missing,
    /// Jobs in the order the backend returned them.
    Ready(Vec<JobPosting>),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum DatasetEnvelope {
    Missing,
    Ready { jobs: Option<Vec<JobPosting>> },
}

/// HTTP client for the dataset and scraper-control endpoints.
#[derive(Clone)]
pub struct DatasetGateway {
    client: Client,
    base_url: String,
}

impl DatasetGateway {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build dataset HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Reports whether a scraped dataset exists. Never fails: any transport or
    /// parse problem degrades to "not present, count zero".
    pub async fn check_availability(&self) -> DatasetStatus {
        match self.get_json::<DatasetStatus>(DATASET_CHECK_PATH).await {
            Ok(status) => {
                debug!(
                    "Dataset check: exists={} count={}",
                    status.exists, status.count
                );
                status
            }
            Err(e) => {
                warn!("Dataset check failed, reporting absent dataset: {e}");
                DatasetStatus::absent()
            }
        }
    }

    /// Fetches the full persisted job list.
    pub async fn fetch_all(&self) -> Result<DatasetFetch, GatewayError> {
        let body = self.get_text(DATASET_PATH).await?;

        let envelope: DatasetEnvelope = serde_json::from_str(&body)
            .map_err(|e| GatewayError::Malformed(format!("unreadable dataset body: {e}")))?;

        match envelope {
            DatasetEnvelope::Missing => {
                info!("Dataset service reports no scraped data");
                Ok(DatasetFetch::Missing)
            }
            DatasetEnvelope::Ready { jobs: Some(jobs) } => {
                info!("Fetched {} jobs from dataset service", jobs.len());
                Ok(DatasetFetch::Ready(jobs))
            }
            DatasetEnvelope::Ready { jobs: None } => Err(GatewayError::Malformed(
                "status is ready but no jobs array was sent".to_string(),
            )),
        }
    }

    /// Asks the scraper to start. The backend answers `"error"` while a scrape is running.
    pub async fn trigger_scrape(&self) -> Result<ScrapeTrigger, GatewayError> {
        let response = self.client.post(self.url(TRIGGER_SCRAPE_PATH)).send().await?;
        let body = Self::read_success_body(response).await?;
        let ack: ScrapeTrigger = serde_json::from_str(&body)
            .map_err(|e| GatewayError::Malformed(format!("unreadable scrape trigger body: {e}")))?;

        if ack.started() {
            info!("Scraper started");
        } else {
            warn!("Scraper refused to start: {}", ack.message);
        }
        Ok(ack)
    }

    pub async fn scrape_status(&self) -> Result<ScrapeStatus, GatewayError> {
        self.get_json(SCRAPE_STATUS_PATH).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let body = self.get_text(path).await?;
        serde_json::from_str(&body)
            .map_err(|e| GatewayError::Malformed(format!("unreadable body from {path}: {e}")))
    }

    async fn get_text(&self, path: &str) -> Result<String, GatewayError> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::read_success_body(response).await
    }

    async fn read_success_body(response: reqwest::Response) -> Result<String, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.text().await?)
    }
}
