// src/services/ecfr.rs

//! eCFR API client.
//!
//! Fetches the agency reference table from the admin API and full title XML
//! from the versioner API. Upstream failures are classified at this layer:
//! a 404 for a title/date means the document does not exist upstream, while
//! timeouts, connection errors, and other non-success statuses are treated
//! as transient.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};

use crate::error::{AppError, Result};
use crate::models::ApiConfig;
use crate::utils::http;

/// Source of raw title XML documents.
///
/// Seam between the cache and the network so callers can be tested without
/// reaching the real service.
#[async_trait]
pub trait TitleSource: Send + Sync {
    /// Fetch the full XML for one title on one date.
    async fn fetch_title(&self, title: u32, date: NaiveDate) -> Result<Vec<u8>>;
}

/// HTTP client for the public eCFR API.
pub struct EcfrClient {
    client: Client,
    base_url: String,
}

impl EcfrClient {
    /// Create a client from API settings.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: http::create_async_client(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Download the agency reference table (`agencies.json`).
    pub async fn fetch_agencies(&self) -> Result<Vec<u8>> {
        let url = format!("{}/api/admin/v1/agencies.json", self.base_url);
        log::info!("Fetching agency table from {}", url);

        let response = self.client.get(&url).send().await?;
        let response = response.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }

    fn title_url(&self, title: u32, date: NaiveDate) -> String {
        format!(
            "{}/api/versioner/v1/full/{}/title-{}.xml",
            self.base_url,
            date.format("%Y-%m-%d"),
            title
        )
    }
}

#[async_trait]
impl TitleSource for EcfrClient {
    async fn fetch_title(&self, title: u32, date: NaiveDate) -> Result<Vec<u8>> {
        let url = self.title_url(title, date);
        log::info!("Fetching title {} for {} from {}", title, date, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::fetch_unavailable(title, date, e))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(AppError::DocumentNotFound { title, date }),
            status if !status.is_success() => Err(AppError::fetch_unavailable(
                title,
                date,
                format!("upstream returned {}", status),
            )),
            _ => {
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| AppError::fetch_unavailable(title, date, e))?;
                log::debug!("Downloaded {} bytes for title {} on {}", bytes.len(), title, date);
                Ok(bytes.to_vec())
            }
        }
    }
}
