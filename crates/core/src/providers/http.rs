use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::filter::Filter;
use crate::models::record::{records_from_value, Record};
use crate::models::settings::Settings;
use crate::models::summary::Dataset;
use super::traits::RecordSource;

const SOURCE_NAME: &str = "AquacultureApi";

/// Record source backed by the dashboard's REST API.
///
/// - **Endpoints**: `GET {base}/water-quality`, `/shrimp-growth`, `/feed-fcr`, `/feed-meals`
/// - **Query**: `limit`, `species`, `pond_area_range` (see [`Filter::query_pairs`])
/// - **Response**: a JSON array of flat record objects
pub struct HttpRecordSource {
    client: Client,
    base_url: String,
}

impl HttpRecordSource {
    /// `timeout_secs` applies to native builds; the browser's fetch has no
    /// per-request timeout.
    #[cfg_attr(target_arch = "wasm32", allow(unused_variables))]
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.api_base_url.clone(), settings.request_timeout_secs)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of a dataset endpoint, without query string.
    pub fn endpoint_url(&self, dataset: Dataset) -> String {
        format!("{}/{}", self.base_url, dataset.path())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RecordSource for HttpRecordSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn fetch_records(&self, dataset: Dataset, filter: &Filter) -> Result<Vec<Record>, CoreError> {
        let url = self.endpoint_url(dataset);

        let response = self
            .client
            .get(&url)
            .query(&filter.query_pairs())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                source_name: SOURCE_NAME.into(),
                message: format!("{dataset} returned HTTP {status}"),
            });
        }

        let body: Value = response.json().await.map_err(|e| CoreError::Api {
            source_name: SOURCE_NAME.into(),
            message: format!("Failed to parse {dataset} response: {e}"),
        })?;

        let records = records_from_value(body)?;
        tracing::debug!(%dataset, count = records.len(), "fetched records");
        Ok(records)
    }
}
