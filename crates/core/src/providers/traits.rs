use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::filter::Filter;
use crate::models::record::Record;
use crate::models::summary::Dataset;

/// Anything that can hand the pipeline a list of raw records.
///
/// The REST API is the production implementation; tests and offline
/// builds plug in their own. The pipeline never calls the network itself.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait RecordSource: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the records of `dataset`, letting the source apply `filter`
    /// server-side where it can. Any subset of fields may be missing from
    /// the returned records.
    async fn fetch_records(&self, dataset: Dataset, filter: &Filter) -> Result<Vec<Record>, CoreError>;
}
