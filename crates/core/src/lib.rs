pub mod errors;
pub mod models;
pub mod pipeline;
pub mod providers;
pub mod services;

use models::{
    chart::SeriesSpec,
    filter::Filter,
    record::{fields, Record},
    series::{MultiSeriesView, RankedRow, SeriesView},
    settings::Settings,
    summary::{default_overall_metrics, Dataset, MetricInput, PondHealthSummary},
};
use providers::{http::HttpRecordSource, traits::RecordSource};
use services::{
    fetch_service::FetchService, series_service::SeriesService,
    summary_service::SummaryService,
};
use std::collections::HashMap;

use errors::CoreError;

/// Main entry point for the shrimp dashboard core library.
///
/// Holds the settings, the record source and the services that turn
/// records into chart series. All computation is pure; only the `load_*`
/// methods touch the record source.
#[must_use]
pub struct ShrimpDashboard {
    settings: Settings,
    fetch_service: FetchService,
    series_service: SeriesService,
    summary_service: SummaryService,
}

impl std::fmt::Debug for ShrimpDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShrimpDashboard")
            .field("settings", &self.settings)
            .field("source", &self.fetch_service.source_name())
            .finish()
    }
}

impl ShrimpDashboard {
    /// Create a dashboard that reads from the REST API named in `settings`.
    pub fn new(settings: Settings) -> Result<Self, CoreError> {
        let source = HttpRecordSource::from_settings(&settings);
        Self::with_source(settings, Box::new(source))
    }

    /// Create a dashboard that reads from any record source.
    pub fn with_source(settings: Settings, source: Box<dyn RecordSource>) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self {
            settings,
            fetch_service: FetchService::new(source),
            series_service: SeriesService::new(),
            summary_service: SummaryService::new(),
        })
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Filter a page starts with: all species, all pond areas, default limit.
    #[must_use]
    pub fn default_filter(&self) -> Filter {
        self.settings.default_filter()
    }

    // ── Pure pipeline ───────────────────────────────────────────────

    /// Filter, bucket, aggregate and assemble one chart series.
    #[must_use]
    pub fn compute_series(&self, records: &[Record], filter: &Filter, spec: &SeriesSpec) -> SeriesView {
        self.series_service.compute_series(records, filter, spec)
    }

    /// The configured number of top records by `key`, for tables.
    #[must_use]
    pub fn top_records(&self, records: &[Record], filter: &Filter, key: &str) -> Vec<RankedRow> {
        let filtered = pipeline::filter::filter(records, filter);
        pipeline::rank::ranked_rows(&filtered, key, self.settings.top_n)
    }

    /// Average water conditions of the filtered water-quality records.
    #[must_use]
    pub fn pond_health(&self, records: &[Record], filter: &Filter) -> PondHealthSummary {
        let filtered = pipeline::filter::filter(records, filter);
        self.summary_service.pond_health(&filtered)
    }

    /// Mean of `value_field` per category and species (grouped bar chart).
    #[must_use]
    pub fn species_breakdown(
        &self,
        records: &[Record],
        filter: &Filter,
        category_field: &str,
        value_field: &str,
    ) -> MultiSeriesView {
        let filtered = pipeline::filter::filter(records, filter);
        self.summary_service
            .species_breakdown(&filtered, category_field, value_field)
    }

    /// Overall metrics chart from the records of each dataset.
    /// Datasets missing from the map count as empty.
    #[must_use]
    pub fn overall_metrics(
        &self,
        records_by_dataset: &HashMap<Dataset, Vec<Record>>,
        filter: &Filter,
    ) -> SeriesView {
        let metrics = default_overall_metrics();
        let filtered: Vec<Vec<&Record>> = metrics
            .iter()
            .map(|(_, dataset, _)| {
                records_by_dataset
                    .get(dataset)
                    .map(|records| pipeline::filter::filter(records, filter))
                    .unwrap_or_default()
            })
            .collect();

        let inputs: Vec<MetricInput<'_>> = metrics
            .iter()
            .zip(&filtered)
            .map(|((label, _, field), records)| MetricInput {
                label: *label,
                records: records.as_slice(),
                field: *field,
            })
            .collect();

        self.summary_service.overall_metrics(&inputs)
    }

    // ── Fetching ────────────────────────────────────────────────────

    /// Fetch the records of one dataset.
    ///
    /// Returns `None` when a newer request for the same dataset was issued
    /// while this one was in flight. A failed fetch yields `Some(vec![])`.
    pub async fn load_records(&self, dataset: Dataset, filter: &Filter) -> Option<Vec<Record>> {
        self.fetch_service.fetch(dataset, filter).await.into_records()
    }

    /// Fetch one dataset and compute a series from it.
    pub async fn load_series(
        &self,
        dataset: Dataset,
        filter: &Filter,
        spec: &SeriesSpec,
    ) -> Option<SeriesView> {
        let records = self.load_records(dataset, filter).await?;
        Some(self.compute_series(&records, filter, spec))
    }

    /// Fetch all four datasets concurrently and compute the overall metrics.
    /// `None` if any of the responses was superseded.
    pub async fn load_overall_metrics(&self, filter: &Filter) -> Option<SeriesView> {
        let (water, growth, fcr, meals) = futures::join!(
            self.fetch_service.fetch(Dataset::WaterQuality, filter),
            self.fetch_service.fetch(Dataset::ShrimpGrowth, filter),
            self.fetch_service.fetch(Dataset::FeedFcr, filter),
            self.fetch_service.fetch(Dataset::FeedMeals, filter),
        );

        let mut records_by_dataset = HashMap::new();
        records_by_dataset.insert(Dataset::WaterQuality, water.into_records()?);
        records_by_dataset.insert(Dataset::ShrimpGrowth, growth.into_records()?);
        records_by_dataset.insert(Dataset::FeedFcr, fcr.into_records()?);
        records_by_dataset.insert(Dataset::FeedMeals, meals.into_records()?);

        Some(self.overall_metrics(&records_by_dataset, filter))
    }

    /// Fetch water-quality records and summarize pond health.
    pub async fn load_pond_health(&self, filter: &Filter) -> Option<PondHealthSummary> {
        let records = self.load_records(Dataset::WaterQuality, filter).await?;
        Some(self.pond_health(&records, filter))
    }

    /// Fetch feed-meal records and break feed cost down by feed type and species.
    pub async fn load_feed_cost_breakdown(&self, filter: &Filter) -> Option<MultiSeriesView> {
        let records = self.load_records(Dataset::FeedMeals, filter).await?;
        Some(self.species_breakdown(
            &records,
            filter,
            fields::FEED_TYPE,
            fields::FEED_COST_PER_KG_USD,
        ))
    }
}
