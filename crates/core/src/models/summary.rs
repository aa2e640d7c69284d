use serde::{Deserialize, Serialize};

use super::record::{fields, Record};

/// The four REST collections the dashboard reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dataset {
    WaterQuality,
    ShrimpGrowth,
    FeedFcr,
    FeedMeals,
}

impl Dataset {
    pub const ALL: [Dataset; 4] = [
        Dataset::WaterQuality,
        Dataset::ShrimpGrowth,
        Dataset::FeedFcr,
        Dataset::FeedMeals,
    ];

    /// Endpoint path relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Dataset::WaterQuality => "water-quality",
            Dataset::ShrimpGrowth => "shrimp-growth",
            Dataset::FeedFcr => "feed-fcr",
            Dataset::FeedMeals => "feed-meals",
        }
    }

    /// Stable position in [`Dataset::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Dataset::WaterQuality => 0,
            Dataset::ShrimpGrowth => 1,
            Dataset::FeedFcr => 2,
            Dataset::FeedMeals => 3,
        }
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// One bar of the overall-metrics chart: the mean of `field` over `records`.
#[derive(Debug, Clone, Copy)]
pub struct MetricInput<'a> {
    pub label: &'a str,
    pub records: &'a [&'a Record],
    pub field: &'a str,
}

/// Metric label, source dataset and field for the overall-metrics chart.
pub fn default_overall_metrics() -> [(&'static str, Dataset, &'static str); 4] {
    [
        ("Water pH", Dataset::WaterQuality, fields::WATER_PH),
        ("Shrimp Size (g)", Dataset::ShrimpGrowth, fields::SHRIMP_SIZE_G),
        ("Adjusted FCR", Dataset::FeedFcr, fields::ADJUSTED_FCR),
        ("Feed Cost (USD/kg)", Dataset::FeedMeals, fields::FEED_COST_PER_KG_USD),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Good,
    NeedsAttention,
    NoData,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Good => write!(f, "Good"),
            HealthStatus::NeedsAttention => write!(f, "Needs Attention"),
            HealthStatus::NoData => write!(f, "No data available"),
        }
    }
}

/// Average water conditions of a set of ponds and the resulting verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PondHealthSummary {
    /// Number of records the averages were computed over
    pub record_count: usize,

    pub avg_water_ph: f64,

    /// mg/L
    pub avg_dissolved_oxygen: f64,

    /// °C
    pub avg_temperature: f64,

    pub status: HealthStatus,
}
