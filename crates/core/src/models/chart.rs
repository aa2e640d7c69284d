use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;

use super::record::fields;

/// How a bucket's records are reduced to one number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reducer {
    #[default]
    Mean,
    Sum,
}

impl FromStr for Reducer {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "mean" => Ok(Reducer::Mean),
            "sum" => Ok(Reducer::Sum),
            other => Err(CoreError::InvalidFilter(format!("unrecognized reducer '{other}'"))),
        }
    }
}

/// How daily points are grouped into weeks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeeklyMode {
    /// ISO weeks starting on Monday.
    #[default]
    Calendar,
    /// Consecutive runs of seven daily points, regardless of their dates.
    Positional,
}

/// Time granularity of an over-time series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeGranularity {
    #[default]
    Daily,
    Weekly(WeeklyMode),
}

impl FromStr for TimeGranularity {
    type Err = CoreError;

    /// Accepts the selector values `daily` and `weekly` (calendar weeks).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "daily" => Ok(TimeGranularity::Daily),
            "weekly" => Ok(TimeGranularity::Weekly(WeeklyMode::Calendar)),
            other => Err(CoreError::InvalidFilter(format!(
                "unrecognized time granularity '{other}'"
            ))),
        }
    }
}

/// Which bucketing / aggregation / ranking a visualization wants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SeriesSpec {
    /// One bar per pond-area band (low → mid → high).
    ByPondArea { value_field: String, reducer: Reducer },

    /// One bar per distinct category value, first-seen order.
    ByCategory {
        category_field: String,
        value_field: String,
        reducer: Reducer,
    },

    /// Daily means, optionally rolled up into weeks.
    OverTime {
        value_field: String,
        granularity: TimeGranularity,
    },

    /// Records ranked by `key`, descending.
    TopRecords {
        key: String,
        top_n: usize,
        /// Field used as the row label; `#1`, `#2`, … when absent.
        label_field: Option<String>,
    },

    /// One point per record in input order, labeled `"{label_prefix} {n}"`.
    Sequence { value_field: String, label_prefix: String },

    /// Points sorted by a numeric x field (e.g. weight over age).
    Trend { x_field: String, value_field: String },
}

impl SeriesSpec {
    /// Average adjusted FCR per pond-area band.
    pub fn fcr_by_pond_area() -> Self {
        SeriesSpec::ByPondArea {
            value_field: fields::ADJUSTED_FCR.to_string(),
            reducer: Reducer::Mean,
        }
    }

    /// Average of `value_field` per feed type.
    pub fn by_feed_type(value_field: &str) -> Self {
        SeriesSpec::ByCategory {
            category_field: fields::FEED_TYPE.to_string(),
            value_field: value_field.to_string(),
            reducer: Reducer::Mean,
        }
    }

    pub fn over_time(value_field: &str, granularity: TimeGranularity) -> Self {
        SeriesSpec::OverTime {
            value_field: value_field.to_string(),
            granularity,
        }
    }

    pub fn top_records(key: &str, top_n: usize) -> Self {
        SeriesSpec::TopRecords {
            key: key.to_string(),
            top_n,
            label_field: None,
        }
    }

    /// Shrimp weight plotted against age.
    pub fn growth_over_age() -> Self {
        SeriesSpec::Trend {
            x_field: fields::AGE_OF_SHRIMP_DAYS.to_string(),
            value_field: fields::SHRIMP_WEIGHT_G.to_string(),
        }
    }
}
