use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::record::Record;

/// Bar colors for the pond-area chart (red, lime, orange).
pub const POND_AREA_COLORS: [&str; 3] = ["#FF0000", "#00FF00", "#FFA500"];

/// Palette shared by the metric and category charts.
pub const METRIC_COLORS: [&str; 4] = ["#0288D1", "#4CAF50", "#FF6B6B", "#FFCA28"];

/// Palette for multi-parameter line charts.
pub const LINE_COLORS: [&str; 7] = [
    "#FF0000", "#FFFF00", "#00FFFF", "#FF00FF", "#00FF00", "#FFA500", "#0000FF",
];

/// Single-series trend lines.
pub const TREND_COLOR: &str = "#00BCD4";

/// Color used for a species dataset in grouped bar charts.
pub fn species_color(species: &str) -> &'static str {
    match species {
        "P. monodon" => "#FFCA28",
        "M. rosenbergii" => "#4CAF50",
        _ => "#0288D1",
    }
}

/// A single reduced value representing one bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub label: String,
    pub value: f64,
}

impl Aggregate {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// The `{labels, values}` pair handed to a rendering surface.
///
/// Only constructible from a list of [`Aggregate`]s, so `labels` and
/// `values` always have the same length and the same order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSeriesView")]
pub struct SeriesView {
    title: String,
    dataset_label: String,
    labels: Vec<String>,
    values: Vec<f64>,
    colors: Vec<String>,
}

impl SeriesView {
    /// Assemble a view. Colors cycle through `palette`; an empty palette
    /// yields no colors.
    pub fn from_aggregates(
        title: impl Into<String>,
        dataset_label: impl Into<String>,
        aggregates: Vec<Aggregate>,
        palette: &[&str],
    ) -> Self {
        let colors = if palette.is_empty() {
            Vec::new()
        } else {
            (0..aggregates.len())
                .map(|i| palette[i % palette.len()].to_string())
                .collect()
        };
        let (labels, values) = aggregates.into_iter().map(|a| (a.label, a.value)).unzip();
        Self {
            title: title.into(),
            dataset_label: dataset_label.into(),
            labels,
            values,
            colors,
        }
    }

    /// An empty view, rendered as "No data available".
    pub fn empty(title: impl Into<String>, dataset_label: impl Into<String>) -> Self {
        Self::from_aggregates(title, dataset_label, Vec::new(), &[])
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn dataset_label(&self) -> &str {
        &self.dataset_label
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label/value pairs in display order.
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    pub fn to_aggregates(&self) -> Vec<Aggregate> {
        self.points().map(|(l, v)| Aggregate::new(l, v)).collect()
    }
}

#[derive(Deserialize)]
struct RawSeriesView {
    #[serde(default)]
    title: String,
    #[serde(default)]
    dataset_label: String,
    labels: Vec<String>,
    values: Vec<f64>,
    #[serde(default)]
    colors: Vec<String>,
}

impl TryFrom<RawSeriesView> for SeriesView {
    type Error = CoreError;

    fn try_from(raw: RawSeriesView) -> Result<Self, Self::Error> {
        if raw.labels.len() != raw.values.len() {
            return Err(CoreError::InvalidSeries(format!(
                "{} labels but {} values",
                raw.labels.len(),
                raw.values.len()
            )));
        }
        Ok(Self {
            title: raw.title,
            dataset_label: raw.dataset_label,
            labels: raw.labels,
            values: raw.values,
            colors: raw.colors,
        })
    }
}

/// One dataset of a grouped chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesDataset {
    pub label: String,
    pub values: Vec<f64>,
    pub color: String,
}

/// Several datasets sharing one label axis (e.g. feed type × species).
///
/// Every dataset has exactly one value per label; empty cells are `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiSeriesView {
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<SeriesDataset>,
}

impl MultiSeriesView {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() || self.datasets.is_empty()
    }
}

/// One row of a "top records" table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRow {
    /// 1-based position in the ranking
    pub rank: usize,
    pub record: Record,
}
