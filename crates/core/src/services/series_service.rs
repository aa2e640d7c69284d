use crate::models::bucket::{category_buckets, pond_area_buckets, UNKNOWN_CATEGORY};
use crate::models::chart::{Reducer, SeriesSpec, TimeGranularity};
use crate::models::filter::Filter;
use crate::models::record::{display_name, Record};
use crate::models::series::{
    Aggregate, SeriesView, LINE_COLORS, METRIC_COLORS, POND_AREA_COLORS, TREND_COLOR,
};
use crate::pipeline::aggregate::{aggregate, rollup_weekly};
use crate::pipeline::filter::filter;
use crate::pipeline::group::{group, group_by_day};
use crate::pipeline::rank::rank;

/// Turns raw records into chart-ready series.
///
/// The core computes all the numbers, the frontend only renders. Every call
/// recomputes from scratch; nothing is cached between filter changes.
pub struct SeriesService;

impl SeriesService {
    pub fn new() -> Self {
        Self
    }

    /// Run the full pipeline for one visualization.
    ///
    /// Never fails: empty input, missing fields and filters that match
    /// nothing all produce an empty (but well-formed) view.
    pub fn compute_series(&self, records: &[Record], filter_by: &Filter, spec: &SeriesSpec) -> SeriesView {
        let filtered = filter(records, filter_by);
        tracing::debug!(input = records.len(), kept = filtered.len(), "filter stage");

        match spec {
            SeriesSpec::ByPondArea { value_field, reducer } => {
                let groups = group(&filtered, &pond_area_buckets());
                let dataset_label = format!("{} {}", reducer_word(*reducer), display_name(value_field));
                SeriesView::from_aggregates(
                    format!("{dataset_label} by Pond Area"),
                    dataset_label,
                    aggregate(&groups, value_field, *reducer),
                    &POND_AREA_COLORS,
                )
            }

            SeriesSpec::ByCategory {
                category_field,
                value_field,
                reducer,
            } => {
                let buckets = category_buckets(&filtered, category_field, Some(UNKNOWN_CATEGORY));
                let groups = group(&filtered, &buckets);
                let dataset_label = format!("{} {}", reducer_word(*reducer), display_name(value_field));
                SeriesView::from_aggregates(
                    format!("{dataset_label} by {}", display_name(category_field)),
                    dataset_label,
                    aggregate(&groups, value_field, *reducer),
                    &METRIC_COLORS,
                )
            }

            SeriesSpec::OverTime {
                value_field,
                granularity,
            } => {
                let daily = aggregate(&group_by_day(&filtered), value_field, Reducer::Mean);
                let (points, period) = match granularity {
                    TimeGranularity::Daily => (daily, "Daily"),
                    TimeGranularity::Weekly(mode) => (rollup_weekly(&daily, *mode), "Weekly"),
                };
                let dataset_label = format!("{period} Average {}", display_name(value_field));
                SeriesView::from_aggregates(
                    format!("{dataset_label} Over Time"),
                    dataset_label,
                    points,
                    &[TREND_COLOR],
                )
            }

            SeriesSpec::TopRecords {
                key,
                top_n,
                label_field,
            } => {
                let points = rank(&filtered, key, *top_n)
                    .into_iter()
                    .enumerate()
                    .map(|(i, r)| {
                        let label = label_field
                            .as_deref()
                            .and_then(|f| field_label(r, f))
                            .unwrap_or_else(|| format!("#{}", i + 1));
                        Aggregate::new(label, r.number_or_zero(key))
                    })
                    .collect();
                SeriesView::from_aggregates(
                    format!("Top {top_n} Records by {}", display_name(key)),
                    display_name(key),
                    points,
                    &METRIC_COLORS,
                )
            }

            SeriesSpec::Sequence {
                value_field,
                label_prefix,
            } => {
                let points = filtered
                    .iter()
                    .enumerate()
                    .map(|(i, r)| {
                        Aggregate::new(format!("{label_prefix} {}", i + 1), r.number_or_zero(value_field))
                    })
                    .collect();
                SeriesView::from_aggregates(
                    format!("{} Over Records", display_name(value_field)),
                    display_name(value_field),
                    points,
                    &LINE_COLORS[..1],
                )
            }

            SeriesSpec::Trend { x_field, value_field } => {
                let mut points: Vec<(f64, &Record)> = filtered
                    .iter()
                    .filter_map(|&r| r.number(x_field).map(|x| (x, r)))
                    .collect();
                points.sort_by(|a, b| a.0.total_cmp(&b.0));
                let points = points
                    .into_iter()
                    .map(|(x, r)| Aggregate::new(x.to_string(), r.number_or_zero(value_field)))
                    .collect();
                SeriesView::from_aggregates(
                    format!("{} by {}", display_name(value_field), display_name(x_field)),
                    display_name(value_field),
                    points,
                    &[TREND_COLOR],
                )
            }
        }
    }
}

impl Default for SeriesService {
    fn default() -> Self {
        Self::new()
    }
}

fn reducer_word(reducer: Reducer) -> &'static str {
    match reducer {
        Reducer::Mean => "Average",
        Reducer::Sum => "Total",
    }
}

fn field_label(record: &Record, field: &str) -> Option<String> {
    record
        .text(field)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| record.number(field).map(|n| n.to_string()))
}
