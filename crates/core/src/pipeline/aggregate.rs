use chrono::{Datelike, Days, NaiveDate};
use std::collections::BTreeMap;

use crate::models::chart::{Reducer, WeeklyMode};
use crate::models::record::Record;
use crate::models::series::Aggregate;

use super::group::Group;

/// Reduce every group to one [`Aggregate`].
///
/// Empty groups and groups whose value comes out as exactly zero are left
/// out entirely. A zero bar cannot be told apart from "nobody in this
/// bucket", so neither is reported. Label and value are dropped together.
pub fn aggregate(groups: &[Group<'_>], value_field: &str, reducer: Reducer) -> Vec<Aggregate> {
    groups
        .iter()
        .filter_map(|g| {
            reduce(&g.records, value_field, reducer).map(|value| Aggregate::new(g.label.clone(), value))
        })
        .collect()
}

/// Reduce one bucket's records.
///
/// Missing or non-numeric values count as `0.0` but still count toward the
/// mean's denominator. Returns `None` when there is nothing to report.
pub fn reduce(records: &[&Record], value_field: &str, reducer: Reducer) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let sum: f64 = records.iter().map(|r| r.number_or_zero(value_field)).sum();
    let value = match reducer {
        Reducer::Mean => sum / records.len() as f64,
        Reducer::Sum => sum,
    };
    reportable(value)
}

/// Arithmetic mean of already-reduced values, `None` when empty or zero.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    reportable(values.iter().sum::<f64>() / values.len() as f64)
}

fn reportable(value: f64) -> Option<f64> {
    (value.is_finite() && value != 0.0).then_some(value)
}

/// Roll daily aggregates up into weekly ones (mean of the daily values).
///
/// `daily` must be in chronological order. In calendar mode the labels must
/// be ISO dates as produced by `group_by_day`; points with any other label
/// are skipped with a warning.
pub fn rollup_weekly(daily: &[Aggregate], mode: WeeklyMode) -> Vec<Aggregate> {
    match mode {
        WeeklyMode::Positional => rollup_positional(daily),
        WeeklyMode::Calendar => rollup_calendar(daily),
    }
}

/// Runs of seven consecutive points. A trailing short run is averaged over
/// its own length.
fn rollup_positional(daily: &[Aggregate]) -> Vec<Aggregate> {
    daily
        .chunks(7)
        .enumerate()
        .filter_map(|(index, run)| {
            let values: Vec<f64> = run.iter().map(|a| a.value).collect();
            mean(&values).map(|value| Aggregate::new(format!("Week {}", index + 1), value))
        })
        .collect()
}

fn rollup_calendar(daily: &[Aggregate]) -> Vec<Aggregate> {
    let mut weeks: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    let mut skipped = 0usize;

    for point in daily {
        match NaiveDate::parse_from_str(&point.label, "%Y-%m-%d")
            .ok()
            .and_then(week_start)
        {
            Some(monday) => weeks.entry(monday).or_default().push(point.value),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, "skipping daily points whose label is not an ISO date");
    }

    weeks
        .into_iter()
        .filter_map(|(monday, values)| {
            mean(&values).map(|value| Aggregate::new(format!("Week of {}", monday.format("%Y-%m-%d")), value))
        })
        .collect()
}

/// Monday of the ISO week containing `day`.
fn week_start(day: NaiveDate) -> Option<NaiveDate> {
    day.checked_sub_days(Days::new(u64::from(day.weekday().num_days_from_monday())))
}
