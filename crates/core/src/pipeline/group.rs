use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::bucket::Bucket;
use crate::models::record::Record;

/// Records assigned to one bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<'a> {
    pub label: String,
    pub records: Vec<&'a Record>,
}

/// Partition `records` into `buckets`.
///
/// Each record goes to the first bucket that accepts it; records no bucket
/// accepts are dropped. The result has one group per bucket, in declared
/// order, including empty ones.
pub fn group<'a>(records: &[&'a Record], buckets: &[Bucket]) -> Vec<Group<'a>> {
    let mut groups: Vec<Group<'a>> = buckets
        .iter()
        .map(|b| Group {
            label: b.label().to_string(),
            records: Vec::new(),
        })
        .collect();

    for &record in records {
        if let Some(index) = buckets.iter().position(|b| b.matches(record)) {
            groups[index].records.push(record);
        }
    }

    groups
}

/// Group records by calendar day, oldest first.
///
/// Labels are ISO dates (`YYYY-MM-DD`). Records without a parseable `date`
/// or `timestamp` are left out and reported once as a warning.
pub fn group_by_day<'a>(records: &[&'a Record]) -> Vec<Group<'a>> {
    let mut days: BTreeMap<NaiveDate, Vec<&'a Record>> = BTreeMap::new();
    let mut undated = 0usize;

    for &record in records {
        match record.date() {
            Some(day) => days.entry(day).or_default().push(record),
            None => undated += 1,
        }
    }

    if undated > 0 {
        tracing::warn!(undated, total = records.len(), "dropping records without a parseable date");
    }

    days.into_iter()
        .map(|(day, records)| Group {
            label: day.format("%Y-%m-%d").to_string(),
            records,
        })
        .collect()
}
