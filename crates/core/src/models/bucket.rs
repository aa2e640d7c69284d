use serde::{Deserialize, Serialize};

use super::record::{fields, Record};

/// Upper limit of the `Minor` size class in m² (exclusive).
pub const POND_AREA_MINOR_LIMIT_M2: f64 = 250.0;

/// Lower pond-area breakpoint in m². Values equal to it belong to the mid band.
pub const POND_AREA_LOW_LIMIT_M2: f64 = 500.0;

/// Upper pond-area breakpoint in m². Values equal to it belong to the mid band.
pub const POND_AREA_HIGH_LIMIT_M2: f64 = 1000.0;

/// Fixed pond-area bands used for bucketing and band-labeled filters.
///
/// The intervals are `[.., 500)`, `[500, 1000]` and `(1000, ..]`, so every
/// finite area falls in exactly one band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PondAreaBand {
    Low,
    Mid,
    High,
}

impl PondAreaBand {
    /// All bands in display order (low → mid → high).
    pub const ALL: [PondAreaBand; 3] = [PondAreaBand::Low, PondAreaBand::Mid, PondAreaBand::High];

    /// Band containing `area_m2`, or `None` for non-finite input.
    pub fn classify(area_m2: f64) -> Option<Self> {
        if !area_m2.is_finite() {
            return None;
        }
        Some(if area_m2 < POND_AREA_LOW_LIMIT_M2 {
            PondAreaBand::Low
        } else if area_m2 <= POND_AREA_HIGH_LIMIT_M2 {
            PondAreaBand::Mid
        } else {
            PondAreaBand::High
        })
    }

    /// Band of a record's `Pond_Area_m2`, if it has a usable one.
    pub fn of_record(record: &Record) -> Option<Self> {
        record.number(fields::POND_AREA_M2).and_then(Self::classify)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PondAreaBand::Low => "Below 500 m²",
            PondAreaBand::Mid => "500–1,000 m²",
            PondAreaBand::High => "Above 1,000 m²",
        }
    }
}

impl std::fmt::Display for PondAreaBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

type Predicate = Box<dyn Fn(&Record) -> bool + Send + Sync>;

/// A named partition of records.
///
/// Buckets passed together to the group stage must be mutually exclusive;
/// a record is assigned to the first bucket whose predicate accepts it.
pub struct Bucket {
    label: String,
    predicate: Predicate,
}

impl Bucket {
    pub fn new(
        label: impl Into<String>,
        predicate: impl Fn(&Record) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            predicate: Box::new(predicate),
        }
    }

    /// Bucket holding records whose pond area falls in `band`.
    pub fn pond_area(band: PondAreaBand) -> Self {
        Self::new(band.label(), move |r| PondAreaBand::of_record(r) == Some(band))
    }

    /// Bucket holding records whose `field` equals `value`.
    ///
    /// When `fallback` is given, records with a missing or empty `field`
    /// are treated as having the value `fallback`.
    pub fn category(field: &str, value: &str, fallback: Option<&str>) -> Self {
        let field = field.to_string();
        let value = value.to_string();
        let fallback = fallback.map(str::to_string);
        Self::new(value.clone(), move |r| {
            category_value(r, &field, fallback.as_deref()) == Some(value.as_str())
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn matches(&self, record: &Record) -> bool {
        (self.predicate)(record)
    }
}

impl std::fmt::Debug for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bucket").field("label", &self.label).finish_non_exhaustive()
    }
}

/// Label given to records with no feed type / category.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Category of a record for categorical bucketing.
pub(crate) fn category_value<'r>(
    record: &'r Record,
    field: &str,
    fallback: Option<&'r str>,
) -> Option<&'r str> {
    match record.text(field) {
        Some(v) if !v.is_empty() => Some(v),
        _ => fallback,
    }
}

/// The three pond-area buckets in display order.
pub fn pond_area_buckets() -> Vec<Bucket> {
    PondAreaBand::ALL.into_iter().map(Bucket::pond_area).collect()
}

/// One bucket per distinct value of `field`, in first-seen order.
pub fn category_buckets(records: &[&Record], field: &str, fallback: Option<&str>) -> Vec<Bucket> {
    first_seen(records, field, fallback)
        .into_iter()
        .map(|value| Bucket::category(field, &value, fallback))
        .collect()
}

/// Distinct values of `field` in first-seen order.
pub(crate) fn first_seen(records: &[&Record], field: &str, fallback: Option<&str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for record in records {
        if let Some(value) = category_value(record, field, fallback) {
            if !seen.iter().any(|s| s == value) {
                seen.push(value.to_string());
            }
        }
    }
    seen
}
