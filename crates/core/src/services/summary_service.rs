use crate::models::bucket::{category_value, first_seen, UNKNOWN_CATEGORY};
use crate::models::chart::Reducer;
use crate::models::record::{display_name, fields, Record};
use crate::models::series::{species_color, Aggregate, MultiSeriesView, SeriesDataset, SeriesView, METRIC_COLORS};
use crate::models::summary::{HealthStatus, MetricInput, PondHealthSummary};
use crate::pipeline::aggregate::reduce;

/// Healthy pond thresholds: pH 7–8.5, dissolved oxygen ≥ 5 mg/L, 25–30 °C.
const HEALTHY_PH: (f64, f64) = (7.0, 8.5);
const HEALTHY_MIN_DISSOLVED_OXYGEN: f64 = 5.0;
const HEALTHY_TEMPERATURE: (f64, f64) = (25.0, 30.0);

/// Dashboard-level summary statistics that span whole datasets.
pub struct SummaryService;

impl SummaryService {
    pub fn new() -> Self {
        Self
    }

    /// One bar per metric: the mean of its field over its records.
    ///
    /// Metrics with no records or a zero mean are dropped, label and value together.
    pub fn overall_metrics(&self, inputs: &[MetricInput<'_>]) -> SeriesView {
        let points = inputs
            .iter()
            .filter_map(|m| reduce(m.records, m.field, Reducer::Mean).map(|v| Aggregate::new(m.label, v)))
            .collect();
        SeriesView::from_aggregates("Overall Shrimp Farming Metrics", "Average Values", points, &METRIC_COLORS)
    }

    /// Average water conditions and a good / needs-attention verdict.
    pub fn pond_health(&self, records: &[&Record]) -> PondHealthSummary {
        if records.is_empty() {
            return PondHealthSummary {
                record_count: 0,
                avg_water_ph: 0.0,
                avg_dissolved_oxygen: 0.0,
                avg_temperature: 0.0,
                status: HealthStatus::NoData,
            };
        }

        let avg = |field: &str| {
            records.iter().map(|r| r.number_or_zero(field)).sum::<f64>() / records.len() as f64
        };
        let avg_water_ph = avg(fields::WATER_PH);
        let avg_dissolved_oxygen = avg(fields::DISSOLVED_OXYGEN_MG_L);
        let avg_temperature = avg(fields::TEMPERATURE_C);

        let healthy = (HEALTHY_PH.0..=HEALTHY_PH.1).contains(&avg_water_ph)
            && avg_dissolved_oxygen >= HEALTHY_MIN_DISSOLVED_OXYGEN
            && (HEALTHY_TEMPERATURE.0..=HEALTHY_TEMPERATURE.1).contains(&avg_temperature);

        PondHealthSummary {
            record_count: records.len(),
            avg_water_ph,
            avg_dissolved_oxygen,
            avg_temperature,
            status: if healthy {
                HealthStatus::Good
            } else {
                HealthStatus::NeedsAttention
            },
        }
    }

    /// Mean of `value_field` per category (x axis) and species (dataset).
    ///
    /// Categories and species appear in first-seen order. Records without a
    /// species are left out. Cells with no records are `0.0` so that every
    /// dataset lines up with the labels.
    pub fn species_breakdown(
        &self,
        records: &[&Record],
        category_field: &str,
        value_field: &str,
    ) -> MultiSeriesView {
        let categories = first_seen(records, category_field, Some(UNKNOWN_CATEGORY));
        let species = first_seen(records, fields::SHRIMP_SPECIES, None);

        let datasets = species
            .iter()
            .map(|sp| {
                let values = categories
                    .iter()
                    .map(|category| {
                        let cell: Vec<&Record> = records
                            .iter()
                            .copied()
                            .filter(|r| {
                                r.text(fields::SHRIMP_SPECIES) == Some(sp.as_str())
                                    && category_value(r, category_field, Some(UNKNOWN_CATEGORY))
                                        == Some(category.as_str())
                            })
                            .collect();
                        reduce(&cell, value_field, Reducer::Mean).unwrap_or(0.0)
                    })
                    .collect();
                SeriesDataset {
                    label: sp.clone(),
                    values,
                    color: species_color(sp).to_string(),
                }
            })
            .collect();

        MultiSeriesView {
            title: format!(
                "Average {} by {} and Species",
                display_name(value_field),
                display_name(category_field)
            ),
            labels: categories,
            datasets,
        }
    }
}

impl Default for SummaryService {
    fn default() -> Self {
        Self::new()
    }
}
