// ═══════════════════════════════════════════════════════════════════
// Model Tests — Record, PondAreaBand, Filter, SeriesView, Settings,
// SeriesSpec parsing
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use serde_json::json;

use shrimp_dashboard_core::errors::CoreError;
use shrimp_dashboard_core::models::bucket::{Bucket, PondAreaBand, UNKNOWN_CATEGORY};
use shrimp_dashboard_core::models::chart::{Reducer, SeriesSpec, TimeGranularity, WeeklyMode};
use shrimp_dashboard_core::models::filter::{Filter, PondAreaRange, RECORD_LIMIT_OPTIONS};
use shrimp_dashboard_core::models::record::{display_name, fields, records_from_json, Record};
use shrimp_dashboard_core::models::series::{species_color, Aggregate, SeriesView};
use shrimp_dashboard_core::models::settings::Settings;
use shrimp_dashboard_core::models::summary::{Dataset, HealthStatus};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Record
// ═══════════════════════════════════════════════════════════════════

mod record {
    use super::*;

    #[test]
    fn number_reads_json_numbers() {
        let r = Record::new().with(fields::WATER_PH, 7.4).with(fields::AGE_OF_SHRIMP_DAYS, 30);
        assert_eq!(r.number(fields::WATER_PH), Some(7.4));
        assert_eq!(r.number(fields::AGE_OF_SHRIMP_DAYS), Some(30.0));
    }

    #[test]
    fn number_reads_numeric_strings() {
        let r = Record::new().with(fields::ADJUSTED_FCR, " 1.35 ");
        assert_eq!(r.number(fields::ADJUSTED_FCR), Some(1.35));
    }

    #[test]
    fn number_rejects_everything_else() {
        let r = Record::new()
            .with("a", "abc")
            .with("b", true)
            .with("c", serde_json::Value::Null)
            .with("d", "NaN")
            .with("e", "inf");
        for field in ["a", "b", "c", "d", "e", "missing"] {
            assert_eq!(r.number(field), None, "{field}");
        }
    }

    #[test]
    fn number_or_zero() {
        let r = Record::new().with(fields::ADJUSTED_FCR, "n/a");
        assert_eq!(r.number_or_zero(fields::ADJUSTED_FCR), 0.0);
        assert_eq!(r.number_or_zero(fields::WATER_PH), 0.0);
    }

    #[test]
    fn text_only_reads_strings() {
        let r = Record::new()
            .with(fields::SHRIMP_SPECIES, "L. vannamei")
            .with(fields::FEED_TYPE, 3);
        assert_eq!(r.text(fields::SHRIMP_SPECIES), Some("L. vannamei"));
        assert_eq!(r.text(fields::FEED_TYPE), None);
        assert_eq!(r.text("missing"), None);
    }

    #[test]
    fn date_formats() {
        let cases = [
            json!("2025-01-15"),
            json!("2025-01-15T08:30:00"),
            json!("2025-01-15T08:30:00.123"),
            json!("2025-01-15 08:30:00"),
            json!("2025-01-15T08:30:00Z"),
            json!("2025-01-15T08:30:00+02:00"),
            json!(1_736_929_800_000_i64), // 2025-01-15T08:30:00Z
        ];
        for value in cases {
            let r = Record::new().with(fields::DATE, value.clone());
            assert_eq!(r.date(), Some(d(2025, 1, 15)), "{value}");
        }
    }

    #[test]
    fn rfc3339_offsets_convert_to_utc_day() {
        let r = Record::new().with(fields::DATE, "2025-01-15T23:30:00-02:00");
        assert_eq!(r.date(), Some(d(2025, 1, 16)));
    }

    #[test]
    fn date_falls_back_to_timestamp() {
        let r = Record::new()
            .with(fields::DATE, "not a date")
            .with(fields::TIMESTAMP, "2024-12-31");
        assert_eq!(r.date(), Some(d(2024, 12, 31)));
    }

    #[test]
    fn undated_record() {
        assert_eq!(Record::new().date(), None);
        assert_eq!(Record::new().with(fields::DATE, true).date(), None);
    }

    #[test]
    fn serializes_as_flat_object() {
        let r = Record::new().with(fields::WATER_PH, 7.5);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json, json!({ "Water_pH": 7.5 }));

        let back: Record = serde_json::from_value(json).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn display_names() {
        assert_eq!(display_name(fields::WATER_PH), "Water pH");
        assert_eq!(display_name(fields::DISSOLVED_OXYGEN_MG_L), "Dissolved Oxygen mg L");
        assert_eq!(display_name("yield"), "yield");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Response parsing
// ═══════════════════════════════════════════════════════════════════

mod response_parsing {
    use super::*;

    #[test]
    fn array_of_objects() {
        let records = records_from_json(
            r#"[{"Shrimp_Species":"P. monodon","Pond_Area_m2":450},{"Adjusted_FCR":"1.4"}]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].number(fields::POND_AREA_M2), Some(450.0));
        assert_eq!(records[1].number(fields::ADJUSTED_FCR), Some(1.4));
    }

    #[test]
    fn empty_array() {
        assert!(records_from_json("[]").unwrap().is_empty());
    }

    #[test]
    fn rejects_non_array() {
        let err = records_from_json(r#"{"error":"oops"}"#).unwrap_err();
        match err {
            CoreError::InvalidInput(msg) => {
                assert_eq!(msg, "expected a JSON array of records, got an object")
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_object_element() {
        let err = records_from_json(r#"[{"a":1}, 42]"#).unwrap_err();
        match err {
            CoreError::InvalidInput(msg) => {
                assert_eq!(msg, "record at index 1 must be a JSON object, got a number")
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_json() {
        let err = records_from_json("[{").unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Pond-area bands & buckets
// ═══════════════════════════════════════════════════════════════════

mod pond_area {
    use super::*;

    #[test]
    fn classify_boundaries() {
        assert_eq!(PondAreaBand::classify(0.0), Some(PondAreaBand::Low));
        assert_eq!(PondAreaBand::classify(-10.0), Some(PondAreaBand::Low));
        assert_eq!(PondAreaBand::classify(499.99), Some(PondAreaBand::Low));
        assert_eq!(PondAreaBand::classify(500.0), Some(PondAreaBand::Mid));
        assert_eq!(PondAreaBand::classify(1000.0), Some(PondAreaBand::Mid));
        assert_eq!(PondAreaBand::classify(1000.01), Some(PondAreaBand::High));
        assert_eq!(PondAreaBand::classify(f64::NAN), None);
        assert_eq!(PondAreaBand::classify(f64::INFINITY), None);
    }

    #[test]
    fn labels_in_display_order() {
        let labels: Vec<&str> = PondAreaBand::ALL.iter().map(|b| b.label()).collect();
        assert_eq!(labels, vec!["Below 500 m²", "500–1,000 m²", "Above 1,000 m²"]);
        assert_eq!(PondAreaBand::High.to_string(), "Above 1,000 m²");
    }

    #[test]
    fn of_record() {
        let r = Record::new().with(fields::POND_AREA_M2, "1200");
        assert_eq!(PondAreaBand::of_record(&r), Some(PondAreaBand::High));
        assert_eq!(PondAreaBand::of_record(&Record::new()), None);
    }

    #[test]
    fn bucket_matches() {
        let bucket = Bucket::pond_area(PondAreaBand::Mid);
        assert_eq!(bucket.label(), "500–1,000 m²");
        assert!(bucket.matches(&Record::new().with(fields::POND_AREA_M2, 750)));
        assert!(!bucket.matches(&Record::new().with(fields::POND_AREA_M2, 100)));
    }

    #[test]
    fn category_bucket_fallback() {
        assert_eq!(UNKNOWN_CATEGORY, "Unknown");
        let bucket = Bucket::category(fields::FEED_TYPE, UNKNOWN_CATEGORY, Some(UNKNOWN_CATEGORY));
        assert!(bucket.matches(&Record::new()));
        assert!(bucket.matches(&Record::new().with(fields::FEED_TYPE, "")));
        assert!(!bucket.matches(&Record::new().with(fields::FEED_TYPE, "Pellet")));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Filter
// ═══════════════════════════════════════════════════════════════════

mod filter {
    use super::*;

    #[test]
    fn default_is_unconstrained() {
        let f = Filter::default();
        assert_eq!(f.species(), None);
        assert!(f.pond_area_range.is_all());
        assert_eq!(f.limit, None);
        assert!(f.query_pairs().is_empty());
    }

    #[test]
    fn empty_species_is_none() {
        assert_eq!(Filter::new().with_species("").species(), None);
        assert_eq!(Filter::new().with_species("P. monodon").species(), Some("P. monodon"));
    }

    #[test]
    fn query_pairs_order() {
        let f = Filter::new()
            .with_species("M. rosenbergii")
            .with_pond_area_range(PondAreaRange::From500To1000)
            .with_limit(50);
        assert_eq!(
            f.query_pairs(),
            vec![
                ("limit", "50".to_string()),
                ("species", "M. rosenbergii".to_string()),
                ("pond_area_range", "range_500_to_1000".to_string()),
            ]
        );
    }

    #[test]
    fn from_query_parses_all_fields() {
        let f = Filter::from_query(Some("L. vannamei"), Some("Large"), Some("20")).unwrap();
        assert_eq!(f.species(), Some("L. vannamei"));
        assert_eq!(f.pond_area_range, PondAreaRange::Large);
        assert_eq!(f.limit, Some(20));
    }

    #[test]
    fn from_query_empty_strings_mean_no_constraint() {
        let f = Filter::from_query(Some(""), Some(""), Some("")).unwrap();
        assert_eq!(f, Filter::default());
        assert_eq!(Filter::from_query(None, None, None).unwrap(), Filter::default());
    }

    #[test]
    fn from_query_rejects_bad_range() {
        let err = Filter::from_query(None, Some("huge"), None).unwrap_err();
        assert_eq!(err.to_string(), "Invalid filter: unrecognized pond area range 'huge'");
    }

    #[test]
    fn from_query_rejects_bad_limit() {
        let err = Filter::from_query(None, None, Some("-5")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid filter: limit must be a non-negative integer, got '-5'"
        );
    }

    #[test]
    fn range_parse_and_display_agree() {
        let ranges = [
            PondAreaRange::All,
            PondAreaRange::Minor,
            PondAreaRange::Small,
            PondAreaRange::Medium,
            PondAreaRange::Large,
            PondAreaRange::Below500,
            PondAreaRange::From500To1000,
            PondAreaRange::Above1000,
        ];
        for range in ranges {
            let parsed: PondAreaRange = range.to_string().parse().unwrap();
            assert_eq!(parsed, range);
        }
    }

    #[test]
    fn range_bands() {
        assert_eq!(PondAreaRange::All.band(), None);
        assert_eq!(PondAreaRange::Minor.band(), Some(PondAreaBand::Low));
        assert_eq!(PondAreaRange::Small.band(), Some(PondAreaBand::Low));
        assert_eq!(PondAreaRange::Medium.band(), Some(PondAreaBand::Mid));
        assert_eq!(PondAreaRange::Large.band(), Some(PondAreaBand::High));
        assert_eq!(PondAreaRange::Above1000.band(), Some(PondAreaBand::High));
    }

    #[test]
    fn size_class_boundaries() {
        assert_eq!(PondAreaRange::classify(0.0), Some(PondAreaRange::Minor));
        assert_eq!(PondAreaRange::classify(249.99), Some(PondAreaRange::Minor));
        assert_eq!(PondAreaRange::classify(250.0), Some(PondAreaRange::Small));
        assert_eq!(PondAreaRange::classify(300.0), Some(PondAreaRange::Small));
        assert_eq!(PondAreaRange::classify(500.0), Some(PondAreaRange::Medium));
        assert_eq!(PondAreaRange::classify(1000.0), Some(PondAreaRange::Medium));
        assert_eq!(PondAreaRange::classify(1000.5), Some(PondAreaRange::Large));
        assert_eq!(PondAreaRange::classify(f64::NAN), None);
    }

    #[test]
    fn range_coverage() {
        assert!(PondAreaRange::Below500.covers(PondAreaRange::Minor));
        assert!(PondAreaRange::Below500.covers(PondAreaRange::Small));
        assert!(!PondAreaRange::Small.covers(PondAreaRange::Below500));
        assert!(PondAreaRange::From500To1000.covers(PondAreaRange::Medium));
        assert!(PondAreaRange::Medium.covers(PondAreaRange::From500To1000));
        assert!(PondAreaRange::All.covers(PondAreaRange::Above1000));
        assert!(!PondAreaRange::Large.covers(PondAreaRange::Medium));
    }

    #[test]
    fn contains_area() {
        assert!(PondAreaRange::Small.contains_area(300.0));
        assert!(!PondAreaRange::Small.contains_area(700.0));
        assert!(!PondAreaRange::Minor.contains_area(300.0));
        assert!(PondAreaRange::Below500.contains_area(100.0));
        assert!(PondAreaRange::All.contains_area(5000.0));
        assert!(!PondAreaRange::All.contains_area(f64::INFINITY));
    }

    #[test]
    fn limit_options() {
        assert_eq!(RECORD_LIMIT_OPTIONS, [10, 20, 50, 100, 200]);
    }

    #[test]
    fn deserializes_with_defaults() {
        let f: Filter = serde_json::from_str(r#"{"species":"P. monodon"}"#).unwrap();
        assert_eq!(f, Filter::new().with_species("P. monodon"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// SeriesView
// ═══════════════════════════════════════════════════════════════════

mod series_view {
    use super::*;

    #[test]
    fn from_aggregates_keeps_pairs_aligned() {
        let view = SeriesView::from_aggregates(
            "t",
            "d",
            vec![Aggregate::new("a", 1.0), Aggregate::new("b", 2.0), Aggregate::new("c", 3.0)],
            &["#111", "#222"],
        );
        assert_eq!(view.labels(), ["a", "b", "c"]);
        assert_eq!(view.values(), [1.0, 2.0, 3.0]);
        assert_eq!(view.colors(), ["#111", "#222", "#111"]);
        assert_eq!(view.len(), 3);
        assert_eq!(view.to_aggregates()[1], Aggregate::new("b", 2.0));
    }

    #[test]
    fn empty_view() {
        let view = SeriesView::empty("Title", "Data");
        assert!(view.is_empty());
        assert_eq!(view.title(), "Title");
        assert_eq!(view.dataset_label(), "Data");
        assert!(view.colors().is_empty());
    }

    #[test]
    fn deserialize_rejects_mismatched_lengths() {
        let err = serde_json::from_str::<SeriesView>(r#"{"labels":["a","b"],"values":[1.0]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("2 labels but 1 values"), "{err}");
    }

    #[test]
    fn serde_roundtrip() {
        let view = SeriesView::from_aggregates("t", "d", vec![Aggregate::new("x", 4.5)], &["#000"]);
        let json = serde_json::to_string(&view).unwrap();
        let back: SeriesView = serde_json::from_str(&json).unwrap();
        assert_eq!(back, view);
    }

    #[test]
    fn species_colors() {
        assert_eq!(species_color("P. monodon"), "#FFCA28");
        assert_eq!(species_color("M. rosenbergii"), "#4CAF50");
        assert_eq!(species_color("L. vannamei"), "#0288D1");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Chart specs
// ═══════════════════════════════════════════════════════════════════

mod chart {
    use super::*;

    #[test]
    fn reducer_parse() {
        assert_eq!("mean".parse::<Reducer>().unwrap(), Reducer::Mean);
        assert_eq!("sum".parse::<Reducer>().unwrap(), Reducer::Sum);
        assert!(matches!("median".parse::<Reducer>(), Err(CoreError::InvalidFilter(_))));
    }

    #[test]
    fn granularity_parse() {
        assert_eq!("daily".parse::<TimeGranularity>().unwrap(), TimeGranularity::Daily);
        assert_eq!(
            "weekly".parse::<TimeGranularity>().unwrap(),
            TimeGranularity::Weekly(WeeklyMode::Calendar)
        );
        assert!("monthly".parse::<TimeGranularity>().is_err());
    }

    #[test]
    fn presets() {
        assert_eq!(
            SeriesSpec::fcr_by_pond_area(),
            SeriesSpec::ByPondArea {
                value_field: fields::ADJUSTED_FCR.into(),
                reducer: Reducer::Mean,
            }
        );
        assert_eq!(
            SeriesSpec::growth_over_age(),
            SeriesSpec::Trend {
                x_field: fields::AGE_OF_SHRIMP_DAYS.into(),
                value_field: fields::SHRIMP_WEIGHT_G.into(),
            }
        );
    }

    #[test]
    fn datasets() {
        let paths: Vec<&str> = Dataset::ALL.iter().map(|d| d.path()).collect();
        assert_eq!(paths, vec!["water-quality", "shrimp-growth", "feed-fcr", "feed-meals"]);
        for (i, dataset) in Dataset::ALL.iter().enumerate() {
            assert_eq!(dataset.index(), i);
        }
    }

    #[test]
    fn health_status_display() {
        assert_eq!(HealthStatus::Good.to_string(), "Good");
        assert_eq!(HealthStatus::NeedsAttention.to_string(), "Needs Attention");
        assert_eq!(HealthStatus::NoData.to_string(), "No data available");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let s = Settings::default();
        assert!(s.validate().is_ok());
        assert_eq!(s.top_n, 5);
        assert_eq!(s.default_filter(), Filter::new().with_limit(200));
    }

    #[test]
    fn empty_toml_gives_defaults() {
        assert_eq!(Settings::from_toml_str("").unwrap(), Settings::default());
    }

    #[test]
    fn partial_toml() {
        let s = Settings::from_toml_str("api_base_url = \"https://farm.example/api\"\ntop_n = 10\n").unwrap();
        assert_eq!(s.api_base_url, "https://farm.example/api");
        assert_eq!(s.top_n, 10);
        assert_eq!(s.default_limit, 200);
    }

    #[test]
    fn rejects_non_http_url() {
        let err = Settings::from_toml_str("api_base_url = \"ftp://x\"").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: api_base_url must be an http(s) URL, got 'ftp://x'"
        );
    }

    #[test]
    fn rejects_zero_values() {
        for (toml, msg) in [
            ("request_timeout_secs = 0", "request_timeout_secs must be positive"),
            ("default_limit = 0", "default_limit must be positive"),
            ("top_n = 0", "top_n must be positive"),
        ] {
            let err = Settings::from_toml_str(toml).unwrap_err();
            assert!(err.to_string().contains(msg), "{err}");
        }
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = Settings::from_toml_str("top_n = \"five\"").unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.toml");
        std::fs::write(&path, "default_limit = 50\n").unwrap();

        let s = Settings::load_from_file(&path).unwrap();
        assert_eq!(s.default_limit, 50);
        assert_eq!(s.default_filter().limit, Some(50));
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load_from_file(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, CoreError::FileIO(_)));
    }
}
