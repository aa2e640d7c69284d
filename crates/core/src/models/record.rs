use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::CoreError;

/// Field names used by the aquaculture REST API.
pub mod fields {
    pub const SHRIMP_SPECIES: &str = "Shrimp_Species";
    pub const POND_AREA_M2: &str = "Pond_Area_m2";
    /// Pre-labeled pond-area category, present when the API has already bucketed the pond.
    pub const POND_AREA_RANGE: &str = "Pond_Area_Range";

    pub const ADJUSTED_FCR: &str = "Adjusted_FCR";
    pub const FEED_TYPE: &str = "Feed_Type";
    pub const FEED_COST_PER_KG_USD: &str = "Feed_Cost_per_Kg_USD";
    pub const TOTAL_FEED_PER_DAY_G: &str = "Total_Feed_Consumed_per_Day_g";
    pub const HARVEST_YIELD_KG_HA: &str = "Harvest_Yield_Prediction_kg_ha";

    pub const WATER_PH: &str = "Water_pH";
    pub const TEMPERATURE_C: &str = "Temperature_C";
    pub const SALINITY_PPT: &str = "Salinity_ppt";
    pub const DISSOLVED_OXYGEN_MG_L: &str = "Dissolved_Oxygen_mg_L";
    pub const AMMONIA_MG_L: &str = "Ammonia_mg_L";
    pub const NITRITE_MG_L: &str = "Nitrite_mg_L";
    pub const ALKALINITY_MG_L_CACO3: &str = "Alkalinity_mg_L_CaCO3";

    pub const SHRIMP_SIZE_G: &str = "Shrimp_Size_g";
    pub const SHRIMP_WEIGHT_G: &str = "Shrimp_Weight_g";
    pub const AGE_OF_SHRIMP_DAYS: &str = "Age_of_Shrimp_days";
    pub const SURVIVAL_RATE: &str = "survival_rate";
    pub const YIELD: &str = "yield";

    pub const DATE: &str = "date";
    pub const TIMESTAMP: &str = "timestamp";

    /// Water-quality parameters plotted together on the trend page.
    pub const WATER_QUALITY_PARAMETERS: [&str; 7] = [
        WATER_PH,
        TEMPERATURE_C,
        SALINITY_PPT,
        DISSOLVED_OXYGEN_MG_L,
        AMMONIA_MG_L,
        NITRITE_MG_L,
        ALKALINITY_MG_L_CACO3,
    ];
}

/// Species offered by the dashboard's species selector.
pub const SHRIMP_SPECIES: [&str; 3] = ["P. monodon", "M. rosenbergii", "L. vannamei"];

/// One flat data row from the upstream aquaculture dataset.
///
/// Records are read-only once fetched. Any subset of fields may be absent;
/// accessors return `None` rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Builder-style setter, mostly for fixtures and manual entry.
    #[must_use]
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Numeric value of a field.
    ///
    /// JSON numbers and numeric strings (the API is not consistent about
    /// which it sends) yield a finite `f64`. Missing, null, boolean,
    /// non-numeric and non-finite values yield `None`.
    pub fn number(&self, field: &str) -> Option<f64> {
        let value = match self.fields.get(field)? {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Numeric value of a field, with anything unusable counted as `0.0`.
    pub fn number_or_zero(&self, field: &str) -> f64 {
        self.number(field).unwrap_or(0.0)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        match self.fields.get(field)? {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Calendar day of this record, read from `date` or else `timestamp`.
    pub fn date(&self) -> Option<NaiveDate> {
        self.fields
            .get(fields::DATE)
            .and_then(parse_day)
            .or_else(|| self.fields.get(fields::TIMESTAMP).and_then(parse_day))
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self::from_fields(fields)
    }
}

/// Truncate a date-like JSON value to a UTC calendar day.
///
/// Numbers are epoch milliseconds. Strings may be RFC 3339, a bare
/// `YYYY-MM-DD`, or a naive date-time with `T` or space separator.
fn parse_day(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.date_naive())
        }
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc).date_naive());
            }
            if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                return Some(d);
            }
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        }
        _ => None,
    }
}

// ── Boundary parsing ────────────────────────────────────────────────

/// Parse an API response body into records.
///
/// The body must be a JSON array of JSON objects. Anything else is a caller
/// contract violation and is rejected rather than coerced.
pub fn records_from_json(json: &str) -> Result<Vec<Record>, CoreError> {
    let value: Value = serde_json::from_str(json)?;
    records_from_value(value)
}

/// Same as [`records_from_json`] for an already-decoded JSON value.
pub fn records_from_value(value: Value) -> Result<Vec<Record>, CoreError> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(CoreError::InvalidInput(format!(
                "expected a JSON array of records, got {}",
                json_kind(&other)
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(Record::from_fields(map)),
            other => Err(CoreError::InvalidInput(format!(
                "record at index {index} must be a JSON object, got {}",
                json_kind(&other)
            ))),
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Human-readable name for an API field (`Water_pH` → `Water pH`).
pub fn display_name(field: &str) -> String {
    field.replace('_', " ")
}
