use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;

use super::bucket::{
    PondAreaBand, POND_AREA_HIGH_LIMIT_M2, POND_AREA_LOW_LIMIT_M2, POND_AREA_MINOR_LIMIT_M2,
};

/// Record-count options offered by the dashboard's "records" selector.
pub const RECORD_LIMIT_OPTIONS: [usize; 5] = [10, 20, 50, 100, 200];

const SIZE_CLASSES: [PondAreaRange; 4] = [
    PondAreaRange::Minor,
    PondAreaRange::Small,
    PondAreaRange::Medium,
    PondAreaRange::Large,
];

/// Pond-area constraint selected by the user.
///
/// `Minor`/`Small`/`Medium`/`Large` are the API's pre-labeled size classes;
/// the `Below500`/`From500To1000`/`Above1000` variants name the numeric bands,
/// each a union of size classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PondAreaRange {
    #[default]
    All,
    Minor,
    Small,
    Medium,
    Large,
    Below500,
    From500To1000,
    Above1000,
}

impl PondAreaRange {
    /// Value sent as the `pond_area_range` query parameter, and the label a
    /// pre-bucketed record carries. `None` for `All`.
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            PondAreaRange::All => None,
            PondAreaRange::Minor => Some("Minor"),
            PondAreaRange::Small => Some("Small"),
            PondAreaRange::Medium => Some("Medium"),
            PondAreaRange::Large => Some("Large"),
            PondAreaRange::Below500 => Some("below_500"),
            PondAreaRange::From500To1000 => Some("range_500_to_1000"),
            PondAreaRange::Above1000 => Some("above_1000"),
        }
    }

    /// Pond-area band this range falls within. `Minor` and `Small` are both
    /// below 500 m², so they share the low band.
    pub fn band(&self) -> Option<PondAreaBand> {
        match self {
            PondAreaRange::All => None,
            PondAreaRange::Minor | PondAreaRange::Small | PondAreaRange::Below500 => {
                Some(PondAreaBand::Low)
            }
            PondAreaRange::Medium | PondAreaRange::From500To1000 => Some(PondAreaBand::Mid),
            PondAreaRange::Large | PondAreaRange::Above1000 => Some(PondAreaBand::High),
        }
    }

    /// Size classes this range is made of.
    ///
    /// The four classes partition every area: Minor `< 250`, Small
    /// `[250, 500)`, Medium `[500, 1000]` and Large `> 1000` m².
    pub fn size_classes(&self) -> &'static [PondAreaRange] {
        match self {
            PondAreaRange::All => &SIZE_CLASSES,
            PondAreaRange::Minor => &[PondAreaRange::Minor],
            PondAreaRange::Small => &[PondAreaRange::Small],
            PondAreaRange::Medium | PondAreaRange::From500To1000 => &[PondAreaRange::Medium],
            PondAreaRange::Large | PondAreaRange::Above1000 => &[PondAreaRange::Large],
            PondAreaRange::Below500 => &[PondAreaRange::Minor, PondAreaRange::Small],
        }
    }

    /// Size class of a raw area, or `None` for non-finite input.
    pub fn classify(area_m2: f64) -> Option<Self> {
        if !area_m2.is_finite() {
            return None;
        }
        Some(if area_m2 < POND_AREA_MINOR_LIMIT_M2 {
            PondAreaRange::Minor
        } else if area_m2 < POND_AREA_LOW_LIMIT_M2 {
            PondAreaRange::Small
        } else if area_m2 <= POND_AREA_HIGH_LIMIT_M2 {
            PondAreaRange::Medium
        } else {
            PondAreaRange::Large
        })
    }

    /// Whether every area in `other` also lies in this range.
    pub fn covers(&self, other: PondAreaRange) -> bool {
        let ours = self.size_classes();
        other.size_classes().iter().all(|class| ours.contains(class))
    }

    pub fn contains_area(&self, area_m2: f64) -> bool {
        Self::classify(area_m2).is_some_and(|class| self.covers(class))
    }

    pub fn is_all(&self) -> bool {
        matches!(self, PondAreaRange::All)
    }
}

impl FromStr for PondAreaRange {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(PondAreaRange::All),
            "Minor" => Ok(PondAreaRange::Minor),
            "Small" => Ok(PondAreaRange::Small),
            "Medium" => Ok(PondAreaRange::Medium),
            "Large" => Ok(PondAreaRange::Large),
            "below_500" => Ok(PondAreaRange::Below500),
            "range_500_to_1000" => Ok(PondAreaRange::From500To1000),
            "above_1000" => Ok(PondAreaRange::Above1000),
            other => Err(CoreError::InvalidFilter(format!(
                "unrecognized pond area range '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for PondAreaRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.query_value().unwrap_or("all"))
    }
}

/// User-selected filters, passed by value into every recomputation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    /// Exact species name; `None` or empty means all species.
    #[serde(default)]
    pub species: Option<String>,

    #[serde(default)]
    pub pond_area_range: PondAreaRange,

    /// Keep at most this many records, counted from the start.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_species(mut self, species: impl Into<String>) -> Self {
        self.species = Some(species.into());
        self
    }

    #[must_use]
    pub fn with_pond_area_range(mut self, range: PondAreaRange) -> Self {
        self.pond_area_range = range;
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Build a filter from raw query-string values.
    ///
    /// Empty strings mean "no constraint". An unknown pond-area range or a
    /// non-numeric limit is rejected.
    pub fn from_query(
        species: Option<&str>,
        pond_area_range: Option<&str>,
        limit: Option<&str>,
    ) -> Result<Self, CoreError> {
        let species = species
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let pond_area_range = match pond_area_range {
            Some(raw) => raw.parse()?,
            None => PondAreaRange::All,
        };

        let limit = match limit.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(raw.parse::<usize>().map_err(|_| {
                CoreError::InvalidFilter(format!("limit must be a non-negative integer, got '{raw}'"))
            })?),
            None => None,
        };

        Ok(Self {
            species,
            pond_area_range,
            limit,
        })
    }

    /// The species constraint, treating an empty string as none.
    pub fn species(&self) -> Option<&str> {
        self.species.as_deref().filter(|s| !s.is_empty())
    }

    /// Query parameters for the REST layer, in `limit, species, pond_area_range` order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(species) = self.species() {
            pairs.push(("species", species.to_string()));
        }
        if let Some(range) = self.pond_area_range.query_value() {
            pairs.push(("pond_area_range", range.to_string()));
        }
        pairs
    }
}
