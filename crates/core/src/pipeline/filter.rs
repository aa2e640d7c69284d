use crate::models::filter::{Filter, PondAreaRange};
use crate::models::record::{fields, Record};

/// Narrow `records` by species, pond-area range and limit.
///
/// The limit keeps the first `n` matches; callers wanting "the most recent
/// `n`" must order the input first. No match yields an empty vector.
pub fn filter<'a>(records: &'a [Record], filter: &Filter) -> Vec<&'a Record> {
    let species = filter.species();
    let limit = filter.limit.unwrap_or(usize::MAX);

    records
        .iter()
        .filter(|r| species.map_or(true, |s| r.text(fields::SHRIMP_SPECIES) == Some(s)))
        .filter(|r| matches_pond_area(r, filter.pond_area_range))
        .take(limit)
        .collect()
}

/// Whether a record satisfies a pond-area constraint.
///
/// A pre-labeled `Pond_Area_Range` wins over the raw area: a recognized
/// label passes when its whole size range lies inside `range` (so `Minor`
/// passes `below_500`), an unrecognized one only on exact match. A record
/// with neither field passes: the API applies the same constraint
/// server-side and does not always echo the area back.
pub fn matches_pond_area(record: &Record, range: PondAreaRange) -> bool {
    let Some(label) = range.query_value() else {
        return true;
    };

    if let Some(category) = record
        .text(fields::POND_AREA_RANGE)
        .map(str::trim)
        .filter(|c| !c.is_empty())
    {
        return match category.parse::<PondAreaRange>() {
            Ok(labeled) => range.covers(labeled),
            Err(_) => category == label,
        };
    }

    match record.number(fields::POND_AREA_M2) {
        Some(area) => range.contains_area(area),
        None => true,
    }
}
