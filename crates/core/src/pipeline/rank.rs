use crate::models::record::Record;
use crate::models::series::RankedRow;

/// The `top_n` records with the largest `key`, largest first.
///
/// Records whose `key` is missing or non-numeric sort last. The sort is
/// stable, so ties keep their input order. Asking for more records than
/// exist returns all of them.
pub fn rank<'a>(records: &[&'a Record], key: &str, top_n: usize) -> Vec<&'a Record> {
    let mut keyed: Vec<(f64, &'a Record)> = records
        .iter()
        .map(|&r| (r.number(key).unwrap_or(f64::NEG_INFINITY), r))
        .collect();

    // `number()` never yields NaN, so total_cmp agrees with numeric order here.
    keyed.sort_by(|a, b| b.0.total_cmp(&a.0));
    keyed.truncate(top_n);
    keyed.into_iter().map(|(_, r)| r).collect()
}

/// [`rank`] with 1-based positions, for "top records" tables.
pub fn ranked_rows(records: &[&Record], key: &str, top_n: usize) -> Vec<RankedRow> {
    rank(records, key, top_n)
        .into_iter()
        .enumerate()
        .map(|(i, record)| RankedRow {
            rank: i + 1,
            record: record.clone(),
        })
        .collect()
}
