//! The analytics pipeline.
//!
//! ```text
//! records + Filter -> filter -> group -> aggregate -> rank (optional) -> SeriesView
//! ```
//!
//! Every stage is a pure function over borrowed records: nothing here
//! allocates copies of records, mutates input, or fails on sparse data.

pub mod aggregate;
pub mod filter;
pub mod group;
pub mod rank;
