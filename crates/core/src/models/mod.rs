pub mod bucket;
pub mod chart;
pub mod filter;
pub mod record;
pub mod series;
pub mod settings;
pub mod summary;
