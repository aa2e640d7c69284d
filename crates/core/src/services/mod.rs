pub mod fetch_service;
pub mod series_service;
pub mod summary_service;
