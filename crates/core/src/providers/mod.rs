pub mod traits;

// Record source implementations
pub mod http;
