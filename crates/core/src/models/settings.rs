use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::filter::Filter;

/// Dashboard configuration, usually read from a `dashboard.toml`.
///
/// Every field has a default so a partial (or empty) file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the aquaculture REST API (without trailing slash).
    pub api_base_url: String,

    /// Per-request timeout for the HTTP record source.
    pub request_timeout_secs: u64,

    /// Record-count window used when the user has not picked one.
    pub default_limit: usize,

    /// Rows shown in "top records" tables.
    pub top_n: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:5000/api".to_string(),
            request_timeout_secs: 30,
            default_limit: 200,
            top_n: 5,
        }
    }
}

impl Settings {
    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, CoreError> {
        let settings: Settings = toml::from_str(toml_str)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(CoreError::Config(format!(
                "api_base_url must be an http(s) URL, got '{}'",
                self.api_base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(CoreError::Config("request_timeout_secs must be positive".into()));
        }
        if self.default_limit == 0 {
            return Err(CoreError::Config("default_limit must be positive".into()));
        }
        if self.top_n == 0 {
            return Err(CoreError::Config("top_n must be positive".into()));
        }
        Ok(())
    }

    /// Filter a page starts from before the user touches any selector.
    pub fn default_filter(&self) -> Filter {
        Filter::new().with_limit(self.default_limit)
    }
}
