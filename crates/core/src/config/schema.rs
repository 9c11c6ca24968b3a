//! Configuration schema definitions

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigSchema {
    /// Search pipeline tuning
    #[serde(default)]
    pub search: SearchTuning,

    /// Upstream endpoints
    #[serde(default)]
    pub api: ApiSection,

    /// Log output
    #[serde(default)]
    pub logging: LoggingSection,
}

impl ConfigSchema {
    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.search.validate()
    }
}

/// Search pipeline tuning
///
/// The defaults are the values the ranking heuristics were calibrated
/// against; change them only deliberately.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchTuning {
    /// Lifetime of cached upstream responses
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Minimum spacing between upstream requests
    #[serde(default = "default_min_request_interval_ms")]
    pub min_request_interval_ms: u64,

    /// Timeout for a single upstream request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Page size used when the caller does not pass one
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Significant name words used in the dedup group key
    #[serde(default = "default_dedup_key_words")]
    pub dedup_key_words: usize,

    /// Brand characters used in the dedup group key
    #[serde(default = "default_dedup_brand_prefix")]
    pub dedup_brand_prefix: usize,
}

impl Default for SearchTuning {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_cache_ttl_secs(),
            min_request_interval_ms: default_min_request_interval_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            default_page_size: default_page_size(),
            dedup_key_words: default_dedup_key_words(),
            dedup_brand_prefix: default_dedup_brand_prefix(),
        }
    }
}

impl SearchTuning {
    /// Cache lifetime as a duration
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Minimum request spacing as a duration
    #[must_use]
    pub fn min_request_interval(&self) -> Duration {
        Duration::from_millis(self.min_request_interval_ms)
    }

    /// Request timeout as a duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.cache_ttl_secs == 0 {
            return Err(Error::invalid_config_value("cache_ttl_secs", "must be greater than zero"));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::invalid_config_value(
                "request_timeout_secs",
                "must be greater than zero",
            ));
        }
        if self.default_page_size == 0 || self.default_page_size > 200 {
            return Err(Error::invalid_config_value(
                "default_page_size",
                "must be between 1 and 200",
            ));
        }
        if self.dedup_key_words == 0 {
            return Err(Error::invalid_config_value("dedup_key_words", "must be at least 1"));
        }
        Ok(())
    }
}

fn default_cache_ttl_secs() -> u64 {
    30 * 60
}

fn default_min_request_interval_ms() -> u64 {
    500
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_page_size() -> u32 {
    12
}

fn default_dedup_key_words() -> usize {
    4
}

fn default_dedup_brand_prefix() -> usize {
    10
}

/// Upstream endpoint overrides
///
/// Secrets (API key, anon key) are never read from the file; they come
/// from the environment only.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ApiSection {
    /// FoodData Central REST base URL
    pub fdc_base_url: Option<String>,

    /// Supabase project URL (without `/functions/v1`)
    pub supabase_url: Option<String>,

    /// Name of the edge function proxying FDC requests
    pub proxy_function: Option<String>,
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSection {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
