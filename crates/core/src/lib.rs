//! Core utilities for nutrisearch
//!
//! This crate provides the shared building blocks used by the search service:
//!
//! - **Error handling**: structured errors with codes, context, and recovery suggestions
//! - **Clocks**: an injectable time source so expiry logic can be tested deterministically
//! - **Caching**: an in-memory TTL map with lazy eviction
//! - **Rate limiting**: a minimum-interval limiter for outbound API calls
//! - **Configuration**: TOML-based tuning with sensible defaults
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use nutrisearch_core::cache::TtlCache;
//!
//! let cache: TtlCache<String> = TtlCache::new(Duration::from_secs(1800));
//! cache.set("search:apple:12:1", "cached".to_string());
//! assert_eq!(cache.get("search:apple:12:1").as_deref(), Some("cached"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod rate_limit;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::cache::{CacheStats, TtlCache};
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::config::{Config, ConfigSchema, SearchTuning};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::rate_limit::MinIntervalLimiter;
}
