//! In-memory TTL cache for upstream responses
//!
//! Entries are stamped on insert and treated as missing once they are
//! `ttl` old. Expired entries are removed on the read that finds them;
//! there is no background sweep and no size bound.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use nutrisearch_core::cache::TtlCache;
//!
//! let cache = TtlCache::new(Duration::from_secs(1800));
//! cache.set("food:171477", 42u32);
//!
//! if let Some(value) = cache.get("food:171477") {
//!     println!("Cached: {value}");
//! }
//! ```

use crate::clock::{Clock, SystemClock};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tracing::trace;

/// Default cache lifetime (30 minutes)
pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    data: V,
    stored_at: Instant,
}

/// Keyed cache with a fixed time-to-live
pub struct TtlCache<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V: Clone> TtlCache<V> {
    /// Create a cache using the system clock
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Create a cache with an injected clock
    #[must_use]
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Configured time-to-live
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get a cached value, evicting it if it has expired
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());

        let expired = match entries.get(key) {
            Some(entry) if now.duration_since(entry.stored_at) < self.ttl => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.data.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            entries.remove(key);
            trace!(key, "Evicted expired cache entry");
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Store a value, replacing any previous entry and resetting its age
    pub fn set(&self, key: impl Into<String>, value: V) {
        let entry = CacheEntry {
            data: value,
            stored_at: self.clock.now(),
        };
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.into(), entry);
    }

    /// Remove a cached value, returning whether it was present
    pub fn remove(&self, key: &str) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.remove(key).is_some()
    }

    /// Drop every entry
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.clear();
    }

    /// Number of stored entries, expired ones included
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether the cache holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get cache statistics
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            ttl_secs: self.ttl.as_secs(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Stored entries, including expired ones not yet read
    pub entries: usize,
    /// Reads served from the cache
    pub hits: u64,
    /// Reads that found nothing or an expired entry
    pub misses: u64,
    /// Configured time-to-live in seconds
    pub ttl_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn test_cache() -> (TtlCache<String>, ManualClock) {
        let clock = ManualClock::new();
        let cache = TtlCache::with_clock(DEFAULT_TTL, Arc::new(clock.clone()));
        (cache, clock)
    }

    #[test]
    fn test_set_and_get() {
        let (cache, _clock) = test_cache();

        cache.set("search:apple:12:1", "apples".to_string());
        assert_eq!(cache.get("search:apple:12:1"), Some("apples".to_string()));
    }

    #[test]
    fn test_get_missing() {
        let (cache, _clock) = test_cache();
        assert!(cache.get("nonexistent").is_none());
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_hit_within_ttl() {
        let (cache, clock) = test_cache();

        cache.set("k", "v".to_string());
        clock.advance(DEFAULT_TTL - Duration::from_secs(1));

        assert_eq!(cache.get("k"), Some("v".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_expired_entry_is_evicted_on_read() {
        let (cache, clock) = test_cache();

        cache.set("k", "v".to_string());
        clock.advance(DEFAULT_TTL);

        // Still stored until somebody reads it
        assert_eq!(cache.len(), 1);
        assert!(cache.get("k").is_none());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_set_resets_age() {
        let (cache, clock) = test_cache();

        cache.set("k", "old".to_string());
        clock.advance(Duration::from_secs(20 * 60));
        cache.set("k", "new".to_string());
        clock.advance(Duration::from_secs(20 * 60));

        assert_eq!(cache.get("k"), Some("new".to_string()));
    }

    #[test]
    fn test_remove_and_clear() {
        let (cache, _clock) = test_cache();

        cache.set("a", "1".to_string());
        cache.set("b", "2".to_string());

        assert!(cache.remove("a"));
        assert!(!cache.remove("a"));
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_stats() {
        let (cache, _clock) = test_cache();

        cache.set("a", "1".to_string());
        let _ = cache.get("a");
        let _ = cache.get("b");

        let stats = cache.stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.ttl_secs, 1800);
    }
}
