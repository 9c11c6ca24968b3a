//! Food search ranking for nutrisearch.
//!
//! This crate provides:
//! - A normalized food candidate model
//! - Keyword-based category classification
//! - A nutritional completeness filter
//! - Near-duplicate collapsing
//! - Multi-signal relevance scoring
//!
//! [`rank`] runs the whole pipeline over one query's candidates.

mod candidate;
mod category;
mod dedup;
mod fuzzy;
mod normalize;
mod relevance;
mod validate;

pub use candidate::{DataType, FoodCandidate, Nutrients, UNKNOWN_FOOD};
pub use category::FoodCategory;
pub use dedup::{deduplicate, group_key, group_score, DedupConfig};
pub use fuzzy::ordered_words_match;
pub use normalize::{normalized_words, query_words, significant_words};
pub use relevance::{rank_by_relevance, relevance_score, MatchTier};
pub use validate::{is_complete, retain_complete, MAX_CALORIES};

/// Search result with relevance score.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scored<T> {
    /// The matched item
    pub item: T,
    /// Relevance score (higher is better)
    pub score: i32,
}

/// Options for [`rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankOptions {
    /// Maximum results returned
    pub limit: usize,
    /// Deduplication thresholds
    pub dedup: DedupConfig,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            limit: 12,
            dedup: DedupConfig::default(),
        }
    }
}

impl RankOptions {
    /// Options with a specific page size
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }
}

/// Validate, deduplicate, score and truncate one query's candidates.
pub fn rank(
    foods: Vec<FoodCandidate>,
    query: &str,
    options: &RankOptions,
) -> Vec<Scored<FoodCandidate>> {
    let complete = retain_complete(foods);
    let unique = deduplicate(complete, &options.dedup);
    let mut ranked = rank_by_relevance(unique, query);
    ranked.truncate(options.limit);
    ranked
}
