//! Relevance scoring for search results.
//!
//! Scores are additive, unbounded integers meant only for ordering the
//! results of a single query.

use crate::candidate::{DataType, FoodCandidate};
use crate::fuzzy::ordered_words_match;
use crate::normalize::query_words;
use crate::Scored;

/// Name match tiers; only the best applicable tier counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchTier {
    /// Query not found in the name
    None = 0,
    /// Name contains the query
    Contains = 200,
    /// Name starts with the query
    StartsWith = 300,
    /// Name equals the query
    Exact = 500,
}

impl MatchTier {
    /// Tier of a lowercased name against a lowercased query.
    pub fn of(name: &str, query: &str) -> Self {
        if name == query {
            Self::Exact
        } else if name.starts_with(query) {
            Self::StartsWith
        } else if name.contains(query) {
            Self::Contains
        } else {
            Self::None
        }
    }
}

const PHRASE_MATCH: i32 = 1000;
const ORDERED_WORDS: i32 = 150;
const BRAND_EXACT: i32 = 400;
const BRAND_CONTAINS: i32 = 100;
const WORD_IN_NAME: i32 = 30;
const WORD_LEADS_NAME: i32 = 20;
const WORD_IN_BRAND: i32 = 15;
const DENSITY_MAX: f64 = 50.0;
const LONG_NAME_PENALTY: i32 = 20;
const LONG_NAME_CHARS: usize = 100;
const HAS_BRAND: i32 = 10;
const BRANDED_SOURCE: i32 = 15;
const CURATED_SOURCE: i32 = 5;

/// Calculate relevance score for a candidate against a query.
///
/// # Arguments
/// * `food` - The candidate to score
/// * `query` - The search query as typed
///
/// # Returns
/// Relevance score (higher is better, may be negative)
pub fn relevance_score(food: &FoodCandidate, query: &str) -> i32 {
    let query = query.trim().to_lowercase();
    let name = food.name.to_lowercase();
    let brand = food.brand_str().map(str::to_lowercase);
    let brand = brand.as_deref().unwrap_or_default();
    let words = query_words(&query);

    let mut score = 0;

    // Whole phrase
    let combined = format!("{name} {brand}");
    if !query.is_empty() && (name == query || combined.contains(&query)) {
        score += PHRASE_MATCH;
    }
    if !query.is_empty() {
        score += MatchTier::of(&name, &query) as i32;
    }
    if words.len() >= 2 && ordered_words_match(&name, &words) {
        score += ORDERED_WORDS;
    }

    if !brand.is_empty() && !query.is_empty() {
        if brand == query {
            score += BRAND_EXACT;
        } else if brand.contains(&query) {
            score += BRAND_CONTAINS;
        }
    }

    // Individual words
    let mut matched_in_name = 0usize;
    for word in &words {
        if name.contains(word.as_str()) {
            matched_in_name += 1;
            score += WORD_IN_NAME;
            if name.starts_with(word.as_str()) {
                score += WORD_LEADS_NAME;
            }
        }
        if !brand.is_empty() && brand.contains(word.as_str()) {
            score += WORD_IN_BRAND;
        }
    }

    // Short, precise names score higher
    if !words.is_empty() {
        let name_words = name.split_whitespace().count().max(1);
        score += density_bonus(matched_in_name, words.len(), name_words);
    }

    if food.name.chars().count() > LONG_NAME_CHARS {
        score -= LONG_NAME_PENALTY;
    }

    if !brand.is_empty() {
        score += HAS_BRAND;
        if food.data_type == DataType::Branded {
            score += BRANDED_SOURCE;
        }
    }
    if matches!(food.data_type, DataType::SurveyFndds | DataType::Foundation) {
        score += CURATED_SOURCE;
    }

    score
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn density_bonus(matched: usize, query_words: usize, name_words: usize) -> i32 {
    let fraction = matched as f64 / query_words as f64;
    (DENSITY_MAX * fraction / name_words as f64).round() as i32
}

/// Score every candidate and sort by descending score.
///
/// The sort is stable, so equal scores keep their incoming order.
pub fn rank_by_relevance(foods: Vec<FoodCandidate>, query: &str) -> Vec<Scored<FoodCandidate>> {
    let mut scored: Vec<Scored<FoodCandidate>> = foods
        .into_iter()
        .map(|item| {
            let score = relevance_score(&item, query);
            Scored { item, score }
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food(name: &str) -> FoodCandidate {
        FoodCandidate::new("1", name).with_macros(100.0, 1.0, 1.0, 1.0)
    }

    #[test]
    fn test_match_tiers() {
        assert_eq!(MatchTier::of("apple", "apple"), MatchTier::Exact);
        assert_eq!(MatchTier::of("apple pie", "apple"), MatchTier::StartsWith);
        assert_eq!(MatchTier::of("green apple", "apple"), MatchTier::Contains);
        assert_eq!(MatchTier::of("pear", "apple"), MatchTier::None);
        assert!(MatchTier::Exact > MatchTier::StartsWith);
    }

    #[test]
    fn test_exact_score_breakdown() {
        // 1000 phrase + 500 exact + 150 ordered + (30+20) + 30 words + 25 density
        assert_eq!(relevance_score(&food("Big Mac"), "big mac"), 1755);
    }

    #[test]
    fn test_word_only_score_breakdown() {
        // "mac": 30 + 20 (leads), "big": 30, density round(50 * 1 / 3) = 17
        assert_eq!(relevance_score(&food("Mac and big"), "big mac"), 97);
    }

    #[test]
    fn test_brand_scoring() {
        let branded = food("Whopper").with_brand("Burger King").with_data_type("Branded");
        // 1000 phrase via brand + 400 brand exact + 15 + 15 words in brand + 10 brand + 15 branded
        assert_eq!(relevance_score(&branded, "burger king"), 1455);
    }

    #[test]
    fn test_source_bonus() {
        let survey = food("Pear").with_data_type("Survey (FNDDS)");
        let legacy = food("Pear").with_data_type("SR Legacy");
        assert_eq!(relevance_score(&survey, "pear") - relevance_score(&legacy, "pear"), 5);
    }

    #[test]
    fn test_long_name_penalty() {
        let long = food(&format!("apple {}", "x".repeat(100)));
        let short = food(&format!("apple {}", "x".repeat(10)));
        assert_eq!(relevance_score(&short, "apple") - relevance_score(&long, "apple"), 20);
    }

    #[test]
    fn test_exact_outranks_contains_outranks_words() {
        let ranked = rank_by_relevance(
            vec![
                food("Mac and big"),
                food("The big mac burger"),
                food("Big Mac"),
            ],
            "big mac",
        );
        let names: Vec<_> = ranked.iter().map(|s| s.item.name.as_str()).collect();
        assert_eq!(names, ["Big Mac", "The big mac burger", "Mac and big"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let mut a = food("Apple");
        a.external_id = "a".to_string();
        let mut b = food("Apple");
        b.external_id = "b".to_string();

        let ranked = rank_by_relevance(vec![a, b], "apple");
        assert_eq!(ranked[0].item.external_id, "a");
        assert_eq!(ranked[1].item.external_id, "b");
    }

    #[test]
    fn test_empty_query_scores_only_metadata() {
        let f = food("Apple").with_brand("Dole");
        assert_eq!(relevance_score(&f, "   "), 10);
    }
}
