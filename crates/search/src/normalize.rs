//! Text normalization shared by deduplication and scoring.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// Words that never distinguish one food from another.
static NON_SIGNIFICANT: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "raw", "fresh", "plain", "whole", "organic", "natural", "and", "with", "the", "for",
    ]
    .into_iter()
    .collect()
});

/// Minimum length (exclusive) of a significant word.
const MIN_SIGNIFICANT_LEN: usize = 2;

/// Lowercased words with punctuation stripped.
///
/// `"McDonald's Big-Mac"` becomes `["mcdonalds", "big", "mac"]`.
pub fn normalized_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .unicode_words()
        .map(|w| w.chars().filter(|c| c.is_alphanumeric()).collect::<String>())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Normalized words longer than two characters that carry meaning.
pub fn significant_words(text: &str) -> Vec<String> {
    normalized_words(text)
        .into_iter()
        .filter(|w| w.chars().count() > MIN_SIGNIFICANT_LEN)
        .filter(|w| !NON_SIGNIFICANT.contains(w.as_str()))
        .collect()
}

/// Lowercased, whitespace-separated query words.
pub fn query_words(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_words_strip_punctuation() {
        assert_eq!(
            normalized_words("McDonald's Big-Mac"),
            vec!["mcdonalds", "big", "mac"]
        );
        assert_eq!(normalized_words("Banana, raw"), vec!["banana", "raw"]);
    }

    #[test]
    fn test_significant_words_drop_short_and_descriptors() {
        assert_eq!(significant_words("Banana raw fresh"), vec!["banana"]);
        assert_eq!(significant_words("Egg, whole, 1 lg"), vec!["egg"]);
    }

    #[test]
    fn test_query_words() {
        assert_eq!(query_words("  Big   MAC "), vec!["big", "mac"]);
        assert!(query_words("   ").is_empty());
    }
}
