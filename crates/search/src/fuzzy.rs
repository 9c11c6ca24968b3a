//! Ordered fuzzy matching.

/// Check if text contains all words in order.
///
/// Each word is searched for after the end of the previous match, so the
/// words must appear in sequence but not necessarily next to each other.
/// Matching is substring-based: `"mac"` matches inside `"macaroni"`.
///
/// # Arguments
/// * `text` - Lowercased text to search in
/// * `words` - Lowercased words to find
///
/// # Returns
/// true if every word is found after the previous one
pub fn ordered_words_match<S: AsRef<str>>(text: &str, words: &[S]) -> bool {
    let mut rest = text;

    for word in words {
        let word = word.as_ref();
        match rest.find(word) {
            Some(idx) => rest = &rest[idx + word.len()..],
            None => return false,
        }
    }

    true
}
