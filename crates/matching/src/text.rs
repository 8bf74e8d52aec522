//! Tokenizing and set similarity over free-text profile fields.

use std::collections::HashSet;

/// Split a comma-separated field into trimmed, lowercase, non-empty tokens.
///
/// Order is preserved and duplicates are kept, so a repeated interest
/// still counts towards normalization the way the user typed it.
///
/// # Example
/// ```
/// use impactmatch_matching::text::parse_interests;
///
/// assert_eq!(parse_interests(" Education,, Child Welfare "), vec!["education", "child welfare"]);
/// ```
pub fn parse_interests(text: &str) -> Vec<String> {
    text.split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Like [`parse_interests`], but with duplicates removed (first occurrence wins).
pub fn parse_unique(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    parse_interests(text)
        .into_iter()
        .filter(|token| seen.insert(token.clone()))
        .collect()
}

/// Split text into lowercase words on commas and whitespace.
pub fn split_words(text: &str) -> Vec<String> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Jaccard similarity of the whitespace-split word sets of two strings.
///
/// Comparison is case-insensitive. Two blank strings have similarity 0.
///
/// # Returns
/// `|A ∩ B| / |A ∪ B|` in `[0, 1]`
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();
    let words_a: HashSet<&str> = a_lower.split_whitespace().collect();
    let words_b: HashSet<&str> = b_lower.split_whitespace().collect();

    let union = words_a.union(&words_b).count();
    if union == 0 {
        return 0.0;
    }

    let intersection = words_a.intersection(&words_b).count();
    intersection as f64 / union as f64
}

/// Loose keyword containment used for skill lookups.
///
/// True when either string contains the other. The reverse direction
/// (keyword inside the word) needs at least three characters so that
/// fragments like "a" or "it" do not match everything.
pub(crate) fn loosely_contains(word: &str, keyword: &str) -> bool {
    if word.is_empty() || keyword.is_empty() {
        return false;
    }
    word.contains(keyword) || (word.chars().count() >= 3 && keyword.contains(word))
}
