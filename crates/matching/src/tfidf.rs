//! Term frequency × inverse document frequency.
//!
//! Two flavours live here:
//! - standalone [`term_frequency`] / [`inverse_document_frequency`] /
//!   [`tf_idf`] helpers over whitespace tokens, used by the preference path;
//! - [`TfIdfIndex`], a corpus index with word tokenization, stopword
//!   removal and smoothed IDF, used by discover and suggest.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

/// `count(term in doc) / tokens(doc)` over whitespace tokens, case-insensitive.
///
/// An empty document has frequency 0.
pub fn term_frequency(term: &str, document: &str) -> f64 {
    let term = term.to_lowercase();
    let document = document.to_lowercase();
    let terms: Vec<&str> = document.split_whitespace().collect();
    if terms.is_empty() {
        return 0.0;
    }
    let count = terms.iter().filter(|t| **t == term).count();
    count as f64 / terms.len() as f64
}

/// `ln(N / docs containing term)`, or 0 when no document contains it.
///
/// Containment is a case-insensitive substring test.
pub fn inverse_document_frequency<S: AsRef<str>>(term: &str, documents: &[S]) -> f64 {
    let term = term.to_lowercase();
    let with_term = documents
        .iter()
        .filter(|doc| doc.as_ref().to_lowercase().contains(&term))
        .count();

    if with_term == 0 {
        return 0.0;
    }
    (documents.len() as f64 / with_term as f64).ln()
}

/// `tf(term, document) × idf(term, documents)`.
pub fn tf_idf<S: AsRef<str>>(term: &str, document: &str, documents: &[S]) -> f64 {
    term_frequency(term, document) * inverse_document_frequency(term, documents)
}

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "after", "again", "all", "am", "an", "and", "any", "are", "as",
        "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
        "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few",
        "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
        "him", "his", "how", "i", "if", "in", "into", "is", "it", "its", "just", "me", "more",
        "most", "my", "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or",
        "other", "our", "ours", "out", "over", "own", "same", "she", "should", "so", "some",
        "such", "than", "that", "the", "their", "them", "then", "there", "these", "they",
        "this", "those", "through", "to", "too", "under", "until", "up", "very", "was", "we",
        "were", "what", "when", "where", "which", "while", "who", "whom", "why", "will",
        "with", "would", "you", "your", "yours",
    ]
    .into_iter()
    .collect()
});

/// Lowercase Unicode words with English stopwords removed.
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words()
        .map(str::to_lowercase)
        .filter(|word| !STOPWORDS.contains(word.as_str()))
        .collect()
}

/// An in-memory TF-IDF corpus.
///
/// Scores follow the usual `natural`-style formula:
/// `tfidf(q, d) = Σ tf(t, d) · (1 + ln(N / (1 + df(t))))` over query tokens,
/// with `tf` the raw count of `t` in `d`.
///
/// # Example
/// ```
/// use impactmatch_matching::tfidf::TfIdfIndex;
///
/// let mut index = TfIdfIndex::new();
/// index.add_document("teach children to read");
/// index.add_document("plant trees in the city");
///
/// let scores = index.tfidfs("reading and teaching children");
/// assert!(scores[0] > scores[1]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TfIdfIndex {
    documents: Vec<HashMap<String, usize>>,
}

impl TfIdfIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document and return its index.
    pub fn add_document(&mut self, text: &str) -> usize {
        let mut counts = HashMap::new();
        for token in tokenize(text) {
            *counts.entry(token).or_insert(0) += 1;
        }
        self.documents.push(counts);
        self.documents.len() - 1
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True if no documents were added.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Raw count of `term` in document `index`.
    pub fn tf(&self, term: &str, index: usize) -> usize {
        self.documents
            .get(index)
            .and_then(|doc| doc.get(term))
            .copied()
            .unwrap_or(0)
    }

    /// Smoothed inverse document frequency of `term`.
    pub fn idf(&self, term: &str) -> f64 {
        let with_term = self.documents.iter().filter(|doc| doc.contains_key(term)).count();
        1.0 + (self.documents.len() as f64 / (1 + with_term) as f64).ln()
    }

    /// Score of `query` against document `index`. Out-of-range indices score 0.
    pub fn tfidf(&self, query: &str, index: usize) -> f64 {
        tokenize(query)
            .iter()
            .map(|term| self.tf(term, index) as f64 * self.idf(term))
            .sum()
    }

    /// Score of `query` against every document, in insertion order.
    pub fn tfidfs(&self, query: &str) -> Vec<f64> {
        let terms = tokenize(query);
        let idfs: Vec<f64> = terms.iter().map(|term| self.idf(term)).collect();

        (0..self.documents.len())
            .map(|index| {
                terms
                    .iter()
                    .zip(&idfs)
                    .map(|(term, idf)| self.tf(term, index) as f64 * idf)
                    .sum()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_frequency() {
        assert_eq!(term_frequency("food", "Food drive food bank"), 0.5);
        assert_eq!(term_frequency("food", ""), 0.0);
        assert_eq!(term_frequency("tree", "food drive"), 0.0);
    }

    #[test]
    fn test_inverse_document_frequency() {
        let docs = ["education drive", "food bank", "education camp", "tree planting"];
        assert!((inverse_document_frequency("Education", &docs) - 2f64.ln()).abs() < 1e-12);
        assert_eq!(inverse_document_frequency("music", &docs), 0.0);
        assert_eq!(inverse_document_frequency::<&str>("music", &[]), 0.0);
    }

    #[test]
    fn test_tf_idf() {
        let docs = vec!["education drive".to_string(), "food bank".to_string()];
        let score = tf_idf("education", &docs[0], &docs);
        assert!((score - 0.5 * 2f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_tokenize_drops_stopwords_and_punctuation() {
        assert_eq!(
            tokenize("Teach the kids, and plant TREES!"),
            vec!["teach", "kids", "plant", "trees"]
        );
    }

    #[test]
    fn test_index_tf_and_idf() {
        let mut index = TfIdfIndex::new();
        index.add_document("food food bank");
        index.add_document("food drive");
        index.add_document("tree planting");

        assert_eq!(index.len(), 3);
        assert_eq!(index.tf("food", 0), 2);
        assert_eq!(index.tf("food", 2), 0);
        assert_eq!(index.tf("food", 99), 0);
        // 1 + ln(3 / 3)
        assert!((index.idf("food") - 1.0).abs() < 1e-12);
        // 1 + ln(3 / 1)
        assert!((index.idf("music") - (1.0 + 3f64.ln())).abs() < 1e-12);
    }

    #[test]
    fn test_tfidfs_matches_tfidf() {
        let mut index = TfIdfIndex::new();
        index.add_document("community kitchen feeding the homeless");
        index.add_document("coding classes for kids");
        index.add_document("kitchen garden for schools");

        let query = "kitchen homeless";
        let all = index.tfidfs(query);
        for (i, score) in all.iter().enumerate() {
            assert!((score - index.tfidf(query, i)).abs() < 1e-12);
        }
        assert!(all[0] > all[2]);
        assert_eq!(all[1], 0.0);
    }

    #[test]
    fn test_empty_index() {
        let index = TfIdfIndex::new();
        assert!(index.is_empty());
        assert!(index.tfidfs("anything").is_empty());
        assert_eq!(index.tfidf("anything", 0), 0.0);
    }
}
