//! Free-text cause discovery.
//!
//! Both entry points score causes with a [`TfIdfIndex`] whose first
//! document is the search text itself, so the query's own terms count
//! toward document frequency.

use crate::error::{MatchError, Result};
use crate::nearby::nearby_cities;
use crate::profile::{Cause, Profile};
use crate::tfidf::TfIdfIndex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Default number of discover results.
pub const DEFAULT_DISCOVER_LIMIT: usize = 10;

/// Default number of suggestions.
pub const DEFAULT_SUGGEST_LIMIT: usize = 5;

/// Options for [`discover_causes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverOptions {
    /// Maximum number of results
    pub limit: usize,
    /// Score every cause when none is near the volunteer
    pub fallback_to_all: bool,
}

impl Default for DiscoverOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_DISCOVER_LIMIT,
            fallback_to_all: false,
        }
    }
}

/// A cause with its text similarity to the search, as a percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// The matching cause
    #[serde(flatten)]
    pub cause: Cause,
    /// 0 to 100, two decimals
    pub similarity: f64,
}

/// Result of [`suggest_causes`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub query: String,
    pub suggestions: Vec<Suggestion>,
    pub message: String,
}

/// Causes near the volunteer, ranked by how well their text matches the
/// volunteer's interests.
///
/// Only causes in the volunteer's city or its neighbours are scored. When
/// none are nearby the result is empty unless `fallback_to_all` is set.
pub fn discover_causes(volunteer: &Profile, causes: &[Cause], options: DiscoverOptions) -> Vec<Suggestion> {
    let cities: Vec<String> = nearby_cities(&volunteer.city)
        .iter()
        .map(|c| c.to_lowercase())
        .collect();

    let mut candidates: Vec<&Cause> = causes
        .iter()
        .filter(|cause| cities.contains(&cause.city.trim().to_lowercase()))
        .collect();

    if candidates.is_empty() {
        if !options.fallback_to_all {
            tracing::debug!(city = %volunteer.city, "No nearby causes to discover");
            return Vec::new();
        }
        tracing::debug!(city = %volunteer.city, "No nearby causes, scoring all causes");
        candidates = causes.iter().collect();
    }

    let query = volunteer.interests.to_lowercase();
    let scored = score_candidates(&query, &candidates, |cause| {
        format!("{} {} {}", cause.name, cause.description, cause.category)
    });

    let mut ranked: Vec<Suggestion> = candidates
        .into_iter()
        .zip(scored)
        .map(|(cause, similarity)| Suggestion {
            cause: cause.clone(),
            similarity,
        })
        .collect();
    sort_by_similarity(&mut ranked);
    ranked.truncate(options.limit);

    tracing::debug!(results = ranked.len(), "Discovered causes");
    ranked
}

/// Suggest causes for a free-text search.
///
/// Causes with no term overlap are dropped. The message reports how many
/// suggestions came back.
///
/// # Errors
/// Returns [`MatchError::InvalidQuery`] when the query is blank.
///
/// # Example
/// ```
/// use impactmatch_matching::{suggest_causes, Cause};
///
/// let causes = vec![
///     Cause::new("Beach Cleanup", "environment", "Chennai"),
///     Cause::new("Night School", "education", "Pune"),
/// ];
/// let response = suggest_causes("teach at a night school", &causes, None).unwrap();
///
/// assert_eq!(response.suggestions.len(), 1);
/// assert_eq!(response.message, "I found 1 causes that might interest you!");
/// ```
pub fn suggest_causes(query: &str, causes: &[Cause], limit: Option<usize>) -> Result<SuggestResponse> {
    if query.trim().is_empty() {
        return Err(MatchError::InvalidQuery("query must not be empty".into()));
    }

    let candidates: Vec<&Cause> = causes.iter().collect();
    let scored = score_candidates(&query.to_lowercase(), &candidates, |cause| {
        format!(
            "{} {} {} {}",
            cause.name, cause.description, cause.category, cause.city
        )
    });

    let mut suggestions: Vec<Suggestion> = candidates
        .into_iter()
        .zip(scored)
        .filter(|(_, similarity)| *similarity > 0.0)
        .map(|(cause, similarity)| Suggestion {
            cause: cause.clone(),
            similarity,
        })
        .collect();
    sort_by_similarity(&mut suggestions);
    suggestions.truncate(limit.unwrap_or(DEFAULT_SUGGEST_LIMIT));

    let message = if suggestions.is_empty() {
        "I couldn't find any matching causes. Try a different search!".to_string()
    } else {
        format!("I found {} causes that might interest you!", suggestions.len())
    };

    tracing::debug!(query, results = suggestions.len(), "Suggested causes");
    Ok(SuggestResponse {
        query: query.to_string(),
        suggestions,
        message,
    })
}

/// Percent similarity of `query` to each candidate's document text.
fn score_candidates<F>(query: &str, candidates: &[&Cause], document: F) -> Vec<f64>
where
    F: Fn(&Cause) -> String,
{
    let mut index = TfIdfIndex::new();
    index.add_document(query);
    for cause in candidates {
        index.add_document(&document(cause).to_lowercase());
    }

    // document 0 is the query itself
    index
        .tfidfs(query)
        .into_iter()
        .skip(1)
        .map(as_percent)
        .collect()
}

fn as_percent(score: f64) -> f64 {
    ((score * 100.0).min(100.0) * 100.0).round() / 100.0
}

fn sort_by_similarity(items: &mut [Suggestion]) {
    items.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn causes() -> Vec<Cause> {
        vec![
            Cause::new("Tree Planting", "environment", "Bangalore")
                .with_description("Plant native trees along lakes"),
            Cause::new("Reading Buddies", "education", "Chennai")
                .with_description("Help children practice reading"),
            Cause::new("Literacy Drive", "education", "Delhi")
                .with_description("Teach adults reading and writing"),
            Cause::new("Animal Shelter", "animal welfare", "Pune")
                .with_description("Walk and feed rescued dogs"),
        ]
    }

    #[test]
    fn test_discover_limits_to_nearby_cities() {
        let volunteer = Profile::new("reading, children", "Bangalore");
        let found = discover_causes(&volunteer, &causes(), DiscoverOptions::default());

        let names: Vec<_> = found.iter().map(|s| s.cause.name.as_str()).collect();
        assert_eq!(names.len(), 3);
        assert!(!names.contains(&"Literacy Drive"));
        assert_eq!(names[0], "Reading Buddies");
        assert!(found[0].similarity > 0.0);
        assert!(found[0].similarity <= 100.0);
    }

    #[test]
    fn test_discover_no_nearby_causes() {
        let volunteer = Profile::new("reading", "Kolkata");
        assert!(discover_causes(&volunteer, &causes(), DiscoverOptions::default()).is_empty());

        let options = DiscoverOptions {
            fallback_to_all: true,
            ..DiscoverOptions::default()
        };
        let found = discover_causes(&volunteer, &causes(), options);
        assert_eq!(found.len(), 4);
    }

    #[test]
    fn test_discover_respects_limit() {
        let volunteer = Profile::new("trees", "Bangalore");
        let options = DiscoverOptions {
            limit: 1,
            ..DiscoverOptions::default()
        };
        let found = discover_causes(&volunteer, &causes(), options);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].cause.name, "Tree Planting");
    }

    #[test]
    fn test_suggest_finds_matches() {
        let response = suggest_causes("reading", &causes(), None).unwrap();
        assert_eq!(response.query, "reading");
        assert_eq!(response.suggestions.len(), 2);
        assert_eq!(response.message, "I found 2 causes that might interest you!");
        for pair in response.suggestions.windows(2) {
            assert!(pair[0].similarity >= pair[1].similarity);
        }
    }

    #[test]
    fn test_suggest_matches_city() {
        let response = suggest_causes("pune", &causes(), None).unwrap();
        assert_eq!(response.suggestions.len(), 1);
        assert_eq!(response.suggestions[0].cause.name, "Animal Shelter");
    }

    #[test]
    fn test_suggest_nothing_found() {
        let response = suggest_causes("astronomy", &causes(), None).unwrap();
        assert!(response.suggestions.is_empty());
        assert_eq!(
            response.message,
            "I couldn't find any matching causes. Try a different search!"
        );
    }

    #[test]
    fn test_suggest_rejects_blank_query() {
        let err = suggest_causes("   ", &causes(), None).unwrap_err();
        assert!(matches!(err, MatchError::InvalidQuery(_)));
    }

    #[test]
    fn test_similarity_is_capped_and_rounded() {
        assert_eq!(as_percent(3.0), 100.0);
        assert_eq!(as_percent(0.123456), 12.35);
        assert_eq!(as_percent(0.0), 0.0);
    }
}
