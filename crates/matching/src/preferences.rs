//! City and category preference filtering for the personalized feed.
//!
//! Filtering narrows the cause list to a user's selected cities and
//! categories. Ranking afterwards is a passthrough that stamps every
//! cause with `relevanceScore = 0`; no ordering is applied yet.

use crate::profile::Cause;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A user's saved feed preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Category names; empty means any category
    #[serde(default)]
    pub selected_categories: Vec<String>,
    /// City names; empty means any city
    #[serde(default)]
    pub selected_cities: Vec<String>,
}

impl Preferences {
    /// Preferences restricted to the given cities.
    pub fn cities<I, S>(cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected_cities: cities.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Also restrict to the given categories.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// True when neither cities nor categories are selected.
    pub fn is_empty(&self) -> bool {
        self.selected_categories.is_empty() && self.selected_cities.is_empty()
    }
}

/// A cause annotated with its relevance to the user's preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizedCause {
    /// The cause, unchanged
    #[serde(flatten)]
    pub cause: Cause,
    /// Always 0 until a ranking is wired in
    pub relevance_score: f64,
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

fn normalized_set(values: &[String]) -> HashSet<String> {
    values.iter().map(|v| normalize(v)).collect()
}

/// Keep causes whose city and category are both selected.
///
/// An empty selection does not restrict its field. Comparison ignores
/// case and surrounding whitespace.
pub fn filter_causes_by_preferences(causes: &[Cause], preferences: &Preferences) -> Vec<Cause> {
    if preferences.is_empty() {
        tracing::debug!(
            total = causes.len(),
            "No preferences selected, returning all causes unfiltered"
        );
        return causes.to_vec();
    }

    let cities = normalized_set(&preferences.selected_cities);
    let categories = normalized_set(&preferences.selected_categories);

    let filtered: Vec<Cause> = causes
        .iter()
        .filter(|cause| {
            let city_match = cities.is_empty() || cities.contains(&normalize(&cause.city));
            let category_match =
                categories.is_empty() || categories.contains(&normalize(&cause.category));

            if !city_match || !category_match {
                tracing::debug!(
                    cause = %cause.name,
                    city = %cause.city,
                    category = %cause.category,
                    reason = if city_match { "category mismatch" } else { "city mismatch" },
                    "Filtered out cause"
                );
            }
            city_match && category_match
        })
        .cloned()
        .collect();

    tracing::debug!(
        total = causes.len(),
        passed = filtered.len(),
        "Applied preference filter"
    );
    filtered
}

/// Attach a relevance score to each cause without reordering.
pub fn rank_causes_by_preferences(causes: Vec<Cause>) -> Vec<PersonalizedCause> {
    causes
        .into_iter()
        .map(|cause| PersonalizedCause {
            cause,
            relevance_score: 0.0,
        })
        .collect()
}

/// Filter by preferences, then rank.
///
/// # Example
/// ```
/// use impactmatch_matching::{personalized_causes, Cause, Preferences};
///
/// let causes = vec![
///     Cause::new("Beach Cleanup", "environment", "Chennai"),
///     Cause::new("Food Bank", "hunger relief", " bangalore "),
/// ];
/// let feed = personalized_causes(&causes, &Preferences::cities(["Bangalore"]));
///
/// assert_eq!(feed.len(), 1);
/// assert_eq!(feed[0].cause.name, "Food Bank");
/// assert_eq!(feed[0].relevance_score, 0.0);
/// ```
pub fn personalized_causes(causes: &[Cause], preferences: &Preferences) -> Vec<PersonalizedCause> {
    rank_causes_by_preferences(filter_causes_by_preferences(causes, preferences))
}
