//! Volunteer-to-NGO matching for ImpactMatch.
//!
//! This crate provides:
//! - Weighted four-factor match scoring with reasons and a breakdown
//! - Batch ranking, parallel behind the `parallel` feature
//! - City and category preference filtering
//! - TF-IDF cause discovery and free-text suggestions
//! - A small nearby-city table with haversine distances

mod discover;
mod engine;
mod error;
mod level;
mod preferences;
mod profile;

pub mod batch;
pub mod keywords;
pub mod nearby;
pub mod text;
pub mod tfidf;

#[cfg(feature = "wasm")]
mod wasm;

pub use batch::{RankedCause, RankedMatch};
pub use discover::{
    discover_causes, suggest_causes, DiscoverOptions, SuggestResponse, Suggestion,
    DEFAULT_DISCOVER_LIMIT, DEFAULT_SUGGEST_LIMIT,
};
pub use engine::{Breakdown, EngineSettings, FactorScore, MatchResult, MatchingEngine, SignalScore, Weights};
pub use error::{MatchError, MatchErrorCode, Result};
pub use level::MatchLevel;
pub use nearby::{city_coordinates, distance_between_cities, haversine_distance, nearby_cities, Coordinate};
pub use preferences::{
    filter_causes_by_preferences, personalized_causes, rank_causes_by_preferences, PersonalizedCause,
    Preferences,
};
pub use profile::{Cause, Profile};

/// Score one volunteer against one NGO with default settings.
///
/// # Example
/// ```
/// use impactmatch_matching::{calculate_match, Profile};
///
/// let result = calculate_match(&Profile::new("sports", "Delhi"), &Profile::new("sports", "Delhi"));
/// assert!(result.match_score >= 50);
/// ```
pub fn calculate_match(volunteer: &Profile, ngo: &Profile) -> MatchResult {
    MatchingEngine::new().calculate_match(volunteer, ngo)
}
