//! WASM bindings for the matching engine.
//!
//! Profiles and causes cross the boundary as JSON strings. Malformed
//! input yields an empty JSON value rather than a thrown error.

use crate::{MatchLevel, MatchingEngine, Profile};
use wasm_bindgen::prelude::*;

/// Score a volunteer against an NGO.
///
/// # Arguments
/// * `volunteer_json` - Volunteer profile as JSON
/// * `ngo_json` - NGO profile as JSON
///
/// # Returns
/// The match result as JSON, or `{}` if either profile fails to parse
#[wasm_bindgen]
pub fn match_profiles(volunteer_json: &str, ngo_json: &str) -> String {
    let (Ok(volunteer), Ok(ngo)) = (
        serde_json::from_str::<Profile>(volunteer_json),
        serde_json::from_str::<Profile>(ngo_json),
    ) else {
        return "{}".to_string();
    };

    let result = MatchingEngine::new().calculate_match(&volunteer, &ngo);
    serde_json::to_string(&result).unwrap_or_else(|_| "{}".to_string())
}

/// Rank NGOs for a volunteer.
///
/// # Arguments
/// * `volunteer_json` - Volunteer profile as JSON
/// * `ngos_json` - JSON array of NGO profiles
/// * `max_results` - Maximum results to return (0 for all)
#[wasm_bindgen]
pub fn rank_ngos(volunteer_json: &str, ngos_json: &str, max_results: usize) -> String {
    let (Ok(volunteer), Ok(ngos)) = (
        serde_json::from_str::<Profile>(volunteer_json),
        serde_json::from_str::<Vec<Profile>>(ngos_json),
    ) else {
        return "[]".to_string();
    };

    let mut ranked = MatchingEngine::new().match_volunteer_with_ngos(&volunteer, &ngos);
    if max_results > 0 {
        ranked.truncate(max_results);
    }
    serde_json::to_string(&ranked).unwrap_or_else(|_| "[]".to_string())
}

/// Level label for a 0-100 score, e.g. `"VERY HIGH"`.
#[wasm_bindgen]
pub fn match_level(score: u8) -> String {
    MatchLevel::from_score(score).as_str().to_string()
}

/// Suggest causes for a search query.
///
/// Returns the suggestion response as JSON, or `{}` on a blank query or
/// unparseable causes.
#[wasm_bindgen]
pub fn suggest(query: &str, causes_json: &str, max_results: usize) -> String {
    let Ok(causes) = serde_json::from_str::<Vec<crate::Cause>>(causes_json) else {
        return "{}".to_string();
    };
    let limit = (max_results > 0).then_some(max_results);

    crate::suggest_causes(query, &causes, limit)
        .and_then(|response| Ok(serde_json::to_string(&response)?))
        .unwrap_or_else(|_| "{}".to_string())
}
