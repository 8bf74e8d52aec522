//! Weighted multi-factor volunteer ↔ NGO scoring.
//!
//! Four factors are scored independently into `[0, 1]`:
//! cause alignment, skill alignment, location and availability.
//! The final score is their weighted sum on a 0-100 scale plus an
//! optional experience boost, clamped and rounded.

use crate::error::{MatchError, Result};
use crate::keywords::{category_skills, detect_categories, extract_known_skills, SKILL_KEYWORDS};
use crate::level::MatchLevel;
use crate::profile::Profile;
use crate::text::{jaccard_similarity, loosely_contains, parse_interests, parse_unique};
use serde::{Deserialize, Serialize};

/// Impact score is divided by this to get boost points.
const EXPERIENCE_SCALE: f64 = 100.0;

/// Tolerance when checking that weights sum to one.
const WEIGHT_EPSILON: f64 = 1e-6;

/// Relative weight of each factor. Must sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    /// Cause/interest alignment
    pub cause: f64,
    /// Skill alignment
    pub skill: f64,
    /// Location alignment
    pub location: f64,
    /// Availability alignment
    pub availability: f64,
}

impl Weights {
    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.cause + self.skill + self.location + self.availability
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            cause: 0.40,
            skill: 0.30,
            location: 0.15,
            availability: 0.15,
        }
    }
}

/// Tunable parameters of the [`MatchingEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Factor weights
    pub weights: Weights,
    /// Interest pairs count only above this Jaccard similarity
    pub cause_similarity_threshold: f64,
    /// Skill/need pairs count only above this Jaccard similarity
    pub skill_similarity_threshold: f64,
    /// Added per skill that fits a detected NGO category
    pub category_skill_bonus: f64,
    /// Added per skill-dictionary word found in the NGO's interests
    pub skill_keyword_bonus: f64,
    /// Impact score above which the experience boost applies
    pub experience_threshold: f64,
    /// Cap on the experience boost, in score points
    pub max_experience_boost: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            weights: Weights::default(),
            cause_similarity_threshold: 0.5,
            skill_similarity_threshold: 0.4,
            category_skill_bonus: 0.8,
            skill_keyword_bonus: 0.3,
            experience_threshold: 100.0,
            max_experience_boost: 5.0,
        }
    }
}

impl EngineSettings {
    /// Check weights and thresholds.
    ///
    /// # Errors
    /// Returns [`MatchError::InvalidSettings`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        let w = &self.weights;
        let unit_fields = [
            ("weights.cause", w.cause),
            ("weights.skill", w.skill),
            ("weights.location", w.location),
            ("weights.availability", w.availability),
            ("cause_similarity_threshold", self.cause_similarity_threshold),
            ("skill_similarity_threshold", self.skill_similarity_threshold),
        ];
        for (field, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(MatchError::InvalidSettings(format!(
                    "{field} must be between 0 and 1, got {value}"
                )));
            }
        }

        if (w.sum() - 1.0).abs() > WEIGHT_EPSILON {
            return Err(MatchError::InvalidSettings(format!(
                "weights must sum to 1.0, got {:.4}",
                w.sum()
            )));
        }

        let non_negative = [
            ("category_skill_bonus", self.category_skill_bonus),
            ("skill_keyword_bonus", self.skill_keyword_bonus),
            ("experience_threshold", self.experience_threshold),
            ("max_experience_boost", self.max_experience_boost),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(MatchError::InvalidSettings(format!(
                    "{field} must be a non-negative number, got {value}"
                )));
            }
        }

        Ok(())
    }
}

/// Per-factor percentages. Informational; they do not sum to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    /// Cause/interest alignment, 0-100
    pub cause_alignment: u8,
    /// Skill alignment, 0-100
    pub skill_match: u8,
    /// Location alignment, 0-100
    pub location_match: u8,
    /// Availability alignment, 0-100
    pub availability_match: u8,
}

/// Outcome of scoring one volunteer against one NGO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Final score in `[0, 100]`
    pub match_score: u8,
    /// Level derived from the score
    pub match_level: MatchLevel,
    /// Ordered explanations
    pub reasons: Vec<String>,
    /// Per-factor percentages
    pub breakdown: Breakdown,
}

/// Normalized factor score with the terms that produced it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FactorScore {
    /// Score in `[0, 1]`
    pub score: f64,
    /// Matched interests or skills, first-seen order
    pub matches: Vec<String>,
}

/// Normalized factor score with an explanation when it counts as a match.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalScore {
    /// Score in `[0, 1]`
    pub score: f64,
    /// Set only when the factor matched
    pub reason: Option<String>,
}

impl SignalScore {
    fn matched(score: f64, reason: String) -> Self {
        Self { score, reason: Some(reason) }
    }

    fn unmatched(score: f64) -> Self {
        Self { score, reason: None }
    }
}

/// Scores volunteer profiles against NGO or cause profiles.
///
/// The engine holds only immutable settings. It is cheap to clone and
/// safe to share between threads.
///
/// # Example
/// ```
/// use impactmatch_matching::{MatchingEngine, MatchLevel, Profile};
///
/// let engine = MatchingEngine::new();
/// let volunteer = Profile::new("education, teaching, children", "Bangalore")
///     .with_skills("teaching, mentoring")
///     .with_availability("weekends");
/// let ngo = Profile::new("education", "Bangalore").with_availability("weekends");
///
/// let result = engine.calculate_match(&volunteer, &ngo);
/// assert!(result.match_level >= MatchLevel::Good);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MatchingEngine {
    settings: EngineSettings,
}

impl MatchingEngine {
    /// Creates an engine with default weights and thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with custom settings.
    ///
    /// # Errors
    /// Returns [`MatchError::InvalidSettings`] if the settings do not validate.
    pub fn with_settings(settings: EngineSettings) -> Result<Self> {
        if let Err(err) = settings.validate() {
            tracing::warn!(error = %err, "Rejected matching engine settings");
            return Err(err);
        }
        Ok(Self { settings })
    }

    /// The settings this engine scores with.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Score a volunteer against an NGO.
    pub fn calculate_match(&self, volunteer: &Profile, ngo: &Profile) -> MatchResult {
        let weights = &self.settings.weights;
        let mut total = 0.0;
        let mut reasons = Vec::new();

        let cause = self.match_causes(volunteer, ngo);
        total += cause.score * weights.cause * 100.0;
        if !cause.matches.is_empty() {
            reasons.push(format!("Shared interests: {}", cause.matches.join(", ")));
        }

        let skill = self.match_skills(volunteer, ngo);
        total += skill.score * weights.skill * 100.0;
        if !skill.matches.is_empty() {
            reasons.push(format!(
                "Your skills match their needs: {}",
                skill.matches.join(", ")
            ));
        }

        let location = self.match_location(volunteer, ngo);
        total += location.score * weights.location * 100.0;
        reasons.extend(location.reason.clone());

        let availability = self.match_availability(volunteer, ngo);
        total += availability.score * weights.availability * 100.0;
        reasons.extend(availability.reason.clone());

        if let Some(boost) = self.experience_boost(volunteer) {
            total += boost;
            reasons.push(format!(
                "Experienced volunteer (+{}% boost)",
                boost.round() as u32
            ));
        }

        let match_score = total.clamp(0.0, 100.0).round() as u8;

        MatchResult {
            match_score,
            match_level: MatchLevel::from_score(match_score),
            reasons,
            breakdown: Breakdown {
                cause_alignment: as_percent(cause.score),
                skill_match: as_percent(skill.score),
                location_match: as_percent(location.score),
                availability_match: as_percent(availability.score),
            },
        }
    }

    /// Interest alignment: Jaccard similarity over every interest pair.
    pub fn match_causes(&self, volunteer: &Profile, ngo: &Profile) -> FactorScore {
        let volunteer_interests = parse_interests(&volunteer.interests);
        let ngo_causes = parse_interests(&ngo.interests);

        let mut total = 0.0;
        let mut matches = Vec::new();

        for interest in &volunteer_interests {
            for cause in &ngo_causes {
                let similarity = jaccard_similarity(interest, cause);
                if similarity > self.settings.cause_similarity_threshold {
                    total += similarity;
                    push_unique(&mut matches, cause);
                }
            }
        }

        FactorScore {
            score: normalize(total, volunteer_interests.len()),
            matches,
        }
    }

    /// Skill alignment against the NGO's needs and categories.
    pub fn match_skills(&self, volunteer: &Profile, ngo: &Profile) -> FactorScore {
        let volunteer_skills = match volunteer.stated_skills() {
            Some(skills) => parse_unique(skills),
            None => extract_known_skills(&volunteer.interests),
        };
        if volunteer_skills.is_empty() {
            return FactorScore::default();
        }

        let mut needs = ngo.stated_skills().map(parse_unique).unwrap_or_default();
        for skill in extract_known_skills(&ngo.interests) {
            if !needs.contains(&skill) {
                needs.push(skill);
            }
        }

        let mut categories: Vec<&'static str> = Vec::new();
        for token in parse_interests(&ngo.interests) {
            for category in detect_categories(&token) {
                if !categories.contains(&category) {
                    categories.push(category);
                }
            }
        }

        let ngo_text = ngo.interests.to_lowercase();
        let mut total = 0.0;
        let mut matches = Vec::new();

        for skill in &volunteer_skills {
            for need in &needs {
                let similarity = jaccard_similarity(skill, need);
                if similarity > self.settings.skill_similarity_threshold {
                    total += similarity;
                    push_unique(&mut matches, skill);
                }
            }

            for category in &categories {
                let fits = category_skills(category)
                    .is_some_and(|wanted| wanted.iter().any(|w| loosely_contains(skill, w)));
                if fits {
                    total += self.settings.category_skill_bonus;
                    push_unique(&mut matches, skill);
                }
            }

            for (skill_type, cause_words) in SKILL_KEYWORDS {
                if !skill.contains(skill_type) {
                    continue;
                }
                for word in *cause_words {
                    if ngo_text.contains(word) {
                        total += self.settings.skill_keyword_bonus;
                        push_unique(&mut matches, skill_type);
                    }
                }
            }
        }

        FactorScore {
            score: normalize(total, volunteer_skills.len()),
            matches,
        }
    }

    /// Location alignment by city name.
    pub fn match_location(&self, volunteer: &Profile, ngo: &Profile) -> SignalScore {
        let volunteer_city = volunteer.city.trim();
        let ngo_city = ngo.city.trim();
        let vol = volunteer_city.to_lowercase();
        let other = ngo_city.to_lowercase();

        if vol.is_empty() || other.is_empty() {
            return SignalScore::unmatched(0.5);
        }
        if vol == other {
            return SignalScore::matched(1.0, format!("Both in {volunteer_city}"));
        }
        if vol.contains(&other) || other.contains(&vol) {
            return SignalScore::matched(0.7, format!("Nearby location ({ngo_city})"));
        }
        SignalScore::unmatched(0.3)
    }

    /// Availability alignment. NGOs are treated as always flexible.
    pub fn match_availability(&self, volunteer: &Profile, _ngo: &Profile) -> SignalScore {
        let availability = volunteer.availability.to_lowercase();

        if availability.contains("weekends") {
            SignalScore::matched(1.0, "Weekend availability matches".to_string())
        } else if availability.contains("weekdays") || availability.contains("flexible") {
            SignalScore::matched(0.9, "Flexible availability".to_string())
        } else {
            SignalScore::unmatched(0.6)
        }
    }

    /// Extra score points for volunteers with a track record.
    pub fn experience_boost(&self, volunteer: &Profile) -> Option<f64> {
        volunteer
            .impact_score
            .filter(|score| *score > self.settings.experience_threshold)
            .map(|score| (score / EXPERIENCE_SCALE).min(self.settings.max_experience_boost))
    }
}

#[inline]
fn normalize(total: f64, count: usize) -> f64 {
    (total / count.max(1) as f64).min(1.0)
}

#[inline]
fn as_percent(score: f64) -> u8 {
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}

fn push_unique(matches: &mut Vec<String>, value: &str) {
    if !matches.iter().any(|m| m == value) {
        matches.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volunteer() -> Profile {
        Profile::new("education, teaching, children", "Bangalore")
            .with_skills("teaching, mentoring")
            .with_availability("weekends")
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        assert!((Weights::default().sum() - 1.0).abs() < 1e-9);
        assert!(EngineSettings::default().validate().is_ok());
    }

    #[test]
    fn test_aligned_ngo_scores_high() {
        let engine = MatchingEngine::new();
        let ngo = Profile::new("education", "Bangalore").with_availability("weekends");
        let result = engine.calculate_match(&volunteer(), &ngo);

        // 40 * 1/3 + 30 * 0.95 + 15 + 15
        assert_eq!(result.match_score, 72);
        assert_eq!(result.match_level, MatchLevel::High);
        assert_eq!(
            result.reasons,
            vec![
                "Shared interests: education",
                "Your skills match their needs: teaching, mentoring",
                "Both in Bangalore",
                "Weekend availability matches",
            ]
        );
        assert_eq!(
            result.breakdown,
            Breakdown {
                cause_alignment: 33,
                skill_match: 95,
                location_match: 100,
                availability_match: 100,
            }
        );
    }

    #[test]
    fn test_unrelated_ngo_scores_low() {
        let engine = MatchingEngine::new();
        let ngo = Profile::new("healthcare", "Mumbai").with_availability("weekdays");
        let result = engine.calculate_match(&volunteer(), &ngo);

        // 0 + 0 + 15 * 0.3 + 15
        assert_eq!(result.match_score, 20);
        assert_eq!(result.match_level, MatchLevel::Low);
        assert_eq!(result.reasons, vec!["Weekend availability matches"]);
        assert_eq!(result.breakdown.location_match, 30);
    }

    #[test]
    fn test_empty_profiles_are_neutral() {
        let engine = MatchingEngine::new();
        let result = engine.calculate_match(&Profile::default(), &Profile::default());

        // 15 * 0.5 + 15 * 0.6
        assert_eq!(result.match_score, 17);
        assert!(result.reasons.is_empty());
        assert_eq!(result.breakdown.cause_alignment, 0);
        assert_eq!(result.breakdown.skill_match, 0);
        assert_eq!(result.breakdown.location_match, 50);
        assert_eq!(result.breakdown.availability_match, 60);
    }

    #[test]
    fn test_cause_match_normalizes_by_volunteer_interests() {
        let engine = MatchingEngine::new();
        let vol = Profile::new("child welfare, education", "");
        let ngo = Profile::new("Child Welfare, education, health", "");
        let score = engine.match_causes(&vol, &ngo);

        assert_eq!(score.score, 1.0);
        assert_eq!(score.matches, vec!["child welfare", "education"]);
    }

    #[test]
    fn test_cause_match_ignores_weak_overlap() {
        let engine = MatchingEngine::new();
        // "child welfare" vs "child education" has Jaccard 1/3
        let vol = Profile::new("child welfare", "");
        let ngo = Profile::new("child education", "");
        assert_eq!(engine.match_causes(&vol, &ngo), FactorScore::default());
    }

    #[test]
    fn test_skills_extracted_from_interests_without_skill_field() {
        let engine = MatchingEngine::new();
        let vol = Profile::new("coding, social media", "");
        let ngo = Profile::new("technology, digital literacy", "");
        let score = engine.match_skills(&vol, &ngo);

        // coding: 0.8 category + 2 * 0.3 keyword, social media: 0.3 keyword
        assert!((score.score - 0.85).abs() < 1e-9);
        assert!(score.matches.contains(&"coding".to_string()));
        assert!(score.matches.contains(&"social media".to_string()));
    }

    #[test]
    fn test_skill_match_against_ngo_stated_needs() {
        let engine = MatchingEngine::new();
        let vol = Profile::new("", "").with_skills("grant writing, accounting");
        let ngo = Profile::new("", "").with_skills("grant writing");
        let score = engine.match_skills(&vol, &ngo);

        // one exact need match across two skills
        assert!((score.score - 0.5).abs() < 1e-9);
        assert_eq!(score.matches, vec!["grant writing"]);
    }

    #[test]
    fn test_skill_match_without_skills_is_zero() {
        let engine = MatchingEngine::new();
        let vol = Profile::new("astronomy", "");
        let ngo = Profile::new("technology", "");
        assert_eq!(engine.match_skills(&vol, &ngo).score, 0.0);
    }

    #[test]
    fn test_location_rules() {
        let engine = MatchingEngine::new();
        let at = |city: &str| Profile::new("", city);

        let exact = engine.match_location(&at("  bangalore "), &at("Bangalore"));
        assert_eq!(exact.score, 1.0);
        assert_eq!(exact.reason.as_deref(), Some("Both in bangalore"));

        let nearby = engine.match_location(&at("New Delhi"), &at("Delhi"));
        assert_eq!(nearby.score, 0.7);
        assert_eq!(nearby.reason.as_deref(), Some("Nearby location (Delhi)"));

        assert_eq!(engine.match_location(&at(""), &at("Delhi")).score, 0.5);
        assert_eq!(engine.match_location(&at("Pune"), &at("Mumbai")).score, 0.3);
        assert!(engine.match_location(&at("Pune"), &at("Mumbai")).reason.is_none());
    }

    #[test]
    fn test_availability_rules() {
        let engine = MatchingEngine::new();
        let ngo = Profile::default();
        let avail = |text: &str| Profile::default().with_availability(text);

        assert_eq!(engine.match_availability(&avail("Weekends only"), &ngo).score, 1.0);
        assert_eq!(engine.match_availability(&avail("weekdays"), &ngo).score, 0.9);
        assert_eq!(engine.match_availability(&avail("Flexible"), &ngo).score, 0.9);
        assert_eq!(engine.match_availability(&avail("evenings"), &ngo).score, 0.6);
    }

    #[test]
    fn test_experience_boost() {
        let engine = MatchingEngine::new();
        let base = Profile::default();

        assert_eq!(engine.experience_boost(&base), None);
        assert_eq!(engine.experience_boost(&base.clone().with_impact_score(100.0)), None);
        assert_eq!(engine.experience_boost(&base.clone().with_impact_score(250.0)), Some(2.5));
        assert_eq!(engine.experience_boost(&base.with_impact_score(9000.0)), Some(5.0));
    }

    #[test]
    fn test_boost_adds_reason_and_points() {
        let engine = MatchingEngine::new();
        let ngo = Profile::new("education", "Bangalore");
        let plain = engine.calculate_match(&volunteer(), &ngo);
        let boosted = engine.calculate_match(&volunteer().with_impact_score(300.0), &ngo);

        assert_eq!(boosted.match_score, plain.match_score + 3);
        assert_eq!(
            boosted.reasons.last().map(String::as_str),
            Some("Experienced volunteer (+3% boost)")
        );
    }

    #[test]
    fn test_score_is_clamped_to_hundred() {
        let engine = MatchingEngine::new();
        let vol = Profile::new("education", "Pune")
            .with_skills("teaching")
            .with_availability("weekends")
            .with_impact_score(1000.0);
        let ngo = Profile::new("education", "Pune");
        let result = engine.calculate_match(&vol, &ngo);

        assert_eq!(result.match_score, 100);
        assert_eq!(result.match_level, MatchLevel::Excellent);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut settings = EngineSettings::default();
        settings.weights.cause = 0.9;
        let err = MatchingEngine::with_settings(settings).unwrap_err();
        assert!(err.to_string().contains("sum to 1.0"));

        let mut settings = EngineSettings::default();
        settings.skill_similarity_threshold = 1.5;
        assert!(MatchingEngine::with_settings(settings).is_err());

        let mut settings = EngineSettings::default();
        settings.max_experience_boost = f64::NAN;
        assert!(MatchingEngine::with_settings(settings).is_err());
    }

    #[test]
    fn test_custom_weights_change_score() {
        let settings = EngineSettings {
            weights: Weights {
                cause: 0.0,
                skill: 0.0,
                location: 1.0,
                availability: 0.0,
            },
            ..EngineSettings::default()
        };
        let engine = MatchingEngine::with_settings(settings).unwrap();
        let result = engine.calculate_match(&volunteer(), &Profile::new("", "Bangalore"));
        assert_eq!(result.match_score, 100);
    }
}
