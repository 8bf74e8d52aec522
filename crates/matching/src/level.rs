//! Human-readable match levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Match level, a step function over the final 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MatchLevel {
    /// Below 40
    #[serde(rename = "LOW")]
    Low,
    /// 40-49
    #[serde(rename = "FAIR")]
    Fair,
    /// 50-59
    #[serde(rename = "MODERATE")]
    Moderate,
    /// 60-69
    #[serde(rename = "GOOD")]
    Good,
    /// 70-79
    #[serde(rename = "HIGH")]
    High,
    /// 80-89
    #[serde(rename = "VERY HIGH")]
    VeryHigh,
    /// 90 and above
    #[serde(rename = "EXCELLENT")]
    Excellent,
}

impl MatchLevel {
    /// Classify a final match score.
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => MatchLevel::Excellent,
            80..=89 => MatchLevel::VeryHigh,
            70..=79 => MatchLevel::High,
            60..=69 => MatchLevel::Good,
            50..=59 => MatchLevel::Moderate,
            40..=49 => MatchLevel::Fair,
            _ => MatchLevel::Low,
        }
    }

    /// The label used in API responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchLevel::Low => "LOW",
            MatchLevel::Fair => "FAIR",
            MatchLevel::Moderate => "MODERATE",
            MatchLevel::Good => "GOOD",
            MatchLevel::High => "HIGH",
            MatchLevel::VeryHigh => "VERY HIGH",
            MatchLevel::Excellent => "EXCELLENT",
        }
    }
}

impl fmt::Display for MatchLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
