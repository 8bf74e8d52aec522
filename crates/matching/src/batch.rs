//! Batch scoring with optional parallelism.
//!
//! One volunteer is scored against many NGOs or causes and the results
//! come back sorted by score, highest first. Ties keep input order.

use crate::engine::{MatchResult, MatchingEngine};
use crate::profile::{Cause, Profile};
use serde::{Deserialize, Serialize};

/// An NGO profile with its match result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    /// The NGO that was scored
    pub ngo: Profile,
    /// Score, level, reasons and breakdown
    #[serde(flatten)]
    pub result: MatchResult,
}

/// A cause with its match result, for the discover feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCause {
    /// The cause that was scored
    pub cause: Cause,
    /// Score, level, reasons and breakdown
    #[serde(flatten)]
    pub result: MatchResult,
}

impl MatchingEngine {
    /// Score a volunteer against every NGO, best match first.
    ///
    /// # Example
    /// ```
    /// use impactmatch_matching::{MatchingEngine, Profile};
    ///
    /// let engine = MatchingEngine::new();
    /// let volunteer = Profile::new("education", "Pune");
    /// let ngos = vec![Profile::new("healthcare", "Delhi"), Profile::new("education", "Pune")];
    ///
    /// let ranked = engine.match_volunteer_with_ngos(&volunteer, &ngos);
    /// assert_eq!(ranked[0].ngo.interests, "education");
    /// ```
    pub fn match_volunteer_with_ngos(&self, volunteer: &Profile, ngos: &[Profile]) -> Vec<RankedMatch> {
        tracing::debug!(candidates = ngos.len(), "Ranking NGOs for volunteer");

        let mut ranked = score_all(ngos, |ngo| RankedMatch {
            ngo: ngo.clone(),
            result: self.calculate_match(volunteer, ngo),
        });
        ranked.sort_by(|a, b| b.result.match_score.cmp(&a.result.match_score));
        ranked
    }

    /// Score a volunteer against causes, using each cause's category as
    /// the NGO interests and its city as the NGO city.
    pub fn rank_causes(&self, volunteer: &Profile, causes: &[Cause]) -> Vec<RankedCause> {
        tracing::debug!(candidates = causes.len(), "Ranking causes for volunteer");

        let mut ranked = score_all(causes, |cause| RankedCause {
            cause: cause.clone(),
            result: self.calculate_match(volunteer, &cause.as_profile()),
        });
        ranked.sort_by(|a, b| b.result.match_score.cmp(&a.result.match_score));
        ranked
    }
}

/// Map every item, in parallel when the `parallel` feature is on.
/// Output order always matches input order.
fn score_all<T, R, F>(items: &[T], score: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        items.par_iter().map(score).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        items.iter().map(score).collect()
    }
}

/// Keep at most `limit` entries; `None` keeps everything.
pub fn truncate<T>(mut items: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(max) = limit {
        items.truncate(max);
    }
    items
}
