//! Configuration schema definitions
//!
//! Every section and field has a default, so a partial file is valid.

use impactmatch_matching::{DiscoverOptions, EngineSettings};
use serde::{Deserialize, Serialize};

/// Top-level sections recognised in a config file.
pub const KNOWN_SECTIONS: &[&str] = &["matching", "discover", "suggest", "logging"];

/// Root configuration schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Scoring engine weights, thresholds and bonuses
    #[serde(default)]
    pub matching: EngineSettings,

    #[serde(default)]
    pub discover: DiscoverConfig,

    #[serde(default)]
    pub suggest: SuggestConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Cause discovery configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoverConfig {
    /// Maximum number of discovered causes
    #[serde(default = "default_discover_limit")]
    pub limit: usize,

    /// Score all causes when none are near the volunteer
    #[serde(default)]
    pub fallback_to_all: bool,
}

impl Default for DiscoverConfig {
    fn default() -> Self {
        Self {
            limit: default_discover_limit(),
            fallback_to_all: false,
        }
    }
}

impl DiscoverConfig {
    /// Options for cause discovery
    pub fn to_options(&self) -> DiscoverOptions {
        DiscoverOptions {
            limit: self.limit,
            fallback_to_all: self.fallback_to_all,
        }
    }
}

fn default_discover_limit() -> usize {
    impactmatch_matching::DEFAULT_DISCOVER_LIMIT
}

/// Suggestion configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestConfig {
    /// Maximum number of suggestions
    #[serde(default = "default_suggest_limit")]
    pub limit: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            limit: default_suggest_limit(),
        }
    }
}

fn default_suggest_limit() -> usize {
    impactmatch_matching::DEFAULT_SUGGEST_LIMIT
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn or error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: compact or json
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}
