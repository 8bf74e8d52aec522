//! Error types for the matching crate.

use thiserror::Error;

/// Result type alias for matching operations.
pub type Result<T> = std::result::Result<T, MatchError>;

/// Errors that can occur while configuring or running the matcher.
///
/// Scoring itself never fails: malformed profile content degrades to
/// neutral scores. Errors are limited to engine setup and input decoding.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Engine weights or thresholds are out of range
    #[error("Invalid engine settings: {0}")]
    InvalidSettings(String),

    /// Empty or unusable search query
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Error code for integration with impactmatch-core error handling.
/// Range: 11xxx for matching errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchErrorCode {
    /// Engine weights or thresholds are out of range
    InvalidSettings = 11001,
    /// Empty or unusable search query
    InvalidQuery = 11002,
    /// JSON parsing error
    JsonParsing = 11003,
}

impl MatchError {
    /// Returns the error code for this error.
    pub fn code(&self) -> MatchErrorCode {
        match self {
            MatchError::InvalidSettings(_) => MatchErrorCode::InvalidSettings,
            MatchError::InvalidQuery(_) => MatchErrorCode::InvalidQuery,
            MatchError::JsonError(_) => MatchErrorCode::JsonParsing,
        }
    }
}
