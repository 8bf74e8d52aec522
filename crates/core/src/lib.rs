//! Core utilities for ImpactMatch tools
//!
//! This crate provides shared functionality used by the CLI and any other
//! front end built on the matching engine:
//!
//! - **Error handling**: Structured errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with validation
//! - **Validation**: A fluent validator for config values and user input
//!
//! # Example
//!
//! ```rust,no_run
//! use impactmatch_core::config::Config;
//! use impactmatch_matching::MatchingEngine;
//!
//! let config = Config::load(None)?;
//! let engine = MatchingEngine::with_settings(config.schema.matching)?;
//! # Ok::<(), impactmatch_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::validation::{ValidationResult, Validator};
}
