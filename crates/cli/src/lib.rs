//! Terminal output for the ImpactMatch CLI
//!
//! Provides shared CLI functionality:
//! - Status messages
//! - Match results with score bars and colored levels

#![warn(missing_docs)]

pub mod output;
