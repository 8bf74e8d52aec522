//! Configuration loading and schema definitions
//!
//! TOML configuration for scoring, discovery, suggestions and logging.

mod loader;
mod schema;

pub use loader::{Config, CONFIG_ENV_VAR};
pub use schema::*;
