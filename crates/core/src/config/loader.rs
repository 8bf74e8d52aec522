//! Configuration file loading

use super::schema::{ConfigSchema, KNOWN_SECTIONS};
use crate::error::{Error, ErrorCode, Result, ResultExt};
use crate::validation::{unknown_sections, Validator};
use std::path::{Path, PathBuf};

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "IMPACTMATCH_CONFIG";

const LOCAL_CANDIDATES: &[&str] = &[".impactmatch.toml", "impactmatch.toml"];

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

const LOG_FORMATS: &[&str] = &["compact", "json"];

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or the standard locations,
    /// falling back to defaults.
    ///
    /// An explicit path, or one named by `IMPACTMATCH_CONFIG`, must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let required = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

        let config_path = match required {
            Some(p) if !p.exists() => return Err(Error::config_not_found(&p)),
            Some(p) => Some(p),
            None => find_config_file(),
        };

        match config_path {
            Some(p) => Self::load_from(&p),
            None => Ok(Self::default()),
        }
    }

    /// Load and validate a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file {}", path.display()))?;

        let config = Self {
            schema: parse_config(&content)
                .context(format!("Failed to parse config file {}", path.display()))?,
            path: Some(path.to_path_buf()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges and enumerations
    pub fn validate(&self) -> Result<()> {
        let matching = &self.schema.matching;
        let weights = &matching.weights;
        let logging = &self.schema.logging;

        let result = Validator::new()
            .range("matching.weights.cause", weights.cause, 0.0, 1.0)
            .range("matching.weights.skill", weights.skill, 0.0, 1.0)
            .range("matching.weights.location", weights.location, 0.0, 1.0)
            .range("matching.weights.availability", weights.availability, 0.0, 1.0)
            .custom("matching.weights", || {
                let sum = weights.sum();
                (!sum.is_finite() || (sum - 1.0).abs() > 1e-6)
                    .then(|| format!("weights must sum to 1.0, got {sum}"))
            })
            .range(
                "matching.cause_similarity_threshold",
                matching.cause_similarity_threshold,
                0.0,
                1.0,
            )
            .range(
                "matching.skill_similarity_threshold",
                matching.skill_similarity_threshold,
                0.0,
                1.0,
            )
            .custom("matching.bonuses", || {
                [
                    matching.category_skill_bonus,
                    matching.skill_keyword_bonus,
                    matching.experience_threshold,
                    matching.max_experience_boost,
                ]
                .iter()
                .any(|v| !v.is_finite() || *v < 0.0)
                .then(|| "bonuses and experience settings must be finite and non-negative".to_string())
            })
            .range("discover.limit", self.schema.discover.limit, 1, 1000)
            .range("suggest.limit", self.schema.suggest.limit, 1, 1000)
            .one_of("logging.level", &logging.level.to_lowercase(), LOG_LEVELS)
            .one_of("logging.format", &logging.format.to_lowercase(), LOG_FORMATS)
            .warn_if(
                "discover.fallback_to_all",
                self.schema.discover.fallback_to_all,
                "discover will score causes in any city when none are nearby",
            )
            .validate();

        for warning in result.warnings() {
            tracing::warn!(field = %warning.field, "{}", warning.message);
        }

        result
            .to_result_with(ErrorCode::ConfigValidationError)
            .map_err(|e| match &self.path {
                Some(p) => e.with_context(format!("In {}", p.display())),
                None => e,
            })
    }

    /// Effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(&self.schema)
            .map_err(|e| Error::config(format!("Failed to serialize config: {}", e)))
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    candidate_paths(dirs::config_dir())
        .into_iter()
        .find(|candidate| candidate.is_file())
}

fn candidate_paths(config_dir: Option<PathBuf>) -> Vec<PathBuf> {
    LOCAL_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .chain(config_dir.map(|dir| dir.join("impactmatch").join("config.toml")))
        .collect()
}

/// Parse TOML, warning about unknown top-level sections
fn parse_config(content: &str) -> Result<ConfigSchema> {
    let table: toml::Table = toml::from_str(content)?;

    let unknown = unknown_sections(table.keys().map(String::as_str), KNOWN_SECTIONS);
    for warning in unknown.warnings() {
        tracing::warn!(key = %warning.field, "{}", warning.message);
    }

    Ok(toml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.suggest.limit, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_explicit_file() {
        let file = write_config(
            r#"
            [suggest]
            limit = 3

            [logging]
            level = "debug"
            format = "json"
            "#,
        );
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.schema.suggest.limit, 3);
        assert_eq!(config.schema.logging.format, "json");
        assert_eq!(config.path.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = Config::load(Some(Path::new("/nonexistent/impactmatch.toml"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_parse_error_has_context() {
        let file = write_config("[matching\nweights = ");
        let err = Config::load_from(file.path()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
        assert!(err.context.unwrap().contains("Failed to parse"));
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let file = write_config("[matching.weights]\ncause = 0.9\n");
        let err = Config::load_from(file.path()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigValidationError);
        assert!(err.message.contains("sum to 1.0"));
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let file = write_config("[matching]\ncause_similarity_threshold = nan\n");
        let err = Config::load_from(file.path()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigValidationError);
        assert!(err.message.contains("matching.cause_similarity_threshold"));
    }

    #[test]
    fn test_bad_log_format_rejected() {
        let file = write_config("[logging]\nformat = \"xml\"\n");
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(err.message.contains("logging.format"));
    }

    #[test]
    fn test_unknown_section_is_only_a_warning() {
        let file = write_config("[colors]\nenabled = true\n");
        assert!(Config::load_from(file.path()).is_ok());
    }

    #[test]
    fn test_candidate_order() {
        let paths = candidate_paths(Some(PathBuf::from("/home/u/.config")));
        assert_eq!(
            paths,
            vec![
                PathBuf::from(".impactmatch.toml"),
                PathBuf::from("impactmatch.toml"),
                PathBuf::from("/home/u/.config/impactmatch/config.toml"),
            ]
        );
        assert_eq!(candidate_paths(None).len(), 2);
    }

    #[test]
    fn test_to_toml_round_trips() {
        let config = Config::default();
        let text = config.to_toml().unwrap();
        let parsed: ConfigSchema = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config.schema);
    }
}
