//! Configuration loading utilities

use crate::Config;
use rankplot_common::Result as RankplotResult;
use std::env;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "RANKPLOT_CONFIG_PATH";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for rankplot_common::RankplotError {
    fn from(err: ConfigError) -> Self {
        rankplot_common::RankplotError::config_with_source("Failed to load configuration", err)
    }
}

fn parse_env<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse().map_err(|e| ConfigError::EnvParseError {
        var: var.to_string(),
        source: Box::new(e),
    })
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        Self::load_config_with_env(path, |var| env::var(var).ok())
    }

    /// Load configuration from a YAML file, resolving overrides through `lookup`
    pub fn load_config_with_env<P, F>(path: P, lookup: F) -> Result<Config, ConfigError>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        debug!("Loading configuration from {}", path.as_ref().display());
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        Self::apply_overrides(&mut config, lookup)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from the environment and well-known files.
    ///
    /// Lookup order: `RANKPLOT_CONFIG_PATH`, `rankplot.yaml`, `rankplot.yml`,
    /// then built-in defaults. Environment overrides apply in every case.
    pub fn load() -> RankplotResult<Config> {
        let config = if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            Self::load_config(&config_path)?
        } else if Path::new("rankplot.yaml").exists() {
            Self::load_config("rankplot.yaml")?
        } else if Path::new("rankplot.yml").exists() {
            Self::load_config("rankplot.yml")?
        } else {
            debug!("No configuration file found, using defaults");
            Self::load_defaults_with_env(|var| env::var(var).ok())?
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> RankplotResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Built-in defaults with overrides resolved through `lookup`
    pub fn load_defaults_with_env<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        Self::apply_overrides(&mut config, lookup)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("RANKPLOT_INPUT") {
            config.input.path = path;
        }

        if let Some(output) = lookup("RANKPLOT_OUTPUT") {
            config.report.output = output;
        }

        if let Some(width) = lookup("RANKPLOT_WIDTH") {
            config.report.width = parse_env("RANKPLOT_WIDTH", &width)?;
        }

        if let Some(height) = lookup("RANKPLOT_HEIGHT") {
            config.report.height = parse_env("RANKPLOT_HEIGHT", &height)?;
        }

        if let Some(family) = lookup("RANKPLOT_FONT_FAMILY") {
            config.report.font_family = family;
        }

        if let Some(locale) = lookup("RANKPLOT_LOCALE") {
            config.report.locale = locale.trim().to_ascii_lowercase();
        }

        if let Some(bind) = lookup("RANKPLOT_BIND") {
            config.server.bind = bind;
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            config.logging.level = level.trim().to_ascii_lowercase();
        }

        if let Some(file) = lookup("LOG_FILE") {
            config.logging.file = Some(file);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Create a temporary YAML config file for testing
    fn create_test_config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    const VALID_YAML: &str = "input:\n  path: \"/data/rank.json\"\nreport:\n  output: \"report.svg\"\n  width: 1000\n  height: 700\n  locale: \"en\"\nlogging:\n  level: \"warn\"";

    #[test]
    fn test_load_valid_yaml_config() {
        let temp_file = create_test_config_file(VALID_YAML);
        let config = ConfigLoader::load_config_with_env(temp_file.path(), env_of(&[]))
            .expect("Failed to load config");

        assert_eq!(config.input.path, "/data/rank.json");
        assert_eq!(config.report.output, "report.svg");
        assert_eq!(config.report.width, 1000);
        assert_eq!(config.logging.level, "warn");
        // Untouched sections keep their defaults
        assert_eq!(config.server.bind, "127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_yaml() {
        let invalid_yaml = "report:\n  output: \"report.png\"\n  invalid_field: [unclosed array";

        let temp_file = create_test_config_file(invalid_yaml);
        let result = ConfigLoader::load_config_with_env(temp_file.path(), env_of(&[]));

        assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_)));
    }

    #[test]
    fn test_validation_error() {
        let invalid_config = "report:\n  width: 10\n  height: 800";

        let temp_file = create_test_config_file(invalid_config);
        let result = ConfigLoader::load_config_with_env(temp_file.path(), env_of(&[]));

        assert!(matches!(result.unwrap_err(), ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_environment_variable_overrides() {
        let temp_file = create_test_config_file(VALID_YAML);
        let lookup = env_of(&[
            ("RANKPLOT_INPUT", "/env/rank.json"),
            ("RANKPLOT_OUTPUT", "/env/report.png"),
            ("RANKPLOT_WIDTH", "1500"),
            ("RANKPLOT_HEIGHT", " 900 "),
            ("RANKPLOT_FONT_FAMILY", "Noto Sans CJK SC"),
            ("RANKPLOT_LOCALE", "ZH"),
            ("RANKPLOT_BIND", "0.0.0.0:9000"),
            ("LOG_LEVEL", "debug"),
            ("LOG_FILE", "/tmp/rankplot.log"),
        ]);

        let config = ConfigLoader::load_config_with_env(temp_file.path(), lookup)
            .expect("Failed to load config");

        assert_eq!(config.input.path, "/env/rank.json");
        assert_eq!(config.report.output, "/env/report.png");
        assert_eq!(config.report.width, 1500);
        assert_eq!(config.report.height, 900);
        assert_eq!(config.report.font_family, "Noto Sans CJK SC");
        assert_eq!(config.report.locale, "zh");
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file.as_deref(), Some("/tmp/rankplot.log"));
    }

    #[test]
    fn test_env_parse_error() {
        let temp_file = create_test_config_file(VALID_YAML);
        let result = ConfigLoader::load_config_with_env(
            temp_file.path(),
            env_of(&[("RANKPLOT_WIDTH", "not_a_number")]),
        );

        match result.unwrap_err() {
            ConfigError::EnvParseError { var, .. } => assert_eq!(var, "RANKPLOT_WIDTH"),
            other => panic!("expected env parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_env_override_still_validated() {
        let result = ConfigLoader::load_defaults_with_env(env_of(&[("RANKPLOT_BIND", "nowhere")]));
        assert!(matches!(result.unwrap_err(), ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_missing_config_file() {
        let result = ConfigLoader::load_config("/nonexistent/path/rankplot.yaml");
        assert!(matches!(result.unwrap_err(), ConfigError::IoError(_)));
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults_with_env(env_of(&[]))
            .expect("Failed to load default config");

        assert_eq!(config.input.path, "/tmp/rank.json");
        assert_eq!(config.report.output, "rank_report.png");
        assert_eq!(config.report.width, 1200);
    }

    #[test]
    fn test_conversion_into_common_error() {
        let err: rankplot_common::RankplotError =
            ConfigLoader::load_config("/nonexistent/path/rankplot.yaml")
                .unwrap_err()
                .into();
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
