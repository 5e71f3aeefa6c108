use crate::sort::SortStrategy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Main configuration structure for causelog.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub conversion: ConversionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path.as_ref()).context("Failed to read config file")?;

        contents
            .parse::<Config>()
            .context("Failed to parse config file")
    }

    /// Validate the configuration for obvious misconfiguration.
    pub fn validate(&self) -> Result<()> {
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => anyhow::bail!("Invalid log level: {}", other),
        }

        Ok(())
    }
}

impl FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).context("Failed to parse config")?;
        Ok(config)
    }
}

/// Controls how a trace is ordered and how unresolvable events are treated.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConversionConfig {
    #[serde(default)]
    pub sort_strategy: SortStrategy,

    /// Fail the run instead of skipping events whose parents never appear.
    #[serde(default)]
    pub fail_on_dropped: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub include_modules: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            include_modules: false,
        }
    }
}

// Default providers ---------------------------------------------------------

fn default_log_level() -> String {
    "info".to_string()
}

// Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.conversion.sort_strategy, SortStrategy::Scan);
        assert!(!config.conversion.fail_on_dropped);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.include_modules);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [conversion]
            sort_strategy = "kahn"
            fail_on_dropped = true

            [logging]
            level = "debug"
        "#;

        let config = Config::from_str(toml_str).unwrap();
        assert_eq!(config.conversion.sort_strategy, SortStrategy::Kahn);
        assert!(config.conversion.fail_on_dropped);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("causelog-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[conversion]\nsort_strategy = \"kahn\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.conversion.sort_strategy, SortStrategy::Kahn);
        assert_eq!(config.logging.level, "info");

        std::fs::remove_file(path).ok();
        assert!(Config::from_file("/nonexistent/causelog.toml").is_err());
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let toml_str = r#"
            [conversion]
            sort_strategy = "bfs"
        "#;
        assert!(Config::from_str(toml_str).is_err());
    }
}
