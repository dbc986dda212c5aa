//! Runtime configuration.
//!
//! Read from an optional TOML file, then `ESTAGIOS_SOURCE` overrides the sheet
//! location. Example:
//!
//! ```toml
//! [source]
//! location = "https://intranet.example.edu/docs/database.csv"
//!
//! [logging]
//! level = "debug"
//! ```

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

pub const SOURCE_ENV: &str = "ESTAGIOS_SOURCE";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// URL or file path of the CSV export.
    #[serde(default = "default_location")]
    pub location: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_location() -> String {
    "docs/database.csv".to_string()
}

fn default_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("failed to parse configuration")
    }

    /// File (if it exists) plus environment override, validated.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{}'", path.display()))?;
            Self::from_toml(&content)
                .with_context(|| format!("invalid config file '{}'", path.display()))?
        } else {
            Self::default()
        };

        if let Ok(location) = std::env::var(SOURCE_ENV) {
            config.source.location = location;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reports every problem at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        if self.source.location.trim().is_empty() {
            errors.push("source.location must not be empty".to_string());
        }
        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            errors.push(format!(
                "logging.level '{}' is not one of {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("invalid configuration: {}", errors.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_bundled_sheet() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.source.location, "docs/database.csv");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_files_keep_other_defaults() {
        let config = Config::from_toml("[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.source.location, "docs/database.csv");
    }

    #[test]
    fn validation_collects_every_problem() {
        let config = Config::from_toml(
            "[source]\nlocation = \"  \"\n[logging]\nlevel = \"loud\"\n",
        )
        .unwrap();
        let message = config.validate().unwrap_err().to_string();
        assert!(message.contains("source.location"));
        assert!(message.contains("loud"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.logging.level, "info");
    }
}
