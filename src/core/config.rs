//! User configuration for quantctl.
//!
//! Loaded from `$QUANTCTL_CONFIG`, falling back to `$HOME/.quantctl/config.toml`.
//! A missing file means defaults. Environment variables override the file;
//! CLI flags override both.

use crate::core::error::QuantError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const CONFIG_ENV: &str = "QUANTCTL_CONFIG";
pub const FORMAT_ENV: &str = "QUANTCTL_FORMAT";
pub const LOG_ENV: &str = "QUANTCTL_LOG";
pub const LOG_FORMAT_ENV: &str = "QUANTCTL_LOG_FORMAT";

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = QuantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(QuantError::ConfigError(format!(
                "unknown output format '{}' (expected 'text' or 'json')",
                other
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = QuantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(QuantError::ConfigError(format!(
                "unknown log format '{}' (expected 'compact' or 'json')",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QuantConfig {
    pub output: OutputSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputSection {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSection {
    /// tracing filter directive, e.g. `warn` or `quantctl=debug`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
        }
    }
}

/// Where the config file is expected, given an environment lookup.
pub fn config_path<F>(lookup: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(explicit) = lookup(CONFIG_ENV).filter(|p| !p.trim().is_empty()) {
        return Some(PathBuf::from(explicit));
    }
    lookup("HOME").map(|home| PathBuf::from(home).join(".quantctl").join("config.toml"))
}

/// Read a config file. A missing file yields the defaults.
pub fn load_config_file(path: &Path) -> Result<QuantConfig, QuantError> {
    if !path.exists() {
        return Ok(QuantConfig::default());
    }
    let content = fs::read_to_string(path).map_err(QuantError::IoError)?;
    toml::from_str(&content)
        .map_err(|e| QuantError::ConfigError(format!("{}: {}", path.display(), e)))
}

impl QuantConfig {
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), QuantError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(format) = lookup(FORMAT_ENV) {
            self.output.format = format.parse()?;
        }
        if let Some(level) = lookup(LOG_ENV).filter(|l| !l.trim().is_empty()) {
            self.logging.level = level;
        }
        if let Some(format) = lookup(LOG_FORMAT_ENV) {
            self.logging.format = format.parse()?;
        }
        Ok(())
    }
}

/// File then environment, in that order.
pub fn load<F>(lookup: F) -> Result<QuantConfig, QuantError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match config_path(&lookup) {
        Some(path) => load_config_file(&path)?,
        None => QuantConfig::default(),
    };
    config.apply_env(&lookup)?;
    Ok(config)
}
