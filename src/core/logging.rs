//! Logging setup.
//!
//! Events go to stderr so stdout stays reserved for command output.
//! The filter comes from config (`[logging] level`, or `QUANTCTL_LOG`) and is
//! raised one step per `-v`.

use crate::core::config::{LogFormat, LoggingSection};
use crate::core::error::QuantError;
use tracing_subscriber::{EnvFilter, fmt};

const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Raise a plain level by `verbose` steps. Compound directives are kept
/// unless verbosity was requested, in which case they are replaced.
pub fn effective_level(level: &str, verbose: u8) -> String {
    let base = LEVELS.iter().position(|l| l.eq_ignore_ascii_case(level.trim()));
    match (base, verbose) {
        (_, 0) => level.to_string(),
        (Some(idx), v) => LEVELS[(idx + v as usize).min(LEVELS.len() - 1)].to_string(),
        (None, v) => LEVELS[(1 + v as usize).min(LEVELS.len() - 1)].to_string(),
    }
}

pub fn init_logging(section: &LoggingSection, verbose: u8) -> Result<(), QuantError> {
    let directive = effective_level(&section.level, verbose);
    let filter = EnvFilter::try_new(&directive).map_err(|e| {
        QuantError::ConfigError(format!("invalid log filter '{}': {}", directive, e))
    })?;

    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match section.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| QuantError::ConfigError(format!("logging init failed: {}", e)))
}
