use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuantError {
    #[error(transparent)]
    Usage(#[from] clap::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    ConfigError(String),
    #[error("Gateway error: {0}")]
    GatewayError(String),
}

impl QuantError {
    /// Process exit status for this error. Usage errors keep clap's own code.
    pub fn exit_code(&self) -> i32 {
        match self {
            QuantError::Usage(e) => e.exit_code(),
            _ => 1,
        }
    }
}
