//! quantctl: command-line front end for a market data platform.
//!
//! Two command groups are exposed:
//!
//! - `history`: historical market data downloads and database config
//! - `master`: the securities master (listings, queries, groups, rollover rules)
//!
//! Parsing is the whole job. Every leaf subcommand resolves to one
//! [`crate::core::dispatch::DispatchTarget`] and a JSON parameter object, which is
//! handed to a [`crate::core::dispatch::Gateway`]. The platform API behind the
//! gateway is not part of this crate; the binary uses
//! [`crate::core::dispatch::EnvelopeGateway`], which prints what would be dispatched.
//!
//! # Examples
//!
//! ```bash
//! # Queue two databases for download on the priority queue
//! quantctl history download canada japan --priority
//!
//! # Frontmonth future for an underlying, as JSON
//! quantctl master frontmonth ES GLOBEX --format json
//! ```
//!
//! # Crate Structure
//!
//! - [`cli`]: root parser and global flags
//! - [`commands`]: the `history` and `master` command trees
//! - [`core`]: dispatch, config, logging, errors, output

pub mod cli;
pub mod commands;
pub mod core;

use cli::{Cli, Command};
use commands::{history, master};
use crate::core::config::{self, OutputFormat};
use crate::core::dispatch::{EnvelopeGateway, Gateway};
use crate::core::{error, logging, output};

use clap::Parser;
use std::io::IsTerminal;

pub use cli::parse_invocation;

/// Dispatch an already-parsed command line and render the gateway's answer.
pub fn execute(
    cli: Cli,
    gateway: &dyn Gateway,
    format: OutputFormat,
    color: bool,
) -> Result<String, error::QuantError> {
    let result = match cli.command {
        Command::History(history_cli) => history::run_history_cli(gateway, history_cli)?,
        Command::Master(master_cli) => master::run_master_cli(gateway, master_cli)?,
    };
    output::render(&result, format, color)
}

pub fn run() -> Result<(), error::QuantError> {
    run_with_args(std::env::args_os())
}

/// Full command-line flow for an explicit argv (program name first).
/// Usage errors, `--help` and `--version` come back as [`error::QuantError::Usage`].
pub fn run_with_args<I, T>(args: I) -> Result<(), error::QuantError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::try_parse_from(args)?;

    let mut settings = config::load(|key| std::env::var(key).ok())?;
    if let Some(format) = cli.format {
        settings.output.format = format;
    }
    logging::init_logging(&settings.logging, cli.verbose)?;
    tracing::debug!(?settings, "configuration resolved");

    let color = std::io::stdout().is_terminal();
    let rendered = execute(
        cli,
        &EnvelopeGateway,
        settings.output.format,
        color,
    )?;
    println!("{}", rendered);
    Ok(())
}
