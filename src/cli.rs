//! CLI struct definitions for the quantctl command-line interface.
//!
//! The root parser only carries global flags and the two command groups.
//! Leaf subcommands live with their group in `commands/`.

use crate::commands::{history, master};
use crate::core::config::OutputFormat;
use crate::core::dispatch::Invocation;
use crate::core::error;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(
    name = "quantctl",
    version = env!("CARGO_PKG_VERSION"),
    about = "Market data platform CLI: historical data and the securities master",
    subcommand_required = true
)]
pub struct Cli {
    /// Output format: 'text' or 'json' (overrides config and QUANTCTL_FORMAT).
    #[clap(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,
    /// Raise log verbosity; repeat for more detail.
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Historical market data: downloads, status, database config
    #[clap(name = "history")]
    History(history::HistoryCli),

    /// Securities master: listings, queries, groups, rollover rules
    #[clap(name = "master")]
    Master(master::MasterCli),
}

impl Command {
    pub fn into_invocation(self) -> Result<Invocation, error::QuantError> {
        match self {
            Command::History(cli) => cli.command.into_invocation(),
            Command::Master(cli) => cli.command.into_invocation(),
        }
    }
}

/// Parse a full argv (program name first) into an invocation without
/// exiting the process on usage errors.
pub fn parse_invocation<I, T>(args: I) -> Result<Invocation, error::QuantError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::try_parse_from(args)?;
    cli.command.into_invocation()
}
