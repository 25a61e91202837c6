use crate::core::dispatch::{DispatchTarget, Gateway, Invocation};
use crate::core::error;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "history",
    about = "Historical market data CLI",
    subcommand_required = true
)]
pub struct HistoryCli {
    #[clap(subcommand)]
    pub command: HistoryCommand,
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// Download historical market data for the named database(s)
    Download(DownloadArgs),
    /// Show info about pending and running downloads
    Status,
    /// Cancel a running or pending download
    Cancel(CancelArgs),
    /// Show the current configuration
    Config,
    /// Add a new config file to be merged with any existing config
    Add(AddConfigArgs),
    /// Delete a price history database and associated config
    Drop(DropArgs),
}

#[derive(clap::Args, Debug, Clone, Serialize)]
pub struct DownloadArgs {
    /// The database key(s), for example 'canada'
    #[clap(value_name = "DB", required = true, num_args = 1..)]
    pub databases: Vec<String>,
    /// Use the priority queue (default is to use the standard queue)
    #[clap(short, long)]
    pub priority: bool,
}

#[derive(clap::Args, Debug, Clone, Serialize)]
pub struct CancelArgs {
    /// The database key, for example 'canada'
    #[clap(value_name = "DB")]
    pub database: String,
}

#[derive(clap::Args, Debug, Clone, Serialize)]
pub struct AddConfigArgs {
    /// The config file to add
    #[clap(value_name = "CONFIG_FILE")]
    pub config_file: PathBuf,
}

#[derive(clap::Args, Debug, Clone, Serialize)]
pub struct DropArgs {
    /// The database key, for example 'canada'
    #[clap(value_name = "DB")]
    pub database: String,
    /// Enter the db name to confirm you want to drop it
    #[clap(long = "confirm-by-typing-db-name-again", value_name = "DB", required = true)]
    pub confirm_by_typing_db_name_again: String,
}

impl HistoryCommand {
    pub fn target(&self) -> DispatchTarget {
        match self {
            HistoryCommand::Download(_) => DispatchTarget::HistoryDownload,
            HistoryCommand::Status => DispatchTarget::HistoryGetStatus,
            HistoryCommand::Cancel(_) => DispatchTarget::HistoryCancelDownload,
            HistoryCommand::Config => DispatchTarget::HistoryGetConfig,
            HistoryCommand::Add(_) => DispatchTarget::HistoryAddConfig,
            HistoryCommand::Drop(_) => DispatchTarget::HistoryDropDatabase,
        }
    }

    pub fn into_invocation(self) -> Result<Invocation, error::QuantError> {
        let target = self.target();
        match self {
            HistoryCommand::Download(args) => Invocation::new(target, &args),
            HistoryCommand::Status | HistoryCommand::Config => Ok(Invocation::bare(target)),
            HistoryCommand::Cancel(args) => Invocation::new(target, &args),
            HistoryCommand::Add(args) => Invocation::new(target, &args),
            HistoryCommand::Drop(args) => Invocation::new(target, &args),
        }
    }
}

pub fn run_history_cli(
    gateway: &dyn Gateway,
    cli: HistoryCli,
) -> Result<serde_json::Value, error::QuantError> {
    let invocation = cli.command.into_invocation()?;
    tracing::info!(dispatch_target = %invocation.target, "dispatching");
    tracing::debug!(params = %invocation.params, "parsed arguments");
    gateway.invoke(&invocation)
}

pub fn schema() -> serde_json::Value {
    serde_json::json!({
        "name": "history",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Historical market data management",
        "commands": [
            { "name": "download", "target": "history.download", "parameters": ["databases", "priority"] },
            { "name": "status", "target": "history.get_status", "parameters": [] },
            { "name": "cancel", "target": "history.cancel_download", "parameters": ["database"] },
            { "name": "config", "target": "history.get_config", "parameters": [] },
            { "name": "add", "target": "history.add_config", "parameters": ["config_file"] },
            { "name": "drop", "target": "history.drop_database", "parameters": ["database", "confirm_by_typing_db_name_again"] }
        ]
    })
}
