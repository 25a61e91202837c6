use crate::core::dispatch::{DispatchTarget, Gateway, Invocation};
use crate::core::error;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

const EXCHANGES_EXAMPLES: &str = "\
Examples:
List all exchanges:

    quantctl master exchanges

List stock exchanges in North America:

    quantctl master exchanges --regions north_america --sec-types STK";

const LISTINGS_EXAMPLES: &str = "\
Specify an exchange (optionally filtering by security type, currency, and/or
symbol) to fetch listings from the broker website and pull the associated
contract details. Or, specify groups or conids to pull details directly,
bypassing the website.

Examples:
Pull all Toronto Stock Exchange stock listings:

    quantctl master listings --exchange TSE --sec-types STK

Pull all NYSE ARCA ETF listings:

    quantctl master listings --exchange ARCA --sec-types ETF

Pull specific symbols from Nasdaq (ISLAND):

    quantctl master listings --exchange ISLAND --symbols AAPL GOOG NFLX

Re-pull contract details for an existing securities group called \"japan-fin\":

    quantctl master listings --groups \"japan-fin\"";

const GET_EXAMPLES: &str = "\
Examples:
Download a CSV of all securities in a group called \"mexi-fut\":

    quantctl master get mexi.csv --groups \"mexi-fut\"

Download a CSV of all ARCA ETFs:

    quantctl master get arca.csv --exchanges ARCA --sec-types ETF";

const CONIDS_EXAMPLES: &str = "\
Examples:
Get conids of all ARCA ETFs:

    quantctl master conids --exchanges ARCA --sec-types ETF

Get conids of all consumer cyclicals trading on the Australian Stock Exchange:

    quantctl master conids --exchanges ASX --sectors \"Consumer, Cyclical\"";

const DIFF_EXAMPLES: &str = "\
Examples:
Get a diff for all securities in a group called \"italy-stk\":

    quantctl master diff --groups \"italy-stk\"

Look only for sector or industry changes in that group:

    quantctl master diff --groups \"italy-stk\" --fields Sector Industry

Get a diff for specific securities by conid:

    quantctl master diff --conids 123456 234567

Auto-delist securities in \"nasdaq-sml\" that are no longer available or that
are now associated with the PINK exchange:

    quantctl master diff --groups \"nasdaq-sml\" --delist-missing --delist-exchanges PINK";

const ROLLRULES_EXAMPLES: &str = "\
Examples:
Upload a new rollover config (replaces current config):

    quantctl master rollrules myrolloverrules.yml

Show current rollover config:

    quantctl master rollrules";

#[derive(clap::ValueEnum, Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SecType {
    #[value(name = "STK")]
    Stk,
    #[value(name = "ETF")]
    Etf,
    #[value(name = "FUT")]
    Fut,
    #[value(name = "CASH")]
    Cash,
    #[value(name = "IND")]
    Ind,
}

/// Security types a group can be restricted to.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupSecType {
    #[value(name = "STK")]
    Stk,
    #[value(name = "FUT")]
    Fut,
    #[value(name = "CASH")]
    Cash,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    #[value(name = "north_america")]
    NorthAmerica,
    Europe,
    Asia,
    Global,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Csv,
    Json,
}

#[derive(Parser, Debug)]
#[clap(
    name = "master",
    about = "Securities master CLI",
    subcommand_required = true
)]
pub struct MasterCli {
    #[clap(subcommand)]
    pub command: MasterCommand,
}

#[derive(Subcommand, Debug)]
pub enum MasterCommand {
    /// List exchanges by security type and region
    #[clap(after_help = EXCHANGES_EXAMPLES)]
    Exchanges(ExchangesArgs),
    /// Pull securities listings into the securities master database, either by exchange or by groups/conids
    #[clap(after_help = LISTINGS_EXAMPLES)]
    Listings(ListingsArgs),
    /// Query security details from the securities master database and download to file
    #[clap(after_help = GET_EXAMPLES)]
    Get(GetArgs),
    /// Query conids from the securities master database
    #[clap(after_help = CONIDS_EXAMPLES)]
    Conids(ConidsArgs),
    /// Flag security details that have changed since they were last loaded into the securities master database
    #[clap(after_help = DIFF_EXAMPLES)]
    Diff(DiffArgs),
    /// Create a group of securities meeting certain criteria
    Group(GroupArgs),
    /// Remove a security group
    Rmgroup(RmgroupArgs),
    /// Return the frontmonth contract for a futures underlying, as of now or over a date range
    Frontmonth(FrontmonthArgs),
    /// Upload a new rollover rules config, or return the current rollover rules
    #[clap(after_help = ROLLRULES_EXAMPLES)]
    Rollrules(RollrulesArgs),
    /// Delist a security by conid or symbol+exchange
    Delist(DelistArgs),
    /// Load lot sizes from a file
    Lots(LotsArgs),
}

#[derive(clap::Args, Debug, Clone, Serialize)]
pub struct ExchangesArgs {
    /// Limit to these regions
    #[clap(short, long, value_enum, value_name = "REGION", num_args = 0..)]
    pub regions: Option<Vec<Region>>,
    /// Limit to these security types
    #[clap(short, long, value_enum, value_name = "SEC_TYPE", num_args = 0..)]
    pub sec_types: Option<Vec<SecType>>,
}

#[derive(clap::Args, Debug, Clone, Serialize)]
pub struct ListingsArgs {
    /// The exchange code to pull listings for (required unless providing groups or conids)
    #[clap(short, long, value_name = "EXCHANGE")]
    pub exchange: Option<String>,
    /// Limit to these security types
    #[clap(short = 't', long, value_enum, value_name = "SEC_TYPE", num_args = 0..)]
    pub sec_types: Option<Vec<SecType>>,
    /// Limit to these currencies
    #[clap(short, long, value_name = "CURRENCY", num_args = 0..)]
    pub currencies: Option<Vec<String>>,
    /// Limit to these symbols
    #[clap(short, long, value_name = "SYMBOL", num_args = 0..)]
    pub symbols: Option<Vec<String>>,
    /// Limit to these groups
    #[clap(short, long, value_name = "GROUP", num_args = 0..)]
    pub groups: Option<Vec<String>>,
    /// Limit to these conids
    #[clap(short = 'i', long, value_name = "CONID", num_args = 0..)]
    pub conids: Option<Vec<u64>>,
}

/// Query filters shared by `get` and `conids`.
#[derive(clap::Args, Debug, Clone, Default, Serialize)]
#[clap(next_help_heading = "Filtering options")]
pub struct SecurityFilters {
    /// Limit to these exchanges
    #[clap(short, long, value_name = "EXCHANGE", num_args = 0..)]
    pub exchanges: Option<Vec<String>>,
    /// Limit to these security types
    #[clap(short = 't', long, value_enum, value_name = "SEC_TYPE", num_args = 0..)]
    pub sec_types: Option<Vec<SecType>>,
    /// Limit to these currencies
    #[clap(short, long, value_name = "CURRENCY", num_args = 0..)]
    pub currencies: Option<Vec<String>>,
    /// Limit to these groups
    #[clap(short, long, value_name = "GROUP", num_args = 0..)]
    pub groups: Option<Vec<String>>,
    /// Limit to these symbols
    #[clap(short, long, value_name = "SYMBOL", num_args = 0..)]
    pub symbols: Option<Vec<String>>,
    /// Limit to these conids
    #[clap(short = 'i', long, value_name = "CONID", num_args = 0..)]
    pub conids: Option<Vec<u64>>,
    /// Exclude these groups
    #[clap(long, value_name = "GROUP", num_args = 0..)]
    pub exclude_groups: Option<Vec<String>>,
    /// Exclude these conids
    #[clap(long, value_name = "CONID", num_args = 0..)]
    pub exclude_conids: Option<Vec<u64>>,
    /// Limit to these sectors
    #[clap(long, value_name = "SECTOR", num_args = 0..)]
    pub sectors: Option<Vec<String>>,
    /// Limit to these industries
    #[clap(long, value_name = "INDUSTRY", num_args = 0..)]
    pub industries: Option<Vec<String>>,
    /// Limit to these categories
    #[clap(long, value_name = "CATEGORY", num_args = 0..)]
    pub categories: Option<Vec<String>>,
    /// Include delisted securities
    #[clap(short, long)]
    pub delisted: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct GetArgs {
    /// Filename to write the data to
    #[clap(value_name = "FILENAME")]
    pub filename: PathBuf,
    #[clap(flatten)]
    pub filters: SecurityFilters,
    /// Format output as JSON (default is CSV)
    #[clap(short, long, help_heading = "Formatting options")]
    pub json: bool,
}

impl GetArgs {
    pub fn output(&self) -> FileFormat {
        if self.json {
            FileFormat::Json
        } else {
            FileFormat::Csv
        }
    }
}

#[derive(Serialize)]
struct SecuritiesFileRequest<'a> {
    filepath: &'a Path,
    #[serde(flatten)]
    filters: &'a SecurityFilters,
    output: FileFormat,
}

#[derive(clap::Args, Debug, Clone, Serialize)]
pub struct ConidsArgs {
    #[clap(flatten)]
    #[serde(flatten)]
    pub filters: SecurityFilters,
}

#[derive(clap::Args, Debug, Clone, Serialize)]
pub struct DiffArgs {
    /// Limit to these groups
    #[clap(short, long, value_name = "GROUP", num_args = 0..)]
    pub groups: Option<Vec<String>>,
    /// Limit to these conids
    #[clap(short = 'i', long, value_name = "CONID", num_args = 0..)]
    pub conids: Option<Vec<u64>>,
    /// Only diff these fields
    #[clap(short, long, value_name = "FIELD", num_args = 0..)]
    pub fields: Option<Vec<String>>,
    /// Auto-delist securities that are no longer available
    #[clap(long)]
    pub delist_missing: bool,
    /// Auto-delist securities that are associated with these exchanges
    #[clap(long, value_name = "EXCHANGE", num_args = 0..)]
    pub delist_exchanges: Option<Vec<String>>,
}

#[derive(clap::Args, Debug, Clone, Serialize)]
pub struct GroupArgs {
    /// The name to assign to the group
    #[clap(value_name = "GROUP_NAME")]
    pub name: String,
    /// Limit to this exchange
    #[clap(short, long, value_name = "EXCHANGE")]
    pub exchange: Option<String>,
    /// Limit to this security type
    #[clap(short = 't', long, value_enum, value_name = "SEC_TYPE")]
    pub sec_type: Option<GroupSecType>,
    /// Limit to this currency
    #[clap(short, long, value_name = "CURRENCY")]
    pub currency: Option<String>,
    /// Limit to symbols where 90-day price X volume is greater than or equal to this number
    #[clap(short = 'n', long, value_name = "DOLLAR_VOLUME", allow_negative_numbers = true)]
    pub min_liq: Option<i64>,
    /// Limit to symbols where 90-day price X volume is less than or equal to this number
    #[clap(short = 'x', long, value_name = "DOLLAR_VOLUME", allow_negative_numbers = true)]
    pub max_liq: Option<i64>,
    /// Limit to symbols from these existing groups
    #[clap(long, value_name = "GROUP", num_args = 0..)]
    pub from_groups: Option<Vec<String>>,
    /// Limit to these symbols
    #[clap(short, long, value_name = "SYMBOL", num_args = 0..)]
    pub symbols: Option<Vec<String>>,
    /// Limit to these conids
    #[clap(short = 'i', long, value_name = "CONID", num_args = 0..)]
    pub conids: Option<Vec<u64>>,
    /// Limit to these sectors
    #[clap(long, value_name = "SECTOR", num_args = 0..)]
    pub sectors: Option<Vec<String>>,
    /// Limit to these industries
    #[clap(long, value_name = "INDUSTRY", num_args = 0..)]
    pub industries: Option<Vec<String>>,
    /// Limit to these categories
    #[clap(long, value_name = "CATEGORY", num_args = 0..)]
    pub categories: Option<Vec<String>>,
    /// Exclude delisted securities (default is to include them if they meet the criteria)
    #[clap(long)]
    pub exclude_delisted: bool,
    /// Create the group from the conids in this file
    #[clap(short = 'f', long, value_name = "FILENAME")]
    pub input_file: Option<PathBuf>,
    /// Append to group if group already exists
    #[clap(short, long)]
    pub append: bool,
}

#[derive(clap::Args, Debug, Clone, Serialize)]
pub struct RmgroupArgs {
    /// The group name
    #[clap(value_name = "GROUP")]
    pub group: String,
}

#[derive(clap::Args, Debug, Clone, Serialize)]
pub struct FrontmonthArgs {
    /// The underlying's symbol (e.g. ES)
    #[clap(value_name = "SYMBOL")]
    pub symbol: String,
    /// The exchange where the contract trades (e.g. GLOBEX)
    #[clap(value_name = "EXCHANGE")]
    pub exchange: String,
    /// The contract's currency, if necessary to disambiguate
    #[clap(short, long, value_name = "CURRENCY")]
    pub currency: Option<String>,
    /// The contract's multiplier, if necessary to disambiguate
    #[clap(short, long, value_name = "MULTIPLIER")]
    pub multiplier: Option<String>,
    /// Return the frontmonth conid for each date on or after this date
    #[clap(short, long, value_name = "YYYY-MM-DD")]
    pub start_date: Option<NaiveDate>,
    /// Return the frontmonth conid for each date on or before this date
    #[clap(short, long, value_name = "YYYY-MM-DD")]
    pub end_date: Option<NaiveDate>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct RollrulesArgs {
    /// The rollover rules config file to upload (if omitted, return the current config)
    #[clap(value_name = "FILENAME")]
    pub filename: Option<PathBuf>,
}

/// What `master rollrules` asks the platform to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RollRulesRequest {
    Show,
    Load { filename: PathBuf },
}

impl From<RollrulesArgs> for RollRulesRequest {
    fn from(value: RollrulesArgs) -> Self {
        match value.filename {
            Some(filename) => RollRulesRequest::Load { filename },
            None => RollRulesRequest::Show,
        }
    }
}

#[derive(clap::Args, Debug, Clone, Serialize)]
pub struct DelistArgs {
    /// The conid of the security to delist
    #[clap(short, long, value_name = "CONID")]
    pub conid: Option<u64>,
    /// The symbol to be delisted
    #[clap(short, long, value_name = "SYMBOL")]
    pub symbol: Option<String>,
    /// The exchange of the symbol to be delisted
    #[clap(short, long, value_name = "EXCHANGE")]
    pub exchange: Option<String>,
}

#[derive(clap::Args, Debug, Clone, Serialize)]
pub struct LotsArgs {
    /// CSV file with columns 'lot_size' and either 'conid' or 'symbol' (and optionally 'exchange' and/or 'currency' for disambiguation)
    #[clap(value_name = "FILE")]
    pub filename: PathBuf,
    /// Only try to match to securities in these groups (to prevent false matches in case of symbol ambiguity)
    #[clap(short, long, value_name = "GROUP")]
    pub groups: Option<String>,
}

impl MasterCommand {
    pub fn target(&self) -> DispatchTarget {
        match self {
            MasterCommand::Exchanges(_) => DispatchTarget::MasterListExchanges,
            MasterCommand::Listings(_) => DispatchTarget::MasterPullListings,
            MasterCommand::Get(_) => DispatchTarget::MasterDownloadSecuritiesFile,
            MasterCommand::Conids(_) => DispatchTarget::MasterGetConids,
            MasterCommand::Diff(_) => DispatchTarget::MasterDiffSecurities,
            MasterCommand::Group(_) => DispatchTarget::MasterCreateGroup,
            MasterCommand::Rmgroup(_) => DispatchTarget::MasterDeleteGroup,
            MasterCommand::Frontmonth(_) => DispatchTarget::MasterGetFrontmonth,
            MasterCommand::Rollrules(_) => DispatchTarget::MasterLoadOrShowRollrules,
            MasterCommand::Delist(_) => DispatchTarget::MasterDelist,
            MasterCommand::Lots(_) => DispatchTarget::MasterLoadLots,
        }
    }

    pub fn into_invocation(self) -> Result<Invocation, error::QuantError> {
        let target = self.target();
        match self {
            MasterCommand::Exchanges(args) => Invocation::new(target, &args),
            MasterCommand::Listings(args) => Invocation::new(target, &args),
            MasterCommand::Get(args) => Invocation::new(
                target,
                &SecuritiesFileRequest {
                    filepath: &args.filename,
                    filters: &args.filters,
                    output: args.output(),
                },
            ),
            MasterCommand::Conids(args) => Invocation::new(target, &args),
            MasterCommand::Diff(args) => Invocation::new(target, &args),
            MasterCommand::Group(args) => Invocation::new(target, &args),
            MasterCommand::Rmgroup(args) => Invocation::new(target, &args),
            MasterCommand::Frontmonth(args) => Invocation::new(target, &args),
            MasterCommand::Rollrules(args) => {
                Invocation::new(target, &RollRulesRequest::from(args))
            }
            MasterCommand::Delist(args) => Invocation::new(target, &args),
            MasterCommand::Lots(args) => Invocation::new(target, &args),
        }
    }
}

pub fn run_master_cli(
    gateway: &dyn Gateway,
    cli: MasterCli,
) -> Result<serde_json::Value, error::QuantError> {
    let invocation = cli.command.into_invocation()?;
    tracing::info!(dispatch_target = %invocation.target, "dispatching");
    tracing::debug!(params = %invocation.params, "parsed arguments");
    gateway.invoke(&invocation)
}

const FILTER_PARAMETERS: &[&str] = &[
    "exchanges",
    "sec_types",
    "currencies",
    "groups",
    "symbols",
    "conids",
    "exclude_groups",
    "exclude_conids",
    "sectors",
    "industries",
    "categories",
    "delisted",
];

pub fn schema() -> serde_json::Value {
    let mut get_params = vec!["filepath"];
    get_params.extend_from_slice(FILTER_PARAMETERS);
    get_params.push("output");

    serde_json::json!({
        "name": "master",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Securities master data management",
        "commands": [
            { "name": "exchanges", "target": "master.list_exchanges", "parameters": ["regions", "sec_types"] },
            { "name": "listings", "target": "master.pull_listings", "parameters": ["exchange", "sec_types", "currencies", "symbols", "groups", "conids"] },
            { "name": "get", "target": "master.download_securities_file", "parameters": get_params },
            { "name": "conids", "target": "master.get_conids", "parameters": FILTER_PARAMETERS },
            { "name": "diff", "target": "master.diff_securities", "parameters": ["groups", "conids", "fields", "delist_missing", "delist_exchanges"] },
            { "name": "group", "target": "master.create_group", "parameters": ["name", "exchange", "sec_type", "currency", "min_liq", "max_liq", "from_groups", "symbols", "conids", "sectors", "industries", "categories", "exclude_delisted", "input_file", "append"] },
            { "name": "rmgroup", "target": "master.delete_group", "parameters": ["group"] },
            { "name": "frontmonth", "target": "master.get_frontmonth", "parameters": ["symbol", "exchange", "currency", "multiplier", "start_date", "end_date"] },
            { "name": "rollrules", "target": "master.load_or_show_rollrules", "parameters": ["action", "filename"] },
            { "name": "delist", "target": "master.delist", "parameters": ["conid", "symbol", "exchange"] },
            { "name": "lots", "target": "master.load_lots", "parameters": ["filename", "groups"] }
        ]
    })
}
