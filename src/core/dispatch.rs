//! Dispatch targets, invocations and the gateway seam.
//!
//! Every leaf subcommand resolves to exactly one [`DispatchTarget`]. The
//! mapping from parsed command to target is an exhaustive `match` in each
//! command group, so adding a leaf without a target fails to compile.
//!
//! The platform API itself lives behind [`Gateway`]. The built-in
//! [`EnvelopeGateway`] does not talk to the network: it records what would
//! be dispatched as a JSON envelope.

use crate::core::error::QuantError;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;
use sha2::{Digest, Sha256};
use std::fmt;
use ulid::Ulid;

pub const ENVELOPE_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchTarget {
    HistoryDownload,
    HistoryGetStatus,
    HistoryCancelDownload,
    HistoryGetConfig,
    HistoryAddConfig,
    HistoryDropDatabase,
    MasterListExchanges,
    MasterPullListings,
    MasterDownloadSecuritiesFile,
    MasterGetConids,
    MasterDiffSecurities,
    MasterCreateGroup,
    MasterDeleteGroup,
    MasterGetFrontmonth,
    MasterLoadOrShowRollrules,
    MasterDelist,
    MasterLoadLots,
}

impl DispatchTarget {
    pub const ALL: [DispatchTarget; 17] = [
        DispatchTarget::HistoryDownload,
        DispatchTarget::HistoryGetStatus,
        DispatchTarget::HistoryCancelDownload,
        DispatchTarget::HistoryGetConfig,
        DispatchTarget::HistoryAddConfig,
        DispatchTarget::HistoryDropDatabase,
        DispatchTarget::MasterListExchanges,
        DispatchTarget::MasterPullListings,
        DispatchTarget::MasterDownloadSecuritiesFile,
        DispatchTarget::MasterGetConids,
        DispatchTarget::MasterDiffSecurities,
        DispatchTarget::MasterCreateGroup,
        DispatchTarget::MasterDeleteGroup,
        DispatchTarget::MasterGetFrontmonth,
        DispatchTarget::MasterLoadOrShowRollrules,
        DispatchTarget::MasterDelist,
        DispatchTarget::MasterLoadLots,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DispatchTarget::HistoryDownload => "history.download",
            DispatchTarget::HistoryGetStatus => "history.get_status",
            DispatchTarget::HistoryCancelDownload => "history.cancel_download",
            DispatchTarget::HistoryGetConfig => "history.get_config",
            DispatchTarget::HistoryAddConfig => "history.add_config",
            DispatchTarget::HistoryDropDatabase => "history.drop_database",
            DispatchTarget::MasterListExchanges => "master.list_exchanges",
            DispatchTarget::MasterPullListings => "master.pull_listings",
            DispatchTarget::MasterDownloadSecuritiesFile => "master.download_securities_file",
            DispatchTarget::MasterGetConids => "master.get_conids",
            DispatchTarget::MasterDiffSecurities => "master.diff_securities",
            DispatchTarget::MasterCreateGroup => "master.create_group",
            DispatchTarget::MasterDeleteGroup => "master.delete_group",
            DispatchTarget::MasterGetFrontmonth => "master.get_frontmonth",
            DispatchTarget::MasterLoadOrShowRollrules => "master.load_or_show_rollrules",
            DispatchTarget::MasterDelist => "master.delist",
            DispatchTarget::MasterLoadLots => "master.load_lots",
        }
    }

    /// Command group the target belongs to (`history` or `master`).
    pub fn domain(self) -> &'static str {
        self.as_str()
            .split_once('.')
            .map(|(domain, _)| domain)
            .unwrap_or_default()
    }

    /// Function name within the domain, e.g. `get_frontmonth`.
    pub fn function(self) -> &'static str {
        self.as_str()
            .split_once('.')
            .map(|(_, function)| function)
            .unwrap_or_default()
    }
}

impl fmt::Display for DispatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DispatchTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A fully parsed command, ready to hand to the platform API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invocation {
    pub target: DispatchTarget,
    pub params: JsonValue,
}

impl Invocation {
    pub fn new<T: Serialize>(target: DispatchTarget, args: &T) -> Result<Self, QuantError> {
        Ok(Self {
            target,
            params: serde_json::to_value(args)?,
        })
    }

    /// Invocation for a leaf that takes no arguments.
    pub fn bare(target: DispatchTarget) -> Self {
        Self {
            target,
            params: JsonValue::Object(serde_json::Map::new()),
        }
    }

    pub fn param(&self, name: &str) -> Option<&JsonValue> {
        self.params.get(name)
    }

    /// Hex SHA-256 of the serialized params.
    pub fn inputs_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.params.to_string().as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

/// The external API layer a parsed command is handed to.
pub trait Gateway {
    fn invoke(&self, invocation: &Invocation) -> Result<JsonValue, QuantError>;
}

/// Record of one dispatched invocation.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchEnvelope<'a> {
    pub envelope_version: &'static str,
    pub ts: DateTime<Utc>,
    pub event_id: String,
    pub cmd: DispatchTarget,
    pub status: &'static str,
    pub params: &'a JsonValue,
    pub inputs_hash: String,
}

impl<'a> DispatchEnvelope<'a> {
    pub fn dispatched(invocation: &'a Invocation) -> Self {
        Self {
            envelope_version: ENVELOPE_VERSION,
            ts: Utc::now(),
            event_id: Ulid::new().to_string(),
            cmd: invocation.target,
            status: "dispatched",
            params: &invocation.params,
            inputs_hash: invocation.inputs_hash(),
        }
    }
}

/// Gateway that answers every invocation with its dispatch envelope.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvelopeGateway;

impl Gateway for EnvelopeGateway {
    fn invoke(&self, invocation: &Invocation) -> Result<JsonValue, QuantError> {
        Ok(serde_json::to_value(DispatchEnvelope::dispatched(invocation))?)
    }
}
