//! Common types and data structures

use crate::error::SyncError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Where a source is fetched from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Https,
    Http,
    Local,
}

impl Protocol {
    pub const ALL: [Protocol; 3] = [Protocol::Https, Protocol::Http, Protocol::Local];

    pub fn is_remote(self) -> bool {
        matches!(self, Protocol::Https | Protocol::Http)
    }

    pub fn label(self) -> &'static str {
        match self {
            Protocol::Https => "https",
            Protocol::Http => "http",
            Protocol::Local => "local",
        }
    }
}

/// Payload format of a source, keyed by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadFormat {
    Json,
    Csv,
}

impl PayloadFormat {
    pub const ALL: [PayloadFormat; 2] = [PayloadFormat::Json, PayloadFormat::Csv];

    pub fn label(self) -> &'static str {
        match self {
            PayloadFormat::Json => "json",
            PayloadFormat::Csv => "csv",
        }
    }
}

fn default_true() -> bool {
    true
}

/// A user-defined sync source, one row of the table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSource {
    pub id: String,
    pub name: String,
    /// URL remainder (no scheme) for remote sources, filesystem path for local ones
    pub path: String,
    pub protocol: Protocol,
    #[serde(rename = "ext")]
    pub format: PayloadFormat,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Unix milliseconds of the last completed sync
    #[serde(default)]
    pub last_updated: Option<i64>,
}

/// A cached prompt record produced by a sync
///
/// Unknown fields on remote JSON payloads are preserved through `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptEntry {
    #[serde(default)]
    pub cmd: String,
    #[serde(default)]
    pub act: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub enable: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Column to sort the source table by
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Name,
    LastSync,
}

/// Sort direction for the source table
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// How a sync chain ended
#[derive(Debug)]
pub enum SyncOutcome {
    /// Chain ran to completion and wrote the cache
    Synced { entries: usize },
    /// Remote answered with a non-success status; the chain still completed
    HttpFailed { status: u16 },
    /// Chain aborted before the cache was written
    Failed(SyncError),
}

/// Completion event delivered from a sync task to the UI thread
#[derive(Debug)]
pub struct SyncEvent {
    pub id: String,
    pub outcome: SyncOutcome,
}

/// Shared state for in-flight sync chains
#[derive(Default)]
pub struct SyncState {
    /// Source ids with a chain currently running
    pub jobs: HashSet<String>,
    /// Completions waiting to be drained on the UI thread
    pub events: Vec<SyncEvent>,
}
