//! CLI response types printed by `sheetsync` commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What `sheetsync publish` (or a run with publishing enabled) did.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PublishSummary {
    Skipped { reason: String },
    NoChanges,
    Committed { commit: String, pushed: bool },
}

/// Response from `sheetsync run` / `records` / `timetable`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RunSummary {
    /// `records` or `timetable`.
    pub mode: String,
    /// Export URL or local path the data came from.
    pub source: String,
    pub last_updated: String,
    /// Data rows (records mode).
    #[serde(default)]
    pub rows: u32,
    /// Sheets walked (timetable mode).
    #[serde(default)]
    pub sheets: u32,
    #[serde(default)]
    pub rooms: u32,
    #[serde(default)]
    pub entries: u32,
    pub files: Vec<String>,
    pub publish: PublishSummary,
}
