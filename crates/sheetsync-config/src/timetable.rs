//! Timetable extraction settings.

use serde::{Deserialize, Serialize};

/// A header row needs at least this many time-slot cells.
const fn default_min_slot_columns() -> u32 {
    2
}

fn default_ignore_fills() -> Vec<String> {
    vec![String::from("#FFFFFF")]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimetableConfig {
    #[serde(default = "default_min_slot_columns")]
    pub min_slot_columns: u32,

    /// Fill colours treated as "no fill" when building the legend.
    #[serde(default = "default_ignore_fills")]
    pub ignore_fills: Vec<String>,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            min_slot_columns: default_min_slot_columns(),
            ignore_fills: default_ignore_fills(),
        }
    }
}
