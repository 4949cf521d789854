//! Source spreadsheet configuration.

use serde::{Deserialize, Serialize};

/// Spreadsheet exported when no id is configured.
pub const DEFAULT_SHEET_ID: &str = "1AbCdEfGhIjKlMnOpQrStuVWxyz12345";

/// Google Sheets document endpoint.
fn default_base_url() -> String {
    String::from("https://docs.google.com/spreadsheets/d")
}

fn default_id() -> String {
    String::from(DEFAULT_SHEET_ID)
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SheetConfig {
    /// Spreadsheet id (the long token in the sheet URL).
    #[serde(default = "default_id")]
    pub id: String,

    /// Tab id (`gid=` in the sheet URL). Empty exports the first tab.
    #[serde(default)]
    pub gid: String,

    /// Base URL the export path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            id: default_id(),
            gid: String::new(),
            base_url: default_base_url(),
        }
    }
}

impl SheetConfig {
    /// A sheet id is the only required field.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.id.trim().is_empty()
    }

    /// Tab id, if one is set.
    #[must_use]
    pub fn gid(&self) -> Option<&str> {
        let gid = self.gid.trim();
        if gid.is_empty() { None } else { Some(gid) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_builtin_sheet() {
        let config = SheetConfig::default();
        assert!(config.is_configured());
        assert_eq!(config.id, DEFAULT_SHEET_ID);
        assert_eq!(config.base_url, "https://docs.google.com/spreadsheets/d");
        assert_eq!(config.gid(), None);
    }

    #[test]
    fn blank_id_is_not_configured() {
        let config = SheetConfig {
            id: "   ".into(),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn gid_is_trimmed() {
        let config = SheetConfig {
            gid: " 42 ".into(),
            ..Default::default()
        };
        assert_eq!(config.gid(), Some("42"));
    }
}
