//! Flat record and error-status documents.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One spreadsheet row keyed by column header, in column order.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Timestamp format used by every document: `2025-01-31 14:05:09 UTC`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// The flat export: every data row as a record, stamped with the run time.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RecordsDocument {
    pub last_updated: String,
    pub data: Vec<Record>,
}

impl RecordsDocument {
    #[must_use]
    pub fn new(data: Vec<Record>, at: DateTime<Utc>) -> Self {
        Self {
            last_updated: format_timestamp(at),
            data,
        }
    }
}

/// Written instead of the regular output when a run fails.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorDocument {
    /// Always `"error"`.
    pub status: String,
    pub message: String,
    pub last_updated: String,
}

impl ErrorDocument {
    pub const STATUS: &'static str = "error";

    #[must_use]
    pub fn new(message: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            status: Self::STATUS.to_string(),
            message: message.into(),
            last_updated: format_timestamp(at),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 7, 9, 4, 5).unwrap()
    }

    #[test]
    fn timestamp_uses_utc_suffix() {
        assert_eq!(format_timestamp(fixed_time()), "2025-03-07 09:04:05 UTC");
    }

    #[test]
    fn records_document_shape() {
        let mut record = Record::new();
        record.insert("Name".into(), json!("Ada"));
        record.insert("Age".into(), json!(36));

        let doc = RecordsDocument::new(vec![record], fixed_time());
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(
            value,
            json!({
                "last_updated": "2025-03-07 09:04:05 UTC",
                "data": [{"Name": "Ada", "Age": 36}]
            })
        );
    }

    #[test]
    fn record_keys_keep_column_order() {
        let mut record = Record::new();
        record.insert("z".into(), json!(1));
        record.insert("a".into(), json!(2));

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"z":1,"a":2}"#);
    }

    #[test]
    fn error_document_status() {
        let doc = ErrorDocument::new("boom", fixed_time());
        assert_eq!(doc.status, "error");
        assert_eq!(doc.message, "boom");
        assert_eq!(doc.last_updated, "2025-03-07 09:04:05 UTC");
    }
}
