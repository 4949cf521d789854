//! Parse error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error in {part}: {message}")]
    Xml { part: String, message: String },

    /// A part the workbook cannot be read without is absent.
    #[error("XLSX part missing: {part}")]
    MissingPart { part: String },

    #[error("invalid cell reference '{0}'")]
    InvalidReference(String),

    /// Used cells span more than the dense grid holds.
    #[error("{part} spans {rows} rows x {cols} columns, more than {limit} cells")]
    TooLarge {
        part: String,
        rows: usize,
        cols: usize,
        limit: usize,
    },

    /// The export held no header row.
    #[error("sheet export is empty")]
    Empty,

    #[error("line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },
}

impl ParseError {
    pub(crate) fn xml(part: &str, message: impl std::fmt::Display) -> Self {
        Self::Xml {
            part: part.to_string(),
            message: message.to_string(),
        }
    }
}
