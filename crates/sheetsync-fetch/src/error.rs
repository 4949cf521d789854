//! Fetch error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while downloading or reading a sheet export.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The export URL answered 404: wrong sheet id or gid.
    #[error("sheet not found at {url}")]
    NotFound { url: String },

    /// The sheet is not shared publicly.
    #[error("access denied ({status}): the sheet must be shared as 'anyone with the link'")]
    AccessDenied { status: u16 },

    /// Google returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The server returned a 429 Too Many Requests response.
    #[error("rate limited - retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// An HTML page came back where a CSV or XLSX file was expected,
    /// which is how Google answers for private sheets.
    #[error("unexpected content type '{content_type}' (expected a {expected} export)")]
    UnexpectedContent {
        content_type: String,
        expected: &'static str,
    },

    /// Reading a local export failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
