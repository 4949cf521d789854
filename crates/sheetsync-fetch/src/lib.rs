//! # sheetsync-fetch
//!
//! Downloads a Google Sheet through its public export endpoint:
//! `{base}/{id}/export?format=csv|xlsx[&gid=...]`.
//!
//! The sheet must be shared as "anyone with the link"; there is no
//! authentication. A failed request is reported once, never retried.

mod error;
mod http;

pub use error::FetchError;

use std::path::Path;
use std::time::Duration;

use sheetsync_config::{FetchConfig, SheetConfig};

/// File format requested from the export endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }
}

/// Build the export URL for a sheet.
#[must_use]
pub fn export_url(base: &str, id: &str, format: ExportFormat, gid: Option<&str>) -> String {
    let mut url = format!(
        "{}/{}/export?format={}",
        base.trim_end_matches('/'),
        urlencoding::encode(id.trim()),
        format.as_str()
    );
    if let Some(gid) = gid {
        url.push_str("&gid=");
        url.push_str(&urlencoding::encode(gid));
    }
    url
}

/// Export URL for the configured sheet.
#[must_use]
pub fn sheet_export_url(sheet: &SheetConfig, format: ExportFormat) -> String {
    export_url(&sheet.base_url, &sheet.id, format, sheet.gid())
}

/// Read an already-exported file from disk instead of downloading it.
///
/// # Errors
///
/// Returns [`FetchError::Io`] if the file cannot be read.
pub fn read_local(path: &Path) -> Result<Vec<u8>, FetchError> {
    let bytes = std::fs::read(path).map_err(|source| FetchError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "read local export");
    Ok(bytes)
}

/// HTTP client for sheet exports.
pub struct SheetClient {
    http: reqwest::Client,
}

impl SheetClient {
    /// Create a client with the configured timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client` fails to build.
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http })
    }

    /// Download an export and return its raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails, the server returns a
    /// non-success status, or an HTML page comes back instead of a file.
    pub async fn download(&self, url: &str, format: ExportFormat) -> Result<Vec<u8>, FetchError> {
        tracing::debug!(url, format = format.as_str(), "downloading sheet export");
        let resp = self.http.get(url).send().await?;
        let resp = http::check_response(resp, url, format).await?;
        let bytes = resp.bytes().await?;
        tracing::info!(url, bytes = bytes.len(), "downloaded sheet export");
        Ok(bytes.to_vec())
    }
}
