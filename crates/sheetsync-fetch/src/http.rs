//! Shared HTTP response checks for export downloads.
//!
//! Maps status codes to [`FetchError`] variants (404 not found, 401/403
//! access denied, 429 rate limiting with `Retry-After` parsing, any other
//! non-success -> [`FetchError::Api`]) and rejects HTML answers to a file
//! export request.

use crate::ExportFormat;
use crate::error::FetchError;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success.
pub async fn check_response(
    resp: reqwest::Response,
    url: &str,
    format: ExportFormat,
) -> Result<reqwest::Response, FetchError> {
    let status = resp.status();
    if status == 404 {
        return Err(FetchError::NotFound {
            url: url.to_string(),
        });
    }
    if status == 401 || status == 403 {
        return Err(FetchError::AccessDenied {
            status: status.as_u16(),
        });
    }
    if status == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(FetchError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !status.is_success() {
        return Err(FetchError::Api {
            status: status.as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    if let Some(content_type) = content_type(&resp) {
        if content_type.starts_with("text/html") {
            return Err(FetchError::UnexpectedContent {
                content_type,
                expected: format.as_str(),
            });
        }
    }
    Ok(resp)
}

fn content_type(resp: &reqwest::Response) -> Option<String> {
    resp.headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_ascii_lowercase)
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}
