//! Cross-cutting error types for sheetsync.
//!
//! Stage-specific errors (`FetchError`, `ParseError`, `PublishError`) live in
//! their own crates. They converge into `anyhow::Error` in `sheetsync-cli`,
//! where a single top-level handler turns any failure into an error document.

use thiserror::Error;

/// Errors that can be raised by any sheetsync crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (shape, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
