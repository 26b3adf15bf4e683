//! Centralized error types for ostfinder.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use thiserror::Error;

/// All errors produced by the ostfinder library.
#[derive(Error, Debug)]
pub enum OstError {
    /// The specified file does not exist.
    #[error("Mailbox file not found: {0}")]
    FileNotFound(PathBuf),

    /// The file is not a synthetic fixture and no pff backend is available.
    #[error(
        "no pff backend is available to read '{0}': the file is not a \
         synthetic fixture and this build carries no mailbox reader"
    )]
    PffUnavailable(PathBuf),

    /// The mailbox container could not be opened by the collaborator.
    #[error("Failed to open mailbox '{path}': {reason}")]
    Open { path: PathBuf, reason: String },

    /// The Inbox message count could not be determined.
    #[error("Failed to read Inbox message count: {reason}")]
    MessageCount { reason: String },

    /// The requested time window ends before it starts.
    #[error("Invalid time window: end {end} is before start {start}")]
    InvalidWindow {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// A start/end instant on the command line could not be parsed.
    #[error("Invalid timestamp '{0}': expected ISO 8601, e.g. 2024-01-01T00:00:00")]
    InvalidTimestamp(String),
}

/// Convenience alias for `Result<T, OstError>`.
pub type Result<T> = std::result::Result<T, OstError>;
