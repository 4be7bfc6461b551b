//! Error types for sheetsync-remote.

use std::path::PathBuf;

use thiserror::Error;

use sheetsync_core::{SpreadsheetId, WorksheetTitle};

/// All errors that can arise from talking to the remote table service.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The named worksheet does not exist in the spreadsheet. The caller is
    /// expected to create it out-of-band; nothing here auto-provisions.
    #[error("worksheet '{worksheet}' not found in spreadsheet {spreadsheet}")]
    TableNotFound {
        spreadsheet: SpreadsheetId,
        worksheet: WorksheetTitle,
    },

    /// The credentials file is missing, unreadable, or lacks a token.
    #[error("credentials error at {path}: {reason}")]
    Credentials { path: PathBuf, reason: String },

    /// The service answered with an error status.
    #[error("remote API error ({status}) calling {url}: {message}")]
    Api {
        url: String,
        status: u16,
        message: String,
    },

    /// The request never produced a response (DNS, connect, timeout, ...).
    /// Idempotent reads retry on this; writes never do.
    #[error("transport error calling {url}: {message}")]
    Transport { url: String, message: String },

    /// The service answered 200 but the body was not the expected shape.
    #[error("unexpected response body from {url}: {message}")]
    Decode { url: String, message: String },
}

impl RemoteError {
    /// Whether a retry of the same request could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            RemoteError::Transport { .. } => true,
            RemoteError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
