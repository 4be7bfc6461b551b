//! Error types for sheetsync-engine.

use std::fmt;

use thiserror::Error;

use sheetsync_core::{ConfigError, DatasetError, WorksheetTitle};
use sheetsync_remote::RemoteError;

/// Which header a schema check ran against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSide {
    Local,
    Remote,
}

impl fmt::Display for TableSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableSide::Local => write!(f, "local"),
            TableSide::Remote => write!(f, "remote"),
        }
    }
}

/// All errors that can arise from a reconcile run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from profile loading/validation.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An error from local dataset I/O.
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// An error from the remote table service.
    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),

    /// An expected column is absent from a header. Fatal and surfaced with
    /// the missing names — silently proceeding would corrupt provenance.
    #[error("schema mismatch: {side} header is missing column(s): {}", columns.join(", "))]
    SchemaMismatch {
        side: TableSide,
        columns: Vec<String>,
    },

    /// Post-write read-back did not match what was sent. The worksheet may
    /// be partially applied; the pre-write snapshot holds the prior content.
    #[error(
        "write verification failed for worksheet '{worksheet}': read-back does not match what was sent"
    )]
    WriteVerifyFailed { worksheet: WorksheetTitle },
}
