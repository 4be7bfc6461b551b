//! Error types for sheetsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from loading and validating a sync profile.
///
/// Every variant is fatal and is reported before any network call is made.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (permission denied, unreadable file, etc.).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse sync profile at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The profile YAML file did not exist at the expected path.
    #[error("sync profile not found at {path}")]
    ProfileNotFound { path: PathBuf },

    /// The credentials file named by the profile does not exist.
    #[error("credentials file not found at {path}; place your service credentials there before syncing")]
    CredentialsNotFound { path: PathBuf },

    /// The profile declares an empty `key_fields` list — no identity key can
    /// be derived from nothing.
    #[error("sync profile at {path} declares no key fields")]
    NoKeyFields { path: PathBuf },
}

/// All errors that can arise from local dataset I/O.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Underlying I/O failure, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV parse or write failure.
    #[error("CSV error at {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The dataset file exists but contains no header row.
    #[error("dataset at {path} is empty — expected at least a header row")]
    Empty { path: PathBuf },
}

/// Convenience constructor for [`ConfigError::Io`].
pub(crate) fn config_io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}

/// Convenience constructor for [`DatasetError::Io`].
pub(crate) fn dataset_io_err(path: impl Into<PathBuf>, source: std::io::Error) -> DatasetError {
    DatasetError::Io {
        path: path.into(),
        source,
    }
}
