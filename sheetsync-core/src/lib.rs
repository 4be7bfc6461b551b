//! # sheetsync-core
//!
//! Data model and local I/O for sheetsync: the dynamic-column [`Dataset`],
//! CSV reading/writing with timestamped backups, and the [`SyncProfile`]
//! configuration object that every run is parameterized by.

pub mod dataset;
pub mod error;
pub mod profile;
pub mod types;

pub use error::{ConfigError, DatasetError};
pub use profile::SyncProfile;
pub use types::{Dataset, SpreadsheetId, WorksheetTitle};
