//! # sheetsync-engine
//!
//! The status-preserving reconciliation core.
//!
//! Call [`reconcile`] to merge a local dataset (source of truth for content)
//! with a remote worksheet (source of truth for human-edited columns such as
//! "status"), keyed by a deterministic per-row identity key, and rewrite the
//! worksheet in place — without clobbering the human edits.

pub mod diff;
pub mod error;
pub mod harvest;
pub mod key;
pub mod merge;
pub mod reconcile;
pub mod report;

pub use error::{SyncError, TableSide};
pub use reconcile::{reconcile, ReconcileOutcome};
pub use report::{ReconcileReport, SyncOutcome};
