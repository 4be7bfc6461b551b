//! Run report for a reconcile.

use std::path::PathBuf;

use serde::Serialize;

use crate::merge::MergeStats;

/// Whether the run touched the remote table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncOutcome {
    /// Merge computed, nothing written.
    DryRun,
    /// Remote table rewritten and verified by read-back.
    Written,
}

/// Summary of one reconcile run, printable and JSON-serializable.
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileReport {
    pub worksheet: String,
    pub outcome: SyncOutcome,
    /// Data rows in the merged table (header excluded).
    pub rows: usize,
    pub columns: usize,
    /// Preserved values carried forward from the remote table.
    pub preserved_values: usize,
    /// Identity keys that already existed remotely.
    pub seen_keys: usize,
    /// Identity keys appearing for the first time.
    pub new_keys: usize,
    /// Keys shared by more than one local row — data quality warning.
    pub key_collisions: Vec<String>,
    /// Remote keys with no local counterpart — data quality warning.
    pub stale_remote_keys: Vec<String>,
    /// Pre-write snapshot of the remote content, when one was taken.
    pub snapshot: Option<PathBuf>,
}

impl ReconcileReport {
    pub(crate) fn new(
        worksheet: String,
        outcome: SyncOutcome,
        rows: usize,
        columns: usize,
        stats: MergeStats,
        snapshot: Option<PathBuf>,
    ) -> Self {
        Self {
            worksheet,
            outcome,
            rows,
            columns,
            preserved_values: stats.preserved_values,
            seen_keys: stats.seen_keys,
            new_keys: stats.new_keys,
            key_collisions: stats.key_collisions,
            stale_remote_keys: stats.stale_remote_keys,
            snapshot,
        }
    }

    /// True when the run surfaced any data quality warning.
    pub fn has_warnings(&self) -> bool {
        !self.key_collisions.is_empty() || !self.stale_remote_keys.is_empty()
    }
}
