//! The reconcile pipeline: harvest, merge, rewrite, verify.
//!
//! Order matters. Every fatal check — local schema, remote reachability,
//! remote schema — happens before the first mutating call, so a run that
//! fails preflight leaves the remote table exactly as it found it. Once the
//! rewrite starts, a snapshot of the old remote content is already on disk.

use std::path::{Path, PathBuf};

use chrono::Local;

use sheetsync_core::{dataset, Dataset, SyncProfile};
use sheetsync_remote::RemoteTable;

use crate::error::SyncError;
use crate::report::{ReconcileReport, SyncOutcome};
use crate::{harvest, key, merge};

/// Everything a caller might want after a run: the report for printing, the
/// merged table for diffing, and the remote grid as it was before the
/// rewrite.
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    pub report: ReconcileReport,
    pub merged: Dataset,
    pub remote_before: Vec<Vec<String>>,
}

/// Reconcile `dataset` against the remote worksheet named by `profile`.
///
/// The local dataset is the content authority; the remote table is the
/// authority for non-empty preserved values. With `dry_run` the merge is
/// computed and reported but nothing is written. Otherwise the remote
/// content is snapshotted to `snapshot_dir`, the worksheet is cleared and
/// rewritten, and the write is verified by reading it back.
pub fn reconcile(
    profile: &SyncProfile,
    mut dataset: Dataset,
    remote: &mut dyn RemoteTable,
    dry_run: bool,
    snapshot_dir: &Path,
) -> Result<ReconcileOutcome, SyncError> {
    // Keys come from the original key fields, before any column shuffling.
    let keys = key::keys_for_dataset(&dataset, &profile.key_fields)?;

    // Canonical column order: identity key first, preserved columns next,
    // content columns after in their local order.
    let key_idx = dataset.ensure_column(&profile.key_column);
    dataset.move_column(key_idx, 0);
    for (pos, column) in profile.preserved_columns.iter().enumerate() {
        let idx = dataset.ensure_column(column);
        dataset.move_column(idx, pos + 1);
    }
    for (row, key) in keys.iter().enumerate() {
        dataset.set(row, 0, key.clone());
    }

    let remote_before = remote.read_all(&profile.worksheet)?;
    let harvested = harvest::harvest(&remote_before, &profile.key_column, &profile.preserved_columns)?;
    let stats = merge::apply(&mut dataset, &keys, &harvested, &profile.preserved_columns);

    if dry_run {
        log::info!(
            "dry run for '{}': {} row(s), {} preserved value(s), nothing written",
            profile.worksheet,
            dataset.row_count(),
            stats.preserved_values
        );
        let report = ReconcileReport::new(
            profile.worksheet.to_string(),
            SyncOutcome::DryRun,
            dataset.row_count(),
            dataset.header().len(),
            stats,
            None,
        );
        return Ok(ReconcileOutcome {
            report,
            merged: dataset,
            remote_before,
        });
    }

    let snapshot = snapshot_remote(snapshot_dir, profile, &remote_before)?;

    let grid = dataset.to_grid();
    remote.clear(&profile.worksheet)?;
    remote.write(&profile.worksheet, &grid)?;

    let read_back = remote.read_all(&profile.worksheet)?;
    if !grids_equivalent(&grid, &read_back) {
        return Err(SyncError::WriteVerifyFailed {
            worksheet: profile.worksheet.clone(),
        });
    }

    // Cosmetic; a formatting failure never fails a verified sync.
    if let Err(err) = remote.format_header(&profile.worksheet, dataset.header().len()) {
        log::warn!("header formatting failed for '{}': {err}", profile.worksheet);
    }

    log::info!(
        "synced '{}': {} row(s) written, {} preserved value(s) carried forward",
        profile.worksheet,
        dataset.row_count(),
        stats.preserved_values
    );

    let report = ReconcileReport::new(
        profile.worksheet.to_string(),
        SyncOutcome::Written,
        dataset.row_count(),
        dataset.header().len(),
        stats,
        snapshot,
    );
    Ok(ReconcileOutcome {
        report,
        merged: dataset,
        remote_before,
    })
}

/// Write the pre-rewrite remote content to a timestamped CSV under `dir`.
/// An empty remote (fresh worksheet) has nothing worth snapshotting.
fn snapshot_remote(
    dir: &Path,
    profile: &SyncProfile,
    remote_before: &[Vec<String>],
) -> Result<Option<PathBuf>, SyncError> {
    if remote_before.is_empty() {
        return Ok(None);
    }
    let path = snapshot_path(dir, &profile.worksheet.0);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| sheetsync_core::DatasetError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
    }
    std::fs::write(&path, dataset::render_grid(remote_before)).map_err(|e| {
        sheetsync_core::DatasetError::Io {
            path: path.clone(),
            source: e,
        }
    })?;
    log::info!("remote content snapshotted to {}", path.display());
    Ok(Some(path))
}

fn snapshot_path(dir: &Path, worksheet: &str) -> PathBuf {
    let slug: String = worksheet
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    dir.join(format!("{slug}.snapshot_{timestamp}.csv"))
}

/// Compare a written grid with its read-back. Remote stores drop trailing
/// empty cells and trailing all-empty rows, so both sides are compared in
/// that normalized shape.
fn grids_equivalent(written: &[Vec<String>], read_back: &[Vec<String>]) -> bool {
    fn normalize(grid: &[Vec<String>]) -> Vec<Vec<&str>> {
        let mut rows: Vec<Vec<&str>> = grid
            .iter()
            .map(|row| {
                let mut cells: Vec<&str> = row.iter().map(String::as_str).collect();
                while cells.last() == Some(&"") {
                    cells.pop();
                }
                cells
            })
            .collect();
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }
        rows
    }
    normalize(written) == normalize(read_back)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
