//! Local CSV dataset I/O.
//!
//! The local file is read fresh on every run; nothing is cached between
//! runs. Before a local file is overwritten it is renamed to a timestamped
//! `.backup_*` sibling so a bad pull never destroys the previous snapshot.

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{dataset_io_err, DatasetError};
use crate::types::Dataset;

/// Read a delimited dataset: first row is the header, every following row is
/// a data row. Ragged rows are accepted and normalized to the header width.
pub fn read(path: &Path) -> Result<Dataset, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| csv_err(path, e))?;

    let mut grid: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_err(path, e))?;
        grid.push(record.iter().map(|c| c.to_owned()).collect());
    }

    Dataset::from_grid(grid).ok_or_else(|| DatasetError::Empty {
        path: path.to_path_buf(),
    })
}

/// Write a dataset (header + rows) to `path`, creating parent directories as
/// needed.
pub fn write(path: &Path, dataset: &Dataset) -> Result<(), DatasetError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| dataset_io_err(parent, e))?;
        }
    }

    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_err(path, e))?;
    for row in dataset.to_grid() {
        writer.write_record(&row).map_err(|e| csv_err(path, e))?;
    }
    writer
        .flush()
        .map_err(|e| dataset_io_err(path, e))?;
    Ok(())
}

/// Rename an existing file to `<name>.backup_<timestamp>` next to it.
///
/// Returns the backup path, or `None` when there was nothing to back up.
pub fn backup_existing(path: &Path) -> Result<Option<PathBuf>, DatasetError> {
    if !path.exists() {
        return Ok(None);
    }
    let backup = backup_path(path);
    std::fs::rename(path, &backup).map_err(|e| dataset_io_err(path, e))?;
    Ok(Some(backup))
}

/// `<path>.backup_<YYYYmmdd_HHMMSS>` — pure, no I/O.
pub fn backup_path(path: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(format!(".backup_{timestamp}"));
    path.with_file_name(name)
}

/// Render a raw grid as CSV text, ragged rows included. Used for diff
/// output and snapshots of remote content; never fails on row shape.
pub fn render_grid(grid: &[Vec<String>]) -> String {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    for row in grid {
        // Writing a record to an in-memory buffer cannot fail.
        let _ = writer.write_record(row);
    }
    let bytes = writer.into_inner().unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}

fn csv_err(path: &Path, source: csv::Error) -> DatasetError {
    DatasetError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
