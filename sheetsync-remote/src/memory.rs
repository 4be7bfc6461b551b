//! In-memory [`RemoteTable`] implementation.
//!
//! Behaves like the REST client from the engine's point of view: worksheets
//! are looked up by title, a missing title is `TableNotFound`, `clear`
//! empties cells but keeps the tab. Used by engine tests and by `--dry-run`
//! flows that never need a network.

use std::collections::BTreeMap;

use sheetsync_core::{SpreadsheetId, WorksheetTitle};

use crate::error::RemoteError;
use crate::table::RemoteTable;

#[derive(Debug, Clone)]
pub struct MemoryTable {
    spreadsheet: SpreadsheetId,
    worksheets: BTreeMap<String, Vec<Vec<String>>>,
    format_calls: Vec<(String, usize)>,
}

impl MemoryTable {
    pub fn new(spreadsheet: impl Into<SpreadsheetId>) -> Self {
        Self {
            spreadsheet: spreadsheet.into(),
            worksheets: BTreeMap::new(),
            format_calls: Vec::new(),
        }
    }

    /// Add (or replace) a worksheet with the given grid.
    pub fn with_worksheet(
        mut self,
        title: impl Into<WorksheetTitle>,
        rows: Vec<Vec<String>>,
    ) -> Self {
        self.worksheets.insert(title.into().0, rows);
        self
    }

    /// Current contents of a worksheet, for assertions.
    pub fn rows(&self, title: &WorksheetTitle) -> Option<&Vec<Vec<String>>> {
        self.worksheets.get(&title.0)
    }

    /// `(worksheet, columns)` pairs passed to `format_header`, in order.
    pub fn format_calls(&self) -> &[(String, usize)] {
        &self.format_calls
    }

    fn lookup(&self, worksheet: &WorksheetTitle) -> Result<(), RemoteError> {
        if self.worksheets.contains_key(&worksheet.0) {
            Ok(())
        } else {
            Err(RemoteError::TableNotFound {
                spreadsheet: self.spreadsheet.clone(),
                worksheet: worksheet.clone(),
            })
        }
    }
}

impl RemoteTable for MemoryTable {
    fn read_all(&self, worksheet: &WorksheetTitle) -> Result<Vec<Vec<String>>, RemoteError> {
        self.lookup(worksheet)?;
        Ok(self.worksheets[&worksheet.0].clone())
    }

    fn clear(&mut self, worksheet: &WorksheetTitle) -> Result<(), RemoteError> {
        self.lookup(worksheet)?;
        self.worksheets.insert(worksheet.0.clone(), Vec::new());
        Ok(())
    }

    fn write(
        &mut self,
        worksheet: &WorksheetTitle,
        rows: &[Vec<String>],
    ) -> Result<(), RemoteError> {
        self.lookup(worksheet)?;
        let grid = self.worksheets.get_mut(&worksheet.0).expect("looked up");
        // Overlay starting at the origin, the way a block update behaves on
        // a sheet that still has content below or to the right.
        for (r, row) in rows.iter().enumerate() {
            if r < grid.len() {
                let existing = &mut grid[r];
                for (c, cell) in row.iter().enumerate() {
                    if c < existing.len() {
                        existing[c] = cell.clone();
                    } else {
                        existing.push(cell.clone());
                    }
                }
            } else {
                grid.push(row.clone());
            }
        }
        Ok(())
    }

    fn format_header(
        &mut self,
        worksheet: &WorksheetTitle,
        columns: usize,
    ) -> Result<(), RemoteError> {
        self.lookup(worksheet)?;
        self.format_calls.push((worksheet.0.clone(), columns));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
