//! Domain types for sheetsync.
//!
//! Columns are dynamic — whatever the producing workflow puts in the header —
//! so rows are positional cell vectors kept in lockstep with one shared
//! header, never fixed structs.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed spreadsheet (container) identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpreadsheetId(pub String);

impl fmt::Display for SpreadsheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for SpreadsheetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SpreadsheetId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed worksheet (tab) title within a spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorksheetTitle(pub String);

impl fmt::Display for WorksheetTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for WorksheetTitle {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for WorksheetTitle {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// An ordered sequence of rows sharing one header.
///
/// Invariant: every row has exactly `header.len()` cells. Rows pushed with
/// fewer cells are padded with empty strings; rows with more are truncated.
/// Cells holding non-finite numeric text (`NaN`, `inf`, …) are normalized to
/// empty strings on entry so they can never leak into the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn new(header: Vec<String>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    /// Build a dataset from a raw grid whose first row is the header.
    ///
    /// Returns `None` for a grid with no rows at all.
    pub fn from_grid(mut grid: Vec<Vec<String>>) -> Option<Self> {
        if grid.is_empty() {
            return None;
        }
        let header = grid.remove(0);
        let mut dataset = Self::new(header);
        for row in grid {
            dataset.push_row(row);
        }
        Some(dataset)
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Append a row, cleaning every cell and padding/truncating to the
    /// header width.
    pub fn push_row(&mut self, cells: Vec<String>) {
        let mut row: Vec<String> = cells.into_iter().map(|c| clean_cell(&c)).collect();
        row.resize(self.header.len(), String::new());
        self.rows.push(row);
    }

    pub fn get(&self, row: usize, column: usize) -> &str {
        &self.rows[row][column]
    }

    pub fn set(&mut self, row: usize, column: usize, value: String) {
        self.rows[row][column] = clean_cell(&value);
    }

    /// Index of `name`, appending an all-empty column of that name if absent.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column_index(name) {
            return idx;
        }
        self.header.push(name.to_owned());
        for row in &mut self.rows {
            row.push(String::new());
        }
        self.header.len() - 1
    }

    /// Move the column at `from` to position `to`, shifting the columns in
    /// between. Header and every row move together.
    pub fn move_column(&mut self, from: usize, to: usize) {
        if from == to || from >= self.header.len() || to >= self.header.len() {
            return;
        }
        move_within(&mut self.header, from, to);
        for row in &mut self.rows {
            move_within(row, from, to);
        }
    }

    /// The full rectangular grid: header row followed by every data row.
    pub fn to_grid(&self) -> Vec<Vec<String>> {
        let mut grid = Vec::with_capacity(self.rows.len() + 1);
        grid.push(self.header.clone());
        grid.extend(self.rows.iter().cloned());
        grid
    }
}

fn move_within(cells: &mut [String], from: usize, to: usize) {
    if from < to {
        cells[from..=to].rotate_left(1);
    } else {
        cells[to..=from].rotate_right(1);
    }
}

/// Normalize a cell to a display-safe string.
///
/// Text that parses as a non-finite float (`NaN`, `inf`, `-inf`, overflow
/// forms like `1e999`) becomes the empty string; everything else is kept
/// verbatim. The destination format has no representation for these values
/// and the literal text "nan" in a schedule cell is always an upstream
/// serialization accident, not content.
pub fn clean_cell(cell: &str) -> String {
    if let Ok(value) = cell.trim().parse::<f64>() {
        if !value.is_finite() {
            return String::new();
        }
    }
    cell.to_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
