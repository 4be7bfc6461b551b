//! The remote table interface the reconcile engine drives.

use sheetsync_core::WorksheetTitle;

use crate::error::RemoteError;

/// A tabular store reachable by worksheet title.
///
/// All cell values are strings on both sides of the wire; type coercion is
/// the store's business, not ours. Implementations are synchronous and
/// blocking — a run is strictly sequential (read, merge in memory, write).
pub trait RemoteTable {
    /// Read all rows of the worksheet, header included. A worksheet with no
    /// cells at all yields an empty vec, which is not an error.
    fn read_all(&self, worksheet: &WorksheetTitle) -> Result<Vec<Vec<String>>, RemoteError>;

    /// Clear every cell of the worksheet. The worksheet itself survives.
    fn clear(&mut self, worksheet: &WorksheetTitle) -> Result<(), RemoteError>;

    /// Write a rectangular block of cells starting at the top-left origin.
    fn write(
        &mut self,
        worksheet: &WorksheetTitle,
        rows: &[Vec<String>],
    ) -> Result<(), RemoteError>;

    /// Reapply bold/colored formatting to the first `columns` header cells.
    ///
    /// Cosmetic only — failures here must not be treated as sync failures,
    /// and the default implementation does nothing.
    fn format_header(
        &mut self,
        _worksheet: &WorksheetTitle,
        _columns: usize,
    ) -> Result<(), RemoteError> {
        Ok(())
    }
}
