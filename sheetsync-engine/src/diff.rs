//! Unified diff of what a sync would change, for dry runs.

use similar::TextDiff;

use sheetsync_core::{dataset, Dataset, WorksheetTitle};

/// Render the current remote grid and the merged table as CSV text and diff
/// them. Returns an empty string when nothing would change.
pub fn unified_diff(
    worksheet: &WorksheetTitle,
    remote_before: &[Vec<String>],
    merged: &Dataset,
) -> String {
    let old = dataset::render_grid(remote_before);
    let new = dataset::render_grid(&merged.to_grid());
    if old == new {
        return String::new();
    }

    let old_header = format!("a/{worksheet}");
    let new_header = format!("b/{worksheet}");
    TextDiff::from_lines(&old, &new)
        .unified_diff()
        .header(&old_header, &new_header)
        .context_radius(3)
        .to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
