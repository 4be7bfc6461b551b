//! Preserved-field harvest: pull the human-edited values out of the remote
//! table before it is rewritten.

use std::collections::BTreeMap;

use crate::error::{SyncError, TableSide};

/// Identity key → (preserved column → remote value), as read.
pub type PreservedValues = BTreeMap<String, BTreeMap<String, String>>;

/// Build the preserved-value mapping from a raw remote grid.
///
/// Row 1 of `remote_rows` is the header. The header must contain
/// `key_column` and every preserved column — a missing one is a fatal
/// `SchemaMismatch` naming all absentees. A remote table with no rows at all
/// yields an empty mapping (first sync against a fresh worksheet).
///
/// Data rows with an empty identity-key cell are skipped; duplicate keys are
/// last-wins in row order, matching how a human reading the sheet top to
/// bottom would resolve them.
pub fn harvest(
    remote_rows: &[Vec<String>],
    key_column: &str,
    preserved_columns: &[String],
) -> Result<PreservedValues, SyncError> {
    let mut values = PreservedValues::new();
    let Some(header) = remote_rows.first() else {
        return Ok(values);
    };

    let mut missing = Vec::new();
    let key_idx = match header.iter().position(|h| h == key_column) {
        Some(idx) => Some(idx),
        None => {
            missing.push(key_column.to_owned());
            None
        }
    };
    let mut preserved_indices = Vec::with_capacity(preserved_columns.len());
    for column in preserved_columns {
        match header.iter().position(|h| h == column) {
            Some(idx) => preserved_indices.push((column.clone(), idx)),
            None => missing.push(column.clone()),
        }
    }
    if !missing.is_empty() {
        return Err(SyncError::SchemaMismatch {
            side: TableSide::Remote,
            columns: missing,
        });
    }
    let key_idx = key_idx.expect("checked above");

    for row in &remote_rows[1..] {
        let key = row.get(key_idx).map(|c| c.trim()).unwrap_or("");
        if key.is_empty() {
            continue;
        }
        let fields: BTreeMap<String, String> = preserved_indices
            .iter()
            .map(|(column, idx)| {
                let value = row.get(*idx).cloned().unwrap_or_default();
                (column.clone(), value)
            })
            .collect();
        values.insert(key.to_owned(), fields);
    }

    Ok(values)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn status_of(values: &PreservedValues, key: &str) -> Option<String> {
        values.get(key).and_then(|f| f.get("status")).cloned()
    }

    #[test]
    fn empty_remote_yields_empty_mapping() {
        let values = harvest(&[], "primary_key", &["status".into()]).expect("harvest");
        assert!(values.is_empty());
    }

    #[test]
    fn header_only_yields_empty_mapping() {
        let rows = vec![row(&["primary_key", "status"])];
        let values = harvest(&rows, "primary_key", &["status".into()]).expect("harvest");
        assert!(values.is_empty());
    }

    #[test]
    fn harvests_values_by_key() {
        let rows = vec![
            row(&["primary_key", "status", "Post Day"]),
            row(&["abc12345", "SCHEDULED", "20250928"]),
            row(&["def67890", "", "20250930"]),
        ];
        let values = harvest(&rows, "primary_key", &["status".into()]).expect("harvest");
        assert_eq!(status_of(&values, "abc12345").as_deref(), Some("SCHEDULED"));
        assert_eq!(status_of(&values, "def67890").as_deref(), Some(""));
    }

    #[test]
    fn rows_with_empty_key_cell_are_skipped() {
        let rows = vec![
            row(&["primary_key", "status"]),
            row(&["", "ORPHANED"]),
            row(&["   ", "ALSO ORPHANED"]),
            row(&["abc12345", "SCHEDULED"]),
        ];
        let values = harvest(&rows, "primary_key", &["status".into()]).expect("harvest");
        assert_eq!(values.len(), 1);
        assert!(values.contains_key("abc12345"));
    }

    #[test]
    fn duplicate_keys_are_last_wins() {
        let rows = vec![
            row(&["primary_key", "status"]),
            row(&["abc12345", "FIRST"]),
            row(&["abc12345", "SECOND"]),
        ];
        let values = harvest(&rows, "primary_key", &["status".into()]).expect("harvest");
        assert_eq!(status_of(&values, "abc12345").as_deref(), Some("SECOND"));
    }

    #[test]
    fn short_rows_read_as_empty_cells() {
        let rows = vec![
            row(&["primary_key", "status"]),
            row(&["abc12345"]),
        ];
        let values = harvest(&rows, "primary_key", &["status".into()]).expect("harvest");
        assert_eq!(status_of(&values, "abc12345").as_deref(), Some(""));
    }

    #[test]
    fn missing_key_column_is_fatal() {
        let rows = vec![row(&["status"]), row(&["SCHEDULED"])];
        let err = harvest(&rows, "primary_key", &["status".into()]).expect_err("mismatch");
        match err {
            SyncError::SchemaMismatch { side, columns } => {
                assert_eq!(side, TableSide::Remote);
                assert_eq!(columns, vec!["primary_key".to_string()]);
            }
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn all_missing_columns_are_named_together() {
        let rows = vec![row(&["Post Day"])];
        let err = harvest(
            &rows,
            "primary_key",
            &["status".into(), "Wix Draft ID".into()],
        )
        .expect_err("mismatch");
        match err {
            SyncError::SchemaMismatch { columns, .. } => {
                assert_eq!(
                    columns,
                    vec![
                        "primary_key".to_string(),
                        "status".to_string(),
                        "Wix Draft ID".to_string()
                    ]
                );
            }
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn multiple_preserved_columns_harvest_together() {
        let rows = vec![
            row(&["primary_key", "status", "Wix Draft ID"]),
            row(&["abc12345", "SCHEDULED", "draft-9"]),
        ];
        let values = harvest(
            &rows,
            "primary_key",
            &["status".into(), "Wix Draft ID".into()],
        )
        .expect("harvest");
        let fields = values.get("abc12345").expect("fields");
        assert_eq!(fields.get("status").map(String::as_str), Some("SCHEDULED"));
        assert_eq!(
            fields.get("Wix Draft ID").map(String::as_str),
            Some("draft-9")
        );
    }
}
