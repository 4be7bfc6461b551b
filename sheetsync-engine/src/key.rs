//! Identity key derivation.
//!
//! A row's identity key is the SHA-256 digest of its key-field values joined
//! with `_`, truncated to 8 hex characters. Same field values ⇒ same token,
//! across runs and processes. 8 hex chars is ~4 billion values; collisions
//! are possible and are *detected* (counted and logged by the merge step),
//! not prevented. Widening the token would orphan every preserved value
//! already stored remotely under the short form.

use sha2::{Digest, Sha256};

use sheetsync_core::Dataset;

use crate::error::{SyncError, TableSide};

/// Hex length of an identity key token.
pub const KEY_LENGTH: usize = 8;

const FIELD_SEPARATOR: &str = "_";

/// Derive the identity key for one set of key-field values.
///
/// Missing fields must be passed as empty strings; this function never
/// fails.
pub fn identity_key<S: AsRef<str>>(parts: &[S]) -> String {
    let joined = parts
        .iter()
        .map(|p| p.as_ref())
        .collect::<Vec<_>>()
        .join(FIELD_SEPARATOR);
    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..KEY_LENGTH].to_owned()
}

/// Compute the identity key of every row in `dataset` from `key_fields`.
///
/// The local header must contain every key field; a missing one is a
/// `SchemaMismatch` naming all absentees. Empty cells participate as empty
/// strings.
pub fn keys_for_dataset(dataset: &Dataset, key_fields: &[String]) -> Result<Vec<String>, SyncError> {
    let mut indices = Vec::with_capacity(key_fields.len());
    let mut missing = Vec::new();
    for field in key_fields {
        match dataset.column_index(field) {
            Some(idx) => indices.push(idx),
            None => missing.push(field.clone()),
        }
    }
    if !missing.is_empty() {
        return Err(SyncError::SchemaMismatch {
            side: TableSide::Local,
            columns: missing,
        });
    }

    let keys = (0..dataset.row_count())
        .map(|row| {
            let parts: Vec<&str> = indices.iter().map(|&col| dataset.get(row, col)).collect();
            identity_key(&parts)
        })
        .collect();
    Ok(keys)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_deterministic() {
        let a = identity_key(&["20250928", "Reel"]);
        let b = identity_key(&["20250928", "Reel"]);
        assert_eq!(a, b);
    }

    #[test]
    fn key_is_eight_hex_chars() {
        let key = identity_key(&["20250928", "Reel"]);
        assert_eq!(key.len(), KEY_LENGTH);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn distinct_fields_give_distinct_keys() {
        assert_ne!(
            identity_key(&["20250928", "Reel"]),
            identity_key(&["20250930", "Reel"])
        );
        assert_ne!(
            identity_key(&["20250928", "Reel"]),
            identity_key(&["20250928", "Story"])
        );
    }

    #[test]
    fn missing_fields_hash_as_empty() {
        assert_eq!(identity_key(&["", ""]), identity_key(&["", ""]));
        assert_ne!(identity_key(&["", ""]), identity_key(&["x", ""]));
    }

    #[test]
    fn dataset_keys_follow_row_order() {
        let dataset = Dataset::from_grid(vec![
            vec!["Post Day".into(), "Post Type".into()],
            vec!["20250928".into(), "Reel".into()],
            vec!["20250930".into(), "Reel".into()],
        ])
        .unwrap();
        let keys =
            keys_for_dataset(&dataset, &["Post Day".into(), "Post Type".into()]).expect("keys");
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0], identity_key(&["20250928", "Reel"]));
        assert_eq!(keys[1], identity_key(&["20250930", "Reel"]));
    }

    #[test]
    fn missing_local_key_field_is_schema_mismatch() {
        let dataset = Dataset::from_grid(vec![
            vec!["Post Day".into()],
            vec!["20250928".into()],
        ])
        .unwrap();
        let err = keys_for_dataset(&dataset, &["Post Day".into(), "Post Type".into()])
            .expect_err("mismatch");
        match err {
            SyncError::SchemaMismatch { side, columns } => {
                assert_eq!(side, TableSide::Local);
                assert_eq!(columns, vec!["Post Type".to_string()]);
            }
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }
}
