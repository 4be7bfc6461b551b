//! Two-way override merge.
//!
//! One trust direction per field class: content fields are always the local
//! dataset's; preserved fields take the remote value whenever it is
//! non-empty, and fall back to the local default otherwise. This is not a
//! three-way merge — there is no common ancestor, only two current states.

use std::collections::{BTreeMap, BTreeSet};

use sheetsync_core::Dataset;

use crate::harvest::PreservedValues;

/// What the merge did, for the run report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Preserved values carried forward from the remote table.
    pub preserved_values: usize,
    /// Local rows whose key was already present remotely.
    pub seen_keys: usize,
    /// Local rows whose key was not present remotely.
    pub new_keys: usize,
    /// Distinct identity keys shared by more than one local row.
    pub key_collisions: Vec<String>,
    /// Remote keys with no matching local row (stale entries).
    pub stale_remote_keys: Vec<String>,
}

/// Overlay harvested remote values onto the local dataset.
///
/// `keys[i]` is the identity key of `dataset` row `i`. Every preserved
/// column must already exist in the dataset header (the reconcile pipeline
/// guarantees this); columns named in the harvest but absent from
/// `preserved_columns` are ignored.
pub fn apply(
    dataset: &mut Dataset,
    keys: &[String],
    harvested: &PreservedValues,
    preserved_columns: &[String],
) -> MergeStats {
    debug_assert_eq!(dataset.row_count(), keys.len());

    let column_indices: Vec<(String, usize)> = preserved_columns
        .iter()
        .filter_map(|name| dataset.column_index(name).map(|idx| (name.clone(), idx)))
        .collect();

    let mut stats = MergeStats::default();

    for (row, key) in keys.iter().enumerate() {
        let Some(fields) = harvested.get(key) else {
            stats.new_keys += 1;
            log::debug!("new row {key} — keeping local defaults");
            continue;
        };
        stats.seen_keys += 1;
        for (column, idx) in &column_indices {
            let Some(remote_value) = fields.get(column) else {
                continue;
            };
            // Empty remote never overwrites; local default stands.
            if remote_value.trim().is_empty() {
                continue;
            }
            dataset.set(row, *idx, remote_value.clone());
            stats.preserved_values += 1;
            log::debug!("preserved {column} for {key}: '{remote_value}'");
        }
    }

    stats.key_collisions = find_collisions(keys);
    for key in &stats.key_collisions {
        log::warn!("identity key collision: {key} is shared by multiple local rows");
    }

    let local_keys: BTreeSet<&str> = keys.iter().map(String::as_str).collect();
    stats.stale_remote_keys = harvested
        .keys()
        .filter(|k| !local_keys.contains(k.as_str()))
        .cloned()
        .collect();
    if !stats.stale_remote_keys.is_empty() {
        log::warn!(
            "{} remote key(s) have no matching local row and will be dropped by the rewrite: {}",
            stats.stale_remote_keys.len(),
            stats.stale_remote_keys.join(", ")
        );
    }

    stats
}

fn find_collisions(keys: &[String]) -> Vec<String> {
    let mut counts = BTreeMap::<&str, usize>::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(key, _)| key.to_owned())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn dataset_with_status(rows: &[(&str, &str)]) -> (Dataset, Vec<String>) {
        // Header: key, status, Post Day — keys supplied directly for clarity.
        let mut grid = vec![vec![
            "primary_key".to_string(),
            "status".to_string(),
            "Post Day".to_string(),
        ]];
        let mut keys = Vec::new();
        for (key, status) in rows {
            grid.push(vec![key.to_string(), status.to_string(), "day".to_string()]);
            keys.push(key.to_string());
        }
        (Dataset::from_grid(grid).unwrap(), keys)
    }

    fn harvested(entries: &[(&str, &str)]) -> PreservedValues {
        entries
            .iter()
            .map(|(key, status)| {
                let mut fields = BTreeMap::new();
                fields.insert("status".to_string(), status.to_string());
                (key.to_string(), fields)
            })
            .collect()
    }

    const STATUS: usize = 1;

    #[test]
    fn non_empty_remote_wins_over_empty_local() {
        let (mut dataset, keys) = dataset_with_status(&[("k1", "")]);
        let stats = apply(
            &mut dataset,
            &keys,
            &harvested(&[("k1", "SCHEDULED")]),
            &["status".into()],
        );
        assert_eq!(dataset.get(0, STATUS), "SCHEDULED");
        assert_eq!(stats.preserved_values, 1);
        assert_eq!(stats.seen_keys, 1);
    }

    #[test]
    fn non_empty_remote_wins_over_non_empty_local() {
        let (mut dataset, keys) = dataset_with_status(&[("k1", "DRAFT")]);
        apply(
            &mut dataset,
            &keys,
            &harvested(&[("k1", "SCHEDULED")]),
            &["status".into()],
        );
        // Remote human edit is authoritative even over a local default.
        assert_eq!(dataset.get(0, STATUS), "SCHEDULED");
    }

    #[test]
    fn empty_remote_never_overwrites_local() {
        let (mut dataset, keys) = dataset_with_status(&[("k1", "DRAFT")]);
        let stats = apply(
            &mut dataset,
            &keys,
            &harvested(&[("k1", "")]),
            &["status".into()],
        );
        assert_eq!(dataset.get(0, STATUS), "DRAFT");
        assert_eq!(stats.preserved_values, 0);
        assert_eq!(stats.seen_keys, 1);
    }

    #[test]
    fn whitespace_remote_counts_as_empty() {
        let (mut dataset, keys) = dataset_with_status(&[("k1", "DRAFT")]);
        apply(
            &mut dataset,
            &keys,
            &harvested(&[("k1", "   ")]),
            &["status".into()],
        );
        assert_eq!(dataset.get(0, STATUS), "DRAFT");
    }

    #[test]
    fn unknown_key_keeps_local_defaults() {
        let (mut dataset, keys) = dataset_with_status(&[("k1", "")]);
        let stats = apply(&mut dataset, &keys, &harvested(&[]), &["status".into()]);
        assert_eq!(dataset.get(0, STATUS), "");
        assert_eq!(stats.new_keys, 1);
        assert_eq!(stats.seen_keys, 0);
    }

    #[test]
    fn merge_is_idempotent() {
        let (mut dataset, keys) = dataset_with_status(&[("k1", ""), ("k2", "DRAFT")]);
        let remote = harvested(&[("k1", "SCHEDULED"), ("k2", "")]);
        apply(&mut dataset, &keys, &remote, &["status".into()]);
        let after_first = dataset.clone();

        apply(&mut dataset, &keys, &remote, &["status".into()]);
        assert_eq!(dataset, after_first);
    }

    #[test]
    fn collisions_are_reported_not_fatal() {
        let (mut dataset, keys) = dataset_with_status(&[("dup", ""), ("dup", ""), ("k3", "")]);
        let stats = apply(&mut dataset, &keys, &harvested(&[]), &["status".into()]);
        assert_eq!(stats.key_collisions, vec!["dup".to_string()]);
        assert_eq!(stats.new_keys, 3);
    }

    #[test]
    fn stale_remote_keys_are_reported() {
        let (mut dataset, keys) = dataset_with_status(&[("k1", "")]);
        let stats = apply(
            &mut dataset,
            &keys,
            &harvested(&[("k1", "X"), ("gone1", "OLD"), ("gone2", "OLD")]),
            &["status".into()],
        );
        assert_eq!(
            stats.stale_remote_keys,
            vec!["gone1".to_string(), "gone2".to_string()]
        );
    }

    #[test]
    fn preserved_value_is_cell_cleaned_on_entry() {
        let (mut dataset, keys) = dataset_with_status(&[("k1", "DRAFT")]);
        apply(
            &mut dataset,
            &keys,
            &harvested(&[("k1", "NaN")]),
            &["status".into()],
        );
        // "NaN" is a non-empty remote value, so it wins the precedence rule,
        // but cell cleaning normalizes it to empty on entry.
        assert_eq!(dataset.get(0, STATUS), "");
    }
}
