//! Sync profile — the explicit configuration object for a run.
//!
//! One YAML file per synced worksheet:
//!
//! ```yaml
//! spreadsheet_id: 1ghZXeMqFq97Vl6yLKrtDmMQdQkd-4EN5yQs34NA_sBQ
//! worksheet: Content schedule
//! credentials_file: google_credentials.json
//! key_fields: [Post Day, Post Type]
//! preserved_columns: [status]
//! ```
//!
//! The profile replaces the module-level constants the legacy scripts
//! carried; nothing about a run is ambient. Loading performs the pre-flight
//! checks (credentials present, key fields non-empty) so every
//! configuration failure is reported before the first network call.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{config_io_err, ConfigError};
use crate::types::{SpreadsheetId, WorksheetTitle};

/// Configuration for one reconcile target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncProfile {
    /// Container id of the remote spreadsheet.
    pub spreadsheet_id: SpreadsheetId,

    /// Title of the worksheet (tab) to reconcile against.
    pub worksheet: WorksheetTitle,

    /// Path to the service credentials JSON file.
    pub credentials_file: PathBuf,

    /// Name of the identity-key column in both local and remote tables.
    #[serde(default = "default_key_column")]
    pub key_column: String,

    /// Columns whose values feed the identity key, in order.
    pub key_fields: Vec<String>,

    /// Columns whose non-empty remote values win over local defaults.
    #[serde(default = "default_preserved_columns")]
    pub preserved_columns: Vec<String>,
}

fn default_key_column() -> String {
    "primary_key".to_owned()
}

fn default_preserved_columns() -> Vec<String> {
    vec!["status".to_owned()]
}

/// Load and validate a profile from `path`.
///
/// Returns `ConfigError::ProfileNotFound` if absent, `ConfigError::Parse`
/// (with path + line context) if malformed, and the pre-flight errors
/// (`CredentialsNotFound`, `NoKeyFields`) for an invalid profile.
pub fn load(path: &Path) -> Result<SyncProfile, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::ProfileNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| config_io_err(path, e))?;
    let profile: SyncProfile = serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    profile.validate(path)?;
    Ok(profile)
}

impl SyncProfile {
    /// Pre-flight validation; `path` only labels the diagnostics.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        if self.key_fields.is_empty() {
            return Err(ConfigError::NoKeyFields {
                path: path.to_path_buf(),
            });
        }
        if !self.credentials_file.exists() {
            return Err(ConfigError::CredentialsNotFound {
                path: self.credentials_file.clone(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn write_profile(dir: &Path, yaml: &str) -> PathBuf {
        let path = dir.join("profile.yaml");
        fs::write(&path, yaml).unwrap();
        path
    }

    fn touch_credentials(dir: &Path) -> PathBuf {
        let path = dir.join("google_credentials.json");
        fs::write(&path, "{}").unwrap();
        path
    }

    #[test]
    fn load_full_profile() {
        let tmp = TempDir::new().unwrap();
        let creds = touch_credentials(tmp.path());
        let yaml = format!(
            "spreadsheet_id: sheet-1\n\
             worksheet: Content schedule\n\
             credentials_file: {}\n\
             key_column: primary_key\n\
             key_fields: [Post Day, Post Type]\n\
             preserved_columns: [status]\n",
            creds.display()
        );
        let path = write_profile(tmp.path(), &yaml);

        let profile = load(&path).expect("load");
        assert_eq!(profile.spreadsheet_id, SpreadsheetId::from("sheet-1"));
        assert_eq!(profile.worksheet, WorksheetTitle::from("Content schedule"));
        assert_eq!(profile.key_fields, vec!["Post Day", "Post Type"]);
        assert_eq!(profile.preserved_columns, vec!["status"]);
    }

    #[test]
    fn defaults_for_key_column_and_preserved() {
        let tmp = TempDir::new().unwrap();
        let creds = touch_credentials(tmp.path());
        let yaml = format!(
            "spreadsheet_id: sheet-1\n\
             worksheet: Blog\n\
             credentials_file: {}\n\
             key_fields: [Publish Date, Blog Title]\n",
            creds.display()
        );
        let path = write_profile(tmp.path(), &yaml);

        let profile = load(&path).expect("load");
        assert_eq!(profile.key_column, "primary_key");
        assert_eq!(profile.preserved_columns, vec!["status"]);
    }

    #[test]
    fn missing_profile_file() {
        let tmp = TempDir::new().unwrap();
        let err = load(&tmp.path().join("nope.yaml")).expect_err("missing");
        assert!(matches!(err, ConfigError::ProfileNotFound { .. }));
    }

    #[test]
    fn missing_credentials_is_preflight_fatal() {
        let tmp = TempDir::new().unwrap();
        let yaml = "spreadsheet_id: s\n\
                    worksheet: w\n\
                    credentials_file: /definitely/not/here.json\n\
                    key_fields: [a]\n";
        let path = write_profile(tmp.path(), yaml);

        let err = load(&path).expect_err("creds");
        match err {
            ConfigError::CredentialsNotFound { path } => {
                assert_eq!(path, PathBuf::from("/definitely/not/here.json"));
            }
            other => panic!("expected CredentialsNotFound, got {other:?}"),
        }
    }

    #[test]
    fn empty_key_fields_is_preflight_fatal() {
        let tmp = TempDir::new().unwrap();
        let creds = touch_credentials(tmp.path());
        let yaml = format!(
            "spreadsheet_id: s\nworksheet: w\ncredentials_file: {}\nkey_fields: []\n",
            creds.display()
        );
        let path = write_profile(tmp.path(), &yaml);

        let err = load(&path).expect_err("key fields");
        assert!(matches!(err, ConfigError::NoKeyFields { .. }));
    }

    #[test]
    fn malformed_yaml_reports_path() {
        let tmp = TempDir::new().unwrap();
        let path = write_profile(tmp.path(), "worksheet: [unbalanced");
        let err = load(&path).expect_err("parse");
        match err {
            ConfigError::Parse { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected Parse, got {other:?}"),
        }
    }
}
