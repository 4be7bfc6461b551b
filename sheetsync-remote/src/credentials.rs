//! Service credentials for the REST client.
//!
//! A JSON file holding a ready bearer token:
//!
//! ```json
//! { "access_token": "ya29....", "endpoint": "https://sheets.googleapis.com" }
//! ```
//!
//! Token acquisition (service-account key exchange and friends) happens
//! outside this tool; absence or emptiness of the file is a pre-flight
//! fatal, reported before any network call.

use std::path::Path;

use serde::Deserialize;

use crate::error::RemoteError;

pub const DEFAULT_ENDPOINT: &str = "https://sheets.googleapis.com";

/// Parsed contents of the credentials file.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    /// Bearer token sent on every request.
    pub access_token: String,

    /// Base URL of the values API. Overridable for tests and self-hosted
    /// gateways.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_owned()
}

/// Load and validate credentials from `path`.
pub fn load(path: &Path) -> Result<Credentials, RemoteError> {
    let err = |reason: String| RemoteError::Credentials {
        path: path.to_path_buf(),
        reason,
    };

    if !path.exists() {
        return Err(err("file not found".to_owned()));
    }
    let contents = std::fs::read_to_string(path).map_err(|e| err(e.to_string()))?;
    let credentials: Credentials =
        serde_json::from_str(&contents).map_err(|e| err(e.to_string()))?;
    if credentials.access_token.trim().is_empty() {
        return Err(err("access_token is empty".to_owned()));
    }
    Ok(credentials)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
