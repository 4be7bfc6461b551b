pub mod diff;
pub mod pull;
pub mod sync;

use std::path::Path;

use anyhow::{Context, Result};

use sheetsync_core::{profile, SyncProfile};
use sheetsync_remote::RestTable;

/// Load and validate the profile named by `--config`.
pub fn load_profile(path: &Path) -> Result<SyncProfile> {
    profile::load(path).with_context(|| format!("failed to load sync profile '{}'", path.display()))
}

/// Build the REST client for a profile's spreadsheet.
pub fn connect(profile: &SyncProfile) -> Result<RestTable> {
    RestTable::connect(profile.spreadsheet_id.clone(), &profile.credentials_file).with_context(
        || {
            format!(
                "failed to connect to spreadsheet '{}'",
                profile.spreadsheet_id
            )
        },
    )
}
