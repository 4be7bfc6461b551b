//! `sheetsync diff` — unified diff of what a sync would change.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use sheetsync_core::dataset;
use sheetsync_engine::{diff, reconcile};

/// Arguments for `sheetsync diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Path to the local CSV dataset.
    pub dataset: PathBuf,

    /// Path to the sync profile YAML.
    #[arg(long, default_value = "sheetsync.yaml")]
    pub config: PathBuf,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let profile = super::load_profile(&self.config)?;
        let local = dataset::read(&self.dataset)
            .with_context(|| format!("failed to read dataset '{}'", self.dataset.display()))?;
        let mut remote = super::connect(&profile)?;

        // Dry run: merges and reads, never writes, never snapshots.
        let outcome = reconcile(&profile, local, &mut remote, true, Path::new("."))
            .with_context(|| format!("diff failed for worksheet '{}'", profile.worksheet))?;

        let text = diff::unified_diff(&profile.worksheet, &outcome.remote_before, &outcome.merged);
        if text.is_empty() {
            println!("No differences for '{}'.", profile.worksheet);
            return Ok(());
        }
        print!("{text}");
        if !text.ends_with('\n') {
            println!();
        }
        Ok(())
    }
}
