//! `sheetsync sync` — reconcile the local dataset and rewrite the worksheet.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use sheetsync_core::dataset;
use sheetsync_engine::{reconcile, ReconcileReport, SyncOutcome};

/// Arguments for `sheetsync sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Path to the local CSV dataset (the content source of truth).
    pub dataset: PathBuf,

    /// Path to the sync profile YAML.
    #[arg(long, default_value = "sheetsync.yaml")]
    pub config: PathBuf,

    /// Compute and report the merge without writing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit the run report as JSON instead of human-readable output.
    #[arg(long)]
    pub json: bool,

    /// Directory where pre-write snapshots of the remote content are kept.
    #[arg(long, default_value = ".")]
    pub snapshot_dir: PathBuf,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let profile = super::load_profile(&self.config)?;
        let local = dataset::read(&self.dataset)
            .with_context(|| format!("failed to read dataset '{}'", self.dataset.display()))?;
        let mut remote = super::connect(&profile)?;

        let outcome = reconcile(&profile, local, &mut remote, self.dry_run, &self.snapshot_dir)
            .with_context(|| format!("sync failed for worksheet '{}'", profile.worksheet))?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&outcome.report)
                    .context("failed to serialize sync report")?
            );
            return Ok(());
        }

        print_report(&outcome.report);
        Ok(())
    }
}

fn print_report(report: &ReconcileReport) {
    let prefix = match report.outcome {
        SyncOutcome::DryRun => "[dry-run] ",
        SyncOutcome::Written => "",
    };
    println!(
        "{prefix}✓ '{}' synced ({} rows, {} preserved, {} new)",
        report.worksheet, report.rows, report.preserved_values, report.new_keys
    );
    if let Some(snapshot) = &report.snapshot {
        println!("  ✎  snapshot: {}", snapshot.display());
    }
    for key in &report.key_collisions {
        println!(
            "  {}  key collision: {key} is shared by multiple local rows",
            "~".yellow()
        );
    }
    if !report.stale_remote_keys.is_empty() {
        println!(
            "  {}  {} stale remote row(s) dropped: {}",
            "~".yellow(),
            report.stale_remote_keys.len(),
            report.stale_remote_keys.join(", ")
        );
    }
    if matches!(report.outcome, SyncOutcome::DryRun) {
        println!("  ·  nothing written; rerun without --dry-run to apply");
    }
}
