//! `sheetsync pull` — fetch the remote worksheet down into a local CSV.
//!
//! The reverse of `sync`: the remote table (statuses included) becomes the
//! local file. The previous local file is renamed to a timestamped backup
//! before anything is written, so a bad pull never destroys it.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use sheetsync_core::{dataset, Dataset, SyncProfile};
use sheetsync_remote::RemoteTable;

/// Arguments for `sheetsync pull`.
#[derive(Args, Debug)]
pub struct PullArgs {
    /// Destination CSV path (default: derived from the worksheet title).
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Path to the sync profile YAML.
    #[arg(long, default_value = "sheetsync.yaml")]
    pub config: PathBuf,
}

impl PullArgs {
    pub fn run(self) -> Result<()> {
        let profile = super::load_profile(&self.config)?;
        let remote = super::connect(&profile)?;

        let grid = remote
            .read_all(&profile.worksheet)
            .with_context(|| format!("failed to read worksheet '{}'", profile.worksheet))?;
        let Some(pulled) = Dataset::from_grid(grid) else {
            println!("'{}' is empty — nothing to pull.", profile.worksheet);
            return Ok(());
        };

        let output = self
            .output
            .unwrap_or_else(|| default_output(&profile.worksheet.0));
        let backup = dataset::backup_existing(&output)
            .with_context(|| format!("failed to back up '{}'", output.display()))?;
        dataset::write(&output, &pulled)
            .with_context(|| format!("failed to write '{}'", output.display()))?;

        println!(
            "✓ '{}' pulled ({} rows) into {}",
            profile.worksheet,
            pulled.row_count(),
            output.display()
        );
        if let Some(backup) = backup {
            println!("  ✎  previous file backed up to {}", backup.display());
        }
        print_status_summary(&profile, &pulled);
        Ok(())
    }
}

/// `Content schedule` → `content_schedule.csv`, next to the working dir.
fn default_output(worksheet: &str) -> PathBuf {
    let slug: String = worksheet
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    PathBuf::from(format!("{slug}.csv"))
}

#[derive(Tabled)]
struct StatusTableRow {
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "rows")]
    rows: usize,
}

/// Per-value row counts for the first preserved column, when present.
fn print_status_summary(profile: &SyncProfile, pulled: &Dataset) {
    let Some(column) = profile.preserved_columns.first() else {
        return;
    };
    let Some(idx) = pulled.column_index(column) else {
        return;
    };

    let mut counts = BTreeMap::<String, usize>::new();
    for row in pulled.rows() {
        let value = row[idx].trim();
        let label = if value.is_empty() {
            "(none)".to_string()
        } else {
            value.to_string()
        };
        *counts.entry(label).or_insert(0) += 1;
    }

    println!("{}", format!("{column} breakdown").bold());
    let rows: Vec<StatusTableRow> = counts
        .into_iter()
        .map(|(status, rows)| StatusTableRow { status, rows })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}
