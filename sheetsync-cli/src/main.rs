//! sheetsync — status-preserving spreadsheet reconciliation CLI.
//!
//! # Usage
//!
//! ```text
//! sheetsync sync <dataset.csv> --config <profile.yaml> [--dry-run] [--json]
//! sheetsync diff <dataset.csv> --config <profile.yaml>
//! sheetsync pull --config <profile.yaml> [--output <path>]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{diff::DiffArgs, pull::PullArgs, sync::SyncArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "sheetsync",
    version,
    about = "Sync a local CSV dataset to a remote spreadsheet without clobbering human edits",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reconcile a local dataset against the remote worksheet and rewrite it.
    Sync(SyncArgs),

    /// Show a unified diff of what sync would change, without writing.
    Diff(DiffArgs),

    /// Pull the remote worksheet down into a local CSV (backing up the old one).
    Pull(PullArgs),
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Diff(args) => args.run(),
        Commands::Pull(args) => args.run(),
    }
}
