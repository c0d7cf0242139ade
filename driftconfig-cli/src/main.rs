//! Driftconfig — tier manifest management CLI.
//!
//! # Usage
//!
//! ```text
//! driftconfig init <path> --domain <name>
//! driftconfig domain list
//! driftconfig tier list [--domain <name>]
//! driftconfig tier info <name> [--domain <name>]
//! driftconfig tier add <name> [--domain <name>] [--aws-region ...] [...]
//! driftconfig sync <domain> [--dry-run]
//! driftconfig sync --all [--dry-run]
//! driftconfig diff <domain>
//! driftconfig status [--domain <name>] [--json]
//! ```

mod commands;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    diff::DiffArgs, domain::DomainCommand, init::InitArgs, status::StatusArgs, sync::SyncArgs,
    tier::TierCommand,
};
use driftconfig_core::types::TierState;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "driftconfig",
    version,
    about = "Manage deployment tiers and generate the driftconfig manifest",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register a domain whose manifest lives at the given path.
    Init(InitArgs),

    /// Inspect stored domains.
    Domain {
        #[command(subcommand)]
        command: DomainCommand,
    },

    /// Manage tiers within a stored domain.
    Tier {
        #[command(subcommand)]
        command: TierCommand,
    },

    /// Render and write the manifest for a domain.
    Sync(SyncArgs),

    /// Show unified diff of what sync would write for a domain.
    Diff(DiffArgs),

    /// Show manifest staleness across stored domains.
    Status(StatusArgs),
}

// ---------------------------------------------------------------------------
// Shared TierState argument — parsed from CLI strings, converts to core type
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse `TierState` from CLI args.
#[derive(Debug, Clone, Default)]
pub struct TierStateArg(pub TierState);

impl FromStr for TierStateArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(Self(TierState::Active)),
            "initializing" => Ok(Self(TierState::Initializing)),
            "retired" => Ok(Self(TierState::Retired)),
            other => Err(format!(
                "unknown tier state '{other}'; expected: active, initializing, retired"
            )),
        }
    }
}

impl fmt::Display for TierStateArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<TierStateArg> for TierState {
    fn from(s: TierStateArg) -> Self {
        s.0
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Init(args) => args.run(),
        Commands::Domain { command } => commands::domain::run(command),
        Commands::Tier { command } => commands::tier::run(command),
        Commands::Sync(args) => args.run(),
        Commands::Diff(args) => args.run(),
        Commands::Status(args) => args.run(),
    }
}
