//! `driftconfig domain list`

use anyhow::{Context, Result};
use clap::Subcommand;

use driftconfig_core::inventory;

/// Inspect stored domains.
#[derive(Subcommand, Debug)]
pub enum DomainCommand {
    /// List all stored domains.
    List,
}

pub fn run(cmd: DomainCommand) -> Result<()> {
    match cmd {
        DomainCommand::List => list(),
    }
}

fn list() -> Result<()> {
    let domains = inventory::list_domains()
        .context("failed to load inventory — run `driftconfig init` first")?;

    if domains.is_empty() {
        println!("No domains stored.");
        println!("Run: driftconfig init <path> --domain <name>");
        return Ok(());
    }

    for domain in &domains {
        println!(
            "{} ({} tier{})",
            domain.name,
            domain.tiers.len(),
            if domain.tiers.len() == 1 { "" } else { "s" }
        );
        println!("  Manifest: {}", domain.manifest_path.join("zappa_settings.yml").display());
    }

    Ok(())
}
