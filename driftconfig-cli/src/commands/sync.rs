//! `driftconfig sync` — render and write the manifest for a domain.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use driftconfig_sync::{
    pipeline::{self, SyncScope},
    WriteResult,
};

/// Arguments for `driftconfig sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Name of the domain to sync (omit when using `--all`).
    pub domain: Option<String>,

    /// Sync every stored domain.
    #[arg(long, conflicts_with = "domain")]
    pub all: bool,

    /// Show what would be written without actually writing any files.
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let home: PathBuf = dirs::home_dir().context("could not determine home directory")?;

        if self.all {
            let results =
                pipeline::run(&home, SyncScope::All, self.dry_run).context("sync --all failed")?;
            for r in &results {
                print_result(&r.domain_name, &r.write, self.dry_run);
            }
            if results.is_empty() {
                println!("No domains stored. Run `driftconfig init` first.");
            }
        } else {
            let name = self
                .domain
                .clone()
                .context("provide a domain name or use --all")?;
            let mut results =
                pipeline::run(&home, SyncScope::Domain(name.clone()), self.dry_run)
                    .with_context(|| format!("sync failed for '{name}'"))?;
            if let Some(result) = results.pop() {
                print_result(&result.domain_name, &result.write, self.dry_run);
            }
        }

        Ok(())
    }
}

fn print_result(domain_name: &str, write: &WriteResult, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    match write {
        WriteResult::Written { path } => {
            println!("{prefix}✓ '{domain_name}' synced");
            println!("  ✎  {}", path.display());
        }
        WriteResult::WouldWrite { path } => {
            println!("{prefix}✓ '{domain_name}' would change");
            println!("  ~  {}", path.display());
        }
        WriteResult::Unchanged { path } => {
            println!("{prefix}✓ '{domain_name}' — nothing to do");
            println!("  ·  {}", path.display());
        }
    }
}
