//! `driftconfig diff <domain>` — show unified diff of what sync would write.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use driftconfig_sync::diff_domain;

/// Arguments for `driftconfig diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Domain name to diff.
    pub domain: String,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let home: PathBuf = dirs::home_dir().context("could not determine home directory")?;

        let result = diff_domain(&self.domain, &home)
            .with_context(|| format!("diff failed for '{}'", self.domain))?;

        match result.unified_diff {
            None => println!("No differences for '{}'.", result.domain_name),
            Some(diff) => {
                print!("{diff}");
                if !diff.ends_with('\n') {
                    println!();
                }
            }
        }

        Ok(())
    }
}
