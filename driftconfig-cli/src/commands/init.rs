//! `driftconfig init <path> --domain <name>`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use driftconfig_core::{inventory, types::DomainName};

/// Register a domain in the driftconfig inventory.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Absolute or relative path to the directory receiving the manifest.
    pub path: PathBuf,

    /// Domain name (e.g. "dgnorth"). Creates ~/.driftconfig/domains/<name>.yaml
    #[arg(long, short = 'd')]
    pub domain: String,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        let path = self
            .path
            .canonicalize()
            .with_context(|| format!("cannot resolve path '{}'", self.path.display()))?;

        let name = self.domain.clone();
        let domain = inventory::init(path.clone(), DomainName::from(self.domain))
            .with_context(|| {
                format!("failed to init '{}' at '{}'", name, path.display())
            })?;

        println!("✓ Registered domain '{}'", domain.name);
        println!("  Manifest target: {}", domain.manifest_path.display());
        println!("  Saved to: ~/.driftconfig/domains/{}.yaml", domain.name);
        Ok(())
    }
}
