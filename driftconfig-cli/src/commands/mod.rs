pub mod diff;
pub mod domain;
pub mod init;
pub mod status;
pub mod sync;
pub mod tier;

use anyhow::{Context, Result};

use driftconfig_core::{inventory, types::DomainName};

/// Resolve which stored domain a command targets.
///
/// When `--domain` is omitted and exactly one domain is stored, that one is
/// used automatically.
pub(crate) fn resolve_domain(explicit: Option<String>) -> Result<DomainName> {
    match explicit {
        Some(name) => Ok(DomainName::from(name)),
        None => {
            let domains = inventory::list_domain_names().context("failed to read domain list")?;
            match domains.len() {
                0 => Err(anyhow::anyhow!(
                    "No domains found. Run `driftconfig init <path> --domain <name>` first."
                )),
                1 => Ok(domains.into_iter().next().expect("len == 1")),
                _ => {
                    let names: Vec<&str> = domains.iter().map(|d| d.0.as_str()).collect();
                    Err(anyhow::anyhow!(
                        "Multiple domains found ({}). Specify --domain <name>.",
                        names.join(", ")
                    ))
                }
            }
        }
    }
}
