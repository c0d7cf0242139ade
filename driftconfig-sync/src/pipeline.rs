//! Shared sync pipeline entrypoint used by the CLI.

use std::path::Path;

use crate::{sync_all, sync_domain, SyncDomainResult, SyncError};

/// Scope for a sync pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncScope {
    /// Sync every stored domain.
    All,
    /// Sync a single named domain.
    Domain(String),
}

/// Run the sync pipeline for a scope.
pub fn run(
    home: &Path,
    scope: SyncScope,
    dry_run: bool,
) -> Result<Vec<SyncDomainResult>, SyncError> {
    match scope {
        SyncScope::All => sync_all(home, dry_run),
        SyncScope::Domain(name) => Ok(vec![sync_domain(&name, home, dry_run)?]),
    }
}
