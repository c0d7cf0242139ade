//! Atomic manifest writer and sync orchestration.
//!
//! ## `atomic_write` — write protocol
//!
//! 1. Render content (already done by caller).
//! 2. SHA-256 hash the rendered content.
//! 3. Compare with the stored hash → skip if identical.
//! 4. Write to `<path>.driftconfig.tmp`.
//! 5. Rename to final path (atomic on POSIX).
//! 6. Update hash store entry (caller saves the store).

use std::path::{Path, PathBuf};

use chrono::Utc;
use sha2::{Digest, Sha256};

use driftconfig_core::{inventory, types::Domain};
use driftconfig_renderer::Renderer;

use crate::error::{io_err, SyncError};
use crate::hash_store;

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome of a manifest write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File was skipped — rendered content matches the stored hash.
    Unchanged { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

/// `<manifest_path>/zappa_settings.yml` — where a domain's manifest lands.
pub fn manifest_output_path(domain: &Domain) -> PathBuf {
    domain.manifest_path.join("zappa_settings.yml")
}

// ---------------------------------------------------------------------------
// atomic_write
// ---------------------------------------------------------------------------

/// Atomically write rendered content and update the hash store.
///
/// The hash store is loaded before the call; the caller is responsible for
/// saving it afterwards. Returns [`WriteResult`] indicating whether the file
/// was written or skipped.
pub(crate) fn atomic_write(
    path: &Path,
    content: &str,
    hash_store: &mut hash_store::HashStore,
    dry_run: bool,
) -> Result<WriteResult, SyncError> {
    let tmp = PathBuf::from(format!("{}.driftconfig.tmp", path.display()));
    atomic_write_with_tmp(path, content, hash_store, dry_run, &tmp)
}

fn atomic_write_with_tmp(
    path: &Path,
    content: &str,
    hash_store: &mut hash_store::HashStore,
    dry_run: bool,
    tmp: &Path,
) -> Result<WriteResult, SyncError> {
    // Normalise line endings to LF before hashing and writing.
    let normalized = content.replace("\r\n", "\n");
    let content = normalized.as_str();

    let digest = {
        let mut h = Sha256::new();
        h.update(content.as_bytes());
        hex::encode(h.finalize())
    };

    let key = path.to_string_lossy().to_string();
    if let Some(stored) = hash_store.get(&key) {
        if stored == &digest {
            tracing::debug!("unchanged: {}", path.display());
            return Ok(WriteResult::Unchanged {
                path: path.to_path_buf(),
            });
        }
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    hash_store.insert(key, digest);

    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// sync_domain
// ---------------------------------------------------------------------------

/// Outcome of syncing a single domain.
#[derive(Debug)]
pub struct SyncDomainResult {
    pub domain_name: String,
    pub write: WriteResult,
}

/// Render and write the manifest for the named domain.
///
/// The write is hash-gated and atomic; the hash store is only persisted on a
/// real run.
pub fn sync_domain(
    domain_name: &str,
    home: &Path,
    dry_run: bool,
) -> Result<SyncDomainResult, SyncError> {
    let sync_started_at = Utc::now();

    let domain = inventory::load_domain_at(home, &domain_name.into())?;
    let renderer = Renderer::new()?;
    let manifest = renderer.render_manifest(&domain.tiers)?;

    let mut store = hash_store::load_at(home, domain_name)?;
    let output_path = manifest_output_path(&domain);
    let write = atomic_write(&output_path, &manifest, &mut store.files, dry_run)?;

    // Save the updated hash store (skip in dry-run — no filesystem changes).
    if !dry_run {
        store.synced_at = sync_started_at;
        hash_store::save_at(home, domain_name, &store)?;
    }

    Ok(SyncDomainResult {
        domain_name: domain_name.to_string(),
        write,
    })
}

// ---------------------------------------------------------------------------
// sync_all
// ---------------------------------------------------------------------------

/// Sync every stored domain.
pub fn sync_all(home: &Path, dry_run: bool) -> Result<Vec<SyncDomainResult>, SyncError> {
    let mut results = Vec::new();
    for name in inventory::list_domain_names_at(home)? {
        results.push(sync_domain(&name.0, home, dry_run)?);
    }
    Ok(results)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
