//! Staleness signal detection for stored domains.
//!
//! Signal precedence:
//! 1. `NeverSynced` (hash store missing or empty)
//! 2. `Stale` (manifest file missing, or inventory changed after `synced_at`)
//! 3. `Modified` (manifest edited since last sync hash)
//! 4. `Current`

use std::io::ErrorKind;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use driftconfig_core::{inventory, types::Domain};

use crate::error::io_err;
use crate::hash_store;
use crate::writer::manifest_output_path;
use crate::SyncError;

/// Staleness classification for a domain's manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StalenessSignal {
    NeverSynced,
    Current,
    Stale { reason: String },
    Modified,
}

/// Check a domain's manifest against inventory metadata, the hash store, and
/// the on-disk file.
pub fn check(home: &Path, domain: &Domain) -> Result<StalenessSignal, SyncError> {
    // First-run handling: no hash file or no tracked hashes is "never synced",
    // not "stale".
    let store_path = hash_store::store_path_at(home, &domain.name.0);
    let store_exists = store_path.exists();
    let store = hash_store::load_at(home, &domain.name.0)?;
    if !store_exists || store.files.is_empty() {
        return Ok(StalenessSignal::NeverSynced);
    }

    let manifest = manifest_output_path(domain);
    match std::fs::metadata(&manifest) {
        Ok(_) => {}
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Ok(StalenessSignal::Stale {
                reason: format!("manifest missing: {}", manifest.display()),
            });
        }
        Err(err) => return Err(io_err(&manifest, err)),
    }

    // Freshness is based on hash-store sync time, not the manifest's mtime.
    let inventory_path = inventory::domain_path_at(home, &domain.name);
    let inventory_meta =
        std::fs::metadata(&inventory_path).map_err(|e| io_err(&inventory_path, e))?;
    let inventory_mtime = inventory_meta
        .modified()
        .map_err(|e| io_err(&inventory_path, e))?;
    if unix_duration(inventory_mtime) > datetime_to_unix_duration(store.synced_at) {
        return Ok(StalenessSignal::Stale {
            reason: format!(
                "inventory changed {} ago",
                format_system_time_age(inventory_mtime)
            ),
        });
    }

    let key = manifest.to_string_lossy().to_string();
    if let Some(expected_hash) = store.files.get(&key) {
        if &hash_file(&manifest)? != expected_hash {
            return Ok(StalenessSignal::Modified);
        }
    }

    Ok(StalenessSignal::Current)
}

/// Format age from a filesystem timestamp.
pub fn format_system_time_age(timestamp: SystemTime) -> String {
    let age = SystemTime::now()
        .duration_since(timestamp)
        .unwrap_or_default();
    format_seconds(age.as_secs())
}

/// Format age from a chrono timestamp (hash store `synced_at`).
pub fn format_datetime_age(timestamp: DateTime<Utc>) -> String {
    let now = Utc::now();
    let age = now.signed_duration_since(timestamp).num_seconds().max(0) as u64;
    format_seconds(age)
}

fn hash_file(path: &Path) -> Result<String, SyncError> {
    let content = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let normalized = content.replace("\r\n", "\n");
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

fn unix_duration(timestamp: SystemTime) -> Duration {
    timestamp.duration_since(UNIX_EPOCH).unwrap_or_default()
}

fn datetime_to_unix_duration(timestamp: DateTime<Utc>) -> Duration {
    let secs = timestamp.timestamp().max(0) as u64;
    Duration::new(secs, timestamp.timestamp_subsec_nanos())
}

fn format_seconds(seconds: u64) -> String {
    if seconds < 60 {
        return format!("{seconds}s");
    }
    if seconds < 60 * 60 {
        return format!("{}m", seconds / 60);
    }
    if seconds < 60 * 60 * 24 {
        return format!("{}h", seconds / (60 * 60));
    }
    format!("{}d", seconds / (60 * 60 * 24))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use driftconfig_core::types::{DomainName, Tier};
    use filetime::FileTime;
    use tempfile::TempDir;

    use crate::sync_domain;

    use super::*;

    fn make_tier(name: &str) -> Tier {
        let mut tier = Tier::named(name);
        tier.aws_region = Some("eu-west-1".to_string());
        tier.s3_origin_url = Some("s3://cfg-bucket/config".to_string());
        tier.s3_bucket_region = Some("us-east-1".to_string());
        tier.organization_name = Some("acme".to_string());
        tier
    }

    fn setup_domain(home: &TempDir, workspace: &TempDir) -> Domain {
        let manifest_dir = workspace.path().join("dgnorth");
        fs::create_dir_all(&manifest_dir).expect("mkdir");
        inventory::init_at(manifest_dir, DomainName::from("dgnorth"), home.path())
            .expect("init");
        inventory::add_tier_at(home.path(), &DomainName::from("dgnorth"), make_tier("DEVNORTH"))
            .expect("add tier")
    }

    /// Backdate the inventory file so its mtime predates `synced_at`; the
    /// add-tier save above otherwise races the sync timestamp.
    fn backdate_inventory(home: &TempDir) {
        let path = inventory::domain_path_at(home.path(), &DomainName::from("dgnorth"));
        let mtime = FileTime::from_unix_time(FileTime::now().unix_seconds() - 60, 0);
        filetime::set_file_mtime(&path, mtime).expect("set mtime");
    }

    fn touch_inventory_in_future(home: &TempDir) {
        let path = inventory::domain_path_at(home.path(), &DomainName::from("dgnorth"));
        let mtime = FileTime::from_unix_time(FileTime::now().unix_seconds() + 60, 0);
        filetime::set_file_mtime(&path, mtime).expect("set mtime");
    }

    #[test]
    fn never_synced_when_hash_store_missing() {
        let home = TempDir::new().expect("home");
        let workspace = TempDir::new().expect("workspace");
        let domain = setup_domain(&home, &workspace);

        let signal = check(home.path(), &domain).expect("check");
        assert_eq!(signal, StalenessSignal::NeverSynced);
    }

    #[test]
    fn current_after_sync() {
        let home = TempDir::new().expect("home");
        let workspace = TempDir::new().expect("workspace");
        let domain = setup_domain(&home, &workspace);
        sync_domain("dgnorth", home.path(), false).expect("sync");
        backdate_inventory(&home);

        let signal = check(home.path(), &domain).expect("check");
        assert_eq!(signal, StalenessSignal::Current);
    }

    #[test]
    fn stale_when_inventory_newer_than_sync() {
        let home = TempDir::new().expect("home");
        let workspace = TempDir::new().expect("workspace");
        let domain = setup_domain(&home, &workspace);
        sync_domain("dgnorth", home.path(), false).expect("sync");
        touch_inventory_in_future(&home);

        let signal = check(home.path(), &domain).expect("check");
        match signal {
            StalenessSignal::Stale { reason } => assert!(reason.contains("inventory")),
            other => panic!("expected stale, got {other:?}"),
        }
    }

    #[test]
    fn stale_when_manifest_deleted() {
        let home = TempDir::new().expect("home");
        let workspace = TempDir::new().expect("workspace");
        let domain = setup_domain(&home, &workspace);
        sync_domain("dgnorth", home.path(), false).expect("sync");
        backdate_inventory(&home);

        fs::remove_file(manifest_output_path(&domain)).expect("remove manifest");
        let signal = check(home.path(), &domain).expect("check");
        match signal {
            StalenessSignal::Stale { reason } => assert!(reason.contains("missing")),
            other => panic!("expected stale, got {other:?}"),
        }
    }

    #[test]
    fn modified_when_manifest_edited() {
        let home = TempDir::new().expect("home");
        let workspace = TempDir::new().expect("workspace");
        let domain = setup_domain(&home, &workspace);
        sync_domain("dgnorth", home.path(), false).expect("sync");
        backdate_inventory(&home);

        fs::write(manifest_output_path(&domain), "manually edited\n").expect("edit");
        let signal = check(home.path(), &domain).expect("check");
        assert_eq!(signal, StalenessSignal::Modified);
    }

    #[test]
    fn ages_format_compactly() {
        let now = Utc::now();
        assert_eq!(format_datetime_age(now), "0s");

        let time = SystemTime::now() - Duration::from_secs(65);
        assert_eq!(format_system_time_age(time), "1m");
        assert_eq!(format_seconds(3 * 60 * 60), "3h");
        assert_eq!(format_seconds(2 * 60 * 60 * 24), "2d");
    }
}
