//! Per-domain YAML inventory.
//!
//! # Storage layout
//!
//! ```text
//! ~/.driftconfig/
//!   domains/
//!     <domain_name>.yaml   (one file per domain — mode 0600)
//! ```
//!
//! # API pattern
//!
//! Every mutating function has two forms:
//! - `fn_at(home: &Path, …)` — explicit home; used in tests with `TempDir`
//! - `fn(…)` — derives home from `dirs::home_dir()`, delegates to `_at`
//!
//! Tests must NEVER call the no-arg wrappers; always use `_at`.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::InventoryError;
use crate::types::{Domain, DomainName, Tier};

// ---------------------------------------------------------------------------
// 1. Path helpers
// ---------------------------------------------------------------------------

/// `<home>/.driftconfig/domains/` — pure, no I/O.
pub fn domains_dir_at(home: &Path) -> PathBuf {
    home.join(".driftconfig").join("domains")
}

/// `<home>/.driftconfig/domains/<domain>.yaml` — pure, no I/O.
pub fn domain_path_at(home: &Path, domain: &DomainName) -> PathBuf {
    domains_dir_at(home).join(format!("{}.yaml", domain.0))
}

/// Lists the names of all domains stored under `<home>/.driftconfig/domains/`.
pub fn list_domain_names_at(home: &Path) -> Result<Vec<DomainName>, InventoryError> {
    let dir = domains_dir_at(home);
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut names: Vec<DomainName> = std::fs::read_dir(&dir)?
        .filter_map(|e| e.ok())
        .filter_map(|e| {
            let fname = e.file_name();
            let name = fname.to_string_lossy();
            name.strip_suffix(".yaml")
                .map(|stem| DomainName::from(stem.to_owned()))
        })
        .collect();
    names.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(names)
}

/// `list_domain_names_at` convenience wrapper.
pub fn list_domain_names() -> Result<Vec<DomainName>, InventoryError> {
    list_domain_names_at(&home()?)
}

// ---------------------------------------------------------------------------
// 2. Load
// ---------------------------------------------------------------------------

/// Load a single domain from `<home>/.driftconfig/domains/<domain>.yaml`.
///
/// Returns `InventoryError::DomainNotFound` if absent,
/// `InventoryError::Parse` (with path + line context) if malformed YAML.
pub fn load_domain_at(home: &Path, domain: &DomainName) -> Result<Domain, InventoryError> {
    let path = domain_path_at(home, domain);
    if !path.exists() {
        return Err(InventoryError::DomainNotFound { path });
    }
    let contents = std::fs::read_to_string(&path)?;
    serde_yaml::from_str(&contents).map_err(|e| InventoryError::Parse { path, source: e })
}

/// `load_domain_at` convenience wrapper.
pub fn load_domain(domain: &DomainName) -> Result<Domain, InventoryError> {
    load_domain_at(&home()?, domain)
}

/// Load every stored domain, sorted by name.
pub fn list_domains_at(home: &Path) -> Result<Vec<Domain>, InventoryError> {
    let mut domains = Vec::new();
    for name in list_domain_names_at(home)? {
        domains.push(load_domain_at(home, &name)?);
    }
    Ok(domains)
}

/// `list_domains_at` convenience wrapper.
pub fn list_domains() -> Result<Vec<Domain>, InventoryError> {
    list_domains_at(&home()?)
}

// ---------------------------------------------------------------------------
// 3. Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically save a domain to `<home>/.driftconfig/domains/<domain>.yaml`.
///
/// Write flow: serialize → `.yaml.tmp` sibling → `chmod 0600` → `rename`.
/// `.tmp` is always in the same directory as the target (same filesystem — no EXDEV).
pub fn save_domain_at(home: &Path, domain: &Domain) -> Result<(), InventoryError> {
    let dir = domains_dir_at(home);
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
        set_dir_permissions(&dir)?;
    }
    let path = domain_path_at(home, &domain.name);
    let tmp_path = path.with_file_name(format!("{}.yaml.tmp", domain.name.0));

    let yaml = serde_yaml::to_string(domain)?;
    std::fs::write(&tmp_path, yaml)?;
    set_file_permissions(&tmp_path)?;
    std::fs::rename(&tmp_path, &path)?;
    Ok(())
}

/// `save_domain_at` convenience wrapper.
pub fn save_domain(domain: &Domain) -> Result<(), InventoryError> {
    save_domain_at(&home()?, domain)
}

// ---------------------------------------------------------------------------
// 4. Init
// ---------------------------------------------------------------------------

/// Register a domain whose manifest lives at `manifest_path`.
///
/// Creates `<home>/.driftconfig/domains/<name>.yaml` with an empty tier set.
/// Idempotent: if the file already exists, loads and returns it unchanged.
pub fn init_at(
    manifest_path: PathBuf,
    name: DomainName,
    home: &Path,
) -> Result<Domain, InventoryError> {
    let yaml_path = domain_path_at(home, &name);
    if yaml_path.exists() {
        return load_domain_at(home, &name);
    }

    let now = Utc::now();
    let domain = Domain {
        name,
        manifest_path,
        tiers: vec![],
        created_at: now,
        updated_at: now,
    };
    save_domain_at(home, &domain)?;
    Ok(domain)
}

/// `init_at` convenience wrapper.
pub fn init(manifest_path: PathBuf, name: DomainName) -> Result<Domain, InventoryError> {
    init_at(manifest_path, name, &home()?)
}

// ---------------------------------------------------------------------------
// 5. Add tier
// ---------------------------------------------------------------------------

/// Append a tier to a stored domain and save atomically.
///
/// Returns `InventoryError::TierExists` if a tier with the same name is
/// already stored. Bumps the domain's `updated_at`.
pub fn add_tier_at(
    home: &Path,
    domain_name: &DomainName,
    tier: Tier,
) -> Result<Domain, InventoryError> {
    let mut domain = load_domain_at(home, domain_name)?;
    if domain.tiers.iter().any(|t| t.tier_name == tier.tier_name) {
        return Err(InventoryError::TierExists {
            name: tier.tier_name,
        });
    }
    domain.tiers.push(tier);
    domain.updated_at = Utc::now();
    save_domain_at(home, &domain)?;
    Ok(domain)
}

/// `add_tier_at` convenience wrapper.
pub fn add_tier(domain_name: &DomainName, tier: Tier) -> Result<Domain, InventoryError> {
    add_tier_at(&home()?, domain_name, tier)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn home() -> Result<PathBuf, InventoryError> {
    dirs::home_dir().ok_or(InventoryError::HomeNotFound)
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), InventoryError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), InventoryError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), InventoryError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), InventoryError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
