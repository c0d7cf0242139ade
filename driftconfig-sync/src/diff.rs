//! Dry-run unified diff support for `driftconfig diff`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use similar::TextDiff;

use driftconfig_core::inventory;
use driftconfig_renderer::Renderer;

use crate::error::io_err;
use crate::writer::manifest_output_path;
use crate::SyncError;

/// Diff result for a domain's manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainDiff {
    pub domain_name: String,
    pub path: PathBuf,
    /// Unified diff, or `None` when the on-disk manifest already matches.
    pub unified_diff: Option<String>,
}

/// Render what `sync` would generate and compare it to current on-disk content.
///
/// No files are written.
pub fn diff_domain(domain_name: &str, home: &Path) -> Result<DomainDiff, SyncError> {
    let domain = inventory::load_domain_at(home, &domain_name.into())?;
    let renderer = Renderer::new()?;
    let rendered = normalize_line_endings(&renderer.render_manifest(&domain.tiers)?);

    let path = manifest_output_path(&domain);
    let existing = read_existing_or_empty(&path)?;
    if existing == rendered {
        return Ok(DomainDiff {
            domain_name: domain_name.to_string(),
            path,
            unified_diff: None,
        });
    }

    let relative = path.strip_prefix(&domain.manifest_path).unwrap_or(path.as_path());
    let old_header = format!("a/{}", relative.display());
    let new_header = format!("b/{}", relative.display());
    let unified = TextDiff::from_lines(&existing, &rendered)
        .unified_diff()
        .header(&old_header, &new_header)
        .context_radius(3)
        .to_string();

    Ok(DomainDiff {
        domain_name: domain_name.to_string(),
        path,
        unified_diff: Some(unified),
    })
}

fn read_existing_or_empty(path: &Path) -> Result<String, SyncError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(normalize_line_endings(&content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(io_err(path, err)),
    }
}

fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n")
}

#[cfg(test)]
mod tests {
    use std::fs;

    use driftconfig_core::types::{DomainName, Tier};
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

    fn setup_domain(home: &TempDir, workspace: &TempDir) {
        let manifest_dir = workspace.path().join("dgnorth");
        fs::create_dir_all(&manifest_dir).expect("mkdir");
        inventory::init_at(manifest_dir, DomainName::from("dgnorth"), home.path())
            .expect("init");
        inventory::add_tier_at(home.path(), &DomainName::from("dgnorth"), make_tier("DEVNORTH"))
            .expect("add tier");
    }

    #[test]
    fn no_diff_after_clean_sync() {
        let home = TempDir::new().expect("home");
        let workspace = TempDir::new().expect("workspace");
        setup_domain(&home, &workspace);
        sync_domain("dgnorth", home.path(), false).expect("sync");

        let diff = diff_domain("dgnorth", home.path()).expect("diff");
        assert!(diff.unified_diff.is_none(), "synced domain should have no diff");
    }

    #[test]
    fn inventory_change_produces_unified_diff() {
        let home = TempDir::new().expect("home");
        let workspace = TempDir::new().expect("workspace");
        setup_domain(&home, &workspace);
        sync_domain("dgnorth", home.path(), false).expect("sync");

        inventory::add_tier_at(
            home.path(),
            &DomainName::from("dgnorth"),
            make_tier("LIVENORTH"),
        )
        .expect("add tier");

        let diff = diff_domain("dgnorth", home.path()).expect("diff");
        let unified = diff.unified_diff.expect("expected a diff");
        assert!(unified.contains("--- a/zappa_settings.yml"));
        assert!(unified.contains("+++ b/zappa_settings.yml"));
        assert!(unified.contains("@@"));
        assert!(
            unified
                .lines()
                .any(|line| line.starts_with('+') && line.contains("LIVENORTH:")),
            "expected an added line for the new tier:\n{unified}"
        );
    }

    #[test]
    fn missing_manifest_diffs_against_empty() {
        let home = TempDir::new().expect("home");
        let workspace = TempDir::new().expect("workspace");
        setup_domain(&home, &workspace);

        let diff = diff_domain("dgnorth", home.path()).expect("diff");
        let unified = diff.unified_diff.expect("expected a diff");
        assert!(
            unified
                .lines()
                .any(|line| line.starts_with('+') && line.contains("DEVNORTH:")),
            "whole manifest should appear as added lines:\n{unified}"
        );
        assert!(!unified.lines().any(|line| line.starts_with("-D")));
    }
}
