//! End-to-end CLI runs: init → tier add → sync → diff → status.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn driftconfig_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("driftconfig"));
    cmd.env("HOME", home).env("USERPROFILE", home);
    cmd
}

fn init_domain(home: &TempDir, workspace: &TempDir, name: &str) -> std::path::PathBuf {
    let manifest_dir = workspace.path().join(name);
    fs::create_dir_all(&manifest_dir).expect("create manifest dir");
    driftconfig_cmd(home.path())
        .args(["init", manifest_dir.to_str().unwrap(), "--domain", name])
        .assert()
        .success()
        .stdout(contains("Registered domain"));
    manifest_dir
}

fn add_live_tier(home: &TempDir, name: &str) {
    driftconfig_cmd(home.path())
        .args([
            "tier",
            "add",
            name,
            "--aws-region",
            "us-east-1",
            "--s3-origin-url",
            "s3://cfg-bucket/config",
            "--s3-bucket-region",
            "us-east-1",
            "--bucket-name",
            "cfg-bucket",
            "--organization",
            "acme",
            "--subnet",
            "sn-1",
            "--subnet",
            "sn-2",
            "--security-group",
            "sg-1",
            "--live",
        ])
        .assert()
        .success();
}

fn add_polling_tier(home: &TempDir, name: &str) {
    driftconfig_cmd(home.path())
        .args([
            "tier",
            "add",
            name,
            "--aws-region",
            "eu-west-1",
            "--s3-origin-url",
            "s3://cfg-bucket/config",
            "--s3-bucket-region",
            "us-east-1",
            "--organization",
            "acme",
        ])
        .assert()
        .success();
}

#[test]
fn sync_writes_both_trigger_variants() {
    let home = TempDir::new().expect("home");
    let workspace = TempDir::new().expect("workspace");
    let manifest_dir = init_domain(&home, &workspace, "dgnorth");

    add_live_tier(&home, "LIVENORTH");
    add_polling_tier(&home, "DEVSOUTH");

    driftconfig_cmd(home.path())
        .args(["sync", "dgnorth"])
        .assert()
        .success()
        .stdout(contains("synced"));

    let manifest =
        fs::read_to_string(manifest_dir.join("zappa_settings.yml")).expect("read manifest");
    let live = manifest.find("LIVENORTH:").expect("same-region block");
    let dev = manifest.find("DEVSOUTH:").expect("cross-region block");
    assert!(live < dev, "blocks must keep tier input order");
    assert!(manifest.contains("arn: arn:aws:s3:::cfg-bucket"));
    assert!(manifest.contains("expression: rate(1 minute)"));
    assert!(manifest.contains("Name: LIVENORTH-drift-config"));
    assert!(manifest.contains("s3_bucket: zappa-driftconfig-acme-livenorth"));
    assert!(manifest.contains("SubnetIds: [sn-1, sn-2]"));
    assert!(manifest.contains("SubnetIds: []"), "sparse tier renders empty lists");
}

#[test]
fn second_sync_reports_nothing_to_do() {
    let home = TempDir::new().expect("home");
    let workspace = TempDir::new().expect("workspace");
    init_domain(&home, &workspace, "dgnorth");
    add_polling_tier(&home, "DEVSOUTH");

    driftconfig_cmd(home.path())
        .args(["sync", "dgnorth"])
        .assert()
        .success();
    driftconfig_cmd(home.path())
        .args(["sync", "dgnorth"])
        .assert()
        .success()
        .stdout(contains("nothing to do"));
}

#[test]
fn dry_run_previews_without_writing() {
    let home = TempDir::new().expect("home");
    let workspace = TempDir::new().expect("workspace");
    let manifest_dir = init_domain(&home, &workspace, "dgnorth");
    add_polling_tier(&home, "DEVSOUTH");

    driftconfig_cmd(home.path())
        .args(["sync", "dgnorth", "--dry-run"])
        .assert()
        .success()
        .stdout(contains("[dry-run]"));
    assert!(
        !manifest_dir.join("zappa_settings.yml").exists(),
        "dry-run must not create the manifest"
    );
}

#[test]
fn diff_shows_added_tier_lines() {
    let home = TempDir::new().expect("home");
    let workspace = TempDir::new().expect("workspace");
    init_domain(&home, &workspace, "dgnorth");
    add_polling_tier(&home, "DEVSOUTH");

    driftconfig_cmd(home.path())
        .args(["sync", "dgnorth"])
        .assert()
        .success();
    driftconfig_cmd(home.path())
        .args(["diff", "dgnorth"])
        .assert()
        .success()
        .stdout(contains("No differences"));

    add_polling_tier(&home, "STAGESOUTH");
    let assert = driftconfig_cmd(home.path())
        .args(["diff", "dgnorth"])
        .assert()
        .success()
        .stdout(contains("+++ b/zappa_settings.yml"));
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("stdout utf8");
    assert!(
        stdout
            .lines()
            .any(|line| line.starts_with('+') && line.contains("STAGESOUTH:")),
        "expected an added line for the new tier"
    );
}

#[test]
fn status_json_reports_staleness_schema() {
    let home = TempDir::new().expect("home");
    let workspace = TempDir::new().expect("workspace");
    init_domain(&home, &workspace, "dgnorth");
    add_polling_tier(&home, "DEVSOUTH");

    let assert = driftconfig_cmd(home.path())
        .args(["status", "--json"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("stdout utf8");
    let payload: serde_json::Value = serde_json::from_str(&stdout).expect("status JSON");
    let domains = payload["domains"].as_array().expect("domains array");
    assert_eq!(domains.len(), 1);
    assert_eq!(domains[0]["domain"], "dgnorth");
    assert_eq!(domains[0]["status"], "never_synced");
    assert_eq!(domains[0]["tiers"], 1);
    assert_eq!(payload["stale"], 1);

    driftconfig_cmd(home.path())
        .args(["sync", "dgnorth"])
        .assert()
        .success();

    let assert = driftconfig_cmd(home.path())
        .args(["status", "--json"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("stdout utf8");
    let payload: serde_json::Value = serde_json::from_str(&stdout).expect("status JSON");
    assert_eq!(payload["domains"][0]["status"], "current");
    assert_eq!(payload["stale"], 0);
}

#[test]
fn sync_fails_cleanly_on_incomplete_tier() {
    let home = TempDir::new().expect("home");
    let workspace = TempDir::new().expect("workspace");
    let manifest_dir = init_domain(&home, &workspace, "dgnorth");

    driftconfig_cmd(home.path())
        .args(["tier", "add", "BROKEN"])
        .assert()
        .success();

    driftconfig_cmd(home.path())
        .args(["sync", "dgnorth"])
        .assert()
        .failure()
        .stderr(contains("missing required field 'aws_region'"));
    assert!(
        !manifest_dir.join("zappa_settings.yml").exists(),
        "failed generation must not leave a partial manifest"
    );
}
