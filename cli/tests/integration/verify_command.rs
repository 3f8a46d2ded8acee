//! Integration tests for `stanza-verify verify` against temp-dir installs.
//!
//! Manifests assert only type and mode so results do not depend on which
//! account runs the tests.

#![cfg(target_os = "linux")]
#![allow(clippy::expect_used)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn stanza_verify(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("stanza-verify"));
    cmd.env("NO_COLOR", "1")
        .env("STANZA_VERIFY_CONFIG", dir.path().join("config.yaml"));
    cmd
}

/// Fake install: `<tmp>/stanza/` with `stanza.db` at mode 0600.
fn fake_install(dir: &TempDir) -> PathBuf {
    let root = dir.path().join("stanza");
    std::fs::create_dir(&root).expect("mkdir");
    let db = root.join("stanza.db");
    std::fs::write(&db, b"").expect("write db");
    std::fs::set_permissions(&db, std::fs::Permissions::from_mode(0o600)).expect("chmod");
    root
}

fn write_manifest(dir: &TempDir, root: &Path, db_mode: &str) -> PathBuf {
    let manifest = dir.path().join("manifest.yaml");
    let body = format!(
        "platform: linux\nfiles:\n  - path: {root}\n    kind: directory\n  - path: {root}/stanza.db\n    mode: \"{db_mode}\"\n",
        root = root.display()
    );
    std::fs::write(&manifest, body).expect("write manifest");
    manifest
}

#[test]
fn test_verify_passing_install_exits_zero() {
    let dir = TempDir::new().expect("temp dir");
    let root = fake_install(&dir);
    let manifest = write_manifest(&dir, &root, "0600");

    stanza_verify(&dir)
        .arg("verify")
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .success()
        .stdout(predicate::str::contains("All 5 checks passed"));
}

#[test]
fn test_verify_mode_mismatch_exits_one() {
    let dir = TempDir::new().expect("temp dir");
    let root = fake_install(&dir);
    let manifest = write_manifest(&dir, &root, "0644");

    stanza_verify(&dir)
        .arg("verify")
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("mode: expected 0644, found 0600"))
        .stdout(predicate::str::contains("1 of 5 checks failed"));
}

#[test]
fn test_verify_json_report() {
    let dir = TempDir::new().expect("temp dir");
    let root = fake_install(&dir);
    let manifest = write_manifest(&dir, &root, "0644");

    let output = stanza_verify(&dir)
        .args(["verify", "--json", "--manifest"])
        .arg(&manifest)
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["status"], "failed");
    assert_eq!(value["platform"]["family"], "linux");
    assert_eq!(value["summary"]["total"], 5);
    assert_eq!(value["summary"]["failed"], 1);
    assert_eq!(value["results"][0]["attribute"], "exists");
    assert_eq!(value["results"][4]["outcome"], "failed");
    assert_eq!(value["results"][4]["actual"], "0600");
    assert!(value["generated_at"].is_string());
}

#[test]
fn test_verify_quiet_prints_only_failures() {
    let dir = TempDir::new().expect("temp dir");
    let root = fake_install(&dir);
    std::fs::remove_file(root.join("stanza.db")).expect("rm");
    let manifest = write_manifest(&dir, &root, "0600");

    stanza_verify(&dir)
        .args(["verify", "-q", "--manifest"])
        .arg(&manifest)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("exists: expected present, found absent"));
}

#[test]
fn test_verify_built_in_manifest_with_empty_root_fails() {
    let dir = TempDir::new().expect("temp dir");
    let root = dir.path().join("not-installed");

    stanza_verify(&dir)
        .args(["verify", "--only", "files", "--root"])
        .arg(&root)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("stanza.db exists: expected present, found absent"));
}

#[test]
fn test_verify_missing_manifest_file_is_an_error() {
    let dir = TempDir::new().expect("temp dir");

    stanza_verify(&dir)
        .args(["verify", "--manifest"])
        .arg(dir.path().join("nope.yaml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: cannot load manifest"));
}

#[test]
fn test_verify_error_as_json_object() {
    let dir = TempDir::new().expect("temp dir");

    let output = stanza_verify(&dir)
        .args(["verify", "--json", "--manifest"])
        .arg(dir.path().join("nope.yaml"))
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["error"], true);
    assert!(
        value["message"]
            .as_str()
            .is_some_and(|m| m.contains("cannot load manifest"))
    );
}

#[test]
fn test_verify_windows_manifest_on_linux_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let manifest = dir.path().join("win.yaml");
    std::fs::write(
        &manifest,
        "platform: windows\nfiles:\n  - path: 'C:\\observiq\\stanza'\n    kind: directory\n",
    )
    .expect("write");

    stanza_verify(&dir)
        .args(["verify", "--manifest"])
        .arg(&manifest)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "manifest targets windows but this host is linux",
        ));
}

#[test]
fn test_verify_invalid_release_override() {
    let dir = TempDir::new().expect("temp dir");

    stanza_verify(&dir)
        .args(["verify", "--release", "el6"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid release 'el6'"));
}

#[test]
fn test_verify_windows_service_on_linux_is_unavailable() {
    let dir = TempDir::new().expect("temp dir");

    let output = stanza_verify(&dir)
        .args(["verify", "--json", "--platform", "windows", "--only", "service"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["platform"]["family"], "windows");
    assert_eq!(value["summary"]["total"], 3);
    assert_eq!(value["summary"]["failed"], 3);
    assert_eq!(
        value["results"][0]["actual"],
        "unavailable: no service manager for windows on this host"
    );
}
