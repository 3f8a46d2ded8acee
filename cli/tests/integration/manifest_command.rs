//! Integration tests for `stanza-verify manifest show`.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn stanza_verify(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("stanza-verify"));
    cmd.env("NO_COLOR", "1")
        .env("STANZA_VERIFY_CONFIG", dir.path().join("config.yaml"));
    cmd
}

#[test]
fn test_manifest_show_linux_defaults_as_yaml() {
    let dir = TempDir::new().expect("temp dir");
    stanza_verify(&dir)
        .args(["manifest", "show", "--platform", "linux"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# source: built-in"))
        .stdout(predicate::str::contains("/opt/observiq/stanza/stanza.db"))
        .stdout(predicate::str::contains("/etc/systemd/system/stanza.service"))
        .stdout(predicate::str::contains("'0600'").or(predicate::str::contains("\"0600\"")));
}

#[test]
fn test_manifest_show_windows_json() {
    let dir = TempDir::new().expect("temp dir");
    let output = stanza_verify(&dir)
        .args(["manifest", "show", "--platform", "windows", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["source"], "built-in");
    assert_eq!(value["manifest"]["platform"], "windows");
    assert_eq!(
        value["manifest"]["files"][1]["path"],
        r"C:\observiq\stanza\stanza.exe"
    );
    assert!(value["manifest"]["files"][1].get("mode").is_none());
}

#[test]
fn test_manifest_show_honours_root_override() {
    let dir = TempDir::new().expect("temp dir");
    stanza_verify(&dir)
        .args(["manifest", "show", "--platform", "linux", "--root", "/srv/stanza"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/srv/stanza/config.yaml"));
}

#[test]
fn test_manifest_show_uses_configured_install_dir() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(dir.path().join("config.yaml"), "install_dir: /data/stanza\n")
        .expect("write config");
    stanza_verify(&dir)
        .args(["manifest", "show", "--platform", "linux"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/data/stanza/logging.yaml"));
}

#[test]
fn test_manifest_show_rejects_invalid_file() {
    let dir = TempDir::new().expect("temp dir");
    let manifest = dir.path().join("bad.yaml");
    std::fs::write(&manifest, "platform: linux\nfiles:\n  - path: relative\n").expect("write");
    stanza_verify(&dir)
        .args(["manifest", "show", "--platform", "linux", "--manifest"])
        .arg(&manifest)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid manifest"));
}
