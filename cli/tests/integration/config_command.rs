//! Integration tests for `stanza-verify config`.
//!
//! Every test points `STANZA_VERIFY_CONFIG` at a temp path so the user's real
//! configuration is never read.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn stanza_verify(config: &std::path::Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("stanza-verify"));
    cmd.env("NO_COLOR", "1").env("STANZA_VERIFY_CONFIG", config);
    cmd
}

fn temp_config() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.yaml");
    (dir, path)
}

#[test]
fn test_config_path_honours_env() {
    let (_dir, path) = temp_config();
    stanza_verify(&path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(path.to_string_lossy().as_ref()));
}

#[test]
fn test_config_show_without_file_uses_defaults() {
    let (_dir, path) = temp_config();
    stanza_verify(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("service:"))
        .stdout(predicate::str::contains("stanza"))
        .stdout(predicate::str::contains("command_timeout_secs:"));
}

#[test]
fn test_config_show_json() {
    let (_dir, path) = temp_config();
    std::fs::write(&path, "owner: observiq\n").expect("write config");
    let output = stanza_verify(&path)
        .args(["config", "show", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["config"]["owner"], "observiq");
    assert_eq!(value["config"]["group"], "stanza");
}

#[test]
fn test_config_get_known_key() {
    let (_dir, path) = temp_config();
    std::fs::write(&path, "command_timeout_secs: 5\n").expect("write config");
    stanza_verify(&path)
        .args(["config", "get", "command_timeout_secs"])
        .assert()
        .success()
        .stdout("5\n");
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (_dir, path) = temp_config();
    stanza_verify(&path)
        .args(["config", "get", "colour"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown setting: colour"));
}

#[test]
fn test_invalid_config_fails_with_path() {
    let (_dir, path) = temp_config();
    std::fs::write(&path, "service: \"\"\n").expect("write config");
    stanza_verify(&path)
        .args(["config", "show"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid configuration in"))
        .stderr(predicate::str::contains("'service' must not be empty"));
}
