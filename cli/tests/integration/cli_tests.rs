//! Integration tests for the CLI surface: help, version and global flags.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn stanza_verify() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("stanza-verify"));
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    // clap with arg_required_else_help shows help on stderr and exits 2
    stanza_verify().assert().code(2).stderr(predicate::str::contains(
        "Verify that the stanza log agent is correctly installed",
    ));
}

#[test]
fn test_cli_help_lists_commands() {
    stanza_verify()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("verify"))
        .stdout(predicate::str::contains("manifest"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_verify_help_lists_overrides() {
    stanza_verify()
        .args(["verify", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--manifest"))
        .stdout(predicate::str::contains("--platform"))
        .stdout(predicate::str::contains("--release"))
        .stdout(predicate::str::contains("--only"));
}

#[test]
fn test_version_command_shows_version() {
    stanza_verify()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "stanza-verify {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let output = stanza_verify()
        .args(["version", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_unknown_subcommand_fails() {
    stanza_verify().arg("install").assert().code(2);
}

#[test]
fn test_invalid_only_value_fails() {
    stanza_verify()
        .args(["verify", "--only", "everything"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value"));
}
