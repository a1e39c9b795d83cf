//! Argument parsing tests for the cbrng CLI.
//!
//! These only exercise clap: help output, defaults and rejected values.

#![allow(deprecated)] // Command::cargo_bin is deprecated but replacement requires newer assert_cmd

use assert_cmd::Command;
use predicates::prelude::*;

fn cbrng() -> Command {
    Command::cargo_bin("cbrng").unwrap()
}

#[test]
fn help_lists_commands() {
    cbrng()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("derive"))
        .stdout(predicate::str::contains("vectors"))
        .stdout(predicate::str::contains("state"));
}

#[test]
fn version_flag_prints_package_version() {
    cbrng()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn generate_help_shows_stream_options() {
    cbrng()
        .args(["generate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--kind"))
        .stdout(predicate::str::contains("--seed"))
        .stdout(predicate::str::contains("--count"))
        .stdout(predicate::str::contains("--skip"));
}

#[test]
fn derive_help_shows_keys() {
    cbrng()
        .args(["derive", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--keys"));
}

#[test]
fn unknown_kind_is_rejected() {
    cbrng()
        .args(["generate", "--kind", "philox4x32"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("philox4x32"));
}

#[test]
fn unknown_format_is_rejected() {
    cbrng()
        .args(["generate", "--format", "base64"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("base64"));
}

#[test]
fn negative_seed_is_rejected() {
    cbrng()
        .args(["generate", "--seed", "-1"])
        .assert()
        .failure();
}

#[test]
fn state_requires_subcommand() {
    cbrng().arg("state").assert().failure();
}

#[test]
fn state_next_rejects_engine_flags() {
    for flag in [["--seed", "1"], ["--kind", "threefry2x32"], ["--skip", "4"]] {
        cbrng()
            .args(["state", "next"])
            .args(flag)
            .assert()
            .failure()
            .stderr(predicate::str::contains("unexpected argument"));
    }
}

#[test]
fn state_next_help_shows_output_options_only() {
    cbrng()
        .args(["state", "next", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--count"))
        .stdout(predicate::str::contains("--format"))
        .stdout(predicate::str::contains("--path"))
        .stdout(predicate::str::contains("--seed").not());
}

#[test]
fn unknown_command_fails() {
    cbrng().arg("shuffle").assert().failure();
}
