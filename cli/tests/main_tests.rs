//! # bakrs CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Top-level behavior of the `bakrs` binary: `--version`, `--help` and
//! argument errors.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_version_flag() {
    bakrs_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_lists_commands() {
    bakrs_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("backup").and(predicate::str::contains("archive")));
}

#[test]
fn test_archive_help_lists_subcommands() {
    bakrs_cmd()
        .args(["archive", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("create")
                .and(predicate::str::contains("extract"))
                .and(predicate::str::contains("add")),
        );
}

#[test]
fn test_unknown_subcommand_fails() {
    bakrs_cmd().arg("restore").assert().failure();
}

#[test]
fn test_missing_command_fails() {
    bakrs_cmd().assert().failure();
}
