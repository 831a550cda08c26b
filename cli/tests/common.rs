//! # bakrs CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! declares `mod common;` to use them.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;

/// # Get bakrs Command (`bakrs_cmd`)
///
/// Returns an `assert_cmd::Command` for the compiled `bakrs` binary.
///
/// ## Panics
/// Panics if the `bakrs` binary cannot be found via `Command::cargo_bin`.
pub fn bakrs_cmd() -> Command {
    Command::cargo_bin("bakrs").expect("Failed to find bakrs binary for testing")
}

/// `bakrs_cmd` running in `dir`, isolated from the caller's environment and
/// user configuration.
pub fn bakrs_in(dir: &Path) -> Command {
    let mut cmd = bakrs_cmd();
    cmd.current_dir(dir)
        .env_remove("BAKRS_COMPRESS_FORMAT")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("HOME", dir);
    cmd
}

/// Collects the relative paths of all files below `root`, sorted.
pub fn relative_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            e.path()
                .strip_prefix(root)
                .ok()
                .map(|p| p.to_string_lossy().replace('\\', "/"))
        })
        .collect();
    files.sort();
    files
}
