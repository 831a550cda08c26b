//! # bakrs CLI Backup Integration Tests
//!
//! File: cli/tests/backup.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Integration tests for `bakrs backup`: plain copies, archived backups, format
//! selection from flags, environment and configuration, and failures.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

/// Name of the first entry in `dir` starting with `prefix`.
fn find_backup(dir: &std::path::Path, prefix: &str) -> Option<String> {
    fs::read_dir(dir)
        .ok()?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .find(|name| name.starts_with(prefix))
}

#[test]
fn test_backup_file_plain_copy() {
    let temp = tempdir().expect("temp dir");
    fs::write(temp.path().join("docs.txt"), "hello").expect("write target");

    bakrs_in(temp.path())
        .args(["backup", "docs.txt"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^docs_\d{14}\.txt\n$").expect("valid regex"));

    let name = find_backup(temp.path(), "docs_").expect("backup created");
    assert_eq!(
        fs::read_to_string(temp.path().join(name)).expect("read backup"),
        "hello"
    );
}

#[test]
fn test_backup_directory_as_zip() {
    let temp = tempdir().expect("temp dir");
    let target = temp.path().join("photos");
    fs::create_dir_all(target.join("2024")).expect("create target");
    fs::write(target.join("2024/cat.jpg"), "meow").expect("write file");

    bakrs_in(temp.path())
        .args(["backup", "photos", "--compress", "zip"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^photos_\d{14}\.zip\n$").expect("valid regex"));

    let name = find_backup(temp.path(), "photos_").expect("backup created");
    bakrs_in(temp.path())
        .args(["archive", "extract", &name, "restored"])
        .assert()
        .success();
    assert_eq!(
        relative_files(&temp.path().join("restored")),
        vec!["2024/cat.jpg".to_string()]
    );
}

#[test]
fn test_backup_format_from_env() {
    let temp = tempdir().expect("temp dir");
    fs::write(temp.path().join("notes.md"), "# notes").expect("write target");

    bakrs_in(temp.path())
        .env("BAKRS_COMPRESS_FORMAT", "tar.gz")
        .args(["backup", "notes.md"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^notes_\d{14}\.tar\.gz\n$").expect("valid regex"));
}

#[test]
fn test_backup_format_from_project_config() {
    let temp = tempdir().expect("temp dir");
    fs::create_dir(temp.path().join(".git")).expect("create .git");
    fs::write(
        temp.path().join(".bakrs.toml"),
        "[backup]\ncompress_format = \"tgz\"\n",
    )
    .expect("write config");
    fs::write(temp.path().join("notes.md"), "# notes").expect("write target");

    bakrs_in(temp.path())
        .args(["backup", "notes.md"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^notes_\d{14}\.tgz\n$").expect("valid regex"));
}

#[test]
fn test_no_compress_overrides_env() {
    let temp = tempdir().expect("temp dir");
    fs::write(temp.path().join("notes.md"), "# notes").expect("write target");

    bakrs_in(temp.path())
        .env("BAKRS_COMPRESS_FORMAT", "zip")
        .args(["backup", "notes.md", "--no-compress"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^notes_\d{14}\.md\n$").expect("valid regex"));
}

#[test]
fn test_backup_missing_target_fails() {
    let temp = tempdir().expect("temp dir");

    bakrs_in(temp.path())
        .args(["backup", "ghost.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Target 'ghost.txt' does not exist and cannot be backed up.",
        ));
}

#[test]
fn test_backup_unknown_format_fails() {
    let temp = tempdir().expect("temp dir");
    fs::write(temp.path().join("docs.txt"), "hello").expect("write target");

    bakrs_in(temp.path())
        .args(["backup", "docs.txt", "--compress", "rar"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported archive format"));

    assert!(find_backup(temp.path(), "docs_").is_none());
}

#[test]
fn test_invalid_config_fails() {
    let temp = tempdir().expect("temp dir");
    fs::create_dir(temp.path().join(".git")).expect("create .git");
    fs::write(
        temp.path().join(".bakrs.toml"),
        "[backup]\ncompress_format = \"rar\"\n",
    )
    .expect("write config");
    fs::write(temp.path().join("docs.txt"), "hello").expect("write target");

    bakrs_in(temp.path())
        .args(["backup", "docs.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration validation failed"));
}
