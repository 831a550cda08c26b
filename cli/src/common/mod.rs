//! # bakrs Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//!

//! ## Overview
//!
//! Shared building blocks behind the `bakrs` commands. Nothing in here reads
//! configuration or the command line; every value arrives as an argument.
//!
//! ## Architecture
//!
//! - **`archive`**: Zip and tar.gz creation, extraction and appending, plus the
//!   `manage` entry point that picks a backend from the archive's file name.
//! - **`backup`**: Timestamped backups of files and directories (`create_backup`).
//! - **`clock`**: The time source used to stamp backup names.
//! - **`fs`**: Directory creation and metadata-preserving copies.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bakrs::common::{backup, clock::SystemClock};
//! use std::path::Path;
//!
//! # fn run_example() -> anyhow::Result<()> {
//! let created = backup::create_backup(Path::new("notes.txt"), Some("zip"), &SystemClock)?;
//! println!("{}", created.display());
//! # Ok(())
//! # }
//! ```
//!

/// Zip and tar.gz archive handling.
pub mod archive;
/// Timestamped backups of files and directories.
pub mod backup;
/// Injectable wall clock.
pub mod clock;
/// Filesystem helpers (directory creation, preserving copies).
pub mod fs;
