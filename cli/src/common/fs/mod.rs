//! # bakrs Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//! Author: Christi Mahu
//!

//! ## Overview
//!
//! Filesystem helpers shared by the backup and archive code.
//!
//! - **`copy`**: Plain copies that keep permission bits and times. Used for
//!   uncompressed backups.
//! - **`io`**: `ensure_dir_exists`, used to prepare extraction destinations.
//!
//! Import from the specific submodule, e.g. `crate::common::fs::io::ensure_dir_exists`.
//!

/// Metadata-preserving file and directory copies.
pub mod copy;
/// Basic directory helpers.
pub mod io;
