//! # bakrs Filesystem I/O Helpers
//!
//! File: cli/src/common/fs/io.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Small wrappers around `std::fs` shared by the archive backends. Currently
//! this is `ensure_dir_exists`, used to prepare extraction destinations.
//!
use crate::core::error::Result; // Use standard Result type
use anyhow::Context; // For adding context to errors
use std::fs; // Standard filesystem module
use std::io;
use std::path::Path; // Filesystem path type
use tracing::{debug, info}; // Logging utilities

/// Ensures that a directory exists at the specified path.
///
/// If the path does not exist, this function creates the directory, including
/// any necessary parent directories (similar to `mkdir -p`). If the path already
/// exists but is not a directory, an `io::ErrorKind::AlreadyExists` error is
/// returned, so callers see the same kind of failure as from `fs::create_dir`.
///
/// # Errors
///
/// Returns an `Err` if:
/// - The path exists but is not a directory.
/// - Creating the directory fails (e.g., due to permissions).
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {:?}", path),
        )
        .into());
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}
