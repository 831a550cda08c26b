//! # bakrs Filesystem Copy Operations
//!
//! File: cli/src/common/fs/copy.rs
//! Author: Christi Mahu
//!

//! ## Overview
//!
//! This module provides the plain (uncompressed) copies used for backups:
//! `copy_directory_recursive` for directory trees and `copy_file_preserving` for
//! single files. Both keep permission bits and access/modification times.
//!
//! ## Architecture
//!
//! `copy_directory_recursive` uses the external `fs_extra` crate for the copy
//! itself and then walks the source with `walkdir`, restoring times (through
//! `filetime`) and directory permissions on the copy. Files get their permission
//! bits from `std::fs::copy`, which `fs_extra` uses underneath.
//!
//! `fs_extra` reports failures through its own error type; they are turned back
//! into `std::io::Error` values so callers can match on `io::ErrorKind` the same
//! way they would for any other filesystem failure.
//!
use crate::core::error::Result; // Use standard Result type from core::error
use anyhow::Context;
use filetime::FileTime;
use std::fs;
use std::io;
use std::path::Path; // Filesystem path type
use tracing::{debug, info}; // Logging utilities
use walkdir::WalkDir;

/// Copies a directory tree from `source` to a new directory at `target`.
///
/// The copy preserves the directory structure, file permission bits, directory
/// permission bits, and access/modification times of every copied entry.
///
/// # Errors
///
/// Returns an `Err` if:
/// - `target` already exists (`io::ErrorKind::AlreadyExists`); nothing is
///   overwritten.
/// - The source cannot be read or the target cannot be written. A failure in
///   the middle of the copy leaves the partial copy in place.
pub fn copy_directory_recursive(source: &Path, target: &Path) -> Result<()> {
    if fs::symlink_metadata(target).is_ok() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Destination {:?} already exists", target),
        )
        .into());
    }
    info!("Starting recursive copy from {:?} to {:?}", source, target);

    let mut options = fs_extra::dir::CopyOptions::new();
    // Copy what is inside `source` into `target`, not `target/<source name>`.
    options.content_only = true;
    options.overwrite = false;

    fs_extra::dir::copy(source, target, &options).map_err(|e| {
        fs_extra_to_io(e).context(format!("Failed to copy dir {:?} to {:?}", source, target))
    })?;

    restore_metadata(source, target)?;

    info!("Finished recursive copy from {:?} to {:?}", source, target);
    Ok(())
}

/// Copies a single file, keeping its permission bits and access/modification times.
///
/// An existing file at `target` is overwritten.
pub fn copy_file_preserving(source: &Path, target: &Path) -> Result<()> {
    debug!("Copying file {:?} to {:?}", source, target);
    fs::copy(source, target)
        .with_context(|| format!("Failed to copy file {:?} to {:?}", source, target))?;
    copy_times(&fs::metadata(source)?, target)?;
    Ok(())
}

/// Second pass over the finished copy: times for everything, and permissions
/// for directories (files already carry theirs). Children are visited before
/// their parent so a read-only directory is locked down last.
fn restore_metadata(source: &Path, target: &Path) -> Result<()> {
    for entry in WalkDir::new(source).follow_links(true).contents_first(true) {
        let entry = entry?;
        let relative = entry.path().strip_prefix(source)?;
        let copied = target.join(relative);
        let metadata = entry.metadata()?;
        copy_times(&metadata, &copied)?;
        if metadata.is_dir() {
            fs::set_permissions(&copied, metadata.permissions())
                .with_context(|| format!("Failed to set permissions on {:?}", copied))?;
        }
    }
    Ok(())
}

fn copy_times(metadata: &fs::Metadata, target: &Path) -> Result<()> {
    let atime = FileTime::from_last_access_time(metadata);
    let mtime = FileTime::from_last_modification_time(metadata);
    filetime::set_file_times(target, atime, mtime)
        .with_context(|| format!("Failed to set times on {:?}", target))?;
    Ok(())
}

/// `fs_extra` folds common `io::ErrorKind`s into its own kinds; map them back.
fn fs_extra_to_io(err: fs_extra::error::Error) -> anyhow::Error {
    use fs_extra::error::ErrorKind;
    let kind = match err.kind {
        ErrorKind::Io(io_err) => return io_err.into(),
        ErrorKind::NotFound => io::ErrorKind::NotFound,
        ErrorKind::PermissionDenied => io::ErrorKind::PermissionDenied,
        ErrorKind::AlreadyExists => io::ErrorKind::AlreadyExists,
        ErrorKind::Interrupted => io::ErrorKind::Interrupted,
        _ => return anyhow::anyhow!(err),
    };
    io::Error::new(kind, err.to_string()).into()
}
