//! # bakrs Backup Creation (`common::backup`)
//!
//! File: cli/src/common/backup.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `create_backup` makes a timestamped copy of a file or directory next to the
//! original, either as a plain copy or as an archive.
//!
//! ## Naming
//!
//! The backup of `<parent>/<stem><suffix>` taken at 2024-03-18 12:00:00 is
//! `<parent>/<stem>_20240318120000<ext>`, where `<ext>` is `.<format>` when a
//! compression format is requested and the original `<suffix>` otherwise:
//!
//! | target        | format   | backup                          |
//! |---------------|----------|---------------------------------|
//! | `docs.txt`    | none     | `docs_20240318120000.txt`       |
//! | `docs.txt`    | `zip`    | `docs_20240318120000.zip`       |
//! | `photos/`     | `tar.gz` | `photos_20240318120000.tar.gz`  |
//! | `photos/`     | none     | `photos_20240318120000/`        |
//!
//! Timestamps have one-second resolution. Two backups of the same target in
//! the same second map to the same name: a directory copy then fails with
//! `io::ErrorKind::AlreadyExists`, while file copies and archives overwrite the
//! earlier backup.
//!
//! ## Dispatch
//!
//! | target    | compressed                              | uncompressed                        |
//! |-----------|-----------------------------------------|-------------------------------------|
//! | directory | `archive::run(Create, target, backup)`  | `fs::copy::copy_directory_recursive`|
//! | file      | `archive::create_single_entry`          | `fs::copy::copy_file_preserving`    |
//!
//! The compression format is checked before anything is written, so an
//! unknown format leaves the filesystem untouched.
//!
use crate::common::archive::{self, ArchiveAction, ArchiveFormat};
use crate::common::clock::Clock;
use crate::common::fs::copy;
use crate::core::error::{BakrsError, Result};
use anyhow::{anyhow, Context};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Backs up `target` next to itself and returns the path of the backup.
///
/// `compress_format` selects an archive format (`"zip"`, `"tar.gz"`, `"tgz"`,
/// `"tar"`); `None` or an empty string makes a plain copy that keeps
/// permissions and modification times.
///
/// # Errors
///
/// - `BakrsError::NotFound` if `target` does not exist.
/// - `BakrsError::UnsupportedFormat` if `compress_format` names no known format.
/// - Any I/O or archive error from the copy/archive step, unchanged in kind.
pub fn create_backup(
    target: &Path,
    compress_format: Option<&str>,
    clock: &dyn Clock,
) -> Result<PathBuf> {
    if !target.exists() {
        return Err(anyhow!(BakrsError::NotFound {
            path: target.display().to_string(),
        }));
    }

    let compress_format = normalize_format(compress_format);
    let destination = backup_path(target, compress_format, clock)?;

    if compress_format.is_some()
        && ArchiveFormat::from_path(&destination) == ArchiveFormat::Unknown
    {
        return Err(anyhow!(BakrsError::UnsupportedFormat {
            path: destination.display().to_string(),
        }));
    }

    info!(
        "Backing up {} to {}",
        target.display(),
        destination.display()
    );
    match (target.is_dir(), compress_format.is_some()) {
        (true, true) => {
            archive::run(ArchiveAction::Create, target, Some(destination.as_path()), &[])?
        }
        (true, false) => copy::copy_directory_recursive(target, &destination)?,
        (false, true) => archive::create_single_entry(target, &destination)?,
        (false, false) => copy::copy_file_preserving(target, &destination)?,
    }
    Ok(destination)
}

/// Computes where the backup of `target` taken now would be written.
///
/// A target without a final name component (such as `.` or `dir/..`) is
/// resolved first so the backup is named after the directory it refers to.
pub fn backup_path(
    target: &Path,
    compress_format: Option<&str>,
    clock: &dyn Clock,
) -> Result<PathBuf> {
    let named: Cow<'_, Path> = if target.file_name().is_some() {
        Cow::Borrowed(target)
    } else {
        Cow::Owned(
            target
                .canonicalize()
                .with_context(|| format!("Failed to resolve {}", target.display()))?,
        )
    };
    let stem = named
        .file_stem()
        .ok_or_else(|| anyhow!("Cannot derive a backup name from {}", target.display()))?
        .to_string_lossy();

    let extension = match normalize_format(compress_format) {
        Some(format) => format!(".{}", format),
        None => named
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default(),
    };

    let backup_name = format!("{}_{}{}", stem, clock.timestamp(), extension);
    Ok(named
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(backup_name))
}

fn normalize_format(compress_format: Option<&str>) -> Option<&str> {
    compress_format
        .map(|f| f.trim().trim_start_matches('.'))
        .filter(|f| !f.is_empty())
}
