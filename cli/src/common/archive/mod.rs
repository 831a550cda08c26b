//! # bakrs Archive Management (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module is the single entry point for archive operations. It offers one
//! operation set, `create`, `extract` and `add`, over two formats:
//!
//! - **`zip`**: standard zip archives (deflate, no encryption).
//! - **`tar`**: gzip-compressed POSIX tarballs (`.tar.gz`, `.tgz`, `.tar`).
//!
//! ## Architecture
//!
//! - `ArchiveFormat::from_path` maps a file name to a format by extension only.
//!   The mapping is total: anything unrecognized is `ArchiveFormat::Unknown`,
//!   which every operation rejects with `BakrsError::UnsupportedFormat`.
//! - `ArchiveAction` is the typed form of the `"create" | "extract" | "add"`
//!   action strings accepted by `manage`.
//! - `is_safe_member_name` is the one extraction filter shared by both formats.
//!
//! Every precondition (action, required arguments, format) is checked before
//! any file is opened.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bakrs::common::archive::{self, ArchiveAction};
//! use std::path::{Path, PathBuf};
//!
//! # fn main() -> anyhow::Result<()> {
//! archive::manage("create", Path::new("./docs"), Some(Path::new("./docs.zip")), &[])?;
//! archive::run(
//!     ArchiveAction::Add,
//!     Path::new("./docs.zip"),
//!     None,
//!     &[PathBuf::from("./notes/todo.txt")],
//! )?;
//! archive::run(ArchiveAction::Extract, Path::new("./docs.zip"), Some(Path::new("./out")), &[])?;
//! # Ok(())
//! # }
//! ```
//!
use crate::core::error::{BakrsError, Result};
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

pub mod tar;
pub mod zip;

/// Archive format implied by a file name's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    /// Gzip-compressed tar, whether named `.tar.gz`, `.tgz` or `.tar`.
    TarGz,
    Unknown,
}

impl ArchiveFormat {
    /// Determines the format from the final component of `path`.
    ///
    /// Matching is case-insensitive and never looks at file contents.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        if name.ends_with(".zip") {
            ArchiveFormat::Zip
        } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") || name.ends_with(".tar") {
            ArchiveFormat::TarGz
        } else {
            ArchiveFormat::Unknown
        }
    }

    /// Interprets a bare format name such as `"zip"` or `"tar.gz"`, the way it
    /// will be used as a backup file extension.
    pub fn from_compress_format(format: &str) -> Self {
        let trimmed = format.trim().trim_start_matches('.');
        Self::from_path(Path::new(&format!("archive.{}", trimmed)))
    }
}

/// The three archive operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveAction {
    Create,
    Extract,
    Add,
}

impl ArchiveAction {
    pub const ALL: [ArchiveAction; 3] =
        [ArchiveAction::Create, ArchiveAction::Extract, ArchiveAction::Add];

    pub fn as_str(self) -> &'static str {
        match self {
            ArchiveAction::Create => "create",
            ArchiveAction::Extract => "extract",
            ArchiveAction::Add => "add",
        }
    }
}

impl fmt::Display for ArchiveAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArchiveAction {
    type Err = BakrsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ArchiveAction::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| BakrsError::InvalidArgument {
                action: s.to_string(),
                allowed: ArchiveAction::ALL
                    .iter()
                    .map(|a| format!("'{}'", a))
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Returns `false` for member names that could escape the extraction directory.
///
/// A textual check: any name containing `..` anywhere (including harmless ones
/// such as `notes..txt`) or starting with `/` is refused. Symlink targets are
/// not inspected.
pub fn is_safe_member_name(name: &str) -> bool {
    !name.contains("..") && !name.starts_with('/')
}

/// Base name used when a single file is stored in an archive.
pub(crate) fn flattened_name(file: &Path) -> Result<String> {
    file.file_name()
        .map(OsStr::to_string_lossy)
        .map(|n| n.into_owned())
        .ok_or_else(|| anyhow::anyhow!("Path '{}' has no file name", file.display()))
}

/// Performs `action` given as a string, as in `manage("extract", ...)`.
///
/// Fails with `BakrsError::InvalidArgument` before touching the filesystem if
/// the action is not one of `create`, `extract`, `add`.
pub fn manage(
    action: &str,
    source: &Path,
    destination: Option<&Path>,
    files: &[PathBuf],
) -> Result<()> {
    let action: ArchiveAction = action.parse()?;
    run(action, source, destination, files)
}

/// Performs an archive action.
///
/// * `Create`: archives the `source` tree into `destination` (format from `destination`).
/// * `Extract`: unpacks the `source` archive into the `destination` directory.
/// * `Add`: appends each of `files` to the existing `source` archive under its base name.
pub fn run(
    action: ArchiveAction,
    source: &Path,
    destination: Option<&Path>,
    files: &[PathBuf],
) -> Result<()> {
    match action {
        ArchiveAction::Create => {
            let destination = require_destination(action, destination)?;
            info!("Creating archive {} from {}", destination.display(), source.display());
            match ArchiveFormat::from_path(destination) {
                ArchiveFormat::Zip => zip::create_from_dir(source, destination),
                ArchiveFormat::TarGz => tar::create_from_dir(source, destination),
                ArchiveFormat::Unknown => Err(unsupported(destination)),
            }
        }
        ArchiveAction::Extract => {
            let destination = require_destination(action, destination)?;
            info!("Extracting archive {} into {}", source.display(), destination.display());
            match ArchiveFormat::from_path(source) {
                ArchiveFormat::Zip => zip::extract(source, destination),
                ArchiveFormat::TarGz => tar::extract(source, destination),
                ArchiveFormat::Unknown => Err(unsupported(source)),
            }
        }
        ArchiveAction::Add => {
            if files.is_empty() {
                anyhow::bail!(BakrsError::MissingArgument {
                    action: action.as_str(),
                    argument: "at least one file",
                });
            }
            info!("Adding {} file(s) to archive {}", files.len(), source.display());
            match ArchiveFormat::from_path(source) {
                ArchiveFormat::Zip => zip::append(source, files),
                ArchiveFormat::TarGz => tar::append(source, files),
                ArchiveFormat::Unknown => Err(unsupported(source)),
            }
        }
    }
}

/// Writes a new archive at `destination` holding only `file`, stored under its
/// base name. The format comes from `destination`'s extension.
pub fn create_single_entry(file: &Path, destination: &Path) -> Result<()> {
    info!(
        "Creating single-entry archive {} from {}",
        destination.display(),
        file.display()
    );
    match ArchiveFormat::from_path(destination) {
        ArchiveFormat::Zip => zip::create_from_file(file, destination),
        ArchiveFormat::TarGz => tar::create_from_file(file, destination),
        ArchiveFormat::Unknown => Err(unsupported(destination)),
    }
}

fn unsupported(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(BakrsError::UnsupportedFormat {
        path: path.display().to_string(),
    })
}

fn require_destination(action: ArchiveAction, destination: Option<&Path>) -> Result<&Path> {
    destination.ok_or_else(|| {
        anyhow::anyhow!(BakrsError::MissingArgument {
            action: action.as_str(),
            argument: "a destination",
        })
    })
}
