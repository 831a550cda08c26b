//! # bakrs TAR Archive Operations (`common::archive::tar`)
//!
//! File: cli/src/common/archive/tar.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module handles gzipped tarballs (`.tar.gz`, `.tgz`, and `.tar`, which
//! bakrs always writes gzip-compressed). It leverages the `tar` crate for the
//! archive structure and `flate2` for the gzip stream.
//!
//! ## Architecture
//!
//! - **Create**: the whole source directory is added in one recursive call,
//!   rooted at archive name `.`. The root itself is stored as `./` and its
//!   contents as `file.txt`, `sub`, `sub/file2.txt`, and so on. Names too long
//!   for the ustar header go into a GNU long-name record and keep the `./`
//!   prefix there (`./<long name>/inner.txt`); both forms unpack to the same
//!   place.
//! - **Extract**: members are filtered through `is_safe_member_name` before
//!   being unpacked. `tar::Entry::unpack_in` adds its own containment checks
//!   on top of that. Directory entries are unpacked after everything else,
//!   deepest first, so their modes never block writing their contents.
//! - **Add**: a gzip stream cannot be appended to in place. The existing
//!   members are copied raw (headers and data, including long-name extension
//!   records) into a staged archive next to the original, the new files are
//!   appended, and the staged file is renamed over the original. If anything
//!   fails before the rename, the staged file is deleted on drop and the
//!   original archive is untouched.
//!
use super::{flattened_name, is_safe_member_name};
use crate::common::fs::io::ensure_dir_exists;
use crate::core::error::Result; // Use the standard Result type from the core module
use anyhow::Context; // For adding contextual information to errors
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// # Create Gzipped TAR From Directory (`create_from_dir`)
///
/// Writes a gzipped TAR archive at `destination` containing every file and
/// directory under `source`, with names relative to `source`.
///
/// ## Errors
///
/// Returns an `Err` if:
/// - `destination` cannot be created.
/// - Any file or subdirectory within `source` cannot be read.
/// - Finishing the TAR structure or the gzip stream fails.
pub fn create_from_dir(source: &Path, destination: &Path) -> Result<()> {
    let file = File::create(destination)
        .with_context(|| format!("Failed to create tar archive {}", destination.display()))?;
    let mut tar_builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));

    // "." roots every member at the archive root: `source/sub/a` is stored as `sub/a`.
    tar_builder.append_dir_all(".", source).with_context(|| {
        format!(
            "Failed to add directory '{}' contents to the tar archive",
            source.display()
        )
    })?;

    finish(tar_builder, destination)
}

/// Writes a gzipped TAR archive at `destination` containing only `file`,
/// stored under its base name.
pub fn create_from_file(file: &Path, destination: &Path) -> Result<()> {
    let output = File::create(destination)
        .with_context(|| format!("Failed to create tar archive {}", destination.display()))?;
    let mut tar_builder = tar::Builder::new(GzEncoder::new(output, Compression::default()));
    append_flattened(&mut tar_builder, file)?;
    finish(tar_builder, destination)
}

/// # Extract Gzipped TAR (`extract`)
///
/// Unpacks every member of `archive_path` whose name passes
/// `is_safe_member_name` into `destination`, creating it if needed. Unsafe
/// members are skipped without an error. Modification times and permission
/// bits are restored.
pub fn extract(archive_path: &Path, destination: &Path) -> Result<()> {
    let file = File::open(archive_path)
        .with_context(|| format!("Failed to open tar archive {}", archive_path.display()))?;
    let mut archive = tar::Archive::new(GzDecoder::new(BufReader::new(file)));
    archive.set_preserve_mtime(true);
    archive.set_preserve_permissions(true);
    ensure_dir_exists(destination)?;

    // Directories are unpacked last, deepest first, so a read-only directory
    // does not block writing its own contents.
    let mut directories = Vec::new();
    for entry in archive
        .entries()
        .with_context(|| format!("Failed to read tar archive {}", archive_path.display()))?
    {
        let mut entry = entry?;
        let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
        if !is_safe_member_name(&name) {
            debug!("tar: skipping unsafe member {:?}", name);
            continue;
        }
        if entry.header().entry_type().is_dir() {
            directories.push(entry);
            continue;
        }
        entry
            .unpack_in(destination)
            .with_context(|| format!("Failed to extract {}", name))?;
    }

    directories.sort_by(|a, b| b.path_bytes().cmp(&a.path_bytes()));
    for mut directory in directories {
        let name = String::from_utf8_lossy(&directory.path_bytes()).into_owned();
        directory
            .unpack_in(destination)
            .with_context(|| format!("Failed to extract {}", name))?;
    }
    Ok(())
}

/// # Append To Gzipped TAR (`append`)
///
/// Adds `files` to the existing archive at `archive_path`, each under its base
/// name, by rebuilding the archive in a staged file and renaming it into place.
/// The original's permission bits are kept on the replacement.
pub fn append(archive_path: &Path, files: &[impl AsRef<Path>]) -> Result<()> {
    let existing = File::open(archive_path)
        .with_context(|| format!("Failed to open tar archive {}", archive_path.display()))?;
    let permissions = existing.metadata()?.permissions();

    let staging_dir = match archive_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(staging_dir).with_context(|| {
        format!(
            "Failed to create staging file in {}",
            staging_dir.display()
        )
    })?;

    {
        let mut tar_builder =
            tar::Builder::new(GzEncoder::new(staged.as_file_mut(), Compression::default()));

        let mut archive = tar::Archive::new(GzDecoder::new(BufReader::new(existing)));
        // Raw mode hands back GNU long-name and PAX records as ordinary entries,
        // so copying header + data reproduces each member byte for byte.
        let entries = archive
            .entries()
            .with_context(|| format!("Failed to read tar archive {}", archive_path.display()))?
            .raw(true);
        for entry in entries {
            let mut entry = entry?;
            let header = entry.header().clone();
            tar_builder.append(&header, &mut entry)?;
        }

        for file in files {
            append_flattened(&mut tar_builder, file.as_ref())?;
        }

        let encoder = tar_builder
            .into_inner()
            .context("Failed to finalize tar archive structure")?;
        encoder
            .finish()
            .context("Failed to finish gzip compression stream")?;
    }

    fs::set_permissions(staged.path(), permissions)?;
    staged
        .persist(archive_path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace tar archive {}", archive_path.display()))?;
    Ok(())
}

fn append_flattened<W: Write>(tar_builder: &mut tar::Builder<W>, file: &Path) -> Result<()> {
    let name = flattened_name(file)?;
    debug!("tar: adding file {} as {}", file.display(), name);
    tar_builder
        .append_path_with_name(file, &name)
        .with_context(|| format!("Failed to add '{}' to the tar archive", file.display()))?;
    Ok(())
}

/// Writes the TAR end-of-archive records and the gzip footer.
fn finish(tar_builder: tar::Builder<GzEncoder<File>>, destination: &Path) -> Result<()> {
    let encoder = tar_builder
        .into_inner()
        .context("Failed to finalize tar archive structure")?;
    encoder
        .finish()
        .with_context(|| format!("Failed to finish gzip stream for {}", destination.display()))?;
    Ok(())
}
