//! # bakrs Zip Archive Operations (`common::archive::zip`)
//!
//! File: cli/src/common/archive/zip.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Zip support for the archive manager, built on the `zip` crate:
//!
//! - `create_from_dir`: walks a directory with `walkdir` and stores every
//!   directory and file under its path relative to the walked root.
//! - `create_from_file`: a one-entry archive named after the file.
//! - `extract`: unpacks members accepted by `is_safe_member_name`, silently
//!   skipping the rest. Directory modes are applied after all members are
//!   written.
//! - `append`: opens an existing archive in append mode and adds files under
//!   their base names.
//!
//! Writers are always finished explicitly so the central directory is written;
//! on an early `?` return the writer is simply dropped.
//!
use super::{flattened_name, is_safe_member_name};
use crate::common::fs::io::ensure_dir_exists;
use crate::core::error::Result;
use anyhow::Context;
use std::cmp::Reverse;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Seek, Write};
use std::path::{Component, Path};
use tracing::debug;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Archives the whole tree under `source` into a new zip at `destination`.
pub fn create_from_dir(source: &Path, destination: &Path) -> Result<()> {
    let file = File::create(destination)
        .with_context(|| format!("Failed to create zip archive {}", destination.display()))?;
    let mut writer = ZipWriter::new(file);

    for entry in WalkDir::new(source)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry
            .with_context(|| format!("Failed to walk directory {}", source.display()))?;
        let name = relative_member_name(entry.path(), source)?;
        let options = entry_options(&entry.metadata()?);

        if entry.file_type().is_dir() {
            debug!("zip: adding directory {}/", name);
            writer.add_directory(format!("{}/", name), options)?;
        } else {
            debug!("zip: adding file {}", name);
            writer.start_file(name, options)?;
            let mut input = File::open(entry.path())
                .with_context(|| format!("Failed to open {}", entry.path().display()))?;
            io::copy(&mut input, &mut writer)?;
        }
    }

    writer
        .finish()
        .with_context(|| format!("Failed to finalize zip archive {}", destination.display()))?;
    Ok(())
}

/// Writes a zip at `destination` containing `file` under its base name.
pub fn create_from_file(file: &Path, destination: &Path) -> Result<()> {
    let output = File::create(destination)
        .with_context(|| format!("Failed to create zip archive {}", destination.display()))?;
    let mut writer = ZipWriter::new(output);
    write_flattened(&mut writer, file)?;
    writer
        .finish()
        .with_context(|| format!("Failed to finalize zip archive {}", destination.display()))?;
    Ok(())
}

/// Extracts every safely-named member of `archive_path` into `destination`.
pub fn extract(archive_path: &Path, destination: &Path) -> Result<()> {
    let file = File::open(archive_path)
        .with_context(|| format!("Failed to open zip archive {}", archive_path.display()))?;
    let mut archive = ZipArchive::new(BufReader::new(file))
        .with_context(|| format!("Failed to read zip archive {}", archive_path.display()))?;
    ensure_dir_exists(destination)?;

    let mut directories = Vec::new();
    for index in 0..archive.len() {
        let mut member = archive.by_index(index)?;
        let name = member.name().to_string();
        if !is_safe_member_name(&name) {
            debug!("zip: skipping unsafe member {:?}", name);
            continue;
        }
        let out_path = destination.join(&name);

        if member.is_dir() {
            fs::create_dir_all(&out_path)
                .with_context(|| format!("Failed to create directory {}", out_path.display()))?;
            if let Some(mode) = member.unix_mode() {
                directories.push((out_path, mode));
            }
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let mut output = File::create(&out_path)
            .with_context(|| format!("Failed to create {}", out_path.display()))?;
        io::copy(&mut member, &mut output)
            .with_context(|| format!("Failed to extract {}", name))?;

        if let Some(mode) = member.unix_mode() {
            set_mode(&out_path, mode)?;
        }
    }

    // Deepest first, so a read-only directory is locked after its contents exist.
    directories.sort_by_key(|(path, _)| Reverse(path.components().count()));
    for (path, mode) in directories {
        set_mode(&path, mode)?;
    }
    Ok(())
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode & 0o7777))
        .with_context(|| format!("Failed to set permissions on {}", path.display()))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

/// Appends `files` to the existing zip at `archive_path`, each under its base name.
///
/// A name that is already present in the archive makes the `zip` crate reject
/// the write; entries added before the failure are still committed.
pub fn append(archive_path: &Path, files: &[impl AsRef<Path>]) -> Result<()> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(archive_path)
        .with_context(|| format!("Failed to open zip archive {}", archive_path.display()))?;
    let mut writer = ZipWriter::new_append(file)
        .with_context(|| format!("Failed to read zip archive {}", archive_path.display()))?;

    let added = files
        .iter()
        .try_for_each(|file| write_flattened(&mut writer, file.as_ref()));
    // Commit whatever was written, even if a later file failed.
    let finished = writer.finish();
    added?;
    finished
        .with_context(|| format!("Failed to finalize zip archive {}", archive_path.display()))?;
    Ok(())
}

fn write_flattened<W: Write + Seek>(writer: &mut ZipWriter<W>, file: &Path) -> Result<()> {
    let name = flattened_name(file)?;
    let mut input =
        File::open(file).with_context(|| format!("Failed to open {}", file.display()))?;
    let options = entry_options(&input.metadata()?);
    debug!("zip: adding file {} as {}", file.display(), name);
    writer.start_file(name, options)?;
    io::copy(&mut input, writer)?;
    Ok(())
}

fn entry_options(metadata: &fs::Metadata) -> SimpleFileOptions {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    #[cfg(unix)]
    let options = {
        use std::os::unix::fs::PermissionsExt;
        options.unix_permissions(metadata.permissions().mode() & 0o7777)
    };
    #[cfg(not(unix))]
    let _ = metadata;
    options
}

/// `/`-joined path of `path` relative to `root`, independent of the host separator.
fn relative_member_name(path: &Path, root: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).with_context(|| {
        format!(
            "{} is not inside {}",
            path.display(),
            root.display()
        )
    })?;
    Ok(relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/"))
}
