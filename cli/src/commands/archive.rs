//! # bakrs Archive Command Group
//!
//! File: cli/src/commands/archive.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Routes `bakrs archive <subcommand>` to `common::archive::run`. The archive
//! format (zip or tar.gz) is chosen from the archive's file name.
//!
//! ```bash
//! bakrs archive create  ./project project.tar.gz
//! bakrs archive extract project.tar.gz ./restored
//! bakrs archive add     project.tar.gz notes.txt todo.md
//! ```
//!
use crate::common::archive::{self, ArchiveAction};
use crate::core::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Arguments for the `bakrs archive` command group.
#[derive(Parser, Debug)]
pub struct ArchiveArgs {
    #[command(subcommand)]
    command: ArchiveCommand,
}

#[derive(Subcommand, Debug)]
enum ArchiveCommand {
    /// Create an archive from a directory.
    Create {
        /// Directory whose contents are archived.
        source: PathBuf,
        /// Archive to write (.zip, .tar.gz, .tgz or .tar).
        destination: PathBuf,
    },
    /// Extract an archive into a directory, skipping unsafe member names.
    Extract {
        /// Archive to read.
        archive: PathBuf,
        /// Directory to extract into; created if missing.
        destination: PathBuf,
    },
    /// Add files to an existing archive under their base names.
    Add {
        /// Archive to extend.
        archive: PathBuf,
        /// Files to add.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

pub fn handle_archive(args: ArchiveArgs) -> Result<()> {
    match args.command {
        ArchiveCommand::Create {
            source,
            destination,
        } => archive::run(
            ArchiveAction::Create,
            &source,
            Some(destination.as_path()),
            &[],
        ),
        ArchiveCommand::Extract {
            archive: archive_path,
            destination,
        } => {
            archive::run(
                ArchiveAction::Extract,
                &archive_path,
                Some(destination.as_path()),
                &[],
            )?;
            println!("{}", destination.display());
            Ok(())
        }
        ArchiveCommand::Add {
            archive: archive_path,
            files,
        } => archive::run(ArchiveAction::Add, &archive_path, None, &files),
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_archive_create() {
        let args = ArchiveArgs::try_parse_from(["archive", "create", "src", "out.zip"])
            .expect("valid arguments");
        match args.command {
            ArchiveCommand::Create {
                source,
                destination,
            } => {
                assert_eq!(source, PathBuf::from("src"));
                assert_eq!(destination, PathBuf::from("out.zip"));
            }
            _ => panic!("Incorrect subcommand parsed for 'create'"),
        }
    }

    #[test]
    fn test_parses_archive_add_files() {
        let args = ArchiveArgs::try_parse_from(["archive", "add", "a.tgz", "x.txt", "y.txt"])
            .expect("valid arguments");
        match args.command {
            ArchiveCommand::Add { files, .. } => assert_eq!(files.len(), 2),
            _ => panic!("Incorrect subcommand parsed for 'add'"),
        }
    }

    #[test]
    fn test_add_requires_files() {
        assert!(ArchiveArgs::try_parse_from(["archive", "add", "a.tgz"]).is_err());
    }

    #[test]
    fn test_extract_requires_destination() {
        assert!(ArchiveArgs::try_parse_from(["archive", "extract", "a.zip"]).is_err());
    }
}
