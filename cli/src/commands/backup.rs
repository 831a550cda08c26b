//! # bakrs Backup Command
//!
//! File: cli/src/commands/backup.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `bakrs backup <TARGET>`. The backup is written next to the target
//! and its path is printed to stdout.
//!
//! The compression format is taken from the first of:
//! 1. `--no-compress` (plain copy)
//! 2. `--compress <FORMAT>` or `BAKRS_COMPRESS_FORMAT`
//! 3. `backup.compress_format` in the configuration
//!
//! With none of these set the backup is a plain copy.
//!
//! ```bash
//! bakrs backup notes.txt                # notes_20240318120000.txt
//! bakrs backup photos --compress tar.gz # photos_20240318120000.tar.gz
//! ```
//!
use crate::common::backup;
use crate::common::clock::SystemClock;
use crate::core::config;
use crate::core::error::Result;
use clap::Parser;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Arguments for `bakrs backup`.
#[derive(Parser, Debug)]
pub struct BackupArgs {
    /// File or directory to back up.
    target: PathBuf,

    /// Archive the backup with this format (zip, tar.gz, tgz, tar).
    #[arg(short, long, value_name = "FORMAT", env = "BAKRS_COMPRESS_FORMAT")]
    compress: Option<String>,

    /// Make a plain copy even when a format is set in the environment or config.
    #[arg(long)]
    no_compress: bool,
}

pub fn handle_backup(args: BackupArgs) -> Result<()> {
    let format = resolve_format(&args)?;
    debug!("Backup format: {:?}", format);

    let created = backup::create_backup(&args.target, format.as_deref(), &SystemClock)?;
    println!("{}", display_path(&created));
    Ok(())
}

fn resolve_format(args: &BackupArgs) -> Result<Option<String>> {
    if args.no_compress {
        return Ok(None);
    }
    if let Some(format) = &args.compress {
        return Ok(Some(format.clone()));
    }
    Ok(config::load_config()?.backup.compress_format)
}

/// Shows absolute paths relative to the working directory.
fn display_path(path: &Path) -> String {
    if path.is_absolute() {
        if let Some(relative) = env::current_dir()
            .ok()
            .and_then(|cwd| pathdiff::diff_paths(path, cwd))
        {
            return relative.display().to_string();
        }
    }
    path.display().to_string()
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_backup_with_compress() {
        let args = BackupArgs::try_parse_from(["backup", "notes.txt", "--compress", "zip"])
            .expect("valid arguments");
        assert_eq!(args.target, PathBuf::from("notes.txt"));
        assert_eq!(args.compress.as_deref(), Some("zip"));
        assert!(!args.no_compress);
    }

    #[test]
    fn test_no_compress_wins() -> Result<()> {
        let args = BackupArgs::try_parse_from([
            "backup",
            "notes.txt",
            "--compress",
            "zip",
            "--no-compress",
        ])?;
        assert_eq!(resolve_format(&args)?, None);
        Ok(())
    }

    #[test]
    fn test_explicit_compress_is_used() -> Result<()> {
        let args = BackupArgs::try_parse_from(["backup", "notes.txt", "-c", "tar.gz"])?;
        assert_eq!(resolve_format(&args)?, Some("tar.gz".to_string()));
        Ok(())
    }

    #[test]
    fn test_target_is_required() {
        assert!(BackupArgs::try_parse_from(["backup"]).is_err());
    }

    #[test]
    fn test_display_path_keeps_relative() {
        assert_eq!(display_path(Path::new("dir/a_1.txt")), "dir/a_1.txt");
    }
}
