//! # bakrs Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module loads, merges and validates the optional bakrs configuration.
//! Configuration only supplies defaults for the command-line front end; the
//! backup and archive functions in `common` take every value as an argument.
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.bakrs.toml` in the current directory or an ancestor
//!    (the search stops at the first directory containing `.git`)
//! 2. User-specific `config.toml` in the platform config directory
//! 3. Default values defined in the code
//!
//! ## Examples
//!
//! ```toml
//! [backup]
//! compress_format = "tar.gz"
//! ```
//!
//! ```rust,ignore
//! let cfg = config::load_config()?;
//! let default_format = cfg.backup.compress_format.as_deref();
//! ```
//!
use crate::common::archive::ArchiveFormat;
use crate::core::error::{BakrsError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)] // Error if unknown fields are in TOML
pub struct Config {
    #[serde(default)]
    pub backup: BackupConfig,
}

/// Defaults for `bakrs backup`.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BackupConfig {
    /// Compression used when `--compress` is not given (e.g. "zip", "tar.gz").
    #[serde(default)]
    pub compress_format: Option<String>,
}

const PROJECT_CONFIG_FILENAME: &str = ".bakrs.toml";

pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    normalize_config(&mut merged_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "bakrs", "bakrs") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    match find_project_config_path(&current_dir) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            load_config_from_path(&path).map(Some)
        }
        None => {
            debug!("No project configuration file (.bakrs.toml) found in current directory or ancestors.");
            Ok(None)
        }
    }
}

/// Walks from `start` towards the filesystem root looking for `.bakrs.toml`,
/// giving up at the first repository root (a directory holding `.git`).
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let Some(project_cfg) = project else {
        return user;
    };
    Config {
        backup: BackupConfig {
            compress_format: project_cfg
                .backup
                .compress_format
                .or(user.backup.compress_format),
        },
    }
}

/// An empty `compress_format` means "no default compression".
fn normalize_config(config: &mut Config) {
    if config
        .backup
        .compress_format
        .as_deref()
        .is_some_and(|f| f.trim().is_empty())
    {
        config.backup.compress_format = None;
    }
}

fn validate_config(config: &Config) -> Result<()> {
    if let Some(format) = &config.backup.compress_format {
        if ArchiveFormat::from_compress_format(format) == ArchiveFormat::Unknown {
            return Err(anyhow!(BakrsError::Config(format!(
                "Unknown backup.compress_format '{}'. Expected one of: zip, tar.gz, tgz, tar.",
                format
            ))));
        }
    }
    Ok(())
}
