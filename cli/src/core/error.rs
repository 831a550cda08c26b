//! # bakrs Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used throughout bakrs. Domain failures
//! (missing backup target, bad archive action, unknown archive extension) are
//! variants of `BakrsError`; everything raised by the filesystem, `zip` or `tar`
//! travels unchanged inside `anyhow::Error`, with context attached.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `BakrsError`: A custom error enum using `thiserror` for the domain failures
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for propagation with context
//!
//! Because `anyhow` keeps the original error as the source, callers can still
//! recover the exact kind with `downcast_ref`:
//!
//! ```rust,ignore
//! match bakrs::common::archive::manage("bogus", src, None, &[]) {
//!     Err(e) if matches!(
//!         e.downcast_ref::<BakrsError>(),
//!         Some(BakrsError::InvalidArgument { .. })
//!     ) => println!("unknown action"),
//!     Err(e) if e.downcast_ref::<std::io::Error>().is_some() => println!("I/O failure"),
//!     _ => {}
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for bakrs.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BakrsError {
    /// The file or directory to back up does not exist.
    #[error("Target '{path}' does not exist and cannot be backed up.")]
    NotFound { path: String },

    /// An archive action outside `create`, `extract`, `add`.
    #[error("Unsupported action '{action}'. Supported actions are {allowed}.")]
    InvalidArgument { action: String, allowed: String },

    /// A recognized action was invoked without one of its required arguments.
    #[error("Action '{action}' requires {argument}.")]
    MissingArgument {
        action: &'static str,
        argument: &'static str,
    },

    /// The path's extension does not map to a supported archive format.
    #[error("Unsupported archive format for '{path}'. Expected .zip, .tar.gz, .tgz or .tar.")]
    UnsupportedFormat { path: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_error_display() {
        let not_found = BakrsError::NotFound {
            path: "docs".into(),
        };
        assert_eq!(
            not_found.to_string(),
            "Target 'docs' does not exist and cannot be backed up."
        );

        let invalid = BakrsError::InvalidArgument {
            action: "bogus".into(),
            allowed: "'create', 'extract', 'add'".into(),
        };
        assert_eq!(
            invalid.to_string(),
            "Unsupported action 'bogus'. Supported actions are 'create', 'extract', 'add'."
        );

        let missing = BakrsError::MissingArgument {
            action: "add",
            argument: "at least one file",
        };
        assert_eq!(missing.to_string(), "Action 'add' requires at least one file.");
    }

    #[test]
    fn test_domain_error_survives_context() {
        let result: Result<()> = Err(anyhow::anyhow!(BakrsError::UnsupportedFormat {
            path: "x.rar".into()
        }))
        .context("while creating archive");
        let err = result.unwrap_err();
        assert_eq!(
            err.downcast_ref::<BakrsError>(),
            Some(&BakrsError::UnsupportedFormat {
                path: "x.rar".into()
            })
        );
    }

    #[test]
    fn test_io_error_survives_context() {
        let result: Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            "exists",
        ))
        .context("while copying");
        let err = result.unwrap_err();
        assert_eq!(
            err.downcast_ref::<std::io::Error>().map(|e| e.kind()),
            Some(std::io::ErrorKind::AlreadyExists)
        );
    }
}
