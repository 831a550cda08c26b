//! # bakrs Library
//!
//! File: cli/src/lib.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Timestamped backups and zip / tar.gz archive management. The `bakrs` binary
//! (`main.rs`) is a thin command-line layer over this library.
//!
//! - `common::backup::create_backup` copies or archives a file or directory next
//!   to itself under a timestamped name.
//! - `common::archive::manage` creates, extracts and appends to archives,
//!   choosing zip or tar.gz from the archive's file name.
//! - `core` holds the error type and the optional configuration file loader.
//! - `commands` holds the clap argument definitions and handlers for the binary.
//!

pub mod commands;
pub mod common;
pub mod core;
