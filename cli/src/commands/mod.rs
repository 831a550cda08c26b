//! # bakrs Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Top-level command groups of the `bakrs` binary. Each module defines its
//! clap argument struct and a `handle_*` function that `main.rs` routes to.
//!
//! - `backup`: Timestamped backup of a file or directory
//! - `archive`: Archive `create`, `extract` and `add` subcommands
//!

/// `bakrs backup <TARGET>`.
pub mod backup;
/// `bakrs archive <create|extract|add>`.
pub mod archive;
