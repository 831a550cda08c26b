//! # bakrs Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the infrastructure shared by the library functions
//! and the command-line front end:
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and the crate-wide `Result` alias
//!
//! ```rust,ignore
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{BakrsError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
