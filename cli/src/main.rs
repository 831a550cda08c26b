//! # bakrs Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file serves as the main entry point for the bakrs CLI application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers in the `bakrs` library
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! bakrs --help
//!
//! # Back up a directory as a tarball, with progress logged at info level
//! bakrs -v backup ./photos --compress tar.gz
//!
//! # Restore it
//! bakrs archive extract photos_20240318120000.tar.gz ./restored
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level (`RUST_LOG` takes precedence)
//! 3. Route to the matching command handler
//! 4. Print any error to stderr and exit with status 1
//!
use bakrs::commands;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "bakrs",
    about = "Timestamped backups and zip / tar.gz archive management",
    long_about = "Back up files and directories next to themselves under a timestamped name,\n\
                  and create, extract or extend zip and tar.gz archives.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Back up a file or directory under a timestamped name.
    #[command(alias = "b")]
    Backup(commands::backup::BackupArgs),
    /// Create, extract or add to zip and tar.gz archives.
    #[command(alias = "a")]
    Archive(commands::archive::ArchiveArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Backup(args) => commands::backup::handle_backup(args),
        Commands::Archive(args) => commands::archive::handle_archive(args),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
