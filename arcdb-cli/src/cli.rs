//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{
    CompletionsCommand, ExportCommand, InfoCommand, MigrateCommand, PathCommand, VacuumCommand,
};

/// Maintenance and schema migrations for the arc database.
#[derive(Parser)]
#[command(name = "arc-db")]
#[command(version, about = "Database operations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Database file to operate on
    #[arg(long, value_name = "PATH", global = true, env = "ARC_DB_PATH")]
    pub db: Option<PathBuf>,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "ARC_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true)]
    pub busy_timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Show database info and table counts
    Info(InfoCommand),

    /// Migration commands
    #[command(subcommand)]
    Migrate(MigrateCommand),

    /// Run VACUUM on the database
    Vacuum(VacuumCommand),

    /// Export tables to JSONL
    Export(ExportCommand),

    /// Print database file path
    Path(PathCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
