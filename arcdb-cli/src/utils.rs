//! Utility functions for CLI operations.
//!
//! Configuration loading, database path resolution and opening, shared by
//! every command.

use std::path::PathBuf;
use std::time::Duration;

use arcdb::database::DATABASE_FILE_NAME;
use arcdb::{Catalog, Config, ConfigBuilder, Database, DatabaseConfig, Error as LibError};

use crate::error::CliError;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
#[allow(dead_code)] // `verbose` is consumed by the logger before dispatch
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Explicit database file.
    pub db: Option<PathBuf>,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the busy timeout (in seconds).
    pub busy_timeout: Option<u64>,
}

/// Load configuration.
///
/// Precedence, highest first:
/// 1. Global options
/// 2. Environment variables
/// 3. `<data_dir>/config.yaml`
/// 4. Built-in defaults
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();

    if let Some(ref data_dir) = global.data_dir {
        builder = builder.with_data_dir(data_dir);
    }

    if let Some(seconds) = global.busy_timeout {
        builder = builder.with_config(Config {
            busy_timeout_seconds: Some(seconds),
            ..Config::default()
        });
    }

    builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Resolve the database path from global options.
///
/// `--db` wins, then `--data-dir`, then the library's environment-based
/// resolution.
pub fn resolve_database_path(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    if let Some(ref db) = global.db {
        return Ok(db.clone());
    }

    if let Some(ref data_dir) = global.data_dir {
        return Ok(data_dir.join(DATABASE_FILE_NAME));
    }

    arcdb::database::resolve_database_path().map_err(|e| CliError::Config(e.to_string()))
}

/// Open the database, creating it if it does not exist yet.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_database_path(global)?;
    let db_config = DatabaseConfig::new(db_path)
        .with_busy_timeout(Duration::from_secs(config.busy_timeout_seconds()));

    Database::open(db_config).map_err(CliError::from)
}

/// Open an existing database read-only.
///
/// Returns `None` when the file does not exist; nothing is created.
pub fn open_database_read_only(
    global: &GlobalOptions,
    config: &Config,
) -> Result<Option<Database>, CliError> {
    let db_path = resolve_database_path(global)?;
    let db_config = DatabaseConfig::new(db_path)
        .with_busy_timeout(Duration::from_secs(config.busy_timeout_seconds()))
        .read_only();

    match Database::open(db_config) {
        Ok(db) => Ok(Some(db)),
        Err(LibError::DatabaseNotFound { .. }) => Ok(None),
        Err(e) => Err(CliError::from(e)),
    }
}

/// The catalog compiled into this binary.
pub fn embedded_catalog() -> Result<Catalog, CliError> {
    Catalog::embedded().map_err(CliError::from)
}
