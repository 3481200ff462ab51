//! Database connection management.
//!
//! This module provides the main database handle with the PRAGMA settings
//! used for every arc database file.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use crate::error::{Error, Result};

use super::config::DatabaseConfig;

/// A database connection wrapper with configuration.
///
/// The connection is owned exclusively by this value and closed when it is
/// dropped, whichever way the calling command exits.
///
/// # Examples
///
/// ```no_run
/// use arcdb::database::{Database, DatabaseConfig};
///
/// let config = DatabaseConfig::new("/tmp/arc.db");
/// let db = Database::open(config).unwrap();
/// println!("{}", db.path().display());
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    config: DatabaseConfig,
}

impl Database {
    /// Opens a database connection with the given configuration.
    ///
    /// This function will:
    /// - Refuse to open a missing file unless `auto_create` is enabled
    /// - Create the parent directory if `auto_create` is enabled
    /// - Set WAL mode for concurrent access (writable handles only)
    /// - Configure the busy timeout
    ///
    /// The schema is left untouched; migrations are applied explicitly.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file is missing and `auto_create` is disabled
    /// - The parent directory cannot be created
    /// - The database file cannot be opened
    /// - PRAGMA settings cannot be applied
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if !config.path.exists() {
            if !config.auto_create {
                return Err(Error::DatabaseNotFound {
                    path: config.path.clone(),
                });
            }
            if let Some(parent) = config.path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }

        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let conn = Connection::open_with_flags(&config.path, flags)?;
        Self::configure(&conn, &config)?;

        log::debug!("opened database {}", config.path.display());
        Ok(Self { conn, config })
    }

    fn configure(conn: &Connection, config: &DatabaseConfig) -> Result<()> {
        conn.busy_timeout(config.busy_timeout)?;
        if !config.read_only {
            // journal_mode returns the resulting mode as a row
            let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
            conn.execute_batch("PRAGMA synchronous = NORMAL")?;
        }
        Ok(())
    }

    /// Returns the path of the open database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Returns the configuration the handle was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Returns a reference to the underlying `SQLite` connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns a mutable reference to the underlying `SQLite` connection.
    ///
    /// Transactions, and therefore the migration runner, need this.
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}
