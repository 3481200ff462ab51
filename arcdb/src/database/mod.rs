//! Database layer for the arc `SQLite` file.
//!
//! This module provides connection management with the PRAGMA settings
//! every command relies on, path resolution, and the maintenance helpers
//! behind `info` and `vacuum`.
//!
//! # Examples
//!
//! ```no_run
//! use arcdb::database::{Database, DatabaseConfig, DEFAULT_INFO_TABLES};
//!
//! let db = Database::open(DatabaseConfig::new("/tmp/arc.db")).unwrap();
//! let info = db.info(&DEFAULT_INFO_TABLES).unwrap();
//! for table in info.tables {
//!     println!("{}: {}", table.name, table.rows);
//! }
//! ```

mod config;
mod connection;
mod maintenance;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE_NAME,
    DATA_DIR_ENV, DB_PATH_ENV,
};
pub use connection::Database;
pub use maintenance::{quote_identifier, DatabaseInfo, TableCount, DEFAULT_INFO_TABLES};
