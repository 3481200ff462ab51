#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # arcdb
//!
//! Schema migrations and maintenance for the arc `SQLite` database.
//!
//! The migration engine applies a fixed, compiled-in catalog of versioned
//! migrations. Each migration runs in its own transaction together with the
//! row that records it in `schema_migrations`, so a database is always at
//! some well-defined version and a failed run can simply be repeated.
//!
//! ## Core Types
//!
//! - [`Catalog`] and [`Migration`]: the ordered set of schema changes
//! - [`MigrationRunner`]: applies whatever is pending
//! - [`StatusReporter`]: read-only view of applied vs. available migrations
//! - [`Database`] and [`DatabaseConfig`]: connection handling and maintenance
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use arcdb::{Catalog, Database, DatabaseConfig, MigrationRunner, StatusReporter};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let mut db = Database::open(DatabaseConfig::new(dir.path().join("arc.db"))).unwrap();
//! let catalog = Catalog::embedded().unwrap();
//!
//! let applied = MigrationRunner::new(db.connection_mut(), &catalog).apply_all().unwrap();
//! assert_eq!(applied, catalog.len());
//!
//! let snapshot = StatusReporter::new(db.connection(), &catalog).snapshot().unwrap();
//! assert_eq!(snapshot.pending_count(), 0);
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod logging;
pub mod migrations;
pub mod output;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig, DatabaseInfo};
pub use error::{CatalogError, Error, Result};
pub use export::{export_tables, ExportSummary};
pub use logging::{init_logger, LogLevel, Logger};
pub use migrations::{
    AppliedRecord, Catalog, Migration, MigrationRunner, StatusEntry, StatusReporter,
    StatusSnapshot,
};
pub use output::StatusFormat;
