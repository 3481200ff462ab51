//! Schema migration engine.
//!
//! Tracks which versioned schema changes a database has committed, works out
//! which are still pending, and applies them in ascending order, each exactly
//! once and each atomically with its tracking record.
//!
//! - [`Catalog`]: the ordered, validated set of [`Migration`]s in this build
//! - [`store`]: the `schema_migrations` tracking table
//! - [`MigrationRunner`]: applies pending migrations
//! - [`StatusReporter`]: read-only applied/pending view
//!
//! # Examples
//!
//! ```
//! use arcdb::migrations::{Catalog, MigrationRunner, StatusReporter};
//! use rusqlite::Connection;
//!
//! let catalog = Catalog::embedded().unwrap();
//! let mut conn = Connection::open_in_memory().unwrap();
//!
//! let applied = MigrationRunner::new(&mut conn, &catalog).apply_all().unwrap();
//! assert_eq!(applied, catalog.len());
//!
//! let snapshot = StatusReporter::new(&conn, &catalog).snapshot().unwrap();
//! assert_eq!(snapshot.pending_count(), 0);
//! ```

mod catalog;
mod embedded;
mod runner;
mod status;
pub mod store;

#[cfg(test)]
mod proptests;

pub use catalog::{Catalog, Migration};
pub use runner::{pending, MigrationRunner};
pub use status::{history, report, StatusEntry, StatusReporter, StatusSnapshot};
pub use store::{AppliedRecord, AppliedSet, TRACKING_TABLE};
