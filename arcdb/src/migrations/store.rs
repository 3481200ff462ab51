//! The `schema_migrations` tracking table.
//!
//! One row per committed migration. Rows are inserted inside the same
//! transaction as the migration's statements and never updated or deleted.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Transaction};
use serde::Serialize;

use crate::error::{Error, Result};

use super::catalog::Migration;

/// Name of the tracking table.
pub const TRACKING_TABLE: &str = "schema_migrations";

const CREATE_TRACKING_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS schema_migrations (
        version INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        applied_at INTEGER NOT NULL
    )";

const SELECT_TRACKING_TABLE_EXISTS: &str =
    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'schema_migrations'";

const SELECT_APPLIED: &str =
    "SELECT version, name, applied_at FROM schema_migrations ORDER BY version";

// Plain INSERT: a second writer for the same version must hit the primary key.
const INSERT_APPLIED: &str =
    "INSERT INTO schema_migrations (version, name, applied_at) VALUES (?1, ?2, ?3)";

/// A committed migration as recorded in the tracking table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedRecord {
    /// Migration version.
    pub version: i64,
    /// Migration name at the time it was applied.
    pub name: String,
    /// Commit time, Unix epoch seconds (UTC).
    pub applied_at: i64,
}

impl AppliedRecord {
    /// A record for `migration` stamped with the current time.
    #[must_use]
    pub fn now(migration: &Migration) -> Self {
        Self {
            version: migration.version(),
            name: migration.name().to_string(),
            applied_at: Utc::now().timestamp(),
        }
    }

    /// The commit time as a UTC timestamp, if it is in range.
    #[must_use]
    pub fn applied_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.applied_at, 0)
    }
}

/// Applied records keyed by version, iterating in ascending order.
pub type AppliedSet = BTreeMap<i64, AppliedRecord>;

fn store_error(operation: &'static str) -> impl FnOnce(rusqlite::Error) -> Error {
    move |source| Error::Store { operation, source }
}

/// Creates the tracking table if it does not exist.
///
/// Safe to call repeatedly.
///
/// # Errors
///
/// Returns [`Error::Store`] if the table cannot be created.
pub fn ensure_tracking_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(CREATE_TRACKING_TABLE)
        .map_err(store_error("creating the tracking table"))
}

/// Checks whether the tracking table exists.
///
/// # Errors
///
/// Returns [`Error::Store`] if `sqlite_master` cannot be queried.
pub fn tracking_table_exists(conn: &Connection) -> Result<bool> {
    let count: i64 = conn
        .query_row(SELECT_TRACKING_TABLE_EXISTS, [], |row| row.get(0))
        .map_err(store_error("looking up the tracking table"))?;
    Ok(count > 0)
}

/// Reads every applied record.
///
/// Returns an empty set when no migration has ever run, including when the
/// tracking table does not exist yet. Never creates the table.
///
/// # Errors
///
/// Returns [`Error::Store`] if the table exists but cannot be read.
pub fn load_applied(conn: &Connection) -> Result<AppliedSet> {
    if !tracking_table_exists(conn)? {
        return Ok(AppliedSet::new());
    }

    let operation = "loading applied migrations";
    let mut stmt = conn.prepare(SELECT_APPLIED).map_err(store_error(operation))?;
    let rows = stmt
        .query_map([], |row| {
            Ok(AppliedRecord {
                version: row.get(0)?,
                name: row.get(1)?,
                applied_at: row.get(2)?,
            })
        })
        .map_err(store_error(operation))?;

    let mut applied = AppliedSet::new();
    for row in rows {
        let record = row.map_err(store_error(operation))?;
        applied.insert(record.version, record);
    }
    Ok(applied)
}

/// Inserts one applied record.
///
/// Takes a [`Transaction`] so the record can only be written inside the
/// migration's own atomic unit.
///
/// # Errors
///
/// Returns [`Error::Store`] if the insert fails, including when a record for
/// the version already exists.
pub fn record_applied(tx: &Transaction<'_>, record: &AppliedRecord) -> Result<()> {
    tx.execute(
        INSERT_APPLIED,
        params![record.version, record.name, record.applied_at],
    )
    .map_err(store_error("recording an applied migration"))?;
    Ok(())
}
