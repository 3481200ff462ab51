//! Maintenance helpers: table counts, version lookup and compaction.

use std::path::PathBuf;

use rusqlite::params;

use crate::error::Result;

use super::connection::Database;

/// Tables reported by `info` unless configured otherwise.
pub const DEFAULT_INFO_TABLES: [&str; 5] = [
    "schema_migrations",
    "sessions",
    "external_repos",
    "env_backups",
    "repo_dependencies",
];

const SELECT_TABLE_EXISTS: &str =
    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1";

/// Row count for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCount {
    /// Table name.
    pub name: String,
    /// Number of rows.
    pub rows: i64,
}

/// Summary printed by `arc-db info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseInfo {
    /// Path of the database file.
    pub path: PathBuf,
    /// `SQLite` library version, if it could be queried.
    pub sqlite_version: Option<String>,
    /// Counts for the requested tables that exist, in request order.
    pub tables: Vec<TableCount>,
}

/// Quotes a name for use as an `SQLite` identifier.
///
/// ```
/// use arcdb::database::quote_identifier;
///
/// assert_eq!(quote_identifier("sessions"), "\"sessions\"");
/// assert_eq!(quote_identifier("odd\"name"), "\"odd\"\"name\"");
/// ```
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

impl Database {
    /// Returns the version of the linked `SQLite` library.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn sqlite_version(&self) -> Result<String> {
        Ok(self
            .conn
            .query_row("SELECT sqlite_version()", [], |row| row.get(0))?)
    }

    /// Checks whether a table with this name exists.
    ///
    /// # Errors
    ///
    /// Returns an error if `sqlite_master` cannot be queried.
    pub fn table_exists(&self, table: &str) -> Result<bool> {
        let count: i64 = self
            .conn
            .query_row(SELECT_TABLE_EXISTS, params![table], |row| row.get(0))?;
        Ok(count > 0)
    }

    /// Counts the rows of a table, or `None` if the table does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the count query fails for an existing table.
    pub fn row_count(&self, table: &str) -> Result<Option<i64>> {
        if !self.table_exists(table)? {
            return Ok(None);
        }
        let sql = format!("SELECT COUNT(*) FROM {}", quote_identifier(table));
        let rows = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(Some(rows))
    }

    /// Collects path, `SQLite` version and row counts for `tables`.
    ///
    /// Tables that do not exist are left out of the result.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing table cannot be counted.
    pub fn info<S: AsRef<str>>(&self, tables: &[S]) -> Result<DatabaseInfo> {
        let sqlite_version = match self.sqlite_version() {
            Ok(version) => Some(version),
            Err(e) => {
                log::warn!("could not query SQLite version: {e}");
                None
            }
        };

        let mut counts = Vec::with_capacity(tables.len());
        for table in tables {
            let name = table.as_ref();
            match self.row_count(name)? {
                Some(rows) => counts.push(TableCount {
                    name: name.to_string(),
                    rows,
                }),
                None => log::debug!("skipping missing table {name}"),
            }
        }

        Ok(DatabaseInfo {
            path: self.path().to_path_buf(),
            sqlite_version,
            tables: counts,
        })
    }

    /// Runs `VACUUM` to compact the database file.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails, e.g. inside a transaction or
    /// on a read-only handle.
    pub fn vacuum(&self) -> Result<()> {
        log::info!("vacuuming {}", self.path().display());
        self.conn.execute_batch("VACUUM")?;
        Ok(())
    }
}
