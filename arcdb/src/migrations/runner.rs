//! Applying pending migrations.
//!
//! Each pending migration runs in its own `IMMEDIATE` transaction together
//! with the insert of its applied record. Nothing from a failed migration
//! survives, so rerunning after a failure resumes at the failed version.
//!
//! Statements may not end or open transactions themselves; the runner
//! refuses them before they execute.

use rusqlite::fallible_iterator::FallibleIterator;
use rusqlite::{Batch, Connection, TransactionBehavior};

use crate::error::{Error, Result};

use super::catalog::{Catalog, Migration};
use super::store::{self, AppliedRecord, AppliedSet};

/// Leading keywords of statements that would split a migration's transaction.
const TRANSACTION_KEYWORDS: [&str; 6] =
    ["BEGIN", "COMMIT", "END", "ROLLBACK", "SAVEPOINT", "RELEASE"];

/// Catalog entries not present in `applied`, ascending by version.
///
/// # Examples
///
/// ```
/// use arcdb::migrations::{pending, AppliedRecord, AppliedSet, Catalog, Migration};
///
/// let catalog = Catalog::new(vec![
///     Migration::new(1, "one", ["SELECT 1"]),
///     Migration::new(2, "two", ["SELECT 1"]),
/// ])
/// .unwrap();
///
/// let mut applied = AppliedSet::new();
/// applied.insert(1, AppliedRecord { version: 1, name: "one".into(), applied_at: 0 });
///
/// let todo: Vec<i64> = pending(&catalog, &applied).iter().map(|m| m.version()).collect();
/// assert_eq!(todo, vec![2]);
/// ```
#[must_use]
pub fn pending<'c>(catalog: &'c Catalog, applied: &AppliedSet) -> Vec<&'c Migration> {
    catalog
        .iter()
        .filter(|migration| !applied.contains_key(&migration.version()))
        .collect()
}

/// Applies a catalog to one database connection.
///
/// # Examples
///
/// ```
/// use arcdb::migrations::{Catalog, Migration, MigrationRunner};
/// use rusqlite::Connection;
///
/// let catalog = Catalog::new(vec![
///     Migration::new(1, "create_notes", ["CREATE TABLE notes (id INTEGER PRIMARY KEY)"]),
/// ])
/// .unwrap();
///
/// let mut conn = Connection::open_in_memory().unwrap();
/// assert_eq!(MigrationRunner::new(&mut conn, &catalog).apply_all().unwrap(), 1);
/// assert_eq!(MigrationRunner::new(&mut conn, &catalog).apply_all().unwrap(), 0);
/// ```
#[derive(Debug)]
pub struct MigrationRunner<'a> {
    conn: &'a mut Connection,
    catalog: &'a Catalog,
}

impl<'a> MigrationRunner<'a> {
    /// Creates a runner over an exclusively borrowed connection.
    pub fn new(conn: &'a mut Connection, catalog: &'a Catalog) -> Self {
        Self { conn, catalog }
    }

    /// Returns the migrations that would be applied, without changing anything.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if the tracking table cannot be read.
    pub fn plan(&self) -> Result<Vec<&'a Migration>> {
        let catalog = self.catalog;
        let applied = store::load_applied(&*self.conn)?;
        Ok(pending(catalog, &applied))
    }

    /// Applies every pending migration and returns the count applied.
    ///
    /// # Errors
    ///
    /// See [`MigrationRunner::apply_pending`].
    pub fn apply_all(&mut self) -> Result<usize> {
        self.apply_pending().map(|records| records.len())
    }

    /// Applies every pending migration in ascending order.
    ///
    /// Returns the records committed by this call; empty when the database is
    /// already up to date.
    ///
    /// # Errors
    ///
    /// - [`Error::Store`] if the tracking table cannot be created or read;
    ///   nothing has been applied.
    /// - [`Error::MigrationFailed`] for the first migration that fails. Its
    ///   transaction is rolled back, later versions are not attempted, and
    ///   the versions committed before it are listed in the error.
    pub fn apply_pending(&mut self) -> Result<Vec<AppliedRecord>> {
        store::ensure_tracking_table(self.conn)?;
        let applied = store::load_applied(self.conn)?;

        let catalog = self.catalog;
        let todo = pending(catalog, &applied);
        if todo.is_empty() {
            log::debug!("no pending migrations ({} applied)", applied.len());
            return Ok(Vec::new());
        }

        log::info!("applying {} pending migration(s)", todo.len());

        let mut committed: Vec<AppliedRecord> = Vec::with_capacity(todo.len());
        for migration in todo {
            match self.apply_one(migration) {
                Ok(record) => {
                    log::info!("applied migration {:03} {}", record.version, record.name);
                    committed.push(record);
                }
                Err(source) => {
                    log::error!(
                        "migration {:03} {} failed: {source}",
                        migration.version(),
                        migration.name()
                    );
                    return Err(Error::MigrationFailed {
                        version: migration.version(),
                        name: migration.name().to_string(),
                        applied: committed.iter().map(|r| r.version).collect(),
                        source: Box::new(source),
                    });
                }
            }
        }

        Ok(committed)
    }

    fn apply_one(&mut self, migration: &Migration) -> Result<AppliedRecord> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let total = migration.statements().len();
        for (index, statement) in migration.statements().iter().enumerate() {
            log::debug!(
                "migration {:03} statement {}/{total}",
                migration.version(),
                index + 1
            );
            execute_statements(&tx, statement)?;
        }

        let record = AppliedRecord::now(migration);
        store::record_applied(&tx, &record)?;

        // An early return drops `tx`, which rolls back.
        tx.commit()?;
        Ok(record)
    }
}

/// Runs each statement in `sql` in turn, like `execute_batch`, but checks
/// every one for transaction control before stepping it.
fn execute_statements(conn: &Connection, sql: &str) -> Result<()> {
    let mut batch = Batch::new(conn, sql);
    while let Some(mut stmt) = batch.next()? {
        let text = stmt.expanded_sql().unwrap_or_default();
        if let Some(keyword) = transaction_keyword(&text) {
            return Err(Error::Validation {
                field: "statement".into(),
                message: format!("{keyword} is not allowed inside a migration"),
            });
        }
        let mut rows = stmt.raw_query();
        while rows.next()?.is_some() {}
    }
    Ok(())
}

fn transaction_keyword(sql: &str) -> Option<&'static str> {
    let first = leading_keyword(sql)?;
    TRANSACTION_KEYWORDS
        .iter()
        .copied()
        .find(|keyword| keyword.eq_ignore_ascii_case(first))
}

/// First word of a statement, skipping whitespace and comments.
fn leading_keyword(sql: &str) -> Option<&str> {
    let mut rest = sql;
    loop {
        rest = rest.trim_start();
        if let Some(after) = rest.strip_prefix("--") {
            rest = after.split_once('\n').map_or("", |(_, tail)| tail);
        } else if let Some(after) = rest.strip_prefix("/*") {
            rest = after.split_once("*/").map_or("", |(_, tail)| tail);
        } else {
            break;
        }
    }
    let end = rest
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(rest.len());
    (end > 0).then(|| &rest[..end])
}
