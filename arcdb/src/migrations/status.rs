//! Read-only view of which migrations are applied.

use rusqlite::Connection;
use serde::Serialize;

use crate::error::Result;

use super::catalog::Catalog;
use super::store::{self, AppliedRecord, AppliedSet};

/// One catalog migration and whether it has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEntry {
    /// Migration version.
    pub version: i64,
    /// Name from the catalog.
    pub name: String,
    /// True iff the version is in the applied set.
    pub applied: bool,
    /// Commit time (epoch seconds) when applied.
    pub applied_at: Option<i64>,
}

/// Joins the catalog with the applied set, one entry per catalog migration.
///
/// # Examples
///
/// ```
/// use arcdb::migrations::{report, AppliedSet, Catalog, Migration};
///
/// let catalog = Catalog::new(vec![Migration::new(1, "one", ["SELECT 1"])]).unwrap();
/// let entries = report(&catalog, &AppliedSet::new());
/// assert_eq!(entries.len(), 1);
/// assert!(!entries[0].applied);
/// ```
#[must_use]
pub fn report(catalog: &Catalog, applied: &AppliedSet) -> Vec<StatusEntry> {
    catalog
        .iter()
        .map(|migration| {
            let record = applied.get(&migration.version());
            StatusEntry {
                version: migration.version(),
                name: migration.name().to_string(),
                applied: record.is_some(),
                applied_at: record.map(|r| r.applied_at),
            }
        })
        .collect()
}

/// Applied records only, ascending by version.
///
/// Includes versions this build's catalog does not know about.
#[must_use]
pub fn history(applied: &AppliedSet) -> Vec<AppliedRecord> {
    applied.values().cloned().collect()
}

/// Catalog view and applied history read in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    /// One entry per catalog migration, ascending.
    pub entries: Vec<StatusEntry>,
    /// Every applied record, ascending.
    pub history: Vec<AppliedRecord>,
}

impl StatusSnapshot {
    /// Builds a snapshot from already loaded state.
    #[must_use]
    pub fn new(catalog: &Catalog, applied: &AppliedSet) -> Self {
        Self {
            entries: report(catalog, applied),
            history: history(applied),
        }
    }

    /// Number of catalog migrations not yet applied.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.applied).count()
    }

    /// Applied records whose version is missing from the catalog.
    ///
    /// Non-empty when the database was migrated by a newer build.
    #[must_use]
    pub fn unknown(&self) -> Vec<&AppliedRecord> {
        self.history
            .iter()
            .filter(|record| !self.entries.iter().any(|e| e.version == record.version))
            .collect()
    }
}

/// Reads status for one connection. Never writes.
#[derive(Debug)]
pub struct StatusReporter<'a> {
    conn: &'a Connection,
    catalog: &'a Catalog,
}

impl<'a> StatusReporter<'a> {
    /// Creates a reporter.
    #[must_use]
    pub const fn new(conn: &'a Connection, catalog: &'a Catalog) -> Self {
        Self { conn, catalog }
    }

    /// See [`report`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Store`] if the tracking table cannot be read.
    pub fn entries(&self) -> Result<Vec<StatusEntry>> {
        Ok(report(self.catalog, &store::load_applied(self.conn)?))
    }

    /// See [`history`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Store`] if the tracking table cannot be read.
    pub fn history(&self) -> Result<Vec<AppliedRecord>> {
        Ok(history(&store::load_applied(self.conn)?))
    }

    /// Entries and history from a single read of the tracking table.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Store`] if the tracking table cannot be read.
    pub fn snapshot(&self) -> Result<StatusSnapshot> {
        let applied = store::load_applied(self.conn)?;
        Ok(StatusSnapshot::new(self.catalog, &applied))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::create_test_catalog;
    use crate::migrations::MigrationRunner;

    fn applied_set(records: &[(i64, &str)]) -> AppliedSet {
        records
            .iter()
            .map(|(version, name)| {
                (
                    *version,
                    AppliedRecord {
                        version: *version,
                        name: (*name).to_string(),
                        applied_at: 100 + version,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_report_marks_exactly_applied_versions() {
        let catalog = create_test_catalog(&[1, 2, 3, 4]);
        let applied = applied_set(&[(2, "create_t2"), (4, "create_t4")]);

        let entries = report(&catalog, &applied);
        let flags: Vec<(i64, bool)> = entries.iter().map(|e| (e.version, e.applied)).collect();
        assert_eq!(flags, vec![(1, false), (2, true), (3, false), (4, true)]);
        assert_eq!(entries[1].applied_at, Some(102));
        assert_eq!(entries[0].applied_at, None);
    }

    #[test]
    fn test_history_is_sorted_and_includes_unknown_versions() {
        let catalog = create_test_catalog(&[1]);
        let applied = applied_set(&[(9, "from_newer_build"), (1, "create_t1")]);

        let records = history(&applied);
        let versions: Vec<i64> = records.iter().map(|r| r.version).collect();
        assert_eq!(versions, vec![1, 9]);

        let snapshot = StatusSnapshot::new(&catalog, &applied);
        assert_eq!(snapshot.pending_count(), 0);
        let unknown: Vec<i64> = snapshot.unknown().iter().map(|r| r.version).collect();
        assert_eq!(unknown, vec![9]);
    }

    #[test]
    fn test_report_uses_catalog_names() {
        let catalog = create_test_catalog(&[1]);
        let applied = applied_set(&[(1, "old_name")]);

        let entries = report(&catalog, &applied);
        assert_eq!(entries[0].name, "create_t1");
        assert_eq!(history(&applied)[0].name, "old_name");
    }

    #[test]
    fn test_reporter_reads_database_without_writing() {
        let mut conn = Connection::open_in_memory().unwrap();
        let catalog = create_test_catalog(&[1, 2]);

        {
            let reporter = StatusReporter::new(&conn, &catalog);
            let snapshot = reporter.snapshot().unwrap();
            assert_eq!(snapshot.pending_count(), 2);
            assert!(snapshot.history.is_empty());
        }
        assert!(!store::tracking_table_exists(&conn).unwrap());

        MigrationRunner::new(&mut conn, &create_test_catalog(&[1]))
            .apply_all()
            .unwrap();

        let reporter = StatusReporter::new(&conn, &catalog);
        let entries = reporter.entries().unwrap();
        assert!(entries[0].applied);
        assert!(!entries[1].applied);
        assert_eq!(reporter.history().unwrap().len(), 1);
    }
}
