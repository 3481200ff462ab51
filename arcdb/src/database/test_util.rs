//! Shared test utilities for database unit tests.

use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::migrations::{Catalog, Migration};

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Builds a catalog of `versions`, each creating a table `t{version}`.
///
/// # Panics
///
/// Panics if the versions do not form a valid catalog.
#[must_use]
pub fn create_test_catalog(versions: &[i64]) -> Catalog {
    let migrations = versions
        .iter()
        .map(|v| {
            Migration::new(
                *v,
                format!("create_t{v}"),
                [format!("CREATE TABLE t{v} (id INTEGER PRIMARY KEY)")],
            )
        })
        .collect();
    Catalog::new(migrations).unwrap()
}
