//! Common test utilities for integration tests.

use std::path::PathBuf;

use arcdb::database::{Database, DatabaseConfig};
use arcdb::{Catalog, Migration};

/// Path for a fresh database file in a temporary directory.
///
/// The directory is leaked so the file outlives the helper.
#[allow(dead_code)]
pub fn temp_database_path() -> PathBuf {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("arc.db");
    std::mem::forget(dir);
    path
}

/// Opens a new file-backed database.
#[allow(dead_code)]
pub fn create_test_database() -> Database {
    Database::open(DatabaseConfig::new(temp_database_path())).unwrap()
}

/// A catalog where version `v` creates table `t{v}`.
#[allow(dead_code)]
pub fn table_catalog(versions: &[i64]) -> Catalog {
    Catalog::new(
        versions
            .iter()
            .map(|v| {
                Migration::new(
                    *v,
                    format!("create_t{v}"),
                    [format!("CREATE TABLE t{v} (id INTEGER PRIMARY KEY)")],
                )
            })
            .collect(),
    )
    .unwrap()
}

/// Applied versions as stored in `schema_migrations`.
#[allow(dead_code)]
pub fn applied_versions(db: &Database) -> Vec<i64> {
    arcdb::migrations::store::load_applied(db.connection())
        .unwrap()
        .into_keys()
        .collect()
}
