//! Two handles migrating the same database file.
//!
//! Writers serialise on the `IMMEDIATE` transaction taken for each migration.
//! Whichever handle loses a race sees its migration fail and roll back; the
//! database always ends at a consistent version.

mod common;

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use arcdb::database::{Database, DatabaseConfig};
use arcdb::{Catalog, Migration, MigrationRunner};
use common::{applied_versions, table_catalog, temp_database_path};

#[test]
fn test_concurrent_runners_end_consistent() {
    let path = temp_database_path();
    // Create the file and tracking table up front so both handles start
    // from the same state.
    {
        let mut db = Database::open(DatabaseConfig::new(&path)).unwrap();
        MigrationRunner::new(db.connection_mut(), &Catalog::default())
            .apply_all()
            .unwrap();
    }

    let barrier = Arc::new(Barrier::new(2));
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let config =
                    DatabaseConfig::new(&path).with_busy_timeout(Duration::from_secs(10));
                let mut db = Database::open(config).unwrap();
                let catalog = table_catalog(&[1, 2, 3, 4, 5]);
                barrier.wait();
                MigrationRunner::new(db.connection_mut(), &catalog).apply_pending()
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for result in &results {
        if let Err(err) = result {
            assert!(err.is_migration_failure(), "unexpected error: {err}");
        }
    }
    assert!(results.iter().any(Result::is_ok));

    let mut db = Database::open(DatabaseConfig::new(&path)).unwrap();
    let applied = applied_versions(&db);
    assert_eq!(applied, vec![1, 2, 3, 4, 5]);
    for version in &applied {
        assert!(db.table_exists(&format!("t{version}")).unwrap());
    }

    assert_eq!(
        MigrationRunner::new(db.connection_mut(), &table_catalog(&[1, 2, 3, 4, 5]))
            .apply_all()
            .unwrap(),
        0
    );
}

#[test]
fn test_record_written_by_other_handle_is_seen() {
    let path = temp_database_path();
    let catalog = Catalog::new(vec![
        Migration::new(1, "one", ["CREATE TABLE one (id INTEGER)"]),
        Migration::new(2, "two", ["CREATE TABLE two (id INTEGER)"]),
    ])
    .unwrap();

    let mut first = Database::open(DatabaseConfig::new(&path)).unwrap();
    let mut second = Database::open(DatabaseConfig::new(&path)).unwrap();

    assert_eq!(
        MigrationRunner::new(first.connection_mut(), &catalog)
            .apply_all()
            .unwrap(),
        2
    );
    assert_eq!(
        MigrationRunner::new(second.connection_mut(), &catalog)
            .apply_all()
            .unwrap(),
        0
    );
}
