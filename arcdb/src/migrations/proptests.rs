//! Property-based tests for the migration engine.
//!
//! These cover ordering and status accuracy for arbitrary catalogs and
//! applied sets, plus the apply-twice no-op property against a real database.

use std::collections::BTreeSet;

use proptest::prelude::*;
use rusqlite::Connection;

use super::*;

fn catalog_from(versions: &[i64]) -> Catalog {
    let migrations = versions
        .iter()
        .map(|v| {
            Migration::new(
                *v,
                format!("m{v}"),
                [format!("CREATE TABLE t{v} (id INTEGER)")],
            )
        })
        .collect();
    Catalog::new(migrations).unwrap()
}

fn applied_from(versions: &BTreeSet<i64>) -> AppliedSet {
    versions
        .iter()
        .map(|v| {
            (
                *v,
                AppliedRecord {
                    version: *v,
                    name: format!("m{v}"),
                    applied_at: 0,
                },
            )
        })
        .collect()
}

// Unique versions in arbitrary (unsorted) order
fn versions_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::btree_set(1i64..10_000, 0..40)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        .. ProptestConfig::default()
    })]

    #[test]
    fn pending_is_ascending_catalog_minus_applied(
        versions in versions_strategy(),
        applied in prop::collection::btree_set(1i64..10_000, 0..40),
    ) {
        let catalog = catalog_from(&versions);
        let applied_set = applied_from(&applied);

        let todo: Vec<i64> = pending(&catalog, &applied_set).iter().map(|m| m.version()).collect();

        prop_assert!(todo.windows(2).all(|w| w[0] < w[1]));

        let expected: Vec<i64> = versions
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .difference(&applied)
            .copied()
            .collect();
        prop_assert_eq!(todo, expected);
    }

    #[test]
    fn report_flags_exactly_applied_versions(
        versions in versions_strategy(),
        applied in prop::collection::btree_set(1i64..10_000, 0..40),
    ) {
        let catalog = catalog_from(&versions);
        let entries = report(&catalog, &applied_from(&applied));

        prop_assert_eq!(entries.len(), catalog.len());
        prop_assert!(entries.windows(2).all(|w| w[0].version < w[1].version));
        for entry in &entries {
            prop_assert_eq!(entry.applied, applied.contains(&entry.version));
        }
    }

    #[test]
    fn catalog_rejects_any_duplicate(versions in versions_strategy(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!versions.is_empty());
        let dup = versions[pick.index(versions.len())];

        let mut migrations: Vec<Migration> = versions
            .iter()
            .map(|v| Migration::new(*v, "m", ["SELECT 1"]))
            .collect();
        migrations.push(Migration::new(dup, "dup", ["SELECT 1"]));

        let is_duplicate_error = matches!(
            Catalog::new(migrations),
            Err(crate::error::CatalogError::DuplicateVersion { version, .. }) if version == dup
        );
        prop_assert!(is_duplicate_error);
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 32,
        .. ProptestConfig::default()
    })]

    #[test]
    fn applying_twice_is_a_noop(
        versions in prop::collection::btree_set(1i64..500, 0..12),
        preapplied in prop::collection::btree_set(1i64..500, 0..12),
    ) {
        let all: Vec<i64> = versions.iter().copied().collect();
        let first: Vec<i64> = versions.intersection(&preapplied).copied().collect();

        let mut conn = Connection::open_in_memory().unwrap();
        MigrationRunner::new(&mut conn, &catalog_from(&first)).apply_all().unwrap();

        let catalog = catalog_from(&all);
        let applied = MigrationRunner::new(&mut conn, &catalog).apply_pending().unwrap();
        let applied_versions: Vec<i64> = applied.iter().map(|r| r.version).collect();
        let expected: Vec<i64> = versions.difference(&preapplied).copied().collect();
        prop_assert_eq!(applied_versions, expected);

        prop_assert_eq!(MigrationRunner::new(&mut conn, &catalog).apply_all().unwrap(), 0);
        let stored: Vec<i64> = store::load_applied(&conn).unwrap().into_keys().collect();
        prop_assert_eq!(stored, all);
    }
}
