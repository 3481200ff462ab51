//! The ordered, validated set of migrations known to a build.

use std::slice;

use crate::error::{CatalogError, Result};

use super::embedded;

/// A versioned, named schema change.
///
/// # Examples
///
/// ```
/// use arcdb::migrations::Migration;
///
/// let m = Migration::new(1, "create_notes", ["CREATE TABLE notes (id INTEGER PRIMARY KEY)"]);
/// assert_eq!(m.version(), 1);
/// assert_eq!(m.statements().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    version: i64,
    name: String,
    statements: Vec<String>,
}

impl Migration {
    /// Creates a migration definition.
    ///
    /// Validation happens when the migration is placed in a [`Catalog`].
    pub fn new<N, I, S>(version: i64, name: N, statements: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            version,
            name: name.into(),
            statements: statements.into_iter().map(Into::into).collect(),
        }
    }

    /// The version; ascending versions define application order.
    #[must_use]
    pub const fn version(&self) -> i64 {
        self.version
    }

    /// The display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The statements, in execution order.
    #[must_use]
    pub fn statements(&self) -> &[String] {
        &self.statements
    }
}

/// Migrations sorted ascending by version, with unique versions.
///
/// A `Catalog` can only be obtained through [`Catalog::new`] (or
/// [`Catalog::embedded`]), so holding one means the invariants hold.
///
/// # Examples
///
/// ```
/// use arcdb::migrations::{Catalog, Migration};
///
/// let catalog = Catalog::new(vec![
///     Migration::new(2, "second", ["CREATE TABLE b (id INTEGER)"]),
///     Migration::new(1, "first", ["CREATE TABLE a (id INTEGER)"]),
/// ])
/// .unwrap();
///
/// let versions: Vec<i64> = catalog.iter().map(|m| m.version()).collect();
/// assert_eq!(versions, vec![1, 2]);
///
/// let duplicate = Catalog::new(vec![
///     Migration::new(5, "a", ["SELECT 1"]),
///     Migration::new(5, "b", ["SELECT 1"]),
/// ]);
/// assert!(duplicate.is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    migrations: Vec<Migration>,
}

impl Catalog {
    /// Builds a catalog, sorting by version.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidVersion`] if a version is zero or negative
    /// - [`CatalogError::EmptyMigration`] if a migration has no non-blank statement
    /// - [`CatalogError::DuplicateVersion`] if two migrations share a version
    pub fn new(mut migrations: Vec<Migration>) -> std::result::Result<Self, CatalogError> {
        for migration in &migrations {
            if migration.version <= 0 {
                return Err(CatalogError::InvalidVersion {
                    version: migration.version,
                    name: migration.name.clone(),
                });
            }
            if migration.statements.iter().all(|s| s.trim().is_empty()) {
                return Err(CatalogError::EmptyMigration {
                    version: migration.version,
                    name: migration.name.clone(),
                });
            }
        }

        // Stable sort keeps duplicates in input order for the error message
        migrations.sort_by_key(Migration::version);

        if let Some(pair) = migrations
            .windows(2)
            .find(|pair| pair[0].version == pair[1].version)
        {
            return Err(CatalogError::DuplicateVersion {
                version: pair[0].version,
                first: pair[0].name.clone(),
                second: pair[1].name.clone(),
            });
        }

        Ok(Self { migrations })
    }

    /// The catalog compiled into this build.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Catalog`] if the built-in table is malformed.
    pub fn embedded() -> Result<Self> {
        Ok(Self::new(embedded::migrations())?)
    }

    /// All migrations, ascending by version.
    #[must_use]
    pub fn list_all(&self) -> &[Migration] {
        &self.migrations
    }

    /// Iterates over the migrations in ascending order.
    pub fn iter(&self) -> slice::Iter<'_, Migration> {
        self.migrations.iter()
    }

    /// Looks up a migration by version.
    #[must_use]
    pub fn get(&self, version: i64) -> Option<&Migration> {
        self.migrations
            .binary_search_by_key(&version, Migration::version)
            .ok()
            .map(|index| &self.migrations[index])
    }

    /// Returns true if the catalog defines this version.
    #[must_use]
    pub fn contains(&self, version: i64) -> bool {
        self.get(version).is_some()
    }

    /// The highest version, if any.
    #[must_use]
    pub fn latest_version(&self) -> Option<i64> {
        self.migrations.last().map(Migration::version)
    }

    /// Number of migrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    /// Returns true if the catalog has no migrations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Migration;
    type IntoIter = slice::Iter<'a, Migration>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
