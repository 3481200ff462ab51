//! Error types for the arcdb library.
//!
//! Errors are a closed set of tagged kinds so callers can tell a malformed
//! migration catalog apart from a broken tracking table or a single failing
//! migration, using `thiserror` for the boilerplate.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with an arcdb error.
///
/// # Examples
///
/// ```
/// use arcdb::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the arcdb library.
#[derive(Debug, Error)]
pub enum Error {
    /// The migration catalog is malformed. Nothing has been applied.
    #[error("invalid migration catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// The `schema_migrations` tracking table could not be read or written.
    #[error("migration store error while {operation}: {source}")]
    Store {
        /// What the store was doing when it failed.
        operation: &'static str,
        /// The underlying database error.
        #[source]
        source: rusqlite::Error,
    },

    /// A pending migration failed and its transaction was rolled back.
    #[error(
        "migration {version:03} ({name}) failed after {} migration(s) applied: {source}",
        .applied.len()
    )]
    MigrationFailed {
        /// Version of the failing migration.
        version: i64,
        /// Name of the failing migration.
        name: String,
        /// Versions committed earlier in the same run, ascending.
        applied: Vec<i64>,
        /// What went wrong inside the migration's transaction.
        #[source]
        source: Box<Error>,
    },

    /// A database error occurred outside the migration engine.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A value could not be serialized to JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The database file does not exist and creation was not requested.
    #[error("database not found: {}", path.display())]
    DatabaseNotFound {
        /// The path that was looked up.
        path: PathBuf,
    },
}

/// Ways a migration catalog can be malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two definitions share a version number.
    #[error("duplicate migration version {version}: '{first}' and '{second}'")]
    DuplicateVersion {
        /// The duplicated version.
        version: i64,
        /// Name of the first definition with this version.
        first: String,
        /// Name of the second definition with this version.
        second: String,
    },

    /// A version number is zero or negative.
    #[error("migration '{name}' has invalid version {version}: versions must be positive")]
    InvalidVersion {
        /// The offending version.
        version: i64,
        /// Name of the offending definition.
        name: String,
    },

    /// A definition carries no statements.
    #[error("migration {version} ({name}) has no statements")]
    EmptyMigration {
        /// Version of the empty definition.
        version: i64,
        /// Name of the empty definition.
        name: String,
    },
}

impl Error {
    /// Check if the error comes from a malformed catalog.
    #[must_use]
    pub fn is_catalog_error(&self) -> bool {
        matches!(self, Self::Catalog(_))
    }

    /// Check if the error comes from the tracking table.
    #[must_use]
    pub fn is_store_error(&self) -> bool {
        matches!(self, Self::Store { .. })
    }

    /// Check if the error is a failed migration.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcdb::Error;
    ///
    /// let err = Error::MigrationFailed {
    ///     version: 2,
    ///     name: "add_index".into(),
    ///     applied: vec![1],
    ///     source: Box::new(Error::Validation {
    ///         field: "sql".into(),
    ///         message: "boom".into(),
    ///     }),
    /// };
    /// assert!(err.is_migration_failure());
    /// assert!(!err.is_store_error());
    /// ```
    #[must_use]
    pub fn is_migration_failure(&self) -> bool {
        matches!(self, Self::MigrationFailed { .. })
    }

    /// Check if the error was caused by another connection holding the lock.
    ///
    /// Looks through store and migration wrappers down to the `SQLite` code.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        match self {
            Self::Database(e) | Self::Store { source: e, .. } => is_busy_code(e),
            Self::MigrationFailed { source, .. } => source.is_busy(),
            _ => false,
        }
    }
}

fn is_busy_code(err: &rusqlite::Error) -> bool {
    matches!(
        err.sqlite_error_code(),
        Some(rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked)
    )
}
