//! CLI-specific error types with exit codes.
//!
//! Library errors are wrapped here and mapped to the process exit code.

use std::fmt;

use arcdb::Error as LibError;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// A migration failed during `migrate up`.
    Migration(LibError),

    /// I/O error.
    Io(std::io::Error),

    /// Timeout waiting for database lock.
    Timeout,

    /// Configuration error.
    Config(String),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Migration failure
    /// - 2: Timeout waiting for database lock
    /// - 5: I/O error
    /// - 6: Other library error
    /// - 7: Configuration error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Migration(e) if e.is_busy() => 2,
            CliError::Migration(_) => 1,
            CliError::Library(_) => 6,
            CliError::Timeout => 2,
            CliError::Io(_) => 5,
            CliError::Config(_) => 7,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) | CliError::Migration(e) => write!(f, "{e}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Timeout => write!(f, "Timeout waiting for database lock"),
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) | CliError::Migration(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        match e {
            LibError::MigrationFailed { .. } => CliError::Migration(e),
            LibError::Io(io) => CliError::Io(io),
            LibError::Configuration(_) => CliError::Config(e.to_string()),
            e if e.is_busy() => CliError::Timeout,
            e => CliError::Library(e),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn migration_failure(source: LibError) -> LibError {
        LibError::MigrationFailed {
            version: 3,
            name: "three".into(),
            applied: vec![1, 2],
            source: Box::new(source),
        }
    }

    #[test]
    fn test_exit_codes() {
        let other = LibError::Validation {
            field: "table".into(),
            message: "bad".into(),
        };
        assert_eq!(CliError::from(other).exit_code(), 6);
        assert_eq!(CliError::Config("x".into()).exit_code(), 7);
        assert_eq!(
            CliError::from(std::io::Error::other("disk")).exit_code(),
            5
        );
    }

    #[test]
    fn test_migration_failure_exit_code_and_message() {
        let source = LibError::Validation {
            field: "statement".into(),
            message: "bad".into(),
        };
        let err = CliError::from(migration_failure(source));
        assert_eq!(err.exit_code(), 1);
        let message = err.to_string();
        assert!(message.contains("migration 003 (three)"));
        assert!(message.contains("after 2 migration(s) applied"));
    }

    #[test]
    fn test_busy_migration_maps_to_timeout_code() {
        let busy = LibError::Database(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            None,
        ));
        assert_eq!(CliError::from(migration_failure(busy)).exit_code(), 2);
    }
}
