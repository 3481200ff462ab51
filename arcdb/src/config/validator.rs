//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Upper bound for `busy_timeout_seconds` (one hour).
pub const MAX_BUSY_TIMEOUT_SECONDS: u64 = 3600;

/// Checks a merged configuration before it is used.
///
/// # Examples
///
/// ```
/// use arcdb::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { busy_timeout_seconds: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates every configured field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first invalid field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(seconds) = config.busy_timeout_seconds {
            Self::validate_busy_timeout(seconds)?;
        }
        if let Some(ref tables) = config.info_tables {
            Self::validate_table_list("info_tables", tables)?;
        }
        if let Some(ref tables) = config.export_tables {
            Self::validate_table_list("export_tables", tables)?;
        }
        Ok(())
    }

    fn validate_busy_timeout(seconds: u64) -> Result<()> {
        if seconds == 0 || seconds > MAX_BUSY_TIMEOUT_SECONDS {
            return Err(Error::Validation {
                field: "busy_timeout_seconds".into(),
                message: format!("must be between 1 and {MAX_BUSY_TIMEOUT_SECONDS}"),
            });
        }
        Ok(())
    }

    fn validate_table_list(field: &str, tables: &[String]) -> Result<()> {
        if tables.iter().any(|t| t.trim().is_empty()) {
            return Err(Error::Validation {
                field: field.into(),
                message: "table names cannot be empty".into(),
            });
        }
        Ok(())
    }
}
