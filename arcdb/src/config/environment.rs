//! `ARC_DB_*` environment variable overrides.

use std::env;

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::export::parse_table_list;

/// Busy timeout in seconds.
pub const BUSY_TIMEOUT_ENV: &str = "ARC_DB_BUSY_TIMEOUT";

/// Comma-separated tables for `info`.
pub const INFO_TABLES_ENV: &str = "ARC_DB_INFO_TABLES";

/// Comma-separated tables for `export`.
pub const EXPORT_TABLES_ENV: &str = "ARC_DB_EXPORT_TABLES";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use arcdb::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Applies every set `ARC_DB_*` variable on top of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `ARC_DB_BUSY_TIMEOUT` is not a
    /// non-negative integer.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(seconds) = env::var(BUSY_TIMEOUT_ENV) {
            config.busy_timeout_seconds =
                Some(seconds.trim().parse().map_err(|_| Error::Validation {
                    field: BUSY_TIMEOUT_ENV.into(),
                    message: format!("Must be a whole number of seconds, got '{seconds}'"),
                })?);
        }

        if let Ok(tables) = env::var(INFO_TABLES_ENV) {
            config.info_tables = Some(parse_table_list(&tables));
        }

        if let Ok(tables) = env::var(EXPORT_TABLES_ENV) {
            config.export_tables = Some(parse_table_list(&tables));
        }

        Ok(())
    }
}
