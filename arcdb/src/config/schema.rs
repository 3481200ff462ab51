//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

use crate::database::DEFAULT_INFO_TABLES;
use crate::export::DEFAULT_EXPORT_TABLES;

/// Busy timeout applied when nothing else is configured.
pub const DEFAULT_BUSY_TIMEOUT_SECONDS: u64 = 5;

/// Configuration read from `config.yaml` and `ARC_DB_*` variables.
///
/// Every field is optional so that sources can be layered; use the accessor
/// methods to read a value with its default applied.
///
/// # Examples
///
/// ```
/// use arcdb::config::Config;
///
/// let config: Config = serde_yaml::from_str("busy_timeout_seconds: 30\n").unwrap();
/// assert_eq!(config.busy_timeout_seconds(), 30);
/// assert_eq!(config.export_tables().len(), 4);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Seconds to wait on a locked database before giving up.
    pub busy_timeout_seconds: Option<u64>,

    /// Tables counted by `info`.
    pub info_tables: Option<Vec<String>>,

    /// Tables written by `export` when none are named.
    pub export_tables: Option<Vec<String>>,
}

impl Config {
    /// Busy timeout in seconds, defaulting to 5.
    #[must_use]
    pub fn busy_timeout_seconds(&self) -> u64 {
        self.busy_timeout_seconds
            .unwrap_or(DEFAULT_BUSY_TIMEOUT_SECONDS)
    }

    /// Tables for `info`, defaulting to the tracking table plus the known
    /// application tables.
    #[must_use]
    pub fn info_tables(&self) -> Vec<String> {
        self.info_tables
            .clone()
            .unwrap_or_else(|| DEFAULT_INFO_TABLES.iter().map(|t| (*t).to_string()).collect())
    }

    /// Tables for `export`, defaulting to the known application tables.
    #[must_use]
    pub fn export_tables(&self) -> Vec<String> {
        self.export_tables.clone().unwrap_or_else(|| {
            DEFAULT_EXPORT_TABLES
                .iter()
                .map(|t| (*t).to_string())
                .collect()
        })
    }
}
