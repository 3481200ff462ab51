//! Layering of configuration sources.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use arcdb::config::{Config, ConfigMerger};
///
/// let low = Config { busy_timeout_seconds: Some(5), ..Default::default() };
/// let high = Config { busy_timeout_seconds: Some(30), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.busy_timeout_seconds, Some(30));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merges sources given lowest precedence first.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Overwrites each field of `target` that `source` sets.
    ///
    /// Table lists are replaced whole, not concatenated.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.busy_timeout_seconds.is_some() {
            target.busy_timeout_seconds = source.busy_timeout_seconds;
        }
        if source.info_tables.is_some() {
            target.info_tables.clone_from(&source.info_tables);
        }
        if source.export_tables.is_some() {
            target.export_tables.clone_from(&source.export_tables);
        }
    }
}
