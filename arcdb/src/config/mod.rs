//! Configuration for arc-db.
//!
//! Sources are merged with the following precedence (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`), which is
//!    where CLI flags land
//! 2. Environment variables (`ARC_DB_*`)
//! 3. User config (`<data_dir>/config.yaml`)
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```
//! use arcdb::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new().skip_files().skip_env().build().unwrap();
//! assert_eq!(config.busy_timeout_seconds(), 5);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use builder::ConfigBuilder;
pub use environment::{EnvironmentConfig, BUSY_TIMEOUT_ENV, EXPORT_TABLES_ENV, INFO_TABLES_ENV};
pub use loader::{ConfigLoader, ConfigSource, CONFIG_FILE_NAME};
pub use merger::ConfigMerger;
pub use schema::{Config, DEFAULT_BUSY_TIMEOUT_SECONDS};
pub use validator::ConfigValidator;
