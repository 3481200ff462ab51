//! CLI command implementations.
//!
//! - `info`: Show database path, SQLite version and table counts
//! - `migrate status` / `migrate up`: Inspect and apply schema migrations
//! - `vacuum`: Compact the database file
//! - `export`: Dump tables as line-delimited JSON
//! - `path`: Print the resolved database path
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod export;
pub mod info;
pub mod migrate;
pub mod path;
pub mod vacuum;

pub use completions::CompletionsCommand;
pub use export::ExportCommand;
pub use info::InfoCommand;
pub use migrate::MigrateCommand;
pub use path::PathCommand;
pub use vacuum::VacuumCommand;
