//! Library exports for arcdb-cli.
//!
//! Exposes the CLI structure so it can be inspected from tests and tooling.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
