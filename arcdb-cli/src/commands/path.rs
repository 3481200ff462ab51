//! Command to print the resolved database path.

use clap::Args;

use crate::error::CliError;
use crate::utils::{resolve_database_path, GlobalOptions};

/// Print the database file path without opening it.
#[derive(Args)]
pub struct PathCommand {}

impl PathCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        println!("{}", resolve_database_path(global)?.display());
        Ok(())
    }
}
