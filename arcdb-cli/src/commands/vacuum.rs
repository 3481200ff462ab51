//! Vacuum command implementation.

use clap::Args;

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Run VACUUM on the database.
#[derive(Args)]
pub struct VacuumCommand {}

impl VacuumCommand {
    /// Execute the vacuum command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        db.vacuum()?;

        println!("VACUUM completed for {}", db.path().display());
        Ok(())
    }
}
