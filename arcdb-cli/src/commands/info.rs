//! Info command implementation.

use clap::Args;

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Show database info and table counts.
#[derive(Args)]
pub struct InfoCommand {}

impl InfoCommand {
    /// Execute the info command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let info = db.info(&config.info_tables())?;

        println!("DB path: {}", info.path.display());
        if let Some(ref version) = info.sqlite_version {
            println!("SQLite version: {version}");
        }
        println!();
        for table in &info.tables {
            println!("{:<20} {}", format!("{}:", table.name), table.rows);
        }

        Ok(())
    }
}
