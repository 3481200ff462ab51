//! Export command implementation.
//!
//! Writes one JSON object per row to stdout or to `--out`.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use arcdb::export::{export_tables, parse_table_list};
use clap::Args;

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};

/// Export tables to JSONL.
#[derive(Args)]
pub struct ExportCommand {
    /// Comma-separated table list
    #[arg(long, value_name = "TABLES")]
    pub tables: Option<String>,

    /// Output file path (default: stdout)
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

impl ExportCommand {
    /// Execute the export command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let mut tables = self
            .tables
            .as_deref()
            .map(parse_table_list)
            .unwrap_or_default();
        if tables.is_empty() {
            tables = config.export_tables();
        }

        let summary = match self.out {
            Some(ref path) => {
                let file = File::create(path)?;
                export_tables(&db, &tables, BufWriter::new(file))?
            }
            None => export_tables(&db, &tables, io::stdout().lock())?,
        };

        if !global.quiet {
            for table in &summary.skipped {
                eprintln!("Skipped missing table {table}");
            }
        }

        if let Some(ref path) = self.out {
            println!(
                "Exported {} tables to {}",
                summary.exported.len(),
                path.display()
            );
        }

        Ok(())
    }
}
