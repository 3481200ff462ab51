//! Migrate command implementation.
//!
//! `migrate status` shows applied and available migrations; `migrate up`
//! applies whatever is pending from the catalog compiled into this binary.

use arcdb::migrations::AppliedSet;
use arcdb::{
    Catalog, Error as LibError, MigrationRunner, StatusFormat, StatusReporter, StatusSnapshot,
};
use clap::{Args, Subcommand};

use crate::error::CliError;
use crate::utils::{
    embedded_catalog, load_configuration, open_database, open_database_read_only,
    resolve_database_path, GlobalOptions,
};

/// Migration commands.
#[derive(Subcommand)]
pub enum MigrateCommand {
    /// Show applied and available migrations
    Status(StatusCommand),

    /// Apply pending migrations
    Up(UpCommand),
}

impl MigrateCommand {
    /// Execute the selected migrate subcommand.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        match self {
            MigrateCommand::Status(cmd) => cmd.execute(global),
            MigrateCommand::Up(cmd) => cmd.execute(global),
        }
    }
}

/// Show applied and available migrations.
#[derive(Args)]
pub struct StatusCommand {
    /// Show migrations in a formatted table
    #[arg(long, conflicts_with = "json")]
    pub pretty: bool,

    /// Print status as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatusCommand {
    fn format(&self) -> StatusFormat {
        if self.json {
            StatusFormat::Json
        } else if self.pretty {
            StatusFormat::Table
        } else {
            StatusFormat::List
        }
    }

    /// Execute the status command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        self.run(global, embedded_catalog)
    }

    /// Reads status through a read-only handle. A missing database file
    /// reports every migration as pending and is not created.
    fn run(
        self,
        global: &GlobalOptions,
        load_catalog: impl FnOnce() -> Result<Catalog, CliError>,
    ) -> Result<(), CliError> {
        let catalog = load_catalog()?;
        let config = load_configuration(global)?;
        let db_path = resolve_database_path(global)?;

        let snapshot = match open_database_read_only(global, &config)? {
            Some(db) => StatusReporter::new(db.connection(), &catalog).snapshot()?,
            None => StatusSnapshot::new(&catalog, &AppliedSet::new()),
        };
        let format = self.format();

        if format != StatusFormat::Json && !global.quiet {
            println!("DB path: {}\n", db_path.display());
        }
        print!("{}", format.render(&snapshot)?);
        if format == StatusFormat::Json {
            println!();
        }

        let unknown = snapshot.unknown();
        if !unknown.is_empty() && !global.quiet {
            eprintln!(
                "Warning: {} applied migration(s) are not known to this build",
                unknown.len()
            );
        }

        Ok(())
    }
}

/// Apply pending migrations.
#[derive(Args)]
pub struct UpCommand {
    /// Show pending migrations without applying them
    #[arg(long)]
    pub dry_run: bool,
}

impl UpCommand {
    /// Execute the up command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        self.run(global, embedded_catalog)
    }

    /// The catalog is validated before the database file is touched.
    fn run(
        self,
        global: &GlobalOptions,
        load_catalog: impl FnOnce() -> Result<Catalog, CliError>,
    ) -> Result<(), CliError> {
        let catalog = load_catalog()?;
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let mut runner = MigrationRunner::new(db.connection_mut(), &catalog);

        if self.dry_run {
            let plan = runner.plan()?;
            if !global.quiet {
                for migration in &plan {
                    println!("Would apply {:03} {}", migration.version(), migration.name());
                }
            }
            println!("{} pending migration(s).", plan.len());
            return Ok(());
        }

        match runner.apply_pending() {
            Ok(records) => {
                if !global.quiet {
                    for record in &records {
                        println!("Applied {:03} {}", record.version, record.name);
                    }
                }
                println!("Applied {} migration(s).", records.len());
                Ok(())
            }
            Err(err) => {
                if let LibError::MigrationFailed { ref applied, .. } = err {
                    report_partial(&catalog, applied, global.quiet);
                }
                Err(CliError::from(err))
            }
        }
    }
}

fn report_partial(catalog: &Catalog, applied: &[i64], quiet: bool) {
    if !quiet {
        for version in applied {
            let name = catalog.get(*version).map_or("", |m| m.name());
            println!("Applied {version:03} {name}");
        }
    }
    println!("Applied {} migration(s) before failure.", applied.len());
}
