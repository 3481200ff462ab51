//! Main entry point for the arc-db CLI.
//!
//! Maintenance commands for the arc database:
//! - `info`: Show table counts
//! - `migrate status` / `migrate up`: Schema migrations
//! - `vacuum`: Compact the database
//! - `export`: Dump tables as JSONL
//! - `path`: Print the database path

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _level = arcdb::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        db: cli.db,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
    };

    let result = match cli.command {
        cli::Command::Info(cmd) => cmd.execute(&global),
        cli::Command::Migrate(cmd) => cmd.execute(&global),
        cli::Command::Vacuum(cmd) => cmd.execute(&global),
        cli::Command::Export(cmd) => cmd.execute(&global),
        cli::Command::Path(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
