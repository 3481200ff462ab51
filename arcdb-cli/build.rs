//! Build script for arcdb-cli.
//!
//! Generates the `arc-db.1` man page into `OUT_DIR` using clap_mangen.
//!
//! Build scripts cannot depend on the crate being built, so the command
//! structure is declared again here.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep in sync with src/cli.rs.
fn build_cli() -> Command {
    Command::new("arc-db")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Database operations")
        .long_about("Database operations including info, migrations, vacuum, and export.")
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("db")
                .long("db")
                .help("Database file to operate on")
                .value_name("PATH")
                .global(true)
                .env("ARC_DB_PATH"),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("ARC_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true),
        )
        .subcommands(vec![
            Command::new("info")
                .about("Show database info and table counts")
                .long_about("Print the database path, SQLite version and row counts per table"),
            Command::new("migrate")
                .about("Migration commands")
                .subcommands(vec![
                    Command::new("status")
                        .about("Show applied and available migrations")
                        .arg(
                            Arg::new("pretty")
                                .long("pretty")
                                .help("Show migrations in a formatted table")
                                .action(ArgAction::SetTrue),
                        )
                        .arg(
                            Arg::new("json")
                                .long("json")
                                .help("Print status as JSON")
                                .action(ArgAction::SetTrue),
                        ),
                    Command::new("up").about("Apply pending migrations").arg(
                        Arg::new("dry-run")
                            .long("dry-run")
                            .help("Show pending migrations without applying them")
                            .action(ArgAction::SetTrue),
                    ),
                ]),
            Command::new("vacuum")
                .about("Run VACUUM on the database")
                .long_about("Rebuild the database file to reclaim unused space"),
            Command::new("export")
                .about("Export tables to JSONL")
                .long_about("Export database tables to JSONL format (one JSON object per line)."),
            Command::new("path")
                .about("Print database file path")
                .long_about("Print the resolved database path without opening it"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("arc-db.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
