//! Common test utilities for CLI integration tests.
//!
//! Every command runs against a data directory inside a fresh temporary
//! directory, with the `ARC_*` variables of the calling shell removed.

use assert_cmd::Command;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Variables that would otherwise leak the developer's setup into tests.
const ISOLATED_ENV: &[&str] = &[
    "ARC_DB_PATH",
    "ARC_DATA_DIR",
    "ARC_DB_LOG_MODE",
    "ARC_DB_BUSY_TIMEOUT",
    "ARC_DB_INFO_TABLES",
    "ARC_DB_EXPORT_TABLES",
];

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the arc data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; `arc-db` creates it on first open.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("arc-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// The `arc-db` binary with a clean environment and no flags.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("arc-db").expect("Failed to find arc-db binary");
        for var in ISOLATED_ENV {
            cmd.env_remove(var);
        }
        cmd.env("HOME", &self.temp_path);
        cmd
    }

    /// The `arc-db` binary with `--data-dir` pointing at this environment.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Path of the database file inside the data directory.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("arc.db")
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write `config.yaml` into the data directory.
    pub fn write_config(&self, contents: &str) {
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data dir");
        std::fs::write(self.data_dir.join("config.yaml"), contents)
            .expect("Failed to write config");
    }

    /// Run `migrate up` and assert it succeeds.
    pub fn migrate_up(&self) -> String {
        let output = self
            .command()
            .args(["migrate", "up"])
            .output()
            .expect("Failed to run migrate up");
        assert!(
            output.status.success(),
            "migrate up failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }

    /// Open the environment's database directly.
    pub fn connection(&self) -> Connection {
        Connection::open(self.db_path()).expect("Failed to open database")
    }

    /// Versions recorded in `schema_migrations`.
    pub fn applied_versions(&self) -> Vec<i64> {
        let conn = self.connection();
        let mut stmt = conn
            .prepare("SELECT version FROM schema_migrations ORDER BY version")
            .expect("Failed to query schema_migrations");
        stmt.query_map([], |row| row.get(0))
            .expect("Failed to read versions")
            .collect::<Result<Vec<i64>, _>>()
            .expect("Failed to collect versions")
    }
}
