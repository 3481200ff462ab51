//! Migrations compiled into the binary.
//!
//! Append new entries at the end with a higher version. Applied entries must
//! not be edited; databases that already recorded them will not rerun them.
//! Statements run inside the runner's transaction, so `BEGIN`, `COMMIT` and
//! friends are rejected.

use super::catalog::Migration;

struct Definition {
    version: i64,
    name: &'static str,
    statements: &'static [&'static str],
}

const DEFINITIONS: &[Definition] = &[
    Definition {
        version: 1,
        name: "create_sessions",
        statements: &[
            r"CREATE TABLE sessions (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                project_path TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'active',
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            "CREATE INDEX idx_sessions_project ON sessions(project_path)",
        ],
    },
    Definition {
        version: 2,
        name: "create_external_repos",
        statements: &[
            r"CREATE TABLE external_repos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                session_id TEXT REFERENCES sessions(id) ON DELETE CASCADE,
                url TEXT NOT NULL,
                local_path TEXT NOT NULL,
                git_ref TEXT,
                added_at INTEGER NOT NULL,
                UNIQUE (session_id, url)
            )",
        ],
    },
    Definition {
        version: 3,
        name: "create_env_backups",
        statements: &[
            r"CREATE TABLE env_backups (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                session_id TEXT REFERENCES sessions(id) ON DELETE CASCADE,
                file_path TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )",
            "CREATE INDEX idx_env_backups_session ON env_backups(session_id)",
        ],
    },
    Definition {
        version: 4,
        name: "create_repo_dependencies",
        statements: &[r"CREATE TABLE repo_dependencies (
                repo_id INTEGER NOT NULL REFERENCES external_repos(id) ON DELETE CASCADE,
                depends_on INTEGER NOT NULL REFERENCES external_repos(id) ON DELETE CASCADE,
                created_at INTEGER NOT NULL,
                PRIMARY KEY (repo_id, depends_on)
            )"],
    },
    Definition {
        version: 5,
        name: "add_sessions_last_active",
        statements: &[
            "ALTER TABLE sessions ADD COLUMN last_active_at INTEGER",
            "UPDATE sessions SET last_active_at = updated_at",
            "CREATE INDEX idx_sessions_last_active ON sessions(last_active_at)",
        ],
    },
];

/// Builds owned definitions from the static table.
pub(super) fn migrations() -> Vec<Migration> {
    DEFINITIONS
        .iter()
        .map(|d| Migration::new(d.version, d.name, d.statements.iter().copied()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_definitions_are_ascending() {
        assert!(DEFINITIONS
            .windows(2)
            .all(|pair| pair[0].version < pair[1].version));
    }

    #[test]
    fn test_every_statement_executes_on_fresh_database() {
        let conn = Connection::open_in_memory().unwrap();
        for migration in migrations() {
            for statement in migration.statements() {
                conn.execute_batch(statement).unwrap_or_else(|e| {
                    panic!("migration {} failed: {e}", migration.version())
                });
            }
        }

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
                 AND name IN ('sessions', 'external_repos', 'env_backups', 'repo_dependencies')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 4);
    }
}
