//! Line-delimited JSON export of table rows.
//!
//! Each row becomes one line:
//!
//! ```text
//! {"table":"sessions","row":{"id":"s1","name":"demo"},"ts":1705314645}
//! ```

use std::io::Write;

use chrono::Utc;
use rusqlite::types::ValueRef;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::database::{quote_identifier, Database};
use crate::error::Result;

/// Tables exported when none are requested.
pub const DEFAULT_EXPORT_TABLES: [&str; 4] =
    ["sessions", "external_repos", "env_backups", "repo_dependencies"];

/// Outcome of an export run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Tables that existed and were written, in request order.
    pub exported: Vec<String>,
    /// Requested tables that do not exist.
    pub skipped: Vec<String>,
    /// Total rows written.
    pub rows: usize,
}

#[derive(Serialize)]
struct ExportLine<'a> {
    table: &'a str,
    row: Map<String, Value>,
    ts: i64,
}

/// Splits a comma-separated table list, trimming blanks.
///
/// ```
/// use arcdb::export::parse_table_list;
///
/// assert_eq!(parse_table_list(" sessions, ,env_backups "), vec!["sessions", "env_backups"]);
/// assert!(parse_table_list("  ").is_empty());
/// ```
#[must_use]
pub fn parse_table_list(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Writes every row of `tables` to `out`, one JSON object per line.
///
/// Tables that do not exist are skipped. All lines share one `ts`, taken
/// when the export starts.
///
/// # Errors
///
/// Returns an error if a query fails or `out` cannot be written.
pub fn export_tables<S, W>(db: &Database, tables: &[S], mut out: W) -> Result<ExportSummary>
where
    S: AsRef<str>,
    W: Write,
{
    let ts = Utc::now().timestamp();
    let mut summary = ExportSummary::default();

    for table in tables {
        let table = table.as_ref();
        if !db.table_exists(table)? {
            log::debug!("export: skipping missing table {table}");
            summary.skipped.push(table.to_string());
            continue;
        }
        let rows = export_table(db, table, ts, &mut out)?;
        log::info!("exported {rows} row(s) from {table}");
        summary.rows += rows;
        summary.exported.push(table.to_string());
    }

    out.flush()?;
    Ok(summary)
}

fn export_table<W: Write>(db: &Database, table: &str, ts: i64, out: &mut W) -> Result<usize> {
    let sql = format!("SELECT * FROM {}", quote_identifier(table));
    let mut stmt = db.connection().prepare(&sql)?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(str::to_string).collect();

    let mut rows = stmt.query([])?;
    let mut count = 0;
    while let Some(row) = rows.next()? {
        let mut object = Map::with_capacity(columns.len());
        for (index, column) in columns.iter().enumerate() {
            object.insert(column.clone(), to_json(row.get_ref(index)?));
        }

        let line = ExportLine {
            table,
            row: object,
            ts,
        };
        serde_json::to_writer(&mut *out, &line)?;
        out.write_all(b"\n")?;
        count += 1;
    }
    Ok(count)
}

fn to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        // NaN and infinities have no JSON form
        ValueRef::Real(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Value::String(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::create_test_database;

    fn lines(buf: &[u8]) -> Vec<Value> {
        std::str::from_utf8(buf)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_export_rows_as_jsonl() {
        let db = create_test_database();
        db.connection()
            .execute_batch(
                "CREATE TABLE sessions (id TEXT, size INTEGER, ratio REAL, note TEXT, data BLOB);
                 INSERT INTO sessions VALUES ('s1', 3, 0.5, NULL, X'6869');
                 INSERT INTO sessions VALUES ('s2', -1, 2.0, 'x', NULL);",
            )
            .unwrap();

        let mut buf = Vec::new();
        let summary = export_tables(&db, &["sessions"], &mut buf).unwrap();
        assert_eq!(summary.rows, 2);
        assert_eq!(summary.exported, vec!["sessions"]);

        let out = lines(&buf);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0]["table"], "sessions");
        assert_eq!(out[0]["row"]["id"], "s1");
        assert_eq!(out[0]["row"]["size"], 3);
        assert_eq!(out[0]["row"]["ratio"], 0.5);
        assert_eq!(out[0]["row"]["note"], Value::Null);
        assert_eq!(out[0]["row"]["data"], "hi");
        assert_eq!(out[1]["row"]["size"], -1);
        assert!(out[0]["ts"].is_i64());
        assert_eq!(out[0]["ts"], out[1]["ts"]);
    }

    #[test]
    fn test_export_skips_missing_tables() {
        let db = create_test_database();
        db.connection()
            .execute_batch("CREATE TABLE env_backups (id INTEGER)")
            .unwrap();

        let mut buf = Vec::new();
        let summary = export_tables(&db, &DEFAULT_EXPORT_TABLES, &mut buf).unwrap();
        assert!(buf.is_empty());
        assert_eq!(summary.exported, vec!["env_backups"]);
        assert_eq!(summary.skipped.len(), 3);
        assert_eq!(summary.rows, 0);
    }

    #[test]
    fn test_export_quotes_table_names() {
        let db = create_test_database();
        db.connection()
            .execute_batch("CREATE TABLE \"we\"\"ird\" (v INTEGER); INSERT INTO \"we\"\"ird\" VALUES (1);")
            .unwrap();

        let mut buf = Vec::new();
        let summary = export_tables(&db, &["we\"ird"], &mut buf).unwrap();
        assert_eq!(summary.rows, 1);
        assert_eq!(lines(&buf)[0]["table"], "we\"ird");
    }

    #[test]
    fn test_parse_table_list() {
        assert_eq!(parse_table_list("a,b"), vec!["a", "b"]);
        assert_eq!(parse_table_list(",a,,"), vec!["a"]);
        assert!(parse_table_list("").is_empty());
    }
}
