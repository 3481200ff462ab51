//! Rendering of migration status for the terminal.
//!
//! All formats are derived from a [`StatusSnapshot`]; none of them read the
//! database themselves.

use std::fmt::Write as _;

use chrono::DateTime;

use crate::error::Result;
use crate::migrations::{StatusEntry, StatusSnapshot};

/// Output format for `migrate status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFormat {
    /// `Applied:` history followed by `Available:` catalog list.
    #[default]
    List,
    /// Aligned `VERSION NAME APPLIED` table.
    Table,
    /// JSON document with `entries` and `history`.
    Json,
}

impl StatusFormat {
    /// Renders the snapshot in this format.
    ///
    /// # Errors
    ///
    /// Returns an error only if JSON serialization fails.
    pub fn render(self, snapshot: &StatusSnapshot) -> Result<String> {
        match self {
            Self::List => Ok(render_list(snapshot)),
            Self::Table => Ok(render_table(&snapshot.entries)),
            Self::Json => render_json(snapshot),
        }
    }
}

/// Formats epoch seconds as `YYYY-MM-DD HH:MM:SS` (UTC).
///
/// ```
/// use arcdb::output::format_timestamp;
///
/// assert_eq!(format_timestamp(1_705_314_645), "2024-01-15 10:30:45");
/// ```
#[must_use]
pub fn format_timestamp(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0).map_or_else(
        || secs.to_string(),
        |dt| dt.format("%Y-%m-%d %H:%M:%S").to_string(),
    )
}

/// Renders the simple list view.
///
/// ```text
/// Applied:
///   001 create_sessions (2024-01-15 10:30:45)
///
/// Available:
///   001 create_sessions (applied)
///   002 create_external_repos
/// ```
#[must_use]
pub fn render_list(snapshot: &StatusSnapshot) -> String {
    let mut out = String::from("Applied:\n");
    if snapshot.history.is_empty() {
        out.push_str("  (none)\n");
    }
    for record in &snapshot.history {
        let _ = writeln!(
            out,
            "  {:03} {} ({})",
            record.version,
            record.name,
            format_timestamp(record.applied_at)
        );
    }

    out.push_str("\nAvailable:\n");
    for entry in &snapshot.entries {
        let mark = if entry.applied { " (applied)" } else { "" };
        let _ = writeln!(out, "  {:03} {}{mark}", entry.version, entry.name);
    }
    out
}

/// Renders the aligned table view.
///
/// Columns are padded to the widest cell plus two spaces.
#[must_use]
pub fn render_table(entries: &[StatusEntry]) -> String {
    let rows: Vec<[String; 3]> = entries
        .iter()
        .map(|e| {
            [
                format!("{:03}", e.version),
                e.name.clone(),
                if e.applied { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();

    let header = ["VERSION", "NAME", "APPLIED"];
    // `{:<w$}` pads by char count, so widths are measured the same way.
    let width = |column: usize| {
        rows.iter()
            .map(|r| r[column].chars().count())
            .chain([header[column].chars().count()])
            .max()
            .unwrap_or(0)
    };
    let version_width = width(0);
    let name_width = width(1);

    let mut out = String::new();
    let mut push_row = |cells: [&str; 3]| {
        let _ = writeln!(
            out,
            "{:<vw$}  {:<nw$}  {}",
            cells[0],
            cells[1],
            cells[2],
            vw = version_width,
            nw = name_width
        );
    };
    push_row(header);
    for row in &rows {
        push_row([row[0].as_str(), row[1].as_str(), row[2].as_str()]);
    }
    out
}

/// Renders the snapshot as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(snapshot: &StatusSnapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}
