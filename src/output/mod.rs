//! Output formatting for CLI display
//!
//! File listings are rendered either as a plain-text table (colored when
//! writing to a terminal) or as JSON for scripting.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;

/// How listings are printed
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON array
    Json,
}

/// One line of a file listing
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FileRow {
    pub id: String,
    /// Path relative to the base directory
    pub path: String,
    pub tags: Vec<String>,
    pub indexed_at: DateTime<Utc>,
    /// Whether the file still exists on disk
    pub exists: bool,
}

/// Render a titled table of files
#[must_use]
pub fn files_table(title: &str, rows: &[FileRow]) -> String {
    const PATH_HEADER: &str = "Path";
    const TAGS_HEADER: &str = "Tags";

    let width = rows
        .iter()
        .map(|row| row.path.chars().count())
        .chain(std::iter::once(PATH_HEADER.len()))
        .max()
        .unwrap_or(PATH_HEADER.len());

    let mut out = String::new();
    out.push_str(&title.bold().to_string());
    out.push('\n');
    let header = format!("{PATH_HEADER:<width$}");
    out.push_str(&format!("{}  {}\n", header.bold(), TAGS_HEADER.bold()));
    out.push_str(&format!("{}  {}\n", "─".repeat(width), "─".repeat(TAGS_HEADER.len())));

    for row in rows {
        let padded = format!("{:<width$}", row.path);
        let path = if row.exists { padded.green() } else { padded.red() };
        out.push_str(&format!("{}  {}\n", path, row.tags.join(", ")));
    }

    if rows.is_empty() {
        out.push_str(&"(no files)".dimmed().to_string());
        out.push('\n');
    }
    out
}

/// Render files as a JSON array
///
/// # Errors
///
/// Returns `serde_json::Error` if serialization fails.
pub fn files_json(rows: &[FileRow]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(rows)
}

/// Bare paths, one per line
#[must_use]
pub fn files_plain(rows: &[FileRow]) -> String {
    rows.iter().map(|row| format!("{}\n", row.path)).collect()
}

/// Format a tag with usage count
#[must_use]
pub fn tag_with_count(tag: &str, count: usize, quiet: bool) -> String {
    if quiet {
        tag.to_string()
    } else {
        format!("  {tag} (used by {count} file(s))")
    }
}
