//! List command - list indexed files, optionally filtered by tag

use crate::db::File;
use crate::output::{self, FileRow, OutputFormat};
use crate::{KfsError, db::Database, workspace::Workspace};

type Result<T> = std::result::Result<T, KfsError>;

/// Execute the list command
///
/// With `tag`, only files carrying exactly that tag are listed; an unknown
/// tag prints an empty listing.
///
/// # Errors
/// Returns an error if the tag is malformed or database operations fail
pub fn execute(
    db: &Database,
    workspace: &Workspace,
    tag: Option<&str>,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let (title, files) = match tag {
        Some(tag) => (format!("Files tagged {tag}"), db.files_with_tag(tag)?),
        None => ("Indexed files".to_string(), db.list_files()?),
    };
    let rows = rows(db, workspace, &files)?;

    match format {
        OutputFormat::Json => println!("{}", output::files_json(&rows)?),
        OutputFormat::Table if quiet => print!("{}", output::files_plain(&rows)),
        OutputFormat::Table => print!("{}", output::files_table(&title, &rows)),
    }
    Ok(())
}

/// Build display rows for `files`, with their tags and on-disk state
///
/// # Errors
/// Returns an error if the tags of a file cannot be read
pub fn rows(db: &Database, workspace: &Workspace, files: &[File]) -> Result<Vec<FileRow>> {
    files
        .iter()
        .map(|file| -> Result<FileRow> {
            let tags = db.tags_for_file(file.id)?.iter().map(ToString::to_string).collect();
            Ok(FileRow {
                id: file.id.to_string(),
                path: file.display_path(),
                tags,
                indexed_at: file.indexed_at,
                exists: workspace.absolute_path(file).is_file(),
            })
        })
        .collect()
}
