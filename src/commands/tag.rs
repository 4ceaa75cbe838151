//! Tag command - add and remove tags on indexed files

use crate::db::{DbError, Location, TagSpec};
use crate::{KfsError, db::Database, workspace::Workspace};
use std::path::{Path, PathBuf};

type Result<T> = std::result::Result<T, KfsError>;

/// Execute the tag command - apply every `add` tag and drop every `remove`
/// tag on every path
///
/// All tags and paths are validated before anything is written, so a typo
/// in the last argument leaves the database untouched.
///
/// # Errors
/// Returns an error if no tags are given, a tag is malformed, a path is not a
/// regular file inside the base directory, a file has not been indexed, or
/// database operations fail
pub fn execute(
    db: &Database,
    workspace: &Workspace,
    add: &[String],
    remove: &[String],
    paths: &[PathBuf],
    quiet: bool,
) -> Result<()> {
    if add.is_empty() && remove.is_empty() {
        return Err(KfsError::InvalidInput(
            "No tags provided. Use --add or --remove to specify tags".into(),
        ));
    }
    if paths.is_empty() {
        return Err(KfsError::InvalidInput("No file provided".into()));
    }

    let add = parse_tags(add)?;
    let remove = parse_tags(remove)?;
    let locations = paths
        .iter()
        .map(|path| resolve(db, workspace, path))
        .collect::<Result<Vec<_>>>()?;

    for location in &locations {
        let shown = location.display_path();
        for tag in &add {
            let created = db.add_tag_to_file(location, &tag.to_string())?;
            if !quiet {
                if created {
                    println!("Tagged {shown} with {tag}");
                } else {
                    println!("{shown} already tagged with {tag}");
                }
            }
        }
        for tag in &remove {
            let removed = db.remove_tag_from_file(location, &tag.to_string())?;
            if !quiet && removed {
                println!("Removed {tag} from {shown}");
            }
        }
    }

    db.flush()?;
    Ok(())
}

fn parse_tags(tags: &[String]) -> Result<Vec<TagSpec>> {
    Ok(tags.iter().map(|t| t.parse()).collect::<std::result::Result<Vec<TagSpec>, DbError>>()?)
}

fn resolve(db: &Database, workspace: &Workspace, path: &Path) -> Result<Location> {
    let metadata = path.metadata().map_err(|e| {
        KfsError::InvalidInput(format!("Cannot access path '{}': {e}", path.display()))
    })?;
    if !metadata.is_file() {
        return Err(KfsError::InvalidInput(format!(
            "'{}' is not a regular file",
            path.display()
        )));
    }

    let location = workspace.location_of(path)?;
    if db.find_file(&location)?.is_none() {
        return Err(DbError::FileNotIndexed(location.display_path()).into());
    }
    Ok(location)
}
