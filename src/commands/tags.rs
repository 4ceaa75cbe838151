//! Tags command - list every tag with its usage count

use crate::{KfsError, db::Database, output};

type Result<T> = std::result::Result<T, KfsError>;

/// Execute the tags command
///
/// # Errors
/// Returns an error if database operations fail
pub fn execute(db: &Database, quiet: bool) -> Result<()> {
    let usages = db.list_tags()?;

    if usages.is_empty() {
        if !quiet {
            println!("No tags found in database.");
        }
        return Ok(());
    }

    if !quiet {
        println!("Tags in database:");
    }
    for usage in usages {
        println!("{}", output::tag_with_count(&usage.tag.to_string(), usage.files, quiet));
    }
    Ok(())
}
