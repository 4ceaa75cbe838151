//! Status command - show where the database lives and what it holds

use crate::{db::Database, workspace::Workspace};
use colored::Colorize;

/// Execute the status command
pub fn execute(db: &Database, workspace: &Workspace, quiet: bool) {
    let stats = db.stats();

    if quiet {
        println!("{}\t{}\t{}", stats.files, stats.tags, stats.associations);
        return;
    }

    println!("{} {}", "Base directory:".bold(), workspace.base_dir().display());
    println!("{} {}", "Database:".bold(), workspace.db_path().display());
    println!("  Files:        {}", stats.files);
    println!("  Tags:         {}", stats.tags);
    println!("  Associations: {}", stats.associations);
}
