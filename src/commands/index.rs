//! Index command - record every file below the base directory

use crate::index::{IndexOptions, IndexReport, create_index};
use crate::{KfsError, config::KfsConfig, db::Database, workspace::Workspace};
use colored::Colorize;

type Result<T> = std::result::Result<T, KfsError>;

/// Execute the index command
///
/// # Errors
/// Returns an error if an ignore pattern is invalid or a database write fails
pub fn execute(
    db: &Database,
    workspace: &Workspace,
    config: &KfsConfig,
    quiet: bool,
) -> Result<IndexReport> {
    let options = IndexOptions {
        ignore: config.ignore.clone(),
        follow_links: config.follow_links,
    };
    let report = create_index(db, workspace, &options)?;
    db.flush()?;

    if !quiet {
        println!(
            "Indexed {}: {} new, {} already known",
            workspace.base_dir().display(),
            report.new.to_string().green(),
            report.existing
        );
        if report.skipped > 0 {
            println!("{} {} entries could not be read", "Skipped".yellow(), report.skipped);
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestWorkspace;

    #[test]
    fn test_index_command_uses_config_ignore() {
        let ws = TestWorkspace::new();
        ws.write_file("a.txt");
        ws.write_file("a.log");
        let config = KfsConfig {
            ignore: vec!["*.log".to_string()],
            ..KfsConfig::default()
        };

        let report = execute(ws.db(), ws.workspace(), &config, true).unwrap();

        assert_eq!(report.new, 1);
        assert_eq!(ws.db().count(), 1);
    }
}
