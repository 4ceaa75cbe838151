//! kfs CLI application entry point
//!
//! # Usage
//!
//! ```bash
//! # Create a database in the current directory
//! kfs init
//!
//! # Record every file below the base directory
//! kfs index
//!
//! # Tag files
//! kfs tag --add bank:chase --add year:2024 statements/jan.pdf statements/feb.pdf
//!
//! # List files, all or by tag
//! kfs list
//! kfs list --tag bank:chase
//!
//! # Drop entries for files removed from disk
//! kfs cleanup --yes
//! ```
//!
//! # Configuration
//!
//! An optional config file is read from the user's config directory
//! (`~/.config/kfs/config.toml` on Linux); `KFS_*` environment variables
//! override it. Log output is controlled with `-v`/`-vv` or `KFS_LOG`.

use colored::Colorize;
use kfs::{
    KfsError,
    cli::{Cli, Commands},
    commands,
    config::KfsConfig,
    workspace::Workspace,
};
use log::LevelFilter;
use std::env;

type Result<T> = std::result::Result<T, KfsError>;

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Info,
        (false, _) => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_env("KFS_LOG")
        .format_timestamp(None)
        .init();
}

fn load_config(cli: &Cli) -> Result<KfsConfig> {
    let config = match &cli.config {
        Some(path) => KfsConfig::load_from(path, true)?,
        None => KfsConfig::load()?,
    };
    Ok(config)
}

/// Dispatch the parsed command line
///
/// `version` runs before the configuration is read, so it works even with a
/// broken config file.
///
/// # Errors
///
/// Returns `KfsError` if configuration loading fails, no database can be
/// found for commands that need one, or the command handler fails.
fn run(cli: &Cli) -> Result<()> {
    if cli.command == Commands::Version {
        println!("{}", commands::version_line());
        return Ok(());
    }

    let config = load_config(cli)?;
    let quiet = cli.quiet || config.quiet;
    init_logging(cli.verbose, quiet);
    log::debug!("Effective configuration: {config:?}");

    match &cli.command {
        Commands::Init { path } => {
            let target = match path {
                Some(path) => path.clone(),
                None => env::current_dir()?,
            };
            commands::init(&target, &config.database_name, quiet)?;
            return Ok(());
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
            return Ok(());
        }
        _ => {}
    }

    let workspace = Workspace::from_current_dir(&config.database_name)?;
    log::info!("Using database {}", workspace.db_path().display());
    let db = workspace.open(true)?;

    match &cli.command {
        Commands::Index => {
            commands::index(&db, &workspace, &config, quiet)?;
        }
        Commands::Tag { add, remove, paths } => {
            commands::tag(&db, &workspace, add, remove, paths, quiet)?;
        }
        Commands::List { tag } => {
            commands::list(&db, &workspace, tag.as_deref(), cli.format, quiet)?;
        }
        Commands::Tags => commands::tags(&db, quiet)?,
        Commands::Cleanup { yes } => {
            commands::cleanup(&db, &workspace, *yes, quiet)?;
        }
        Commands::Status => commands::status(&db, &workspace, quiet),
        Commands::Version | Commands::Init { .. } | Commands::Config => {}
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse_args();

    if let Err(e) = run(&cli) {
        eprintln!("{} {e}", "Error:".red().bold());
        if let Some(hint) = e.hint() {
            eprintln!("{hint}");
        }
        std::process::exit(1);
    }
}
