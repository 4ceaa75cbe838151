//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for kfs using the `clap` crate.
//!
//! # Commands
//!
//! - **version**: Print the version
//! - **init**: Create a database in the current (or given) directory
//! - **index**: Record every file below the base directory
//! - **tag**: Add or remove tags on indexed files
//! - **list**: List indexed files, optionally only those with a given tag
//! - **tags**: List all tags with usage counts
//! - **cleanup**: Remove index entries for files that no longer exist
//! - **status**: Show where the database lives and what it contains
//! - **config**: Print the effective configuration
//!
//! # Examples
//!
//! ```
//! use kfs::cli::{Cli, Commands};
//! use clap::Parser;
//!
//! let cli = Cli::parse_from(["kfs", "tag", "--add", "bank:chase", "statement.pdf"]);
//! assert!(matches!(cli.command, Commands::Tag { .. }));
//! ```

use crate::output::OutputFormat;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kfs")]
#[command(
    version,
    about = "Index a directory tree and tag files with category:value labels",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Suppress informational output (only print results)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format for file listings
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show the kfs version
    Version,

    /// Initialize a new database
    Init {
        /// Base directory to create the database in (defaults to the current
        /// directory); this is a directory, not the database file
        path: Option<PathBuf>,
    },

    /// Index all files below the base directory
    #[command(visible_alias = "i")]
    Index,

    /// Add or remove tags on files
    #[command(visible_alias = "t")]
    Tag {
        /// Tag to add, as category:value (repeatable)
        #[arg(short, long = "add", value_name = "TAG")]
        add: Vec<String>,

        /// Tag to remove, as category:value (repeatable)
        #[arg(short, long = "remove", value_name = "TAG")]
        remove: Vec<String>,

        /// Files to tag
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<PathBuf>,
    },

    /// List indexed files
    #[command(visible_alias = "l")]
    List {
        /// Only list files carrying exactly this tag
        #[arg(short, long, value_name = "TAG")]
        tag: Option<String>,
    },

    /// List all tags with the number of files carrying them
    Tags,

    /// Remove index entries for files that no longer exist
    Cleanup {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Show database location and counts
    Status,

    /// Print the effective configuration
    Config,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
