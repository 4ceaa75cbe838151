//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and runs the operation against the database, printing its results.

pub mod cleanup;
pub mod index;
pub mod init;
pub mod list;
pub mod status;
pub mod tag;
pub mod tags;

// Re-export execute functions for convenience
pub use cleanup::execute as cleanup;
pub use index::execute as index;
pub use init::execute as init;
pub use list::execute as list;
pub use status::execute as status;
pub use tag::execute as tag;
pub use tags::execute as tags;

/// Line printed by `kfs version`
#[must_use]
pub fn version_line() -> String {
    format!("kfs version: {}", crate::VERSION)
}
