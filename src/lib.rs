//! # PhonoFix - text-to-phoneme lookup table
//!
//! Maintains a table of (text, phoneme) pairs behind a small web UI.
//!
//! PhonoFix provides:
//! - An explicit `Entry` / `EntryTable` data model
//! - SQLite-backed storage keyed uniquely by `text`
//! - An access layer with insert-or-update and regex search
//! - HTML and terminal renderers for the UI boundary
//! - An axum server hosting the two-tab web page

pub mod entry;
pub mod storage;
pub mod access;
pub mod render;
pub mod server;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use entry::{Entry, EntryTable, check_inputs};
pub use storage::{EntryStore, SqliteStore};
pub use access::{Access, SearchOutcome, UpsertStatus};

/// Result type alias for PhonoFix operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for PhonoFix operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An entry with this text already exists; recovered inside upsert.
    #[error("Duplicate key: an entry for {0:?} already exists")]
    DuplicateKey(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),
}
