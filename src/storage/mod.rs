//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with one table:
//! - entries(id, text UNIQUE, phoneme)
//!
//! The access layer only sees the `EntryStore` trait.

pub mod schema;
pub mod sqlite;

pub use sqlite::{SqliteStore, StoreStats};

use crate::Result;
use crate::entry::{Entry, EntryTable};

/// Operations the access layer needs from a store of entries.
pub trait EntryStore {
    /// Insert a new entry. A second entry for the same text fails with
    /// `Error::DuplicateKey`.
    fn insert_entry(&self, entry: &Entry) -> Result<()>;

    /// Replace the phoneme of the entry keyed by `text`, returning rows changed.
    fn update_phoneme(&self, text: &str, phoneme: &str) -> Result<usize>;

    /// Every entry, in storage order.
    fn all_entries(&self) -> Result<EntryTable>;

    /// Number of stored entries.
    fn count_entries(&self) -> Result<usize>;
}
