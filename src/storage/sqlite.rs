//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, ErrorCode, params};
use serde::Serialize;
use crate::{Result, Error};
use crate::entry::{Entry, EntryTable};
use super::{EntryStore, schema};

/// SQLite-backed storage for the phoneme table
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        tracing::info!("Opened entry store at {}", path.display());
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Wrap an existing connection without touching its schema.
    ///
    /// Used for databases provisioned elsewhere; the unique index may be missing.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute(schema::CREATE_ENTRIES_TABLE, [])?;

        // Existing data with repeated texts blocks the unique index. Keep the
        // store usable, but upsert then degrades to always-insert.
        if let Err(e) = self.conn.execute(schema::CREATE_UNIQUE_TEXT_INDEX, []) {
            if is_constraint_violation(&e) {
                tracing::warn!(
                    "Could not create {}: entries already contain duplicate texts ({})",
                    schema::UNIQUE_TEXT_INDEX,
                    e
                );
            } else {
                return Err(e.into());
            }
        }

        if !self.has_unique_text_index()? {
            tracing::warn!("entries.text has no unique index; upsert will insert duplicates instead of updating");
        }
        Ok(())
    }

    /// Whether a single-column unique index covers `entries.text`
    pub fn has_unique_text_index(&self) -> Result<bool> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM pragma_index_list('entries') WHERE \"unique\" = 1"
        )?;
        let names: Vec<String> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<_>>()?;

        for name in names {
            let mut info = self.conn.prepare("SELECT name FROM pragma_index_info(?1)")?;
            let columns: Vec<Option<String>> = info
                .query_map([&name], |row| row.get(0))?
                .collect::<rusqlite::Result<_>>()?;
            if columns.len() == 1 && columns[0].as_deref() == Some("text") {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Get statistics about the store
    pub fn stats(&self) -> Result<StoreStats> {
        Ok(StoreStats {
            entries: self.count_entries()?,
            unique_text_index: self.has_unique_text_index()?,
        })
    }

    /// Close the underlying connection, reporting any failure to flush.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| Error::Storage(e))?;
        tracing::info!("Closed entry store");
        Ok(())
    }

    /// Helper to convert a row to an Entry
    fn row_to_entry(row: &rusqlite::Row) -> rusqlite::Result<Entry> {
        Ok(Entry {
            text: row.get(0)?,
            phoneme: row.get(1)?,
        })
    }
}

impl EntryStore for SqliteStore {
    fn insert_entry(&self, entry: &Entry) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO entries (text, phoneme) VALUES (?1, ?2)",
                params![entry.text, entry.phoneme],
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    Error::DuplicateKey(entry.text.clone())
                } else {
                    Error::Storage(e)
                }
            })?;
        Ok(())
    }

    fn update_phoneme(&self, text: &str, phoneme: &str) -> Result<usize> {
        let changed = self.conn.execute(
            "UPDATE entries SET phoneme = ?1 WHERE text = ?2",
            params![phoneme, text],
        )?;
        Ok(changed)
    }

    fn all_entries(&self) -> Result<EntryTable> {
        let mut stmt = self.conn.prepare(
            "SELECT text, phoneme FROM entries ORDER BY id"
        )?;

        let mut entries = EntryTable::new();
        for row in stmt.query_map([], Self::row_to_entry)? {
            match row {
                Ok(entry) => entries.push(entry),
                // Rows that do not decode as a (text, phoneme) pair are skipped;
                // anything the database itself reports aborts the read.
                Err(e) if is_decode_failure(&e) => {
                    tracing::debug!("Skipping undecodable entry row: {}", e);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(entries)
    }

    fn count_entries(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn is_constraint_violation(e: &rusqlite::Error) -> bool {
    e.sqlite_error_code() == Some(ErrorCode::ConstraintViolation)
}

fn is_decode_failure(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::FromSqlConversionFailure(..) | rusqlite::Error::InvalidColumnType(..)
    )
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    match e {
        rusqlite::Error::SqliteFailure(err, _) => {
            err.code == ErrorCode::ConstraintViolation
                && err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        }
        _ => false,
    }
}

/// Store statistics
#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    pub entries: usize,
    pub unique_text_index: bool,
}
