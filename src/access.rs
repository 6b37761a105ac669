//! Access Layer - upsert and search over an `EntryStore`
//!
//! Stateless: an `Access` borrows the store for one call and keeps nothing
//! between calls. Every outcome, including failures, comes back as data.

use regex::RegexBuilder;
use serde::Serialize;
use crate::Error;
use crate::entry::{Entry, EntryTable};
use crate::storage::EntryStore;

/// Which write an upsert failure happened on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UpsertStage {
    /// The initial insert
    Insert,
    /// The update issued after the insert hit an existing text
    Update,
}

/// Result of an upsert, carrying the values for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum UpsertStatus {
    Added { text: String, phoneme: String },
    Updated { text: String, phoneme: String },
    Error { text: String, phoneme: String, stage: UpsertStage, message: String },
}

impl UpsertStatus {
    pub fn is_error(&self) -> bool {
        matches!(self, UpsertStatus::Error { .. })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UpsertStatus::Added { .. } => "added",
            UpsertStatus::Updated { .. } => "updated",
            UpsertStatus::Error { .. } => "error",
        }
    }

    pub fn text(&self) -> &str {
        match self {
            UpsertStatus::Added { text, .. }
            | UpsertStatus::Updated { text, .. }
            | UpsertStatus::Error { text, .. } => text,
        }
    }

    pub fn phoneme(&self) -> &str {
        match self {
            UpsertStatus::Added { phoneme, .. }
            | UpsertStatus::Updated { phoneme, .. }
            | UpsertStatus::Error { phoneme, .. } => phoneme,
        }
    }
}

impl std::fmt::Display for UpsertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpsertStatus::Added { text, phoneme } => {
                write!(f, "Data added! text: {} phoneme: {}", text, phoneme)
            }
            UpsertStatus::Updated { text, phoneme } => {
                write!(f, "Phoneme updated! text: {} new phoneme: {}", text, phoneme)
            }
            UpsertStatus::Error { stage: UpsertStage::Insert, message, .. } => {
                write!(f, "Error adding data: {}", message)
            }
            UpsertStatus::Error { stage: UpsertStage::Update, message, .. } => {
                write!(f, "Error updating phoneme: {}", message)
            }
        }
    }
}

/// Result of a search: the matching rows plus an optional error message.
///
/// `error` being set is how "query failed" differs from "nothing matched".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub entries: EntryTable,
    pub error: Option<String>,
}

impl SearchOutcome {
    fn failed(message: String) -> Self {
        Self {
            entries: EntryTable::new(),
            error: Some(message),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Access layer over a borrowed store
pub struct Access<'a> {
    store: &'a dyn EntryStore,
}

impl<'a> Access<'a> {
    pub fn new(store: &'a dyn EntryStore) -> Self {
        Self { store }
    }

    /// Insert `text` with `phoneme`, or overwrite the phoneme if `text` exists.
    pub fn upsert(&self, text: &str, phoneme: &str) -> UpsertStatus {
        let entry = Entry::new(text, phoneme);

        match self.store.insert_entry(&entry) {
            Ok(()) => {
                tracing::debug!("Added entry {:?}", text);
                UpsertStatus::Added { text: entry.text, phoneme: entry.phoneme }
            }
            // Losing an insert race lands here too; the update wins either way.
            Err(Error::DuplicateKey(_)) => match self.store.update_phoneme(text, phoneme) {
                Ok(changed) => {
                    tracing::debug!("Updated entry {:?} ({} row(s))", text, changed);
                    UpsertStatus::Updated { text: entry.text, phoneme: entry.phoneme }
                }
                Err(e) => {
                    tracing::error!("Failed to update phoneme for {:?}: {}", text, e);
                    UpsertStatus::Error {
                        text: entry.text,
                        phoneme: entry.phoneme,
                        stage: UpsertStage::Update,
                        message: e.to_string(),
                    }
                }
            },
            Err(e) => {
                tracing::error!("Failed to add entry {:?}: {}", text, e);
                UpsertStatus::Error {
                    text: entry.text,
                    phoneme: entry.phoneme,
                    stage: UpsertStage::Insert,
                    message: e.to_string(),
                }
            }
        }
    }

    /// List entries whose text contains a case-insensitive match of `query`.
    ///
    /// `None` or an empty query returns everything.
    pub fn search(&self, query: Option<&str>) -> SearchOutcome {
        match self.try_search(query) {
            Ok(entries) => {
                tracing::debug!("Search {:?} matched {} entries", query, entries.len());
                SearchOutcome { entries, error: None }
            }
            Err(e) => {
                tracing::error!("Search {:?} failed: {}", query, e);
                SearchOutcome::failed(format!("Error fetching data: {}", e))
            }
        }
    }

    fn try_search(&self, query: Option<&str>) -> crate::Result<EntryTable> {
        let mut entries = self.store.all_entries()?;

        if let Some(q) = query.filter(|q| !q.is_empty()) {
            let pattern = RegexBuilder::new(q).case_insensitive(true).build()?;
            entries.retain(|e| pattern.is_match(&e.text));
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStore;

    fn texts(outcome: &SearchOutcome) -> Vec<&str> {
        outcome.entries.iter().map(|e| e.text.as_str()).collect()
    }

    /// Store whose writes or reads can be made to fail.
    #[derive(Default)]
    struct FailingStore {
        fail_insert: bool,
        duplicate_insert: bool,
        fail_update: bool,
        fail_list: bool,
    }

    fn storage_failure() -> Error {
        Error::Storage(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_IOERR),
            Some("disk I/O error".to_string()),
        ))
    }

    impl EntryStore for FailingStore {
        fn insert_entry(&self, entry: &Entry) -> crate::Result<()> {
            if self.duplicate_insert {
                return Err(Error::DuplicateKey(entry.text.clone()));
            }
            if self.fail_insert {
                return Err(storage_failure());
            }
            Ok(())
        }

        fn update_phoneme(&self, _text: &str, _phoneme: &str) -> crate::Result<usize> {
            if self.fail_update {
                return Err(storage_failure());
            }
            Ok(1)
        }

        fn all_entries(&self) -> crate::Result<EntryTable> {
            if self.fail_list {
                return Err(storage_failure());
            }
            Ok(EntryTable::new())
        }

        fn count_entries(&self) -> crate::Result<usize> {
            Ok(0)
        }
    }

    #[test]
    fn test_upsert_new_text_is_added() {
        let store = SqliteStore::open_in_memory().unwrap();
        let access = Access::new(&store);

        let status = access.upsert("hello", "h|e|l|o");
        assert_eq!(
            status,
            UpsertStatus::Added { text: "hello".into(), phoneme: "h|e|l|o".into() }
        );

        let found = access.search(Some("hello"));
        assert_eq!(found.entries.as_slice(), &[Entry::new("hello", "h|e|l|o")]);
        assert!(found.error.is_none());
    }

    #[test]
    fn test_upsert_existing_text_is_updated() {
        let store = SqliteStore::open_in_memory().unwrap();
        let access = Access::new(&store);

        access.upsert("hello", "h|e|l|o");
        let status = access.upsert("hello", "h|a|l|o");
        assert_eq!(status.as_str(), "updated");
        assert_eq!(status.phoneme(), "h|a|l|o");

        let all = access.search(None);
        assert_eq!(all.entries.as_slice(), &[Entry::new("hello", "h|a|l|o")]);
    }

    #[test]
    fn test_upsert_last_write_wins() {
        let store = SqliteStore::open_in_memory().unwrap();
        let access = Access::new(&store);

        for phoneme in ["a", "b", "c"] {
            access.upsert("x", phoneme);
        }
        let all = access.search(None);
        assert_eq!(all.entries.len(), 1);
        assert_eq!(all.entries.as_slice()[0].phoneme, "c");
    }

    #[test]
    fn test_search_none_returns_all_in_order() {
        let store = SqliteStore::open_in_memory().unwrap();
        let access = Access::new(&store);
        access.upsert("b", "1");
        access.upsert("a", "2");

        let all = access.search(None);
        assert_eq!(texts(&all), vec!["b", "a"]);
        assert_eq!(texts(&access.search(Some(""))), vec!["b", "a"]);
    }

    #[test]
    fn test_search_substring_ignores_case() {
        let store = SqliteStore::open_in_memory().unwrap();
        let access = Access::new(&store);
        for text in ["ABCdef", "xabcx", "abx", "zzz"] {
            access.upsert(text, "p");
        }

        let found = access.search(Some("abc"));
        assert_eq!(texts(&found), vec!["ABCdef", "xabcx"]);
        assert!(!found.is_error());
    }

    #[test]
    fn test_search_regex_is_unanchored() {
        let store = SqliteStore::open_in_memory().unwrap();
        let access = Access::new(&store);
        for text in ["cat", "concat", "dog"] {
            access.upsert(text, "p");
        }

        assert_eq!(texts(&access.search(Some("c.t"))), vec!["cat", "concat"]);
        assert_eq!(texts(&access.search(Some("^cat$"))), vec!["cat"]);
    }

    #[test]
    fn test_search_thai_text() {
        let store = SqliteStore::open_in_memory().unwrap();
        let access = Access::new(&store);
        access.upsert("อินพุต", "อิน|พุด");

        let found = access.search(Some("พุต"));
        assert_eq!(found.entries.len(), 1);
        assert_eq!(found.entries.as_slice()[0].phoneme, "อิน|พุด");
    }

    #[test]
    fn test_search_no_match_is_not_error() {
        let store = SqliteStore::open_in_memory().unwrap();
        let access = Access::new(&store);
        access.upsert("hello", "h|e|l|o");

        let found = access.search(Some("nothing"));
        assert!(found.entries.is_empty());
        assert!(found.error.is_none());
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let store = SqliteStore::open_in_memory().unwrap();
        let access = Access::new(&store);
        access.upsert("abc", "p");

        let found = access.search(Some("[abc"));
        assert!(found.entries.is_empty());
        let message = found.error.unwrap();
        assert!(message.starts_with("Error fetching data:"));
    }

    #[test]
    fn test_insert_failure_is_error_status() {
        let store = FailingStore { fail_insert: true, ..Default::default() };
        let status = Access::new(&store).upsert("hello", "p");

        assert!(status.is_error());
        assert!(matches!(status, UpsertStatus::Error { stage: UpsertStage::Insert, .. }));
        assert!(status.to_string().starts_with("Error adding data:"));
    }

    #[test]
    fn test_update_failure_is_error_status() {
        let store = FailingStore { duplicate_insert: true, fail_update: true, ..Default::default() };
        let status = Access::new(&store).upsert("hello", "p");

        assert!(matches!(status, UpsertStatus::Error { stage: UpsertStage::Update, .. }));
        assert!(status.to_string().starts_with("Error updating phoneme:"));
    }

    #[test]
    fn test_duplicate_then_update_succeeds() {
        let store = FailingStore { duplicate_insert: true, ..Default::default() };
        let status = Access::new(&store).upsert("hello", "p");
        assert_eq!(status.as_str(), "updated");
    }

    #[test]
    fn test_list_failure_is_error_outcome() {
        let store = FailingStore { fail_list: true, ..Default::default() };
        let found = Access::new(&store).search(None);

        assert!(found.entries.is_empty());
        assert!(found.error.unwrap().starts_with("Error fetching data:"));
    }

    #[test]
    fn test_read_failure_surfaces_as_search_error() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute(
            "CREATE VIEW entries AS SELECT 1 AS id, 'abc' AS text, 'p' AS phoneme \
             UNION ALL SELECT 2, 'abd', abs(-9223372036854775807 - 1)",
            [],
        )
        .unwrap();
        let store = SqliteStore::from_connection(conn);

        let found = Access::new(&store).search(None);
        assert!(found.entries.is_empty());
        assert!(found.error.unwrap().contains("integer overflow"));

        let found = Access::new(&store).search(Some("ab"));
        assert!(found.is_error());
    }

    #[test]
    fn test_status_display() {
        let added = UpsertStatus::Added { text: "a".into(), phoneme: "b".into() };
        assert_eq!(added.to_string(), "Data added! text: a phoneme: b");
        let updated = UpsertStatus::Updated { text: "a".into(), phoneme: "c".into() };
        assert_eq!(updated.to_string(), "Phoneme updated! text: a new phoneme: c");
    }

    #[test]
    fn test_status_serializes_tagged() {
        let added = UpsertStatus::Added { text: "a".into(), phoneme: "b".into() };
        let json = serde_json::to_value(&added).unwrap();
        assert_eq!(json, serde_json::json!({"status": "added", "text": "a", "phoneme": "b"}));
    }
}
