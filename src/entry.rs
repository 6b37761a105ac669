//! Entry types - the (text, phoneme) pairs held by the store
//!
//! `EntryTable` is the only container the access layer hands out.
//! Conversion into widget formats happens in `render` and `ui`.

use serde::{Deserialize, Serialize};

/// A stored (text, phoneme) pair. `text` is the unique key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    pub text: String,
    pub phoneme: String,
}

impl Entry {
    pub fn new(text: impl Into<String>, phoneme: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            phoneme: phoneme.into(),
        }
    }
}

/// Check that both inputs are non-empty once surrounding whitespace is stripped.
///
/// UI hosts gate the insert action on this; the access layer does not.
pub fn check_inputs(text: &str, phoneme: &str) -> bool {
    !text.trim().is_empty() && !phoneme.trim().is_empty()
}

/// Ordered sequence of entries, in storage iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryTable {
    rows: Vec<Entry>,
}

impl EntryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: Entry) {
        self.rows.push(entry);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.rows.iter()
    }

    pub fn as_slice(&self) -> &[Entry] {
        &self.rows
    }

    /// Keep only the entries matching `keep`, preserving order.
    pub fn retain(&mut self, mut keep: impl FnMut(&Entry) -> bool) {
        self.rows.retain(|e| keep(e));
    }

    /// First `limit` rows, for hosts that cap what they display.
    pub fn truncated(&self, limit: usize) -> EntryTable {
        self.rows.iter().take(limit).cloned().collect()
    }
}

impl FromIterator<Entry> for EntryTable {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for EntryTable {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a EntryTable {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_inputs() {
        assert!(check_inputs("hello", "h|e|l|o"));
        assert!(!check_inputs("", "h|e|l|o"));
        assert!(!check_inputs("hello", "   "));
        assert!(!check_inputs(" \t", "\n"));
    }

    #[test]
    fn test_truncated_keeps_order() {
        let table: EntryTable = ["a", "b", "c"]
            .iter()
            .map(|t| Entry::new(*t, "x"))
            .collect();

        let head = table.truncated(2);
        assert_eq!(head.len(), 2);
        assert_eq!(head.as_slice()[0].text, "a");
        assert_eq!(head.as_slice()[1].text, "b");
        assert_eq!(table.truncated(10).len(), 3);
    }

    #[test]
    fn test_table_serializes_as_array() {
        let table: EntryTable = vec![Entry::new("hello", "h|e|l|o")].into_iter().collect();
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json, serde_json::json!([{"text": "hello", "phoneme": "h|e|l|o"}]));
    }
}
