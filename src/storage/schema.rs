//! Database schema definitions

/// SQL to create the entries table
pub const CREATE_ENTRIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    text TEXT NOT NULL,
    phoneme TEXT NOT NULL
)
"#;

/// Name of the uniqueness constraint on `entries.text`
pub const UNIQUE_TEXT_INDEX: &str = "idx_entries_text";

/// SQL to create the uniqueness constraint upsert relies on
pub const CREATE_UNIQUE_TEXT_INDEX: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_entries_text ON entries(text)";
