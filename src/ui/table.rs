use tabled::{settings::Style, Table, Tabled};
use crate::entry::{Entry, EntryTable};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Tabled)]
pub struct EntryRow {
    pub text: String,
    pub phoneme: String,
}

impl From<&Entry> for EntryRow {
    fn from(entry: &Entry) -> Self {
        Self {
            text: entry.text.clone(),
            phoneme: entry.phoneme.clone(),
        }
    }
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Render entries as a rounded two-column table; empty input renders nothing.
pub fn entries_table(entries: &EntryTable) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let rows: Vec<EntryRow> = entries.iter().map(EntryRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}
