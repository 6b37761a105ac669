//! HTML fragments for the web page
//!
//! The web page swaps these fragments in verbatim, so every value coming
//! from the store or the user is escaped here.

use crate::access::{SearchOutcome, UpsertStatus};
use crate::entry::EntryTable;

const ACCENT: &str = "#51D1E1";

/// Escape the characters that are significant in HTML text and attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Red error span used for every failure message.
pub fn error_html(message: &str) -> String {
    format!(r#"<span style="color: red;">{}</span>"#, escape(message))
}

/// Status line shown under the insert button.
pub fn status_html(status: &UpsertStatus) -> String {
    let (headline, detail) = match status {
        UpsertStatus::Added { text, phoneme } => (
            "Data added!",
            format!("text: {} phoneme: {}", escape(text), escape(phoneme)),
        ),
        UpsertStatus::Updated { text, phoneme } => (
            "Phoneme updated!",
            format!("text: {} new phoneme: {}", escape(text), escape(phoneme)),
        ),
        UpsertStatus::Error { .. } => return error_html(&status.to_string()),
    };

    format!(
        r#"<div style="display: flex; flex-direction: row; align-items: center;"><span style="color: {}; font-weight: bold;">{}</span>&nbsp;<span>{}</span></div>"#,
        ACCENT, headline, detail
    )
}

/// Two-column table of entries.
pub fn table_html(entries: &EntryTable) -> String {
    let mut html = String::from(
        r#"<table class="entries"><thead><tr><th>text</th><th>phoneme</th></tr></thead><tbody>"#,
    );
    for entry in entries {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>",
            escape(&entry.text),
            escape(&entry.phoneme)
        ));
    }
    html.push_str("</tbody></table>");
    html
}

/// Listing fragment for a search: the error span, or the first `limit` rows.
pub fn search_html(outcome: &SearchOutcome, limit: usize) -> String {
    if let Some(message) = &outcome.error {
        return error_html(message);
    }

    let total = outcome.entries.len();
    let mut html = table_html(&outcome.entries.truncated(limit));
    if total > limit {
        html.push_str(&format!(
            r#"<p class="truncated">Showing {} of {} entries</p>"#,
            limit, total
        ));
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::UpsertStage;
    use crate::entry::Entry;

    #[test]
    fn test_escape() {
        assert_eq!(escape("<b>&\"'"), "&lt;b&gt;&amp;&quot;&#39;");
        assert_eq!(escape("ใส่|อิน|พุด"), "ใส่|อิน|พุด");
    }

    #[test]
    fn test_status_html_added() {
        let html = status_html(&UpsertStatus::Added { text: "a".into(), phoneme: "b".into() });
        assert!(html.contains("Data added!"));
        assert!(html.contains("#51D1E1"));
        assert!(html.contains("text: a phoneme: b"));
    }

    #[test]
    fn test_status_html_escapes_values() {
        let html = status_html(&UpsertStatus::Updated { text: "<i>".into(), phoneme: "x".into() });
        assert!(html.contains("Phoneme updated!"));
        assert!(html.contains("&lt;i&gt;"));
        assert!(!html.contains("<i>"));
    }

    #[test]
    fn test_status_html_error() {
        let html = status_html(&UpsertStatus::Error {
            text: "a".into(),
            phoneme: "b".into(),
            stage: UpsertStage::Insert,
            message: "disk full".into(),
        });
        assert_eq!(html, r#"<span style="color: red;">Error adding data: disk full</span>"#);
    }

    #[test]
    fn test_search_html_truncates() {
        let entries: EntryTable = (0..5).map(|i| Entry::new(format!("t{i}"), "p")).collect();
        let outcome = SearchOutcome { entries, error: None };

        let html = search_html(&outcome, 2);
        assert_eq!(html.matches("<tr><td>").count(), 2);
        assert!(html.contains("Showing 2 of 5 entries"));
    }

    #[test]
    fn test_search_html_error() {
        let outcome = SearchOutcome { entries: EntryTable::new(), error: Some("Error fetching data: bad".into()) };
        let html = search_html(&outcome, 10);
        assert!(html.starts_with(r#"<span style="color: red;">"#));
        assert!(!html.contains("<table"));
    }
}
