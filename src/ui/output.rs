use crate::access::UpsertStatus;
use crate::ui::{theme, Icons, Theme};
use owo_colors::OwoColorize;

pub fn header(text: &str) {
    println!("{} {}", Icons::ROCKET, text.style(theme().banner.clone()));
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().added.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().failed.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn info(label: &str, value: &str) {
    println!("{} {}: {}", Icons::INFO, label.style(theme().label.clone()), value);
}

/// One-line summary of an upsert, shaped like the web page's status area.
pub fn status_summary(status: &UpsertStatus, theme: &Theme) -> String {
    let (icon, headline, phoneme_label) = match status {
        UpsertStatus::Added { .. } => (Icons::SPARKLE, "Data added!", "phoneme"),
        UpsertStatus::Updated { .. } => (Icons::PENCIL, "Phoneme updated!", "new phoneme"),
        UpsertStatus::Error { .. } => {
            return format!("{} {}", Icons::CROSS, status.to_string().style(theme.failed.clone()));
        }
    };

    format!(
        "{} {}  text: {} {}: {}",
        icon,
        headline.style(theme.for_status(status)),
        status.text(),
        phoneme_label,
        status.phoneme()
    )
}

/// Print an upsert outcome; failures go to stderr.
pub fn status_line(status: &UpsertStatus) {
    let line = status_summary(status, theme());
    if status.is_error() {
        eprintln!("{}", line);
    } else {
        println!("{}", line);
    }
}
