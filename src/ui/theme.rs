//! Terminal styles, keyed by what PhonoFix prints: upsert outcomes and
//! the few diagnostic lines around them.

use crate::access::UpsertStatus;
use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Accent the web page uses for successful upserts (#51D1E1)
const ACCENT: (u8, u8, u8) = (0x51, 0xD1, 0xE1);

#[derive(Debug, Clone)]
pub struct Theme {
    pub banner: Style,
    pub added: Style,
    pub updated: Style,
    pub failed: Style,
    pub warn: Style,
    pub label: Style,
}

impl Theme {
    /// Colours when the terminal allows them; `NO_COLOR` and pipes get plain text.
    pub fn detect() -> Self {
        if console::colors_enabled() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    pub fn colored() -> Self {
        let (r, g, b) = ACCENT;
        Self {
            banner: Style::new().truecolor(r, g, b).bold(),
            added: Style::new().truecolor(r, g, b).bold(),
            updated: Style::new().truecolor(r, g, b).bold().italic(),
            failed: Style::new().red().bold(),
            warn: Style::new().yellow().bold(),
            label: Style::new().dimmed(),
        }
    }

    pub fn plain() -> Self {
        Self {
            banner: Style::new(),
            added: Style::new(),
            updated: Style::new(),
            failed: Style::new(),
            warn: Style::new(),
            label: Style::new(),
        }
    }

    /// Style for the headline of an upsert outcome
    pub fn for_status(&self, status: &UpsertStatus) -> Style {
        match status {
            UpsertStatus::Added { .. } => self.added.clone(),
            UpsertStatus::Updated { .. } => self.updated.clone(),
            UpsertStatus::Error { .. } => self.failed.clone(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
