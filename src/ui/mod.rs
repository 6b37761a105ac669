pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{error, header, info, status_line, status_summary, success, warn};
pub use table::{EntryRow, TableBuilder, entries_table};
pub use theme::{theme, Theme};
