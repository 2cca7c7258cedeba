pub mod aggregate;
pub mod export;

pub use aggregate::{SortOrder, ThemeIndex, dedupe_by_title, sort_records};
pub use export::{ReportError, StagedJson, stage_json, write_json};
