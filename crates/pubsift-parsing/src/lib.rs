pub mod config;
pub mod date;
pub mod extractor;
pub mod fields;
pub mod text_processing;
pub mod title;

pub use config::{ListOverride, ParsingConfig, ParsingConfigBuilder, QuoteStyle};
pub use date::guess_iso_date;
pub use extractor::{ItemExtractor, ItemFields};
pub use text_processing::{flatten_fragments, normalize_opt, normalize_space, title_key};
pub use title::{QuotedTitle, TitleMatch};
// Re-export domain types from core (canonical definitions live there)
pub use pubsift_core::UNKNOWN_DATE;

/// Extract title, authors, venue, year and date from one flattened list item
/// using the default configuration.
///
/// Pipeline:
/// 1. Normalize whitespace
/// 2. Locate the title (quoted span, then sentence split, then verbatim text)
/// 3. Split authors before the title and venue after it
/// 4. Take the last 19xx/20xx token as the year
/// 5. Resolve an ISO date from the year plus any month/day mention
pub fn extract_fields(text: &str) -> ItemFields {
    ItemExtractor::new().extract(text)
}
