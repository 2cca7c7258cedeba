use crate::config::ParsingConfig;
use crate::date::guess_iso_date;
use crate::fields::{find_year, segment_quoted, segment_rest, split_authors};
use crate::text_processing::normalize_space;
use crate::title::{TitleMatch, extract_title};

/// Fields recovered from one list item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFields {
    pub title: String,
    pub authors: Vec<String>,
    pub venue: String,
    /// Four digits, or empty when none was found.
    pub year: String,
    /// `YYYY-MM-DD`, or the unknown-date sentinel.
    pub date: String,
}

/// Segments flattened list-item text into [`ItemFields`].
pub struct ItemExtractor {
    config: ParsingConfig,
}

impl ItemExtractor {
    pub fn new() -> Self {
        Self {
            config: ParsingConfig::default(),
        }
    }

    pub fn with_config(config: ParsingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    pub fn extract(&self, text: &str) -> ItemFields {
        let text = normalize_space(text);
        let year = find_year(&text);
        let date = guess_iso_date(&text, &year);

        let (title, authors, venue) = match extract_title(&text, &self.config) {
            TitleMatch::Quoted(quoted) => {
                let (authors, venue, _) = segment_quoted(&text, &quoted);
                (quoted.title, authors, venue)
            }
            TitleMatch::Sentence { authors, rest } => {
                let (title, venue) = segment_rest(&rest, &year, &self.config);
                (title, split_authors(&authors), venue)
            }
            TitleMatch::Verbatim(title) => (title, Vec::new(), String::new()),
        };

        tracing::trace!(title = %title, year = %year, authors = authors.len(), "item segmented");

        ItemFields {
            title,
            authors,
            venue,
            year,
            date,
        }
    }
}

impl Default for ItemExtractor {
    fn default() -> Self {
        Self::new()
    }
}
