use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;
use crate::text_processing::{strip_resource_noise, word_count};

/// A title found between quote characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedTitle {
    pub title: String,
    /// Byte offset of the opening quote in the item text.
    pub start: usize,
    /// Byte offset just past the closing quote.
    pub end: usize,
}

/// How the title of an item was located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleMatch {
    /// Highest-ranked quoted span.
    Quoted(QuotedTitle),
    /// No quotes; the text was split after what looks like an author block.
    /// `rest` still holds title and venue.
    Sentence { authors: String, rest: String },
    /// Nothing matched; the whole item minus link-label noise.
    Verbatim(String),
}

impl TitleMatch {
    /// Whether the title came from quotes (the only confident outcome).
    pub fn is_quoted(&self) -> bool {
        matches!(self, TitleMatch::Quoted(_))
    }
}

/// Locate the title of one flattened list item.
///
/// Tries, in order:
/// - quoted spans in each configured [`QuoteStyle`](crate::QuoteStyle)
/// - the author-block sentence split (when enabled)
/// - the whole text with `(pdf)`-style noise removed
pub fn extract_title(text: &str, config: &ParsingConfig) -> TitleMatch {
    if let Some(quoted) = find_quoted_title(text, config) {
        return TitleMatch::Quoted(quoted);
    }

    if config.sentence_fallback
        && let Some((authors, rest)) = split_authors_and_rest(text, config)
    {
        return TitleMatch::Sentence { authors, rest };
    }

    TitleMatch::Verbatim(strip_resource_noise(text, config))
}

struct Candidate {
    words: usize,
    chars: usize,
    title: String,
    start: usize,
    end: usize,
}

/// Pick the quoted span with the most words, then the most characters.
///
/// Candidates shorter than `min_title_chars` are ignored so short quoted
/// asides like `"AI"` never win. Equal ranks resolve to the earlier quote
/// style, then to the earlier position in the text.
pub fn find_quoted_title(text: &str, config: &ParsingConfig) -> Option<QuotedTitle> {
    let mut candidates = Vec::new();

    for style in &config.quote_styles {
        for caps in style.pattern().captures_iter(text) {
            let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let inner = inner.as_str().trim();
            let chars = inner.chars().count();
            if chars < config.min_title_chars {
                continue;
            }
            candidates.push(Candidate {
                words: word_count(inner),
                chars,
                title: inner.to_string(),
                start: whole.start(),
                end: whole.end(),
            });
        }
    }

    // sort_by is stable: ties keep scan order
    candidates.sort_by(|a, b| (b.words, b.chars).cmp(&(a.words, a.chars)));

    let best = candidates.into_iter().next()?;
    tracing::trace!(title = %best.title, words = best.words, "quoted title");
    Some(QuotedTitle {
        title: best.title,
        start: best.start,
        end: best.end,
    })
}

/// Find the period that ends the author block of an unquoted item.
///
/// A `". "` qualifies when the text before it contains a comma or `" and "`
/// and the sentence after it has at least three words or a stopword, which
/// skips initials like `J. Smith`. Returns `(authors, rest)`.
pub fn split_authors_and_rest(text: &str, config: &ParsingConfig) -> Option<(String, String)> {
    static PERIOD_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\s").unwrap());
    static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z']+").unwrap());

    let stopwords = config.stopwords();

    for m in PERIOD_SPACE.find_iter(text) {
        let before = &text[..m.start()];
        let after = &text[m.end()..];
        if !(before.contains(',') || before.contains(" and ")) {
            continue;
        }

        let sentence = after.find('.').map_or(after, |i| &after[..i]);
        let lowered = sentence.to_lowercase();
        let words: Vec<&str> = WORD.find_iter(&lowered).map(|w| w.as_str()).collect();

        if words.len() >= 3 || words.iter().any(|w| stopwords.iter().any(|s| s == w)) {
            return Some((before.trim().to_string(), after.trim().to_string()));
        }
    }
    None
}
