use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;
use crate::text_processing::{VENUE_TRIM, normalize_space, strip_resource_noise};
use crate::title::QuotedTitle;

/// Trailing characters dropped from the text before a quoted title.
const AUTHOR_TRAIL: &[char] = &[' ', '\u{201c}', '\u{201d}', '"', '.', ',', ':', ';'];
/// Leading characters dropped from the text after a quoted title.
const VENUE_LEAD: &[char] = &[' ', '\u{201d}', '"'];

/// Split an author block on commas and the word "and".
///
/// `"Doe J, Smith A, and Lee K"` → `["Doe J", "Smith A", "Lee K"]`
pub fn split_authors(text: &str) -> Vec<String> {
    static SEP: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*(?:and\s+)?|\s+and\s+").unwrap());
    SEP.split(text)
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}

/// The last `19xx`/`20xx` token in the text, or an empty string.
pub fn find_year(text: &str) -> String {
    static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:19|20)[0-9]{2}").unwrap());
    YEAR.find_iter(text)
        .last()
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Text before the last occurrence of `year`, trimmed of separators.
fn venue_before_year(tail: &str, year: &str) -> Option<String> {
    if year.is_empty() {
        return None;
    }
    let idx = tail.rfind(year)?;
    Some(normalize_space(&tail[..idx]).trim_matches(VENUE_TRIM).to_string())
}

/// Split the text around a quoted title into `(authors, venue, year)`.
///
/// Authors come from the text before the opening quote. The venue is the text
/// after the closing quote, cut at the last mention of the year, or at the
/// first period when the year is not repeated there.
pub fn segment_quoted(text: &str, quoted: &QuotedTitle) -> (Vec<String>, String, String) {
    let authors_text = text[..quoted.start].trim_end_matches(AUTHOR_TRAIL);
    let tail = text[quoted.end..].trim_start_matches(VENUE_LEAD).trim();
    let year = find_year(text);

    let venue = match venue_before_year(tail, &year) {
        Some(venue) => venue,
        None => match tail.find('.') {
            Some(stop) => normalize_space(&tail[..stop]),
            None => normalize_space(tail),
        },
    };

    (split_authors(authors_text), venue, year)
}

/// Split the text after an unquoted author block into `(title, venue)`.
///
/// More conservative than [`segment_quoted`]: the title ends at a lone
/// `" . "` or right before `" , 2019"`; otherwise the whole text is the
/// title and the venue stays empty.
pub fn segment_rest(rest: &str, year: &str, config: &ParsingConfig) -> (String, String) {
    static LONE_PERIOD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s\.\s").unwrap());
    static COMMA_YEAR: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\s,\s*(?:19|20)[0-9]{2}").unwrap());

    let (title, tail) = if let Some(m) = LONE_PERIOD.find(rest) {
        (rest[..m.start()].trim(), &rest[m.end()..])
    } else if let Some(m) = COMMA_YEAR.find(rest) {
        (rest[..m.start()].trim().trim_end_matches('.'), &rest[m.start()..])
    } else {
        (rest.trim(), "")
    };

    let venue = if tail.is_empty() {
        String::new()
    } else {
        venue_before_year(tail, year).unwrap_or_default()
    };

    (strip_resource_noise(title, config), venue)
}
