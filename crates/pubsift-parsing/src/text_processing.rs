use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;

/// Characters trimmed from both ends of a venue string.
pub(crate) const VENUE_TRIM: &[char] = &[' ', ',', '.', ';', ':'];

/// Collapse every whitespace run (newlines and tabs included) to one space and
/// trim both ends.
///
/// Idempotent: `normalize_space(&normalize_space(s)) == normalize_space(s)`.
pub fn normalize_space(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// [`normalize_space`] for optional text; `None` yields an empty string.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize_space).unwrap_or_default()
}

/// Join the text fragments of an element into one normalized line.
///
/// Each fragment is trimmed and empty fragments are skipped, so adjacent
/// inline elements never glue words together.
pub fn flatten_fragments<'a, I>(fragments: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let parts: Vec<&str> = fragments
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    normalize_space(&parts.join(" "))
}

/// Canonical key used to detect duplicate titles.
///
/// - `"Deep Learning for X"` → `"deeplearningforx"`
/// - `"“deep learning for x!”"` → `"deeplearningforx"`
pub fn title_key(title: &str) -> String {
    static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());
    if title.is_empty() {
        return String::new();
    }
    let lowered = title
        .to_lowercase()
        .replace(['\u{201c}', '\u{201d}', '"'], "");
    NON_ALNUM.replace_all(&lowered, "").into_owned()
}

/// Remove parenthetical link-label noise such as `(pdf)` or `(arXiv: 2101.00001)`.
pub fn strip_resource_noise(text: &str, config: &ParsingConfig) -> String {
    let stripped = config.label_noise_re().replace_all(text, "");
    normalize_space(&stripped)
}

/// Count `\w+` runs, the word measure used to rank title candidates.
pub(crate) fn word_count(text: &str) -> usize {
    static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());
    WORD.find_iter(text).count()
}
