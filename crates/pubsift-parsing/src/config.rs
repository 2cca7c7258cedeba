use once_cell::sync::Lazy;
use regex::Regex;

/// Link labels that commonly trail an item as parenthetical noise, e.g. `(pdf)`.
pub const DEFAULT_RESOURCE_LABELS: &[&str] = &["pdf", "arxiv", "code", "link", "doi"];

/// Words that make a short sentence look like the start of a title.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "the", "a", "an", "of", "with", "for", "to", "and", "in", "on", "by", "using", "via", "from",
];

/// Controls how a list of values is overridden from its defaults.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }
}

/// A pair of quote characters that can enclose a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// `“…”`
    Curly,
    /// `"…"`
    Straight,
}

impl QuoteStyle {
    /// Regex matching one quoted span; group 1 is the inner text.
    pub(crate) fn pattern(&self) -> &'static Regex {
        static CURLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\u{201c}([^\u{201d}]+)\u{201d}").unwrap());
        static STRAIGHT: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]+)""#).unwrap());
        match self {
            QuoteStyle::Curly => &CURLY,
            QuoteStyle::Straight => &STRAIGHT,
        }
    }
}

/// Configuration for list-item segmentation.
///
/// Use [`ParsingConfigBuilder`] to construct with custom label lists or patterns.
#[derive(Debug, Clone)]
pub struct ParsingConfig {
    // ── title.rs ──
    /// Quote styles scanned for title candidates, in priority order.
    pub(crate) quote_styles: Vec<QuoteStyle>,
    /// Minimum trimmed length (in characters) of a quoted candidate.
    pub(crate) min_title_chars: usize,
    /// Try the author-block sentence split when no quoted title exists.
    pub(crate) sentence_fallback: bool,
    /// Words that mark a sentence as title-like in the sentence split.
    pub(crate) stopwords: ListOverride<String>,

    // ── text_processing.rs ──
    /// Labels whose parenthetical mentions are stripped from verbatim titles.
    pub(crate) resource_labels: ListOverride<String>,
    /// Compiled noise pattern; `None` means the built-in default.
    pub(crate) label_noise_re: Option<Regex>,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            quote_styles: vec![QuoteStyle::Curly, QuoteStyle::Straight],
            min_title_chars: 6,
            sentence_fallback: true,
            stopwords: ListOverride::Default,
            resource_labels: ListOverride::Default,
            label_noise_re: None,
        }
    }
}

impl ParsingConfig {
    pub fn min_title_chars(&self) -> usize {
        self.min_title_chars
    }

    pub fn sentence_fallback(&self) -> bool {
        self.sentence_fallback
    }

    pub fn quote_styles(&self) -> &[QuoteStyle] {
        &self.quote_styles
    }

    /// Same config with the sentence fallback switched on or off.
    pub fn with_sentence_fallback(mut self, enabled: bool) -> Self {
        self.sentence_fallback = enabled;
        self
    }

    /// Resolved stopword list, lower-cased.
    pub(crate) fn stopwords(&self) -> Vec<String> {
        let defaults: Vec<String> = DEFAULT_STOPWORDS.iter().map(|s| s.to_string()).collect();
        self.stopwords
            .resolve(&defaults)
            .into_iter()
            .map(|w| w.to_lowercase())
            .collect()
    }

    /// Resolved resource labels, as configured.
    pub fn resource_labels(&self) -> Vec<String> {
        let defaults: Vec<String> = DEFAULT_RESOURCE_LABELS.iter().map(|s| s.to_string()).collect();
        self.resource_labels.resolve(&defaults)
    }

    /// Regex matching parenthetical resource-label noise.
    pub(crate) fn label_noise_re(&self) -> &Regex {
        static DEFAULT: Lazy<Regex> = Lazy::new(|| {
            let defaults: Vec<String> = DEFAULT_RESOURCE_LABELS.iter().map(|s| s.to_string()).collect();
            noise_regex(&defaults).unwrap()
        });
        self.label_noise_re.as_ref().unwrap_or(&DEFAULT)
    }
}

/// `(pdf)`, `(arXiv: 2101.00001)`, ... for the given labels, case-insensitive.
fn noise_regex(labels: &[String]) -> Result<Regex, regex::Error> {
    let alternatives: Vec<String> = labels.iter().map(|l| regex::escape(l)).collect();
    Regex::new(&format!(r"(?i)\((?:{})[^)]*\)", alternatives.join("|")))
}

/// Builder for [`ParsingConfig`].
///
/// Fails fast with `regex::Error` in [`build()`](Self::build) if a custom
/// pattern is invalid.
#[derive(Debug, Clone, Default)]
pub struct ParsingConfigBuilder {
    quote_styles: Option<Vec<QuoteStyle>>,
    min_title_chars: Option<usize>,
    sentence_fallback: Option<bool>,
    stopwords: ListOverride<String>,
    resource_labels: ListOverride<String>,
    label_noise_re: Option<String>,
}

impl ParsingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Title candidates ──

    pub fn quote_styles(mut self, styles: Vec<QuoteStyle>) -> Self {
        self.quote_styles = Some(styles);
        self
    }

    pub fn min_title_chars(mut self, n: usize) -> Self {
        self.min_title_chars = Some(n);
        self
    }

    pub fn sentence_fallback(mut self, enabled: bool) -> Self {
        self.sentence_fallback = Some(enabled);
        self
    }

    // ── Stopwords ──

    pub fn set_stopwords(mut self, words: Vec<String>) -> Self {
        self.stopwords = ListOverride::Replace(words);
        self
    }

    pub fn add_stopword(mut self, word: String) -> Self {
        match &mut self.stopwords {
            ListOverride::Extend(v) => v.push(word),
            _ => self.stopwords = ListOverride::Extend(vec![word]),
        }
        self
    }

    // ── Resource labels ──

    pub fn set_resource_labels(mut self, labels: Vec<String>) -> Self {
        self.resource_labels = ListOverride::Replace(labels);
        self
    }

    pub fn add_resource_label(mut self, label: String) -> Self {
        match &mut self.resource_labels {
            ListOverride::Extend(v) => v.push(label),
            _ => self.resource_labels = ListOverride::Extend(vec![label]),
        }
        self
    }

    /// Replace the noise pattern outright; takes precedence over label lists.
    pub fn label_noise_regex(mut self, pattern: &str) -> Self {
        self.label_noise_re = Some(pattern.to_string());
        self
    }

    /// Compile patterns and produce a [`ParsingConfig`].
    pub fn build(self) -> Result<ParsingConfig, regex::Error> {
        let label_noise_re = match (self.label_noise_re, &self.resource_labels) {
            (Some(pattern), _) => Some(Regex::new(&pattern)?),
            (None, ListOverride::Default) => None,
            (None, labels) => {
                let defaults: Vec<String> =
                    DEFAULT_RESOURCE_LABELS.iter().map(|s| s.to_string()).collect();
                Some(noise_regex(&labels.resolve(&defaults))?)
            }
        };

        let defaults = ParsingConfig::default();
        Ok(ParsingConfig {
            quote_styles: self.quote_styles.unwrap_or(defaults.quote_styles),
            min_title_chars: self.min_title_chars.unwrap_or(defaults.min_title_chars),
            sentence_fallback: self.sentence_fallback.unwrap_or(defaults.sentence_fallback),
            stopwords: self.stopwords,
            resource_labels: self.resource_labels,
            label_noise_re,
        })
    }
}
