use once_cell::sync::Lazy;
use regex::Regex;

use pubsift_core::{HeadingRule, PubKind, Section};

/// Headings of the themed project page that are collected by default.
pub const DEFAULT_THEMES: &[&str] = &[
    "Sustainability of AI",
    "AI for Sciences",
    "Bio-Medical Image Analysis",
];

/// How headings map to sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionScheme {
    /// First rule whose `heading` occurs in the heading text wins.
    Typed(Vec<HeadingRule>),
    /// Heading text must equal one of the labels exactly.
    Themed(Vec<String>),
}

impl SectionScheme {
    /// Publication-type headings of a typical publications page.
    pub fn typed_default() -> Self {
        SectionScheme::Typed(vec![
            HeadingRule::new("Refereed Conference", PubKind::Conference),
            HeadingRule::new("Journal", PubKind::Journal),
            HeadingRule::new("Preprint", PubKind::Preprint),
            HeadingRule::new("Monograph", PubKind::Monograph),
        ])
    }

    pub fn themed_default() -> Self {
        SectionScheme::Themed(DEFAULT_THEMES.iter().map(|s| s.to_string()).collect())
    }

    /// Classify normalized heading text; `None` means the section is skipped.
    pub fn classify(&self, heading: &str) -> Option<Section> {
        if heading.is_empty() {
            return None;
        }
        match self {
            SectionScheme::Typed(rules) => rules
                .iter()
                .find(|rule| heading.contains(rule.heading.as_str()))
                .map(|rule| Section::Kind(rule.kind)),
            SectionScheme::Themed(labels) => labels
                .iter()
                .find(|label| label.as_str() == heading)
                .map(|label| Section::Theme {
                    key: theme_key(label),
                    label: label.clone(),
                }),
        }
    }
}

/// Slug used as a theme identifier: `"AI for Sciences"` → `"ai-for-sciences"`.
pub fn theme_key(label: &str) -> String {
    static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());
    NON_ALNUM
        .replace_all(&label.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}
