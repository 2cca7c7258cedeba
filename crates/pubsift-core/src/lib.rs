use std::fmt;

use serde::{Deserialize, Serialize};

pub mod config_file;
pub mod fetch;
pub mod mock;

// Re-export for convenience
pub use fetch::{DEFAULT_FETCH_TIMEOUT, FetchError, FileSource, HttpSource, PageSource};

/// Date emitted when no year could be recovered from an item.
pub const UNKNOWN_DATE: &str = "0000-01-01";

/// A hyperlink found inside a publication list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub label: String,
    pub url: String,
}

impl Resource {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// Coarse publication type, serialized as the record's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PubKind {
    Conference,
    Journal,
    Preprint,
    Monograph,
    /// Items collected from a themed project page.
    FromProjects,
    Unknown,
}

impl PubKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PubKind::Conference => "conference",
            PubKind::Journal => "journal",
            PubKind::Preprint => "preprint",
            PubKind::Monograph => "monograph",
            PubKind::FromProjects => "from-projects",
            PubKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PubKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a heading to a publication type when `heading` occurs in its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingRule {
    pub heading: String,
    pub kind: PubKind,
}

impl HeadingRule {
    pub fn new(heading: impl Into<String>, kind: PubKind) -> Self {
        Self {
            heading: heading.into(),
            kind,
        }
    }
}

/// The page section a list item was found under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    Kind(PubKind),
    Theme { key: String, label: String },
}

impl Section {
    pub fn kind(&self) -> PubKind {
        match self {
            Section::Kind(kind) => *kind,
            Section::Theme { .. } => PubKind::FromProjects,
        }
    }

    pub fn theme(&self) -> Option<(&str, &str)> {
        match self {
            Section::Kind(_) => None,
            Section::Theme { key, label } => Some((key.as_str(), label.as_str())),
        }
    }
}

/// One publication extracted from a list item.
///
/// Field order here is the field order of the emitted JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationRecord {
    pub title: String,
    pub authors: Vec<String>,
    pub venue: String,
    pub year: String,
    pub date: String,
    /// URL of the primary resource; always one of `resources[*].url`.
    pub link: Option<String>,
    pub resources: Vec<Resource>,
    #[serde(rename = "type")]
    pub kind: PubKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_label: Option<String>,
}

impl PublicationRecord {
    /// Attach section tags to the record.
    pub fn tag(mut self, section: &Section) -> Self {
        self.kind = section.kind();
        if let Some((key, label)) = section.theme() {
            self.theme_key = Some(key.to_string());
            self.theme_label = Some(label.to_string());
        }
        self
    }
}

impl Default for PublicationRecord {
    fn default() -> Self {
        Self {
            title: String::new(),
            authors: Vec::new(),
            venue: String::new(),
            year: String::new(),
            date: UNKNOWN_DATE.to_string(),
            link: None,
            resources: Vec::new(),
            kind: PubKind::Unknown,
            theme_key: None,
            theme_label: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&PubKind::FromProjects).unwrap();
        assert_eq!(json, "\"from-projects\"");
        let kind: PubKind = serde_json::from_str("\"journal\"").unwrap();
        assert_eq!(kind, PubKind::Journal);
    }

    #[test]
    fn test_record_field_order_and_type_rename() {
        let record = PublicationRecord {
            title: "A Great Study".into(),
            kind: PubKind::Conference,
            ..Default::default()
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.starts_with("{\"title\":\"A Great Study\",\"authors\":[]"));
        assert!(json.contains("\"type\":\"conference\""));
        assert!(!json.contains("theme_key"));
        assert!(json.find("\"date\"").unwrap() < json.find("\"link\"").unwrap());
    }

    #[test]
    fn test_tag_with_theme() {
        let section = Section::Theme {
            key: "ai-for-sciences".into(),
            label: "AI for Sciences".into(),
        };
        let record = PublicationRecord::default().tag(&section);
        assert_eq!(record.kind, PubKind::FromProjects);
        assert_eq!(record.theme_key.as_deref(), Some("ai-for-sciences"));
        assert_eq!(record.theme_label.as_deref(), Some("AI for Sciences"));

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.ends_with("\"theme_key\":\"ai-for-sciences\",\"theme_label\":\"AI for Sciences\"}"));
    }

    #[test]
    fn test_default_record_has_sentinel_date() {
        let record = PublicationRecord::default();
        assert_eq!(record.date, UNKNOWN_DATE);
        assert!(record.link.is_none());
        assert!(record.authors.is_empty());
        assert!(record.resources.is_empty());
    }
}
