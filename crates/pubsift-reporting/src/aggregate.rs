use std::cmp::Ordering;
use std::collections::HashSet;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use pubsift_core::PublicationRecord;
use pubsift_parsing::title_key;

/// Final ordering of the emitted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Newest first: `(date, title)` descending.
    DateTitleDesc,
    /// Grouped by type, oldest first: `(type, date, title)` ascending.
    #[default]
    KindDateTitleAsc,
}

impl SortOrder {
    fn compare(&self, a: &PublicationRecord, b: &PublicationRecord) -> Ordering {
        match self {
            SortOrder::DateTitleDesc => (&b.date, &b.title).cmp(&(&a.date, &a.title)),
            SortOrder::KindDateTitleAsc => (a.kind.as_str(), &a.date, &a.title).cmp(&(
                b.kind.as_str(),
                &b.date,
                &b.title,
            )),
        }
    }
}

/// Stable sort; records with equal keys keep their page order.
pub fn sort_records(records: &mut [PublicationRecord], order: SortOrder) {
    records.sort_by(|a, b| order.compare(a, b));
}

/// Keep the first record per [`title_key`]; records whose key is empty are dropped.
///
/// Returns the surviving records and how many were removed.
pub fn dedupe_by_title(records: Vec<PublicationRecord>) -> (Vec<PublicationRecord>, usize) {
    let total = records.len();
    let mut seen = HashSet::new();
    let kept: Vec<PublicationRecord> = records
        .into_iter()
        .filter(|r| {
            let key = title_key(&r.title);
            !key.is_empty() && seen.insert(key)
        })
        .collect();
    let dropped = total - kept.len();
    if dropped > 0 {
        tracing::debug!(dropped, "dropped duplicate or untitled records");
    }
    (kept, dropped)
}

/// The theme sections of a themed page, in the order they first appeared.
///
/// Serializes as `{"order": [key, ...], "labels": {key: label, ...}}` with the
/// `labels` map in the same order as `order`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeIndex {
    themes: Vec<(String, String)>,
}

impl ThemeIndex {
    /// Build from `(key, label)` pairs; repeated keys keep their first label.
    pub fn new<I>(themes: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut index = ThemeIndex::default();
        for (key, label) in themes {
            if index.label(&key).is_none() {
                index.themes.push((key, label));
            }
        }
        index
    }

    pub fn order(&self) -> impl Iterator<Item = &str> {
        self.themes.iter().map(|(key, _)| key.as_str())
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.themes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, label)| label.as_str())
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

struct OrderedLabels<'a>(&'a [(String, String)]);

impl Serialize for OrderedLabels<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

impl Serialize for ThemeIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let order: Vec<&str> = self.order().collect();
        let mut state = serializer.serialize_struct("ThemeIndex", 2)?;
        state.serialize_field("order", &order)?;
        state.serialize_field("labels", &OrderedLabels(&self.themes))?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pubsift_core::PubKind;

    fn rec(title: &str, date: &str, kind: PubKind) -> PublicationRecord {
        PublicationRecord {
            title: title.to_string(),
            date: date.to_string(),
            kind,
            ..Default::default()
        }
    }

    fn titles(records: &[PublicationRecord]) -> Vec<&str> {
        records.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_dedupe_normalized_titles() {
        let records = vec![
            rec("Deep Learning for X", "2020-01-01", PubKind::FromProjects),
            rec("deep learning for x!", "2021-01-01", PubKind::FromProjects),
            rec("Other Work", "2019-01-01", PubKind::FromProjects),
        ];
        let (kept, dropped) = dedupe_by_title(records);
        assert_eq!(titles(&kept), vec!["Deep Learning for X", "Other Work"]);
        assert_eq!(dropped, 1);
    }

    #[test]
    fn test_dedupe_drops_empty_keys() {
        let records = vec![
            rec("", "2020-01-01", PubKind::Unknown),
            rec("???", "2020-01-01", PubKind::Unknown),
            rec("Real", "2020-01-01", PubKind::Unknown),
        ];
        let (kept, dropped) = dedupe_by_title(records);
        assert_eq!(titles(&kept), vec!["Real"]);
        assert_eq!(dropped, 2);
    }

    #[test]
    fn test_sort_date_title_desc() {
        let mut records = vec![
            rec("B", "2019-01-01", PubKind::FromProjects),
            rec("A", "2021-03-03", PubKind::FromProjects),
            rec("C", "2019-01-01", PubKind::FromProjects),
            rec("Z", "0000-01-01", PubKind::FromProjects),
        ];
        sort_records(&mut records, SortOrder::DateTitleDesc);
        assert_eq!(titles(&records), vec!["A", "C", "B", "Z"]);

        for pair in records.windows(2) {
            assert!((&pair[0].date, &pair[0].title) >= (&pair[1].date, &pair[1].title));
        }
    }

    #[test]
    fn test_sort_kind_date_title_asc() {
        let mut records = vec![
            rec("J2", "2020-01-01", PubKind::Journal),
            rec("C1", "2021-01-01", PubKind::Conference),
            rec("U", "2000-01-01", PubKind::Unknown),
            rec("J1", "2018-01-01", PubKind::Journal),
            rec("P", "2022-01-01", PubKind::Preprint),
        ];
        sort_records(&mut records, SortOrder::KindDateTitleAsc);
        assert_eq!(titles(&records), vec!["C1", "J1", "J2", "P", "U"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut records = vec![
            rec("Same", "2020-01-01", PubKind::Journal),
            rec("Same", "2020-01-01", PubKind::Journal),
        ];
        records[0].venue = "first".into();
        records[1].venue = "second".into();
        sort_records(&mut records, SortOrder::DateTitleDesc);
        assert_eq!(records[0].venue, "first");
    }

    #[test]
    fn test_theme_index_json() {
        let index = ThemeIndex::new(vec![
            ("sustainability-of-ai".to_string(), "Sustainability of AI".to_string()),
            ("ai-for-sciences".to_string(), "AI for Sciences".to_string()),
            ("sustainability-of-ai".to_string(), "Duplicate".to_string()),
        ]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.label("ai-for-sciences"), Some("AI for Sciences"));

        let json = serde_json::to_string(&index).unwrap();
        assert_eq!(
            json,
            r#"{"order":["sustainability-of-ai","ai-for-sciences"],"labels":{"sustainability-of-ai":"Sustainability of AI","ai-for-sciences":"AI for Sciences"}}"#
        );
    }

    #[test]
    fn test_empty_theme_index() {
        let index = ThemeIndex::default();
        assert!(index.is_empty());
        assert_eq!(
            serde_json::to_string(&index).unwrap(),
            r#"{"order":[],"labels":{}}"#
        );
    }
}
