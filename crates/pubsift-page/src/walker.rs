use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use pubsift_core::{PubKind, PublicationRecord, Section};
use pubsift_parsing::{ItemExtractor, flatten_fragments};

use crate::resources::{collect_resources, inline_text, primary_link};
use crate::sections::SectionScheme;

static HEADING: Lazy<Selector> = Lazy::new(|| Selector::parse("h2, h3").unwrap());
static ITEM: Lazy<Selector> = Lazy::new(|| Selector::parse("li").unwrap());

fn is_heading(name: &str) -> bool {
    matches!(name, "h2" | "h3")
}

fn is_list(name: &str) -> bool {
    matches!(name, "ol" | "ul")
}

fn parent_is_list(item: &ElementRef<'_>) -> bool {
    item.parent()
        .and_then(ElementRef::wrap)
        .is_some_and(|p| is_list(p.value().name()))
}

/// Structural switches for a walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkOptions {
    /// Also visit `li` elements that are not direct children of a list.
    pub lenient_nesting: bool,
    /// When no section yields anything, turn every `li` into an `unknown` record.
    pub fallback_all_items: bool,
}

/// Everything one pass over a page produced.
#[derive(Debug, Clone, Default)]
pub struct PageOutcome {
    pub records: Vec<PublicationRecord>,
    /// `(key, label)` of every theme section, in first-appearance order.
    pub themes: Vec<(String, String)>,
    pub items_visited: usize,
    pub used_fallback: bool,
}

/// Walks the `h2`/`h3` sections of a page and turns their list items into records.
pub struct PageWalker {
    scheme: SectionScheme,
    extractor: ItemExtractor,
    options: WalkOptions,
}

impl PageWalker {
    pub fn new(scheme: SectionScheme, extractor: ItemExtractor, options: WalkOptions) -> Self {
        Self {
            scheme,
            extractor,
            options,
        }
    }

    pub fn scheme(&self) -> &SectionScheme {
        &self.scheme
    }

    pub fn walk(&self, html: &str) -> PageOutcome {
        let document = Html::parse_document(html);
        let mut outcome = PageOutcome::default();

        for heading in document.select(&HEADING) {
            let text = inline_text(heading);
            let Some(section) = self.scheme.classify(&text) else {
                tracing::debug!(heading = %text, "skipping unclassified section");
                continue;
            };

            if let Some((key, label)) = section.theme()
                && !outcome.themes.iter().any(|(k, _)| k == key)
            {
                outcome.themes.push((key.to_string(), label.to_string()));
            }

            let items = self.section_items(heading);
            tracing::debug!(heading = %text, kind = %section.kind(), items = items.len(), "section");
            for item in items {
                outcome.items_visited += 1;
                outcome
                    .records
                    .push(record_from_item(item, &self.extractor, &section));
            }
        }

        if outcome.records.is_empty() && self.options.fallback_all_items {
            let unknown = Section::Kind(PubKind::Unknown);
            let items: Vec<ElementRef<'_>> = document.select(&ITEM).collect();
            if !items.is_empty() {
                tracing::warn!(
                    items = items.len(),
                    "no recognised sections, collecting every list item as unknown"
                );
                outcome.used_fallback = true;
            }
            for item in items {
                outcome.items_visited += 1;
                outcome
                    .records
                    .push(record_from_item(item, &self.extractor, &unknown));
            }
        }

        outcome
    }

    /// List items between `heading` and the next `h2`/`h3` sibling.
    fn section_items<'a>(&self, heading: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        let mut items = Vec::new();

        for sibling in heading.next_siblings().filter_map(ElementRef::wrap) {
            let name = sibling.value().name();
            if is_heading(name) {
                break;
            }
            if is_list(name) {
                items.extend(
                    sibling
                        .children()
                        .filter_map(ElementRef::wrap)
                        .filter(|child| child.value().name() == "li"),
                );
            }
            if self.options.lenient_nesting {
                // li outside any list: malformed markup
                items.extend(sibling.select(&ITEM).filter(|li| !parent_is_list(li)));
            }
        }

        items
    }
}

/// Build a tagged record from one list item element.
pub fn record_from_item(
    item: ElementRef<'_>,
    extractor: &ItemExtractor,
    section: &Section,
) -> PublicationRecord {
    let text = flatten_fragments(item.text());
    let fields = extractor.extract(&text);
    let resources = collect_resources(item);

    PublicationRecord {
        title: fields.title,
        authors: fields.authors,
        venue: fields.venue,
        year: fields.year,
        date: fields.date,
        link: primary_link(&resources),
        resources,
        ..Default::default()
    }
    .tag(section)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pubsift_core::UNKNOWN_DATE;

    const TYPED_PAGE: &str = r#"<html><body>
        <h1>Publications</h1>
        <h2>Refereed Conference Papers</h2>
        <ol>
          <li>Doe J, Smith A. "A Great Study of Things". Proc. of ACML, 2019.
              <a href="https://x.org/a.pdf">pdf</a> <a href="https://arxiv.org/abs/1">arXiv</a></li>
          <li>Lee K. &#8220;Another Careful Study&#8221;. NeurIPS, 2021.</li>
        </ol>
        <h2>Invited Talks</h2>
        <ul><li>"Talk That Should Be Skipped" 2020</li></ul>
        <h3>Journal Articles</h3>
        <p>Intro paragraph</p>
        <ul><li>Roe P, "Journal Paper About Stuff", Journal of Stuff, 2018.</li></ul>
    </body></html>"#;

    fn walker(scheme: SectionScheme, lenient: bool, fallback: bool) -> PageWalker {
        PageWalker::new(
            scheme,
            ItemExtractor::new(),
            WalkOptions {
                lenient_nesting: lenient,
                fallback_all_items: fallback,
            },
        )
    }

    #[test]
    fn test_typed_sections() {
        let outcome = walker(SectionScheme::typed_default(), false, true).walk(TYPED_PAGE);
        assert!(!outcome.used_fallback);
        assert_eq!(outcome.items_visited, 3);
        assert!(outcome.themes.is_empty());

        let titles: Vec<&str> = outcome.records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["A Great Study of Things", "Another Careful Study", "Journal Paper About Stuff"]
        );

        let first = &outcome.records[0];
        assert_eq!(first.kind, PubKind::Conference);
        assert_eq!(first.authors, vec!["Doe J", "Smith A"]);
        assert_eq!(first.venue, "Proc. of ACML");
        assert_eq!(first.link.as_deref(), Some("https://x.org/a.pdf"));
        assert_eq!(first.resources.len(), 2);

        assert_eq!(outcome.records[1].link, None);
        assert_eq!(outcome.records[2].kind, PubKind::Journal);
        assert_eq!(outcome.records[2].venue, "Journal of Stuff");
    }

    #[test]
    fn test_lenient_nesting_visits_stray_items() {
        let html = r#"<body>
            <h2>Preprints</h2>
            <div><li>Doe J, "Malformed Stray Item Title" arXiv, 2020</li></div>
            <ul><li>Roe P, "Outer Item With Nesting" 2019
                <ul><li>"Inner Nested" 2018</li></ul></li></ul>
        </body>"#;

        let strict = walker(SectionScheme::typed_default(), false, false).walk(html);
        assert_eq!(strict.items_visited, 1);
        assert_eq!(strict.records[0].title, "Outer Item With Nesting");

        let lenient = walker(SectionScheme::typed_default(), true, false).walk(html);
        let titles: Vec<&str> = lenient.records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Malformed Stray Item Title", "Outer Item With Nesting"]);
        assert!(lenient.records.iter().all(|r| r.kind == PubKind::Preprint));
    }

    #[test]
    fn test_heading_with_inline_markup() {
        let html = r#"<body>
            <h2>Pre<em>print</em>s</h2>
            <ul><li>Doe J, "Split Heading Still Counts", arXiv, 2021</li></ul>
        </body>"#;

        let outcome = walker(SectionScheme::typed_default(), true, false).walk(html);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].kind, PubKind::Preprint);
        assert_eq!(outcome.records[0].title, "Split Heading Still Counts");
    }

    #[test]
    fn test_fallback_collects_every_item() {
        let html = r#"<body><h2>Misc</h2><ul>
            <li>"Orphan Item Number One" 2017</li>
            <li>No year here</li></ul></body>"#;

        let outcome = walker(SectionScheme::typed_default(), true, true).walk(html);
        assert!(outcome.used_fallback);
        assert_eq!(outcome.records.len(), 2);
        assert!(outcome.records.iter().all(|r| r.kind == PubKind::Unknown));
        assert_eq!(outcome.records[1].date, UNKNOWN_DATE);

        let disabled = walker(SectionScheme::typed_default(), true, false).walk(html);
        assert!(disabled.records.is_empty());
        assert!(!disabled.used_fallback);
    }

    #[test]
    fn test_empty_page() {
        let outcome = walker(SectionScheme::typed_default(), true, true).walk("<html></html>");
        assert!(outcome.records.is_empty());
        assert!(!outcome.used_fallback);
        assert_eq!(outcome.items_visited, 0);
    }

    #[test]
    fn test_themed_sections_record_theme_order() {
        let html = r#"<body>
            <h2>AI for Sciences</h2>
            <ul><li>Doe J, "Physics Informed Things", Venue, 2022</li></ul>
            <h2>Team</h2>
            <ul><li>"Not A Publication Entry" 2022</li></ul>
            <h3>Sustainability of AI</h3>
            <ol><li>Roe P, "Carbon Footprint Of Training", Venue, 2021</li></ol>
            <h2>AI for Sciences</h2>
            <ul><li>Lee K, "Second Science Section Item", Venue, 2020</li></ul>
        </body>"#;

        let outcome = walker(SectionScheme::themed_default(), false, true).walk(html);
        assert_eq!(
            outcome.themes,
            vec![
                ("ai-for-sciences".to_string(), "AI for Sciences".to_string()),
                ("sustainability-of-ai".to_string(), "Sustainability of AI".to_string()),
            ]
        );
        assert_eq!(outcome.records.len(), 3);
        let first = &outcome.records[0];
        assert_eq!(first.kind, PubKind::FromProjects);
        assert_eq!(first.theme_key.as_deref(), Some("ai-for-sciences"));
        assert_eq!(first.theme_label.as_deref(), Some("AI for Sciences"));
        assert_eq!(outcome.records[1].theme_key.as_deref(), Some("sustainability-of-ai"));
    }
}
