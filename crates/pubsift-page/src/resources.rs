use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

use pubsift_core::Resource;
use pubsift_parsing::normalize_space;

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

/// Label given to anchors without visible text.
pub const FALLBACK_LABEL: &str = "Link";

/// Visible text of an inline element such as a heading or anchor.
///
/// Text nodes are concatenated without a separator, so `Pre<em>print</em>s`
/// reads as "Preprints".
pub(crate) fn inline_text(el: ElementRef<'_>) -> String {
    normalize_space(&el.text().collect::<String>())
}

/// Every hyperlink inside `item`, in document order.
///
/// Anchors without an `href` (or with a blank one) are skipped. Duplicate URLs
/// are kept.
pub fn collect_resources(item: ElementRef<'_>) -> Vec<Resource> {
    item.select(&ANCHOR)
        .filter_map(|a| {
            let href = a.value().attr("href")?.trim();
            if href.is_empty() {
                return None;
            }
            let label = inline_text(a);
            let label = if label.is_empty() {
                FALLBACK_LABEL.to_string()
            } else {
                label
            };
            Some(Resource::new(label, href))
        })
        .collect()
}

/// The resource a record links to: the first one labelled "pdf", else the first.
pub fn primary_link(resources: &[Resource]) -> Option<String> {
    resources
        .iter()
        .find(|r| r.label.eq_ignore_ascii_case("pdf"))
        .or_else(|| resources.first())
        .map(|r| r.url.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn first_li(html: &str) -> Vec<Resource> {
        let doc = Html::parse_fragment(html);
        let li = Selector::parse("li").unwrap();
        let item = doc.select(&li).next().unwrap();
        collect_resources(item)
    }

    #[test]
    fn test_collect_resources() {
        let resources = first_li(
            r#"<ul><li>Doe J. "Study". <a href=" https://x.org/a.pdf ">PDF</a>
               <a href="https://github.com/x"><i class="icon"></i></a>
               <a>no href</a> <a href="  ">blank</a></li></ul>"#,
        );
        assert_eq!(
            resources,
            vec![
                Resource::new("PDF", "https://x.org/a.pdf"),
                Resource::new("Link", "https://github.com/x"),
            ]
        );
    }

    #[test]
    fn test_label_with_inline_markup() {
        let resources = first_li(
            r#"<ul><li><a href="a">site</a> <a href="b">P<b>DF</b></a></li></ul>"#,
        );
        assert_eq!(resources[1], Resource::new("PDF", "b"));
        assert_eq!(primary_link(&resources).as_deref(), Some("b"));
    }

    #[test]
    fn test_duplicate_urls_kept() {
        let resources = first_li(
            r#"<ul><li><a href="/p">paper</a> <a href="/p">again</a></li></ul>"#,
        );
        assert_eq!(resources.len(), 2);
    }

    #[test]
    fn test_primary_link_prefers_pdf() {
        let resources = vec![
            Resource::new("Link", "a"),
            Resource::new("pdf", "b"),
            Resource::new("arXiv", "c"),
        ];
        assert_eq!(primary_link(&resources).as_deref(), Some("b"));
    }

    #[test]
    fn test_primary_link_falls_back_to_first() {
        let resources = vec![Resource::new("arXiv", "c"), Resource::new("code", "d")];
        assert_eq!(primary_link(&resources).as_deref(), Some("c"));
        assert_eq!(primary_link(&[]), None);
    }
}
