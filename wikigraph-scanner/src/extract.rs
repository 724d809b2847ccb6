use crate::error::{Result, ScanError};
use percent_encoding::percent_decode_str;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

/// Anchors worth considering: they name their target with a `title` and carry
/// none of the attributes Wikipedia puts on navigation chrome.
const ANCHOR_SELECTOR: &str = "body a[href][title]:not([dir]):not([accesskey]):not([class])";

/// An href containing any of these is not an article link.
pub const EXCLUDED_MARKERS: &[&str] = &[
    "Wikipedia:",
    "Category:",
    "http",
    "//",
    "Help:",
    "Portal:",
    "Template:",
    "File:",
    "Special:",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleLink {
    pub href: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLinks {
    pub title: String,
    pub links: Vec<ArticleLink>,
}

/// Extract the page title and up to `max_links` article links, in document order.
pub fn extract_links(html: &str, max_links: usize) -> Result<PageLinks> {
    let document = Html::parse_document(html);

    let anchor_selector =
        Selector::parse(ANCHOR_SELECTOR).map_err(|e| ScanError::ParseError(e.to_string()))?;
    let title_selector =
        Selector::parse("title").map_err(|e| ScanError::ParseError(e.to_string()))?;

    let title = document
        .select(&title_selector)
        .next()
        .map(|t| clean_title(&t.text().collect::<String>()))
        .unwrap_or_default();

    let links = document
        .select(&anchor_selector)
        .filter_map(|element| {
            let href = element.value().attr("href")?;
            let title = element.value().attr("title")?;
            is_article_href(href).then(|| ArticleLink {
                href: href.to_string(),
                title: title.to_string(),
            })
        })
        .take(max_links)
        .collect();

    Ok(PageLinks { title, links })
}

pub fn is_article_href(href: &str) -> bool {
    href.contains("/wiki/") && !EXCLUDED_MARKERS.iter().any(|m| href.contains(m))
}

/// Strip the " - Wikipedia" suffix browsers show in the tab.
pub fn clean_title(raw: &str) -> String {
    let title = raw.trim();
    if title.contains("Wikipedia") {
        title.split(" - W").next().unwrap_or(title).to_string()
    } else {
        title.to_string()
    }
}

/// Fallback title for pages without a `<title>` element.
pub fn title_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.rev().find(|s| !s.is_empty())?;
    let decoded = percent_decode_str(segment).decode_utf8_lossy();
    Some(decoded.replace('_', " "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(title: &str, body: &str) -> String {
        format!("<html><head><title>{title}</title></head><body>{body}</body></html>")
    }

    #[test]
    fn test_extracts_plain_article_links() {
        let html = page(
            "Finland - Wikipedia",
            r#"<p><a href="/wiki/Helsinki" title="Helsinki">Helsinki</a>
               <a href="/wiki/Sauna" title="Sauna">sauna</a></p>"#,
        );

        let page = extract_links(&html, 10).unwrap();

        assert_eq!(page.title, "Finland");
        assert_eq!(
            page.links,
            vec![
                ArticleLink {
                    href: "/wiki/Helsinki".to_string(),
                    title: "Helsinki".to_string()
                },
                ArticleLink {
                    href: "/wiki/Sauna".to_string(),
                    title: "Sauna".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_skips_anchors_with_chrome_attributes() {
        let html = page(
            "X",
            r#"<a href="/wiki/A" title="A" class="image">a</a>
               <a href="/wiki/B" title="B" dir="ltr">b</a>
               <a href="/wiki/C" title="C" accesskey="z">c</a>
               <a href="/wiki/D">no title</a>
               <a title="E">no href</a>
               <a href="/wiki/F" title="F">f</a>"#,
        );

        let page = extract_links(&html, 10).unwrap();

        let titles: Vec<_> = page.links.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["F"]);
    }

    #[test]
    fn test_skips_namespaced_and_external_links() {
        let html = page(
            "X",
            r#"<a href="/wiki/Category:Countries" title="Category:Countries">c</a>
               <a href="/wiki/Help:Contents" title="Help">h</a>
               <a href="/wiki/Template:Infobox" title="Template">t</a>
               <a href="/wiki/Portal:Europe" title="Portal">p</a>
               <a href="/wiki/Wikipedia:About" title="About">w</a>
               <a href="/wiki/File:Flag.svg" title="Flag">f</a>
               <a href="https://fi.wikipedia.org/wiki/Suomi" title="Suomi">fi</a>
               <a href="//commons.wikimedia.org/wiki/Finland" title="Commons">co</a>
               <a href="/w/index.php?title=Finland" title="Edit">e</a>
               <a href="/wiki/Lake" title="Lake">lake</a>"#,
        );

        let page = extract_links(&html, 10).unwrap();

        assert_eq!(page.links.len(), 1);
        assert_eq!(page.links[0].href, "/wiki/Lake");
    }

    #[test]
    fn test_cap_applies_after_filtering() {
        let html = page(
            "X",
            r#"<a href="/wiki/Category:A" title="A">a</a>
               <a href="/wiki/Category:B" title="B">b</a>
               <a href="/wiki/One" title="One">1</a>
               <a href="/wiki/Two" title="Two">2</a>
               <a href="/wiki/Three" title="Three">3</a>"#,
        );

        let page = extract_links(&html, 2).unwrap();

        let titles: Vec<_> = page.links.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Two"]);
    }

    #[test]
    fn test_zero_cap_yields_no_links() {
        let html = page("X", r#"<a href="/wiki/One" title="One">1</a>"#);
        assert!(extract_links(&html, 0).unwrap().links.is_empty());
    }

    #[test]
    fn test_missing_title_is_empty() {
        let page = extract_links("<html><body></body></html>", 5).unwrap();
        assert_eq!(page.title, "");
        assert!(page.links.is_empty());
    }

    #[test]
    fn test_clean_title() {
        assert_eq!(clean_title("Finland - Wikipedia"), "Finland");
        assert_eq!(clean_title("  Oulu - Wikipedia \n"), "Oulu");
        assert_eq!(clean_title("Wikipedia"), "Wikipedia");
        assert_eq!(clean_title("Sibelius"), "Sibelius");
        assert_eq!(clean_title("A - B - Wikipedia"), "A - B");
    }

    #[test]
    fn test_is_article_href() {
        assert!(is_article_href("/wiki/Finland"));
        assert!(!is_article_href("/wiki/Special:Random"));
        assert!(!is_article_href("/w/index.php"));
        assert!(!is_article_href("http://example.com/wiki/X"));
    }

    #[test]
    fn test_title_from_url() {
        assert_eq!(
            title_from_url("https://en.wikipedia.org/wiki/Gulf_of_Bothnia"),
            Some("Gulf of Bothnia".to_string())
        );
        assert_eq!(
            title_from_url("https://en.wikipedia.org/wiki/C%2B%2B"),
            Some("C++".to_string())
        );
        assert_eq!(
            title_from_url("https://en.wikipedia.org/wiki/%C3%85land"),
            Some("Åland".to_string())
        );
        assert_eq!(title_from_url("not a url"), None);
    }
}
