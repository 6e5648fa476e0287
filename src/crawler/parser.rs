//! Page parsing: turning a URL into words and outbound links
//!
//! The [`PageParser`] trait is the seam between the crawl engine and the
//! fetch/parse machinery. The engine only ever sees a `PageData`; tests
//! substitute fixture parsers over synthetic link graphs.

use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::filters::PatternSet;
use crate::CrawlError;
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;
use url::Url;

/// Everything the crawl engine needs from one page
#[derive(Debug, Clone, Default)]
pub struct PageData {
    /// Occurrence count per word found on the page
    pub word_counts: HashMap<String, u64>,

    /// Outbound links, as absolute URLs
    pub links: Vec<String>,
}

/// Turns a URL into word counts and outbound links
///
/// Implementations must be safely callable concurrently from multiple tasks
/// on different URLs, and side-effect-free and idempotent per call.
///
/// A parse failure aborts the whole crawl: the engine propagates the error
/// rather than silently skipping the URL.
#[async_trait]
pub trait PageParser: Send + Sync {
    async fn parse(&self, url: &str) -> Result<PageData, CrawlError>;
}

/// Production parser: fetches a page over HTTP and parses its HTML
///
/// Non-HTML responses contribute an empty `PageData` - a link to a PDF must
/// not abort the crawl, it simply has no words and no links to offer.
pub struct HtmlPageParser {
    client: reqwest::Client,
    ignored_words: PatternSet,
}

impl HtmlPageParser {
    /// Creates a parser with its own HTTP client
    ///
    /// # Arguments
    ///
    /// * `ignored_words` - Full-match patterns for words excluded from counting
    pub fn new(ignored_words: PatternSet) -> Result<Self, CrawlError> {
        Ok(Self {
            client: build_http_client()?,
            ignored_words,
        })
    }
}

#[async_trait]
impl PageParser for HtmlPageParser {
    async fn parse(&self, url: &str) -> Result<PageData, CrawlError> {
        let fetched = fetch_page(&self.client, url).await?;

        let body = match fetched.body {
            Some(body) => body,
            None => return Ok(PageData::default()),
        };

        let base_url = Url::parse(&fetched.final_url)?;
        Ok(parse_page(&body, &base_url, &self.ignored_words))
    }
}

/// Parses HTML content into word counts and outbound links
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The base URL for resolving relative links
/// * `ignored_words` - Words matching any of these patterns are not counted
pub fn parse_page(html: &str, base_url: &Url, ignored_words: &PatternSet) -> PageData {
    let document = Html::parse_document(html);

    PageData {
        word_counts: count_words(&visible_text(&document), ignored_words),
        links: extract_links(&document, base_url),
    }
}

/// Collects the visible text of a document
///
/// Text inside script, style, and noscript elements is not rendered, so it
/// must not contribute to the word counts.
fn visible_text(document: &Html) -> String {
    let mut text = String::new();

    for node in document.tree.nodes() {
        if let Some(fragment) = node.value().as_text() {
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|e| matches!(e.name(), "script" | "style" | "noscript"))
            });
            if !hidden {
                text.push_str(fragment);
                text.push(' ');
            }
        }
    }

    text
}

/// Tokenizes text into lowercase words and counts occurrences
fn count_words(text: &str, ignored_words: &PatternSet) -> HashMap<String, u64> {
    let mut counts = HashMap::new();

    for word in text.unicode_words() {
        let word = word.to_lowercase();
        if ignored_words.is_match(&word) {
            continue;
        }
        *counts.entry(word).or_insert(0) += 1;
    }

    counts
}

/// Extracts all followable links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links (same page anchors)
/// - URLs that fail to resolve, or resolve to non-HTTP(S) schemes
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/page").unwrap()
    }

    fn no_ignored_words() -> PatternSet {
        PatternSet::default()
    }

    #[test]
    fn test_count_words_lowercases() {
        let parsed = parse_page(
            "<html><body>Cat cat CAT</body></html>",
            &base_url(),
            &no_ignored_words(),
        );
        assert_eq!(parsed.word_counts.get("cat"), Some(&3));
        assert_eq!(parsed.word_counts.len(), 1);
    }

    #[test]
    fn test_count_words_splits_on_punctuation() {
        let parsed = parse_page(
            "<html><body>cat, dog. cat! fish?</body></html>",
            &base_url(),
            &no_ignored_words(),
        );
        assert_eq!(parsed.word_counts.get("cat"), Some(&2));
        assert_eq!(parsed.word_counts.get("dog"), Some(&1));
        assert_eq!(parsed.word_counts.get("fish"), Some(&1));
    }

    #[test]
    fn test_words_across_elements_are_counted() {
        let parsed = parse_page(
            "<html><body><p>cat</p><div>cat <span>dog</span></div></body></html>",
            &base_url(),
            &no_ignored_words(),
        );
        assert_eq!(parsed.word_counts.get("cat"), Some(&2));
        assert_eq!(parsed.word_counts.get("dog"), Some(&1));
    }

    #[test]
    fn test_script_and_style_text_not_counted() {
        let html = r#"<html><head><style>body { color: red }</style>
            <script>var cat = "cat";</script></head>
            <body>dog</body></html>"#;
        let parsed = parse_page(html, &base_url(), &no_ignored_words());
        assert_eq!(parsed.word_counts.get("dog"), Some(&1));
        assert_eq!(parsed.word_counts.get("cat"), None);
        assert_eq!(parsed.word_counts.get("var"), None);
    }

    #[test]
    fn test_ignored_words_filtered() {
        let ignored = PatternSet::compile(&[".{1,3}".to_string()]).unwrap();
        let parsed = parse_page(
            "<html><body>cat house dog garden</body></html>",
            &base_url(),
            &ignored,
        );
        assert_eq!(parsed.word_counts.get("cat"), None);
        assert_eq!(parsed.word_counts.get("dog"), None);
        assert_eq!(parsed.word_counts.get("house"), Some(&1));
        assert_eq!(parsed.word_counts.get("garden"), Some(&1));
    }

    #[test]
    fn test_extract_absolute_link() {
        let parsed = parse_page(
            r#"<html><body><a href="https://other.com/page">Link</a></body></html>"#,
            &base_url(),
            &no_ignored_words(),
        );
        assert_eq!(parsed.links, vec!["https://other.com/page"]);
    }

    #[test]
    fn test_extract_relative_link() {
        let parsed = parse_page(
            r#"<html><body><a href="/other">Link</a></body></html>"#,
            &base_url(),
            &no_ignored_words(),
        );
        assert_eq!(parsed.links, vec!["https://example.com/other"]);
    }

    #[test]
    fn test_skip_special_scheme_links() {
        let html = r#"<html><body>
            <a href="javascript:void(0)">Js</a>
            <a href="mailto:test@example.com">Email</a>
            <a href="tel:+1234567890">Call</a>
            <a href="data:text/html,hi">Data</a>
        </body></html>"#;
        let parsed = parse_page(html, &base_url(), &no_ignored_words());
        assert!(parsed.links.is_empty());
    }

    #[test]
    fn test_skip_fragment_only_link() {
        let parsed = parse_page(
            r##"<html><body><a href="#section">Jump</a></body></html>"##,
            &base_url(),
            &no_ignored_words(),
        );
        assert!(parsed.links.is_empty());
    }

    #[test]
    fn test_mixed_valid_and_invalid_links() {
        let html = r#"<html><body>
            <a href="/valid">Valid</a>
            <a href="javascript:alert('no')">Invalid</a>
            <a href="/another-valid">Valid</a>
        </body></html>"#;
        let parsed = parse_page(html, &base_url(), &no_ignored_words());
        assert_eq!(
            parsed.links,
            vec![
                "https://example.com/valid",
                "https://example.com/another-valid"
            ]
        );
    }

    #[test]
    fn test_empty_page() {
        let parsed = parse_page("<html><body></body></html>", &base_url(), &no_ignored_words());
        assert!(parsed.word_counts.is_empty());
        assert!(parsed.links.is_empty());
    }
}
