//! HTML parser for extracting links and metadata
//!
//! This module handles parsing fetched documents to extract:
//! - Raw hyperlink targets (from `<a href>` tags)
//! - Page title
//!
//! Nothing here validates or resolves links; that is the link filter's job.

use crate::ParseError;
use scraper::{Html, Selector};

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// Every anchor href, verbatim and in document order
    pub links: Vec<String>,
}

/// Builds a selector, reporting failures as a parse error
pub(crate) fn selector(source: &str) -> Result<Selector, ParseError> {
    Selector::parse(source).map_err(|e| ParseError::Selector {
        selector: source.to_string(),
        message: e.to_string(),
    })
}

/// Parses HTML content and extracts links and the title
///
/// # Link Extraction Rules
///
/// Every `<a>` element with an `href` attribute contributes its attribute
/// value unchanged: fragments (`#top`), relative paths, absolute URLs and
/// special schemes (`mailto:`) all pass through.
///
/// # Example
///
/// ```
/// use keyword_crawler::crawler::parse_html;
///
/// let html = r##"<html><head><title>Test</title></head>
///     <body><a href="/page">Link</a><a href="#top">Top</a></body></html>"##;
/// let parsed = parse_html(html).unwrap();
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.links, vec!["/page", "#top"]);
/// ```
pub fn parse_html(html: &str) -> Result<ParsedPage, ParseError> {
    let document = Html::parse_document(html);

    let title = extract_title(&document)?;
    let links = collect_hrefs(&document)?;

    Ok(ParsedPage { title, links })
}

/// Extracts raw href values from an HTML document
///
/// Malformed markup is parsed leniently; a parse error is logged and yields
/// an empty list instead of failing the caller.
pub fn extract_links(html: &str) -> Vec<String> {
    match parse_html(html) {
        Ok(parsed) => parsed.links,
        Err(e) => {
            tracing::error!("Error parsing HTML: {}", e);
            Vec::new()
        }
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Result<Option<String>, ParseError> {
    let title_selector = selector("title")?;

    Ok(document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty()))
}

fn collect_hrefs(document: &Html) -> Result<Vec<String>, ParseError> {
    let a_selector = selector("a[href]")?;

    Ok(document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect())
}
