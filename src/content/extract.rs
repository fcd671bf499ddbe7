//! Visible-text extraction
//!
//! Strips markup that never carries readable content and returns the text of
//! the main content region of a document.

use crate::crawler::selector;
use crate::ParseError;
use scraper::{ElementRef, Html, Node};

/// Elements whose whole subtree is ignored
const IGNORED_ELEMENTS: &[&str] = &[
    "script", "style", "noscript", "header", "footer", "meta", "head", "form", "nav", "aside",
];

/// Semantic containers preferred over the full body, first match wins
const CONTENT_CONTAINERS: &str = "article, main, section";

/// Text fragments this short are menu labels and similar noise
const MIN_FRAGMENT_CHARS: usize = 30;

/// Returned instead of text when a document cannot be processed
pub const EXTRACTION_PLACEHOLDER: &str = "[Could not extract visible text]";

/// Extracts the human-readable text of an HTML document
///
/// Never fails: on a parse error the error is logged and
/// [`EXTRACTION_PLACEHOLDER`] is returned.
///
/// # Example
///
/// ```
/// use keyword_crawler::content::extract_visible_text;
///
/// let html = r#"<html><body>
///     <nav>Home | About | A very long navigation label here</nav>
///     <article><p>This paragraph is long enough to count as content.</p></article>
/// </body></html>"#;
/// assert_eq!(
///     extract_visible_text(html),
///     "This paragraph is long enough to count as content."
/// );
/// ```
pub fn extract_visible_text(html: &str) -> String {
    match try_extract_visible_text(html) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Could not extract visible text: {}", e);
            EXTRACTION_PLACEHOLDER.to_string()
        }
    }
}

/// Fallible version of [`extract_visible_text`]
pub fn try_extract_visible_text(html: &str) -> Result<String, ParseError> {
    let document = Html::parse_document(html);
    let containers = selector(CONTENT_CONTAINERS)?;
    let body = selector("body")?;

    let root = document
        .select(&containers)
        .find(|element| !any_ignored(element.ancestors().map(|n| n.value())))
        .or_else(|| document.select(&body).next())
        .unwrap_or_else(|| document.root_element());

    Ok(collect_fragments(root).join(" "))
}

/// Gathers the long-enough text nodes under `root`, whitespace collapsed
fn collect_fragments(root: ElementRef<'_>) -> Vec<String> {
    root.descendants()
        .filter_map(|node| match node.value() {
            Node::Text(text) if !any_ignored(node.ancestors().map(|n| n.value())) => {
                Some(collapse_whitespace(text))
            }
            _ => None,
        })
        .filter(|fragment| fragment.chars().count() > MIN_FRAGMENT_CHARS)
        .collect()
}

/// True if any of the given nodes is an ignored element
fn any_ignored<'a>(mut nodes: impl Iterator<Item = &'a Node>) -> bool {
    nodes.any(|node| {
        node.as_element()
            .map_or(false, |element| IGNORED_ELEMENTS.contains(&element.name()))
    })
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
