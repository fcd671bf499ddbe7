//! Content module: what a reader sees of each crawled page
//!
//! This module handles:
//! - Extracting visible text from fetched documents
//! - Highlighting search terms in that text
//! - Building the per-page views handed to the presentation layer

mod extract;
mod highlight;

pub use extract::{extract_visible_text, try_extract_visible_text, EXTRACTION_PLACEHOLDER};
pub use highlight::{parse_terms, Highlighter};

use crate::config::ContentConfig;
use crate::crawler::PageResult;

/// What the presentation layer displays for one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub url: String,
    pub title: Option<String>,

    /// Visible text, truncated and with search terms highlighted
    pub snippet: String,
}

/// Truncates text to at most `max_chars` characters, appending `...` when
/// anything was cut
pub fn snippet(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", text[..cut].trim_end()),
        None => text.to_string(),
    }
}

/// Turns fetched pages into display-ready views
///
/// Text is extracted and truncated before highlighting, so markers are never
/// cut in half.
pub fn render_pages(pages: &[PageResult], terms: &[String], config: &ContentConfig) -> Vec<PageView> {
    let highlighter = Highlighter::new(
        config.highlight_open.as_str(),
        config.highlight_close.as_str(),
    );

    pages
        .iter()
        .map(|page| {
            let text = extract_visible_text(&page.html);
            let short = snippet(&text, config.snippet_length);
            PageView {
                url: page.url.clone(),
                title: page.title.clone(),
                snippet: highlighter.highlight(&short, terms),
            }
        })
        .collect()
}
