//! One search session: validate what the reader asked for, crawl, render
//!
//! This is the boundary the presentation layer talks to. It rejects caller
//! misuse up front and otherwise never fails because of the network.

use crate::config::{Config, MAX_CRAWL_DEPTH, MIN_CRAWL_DEPTH};
use crate::content::{parse_terms, render_pages, PageView};
use crate::crawler::{CrawlReport, Crawler};
use crate::{CrawlerError, RequestError};
use tokio_util::sync::CancellationToken;

/// A validated crawl request from the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    pub start_url: String,
    pub max_depth: u32,

    /// Case-folded search terms; may be empty
    pub terms: Vec<String>,
}

impl CrawlRequest {
    /// Builds a request from raw form input
    ///
    /// `terms` is a comma-separated list. The URL is only checked for
    /// emptiness; a malformed URL yields an empty crawl rather than an error.
    ///
    /// ```
    /// use keyword_crawler::session::CrawlRequest;
    ///
    /// let request = CrawlRequest::new("https://example.com", 2, "Rust, Tokio").unwrap();
    /// assert_eq!(request.terms, vec!["rust", "tokio"]);
    /// assert!(CrawlRequest::new("https://example.com", 9, "").is_err());
    /// ```
    pub fn new(start_url: &str, max_depth: i64, terms: &str) -> Result<Self, RequestError> {
        let start_url = start_url.trim();
        if start_url.is_empty() {
            return Err(RequestError::EmptyUrl);
        }

        let depth_range = i64::from(MIN_CRAWL_DEPTH)..=i64::from(MAX_CRAWL_DEPTH);
        if !depth_range.contains(&max_depth) {
            return Err(RequestError::DepthOutOfRange {
                depth: max_depth,
                min: MIN_CRAWL_DEPTH,
                max: MAX_CRAWL_DEPTH,
            });
        }

        Ok(Self {
            start_url: start_url.to_string(),
            max_depth: max_depth as u32,
            terms: parse_terms(terms),
        })
    }
}

/// The crawl and what the reader gets to see of it
#[derive(Debug, Clone)]
pub struct SessionOutput {
    pub report: CrawlReport,

    /// One view per fetched page, in traversal order
    pub views: Vec<PageView>,
}

/// Runs a full session: crawl, extract, highlight
///
/// # Returns
///
/// * `Ok(SessionOutput)` - The crawl ran, even if every page failed
/// * `Err(CrawlerError)` - The HTTP client could not be built
pub async fn run_session(
    config: &Config,
    request: &CrawlRequest,
    cancel: CancellationToken,
) -> Result<SessionOutput, CrawlerError> {
    let crawler = Crawler::new(config)?;
    let report = crawler
        .crawl_with_cancel(&request.start_url, request.max_depth, cancel)
        .await;

    let views = render_pages(&report.pages, &request.terms, &config.content);
    tracing::info!(
        "Session for {} produced {} pages",
        request.start_url,
        views.len()
    );

    Ok(SessionOutput { report, views })
}
