//! Crawl observers
//!
//! The crawler reports every decision it takes to an injected observer
//! instead of writing to global state. [`TracingObserver`] is the default and
//! turns events into log lines.

use crate::output::CrawlStatistics;
use crate::FetchError;
use std::fmt;

/// Why a crawl target was not fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The URL was already dispatched earlier in this crawl
    AlreadyVisited,

    /// The crawl reached its page ceiling
    PageLimit,

    /// The crawl was cancelled before this target was fetched
    Cancelled,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyVisited => write!(f, "already visited"),
            Self::PageLimit => write!(f, "page limit reached"),
            Self::Cancelled => write!(f, "crawl cancelled"),
        }
    }
}

/// Receives crawl events
///
/// All methods have empty default implementations, so an observer only
/// overrides what it cares about.
pub trait CrawlObserver: Send + Sync {
    /// A page is about to be fetched
    fn on_crawl_target(&self, _url: &str, _remaining_depth: u32) {}

    /// A page was fetched; `links` internal links were found on it
    fn on_page_fetched(&self, _url: &str, _depth: u32, _links: usize) {}

    /// A page could not be fetched and was dropped from the crawl
    fn on_fetch_failed(&self, _url: &str, _error: &FetchError) {}

    /// A target was skipped without fetching
    fn on_skipped(&self, _url: &str, _reason: SkipReason) {}

    /// The crawl finished, normally or not
    fn on_finished(&self, _stats: &CrawlStatistics) {}
}

/// Observer that logs every event through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CrawlObserver for TracingObserver {
    fn on_crawl_target(&self, url: &str, remaining_depth: u32) {
        tracing::info!("Crawling: {} | Depth: {}", url, remaining_depth);
    }

    fn on_page_fetched(&self, url: &str, depth: u32, links: usize) {
        tracing::debug!("Fetched {} at depth {} with {} internal links", url, depth, links);
    }

    fn on_fetch_failed(&self, url: &str, error: &FetchError) {
        tracing::warn!("Dropping {} from crawl: {}", url, error);
    }

    fn on_skipped(&self, url: &str, reason: SkipReason) {
        tracing::debug!("Skipping {}: {}", url, reason);
    }

    fn on_finished(&self, stats: &CrawlStatistics) {
        tracing::info!(
            "Crawl finished: {} pages fetched, {} failed, {} skipped in {:?}",
            stats.pages_fetched,
            stats.fetch_failures,
            stats.skipped_visited,
            stats.elapsed
        );
    }
}
