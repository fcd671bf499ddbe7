//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the traversal that coordinates all aspects of a
//! crawl, including:
//! - Managing the frontier stack and the visited set
//! - Coordinating fetching, parsing, and link filtering
//! - Enforcing depth, page-count and concurrency limits
//! - Handling cancellation

use crate::config::{Config, CrawlerConfig};
use crate::crawler::fetcher::Fetcher;
use crate::crawler::filter::filter_internal;
use crate::crawler::observer::{CrawlObserver, SkipReason, TracingObserver};
use crate::crawler::parser::{parse_html, ParsedPage};
use crate::crawler::scheduler::Scheduler;
use crate::output::CrawlStatistics;
use crate::state::VisitedSet;
use crate::url::{is_valid_url, network_location, ScopePolicy};
use crate::{CrawlerError, FetchError};
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use url::Url;

/// A URL waiting on the frontier, with the depth budget left below it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    pub url: String,
    pub remaining_depth: u32,
}

impl CrawlTarget {
    pub fn new(url: impl Into<String>, remaining_depth: u32) -> Self {
        Self {
            url: url.into(),
            remaining_depth,
        }
    }
}

/// A successfully fetched page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    /// Absolute URL the page was fetched from
    pub url: String,

    /// Raw document body
    pub html: String,

    /// Page title, if the document has one
    pub title: Option<String>,

    /// Distance from the start page (0 for the start page)
    pub depth: u32,
}

/// Everything one crawl produced
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub start_url: String,
    pub max_depth: u32,

    /// Fetched pages in traversal order
    pub pages: Vec<PageResult>,

    /// Every URL dispatched to the fetcher, sorted
    pub visited: Vec<String>,

    pub stats: CrawlStatistics,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    /// URLs of the fetched pages in traversal order
    pub fn urls(&self) -> Vec<&str> {
        self.pages.iter().map(|page| page.url.as_str()).collect()
    }

    /// True if the crawl stopped before exhausting its frontier
    pub fn is_partial(&self) -> bool {
        self.stats.cancelled || self.stats.page_limit_hit
    }
}

/// Depth-bounded, same-site crawler
///
/// One `Crawler` can run any number of crawls; each call to
/// [`Crawler::crawl`] gets its own visited set and host throttle.
pub struct Crawler {
    fetcher: Fetcher,
    scope: ScopePolicy,
    max_concurrent: usize,
    max_pages: usize,
    min_host_interval: Duration,
    observer: Arc<dyn CrawlObserver>,
}

impl Crawler {
    /// Creates a crawler from the full configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Successfully created crawler
    /// * `Err(CrawlerError)` - The HTTP client could not be built
    pub fn new(config: &Config) -> Result<Self, CrawlerError> {
        let fetcher = Fetcher::new(&config.fetcher)?;
        Ok(Self::with_fetcher(fetcher, &config.crawler))
    }

    /// Creates a crawler around an existing fetcher
    pub fn with_fetcher(fetcher: Fetcher, config: &CrawlerConfig) -> Self {
        Self {
            fetcher,
            scope: config.scope,
            max_concurrent: (config.max_concurrent_fetches as usize).max(1),
            max_pages: config.max_pages as usize,
            min_host_interval: config.min_host_interval(),
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replaces the default logging observer
    pub fn with_observer(mut self, observer: Arc<dyn CrawlObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Crawls from `start_url`, following internal links up to `max_depth`
    /// hops away
    ///
    /// `max_depth = 0` fetches only the start page. Fetch failures never abort
    /// the crawl; the failing URL simply contributes nothing.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use keyword_crawler::{Config, Crawler};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let crawler = Crawler::new(&Config::default())?;
    /// let report = crawler.crawl("https://example.com/", 2).await;
    /// for page in &report.pages {
    ///     println!("{} ({} bytes)", page.url, page.html.len());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn crawl(&self, start_url: &str, max_depth: u32) -> CrawlReport {
        self.crawl_with_cancel(start_url, max_depth, CancellationToken::new())
            .await
    }

    /// Like [`Crawler::crawl`], but stops issuing fetches once `cancel` fires
    /// and returns the pages gathered so far
    pub async fn crawl_with_cancel(
        &self,
        start_url: &str,
        max_depth: u32,
        cancel: CancellationToken,
    ) -> CrawlReport {
        let started_at = Utc::now();
        let clock = Instant::now();

        let start_url = canonical_start(start_url);
        let visited = VisitedSet::new();
        let scheduler = Scheduler::new(self.max_concurrent, self.min_host_interval);
        let mut stats = CrawlStatistics::default();
        let mut pages = Vec::new();

        // Explicit depth-first stack; the top is the next URL to visit
        let mut stack = vec![CrawlTarget::new(start_url.clone(), max_depth)];

        tracing::info!("Starting crawl of {} to depth {}", start_url, max_depth);

        while !stack.is_empty() {
            if cancel.is_cancelled() {
                stats.cancelled = true;
                tracing::warn!(
                    "Crawl cancelled with {} targets left on the frontier",
                    stack.len()
                );
                break;
            }

            if stats.dispatched >= self.max_pages {
                let mut left_behind = HashSet::new();
                for target in &stack {
                    if !visited.contains(&target.url) && left_behind.insert(target.url.as_str()) {
                        self.observer.on_skipped(&target.url, SkipReason::PageLimit);
                    }
                }
                if !left_behind.is_empty() {
                    stats.page_limit_hit = true;
                    tracing::warn!(
                        "Page limit of {} reached, {} URLs left unvisited",
                        self.max_pages,
                        left_behind.len()
                    );
                }
                break;
            }

            let batch = self.claim_batch(&mut stack, &visited, &mut stats);
            if batch.is_empty() {
                continue;
            }

            let results = self.fetch_batch(batch, &scheduler, &cancel).await;

            let mut child_batches = Vec::new();
            for (target, outcome) in results {
                match outcome {
                    Ok(html) => {
                        let (page, children) = self.process_page(target, html, max_depth);
                        stats.pages_fetched += 1;
                        pages.push(page);
                        child_batches.push(children);
                    }
                    Err(FetchError::Cancelled(url)) => {
                        stats.cancelled = true;
                        self.observer.on_skipped(&url, SkipReason::Cancelled);
                    }
                    Err(e) => {
                        if matches!(e, FetchError::InvalidUrl(_)) {
                            stats.invalid_urls += 1;
                        } else {
                            stats.fetch_failures += 1;
                        }
                        self.observer.on_fetch_failed(&target.url, &e);
                    }
                }
            }

            // The first page's children must end up on top of the stack
            for children in child_batches.into_iter().rev() {
                stack.extend(children.into_iter().rev());
            }
        }

        stats.visited = visited.len();
        stats.elapsed = clock.elapsed();
        if let Some(host) = Url::parse(&start_url).ok().as_ref().and_then(network_location) {
            tracing::debug!(
                "Sent {} requests to {} ({} hosts contacted)",
                scheduler.request_count(&host),
                host,
                scheduler.host_count()
            );
        }
        self.observer.on_finished(&stats);

        CrawlReport {
            start_url,
            max_depth,
            pages,
            visited: visited.snapshot(),
            stats,
            started_at,
            finished_at: Utc::now(),
        }
    }

    /// Pops up to `max_concurrent` unvisited targets off the stack, marking
    /// each as visited
    fn claim_batch(
        &self,
        stack: &mut Vec<CrawlTarget>,
        visited: &VisitedSet,
        stats: &mut CrawlStatistics,
    ) -> Vec<CrawlTarget> {
        let mut batch = Vec::new();

        while batch.len() < self.max_concurrent && stats.dispatched < self.max_pages {
            let Some(target) = stack.pop() else {
                break;
            };

            if visited.claim(&target.url) {
                stats.dispatched += 1;
                self.observer
                    .on_crawl_target(&target.url, target.remaining_depth);
                batch.push(target);
            } else {
                stats.skipped_visited += 1;
                self.observer
                    .on_skipped(&target.url, SkipReason::AlreadyVisited);
            }
        }

        batch
    }

    /// Fetches a batch concurrently, returning outcomes in batch order
    async fn fetch_batch(
        &self,
        batch: Vec<CrawlTarget>,
        scheduler: &Scheduler,
        cancel: &CancellationToken,
    ) -> Vec<(CrawlTarget, Result<String, FetchError>)> {
        stream::iter(batch)
            .map(|target| async move {
                let outcome = self.fetch_one(&target.url, scheduler, cancel).await;
                (target, outcome)
            })
            .buffered(self.max_concurrent)
            .collect()
            .await
    }

    async fn fetch_one(
        &self,
        url: &str,
        scheduler: &Scheduler,
        cancel: &CancellationToken,
    ) -> Result<String, FetchError> {
        // Invalid URLs fail fast in the fetcher without taking a slot
        let host = match Url::parse(url).ok().as_ref().and_then(network_location) {
            Some(host) if is_valid_url(url) => host,
            _ => return self.fetcher.fetch(url).await,
        };

        tokio::select! {
            _ = cancel.cancelled() => Err(FetchError::Cancelled(url.to_string())),
            result = async {
                let slot = scheduler.acquire(&host).await;
                if let Some(slot) = &slot {
                    tracing::trace!("Fetch slot granted for host {}", slot.host);
                }
                self.fetcher.fetch(url).await
            } => result,
        }
    }

    /// Turns a fetched body into a page result and the next frontier entries
    fn process_page(
        &self,
        target: CrawlTarget,
        html: String,
        max_depth: u32,
    ) -> (PageResult, Vec<CrawlTarget>) {
        let parsed = parse_html(&html).unwrap_or_else(|e| {
            tracing::error!("Error parsing HTML of {}: {}", target.url, e);
            ParsedPage::default()
        });

        let internal = filter_internal(&parsed.links, &target.url, self.scope);
        let depth = max_depth.saturating_sub(target.remaining_depth);
        self.observer
            .on_page_fetched(&target.url, depth, internal.len());

        let children = match target.remaining_depth.checked_sub(1) {
            Some(remaining) => internal
                .into_iter()
                .map(|url| CrawlTarget::new(url, remaining))
                .collect(),
            None => Vec::new(),
        };

        let page = PageResult {
            url: target.url,
            html,
            title: parsed.title,
            depth,
        };

        (page, children)
    }
}

/// Serializes a valid start URL the way resolved links are serialized, so
/// `https://example.com` and a link back to `/` count as one page
fn canonical_start(start_url: &str) -> String {
    if !is_valid_url(start_url) {
        return start_url.to_string();
    }
    Url::parse(start_url)
        .map(|url| url.to_string())
        .unwrap_or_else(|_| start_url.to_string())
}
