//! Crawler module for web page fetching and traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry logic
//! - HTML parsing and link extraction
//! - Same-site link filtering
//! - Request scheduling and rate limiting
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod filter;
mod observer;
mod parser;
mod scheduler;

pub use coordinator::{CrawlReport, CrawlTarget, Crawler, PageResult};
pub use fetcher::{build_http_client, Backoff, Fetcher, RetryPolicy};
pub use filter::{filter_internal, resolve_link};
pub use observer::{CrawlObserver, SkipReason, TracingObserver};
pub use parser::{extract_links, parse_html, ParsedPage};
pub use scheduler::{FetchSlot, Scheduler};

pub(crate) use parser::selector;
