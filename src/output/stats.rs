//! Crawl statistics
//!
//! Counters accumulated by the crawler while it runs, and a plain-text
//! rendering of them for the terminal.

use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Targets claimed in the visited set and handed to the fetcher
    pub dispatched: usize,

    /// Pages fetched successfully
    pub pages_fetched: usize,

    /// Pages dropped after every fetch attempt failed
    pub fetch_failures: usize,

    /// Targets rejected before any request was sent
    pub invalid_urls: usize,

    /// Frontier entries skipped because they were already visited
    pub skipped_visited: usize,

    /// Size of the visited set when the crawl ended
    pub visited: usize,

    /// The crawl was cancelled before its frontier was exhausted
    pub cancelled: bool,

    /// The crawl stopped at its page ceiling
    pub page_limit_hit: bool,

    /// Wall-clock duration of the crawl
    pub elapsed: Duration,
}

impl CrawlStatistics {
    /// Share of dispatched targets that produced a page, in percent
    pub fn success_rate(&self) -> f64 {
        if self.dispatched == 0 {
            return 0.0;
        }
        (self.pages_fetched as f64 / self.dispatched as f64) * 100.0
    }

    /// Human-readable completion status
    pub fn status(&self) -> &'static str {
        if self.cancelled {
            "cancelled"
        } else if self.page_limit_hit {
            "page limit reached"
        } else {
            "completed"
        }
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Status: {}", stats.status());
    println!("  Duration: {:.2}s", stats.elapsed.as_secs_f64());
    println!("  URLs visited: {}", stats.visited);
    println!();

    println!("Pages:");
    println!("  Fetched: {}", stats.pages_fetched);
    println!("  Failed: {}", stats.fetch_failures);
    println!("  Invalid URLs: {}", stats.invalid_urls);
    println!("  Skipped (already visited): {}", stats.skipped_visited);
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} pages successfully fetched)",
        stats.success_rate(),
        stats.pages_fetched,
        stats.dispatched
    );
}
