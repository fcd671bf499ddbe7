//! Output module for crawl reports
//!
//! This module handles:
//! - Accumulating crawl statistics
//! - Printing statistics to the terminal
//! - Generating markdown reports of crawl results

mod markdown;
pub mod stats;

pub use markdown::{format_markdown_report, write_markdown_report};
pub use stats::{print_statistics, CrawlStatistics};
