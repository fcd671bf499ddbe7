//! Configuration module for keyword-crawler
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use keyword_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    BackoffKind, Config, ContentConfig, CrawlerConfig, FetcherConfig, LoggingConfig,
    OutputConfig, DEFAULT_USER_AGENT,
};

// Re-export parser and validation functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::{validate, MAX_CRAWL_DEPTH, MIN_CRAWL_DEPTH};
