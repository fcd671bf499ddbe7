//! keyword-crawler: a depth-bounded site crawler with keyword highlighting
//!
//! This crate crawls a site starting from one URL, following only links that
//! stay on the starting domain, then extracts the readable text of every page
//! it fetched and marks occurrences of search terms in it.

pub mod config;
pub mod content;
pub mod crawler;
pub mod feedback;
pub mod output;
pub mod session;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for keyword-crawler operations
#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Feedback store error: {0}")]
    Feedback(#[from] FeedbackError),

    #[error("Invalid crawl request: {0}")]
    Request(#[from] RequestError),

    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors produced while fetching a single page
#[derive(Debug, Error)]
pub enum FetchError {
    /// The target lacks a scheme or a network location; nothing was sent
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Every attempt failed
    #[error("All {attempts} attempts failed for {url}: {last_error}")]
    Exhausted {
        url: String,
        attempts: u32,
        last_error: String,
    },

    #[error("Fetch of {0} was cancelled")]
    Cancelled(String),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Missing scheme in URL: {0}")]
    MissingScheme(String),

    #[error("Missing network location in URL: {0}")]
    MissingHost(String),

    /// A single href could not be resolved against its page URL
    #[error("Cannot resolve link '{href}' against {base}: {message}")]
    Resolution {
        href: String,
        base: String,
        message: String,
    },
}

/// HTML parsing errors
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

/// Feedback persistence errors
#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("Failed to access feedback file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialize feedback: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Relevance label must be 0 or 1, got {0}")]
    InvalidLabel(u8),
}

/// Caller misuse when building a crawl request
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Start URL cannot be empty")]
    EmptyUrl,

    #[error("Crawl depth must be between {min} and {max}, got {depth}")]
    DepthOutOfRange { depth: i64, min: u32, max: u32 },
}

/// Result type alias for keyword-crawler operations
pub type Result<T> = std::result::Result<T, CrawlerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use content::{extract_visible_text, Highlighter};
pub use crawler::{CrawlReport, Crawler, PageResult};
pub use feedback::{FeedbackRecord, FeedbackStore, JsonFeedbackStore, Relevance};
pub use session::{run_session, CrawlRequest};
pub use url::{is_valid_url, network_location, ScopePolicy};
