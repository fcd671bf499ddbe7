use crate::crawler::Backoff;
use crate::url::ScopePolicy;
use serde::Deserialize;
use std::time::Duration;

/// Browser-like agent string; many sites reject default client agents
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/91.0 Safari/537.36";

/// Main configuration structure for keyword-crawler
///
/// Every section is optional in the TOML file; missing sections and keys fall
/// back to the values of [`Config::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub fetcher: FetcherConfig,
    pub content: ContentConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Maximum depth to crawl from the start URL
    pub max_depth: u32,

    /// Maximum number of fetches in flight at once
    pub max_concurrent_fetches: u32,

    /// Maximum number of URLs dispatched to the fetcher in one crawl
    pub max_pages: u32,

    /// Minimum time between two requests to the same host (milliseconds)
    pub min_host_interval_ms: u64,

    /// Which discovered links count as internal
    pub scope: ScopePolicy,
}

impl CrawlerConfig {
    pub fn min_host_interval(&self) -> Duration {
        Duration::from_millis(self.min_host_interval_ms)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            max_concurrent_fetches: 1,
            max_pages: 200,
            min_host_interval_ms: 100,
            scope: ScopePolicy::Substring,
        }
    }
}

/// Kind of delay applied between fetch attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackoffKind {
    Linear,
    Fixed,
    None,
}

/// HTTP fetching configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FetcherConfig {
    /// Retries after the first failed attempt
    pub max_retries: u32,

    pub backoff: BackoffKind,

    /// Base delay of the backoff policy (milliseconds)
    pub backoff_base_ms: u64,

    /// Per-request timeout (seconds)
    pub timeout_secs: u64,

    pub user_agent: String,
}

impl FetcherConfig {
    /// Builds the backoff policy described by this section
    pub fn backoff_policy(&self) -> Backoff {
        let base = Duration::from_millis(self.backoff_base_ms);
        match self.backoff {
            BackoffKind::Linear => Backoff::Linear { base },
            BackoffKind::Fixed => Backoff::Fixed { delay: base },
            BackoffKind::None => Backoff::None,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff: BackoffKind::Linear,
            backoff_base_ms: 2000,
            timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Text extraction and highlighting configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ContentConfig {
    /// Maximum characters of visible text shown per page
    pub snippet_length: usize,

    pub highlight_open: String,

    pub highlight_close: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            snippet_length: 500,
            highlight_open: "<mark>".to_string(),
            highlight_close: "</mark>".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Path to the JSON feedback log
    pub feedback_path: String,

    /// Path to the markdown crawl report, if one should be written
    pub report_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            feedback_path: "feedback_data.json".to_string(),
            report_path: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// File receiving a copy of every log line
    pub file: Option<String>,
}
