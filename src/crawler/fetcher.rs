//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with a browser-like user agent
//! - URL validation before any request is sent
//! - GET requests to fetch page content
//! - Retry logic with an explicit backoff policy

use crate::config::FetcherConfig;
use crate::url::parse_absolute;
use crate::FetchError;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Delay policy applied between two fetch attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Retry immediately
    None,

    /// Wait the same delay after every failure
    Fixed { delay: Duration },

    /// Wait `base * n` after the n-th failure (2s, 4s, 6s for a 2s base)
    Linear { base: Duration },
}

impl Backoff {
    /// Delay to wait after the given failed attempt (1-based)
    pub fn delay(&self, failed_attempt: u32) -> Duration {
        match *self {
            Self::None => Duration::ZERO,
            Self::Fixed { delay } => delay,
            Self::Linear { base } => base.saturating_mul(failed_attempt),
        }
    }
}

/// How many times a failed fetch is retried and how long to wait in between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; total attempts is `max_retries + 1`
    pub max_retries: u32,
    pub backoff: Backoff,
}

impl RetryPolicy {
    pub fn total_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff: Backoff::Linear {
                base: Duration::from_secs(2),
            },
        }
    }
}

impl From<&FetcherConfig> for RetryPolicy {
    fn from(config: &FetcherConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            backoff: config.backoff_policy(),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetcher configuration (user agent and timeout)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use keyword_crawler::config::FetcherConfig;
/// use keyword_crawler::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout())
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages over HTTP, retrying transient failures
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    retry: RetryPolicy,
}

impl Fetcher {
    /// Creates a fetcher from configuration
    ///
    /// Fails with [`FetchError::Client`] if the HTTP client cannot be built.
    pub fn new(config: &FetcherConfig) -> Result<Self, FetchError> {
        Ok(Self::with_client(build_http_client(config)?, config.into()))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client, retry: RetryPolicy) -> Self {
        Self { client, retry }
    }

    /// Fetches a URL and returns its body as text
    ///
    /// # Retry Logic
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | No scheme or no network location | Immediate → `InvalidUrl`, no request sent |
    /// | HTTP 2xx | Return the body |
    /// | Any other HTTP status | Retry after backoff |
    /// | Timeout / connection / body error | Retry after backoff |
    /// | Retries exhausted | `Exhausted` with the last error |
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to fetch
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let target = parse_absolute(url).map_err(|e| {
            tracing::error!("Invalid URL: {} ({})", url, e);
            FetchError::InvalidUrl(url.to_string())
        })?;

        let attempts = self.retry.total_attempts();
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            match self.attempt(&target).await {
                Ok(body) => {
                    tracing::info!("Fetched {} successfully on attempt {}", url, attempt);
                    return Ok(body);
                }
                Err(e) => {
                    tracing::warn!("Attempt {} failed for {}: {}", attempt, url, e);
                    last_error = e;
                }
            }

            if attempt < attempts {
                let delay = self.retry.backoff.delay(attempt);
                if !delay.is_zero() {
                    tracing::debug!("Waiting {:?} before retrying {}", delay, url);
                    tokio::time::sleep(delay).await;
                }
            }
        }

        tracing::error!("All retries failed for {}", url);
        Err(FetchError::Exhausted {
            url: url.to_string(),
            attempts,
            last_error,
        })
    }

    /// Performs a single GET, describing any failure as text
    async fn attempt(&self, url: &Url) -> Result<String, String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| describe_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {}", status));
        }

        response.text().await.map_err(|e| describe_error(&e))
    }
}

/// Classifies a client error into a short description
fn describe_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        e.to_string()
    }
}
