//! URL handling module for keyword-crawler
//!
//! This module provides URL validation, network-location extraction and the
//! policy deciding which discovered links belong to the crawled site.

mod domain;
mod matcher;

use crate::{UrlError, UrlResult};
use serde::Deserialize;
use url::Url;

// Re-export main functions
pub use domain::{extract_host, network_location};
pub use matcher::matches_host_or_subdomain;

/// Checks that a URL has both a scheme and a network location
///
/// Relative references, `mailto:`-style URLs and empty strings are rejected.
///
/// # Examples
///
/// ```
/// use keyword_crawler::url::is_valid_url;
///
/// assert!(is_valid_url("https://example.com/page"));
/// assert!(!is_valid_url("example.com/page"));
/// assert!(!is_valid_url("mailto:someone@example.com"));
/// ```
pub fn is_valid_url(url: &str) -> bool {
    parse_absolute(url).is_ok()
}

/// Parses a URL, requiring a scheme and a network location
pub fn parse_absolute(url: &str) -> UrlResult<Url> {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(::url::ParseError::RelativeUrlWithoutBase) => {
            return Err(UrlError::MissingScheme(url.to_string()))
        }
        Err(e) => return Err(UrlError::Parse(format!("{}: {}", url, e))),
    };

    if parsed.scheme().is_empty() {
        return Err(UrlError::MissingScheme(url.to_string()));
    }

    if network_location(&parsed).is_none() {
        return Err(UrlError::MissingHost(url.to_string()));
    }

    Ok(parsed)
}

/// Policy deciding whether a discovered URL is internal to the crawled site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScopePolicy {
    /// The candidate network location contains the base one as a substring.
    ///
    /// Subdomains are admitted, but so is `example.com.evil.net` for a base of
    /// `example.com`.
    #[default]
    Substring,

    /// The candidate host equals the base host or is one of its subdomains,
    /// and the ports agree.
    ExactOrSubdomain,
}

impl ScopePolicy {
    /// Returns true if `candidate` belongs to the site rooted at `base`
    pub fn admits(&self, base: &Url, candidate: &Url) -> bool {
        match self {
            Self::Substring => match (network_location(base), network_location(candidate)) {
                (Some(base_loc), Some(candidate_loc)) => candidate_loc.contains(&base_loc),
                _ => false,
            },
            Self::ExactOrSubdomain => match (extract_host(base), extract_host(candidate)) {
                (Some(base_host), Some(candidate_host)) => {
                    base.port_or_known_default() == candidate.port_or_known_default()
                        && matches_host_or_subdomain(&base_host, &candidate_host)
                }
                _ => false,
            },
        }
    }
}
