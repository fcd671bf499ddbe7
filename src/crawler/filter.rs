//! Link filter: turns raw hrefs into the set of internal absolute URLs

use crate::url::ScopePolicy;
use crate::UrlError;
use std::collections::BTreeSet;
use url::Url;

/// Resolves hrefs against a page URL and keeps the ones inside the site
///
/// - Pure fragment links (`#...`) are dropped.
/// - Each remaining href is resolved against `base_url`; links that fail to
///   resolve are logged and skipped individually.
/// - Resolved URLs are kept when `policy` admits them relative to `base_url`.
///
/// The result is deduplicated and sorted, so traversal order is reproducible.
///
/// # Example
///
/// ```
/// use keyword_crawler::crawler::filter_internal;
/// use keyword_crawler::url::ScopePolicy;
///
/// let links = vec!["/about", "#top", "https://other.org/", "/about"];
/// let internal = filter_internal(&links, "https://example.com/", ScopePolicy::Substring);
/// assert_eq!(internal.into_iter().collect::<Vec<_>>(), vec!["https://example.com/about"]);
/// ```
pub fn filter_internal<S: AsRef<str>>(
    links: &[S],
    base_url: &str,
    policy: ScopePolicy,
) -> BTreeSet<String> {
    let base = match Url::parse(base_url) {
        Ok(base) => base,
        Err(e) => {
            tracing::warn!("Cannot filter links of invalid base URL {}: {}", base_url, e);
            return BTreeSet::new();
        }
    };

    let mut internal = BTreeSet::new();

    for link in links {
        let href = link.as_ref();

        if href.starts_with('#') {
            continue;
        }

        let absolute = match resolve_link(href, &base) {
            Ok(absolute) => absolute,
            Err(e) => {
                tracing::warn!("Skipping invalid link: {} | Error: {}", href, e);
                continue;
            }
        };

        if policy.admits(&base, &absolute) {
            internal.insert(absolute.to_string());
        } else {
            tracing::trace!("Skipping external link {}", absolute);
        }
    }

    internal
}

/// Resolves a single href against the page it was found on
pub fn resolve_link(href: &str, base: &Url) -> Result<Url, UrlError> {
    base.join(href.trim()).map_err(|e| UrlError::Resolution {
        href: href.to_string(),
        base: base.to_string(),
        message: e.to_string(),
    })
}
