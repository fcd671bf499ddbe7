/// Checks if a host is the base host itself or one of its subdomains
///
/// Both arguments are expected to be lowercase already.
///
/// # Examples
///
/// ```
/// use keyword_crawler::url::matches_host_or_subdomain;
///
/// assert!(matches_host_or_subdomain("example.com", "example.com"));
/// assert!(matches_host_or_subdomain("example.com", "api.v2.example.com"));
/// assert!(!matches_host_or_subdomain("example.com", "notexample.com"));
/// ```
pub fn matches_host_or_subdomain(base: &str, candidate: &str) -> bool {
    if base.is_empty() {
        return false;
    }
    candidate == base || candidate.ends_with(&format!(".{}", base))
}
