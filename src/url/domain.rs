use url::Url;

/// Extracts the lowercase host of a URL
///
/// Returns None when the URL has no host or an empty one (`file:///`,
/// `mailto:` and similar).
///
/// # Examples
///
/// ```
/// use url::Url;
/// use keyword_crawler::url::extract_host;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str()
        .filter(|h| !h.is_empty())
        .map(|h| h.to_lowercase())
}

/// Returns the network location of a URL: the host, plus `:port` when the
/// port is not the scheme default
///
/// # Examples
///
/// ```
/// use url::Url;
/// use keyword_crawler::url::network_location;
///
/// let url = Url::parse("http://127.0.0.1:8080/index.html").unwrap();
/// assert_eq!(network_location(&url), Some("127.0.0.1:8080".to_string()));
///
/// let url = Url::parse("https://example.com:443/").unwrap();
/// assert_eq!(network_location(&url), Some("example.com".to_string()));
/// ```
pub fn network_location(url: &Url) -> Option<String> {
    let host = extract_host(url)?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_host() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(extract_host(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_subdomain() {
        let url = Url::parse("https://blog.example.com/post").unwrap();
        assert_eq!(extract_host(&url), Some("blog.example.com".to_string()));
    }

    #[test]
    fn test_extract_mixed_case() {
        let url = Url::parse("https://Example.COM/").unwrap();
        assert_eq!(extract_host(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_no_host() {
        let url = Url::parse("mailto:user@example.com").unwrap();
        assert_eq!(extract_host(&url), None);
        assert_eq!(network_location(&url), None);
    }

    #[test]
    fn test_network_location_keeps_explicit_port() {
        let url = Url::parse("https://example.com:8080/path").unwrap();
        assert_eq!(network_location(&url), Some("example.com:8080".to_string()));
    }

    #[test]
    fn test_network_location_without_port() {
        let url = Url::parse("https://example.com/path?q=1#frag").unwrap();
        assert_eq!(network_location(&url), Some("example.com".to_string()));
    }
}
