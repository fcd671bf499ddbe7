use crate::config::types::{Config, ContentConfig, CrawlerConfig, FetcherConfig, OutputConfig};
use crate::ConfigError;

/// Shallowest depth a user may request
pub const MIN_CRAWL_DEPTH: u32 = 1;

/// Deepest depth a user may request
pub const MAX_CRAWL_DEPTH: u32 = 5;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_content_config(&config.content)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if !(MIN_CRAWL_DEPTH..=MAX_CRAWL_DEPTH).contains(&config.max_depth) {
        return Err(ConfigError::Validation(format!(
            "max_depth must be between {} and {}, got {}",
            MIN_CRAWL_DEPTH, MAX_CRAWL_DEPTH, config.max_depth
        )));
    }

    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and 100, got {}",
            config.max_concurrent_fetches
        )));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.max_retries > 10 {
        return Err(ConfigError::Validation(format!(
            "max_retries must be <= 10, got {}",
            config.max_retries
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates text extraction configuration
fn validate_content_config(config: &ContentConfig) -> Result<(), ConfigError> {
    if config.snippet_length < 1 {
        return Err(ConfigError::Validation(
            "snippet_length must be >= 1".to_string(),
        ));
    }

    if config.highlight_open.is_empty() || config.highlight_close.is_empty() {
        return Err(ConfigError::Validation(
            "highlight markers cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.feedback_path.is_empty() {
        return Err(ConfigError::Validation(
            "feedback_path cannot be empty".to_string(),
        ));
    }

    if matches!(config.report_path.as_deref(), Some("")) {
        return Err(ConfigError::Validation(
            "report_path cannot be empty when set".to_string(),
        ));
    }

    Ok(())
}
