use crate::config::types::{Config, CrawlConfig, FilterConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
///
/// Performed once at load; the crawl engine assumes validated parameters
/// and treats violations as programming errors.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_filter_config(&config.filters)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawl configuration
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    // max_depth and timeout_seconds are unsigned, so no lower-bound check needed

    if let Some(parallelism) = config.parallelism {
        if parallelism < 1 {
            return Err(ConfigError::Validation(format!(
                "parallelism must be >= 1, got {}",
                parallelism
            )));
        }
    }

    for page in &config.start_pages {
        let url = Url::parse(page)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid start page '{}': {}", page, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "Start page '{}' must use an http or https scheme",
                page
            )));
        }
    }

    Ok(())
}

/// Validates filter configuration
///
/// Every pattern must compile here; nothing recompiles at crawl time.
fn validate_filter_config(config: &FilterConfig) -> Result<(), ConfigError> {
    for pattern in config.ignored_urls.iter().chain(&config.ignored_words) {
        validate_pattern(pattern)?;
    }
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if let Some(path) = &config.report_path {
        if path.is_empty() {
            return Err(ConfigError::Validation(
                "report_path cannot be empty".to_string(),
            ));
        }
    }
    Ok(())
}

/// Validates a single regular-expression pattern
fn validate_pattern(pattern: &str) -> Result<(), ConfigError> {
    if pattern.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Pattern cannot be empty".to_string(),
        ));
    }

    regex::Regex::new(pattern).map_err(|e| {
        ConfigError::InvalidPattern(format!("Pattern '{}' does not compile: {}", pattern, e))
    })?;

    Ok(())
}
