//! Lexicrawl: a bounded word-frequency web crawler
//!
//! This crate implements a deadline-limited, depth-bounded crawl over the link
//! graph reachable from a set of starting URLs, aggregating word occurrence
//! counts across every distinct page visited and ranking the most popular
//! words into a report.

pub mod config;
pub mod crawler;
pub mod filters;
pub mod output;

use thiserror::Error;

/// Main error type for lexicrawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Unexpected HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Crawl task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Report serialization error: {0}")]
    Report(#[from] serde_json::Error),

    #[error("IO error: {0}")]
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

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid pattern in config: {0}")]
    InvalidPattern(String),
}

/// Pattern-compilation errors
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("Failed to compile pattern '{pattern}': {source}")]
    Compile {
        pattern: String,
        source: regex::Error,
    },
}

/// Result type alias for lexicrawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlEngine, PageData, PageParser};
pub use filters::PatternSet;
pub use output::CrawlResult;
