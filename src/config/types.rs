use serde::Deserialize;

/// Main configuration structure for lexicrawl
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub filters: FilterConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// URLs the crawl starts from
    #[serde(rename = "start-pages")]
    pub start_pages: Vec<String>,

    /// Maximum link depth to follow from a start page
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Wall-clock budget for the crawl, in seconds
    #[serde(rename = "timeout-seconds")]
    pub timeout_seconds: u64,

    /// Number of top-ranked words to include in the report
    #[serde(rename = "popular-word-count")]
    pub popular_word_count: usize,

    /// Target worker count; clamped to available hardware parallelism.
    /// Defaults to the hardware parallelism when omitted.
    #[serde(default)]
    pub parallelism: Option<usize>,

    /// Which crawl engine to run
    #[serde(default)]
    pub implementation: Implementation,
}

/// Selects the crawl engine implementation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Implementation {
    /// Concurrent engine on the worker pool
    #[default]
    Parallel,

    /// Single-threaded depth-first reference engine
    Sequential,
}

/// URL and word filtering configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterConfig {
    /// Full-match regular expressions for URLs that must never be fetched
    #[serde(rename = "ignored-urls", default)]
    pub ignored_urls: Vec<String>,

    /// Full-match regular expressions for words excluded from counting
    #[serde(rename = "ignored-words", default)]
    pub ignored_words: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Path the JSON crawl report is written to; stdout summary only when unset
    #[serde(rename = "report-path", default)]
    pub report_path: Option<String>,
}
