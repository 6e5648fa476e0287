//! Crawler module for page fetching and crawl orchestration
//!
//! This module contains the core crawling logic, including:
//! - The concurrent crawl engine (recursive task fan-out over a worker pool)
//! - The sequential reference crawler
//! - Shared crawl state (visited set, word counts)
//! - HTTP fetching and page parsing

mod coordinator;
mod fetcher;
mod parser;
mod sequential;
mod state;

pub use coordinator::{effective_parallelism, CrawlEngine};
pub use fetcher::{build_http_client, fetch_page, FetchedPage};
pub use parser::{parse_page, HtmlPageParser, PageData, PageParser};
pub use sequential::SequentialCrawler;
pub use state::CrawlState;

use crate::config::{Config, Implementation};
use crate::filters::PatternSet;
use crate::output::CrawlResult;
use crate::Result;
use std::sync::Arc;
use std::time::Duration;

/// Runs a complete crawl as described by the configuration
///
/// Compiles the filter patterns, builds the production HTML page parser, and
/// dispatches to the engine the configuration selects.
///
/// # Arguments
///
/// * `config` - The validated crawl configuration
///
/// # Returns
///
/// * `Ok(CrawlResult)` - Crawl completed
/// * `Err(CrawlError)` - A page failed to fetch or parse
pub async fn crawl(config: &Config) -> Result<CrawlResult> {
    let ignored_urls = PatternSet::compile(&config.filters.ignored_urls)?;
    let ignored_words = PatternSet::compile(&config.filters.ignored_words)?;
    let parser: Arc<dyn PageParser> = Arc::new(HtmlPageParser::new(ignored_words)?);

    let timeout = Duration::from_secs(config.crawl.timeout_seconds);

    match config.crawl.implementation {
        Implementation::Parallel => {
            let engine = CrawlEngine::new(
                timeout,
                config.crawl.max_depth,
                config.crawl.popular_word_count,
                ignored_urls,
                parser,
            );
            engine.crawl(&config.crawl.start_pages).await
        }
        Implementation::Sequential => {
            let crawler = SequentialCrawler::new(
                timeout,
                config.crawl.max_depth,
                config.crawl.popular_word_count,
                ignored_urls,
                parser,
            );
            crawler.crawl(&config.crawl.start_pages).await
        }
    }
}
