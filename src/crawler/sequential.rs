//! Sequential reference crawler
//!
//! Runs the same algorithm as the concurrent engine on ordinary
//! collections, descending depth-first: each link is fully explored (to
//! exhaustion or deadline) before its next sibling begins. For the same
//! input and an unbounded deadline its final word counts and visited count
//! are identical to the concurrent engine's; only wall-clock behavior under
//! a tight deadline differs, since the two have different work schedules.

use crate::crawler::parser::PageParser;
use crate::filters::PatternSet;
use crate::output::CrawlResult;
use crate::Result;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// The single-threaded reference crawler
pub struct SequentialCrawler {
    timeout: Duration,
    max_depth: u32,
    popular_word_count: usize,
    ignored_urls: PatternSet,
    parser: Arc<dyn PageParser>,
}

impl SequentialCrawler {
    /// Creates a new sequential crawler
    ///
    /// Takes the same parameters as the concurrent engine; see
    /// [`crate::crawler::CrawlEngine::new`].
    pub fn new(
        timeout: Duration,
        max_depth: u32,
        popular_word_count: usize,
        ignored_urls: PatternSet,
        parser: Arc<dyn PageParser>,
    ) -> Self {
        Self {
            timeout,
            max_depth,
            popular_word_count,
            ignored_urls,
            parser,
        }
    }

    /// Runs a complete crawl from the given starting URLs
    pub async fn crawl(&self, starting_urls: &[String]) -> Result<CrawlResult> {
        let deadline = Instant::now() + self.timeout;
        let mut counts = HashMap::new();
        let mut visited = HashSet::new();

        for url in starting_urls {
            self.crawl_internal(url.clone(), deadline, self.max_depth, &mut counts, &mut visited)
                .await?;
        }

        let urls_visited = visited.len();
        Ok(CrawlResult::package(
            counts,
            urls_visited,
            self.popular_word_count,
        ))
    }

    /// Depth-first recursive descent over the link graph
    ///
    /// Same termination checks, in the same order, as the concurrent crawl
    /// task; the visited insert needs no synchronization here.
    fn crawl_internal<'a>(
        &'a self,
        url: String,
        deadline: Instant,
        remaining_depth: u32,
        counts: &'a mut HashMap<String, u64>,
        visited: &'a mut HashSet<String>,
    ) -> BoxFuture<'a, Result<()>> {
        async move {
            if remaining_depth == 0 || Instant::now() >= deadline {
                return Ok(());
            }
            if self.ignored_urls.is_match(&url) {
                return Ok(());
            }
            if !visited.insert(url.clone()) {
                return Ok(());
            }

            let page = self.parser.parse(&url).await?;
            for (word, count) in &page.word_counts {
                *counts.entry(word.clone()).or_insert(0) += count;
            }

            for link in page.links {
                self.crawl_internal(link, deadline, remaining_depth - 1, &mut *counts, &mut *visited)
                    .await?;
            }

            Ok(())
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::testing::FixtureParser;

    fn crawler(parser: Arc<FixtureParser>, max_depth: u32) -> SequentialCrawler {
        SequentialCrawler::new(
            Duration::from_secs(3600),
            max_depth,
            10,
            PatternSet::default(),
            parser,
        )
    }

    #[tokio::test]
    async fn test_cycle_is_suppressed() {
        let parser = Arc::new(
            FixtureParser::new()
                .page("https://a", &[("cat", 1)], &["https://b"])
                .page("https://b", &[("cat", 2), ("dog", 1)], &["https://a"]),
        );

        let result = crawler(Arc::clone(&parser), 2)
            .crawl(&["https://a".to_string()])
            .await
            .unwrap();

        assert_eq!(result.urls_visited, 2);
        assert_eq!(result.count_of("cat"), Some(3));
        assert_eq!(result.count_of("dog"), Some(1));
        assert_eq!(parser.calls(), 2);
    }

    #[tokio::test]
    async fn test_depth_first_visit_order() {
        // a links to b then c; b links to d. Depth-first explores the whole
        // b subtree before c begins.
        let parser = Arc::new(
            FixtureParser::new()
                .page("https://a", &[], &["https://b", "https://c"])
                .page("https://b", &[], &["https://d"])
                .page("https://c", &[], &[])
                .page("https://d", &[], &[]),
        );

        crawler(Arc::clone(&parser), 3)
            .crawl(&["https://a".to_string()])
            .await
            .unwrap();

        assert_eq!(
            parser.call_order(),
            vec!["https://a", "https://b", "https://d", "https://c"]
        );
    }

    #[tokio::test]
    async fn test_zero_timeout_visits_nothing() {
        let parser = Arc::new(FixtureParser::new().page("https://a", &[("a", 1)], &[]));
        let crawler = SequentialCrawler::new(
            Duration::ZERO,
            5,
            10,
            PatternSet::default(),
            Arc::clone(&parser) as Arc<dyn PageParser>,
        );

        let result = crawler.crawl(&["https://a".to_string()]).await.unwrap();

        assert_eq!(result.urls_visited, 0);
        assert!(result.word_counts.is_empty());
        assert_eq!(parser.calls(), 0);
    }

    #[tokio::test]
    async fn test_ignored_url_skipped() {
        let parser = Arc::new(
            FixtureParser::new()
                .page("https://a", &[("a", 1)], &["https://b/private"])
                .page("https://b/private", &[("secret", 1)], &[]),
        );
        let ignored = PatternSet::compile(&["https://b/.*".to_string()]).unwrap();
        let crawler = SequentialCrawler::new(
            Duration::from_secs(3600),
            3,
            10,
            ignored,
            Arc::clone(&parser) as Arc<dyn PageParser>,
        );

        let result = crawler.crawl(&["https://a".to_string()]).await.unwrap();

        assert_eq!(result.urls_visited, 1);
        assert_eq!(result.count_of("secret"), None);
        assert_eq!(parser.calls(), 1);
    }
}
