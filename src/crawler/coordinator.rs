//! Crawl engine - concurrent crawl orchestration
//!
//! This module contains the concurrent crawl engine:
//! - Computing the crawl deadline and constructing the shared state
//! - Spawning one root crawl task per starting URL
//! - The recursive crawl task itself, which fans out one child task per
//!   discovered link and completes only once its whole subtree has
//! - Packaging the final state into a ranked [`CrawlResult`]
//!
//! Scheduling is delegated to the tokio worker pool: tasks suspend (rather
//! than block a worker) while awaiting children, so an unbounded fan-out of
//! subtasks cannot deadlock a fixed-size pool.

use crate::crawler::parser::PageParser;
use crate::crawler::state::CrawlState;
use crate::filters::PatternSet;
use crate::output::CrawlResult;
use crate::Result;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;

/// Clamps the requested worker count to the available hardware parallelism
///
/// With no request, the full hardware parallelism is used.
pub fn effective_parallelism(target: Option<usize>) -> usize {
    let hardware = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);

    match target {
        Some(requested) => requested.min(hardware),
        None => hardware,
    }
}

/// Everything a crawl task needs beyond its own URL and depth budget
///
/// Shared by every task in the forest. The deadline and pattern set are
/// read-only; `state` is the only shared mutable data in the engine.
struct TaskContext {
    deadline: Instant,
    state: Arc<CrawlState>,
    ignored_urls: Arc<PatternSet>,
    parser: Arc<dyn PageParser>,
}

/// The concurrent crawl engine
pub struct CrawlEngine {
    timeout: Duration,
    max_depth: u32,
    popular_word_count: usize,
    ignored_urls: Arc<PatternSet>,
    parser: Arc<dyn PageParser>,
}

impl CrawlEngine {
    /// Creates a new engine
    ///
    /// # Arguments
    ///
    /// * `timeout` - Wall-clock budget; no new task starts work past it
    /// * `max_depth` - Link depth budget for each starting URL
    /// * `popular_word_count` - Top-N bound on the ranked report
    /// * `ignored_urls` - Full-match patterns for URLs that must never be fetched
    /// * `parser` - The page parser shared by all tasks
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
            ignored_urls: Arc::new(ignored_urls),
            parser,
        }
    }

    /// Runs a complete crawl from the given starting URLs
    ///
    /// Computes `deadline = now + timeout`, creates one fresh [`CrawlState`],
    /// launches one root task per starting URL with the full depth budget,
    /// and blocks until every task in the transitive spawn forest has
    /// completed. The final state is read exactly once to build the result;
    /// the ranker is bypassed when no words were counted.
    ///
    /// # Arguments
    ///
    /// * `starting_urls` - The URLs the crawl starts from
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlResult)` - Ranked word counts and the distinct-URL count
    /// * `Err(CrawlError)` - A page failed to fetch or parse, or a task panicked
    pub async fn crawl(&self, starting_urls: &[String]) -> Result<CrawlResult> {
        let started = Instant::now();
        let deadline = started + self.timeout;
        let state = Arc::new(CrawlState::new());

        let ctx = Arc::new(TaskContext {
            deadline,
            state: Arc::clone(&state),
            ignored_urls: Arc::clone(&self.ignored_urls),
            parser: Arc::clone(&self.parser),
        });

        let mut roots = JoinSet::new();
        for url in starting_urls {
            roots.spawn(crawl_task(Arc::clone(&ctx), url.clone(), self.max_depth));
        }

        while let Some(joined) = roots.join_next().await {
            joined??;
        }

        let urls_visited = state.visited_count();
        let word_counts = state.word_counts_snapshot();

        tracing::info!(
            "Crawl completed: {} URLs visited, {} distinct words in {:?}",
            urls_visited,
            word_counts.len(),
            started.elapsed()
        );

        Ok(CrawlResult::package(
            word_counts,
            urls_visited,
            self.popular_word_count,
        ))
    }
}

/// One recursive unit of crawl work
///
/// Termination checks run in a fixed order, each completing the task with no
/// state mutation:
/// 1. depth budget exhausted
/// 2. deadline passed (advisory: it bounds new work, not in-flight fetches)
/// 3. URL matches an ignored pattern
/// 4. URL already claimed by another task ([`CrawlState::try_visit`] is the
///    atomic check-and-add; exactly one of N racing tasks proceeds)
///
/// Past the checks, the task parses the page, merges its word counts into
/// shared state, spawns one child per outbound link at `remaining_depth - 1`,
/// and completes only when all children (and, transitively, their subtrees)
/// have completed. Beyond the visited-set insert there is no inter-task
/// coordination.
fn crawl_task(
    ctx: Arc<TaskContext>,
    url: String,
    remaining_depth: u32,
) -> BoxFuture<'static, Result<()>> {
    async move {
        if remaining_depth == 0 {
            return Ok(());
        }
        if Instant::now() >= ctx.deadline {
            tracing::debug!("Deadline passed, not starting {}", url);
            return Ok(());
        }
        if ctx.ignored_urls.is_match(&url) {
            tracing::debug!("Ignored URL: {}", url);
            return Ok(());
        }
        if !ctx.state.try_visit(&url) {
            return Ok(());
        }

        tracing::debug!("Crawling {} (remaining depth {})", url, remaining_depth);
        let page = ctx.parser.parse(&url).await?;
        ctx.state.record_words(&page.word_counts);

        let mut children = JoinSet::new();
        for link in page.links {
            children.spawn(crawl_task(Arc::clone(&ctx), link, remaining_depth - 1));
        }

        while let Some(joined) = children.join_next().await {
            joined??;
        }

        Ok(())
    }
    .boxed()
}
