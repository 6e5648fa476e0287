//! Shared crawl state
//!
//! One `CrawlState` exists per crawl invocation. Every crawl task mutates it
//! concurrently; the orchestrator reads it exactly once after the whole task
//! forest has completed. The visited set doubles as the cycle-breaker for
//! the link graph: no separate traversal structure is needed.

use dashmap::{DashMap, DashSet};
use std::collections::HashMap;

/// Thread-safe accumulator for visited URLs and running word counts
#[derive(Debug, Default)]
pub struct CrawlState {
    /// Distinct URLs that have been claimed for processing
    visited: DashSet<String>,

    /// Cumulative word occurrence counts across all visited pages
    word_counts: DashMap<String, u64>,
}

impl CrawlState {
    /// Creates a fresh, empty crawl state
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claims a URL for processing
    ///
    /// The membership test and the insert are a single check-and-add: when
    /// several tasks race on the same URL, exactly one observes `true` and
    /// proceeds to fetch it. This is the only correctness-critical
    /// synchronization point in the engine.
    ///
    /// # Returns
    ///
    /// * `true` - The URL was not yet visited; the caller now owns it
    /// * `false` - Another task already claimed the URL
    pub fn try_visit(&self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    /// Merges a page's word counts into the shared totals
    ///
    /// Each addition happens under the per-key entry guard, so concurrent
    /// merges of overlapping word sets cannot lose updates.
    pub fn record_words(&self, counts: &HashMap<String, u64>) {
        for (word, count) in counts {
            *self.word_counts.entry(word.clone()).or_insert(0) += count;
        }
    }

    /// Returns the number of distinct URLs visited so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Snapshots the word-count totals into an ordinary map
    ///
    /// Only meaningful after all tasks have completed; taking the snapshot
    /// while tasks are still merging would tear across shards.
    pub fn word_counts_snapshot(&self) -> HashMap<String, u64> {
        self.word_counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}
