//! Crawl result packaging and report output
//!
//! The [`CrawlResult`] is built exactly once, after every crawl task has
//! completed. It serializes to a JSON document whose `wordCounts` object
//! preserves the ranking order, and prints as a human-readable summary.

use crate::output::ranker::rank_words;
use crate::CrawlError;
use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};
use std::collections::HashMap;
use std::path::Path;

/// The final outcome of a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlResult {
    /// Ranked word counts, bounded to the configured top-N
    pub word_counts: Vec<(String, u64)>,

    /// Number of distinct URLs that passed all filters and were fetched
    pub urls_visited: usize,
}

impl CrawlResult {
    /// Packages the raw crawl state into a result
    ///
    /// An empty word-count mapping bypasses the ranker entirely: ranking an
    /// empty mapping is a degenerate case the ranker need not handle.
    ///
    /// # Arguments
    ///
    /// * `counts` - The raw word-count mapping read from the crawl state
    /// * `urls_visited` - Size of the final visited set
    /// * `limit` - Top-N bound on the ranking
    pub fn package(counts: HashMap<String, u64>, urls_visited: usize, limit: usize) -> Self {
        if counts.is_empty() {
            return Self {
                word_counts: Vec::new(),
                urls_visited,
            };
        }

        Self {
            word_counts: rank_words(counts, limit),
            urls_visited,
        }
    }

    /// Looks up the ranked count for a word
    pub fn count_of(&self, word: &str) -> Option<u64> {
        self.word_counts
            .iter()
            .find(|(ranked, _)| ranked == word)
            .map(|(_, count)| *count)
    }
}

/// Serializes `wordCounts` as a JSON object in ranking order
struct OrderedCounts<'a>(&'a [(String, u64)]);

impl Serialize for OrderedCounts<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (word, count) in self.0 {
            map.serialize_entry(word, count)?;
        }
        map.end()
    }
}

impl Serialize for CrawlResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CrawlResult", 2)?;
        state.serialize_field("wordCounts", &OrderedCounts(&self.word_counts))?;
        state.serialize_field("urlsVisited", &self.urls_visited)?;
        state.end()
    }
}

/// The on-disk report document: the result plus provenance
struct ReportDocument<'a> {
    result: &'a CrawlResult,
    generated_at: DateTime<Utc>,
}

impl Serialize for ReportDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Report", 3)?;
        state.serialize_field("wordCounts", &OrderedCounts(&self.result.word_counts))?;
        state.serialize_field("urlsVisited", &self.result.urls_visited)?;
        state.serialize_field("generatedAt", &self.generated_at.to_rfc3339())?;
        state.end()
    }
}

/// Renders the JSON report document for a result
pub fn render_report(result: &CrawlResult) -> Result<String, CrawlError> {
    let document = ReportDocument {
        result,
        generated_at: Utc::now(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Writes the JSON report document to the given path
///
/// # Arguments
///
/// * `result` - The crawl result to report
/// * `path` - Destination file path
pub fn write_report(result: &CrawlResult, path: &Path) -> Result<(), CrawlError> {
    let rendered = render_report(result)?;
    std::fs::write(path, rendered)?;
    tracing::info!("Report written to {}", path.display());
    Ok(())
}

/// Prints the crawl summary to stdout
///
/// # Arguments
///
/// * `result` - The crawl result to display
pub fn print_report(result: &CrawlResult) {
    println!("=== Crawl Report ===\n");

    println!("URLs visited: {}", result.urls_visited);
    println!();

    if result.word_counts.is_empty() {
        println!("No words were counted.");
        return;
    }

    println!("Top words:");
    for (rank, (word, count)) in result.word_counts.iter().enumerate() {
        println!("  {:>3}. {} ({})", rank + 1, word, count);
    }
}
