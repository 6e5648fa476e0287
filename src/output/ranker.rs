//! Word-count ranking
//!
//! Converts the raw word-count mapping into the bounded, ordered top-N list
//! used by the report.

use std::collections::HashMap;

/// Ranks word counts and bounds the result to the top `limit` entries
///
/// Ordering: descending count; ties broken by descending word length (in
/// chars); further ties broken lexicographically ascending. Any consumer of
/// the ranked report relies on exactly this ordering.
///
/// # Arguments
///
/// * `counts` - The raw word-count mapping
/// * `limit` - Maximum number of entries in the ranking; zero yields an
///   empty ranking
pub fn rank_words(counts: HashMap<String, u64>, limit: usize) -> Vec<(String, u64)> {
    let mut ranked: Vec<(String, u64)> = counts.into_iter().collect();

    ranked.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| b.0.chars().count().cmp(&a.0.chars().count()))
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked.truncate(limit);

    ranked
}
