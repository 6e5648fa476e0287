//! Filtering module for lexicrawl
//!
//! Provides the compiled full-match pattern sets used to exclude URLs from
//! the crawl and words from the counts. URLs are compared by exact string
//! equality everywhere else; no normalization is applied.

mod patterns;

pub use patterns::PatternSet;
