use crate::PatternError;
use regex::Regex;

/// An ordered set of full-match patterns compiled once at crawl start
///
/// Used for both ignored URLs and ignored words. Matching is full-match,
/// not substring: a pattern excludes a candidate only when it matches the
/// entire string. The set is read-only for the duration of the crawl, so it
/// can be shared across tasks without locking.
#[derive(Debug, Default)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// Compiles a sequence of pattern strings into a full-match set
    ///
    /// Each pattern is anchored as `^(?:pattern)$` so that partial matches
    /// never exclude a candidate.
    ///
    /// # Arguments
    ///
    /// * `patterns` - The raw pattern strings
    ///
    /// # Returns
    ///
    /// * `Ok(PatternSet)` - All patterns compiled
    /// * `Err(PatternError)` - The first pattern that failed to compile
    pub fn compile(patterns: &[String]) -> Result<Self, PatternError> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| {
                    PatternError::Compile {
                        pattern: pattern.clone(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Returns true if the candidate fully matches any pattern in the set
    pub fn is_match(&self, candidate: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(candidate))
    }

    /// Returns the number of patterns in the set
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
