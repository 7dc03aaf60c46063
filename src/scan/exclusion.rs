//! Exclusion zones: document regions the scanner skips wholesale.

use std::ops::Range;

use regex::Regex;

use crate::error::{Result, TypeaheadError};

/// Default exclusion patterns: fenced code blocks, inline code spans, block
/// math, inline math, bracketed link targets, and bare URLs.
pub fn default_exclusion_patterns() -> Vec<String> {
    vec![
        r"(?s)```.*?```".to_string(),
        r"`[^`\n]*`".to_string(),
        r"(?s)\$\$.*?\$\$".to_string(),
        r"\$[^$\n]+\$".to_string(),
        r"\]\([^)\n]*\)".to_string(),
        r"https?://[^\s)\]>]+".to_string(),
    ]
}

/// A compiled set of exclusion patterns.
///
/// Construction compiles every pattern eagerly, so a bad user-supplied
/// pattern surfaces as a configuration error instead of silently matching
/// nothing.
#[derive(Debug, Clone)]
pub struct ExclusionPatterns {
    patterns: Vec<Regex>,
}

impl ExclusionPatterns {
    /// Compile the given patterns.
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut compiled = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let regex = Regex::new(pattern).map_err(|e| {
                TypeaheadError::invalid_config(format!(
                    "invalid exclusion pattern {pattern:?}: {e}"
                ))
            })?;
            compiled.push(regex);
        }
        Ok(ExclusionPatterns { patterns: compiled })
    }

    /// Collect every exclusion match in `text` as merged, sorted byte ranges.
    ///
    /// Overlapping and adjacent matches from different patterns collapse into
    /// one range, so callers can skip each range with a single comparison.
    pub fn mask(&self, text: &str) -> Vec<Range<usize>> {
        let mut ranges: Vec<Range<usize>> = Vec::new();
        for regex in &self.patterns {
            for mat in regex.find_iter(text) {
                if mat.start() < mat.end() {
                    ranges.push(mat.start()..mat.end());
                }
            }
        }
        merge_ranges(ranges)
    }
}

impl Default for ExclusionPatterns {
    fn default() -> Self {
        Self::new(&default_exclusion_patterns()).expect("default exclusion patterns should be valid")
    }
}

fn merge_ranges(mut ranges: Vec<Range<usize>>) -> Vec<Range<usize>> {
    ranges.sort_by_key(|r| (r.start, r.end));

    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => {
                last.end = last.end.max(range.end);
            }
            _ => merged.push(range),
        }
    }
    merged
}
