//! Suggestion generation.
//!
//! Two mutually exclusive matching strategies turn typed query prefixes into
//! ranked [`Suggestion`]s drawn from one or more [`WordIndex`] sources:
//!
//! - [`exact`]: case-sensitive prefix matching with a camelCase escape hatch,
//!   scored by a composite relevance rating.
//! - [`fuzzy`]: case-insensitive subsequence matching scored by
//!   `nucleo-matcher`, ranked primarily by word frequency.
//!
//! Both strategies only ever look at the first-character buckets that can
//! contain a match for the query, so lookup cost stays proportional to one
//! letter's worth of vocabulary rather than the whole index.
//!
//! # Examples
//!
//! ```
//! use typeahead::config::MatchConfig;
//! use typeahead::index::WordIndex;
//! use typeahead::suggest::suggest;
//!
//! let mut index = WordIndex::new();
//! index.upsert("Corporate");
//! index.upsert("corporate");
//!
//! let config = MatchConfig::default();
//! let suggestions = suggest(&[&index], "Cor", &config);
//! assert_eq!(suggestions.len(), 1);
//! assert_eq!(suggestions[0].display_text, "Corporate");
//! ```

pub mod exact;
pub mod fold;
pub mod fuzzy;

use std::collections::hash_map::Entry;
use std::ops::Range;

use ahash::AHashMap;
use serde::Serialize;

use crate::config::{InsertionMode, MatchConfig};
use crate::index::WordIndex;

/// How a suggestion matched the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// The word starts with the query, or matched its camelCase anchors.
    Exact,
    /// The word contains the query's characters as a loose subsequence.
    Fuzzy,
}

/// A ranked completion candidate.
///
/// All fields are populated when the suggestion is constructed; consumers can
/// rely on them without re-deriving anything from the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    /// The stored word, case preserved.
    pub display_text: String,
    /// The text to insert on acceptance, with the query's casing applied per
    /// the configured [`InsertionMode`].
    pub insertion_text: String,
    /// Observation count backing this word, when the source tracks one.
    pub frequency: Option<u64>,
    /// Whether the match was exact or fuzzy.
    pub match_kind: MatchKind,
    /// Character index ranges of `display_text` matched by the query, merged
    /// into maximal contiguous runs.
    pub highlight_ranges: Vec<Range<usize>>,
    /// Relevance used for ordering. The exact strategy produces a composite
    /// score in `0.0..=100.0`; the fuzzy strategy a frequency-dominated rank
    /// value.
    pub rating: f64,
}

/// A deduplicated candidate drawn from the first-letter buckets that can
/// contain matches for the query.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate<'a> {
    pub(crate) text: &'a str,
    pub(crate) frequency: u64,
}

/// Generate ranked suggestions for `query` across `sources`.
///
/// Returns an empty list when matching is disabled or the query is shorter
/// than the configured trigger length. A word present in more than one source
/// is considered once, with the highest frequency any source reports for it.
pub fn suggest(sources: &[&WordIndex], query: &str, config: &MatchConfig) -> Vec<Suggestion> {
    if !config.enabled {
        return Vec::new();
    }
    let query_len = query.chars().count();
    if query_len == 0 || query_len < config.min_word_trigger_length {
        return Vec::new();
    }

    let pool = candidate_pool(sources, query, config.ignore_diacritics);
    let mut suggestions = if config.fuzzy_matching {
        fuzzy::suggest(&pool, query, config)
    } else {
        exact::suggest(&pool, query, config)
    };
    if config.max_suggestions > 0 && suggestions.len() > config.max_suggestions {
        suggestions.truncate(config.max_suggestions);
    }
    suggestions
}

/// Collect every candidate whose bucket character folds to the same letter as
/// the query's first character, deduplicated across sources.
///
/// Folding lowercases and, when `ignore_diacritics` is set, strips combining
/// marks, so a query starting with `e` reaches the `e` and `E` buckets and,
/// with diacritics ignored, `é`, `École` and friends as well.
fn candidate_pool<'a>(
    sources: &[&'a WordIndex],
    query: &str,
    ignore_diacritics: bool,
) -> Vec<Candidate<'a>> {
    let Some(first) = query.chars().next() else {
        return Vec::new();
    };
    let folded_first = fold::fold_char(first, ignore_diacritics);

    let mut frequencies: AHashMap<&'a str, u64> = AHashMap::new();
    let mut order: Vec<&'a str> = Vec::new();
    for source in sources {
        for bucket_char in source.bucket_chars() {
            if fold::fold_char(bucket_char, ignore_diacritics) != folded_first {
                continue;
            }
            for entry in source.bucket(bucket_char) {
                match frequencies.entry(entry.text.as_str()) {
                    Entry::Occupied(mut known) => {
                        let frequency = known.get_mut();
                        *frequency = (*frequency).max(entry.frequency);
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(entry.frequency);
                        order.push(entry.text.as_str());
                    }
                }
            }
        }
    }

    order
        .into_iter()
        .map(|text| Candidate {
            text,
            frequency: frequencies[text],
        })
        .collect()
}

/// Apply the query's casing pattern to `word`.
///
/// An all-uppercase query of at least two characters uppercases the whole
/// word, a query starting with an uppercase letter capitalizes only the first
/// character, and anything else lowercases the word.
pub fn apply_query_case(word: &str, query: &str) -> String {
    let query_chars: Vec<char> = query.chars().collect();
    if query_chars.len() >= 2 && query_chars.iter().all(|c| !c.is_lowercase()) {
        return word.to_uppercase();
    }
    match query_chars.first() {
        Some(first) if first.is_uppercase() => {
            let mut chars = word.chars();
            match chars.next() {
                Some(head) => head.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
        _ => word.to_lowercase(),
    }
}

/// Build the text inserted when a suggestion for `word` is accepted.
pub fn insertion_text(word: &str, query: &str, mode: InsertionMode) -> String {
    match mode {
        InsertionMode::ReplaceMatchingCase => apply_query_case(word, query),
        InsertionMode::ReplaceIgnoringCase => word.to_string(),
        InsertionMode::AppendRemainder => {
            let remainder: String = word.chars().skip(query.chars().count()).collect();
            format!("{query}{remainder}")
        }
    }
}

/// Merge character indices into maximal contiguous `[start, end)` runs.
pub(crate) fn merge_runs(indices: &[usize]) -> Vec<Range<usize>> {
    let mut sorted = indices.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut runs: Vec<Range<usize>> = Vec::new();
    for index in sorted {
        match runs.last_mut() {
            Some(run) if run.end == index => run.end = index + 1,
            _ => runs.push(index..index + 1),
        }
    }
    runs
}
