//! Case-insensitive subsequence matching backed by `nucleo-matcher`.
//!
//! Every candidate containing the query's characters in order is scored, but
//! ranking is dominated by word frequency: the matcher score only breaks ties
//! between words of similar popularity, and longer words lose out slightly.
//! Candidates that begin with the query (ignoring case) are flagged
//! [`MatchKind::Exact`] and always sort ahead of loose subsequence hits.

use std::cmp::Ordering;

use nucleo_matcher::pattern::{Atom, AtomKind, CaseMatching, Normalization};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use crate::config::MatchConfig;

use super::fold;
use super::{Candidate, MatchKind, Suggestion};

pub(super) fn suggest(
    pool: &[Candidate<'_>],
    query: &str,
    config: &MatchConfig,
) -> Vec<Suggestion> {
    let normalization = if config.ignore_diacritics {
        Normalization::Smart
    } else {
        Normalization::Never
    };
    let needle = Atom::new(
        query,
        CaseMatching::Ignore,
        normalization,
        AtomKind::Fuzzy,
        false,
    );
    let mut matcher = Matcher::new(Config::DEFAULT);
    let folded_query = fold::fold(query, config.ignore_diacritics);

    let mut utf32buf = Vec::new();
    let mut indices: Vec<u32> = Vec::new();
    let mut suggestions: Vec<Suggestion> = Vec::new();
    for candidate in pool {
        indices.clear();
        let haystack = Utf32Str::new(candidate.text, &mut utf32buf);
        let Some(score) = needle.indices(haystack, &mut matcher, &mut indices) else {
            continue;
        };

        let word_len = candidate.text.chars().count();
        let rating = f64::from(score) + candidate.frequency as f64 * 1000.0 - word_len as f64;
        let is_prefix = fold::fold(candidate.text, config.ignore_diacritics)
            .starts_with(&folded_query);
        let positions: Vec<usize> = indices.iter().map(|i| *i as usize).collect();

        suggestions.push(Suggestion {
            display_text: candidate.text.to_string(),
            insertion_text: super::insertion_text(candidate.text, query, config.insertion_mode),
            frequency: Some(candidate.frequency),
            match_kind: if is_prefix {
                MatchKind::Exact
            } else {
                MatchKind::Fuzzy
            },
            highlight_ranges: super::merge_runs(&positions),
            rating,
        });
    }

    suggestions.sort_by(|a, b| {
        group(a)
            .cmp(&group(b))
            .then_with(|| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal))
            .then_with(|| a.display_text.cmp(&b.display_text))
    });
    suggestions
}

fn group(suggestion: &Suggestion) -> u8 {
    match suggestion.match_kind {
        MatchKind::Exact => 0,
        MatchKind::Fuzzy => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fuzzy_config() -> MatchConfig {
        MatchConfig {
            fuzzy_matching: true,
            ..MatchConfig::default()
        }
    }

    fn run(pool: &[(&str, u64)], query: &str, config: &MatchConfig) -> Vec<Suggestion> {
        let candidates: Vec<Candidate<'_>> = pool
            .iter()
            .map(|(text, frequency)| Candidate {
                text,
                frequency: *frequency,
            })
            .collect();
        suggest(&candidates, query, config)
    }

    #[test]
    fn test_subsequence_match() {
        let config = fuzzy_config();
        let suggestions = run(&[("obsidian", 3)], "obsdn", &config);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].display_text, "obsidian");
        assert_eq!(suggestions[0].match_kind, MatchKind::Fuzzy);
        assert_eq!(suggestions[0].frequency, Some(3));
    }

    #[test]
    fn test_non_subsequence_is_rejected() {
        let config = fuzzy_config();
        assert!(run(&[("obsidian", 3)], "obsx", &config).is_empty());
        // Order matters: characters must appear left to right.
        assert!(run(&[("obsidian", 3)], "osbd", &config).is_empty());
    }

    #[test]
    fn test_matching_ignores_case() {
        let config = fuzzy_config();
        let suggestions = run(&[("corporate", 1)], "COR", &config);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].display_text, "corporate");
        // Case transfer still applies on insertion.
        assert_eq!(suggestions[0].insertion_text, "CORPORATE");
    }

    #[test]
    fn test_prefix_matches_sort_ahead_of_subsequence_matches() {
        let config = fuzzy_config();
        // "order" matches "odr" only as a subsequence; even a much higher
        // frequency cannot lift it above the prefix match.
        let suggestions = run(&[("order", 90), ("odradek", 1)], "odr", &config);

        let texts: Vec<&str> = suggestions.iter().map(|s| s.display_text.as_str()).collect();
        assert_eq!(texts, vec!["odradek", "order"]);
        assert_eq!(suggestions[0].match_kind, MatchKind::Exact);
        assert_eq!(suggestions[1].match_kind, MatchKind::Fuzzy);
    }

    #[test]
    fn test_frequency_dominates_within_a_group() {
        let config = fuzzy_config();
        let suggestions = run(&[("window", 2), ("winter", 40)], "win", &config);
        let texts: Vec<&str> = suggestions.iter().map(|s| s.display_text.as_str()).collect();
        assert_eq!(texts, vec!["winter", "window"]);
    }

    #[test]
    fn test_shorter_word_wins_at_equal_frequency() {
        let config = fuzzy_config();
        let suggestions = run(&[("elephantine", 3), ("elephant", 3)], "elephant", &config);
        assert_eq!(suggestions[0].display_text, "elephant");
    }

    #[test]
    fn test_highlight_ranges_merge_contiguous_indices() {
        let config = fuzzy_config();
        let suggestions = run(&[("obsidian", 1)], "obsdn", &config);

        // o, b, s at 0..3, then d at 4 and n at 7.
        assert_eq!(suggestions[0].highlight_ranges, vec![0..3, 4..5, 7..8]);
    }

    #[test]
    fn test_diacritic_insensitive_subsequence() {
        let pool = [("résumé", 2)];
        let mut config = fuzzy_config();

        assert!(run(&pool, "resume", &config).is_empty());

        config.ignore_diacritics = true;
        let suggestions = run(&pool, "resume", &config);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].match_kind, MatchKind::Exact);
    }
}
