//! Case-sensitive prefix matching with camelCase anchor support.
//!
//! A candidate is accepted when it starts with the query character for
//! character (diacritic variants optionally allowed, case never), or when the
//! query matches the word's camelCase anchors ("gUN" against "getUserName").
//! Accepted candidates are ordered by [`exact_match_rating`].

use std::cmp::Ordering;

use crate::config::MatchConfig;

use super::fold;
use super::{Candidate, MatchKind, Suggestion};

pub(super) fn suggest(
    pool: &[Candidate<'_>],
    query: &str,
    config: &MatchConfig,
) -> Vec<Suggestion> {
    let query_chars: Vec<char> = query.chars().collect();

    let mut suggestions: Vec<Suggestion> = Vec::new();
    for candidate in pool {
        let word_chars: Vec<char> = candidate.text.chars().collect();
        let prefix = is_case_sensitive_prefix(&word_chars, &query_chars, config.ignore_diacritics);
        let highlight_ranges = if prefix {
            vec![0..query_chars.len()]
        } else if let Some(positions) = camel_anchor_positions(&word_chars, &query_chars) {
            super::merge_runs(&positions)
        } else {
            continue;
        };

        suggestions.push(Suggestion {
            display_text: candidate.text.to_string(),
            insertion_text: super::insertion_text(candidate.text, query, config.insertion_mode),
            frequency: Some(candidate.frequency),
            match_kind: MatchKind::Exact,
            highlight_ranges,
            rating: exact_match_rating(candidate.text, query, candidate.frequency),
        });
    }

    suggestions.sort_by(|a, b| {
        b.rating
            .partial_cmp(&a.rating)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.display_text.cmp(&b.display_text))
    });
    suggestions
}

/// Score a word against a query, higher is better, bounded to `0.0..=100.0`.
///
/// The score blends five signals: how often the word has been observed, how
/// well the casing agrees (with bonuses for a verbatim prefix and for
/// camelCase/PascalCase anchor matches), how much of the word the query
/// already covers, how few characters remain to complete, and how short the
/// word is overall.
pub fn exact_match_rating(word: &str, query: &str, frequency: u64) -> f64 {
    let word_chars: Vec<char> = word.chars().collect();
    let query_chars: Vec<char> = query.chars().collect();
    if word_chars.is_empty() || query_chars.is_empty() {
        return 0.0;
    }
    let word_len = word_chars.len() as f64;
    let query_len = query_chars.len() as f64;

    let frequency_score = (frequency as f64 / 100.0 * 40.0).min(40.0);

    let mut case_bonus: f64 = 0.0;
    if word.starts_with(query) {
        case_bonus += 300.0;
    }
    for (w, q) in word_chars.iter().zip(&query_chars) {
        if w == q {
            case_bonus += 10.0;
        } else if w.is_alphabetic()
            && q.is_alphabetic()
            && fold::chars_match_ignore_case(*w, *q, false)
        {
            case_bonus -= 5.0;
        }
    }
    if camel_anchor_positions(&word_chars, &query_chars).is_some() {
        case_bonus += 100.0;
        if is_pascal_case(&word_chars) {
            case_bonus += 100.0;
        }
    }
    let case_score = ((case_bonus + 50.0) / 550.0 * 15.0).clamp(0.0, 15.0);

    let completion_score = query_len / word_len * 20.0;
    let efficiency_score = ((50.0 - (word_len - query_len)) / 50.0 * 10.0).clamp(0.0, 10.0);
    let length_score = ((50.0 - word_len) / 47.0 * 10.0).clamp(0.0, 10.0);

    (frequency_score + case_score + completion_score + efficiency_score + length_score)
        .clamp(0.0, 100.0)
}

/// Check that every query character matches the word at the same position
/// with identical case. Diacritic variants count as matching only when
/// `ignore_diacritics` is set.
fn is_case_sensitive_prefix(word: &[char], query: &[char], ignore_diacritics: bool) -> bool {
    word.len() >= query.len()
        && query
            .iter()
            .zip(word)
            .all(|(q, w)| fold::chars_match_exact(*w, *q, ignore_diacritics))
}

/// Walk the word consuming query characters against camelCase anchors: the
/// first character and every uppercase character. Anchors that do not match
/// the next query character are skipped. Returns the matched word positions
/// when the whole query was consumed.
fn camel_anchor_positions(word: &[char], query: &[char]) -> Option<Vec<usize>> {
    if query.is_empty() {
        return None;
    }
    let mut positions = Vec::with_capacity(query.len());
    let mut next = 0;
    for (i, w) in word.iter().enumerate() {
        if next == query.len() {
            break;
        }
        let anchor = i == 0 || w.is_uppercase();
        if anchor && fold::chars_match_ignore_case(*w, query[next], false) {
            positions.push(i);
            next += 1;
        }
    }
    (next == query.len()).then_some(positions)
}

/// PascalCase words start uppercase and still contain at least one lowercase
/// letter, which keeps all-caps acronyms out.
fn is_pascal_case(word: &[char]) -> bool {
    word.first().is_some_and(|c| c.is_uppercase()) && word.iter().any(|c| c.is_lowercase())
}
