//! Word tokenizer for scanned documents.

use std::ops::Range;

/// Characters that join two alphanumeric neighbors into one word.
const JOINERS: [char; 4] = ['-', '\'', '_', '.'];

fn is_joiner(c: char) -> bool {
    JOINERS.contains(&c)
}

/// Cursor over sorted, disjoint byte ranges, queried in ascending position
/// order.
struct MaskCursor<'a> {
    ranges: &'a [Range<usize>],
    idx: usize,
}

impl<'a> MaskCursor<'a> {
    fn new(ranges: &'a [Range<usize>]) -> Self {
        MaskCursor { ranges, idx: 0 }
    }

    fn contains(&mut self, pos: usize) -> bool {
        while self.idx < self.ranges.len() && self.ranges[self.idx].end <= pos {
            self.idx += 1;
        }
        self.idx < self.ranges.len() && self.ranges[self.idx].start <= pos
    }
}

/// Splits document text into words.
///
/// A word is a maximal run of alphanumeric characters (any script), where
/// `-`, `'`, `_` and `.` additionally join two alphanumeric neighbors, so
/// "well-known", "don't", "snake_case" and "file.txt" each stay one word.
/// Leading and trailing joiners never attach. Words shorter than the
/// configured minimum length are dropped.
#[derive(Debug, Clone)]
pub struct WordTokenizer {
    min_word_length: usize,
}

impl WordTokenizer {
    /// Create a tokenizer keeping words of at least `min_word_length` chars.
    pub fn new(min_word_length: usize) -> Self {
        WordTokenizer { min_word_length }
    }

    /// Tokenize `text`, skipping the (sorted, disjoint) masked byte ranges.
    pub fn tokenize<'a>(&self, text: &'a str, mask: &[Range<usize>]) -> Vec<&'a str> {
        let mut words = Vec::new();
        let mut cursor = MaskCursor::new(mask);
        let mut chars = text.char_indices().peekable();

        // Start offset of the current word, and the byte end of its last
        // alphanumeric character; joiners only count once the next
        // alphanumeric arrives, so a trailing joiner is dropped for free.
        let mut start: Option<usize> = None;
        let mut end = 0usize;

        while let Some((i, c)) = chars.next() {
            if cursor.contains(i) {
                self.flush(text, start.take(), end, &mut words);
                continue;
            }

            if c.is_alphanumeric() {
                if start.is_none() {
                    start = Some(i);
                }
                end = i + c.len_utf8();
            } else if is_joiner(c) && start.is_some() && end == i {
                let joins = matches!(
                    chars.peek(),
                    Some(&(next_pos, next)) if next.is_alphanumeric() && !cursor.contains(next_pos)
                );
                if !joins {
                    self.flush(text, start.take(), end, &mut words);
                }
            } else {
                self.flush(text, start.take(), end, &mut words);
            }
        }
        self.flush(text, start.take(), end, &mut words);

        words
    }

    fn flush<'a>(
        &self,
        text: &'a str,
        start: Option<usize>,
        end: usize,
        words: &mut Vec<&'a str>,
    ) {
        let Some(start) = start else {
            return;
        };
        let word = &text[start..end];
        if word.chars().count() >= self.min_word_length {
            words.push(word);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<&str> {
        WordTokenizer::new(3).tokenize(text, &[])
    }

    #[test]
    fn test_basic_splitting() {
        assert_eq!(
            words("The quick brown fox!"),
            vec!["The", "quick", "brown", "fox"]
        );
    }

    #[test]
    fn test_short_words_are_dropped() {
        assert_eq!(words("a an of the word"), vec!["the", "word"]);
    }

    #[test]
    fn test_joiners_connect_alphanumeric_neighbors() {
        assert_eq!(words("well-known fact"), vec!["well-known", "fact"]);
        assert_eq!(words("don't stop"), vec!["don't", "stop"]);
        assert_eq!(words("snake_case here"), vec!["snake_case", "here"]);
        assert_eq!(words("open file.txt now"), vec!["open", "file.txt", "now"]);
    }

    #[test]
    fn test_sentence_period_does_not_join() {
        assert_eq!(words("the end. Next one"), vec!["the", "end", "Next", "one"]);
    }

    #[test]
    fn test_leading_and_trailing_joiners_detach() {
        assert_eq!(words("-lead trail- _mid_"), vec!["lead", "trail", "mid"]);
    }

    #[test]
    fn test_consecutive_joiners_split() {
        let tokenizer = WordTokenizer::new(1);
        assert_eq!(tokenizer.tokenize("a--b c'_d", &[]), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_masked_ranges_are_skipped() {
        let text = "alpha SECRET omega";
        let tokenizer = WordTokenizer::new(1);
        assert_eq!(tokenizer.tokenize(text, &[6..12]), vec!["alpha", "omega"]);
    }

    #[test]
    fn test_mask_boundary_splits_word() {
        let tokenizer = WordTokenizer::new(1);
        assert_eq!(tokenizer.tokenize("abcdef", &[3..6]), vec!["abc"]);
        // A joiner never reaches across a mask boundary
        assert_eq!(tokenizer.tokenize("ab.cd", &[3..5]), vec!["ab"]);
    }

    #[test]
    fn test_unicode_words() {
        let tokenizer = WordTokenizer::new(2);
        assert_eq!(
            tokenizer.tokenize("café meets 北京 naïve", &[]),
            vec!["café", "meets", "北京", "naïve"]
        );
    }

    #[test]
    fn test_numbers_are_words() {
        assert_eq!(words("2024 was 42"), vec!["2024", "was"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(words("").is_empty());
        assert!(words("   \n\t  ").is_empty());
    }
}
