//! Frequency-weighted word index bucketed by first character.

use ahash::AHashMap;

/// Words grouped by their first character, as exchanged with bulk loads.
pub type BucketedWords = AHashMap<char, Vec<(String, u64)>>;

/// A single indexed word and its observation count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    /// The word exactly as observed, case preserved.
    pub text: String,
    /// How many times the word has been observed; always at least 1.
    pub frequency: u64,
}

/// A case-sensitive word index bucketed by first character.
///
/// Each distinct spelling lives in exactly one bucket (keyed by its own first
/// character) and appears there once; "Test" and "test" are separate entries
/// in separate buckets. Frequencies only grow; individual entries are never
/// removed. The whole index is cleared when its backing source reloads.
#[derive(Debug, Clone, Default)]
pub struct WordIndex {
    /// First character -> exact text -> entry
    buckets: AHashMap<char, AHashMap<String, WordEntry>>,
}

impl WordIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        WordIndex {
            buckets: AHashMap::new(),
        }
    }

    /// Record one observation of a word: insert at frequency 1 or increment
    /// the existing entry. Empty words are ignored.
    pub fn upsert(&mut self, word: &str) {
        self.increment_by(word, 1);
    }

    /// Record `n` observations of a word at once. A zero increment and empty
    /// words are ignored.
    pub fn increment_by(&mut self, word: &str, n: u64) {
        if n == 0 {
            return;
        }
        let Some(first) = word.chars().next() else {
            return;
        };

        let bucket = self.buckets.entry(first).or_default();
        match bucket.get_mut(word) {
            Some(entry) => entry.frequency += n,
            None => {
                bucket.insert(
                    word.to_string(),
                    WordEntry {
                        text: word.to_string(),
                        frequency: n,
                    },
                );
            }
        }
    }

    /// Check whether the exact spelling is indexed.
    pub fn contains(&self, word: &str) -> bool {
        self.frequency(word) > 0
    }

    /// Get the frequency of the exact spelling, or 0 when absent.
    pub fn frequency(&self, word: &str) -> u64 {
        let Some(first) = word.chars().next() else {
            return 0;
        };
        self.buckets
            .get(&first)
            .and_then(|bucket| bucket.get(word))
            .map(|entry| entry.frequency)
            .unwrap_or(0)
    }

    /// Iterate the entries of one bucket; empty when the bucket is absent.
    pub fn bucket(&self, first: char) -> impl Iterator<Item = &WordEntry> {
        self.buckets
            .get(&first)
            .into_iter()
            .flat_map(|bucket| bucket.values())
    }

    /// Iterate the bucket keys currently present.
    pub fn bucket_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.buckets.keys().copied()
    }

    /// Bulk-load persisted words, adding their stored frequencies.
    ///
    /// Buckets are re-derived from each word's own first character, so a
    /// store grouping never becomes authoritative over the index invariant.
    pub fn absorb(&mut self, grouped: BucketedWords) {
        for (word, frequency) in grouped.into_values().flatten() {
            self.increment_by(&word, frequency);
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.buckets.clear();
    }

    /// Get the number of distinct indexed spellings.
    pub fn word_count(&self) -> usize {
        self.buckets.values().map(|bucket| bucket.len()).sum()
    }

    /// Check whether the index holds no words at all.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_creates_then_increments() {
        let mut index = WordIndex::new();

        assert!(!index.contains("obsidian"));
        assert_eq!(index.frequency("obsidian"), 0);

        index.upsert("obsidian");
        assert!(index.contains("obsidian"));
        assert_eq!(index.frequency("obsidian"), 1);

        index.upsert("obsidian");
        index.upsert("obsidian");
        assert_eq!(index.frequency("obsidian"), 3);
        assert_eq!(index.word_count(), 1);
    }

    #[test]
    fn test_case_sensitive_entries_are_distinct() {
        let mut index = WordIndex::new();

        index.upsert("Test");
        index.upsert("test");
        index.upsert("test");

        assert_eq!(index.frequency("Test"), 1);
        assert_eq!(index.frequency("test"), 2);
        assert_eq!(index.word_count(), 2);

        let upper: Vec<&WordEntry> = index.bucket('T').collect();
        assert_eq!(upper.len(), 1);
        assert_eq!(upper[0].text, "Test");

        let lower: Vec<&WordEntry> = index.bucket('t').collect();
        assert_eq!(lower.len(), 1);
        assert_eq!(lower[0].text, "test");
    }

    #[test]
    fn test_empty_words_are_ignored() {
        let mut index = WordIndex::new();
        index.upsert("");
        index.increment_by("", 5);
        assert!(index.is_empty());
        assert_eq!(index.word_count(), 0);
    }

    #[test]
    fn test_increment_by_creates_at_n() {
        let mut index = WordIndex::new();
        index.increment_by("banana", 4);
        assert_eq!(index.frequency("banana"), 4);

        index.increment_by("banana", 2);
        assert_eq!(index.frequency("banana"), 6);

        index.increment_by("banana", 0);
        assert_eq!(index.frequency("banana"), 6);
    }

    #[test]
    fn test_missing_bucket_iterates_empty() {
        let index = WordIndex::new();
        assert_eq!(index.bucket('z').count(), 0);
    }

    #[test]
    fn test_absorb_preserves_and_sums_frequencies() {
        let mut index = WordIndex::new();
        index.upsert("shared");

        let mut grouped = BucketedWords::default();
        grouped.insert('s', vec![("shared".to_string(), 9), ("solo".to_string(), 2)]);
        grouped.insert('M', vec![("Mixed".to_string(), 1)]);
        index.absorb(grouped);

        assert_eq!(index.frequency("shared"), 10);
        assert_eq!(index.frequency("solo"), 2);
        assert_eq!(index.frequency("Mixed"), 1);
        assert_eq!(index.word_count(), 3);
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut index = WordIndex::new();
        index.upsert("one");
        index.upsert("two");
        assert_eq!(index.word_count(), 2);

        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.frequency("one"), 0);
    }

    #[test]
    fn test_unicode_first_char_buckets() {
        let mut index = WordIndex::new();
        index.upsert("Äpfel");
        index.upsert("äpfel");

        assert_eq!(index.bucket('Ä').count(), 1);
        assert_eq!(index.bucket('ä').count(), 1);
        let chars: Vec<char> = index.bucket_chars().collect();
        assert!(chars.contains(&'Ä'));
        assert!(chars.contains(&'ä'));
    }
}
