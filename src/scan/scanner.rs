//! The rescan pipeline: documents in, indexed and persisted words out.

use ahash::AHashMap;
use log::{debug, warn};
use serde::Serialize;

use crate::config::ScanConfig;
use crate::error::Result;
use crate::index::WordIndex;
use crate::scan::exclusion::ExclusionPatterns;
use crate::scan::tokenizer::WordTokenizer;
use crate::source::SourceId;
use crate::store::WordStore;

/// Summary of one rescan pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    /// Number of documents scanned.
    pub documents: usize,
    /// Number of word occurrences indexed.
    pub tokens: usize,
    /// Number of distinct spellings seen.
    pub distinct_words: usize,
    /// Number of words whose store write failed and was skipped.
    pub flush_failures: usize,
}

/// Scans documents into a [`WordIndex`] and flushes the counts to a store.
#[derive(Debug, Clone)]
pub struct Scanner {
    tokenizer: WordTokenizer,
    exclusions: ExclusionPatterns,
}

impl Scanner {
    /// Build a scanner from the configuration, compiling its exclusion
    /// patterns.
    pub fn new(config: &ScanConfig) -> Result<Self> {
        Ok(Scanner {
            tokenizer: WordTokenizer::new(config.min_word_length),
            exclusions: ExclusionPatterns::new(&config.exclusion_patterns)?,
        })
    }

    /// Tokenize one document, honoring exclusion zones.
    pub fn scan_document<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mask = self.exclusions.mask(text);
        self.tokenizer.tokenize(text, &mask)
    }

    /// Rescan the whole corpus, replacing the scan source's words.
    ///
    /// The index is cleared and the scan source's store rows are deleted up
    /// front, so a rescan that supersedes an earlier one never double
    /// counts. Occurrences are accumulated per spelling and flushed as one
    /// increment per distinct word; an individual write failure is logged
    /// and skipped, leaving the in-memory index authoritative for the
    /// session.
    pub async fn rescan<I, S>(
        &self,
        index: &mut WordIndex,
        store: &dyn WordStore,
        scan_source_id: SourceId,
        documents: I,
    ) -> Result<ScanReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        index.clear();
        store.delete_all_for_source(scan_source_id).await?;

        let mut pending: AHashMap<String, u64> = AHashMap::new();
        let mut report = ScanReport::default();

        for document in documents {
            report.documents += 1;
            for word in self.scan_document(document.as_ref()) {
                index.upsert(word);
                *pending.entry(word.to_string()).or_insert(0) += 1;
                report.tokens += 1;
            }
        }
        report.distinct_words = pending.len();

        for (word, delta) in &pending {
            if let Err(e) = store
                .increment_or_create(word, scan_source_id, *delta)
                .await
            {
                warn!("failed to persist scanned word {word:?}: {e}");
                report.flush_failures += 1;
            }
        }

        if let Err(e) = store.sync().await {
            warn!("failed to sync store after rescan: {e}");
        }

        debug!(
            "rescan: {} documents, {} tokens, {} distinct words, {} flush failures",
            report.documents, report.tokens, report.distinct_words, report.flush_failures
        );

        Ok(report)
    }
}
