//! The autocomplete engine tying scanning, persistence and matching together.
//!
//! [`AutocompleteEngine`] owns two in-memory [`WordIndex`]es: one fed by
//! corpus scans and the live-tracking hook, one fed by imported word lists.
//! Both are loaded from the backing [`WordStore`](crate::store::WordStore) on
//! open and kept current as sources change; suggestion lookup never touches
//! the store.
//!
//! The engine is a single-writer component: all mutation goes through
//! `&mut self`, and callers who interleave a rescan with live tracking must
//! serialize those themselves.
//!
//! # Examples
//!
//! ```
//! use typeahead::config::EngineConfig;
//! use typeahead::engine::AutocompleteEngine;
//!
//! # tokio_test::block_on(async {
//! let mut engine = AutocompleteEngine::in_memory(EngineConfig::default()).await?;
//! engine.rescan(["the quick brown fox jumps over the lazy dog"]).await?;
//!
//! let suggestions = engine.suggest("qui");
//! assert_eq!(suggestions[0].display_text, "quick");
//! # Ok::<(), typeahead::error::TypeaheadError>(())
//! # }).unwrap();
//! ```

use std::sync::Arc;

use ahash::AHashSet;
use futures::future::try_join_all;
use log::debug;

use crate::config::EngineConfig;
use crate::error::{Result, TypeaheadError};
use crate::index::WordIndex;
use crate::scan::{ScanReport, Scanner};
use crate::source::{SCAN_SOURCE_NAME, Source, SourceId, SourceKind, content_checksum};
use crate::store::{MemoryStore, WordStoreRef};
use crate::suggest::{self, Suggestion};

/// Outcome of [`AutocompleteEngine::add_or_update_word_list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordListOutcome {
    /// The stored checksum matched the new content; nothing was re-imported.
    Unchanged,
    /// The list was imported, replacing any words previously attributed to
    /// it.
    Imported {
        /// Number of distinct words in the imported list.
        words: usize,
    },
}

/// A frequency-weighted local autocomplete engine.
pub struct AutocompleteEngine {
    store: WordStoreRef,
    config: EngineConfig,
    scanner: Scanner,
    /// Id of the single source all scanned words are attributed to.
    scan_source_id: SourceId,
    /// Words observed by corpus scans and the live-tracking hook.
    scan_index: WordIndex,
    /// Words imported from word-list sources.
    word_list_index: WordIndex,
}

impl AutocompleteEngine {
    /// Open an engine against a store, loading every persisted word.
    ///
    /// The scan source is registered on first open and reused afterwards.
    /// Any store failure during loading is returned; the engine never starts
    /// with partially loaded indexes.
    pub async fn open(store: WordStoreRef, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let scanner = Scanner::new(&config.scan)?;

        let scan_source_id = match store.source_id_by_name(SCAN_SOURCE_NAME).await? {
            Some(id) => id,
            None => {
                store
                    .upsert_source(SCAN_SOURCE_NAME, SourceKind::Scan, None)
                    .await?
                    .id
            }
        };

        let mut scan_index = WordIndex::new();
        scan_index.absorb(store.grouped_by_bucket_for_source(scan_source_id).await?);

        let mut engine = AutocompleteEngine {
            store,
            config,
            scanner,
            scan_source_id,
            scan_index,
            word_list_index: WordIndex::new(),
        };
        engine.reload_word_lists().await?;

        debug!(
            "opened engine: {} scanned words, {} word-list words",
            engine.scan_index.word_count(),
            engine.word_list_index.word_count()
        );
        Ok(engine)
    }

    /// Open an engine backed by a fresh in-memory store.
    pub async fn in_memory(config: EngineConfig) -> Result<Self> {
        Self::open(Arc::new(MemoryStore::new()), config).await
    }

    /// Rescan the corpus, replacing all scan-attributed words in the index
    /// and the store with the words found in `documents`.
    ///
    /// Word-list sources are untouched. Store write failures for individual
    /// words are logged and counted in the report instead of aborting.
    pub async fn rescan<I, S>(&mut self, documents: I) -> Result<ScanReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.scanner
            .rescan(
                &mut self.scan_index,
                self.store.as_ref(),
                self.scan_source_id,
                documents,
            )
            .await
    }

    /// Record one observation of a word immediately, without persistence.
    ///
    /// This is the live-tracking hook for "the user just finished typing
    /// this word". The bump is visible to [`suggest`](Self::suggest) right
    /// away and lasts until the next rescan rebuilds the scan index.
    pub fn track_word(&mut self, word: &str) {
        let word = word.trim();
        if word.is_empty() {
            return;
        }
        self.scan_index.upsert(word);
    }

    /// Import a word list, one word per line, under the source `name`.
    ///
    /// A checksum of `content` gates the import: when it matches the stored
    /// checksum the call is a no-op. Otherwise all words previously
    /// attributed to the source are purged and the list is imported anew,
    /// each line contributing one observation.
    pub async fn add_or_update_word_list(
        &mut self,
        name: &str,
        content: &str,
    ) -> Result<WordListOutcome> {
        if name.trim().is_empty() {
            return Err(TypeaheadError::source("word list name must not be empty"));
        }
        if name == SCAN_SOURCE_NAME {
            return Err(TypeaheadError::source(format!(
                "source name {SCAN_SOURCE_NAME:?} is reserved"
            )));
        }

        let checksum = content_checksum(content);
        if let Some(existing) = self.find_source(name).await? {
            if existing.checksum == Some(checksum) {
                debug!("word list {name:?} unchanged, skipping import");
                return Ok(WordListOutcome::Unchanged);
            }
            self.store.delete_all_for_source(existing.id).await?;
        }

        // Register the source without a checksum first: a failed import then
        // never passes the gate on retry.
        let source = self
            .store
            .upsert_source(name, SourceKind::WordList, None)
            .await?;

        let mut seen: AHashSet<&str> = AHashSet::new();
        for line in content.lines() {
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            self.store.increment_or_create(word, source.id, 1).await?;
            seen.insert(word);
        }
        let words = seen.len();

        self.store
            .upsert_source(name, SourceKind::WordList, Some(checksum))
            .await?;
        self.reload_word_lists().await?;
        self.store.sync().await?;

        debug!("imported word list {name:?}: {words} words");
        Ok(WordListOutcome::Imported { words })
    }

    /// Remove a word list and all words attributed to it.
    ///
    /// Returns `false` when no source is registered under `name`.
    pub async fn remove_word_list(&mut self, name: &str) -> Result<bool> {
        let Some(source) = self.find_source(name).await? else {
            return Ok(false);
        };
        if source.kind != SourceKind::WordList {
            return Err(TypeaheadError::source(format!(
                "source {name:?} is not a word list"
            )));
        }

        self.store.delete_all_for_source(source.id).await?;
        self.store.delete_source(source.id).await?;
        self.reload_word_lists().await?;
        self.store.sync().await?;
        Ok(true)
    }

    /// Generate ranked suggestions for a typed query prefix.
    ///
    /// Purely in-memory; safe to call on the interactive typing path.
    pub fn suggest(&self, query: &str) -> Vec<Suggestion> {
        suggest::suggest(
            &[&self.scan_index, &self.word_list_index],
            query,
            &self.config.matching,
        )
    }

    /// List every registered source.
    pub async fn sources(&self) -> Result<Vec<Source>> {
        self.store.sources().await
    }

    /// Number of distinct spellings across both indexes. A word present in
    /// a scan and a word list is counted in each.
    pub fn word_count(&self) -> usize {
        self.scan_index.word_count() + self.word_list_index.word_count()
    }

    /// Number of distinct spellings observed by scans and live tracking.
    pub fn scan_word_count(&self) -> usize {
        self.scan_index.word_count()
    }

    /// Number of distinct spellings imported from word lists.
    pub fn word_list_word_count(&self) -> usize {
        self.word_list_index.word_count()
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    async fn find_source(&self, name: &str) -> Result<Option<Source>> {
        Ok(self
            .store
            .sources()
            .await?
            .into_iter()
            .find(|source| source.name == name))
    }

    /// Rebuild the word-list index from every word-list source in the store.
    async fn reload_word_lists(&mut self) -> Result<()> {
        let list_ids: Vec<SourceId> = self
            .store
            .sources()
            .await?
            .into_iter()
            .filter(|source| source.kind == SourceKind::WordList)
            .map(|source| source.id)
            .collect();

        let loads = try_join_all(
            list_ids
                .iter()
                .map(|id| self.store.grouped_by_bucket_for_source(*id)),
        )
        .await?;

        let mut index = WordIndex::new();
        for grouped in loads {
            index.absorb(grouped);
        }
        self.word_list_index = index;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchConfig;

    fn test_config() -> EngineConfig {
        EngineConfig::default()
    }

    #[tokio::test]
    async fn test_rescan_counts_word_occurrences() {
        let mut engine = AutocompleteEngine::in_memory(test_config()).await.unwrap();

        let report = engine
            .rescan(["hello world hello", "hello again"])
            .await
            .unwrap();
        assert_eq!(report.documents, 2);
        assert_eq!(report.flush_failures, 0);

        let suggestions = engine.suggest("hel");
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].display_text, "hello");
        assert_eq!(suggestions[0].frequency, Some(3));
    }

    #[tokio::test]
    async fn test_scan_state_survives_reopen() {
        let store: WordStoreRef = Arc::new(MemoryStore::new());

        let mut engine = AutocompleteEngine::open(store.clone(), test_config())
            .await
            .unwrap();
        engine.rescan(["persistence matters"]).await.unwrap();
        drop(engine);

        let engine = AutocompleteEngine::open(store, test_config()).await.unwrap();
        let suggestions = engine.suggest("per");
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].display_text, "persistence");
    }

    #[tokio::test]
    async fn test_track_word_is_immediate_but_uncommitted() {
        let store: WordStoreRef = Arc::new(MemoryStore::new());

        let mut engine = AutocompleteEngine::open(store.clone(), test_config())
            .await
            .unwrap();
        engine.track_word("ephemeral");
        engine.track_word("ephemeral");
        engine.track_word("  ");

        let suggestions = engine.suggest("eph");
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].frequency, Some(2));
        drop(engine);

        // Live-tracked bumps are not persisted until a rescan flushes.
        let engine = AutocompleteEngine::open(store, test_config()).await.unwrap();
        assert!(engine.suggest("eph").is_empty());
    }

    #[tokio::test]
    async fn test_word_list_import_is_gated_by_checksum() {
        let mut engine = AutocompleteEngine::in_memory(test_config()).await.unwrap();

        let outcome = engine
            .add_or_update_word_list("medical", "aorta\nsternum\n")
            .await
            .unwrap();
        assert_eq!(outcome, WordListOutcome::Imported { words: 2 });

        // Same content: the checksum matches and nothing is re-imported.
        let outcome = engine
            .add_or_update_word_list("medical", "aorta\nsternum\n")
            .await
            .unwrap();
        assert_eq!(outcome, WordListOutcome::Unchanged);
        assert_eq!(engine.suggest("aor")[0].frequency, Some(1));

        // Changed content purges the old words of this source only.
        let outcome = engine
            .add_or_update_word_list("medical", "aorta\nfemur\n")
            .await
            .unwrap();
        assert_eq!(outcome, WordListOutcome::Imported { words: 2 });
        assert!(engine.suggest("ste").is_empty());
        assert_eq!(engine.suggest("fem").len(), 1);
    }

    #[tokio::test]
    async fn test_changed_word_list_purges_only_its_own_source() {
        let mut engine = AutocompleteEngine::in_memory(test_config()).await.unwrap();
        engine
            .add_or_update_word_list("medical", "aorta\n")
            .await
            .unwrap();
        engine
            .add_or_update_word_list("legal", "affidavit\n")
            .await
            .unwrap();

        engine
            .add_or_update_word_list("medical", "sternum\n")
            .await
            .unwrap();

        assert!(engine.suggest("aor").is_empty());
        assert_eq!(engine.suggest("aff").len(), 1, "other lists must survive");
    }

    #[tokio::test]
    async fn test_rescan_leaves_word_lists_intact() {
        let mut engine = AutocompleteEngine::in_memory(test_config()).await.unwrap();
        engine
            .add_or_update_word_list("names", "obsidian\n")
            .await
            .unwrap();

        engine.rescan(["completely unrelated words"]).await.unwrap();
        engine.rescan(["another pass"]).await.unwrap();

        let suggestions = engine.suggest("obs");
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].display_text, "obsidian");
    }

    #[tokio::test]
    async fn test_remove_word_list() {
        let mut engine = AutocompleteEngine::in_memory(test_config()).await.unwrap();
        engine
            .add_or_update_word_list("names", "obsidian\n")
            .await
            .unwrap();
        assert_eq!(engine.word_list_word_count(), 1);

        assert!(engine.remove_word_list("names").await.unwrap());
        assert!(engine.suggest("obs").is_empty());
        assert_eq!(engine.word_list_word_count(), 0);

        // Removing an unknown list reports absence instead of failing.
        assert!(!engine.remove_word_list("names").await.unwrap());
    }

    #[tokio::test]
    async fn test_scan_source_name_is_reserved() {
        let mut engine = AutocompleteEngine::in_memory(test_config()).await.unwrap();
        let result = engine.add_or_update_word_list("scan", "word\n").await;
        assert!(result.is_err());

        let result = engine.add_or_update_word_list("", "word\n").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_suggest_merges_scan_and_word_lists() {
        let mut engine = AutocompleteEngine::in_memory(test_config()).await.unwrap();
        engine
            .add_or_update_word_list("names", "window\n")
            .await
            .unwrap();
        engine.track_word("window");
        engine.track_word("window");
        engine.track_word("window");

        // The same word in both indexes dedups to the higher frequency.
        let suggestions = engine.suggest("win");
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].frequency, Some(3));
    }

    #[tokio::test]
    async fn test_open_rejects_invalid_config() {
        let mut config = EngineConfig::default();
        config.matching.min_word_trigger_length = 0;
        assert!(AutocompleteEngine::in_memory(config).await.is_err());

        let mut config = EngineConfig::default();
        config.scan.exclusion_patterns = vec!["[unclosed".to_string()];
        assert!(AutocompleteEngine::in_memory(config).await.is_err());
    }

    #[tokio::test]
    async fn test_suggest_respects_trigger_length_and_cap() {
        let mut config = EngineConfig::default();
        config.matching = MatchConfig {
            max_suggestions: 2,
            ..MatchConfig::default()
        };
        let mut engine = AutocompleteEngine::in_memory(config).await.unwrap();
        engine
            .rescan(["oak oat oar oboe"])
            .await
            .unwrap();

        assert!(engine.suggest("o").is_empty(), "below trigger length");
        assert_eq!(engine.suggest("oa").len(), 2, "cap applies");
    }
}
