//! In-memory store implementation for testing and ephemeral sessions.

use std::sync::Mutex;

use ahash::AHashMap;
use async_trait::async_trait;

use crate::error::Result;
use crate::index::BucketedWords;
use crate::source::{Source, SourceId, SourceKind};
use crate::store::{WordStore, bucket_rows};

/// Mutable store contents behind the lock.
#[derive(Debug, Default)]
struct MemoryState {
    /// Last assigned source id; ids start at 1.
    next_source_id: SourceId,
    /// Registered sources in creation order.
    sources: Vec<Source>,
    /// `(source, word) -> frequency` rows.
    words: AHashMap<(SourceId, String), u64>,
}

/// An in-memory store implementation.
///
/// Useful for tests and for sessions that do not need persistence. Contents
/// are lost when the store is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of word rows currently held.
    pub fn row_count(&self) -> usize {
        self.state.lock().unwrap().words.len()
    }
}

#[async_trait]
impl WordStore for MemoryStore {
    async fn grouped_by_bucket(&self) -> Result<BucketedWords> {
        let state = self.state.lock().unwrap();
        Ok(bucket_rows(
            state
                .words
                .iter()
                .map(|((_, word), frequency)| (word.clone(), *frequency)),
        ))
    }

    async fn grouped_by_bucket_for_source(&self, source_id: SourceId) -> Result<BucketedWords> {
        let state = self.state.lock().unwrap();
        Ok(bucket_rows(
            state
                .words
                .iter()
                .filter(|((sid, _), _)| *sid == source_id)
                .map(|((_, word), frequency)| (word.clone(), *frequency)),
        ))
    }

    async fn increment_or_create(
        &self,
        word: &str,
        source_id: SourceId,
        delta: u64,
    ) -> Result<()> {
        if delta == 0 {
            return Ok(());
        }
        let mut state = self.state.lock().unwrap();
        *state
            .words
            .entry((source_id, word.to_string()))
            .or_insert(0) += delta;
        Ok(())
    }

    async fn delete_all_for_source(&self, source_id: SourceId) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.words.retain(|(sid, _), _| *sid != source_id);
        Ok(())
    }

    async fn upsert_source(
        &self,
        name: &str,
        kind: SourceKind,
        checksum: Option<u32>,
    ) -> Result<Source> {
        let mut state = self.state.lock().unwrap();
        let now = chrono::Utc::now();

        if let Some(source) = state.sources.iter_mut().find(|s| s.name == name) {
            source.kind = kind;
            source.checksum = checksum;
            source.last_updated = now;
            return Ok(source.clone());
        }

        state.next_source_id += 1;
        let source = Source {
            id: state.next_source_id,
            name: name.to_string(),
            kind,
            checksum,
            last_updated: now,
        };
        state.sources.push(source.clone());
        Ok(source)
    }

    async fn source_id_by_name(&self, name: &str) -> Result<Option<SourceId>> {
        let state = self.state.lock().unwrap();
        Ok(state.sources.iter().find(|s| s.name == name).map(|s| s.id))
    }

    async fn sources(&self) -> Result<Vec<Source>> {
        let state = self.state.lock().unwrap();
        let mut sources = state.sources.clone();
        sources.sort_by_key(|s| s.id);
        Ok(sources)
    }

    async fn delete_source(&self, source_id: SourceId) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.sources.retain(|s| s.id != source_id);
        Ok(())
    }
}
