//! Persistence abstraction for indexed words and their sources.
//!
//! This module provides a pluggable store interface so the engine can run
//! against different persistence backends. Word rows are keyed by `(word,
//! source)`; bulk loads return words grouped by first-character bucket with
//! frequencies summed across the requested sources. The only assumption the
//! engine makes about a backend is read-your-writes within a session.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use ahash::AHashMap;
use async_trait::async_trait;

use crate::error::Result;
use crate::index::BucketedWords;
use crate::source::{Source, SourceId, SourceKind};

/// A trait for word persistence backends.
///
/// All operations are async so network- or disk-backed implementations can
/// suspend; the in-memory reference backend completes immediately.
#[async_trait]
pub trait WordStore: Send + Sync + std::fmt::Debug {
    /// Load every persisted word, grouped by bucket, frequencies summed
    /// across all sources.
    async fn grouped_by_bucket(&self) -> Result<BucketedWords>;

    /// Load only the words attributed to one source, grouped by bucket.
    async fn grouped_by_bucket_for_source(&self, source_id: SourceId) -> Result<BucketedWords>;

    /// Add `delta` observations of `word` under `source_id`, creating the
    /// row when absent. A zero delta is a no-op.
    async fn increment_or_create(&self, word: &str, source_id: SourceId, delta: u64)
    -> Result<()>;

    /// Delete every word row attributed to one source.
    async fn delete_all_for_source(&self, source_id: SourceId) -> Result<()>;

    /// Create or refresh the source registered under `name`, updating its
    /// checksum and timestamp. The returned record carries the assigned id.
    async fn upsert_source(
        &self,
        name: &str,
        kind: SourceKind,
        checksum: Option<u32>,
    ) -> Result<Source>;

    /// Look up a source id by name.
    async fn source_id_by_name(&self, name: &str) -> Result<Option<SourceId>>;

    /// List every registered source, ordered by id.
    async fn sources(&self) -> Result<Vec<Source>>;

    /// Delete a source record. Word rows are not cascaded here; callers
    /// delete them first.
    async fn delete_source(&self, source_id: SourceId) -> Result<()>;

    /// Flush pending writes to durable storage. Backends that write through
    /// on every mutation keep the default no-op.
    async fn sync(&self) -> Result<()> {
        Ok(())
    }
}

/// Shared handle to a word store.
pub type WordStoreRef = Arc<dyn WordStore>;

/// Fold `(word, frequency)` rows into buckets keyed by first character,
/// summing duplicate words.
pub(crate) fn bucket_rows<I>(rows: I) -> BucketedWords
where
    I: IntoIterator<Item = (String, u64)>,
{
    let mut totals: AHashMap<String, u64> = AHashMap::new();
    for (word, frequency) in rows {
        *totals.entry(word).or_insert(0) += frequency;
    }

    let mut grouped = BucketedWords::default();
    for (word, frequency) in totals {
        if let Some(first) = word.chars().next() {
            grouped.entry(first).or_default().push((word, frequency));
        }
    }
    grouped
}
