//! JSON-file store implementation with atomic snapshot writes.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use ahash::AHashMap;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{Result, TypeaheadError};
use crate::index::BucketedWords;
use crate::source::{Source, SourceId, SourceKind};
use crate::store::{WordStore, bucket_rows};

/// One persisted `(word, source)` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WordRow {
    word: String,
    source_id: SourceId,
    frequency: u64,
}

/// The whole-store snapshot persisted as one JSON document.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    next_source_id: SourceId,
    sources: Vec<Source>,
    words: Vec<WordRow>,
}

/// Live store contents behind the lock.
#[derive(Debug, Default)]
struct LiveState {
    next_source_id: SourceId,
    sources: Vec<Source>,
    words: AHashMap<(SourceId, String), u64>,
    dirty: bool,
}

impl LiveState {
    fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut words = AHashMap::with_capacity(snapshot.words.len());
        for row in snapshot.words {
            *words.entry((row.source_id, row.word)).or_insert(0) += row.frequency;
        }
        LiveState {
            next_source_id: snapshot.next_source_id,
            sources: snapshot.sources,
            words,
            dirty: false,
        }
    }

    fn to_snapshot(&self) -> Snapshot {
        let mut sources = self.sources.clone();
        sources.sort_by_key(|s| s.id);

        let mut words: Vec<WordRow> = self
            .words
            .iter()
            .map(|((source_id, word), frequency)| WordRow {
                word: word.clone(),
                source_id: *source_id,
                frequency: *frequency,
            })
            .collect();
        // Deterministic row order across writes
        words.sort_by(|a, b| (a.source_id, &a.word).cmp(&(b.source_id, &b.word)));

        Snapshot {
            next_source_id: self.next_source_id,
            sources,
            words,
        }
    }
}

/// A store that keeps its whole state in one JSON file.
///
/// Mutations update the in-memory state and mark it dirty; [`WordStore::sync`]
/// rewrites the snapshot through a temporary file in the same directory, so a
/// crash mid-write leaves the previous snapshot intact. Suited to the corpus
/// sizes this engine targets (personal note collections, not search indexes).
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    state: Mutex<LiveState>,
}

impl JsonFileStore {
    /// Open a store at `path`, loading the existing snapshot when present.
    ///
    /// A missing file yields an empty store; the file is first written by
    /// [`WordStore::sync`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let snapshot = if path.exists() {
            let file = File::open(&path)?;
            serde_json::from_reader(BufReader::new(file))?
        } else {
            Snapshot::default()
        };

        Ok(JsonFileStore {
            path,
            state: Mutex::new(LiveState::from_snapshot(snapshot)),
        })
    }

    /// Get the snapshot path this store writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, state: &mut LiveState) -> Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let temp_file = NamedTempFile::new_in(parent)?;
        {
            let mut writer = BufWriter::new(&temp_file);
            serde_json::to_writer_pretty(&mut writer, &state.to_snapshot())?;
            writer.flush()?;
        }
        temp_file
            .persist(&self.path)
            .map_err(|e| TypeaheadError::store(format!("failed to persist snapshot: {e}")))?;

        state.dirty = false;
        Ok(())
    }
}

#[async_trait]
impl WordStore for JsonFileStore {
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
        state.dirty = true;
        Ok(())
    }

    async fn delete_all_for_source(&self, source_id: SourceId) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.words.retain(|(sid, _), _| *sid != source_id);
        state.dirty = true;
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
        state.dirty = true;

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
        state.dirty = true;
        Ok(())
    }

    async fn sync(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.dirty {
            return Ok(());
        }
        self.persist(&mut state)
    }
}
