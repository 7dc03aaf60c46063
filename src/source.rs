//! Provenance sources for indexed words.
//!
//! Every persisted word belongs to exactly one source: either the singleton
//! scan source (words harvested from the document corpus) or a named word
//! list (words imported from user-provided content). Sources let the engine
//! clear and reload one provider without touching the words of another.

use serde::{Deserialize, Serialize};

/// Identifier assigned to a source by the store.
pub type SourceId = u64;

/// Name under which the singleton scan source is registered.
pub const SCAN_SOURCE_NAME: &str = "scan";

/// The kind of a word source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    /// Words harvested by scanning the document corpus.
    Scan,
    /// Words imported from a named word list.
    WordList,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Scan => write!(f, "scan"),
            SourceKind::WordList => write!(f, "word_list"),
        }
    }
}

/// Metadata describing one word source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    /// Store-assigned identifier.
    pub id: SourceId,

    /// Unique human-readable name.
    pub name: String,

    /// Whether this source is the scan source or a word list.
    pub kind: SourceKind,

    /// Checksum of the imported content; `None` for the scan source.
    pub checksum: Option<u32>,

    /// When this source was last written to.
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

/// Compute the checksum used to detect word-list content changes.
///
/// The value only has to be stable across sessions and cheap to compute;
/// CRC32 over the raw bytes is enough for change detection.
pub fn content_checksum(content: &str) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(content.as_bytes());
    hasher.finalize()
}
