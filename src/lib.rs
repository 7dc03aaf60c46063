//! # Typeahead
//!
//! A frequency-weighted local autocomplete engine for Rust.
//!
//! ## Features
//!
//! - Case-sensitive prefix matching with camelCase queries
//! - Optional fuzzy subsequence matching with highlight ranges
//! - Frequency learning from scanned document corpora
//! - Importable word lists with checksum-gated refresh
//! - Pluggable persistence backends
//!
//! ## Quick start
//!
//! ```
//! use typeahead::config::EngineConfig;
//! use typeahead::engine::AutocompleteEngine;
//!
//! # tokio_test::block_on(async {
//! let mut engine = AutocompleteEngine::in_memory(EngineConfig::default()).await?;
//! engine.rescan(["an obsidian notebook, full of obsidian notes"]).await?;
//!
//! let suggestions = engine.suggest("obs");
//! assert_eq!(suggestions[0].display_text, "obsidian");
//! assert_eq!(suggestions[0].frequency, Some(2));
//! # Ok::<(), typeahead::error::TypeaheadError>(())
//! # }).unwrap();
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod scan;
pub mod source;
pub mod store;
pub mod suggest;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
