//! Configuration for the autocomplete engine.
//!
//! This module provides configuration structures for controlling how
//! suggestions are matched and ranked, and how the corpus scanner turns
//! documents into indexed words.
//!
//! # Examples
//!
//! ```
//! use typeahead::config::{EngineConfig, InsertionMode};
//!
//! // Use default configuration
//! let config = EngineConfig::default();
//! assert_eq!(config.matching.min_word_trigger_length, 2);
//! assert_eq!(config.matching.max_suggestions, 10);
//!
//! // Create custom configuration
//! let mut custom_config = EngineConfig::default();
//! custom_config.matching.fuzzy_matching = true; // Subsequence matching
//! custom_config.matching.insertion_mode = InsertionMode::AppendRemainder;
//! custom_config.scan.min_word_length = 4;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, TypeaheadError};
use crate::scan::exclusion::default_exclusion_patterns;

/// Configuration for suggestion matching and ranking.
///
/// The two matching strategies behave differently: the default strategy
/// requires the suggestion to start with the typed query (case-sensitively,
/// with a camelCase escape hatch), while `fuzzy_matching` accepts any word
/// containing the query's characters in order, irrespective of case.
///
/// # Examples
///
/// ```
/// use typeahead::config::MatchConfig;
///
/// let mut config = MatchConfig::default();
/// config.max_suggestions = 0; // Unlimited results
/// config.ignore_diacritics = true; // "resume" also matches "résumé"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Whether suggestion lookup is enabled at all.
    pub enabled: bool,
    /// Minimum query length (in characters) before suggestions are produced.
    pub min_word_trigger_length: usize,
    /// Maximum number of suggestions to return (0 = unlimited).
    pub max_suggestions: usize,
    /// Use case-insensitive subsequence matching instead of prefix matching.
    pub fuzzy_matching: bool,
    /// Treat accented characters as their base letters when matching.
    pub ignore_diacritics: bool,
    /// How a chosen suggestion replaces the typed word.
    pub insertion_mode: InsertionMode,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_word_trigger_length: 2,
            max_suggestions: 10,
            fuzzy_matching: false,
            ignore_diacritics: false,
            insertion_mode: InsertionMode::ReplaceMatchingCase,
        }
    }
}

/// How a chosen suggestion is turned into insertion text for the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsertionMode {
    /// Replace the typed word, re-casing the suggestion to match how the
    /// query was typed ("COR" turns "corporate" into "CORPORATE").
    ReplaceMatchingCase,
    /// Replace the typed word with the suggestion exactly as stored.
    ReplaceIgnoringCase,
    /// Keep the typed word as-is and append the suggestion's remainder.
    AppendRemainder,
}

/// Configuration for the corpus scanner.
///
/// # Examples
///
/// ```
/// use typeahead::config::ScanConfig;
///
/// let config = ScanConfig::default();
/// assert_eq!(config.min_word_length, 3);
/// assert!(!config.exclusion_patterns.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Minimum token length (in characters) for a scanned word to be indexed.
    pub min_word_length: usize,
    /// Regex patterns whose matches are skipped wholesale during scanning.
    ///
    /// The defaults skip code spans, math regions, link targets and bare
    /// URLs; replacing this list replaces the defaults entirely.
    pub exclusion_patterns: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_word_length: 3,
            exclusion_patterns: default_exclusion_patterns(),
        }
    }
}

/// Top-level configuration combining matching and scanning settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Matching and ranking settings.
    pub matching: MatchConfig,
    /// Corpus scanner settings.
    pub scan: ScanConfig,
}

impl EngineConfig {
    /// Validate the configuration, reporting the first problem found.
    ///
    /// Exclusion patterns are not compiled here; pattern errors surface when
    /// the scanner is constructed.
    pub fn validate(&self) -> Result<()> {
        if self.matching.min_word_trigger_length == 0 {
            return Err(TypeaheadError::invalid_config(
                "min_word_trigger_length must be at least 1",
            ));
        }
        if self.scan.min_word_length == 0 {
            return Err(TypeaheadError::invalid_config(
                "min_word_length must be at least 1",
            ));
        }
        Ok(())
    }
}
