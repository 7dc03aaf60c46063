//! Corpus scanning: exclusion zones, tokenization, and the rescan pipeline.
//!
//! Scanning turns raw document text into indexed words. Regions matched by
//! the exclusion patterns (code spans, math, link targets, URLs) are skipped
//! wholesale, the remaining text is split into words, and a full rescan
//! replaces the scan source's words in memory and in the store.

pub mod exclusion;
pub mod scanner;
pub mod tokenizer;

pub use exclusion::{ExclusionPatterns, default_exclusion_patterns};
pub use scanner::{ScanReport, Scanner};
pub use tokenizer::WordTokenizer;
