//! Output formatting for CLI commands.

use std::fmt::Write as _;

use serde::Serialize;

use crate::cli::args::{OutputFormat, TypeaheadArgs};
use crate::error::Result;
use crate::source::Source;
use crate::suggest::Suggestion;

/// Result structure for a corpus scan.
#[derive(Debug, Serialize)]
pub struct ScanOutcome {
    pub directory: String,
    pub documents: usize,
    pub tokens: usize,
    pub distinct_words: usize,
    pub flush_failures: usize,
    pub duration_ms: u64,
}

/// Result structure for suggestion lookup.
#[derive(Debug, Serialize)]
pub struct SuggestOutcome {
    pub query: String,
    pub suggestions: Vec<Suggestion>,
    pub duration_us: u64,
}

/// Result structure for a word list import.
#[derive(Debug, Serialize)]
pub struct ImportOutcome {
    pub name: String,
    pub unchanged: bool,
    pub words: usize,
}

/// Result structure for a word list removal.
#[derive(Debug, Serialize)]
pub struct RemoveOutcome {
    pub name: String,
    pub removed: bool,
}

/// Word database statistics.
#[derive(Debug, Serialize)]
pub struct StatsOutcome {
    pub database: String,
    pub scanned_words: usize,
    pub word_list_words: usize,
    pub sources: Vec<Source>,
}

/// Human-readable rendering of a command result.
pub trait HumanFormat {
    fn human(&self) -> String;
}

/// Print a result in the configured output format.
pub fn emit<T: Serialize + HumanFormat>(result: &T, args: &TypeaheadArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Human => println!("{}", result.human()),
    }
    Ok(())
}

impl HumanFormat for ScanOutcome {
    fn human(&self) -> String {
        let mut out = format!(
            "Scanned {} documents under {}: {} word occurrences, {} distinct words ({} ms)",
            self.documents, self.directory, self.tokens, self.distinct_words, self.duration_ms
        );
        if self.flush_failures > 0 {
            let _ = write!(out, "\n{} words could not be persisted", self.flush_failures);
        }
        out
    }
}

impl HumanFormat for SuggestOutcome {
    fn human(&self) -> String {
        if self.suggestions.is_empty() {
            return format!("No suggestions for {:?}", self.query);
        }
        let mut out = format!(
            "{} suggestions for {:?} ({} µs):",
            self.suggestions.len(),
            self.query,
            self.duration_us
        );
        for (i, suggestion) in self.suggestions.iter().enumerate() {
            let _ = write!(
                out,
                "\n{:>3}. {}  (rating {:.1}",
                i + 1,
                suggestion.display_text,
                suggestion.rating
            );
            if let Some(frequency) = suggestion.frequency {
                let _ = write!(out, ", seen {frequency}x");
            }
            let _ = write!(out, ")");
            if suggestion.insertion_text != suggestion.display_text {
                let _ = write!(out, " -> inserts {:?}", suggestion.insertion_text);
            }
        }
        out
    }
}

impl HumanFormat for ImportOutcome {
    fn human(&self) -> String {
        if self.unchanged {
            format!("Word list {:?} is unchanged", self.name)
        } else {
            format!("Imported {} words into {:?}", self.words, self.name)
        }
    }
}

impl HumanFormat for RemoveOutcome {
    fn human(&self) -> String {
        if self.removed {
            format!("Removed word list {:?}", self.name)
        } else {
            format!("No word list named {:?}", self.name)
        }
    }
}

impl HumanFormat for StatsOutcome {
    fn human(&self) -> String {
        let mut out = format!(
            "Database: {}\nScanned words: {}\nWord list words: {}\nSources:",
            self.database, self.scanned_words, self.word_list_words
        );
        if self.sources.is_empty() {
            let _ = write!(out, " none");
        }
        for source in &self.sources {
            let _ = write!(
                out,
                "\n  [{}] {:?} ({}, updated {})",
                source.id,
                source.name,
                source.kind,
                source.last_updated.format("%Y-%m-%d %H:%M:%S UTC")
            );
        }
        out
    }
}
