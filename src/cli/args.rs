//! Command line argument parsing for the typeahead CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Typeahead - a frequency-weighted local autocomplete engine
#[derive(Parser, Debug, Clone)]
#[command(name = "typeahead")]
#[command(about = "A frequency-weighted local autocomplete engine")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TypeaheadArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Path of the word database file
    #[arg(
        short = 'd',
        long = "database",
        value_name = "FILE",
        default_value = "typeahead.json",
        env = "TYPEAHEAD_DB"
    )]
    pub database: PathBuf,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TypeaheadArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Scan a directory of documents into the word database
    Scan(ScanArgs),

    /// Suggest completions for a typed query
    Suggest(SuggestArgs),

    /// Import or update a word list (one word per line)
    #[command(name = "import-list")]
    ImportList(ImportListArgs),

    /// Remove a word list and its words
    #[command(name = "remove-list")]
    RemoveList(RemoveListArgs),

    /// Show word database statistics
    Stats,
}

/// Arguments for scanning a document directory
#[derive(Parser, Debug, Clone)]
pub struct ScanArgs {
    /// Directory to scan recursively
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// File extensions to scan (comma-separated)
    #[arg(short, long, value_delimiter = ',', default_value = "md,txt")]
    pub extensions: Vec<String>,

    /// Minimum word length to index
    #[arg(long, value_name = "CHARS")]
    pub min_word_length: Option<usize>,
}

/// Arguments for suggestion lookup
#[derive(Parser, Debug, Clone)]
pub struct SuggestArgs {
    /// The typed query prefix
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Maximum number of suggestions (0 = unlimited)
    #[arg(short, long, value_name = "N")]
    pub limit: Option<usize>,

    /// Use fuzzy subsequence matching instead of prefix matching
    #[arg(long)]
    pub fuzzy: bool,

    /// Match accented characters by their base letters
    #[arg(long)]
    pub ignore_diacritics: bool,
}

/// Arguments for importing a word list
#[derive(Parser, Debug, Clone)]
pub struct ImportListArgs {
    /// Name to register the list under
    #[arg(value_name = "NAME")]
    pub name: String,

    /// File containing one word per line
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Arguments for removing a word list
#[derive(Parser, Debug, Clone)]
pub struct RemoveListArgs {
    /// Name the list was registered under
    #[arg(value_name = "NAME")]
    pub name: String,
}

/// Output formats for command results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// Pretty-printed JSON
    Json,
}
