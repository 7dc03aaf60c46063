//! Command implementations for the typeahead CLI.

use std::fs;
use std::sync::Arc;
use std::time::Instant;

use walkdir::WalkDir;

use crate::cli::args::{
    Command, ImportListArgs, RemoveListArgs, ScanArgs, SuggestArgs, TypeaheadArgs,
};
use crate::cli::output::{
    ImportOutcome, RemoveOutcome, ScanOutcome, StatsOutcome, SuggestOutcome, emit,
};
use crate::config::EngineConfig;
use crate::engine::{AutocompleteEngine, WordListOutcome};
use crate::error::{Result, TypeaheadError};
use crate::store::JsonFileStore;

/// Execute a CLI command.
pub async fn execute_command(args: TypeaheadArgs) -> Result<()> {
    match args.command.clone() {
        Command::Scan(scan_args) => scan_corpus(scan_args, &args).await,
        Command::Suggest(suggest_args) => suggest(suggest_args, &args).await,
        Command::ImportList(import_args) => import_list(import_args, &args).await,
        Command::RemoveList(remove_args) => remove_list(remove_args, &args).await,
        Command::Stats => show_stats(&args).await,
    }
}

/// Open the engine against the word database named on the command line.
async fn open_engine(args: &TypeaheadArgs, config: EngineConfig) -> Result<AutocompleteEngine> {
    let store = JsonFileStore::open(&args.database)?;
    AutocompleteEngine::open(Arc::new(store), config).await
}

/// Scan a directory of documents into the word database.
async fn scan_corpus(args: ScanArgs, cli_args: &TypeaheadArgs) -> Result<()> {
    if !args.dir.is_dir() {
        return Err(TypeaheadError::scan(format!(
            "{} is not a directory",
            args.dir.display()
        )));
    }

    let mut config = EngineConfig::default();
    if let Some(min_word_length) = args.min_word_length {
        config.scan.min_word_length = min_word_length;
    }
    let mut engine = open_engine(cli_args, config).await?;

    let start = Instant::now();
    let mut documents = Vec::new();
    for entry in WalkDir::new(&args.dir).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let wanted = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                args.extensions
                    .iter()
                    .any(|want| want.eq_ignore_ascii_case(ext))
            });
        if !wanted {
            continue;
        }

        match fs::read_to_string(entry.path()) {
            Ok(text) => documents.push(text),
            Err(e) => {
                if cli_args.verbosity() > 0 {
                    eprintln!("Skipping {}: {}", entry.path().display(), e);
                }
            }
        }
    }

    if cli_args.verbosity() > 1 {
        println!(
            "Scanning {} documents under {}",
            documents.len(),
            args.dir.display()
        );
    }

    let report = engine.rescan(&documents).await?;
    let duration = start.elapsed();

    emit(
        &ScanOutcome {
            directory: args.dir.display().to_string(),
            documents: report.documents,
            tokens: report.tokens,
            distinct_words: report.distinct_words,
            flush_failures: report.flush_failures,
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )
}

/// Look up suggestions for a query.
async fn suggest(args: SuggestArgs, cli_args: &TypeaheadArgs) -> Result<()> {
    let mut config = EngineConfig::default();
    config.matching.fuzzy_matching = args.fuzzy;
    config.matching.ignore_diacritics = args.ignore_diacritics;
    if let Some(limit) = args.limit {
        config.matching.max_suggestions = limit;
    }

    let engine = open_engine(cli_args, config).await?;

    let start = Instant::now();
    let suggestions = engine.suggest(&args.query);
    let duration = start.elapsed();

    emit(
        &SuggestOutcome {
            query: args.query,
            suggestions,
            duration_us: duration.as_micros() as u64,
        },
        cli_args,
    )
}

/// Import a word list file under a source name.
async fn import_list(args: ImportListArgs, cli_args: &TypeaheadArgs) -> Result<()> {
    let content = fs::read_to_string(&args.file)?;
    let mut engine = open_engine(cli_args, EngineConfig::default()).await?;

    let outcome = engine.add_or_update_word_list(&args.name, &content).await?;
    let (unchanged, words) = match outcome {
        WordListOutcome::Unchanged => (true, 0),
        WordListOutcome::Imported { words } => (false, words),
    };

    emit(
        &ImportOutcome {
            name: args.name,
            unchanged,
            words,
        },
        cli_args,
    )
}

/// Remove a word list source.
async fn remove_list(args: RemoveListArgs, cli_args: &TypeaheadArgs) -> Result<()> {
    let mut engine = open_engine(cli_args, EngineConfig::default()).await?;
    let removed = engine.remove_word_list(&args.name).await?;

    emit(
        &RemoveOutcome {
            name: args.name,
            removed,
        },
        cli_args,
    )
}

/// Show word database statistics.
async fn show_stats(cli_args: &TypeaheadArgs) -> Result<()> {
    let engine = open_engine(cli_args, EngineConfig::default()).await?;
    let sources = engine.sources().await?;

    emit(
        &StatsOutcome {
            database: cli_args.database.display().to_string(),
            scanned_words: engine.scan_word_count(),
            word_list_words: engine.word_list_word_count(),
            sources,
        },
        cli_args,
    )
}
