//! Error types for the Typeahead library.
//!
//! This module provides comprehensive error handling for all Typeahead
//! operations. All errors are represented by the [`TypeaheadError`] enum,
//! which provides detailed information about what went wrong.
//!
//! # Examples
//!
//! ```
//! use typeahead::error::{Result, TypeaheadError};
//!
//! fn example_operation() -> Result<()> {
//!     // Return an error
//!     Err(TypeaheadError::invalid_config("min_word_length must be at least 1"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for Typeahead operations.
///
/// This enum represents all possible errors that can occur in the Typeahead
/// library. It uses the `thiserror` crate for automatic `Error` trait
/// implementation and provides convenient constructor methods for creating
/// specific error types.
#[derive(Error, Debug)]
pub enum TypeaheadError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Store-related errors (persistence backends)
    #[error("Store error: {0}")]
    Store(String),

    /// Scan-related errors (tokenization, exclusion patterns)
    #[error("Scan error: {0}")]
    Scan(String),

    /// Source-related errors (provenance bookkeeping)
    #[error("Source error: {0}")]
    Source(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with TypeaheadError.
pub type Result<T> = std::result::Result<T, TypeaheadError>;

impl TypeaheadError {
    /// Create a new store error.
    pub fn store<S: Into<String>>(msg: S) -> Self {
        TypeaheadError::Store(msg.into())
    }

    /// Create a new scan error.
    pub fn scan<S: Into<String>>(msg: S) -> Self {
        TypeaheadError::Scan(msg.into())
    }

    /// Create a new source error.
    pub fn source<S: Into<String>>(msg: S) -> Self {
        TypeaheadError::Source(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        TypeaheadError::Config(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        TypeaheadError::Other(format!("Not found: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        TypeaheadError::Other(msg.into())
    }
}
