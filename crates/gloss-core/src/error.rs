//! Error types for Gloss core operations.
//!
//! This module defines well-structured error types using `thiserror` for
//! library-level errors, while higher-level code can use `anyhow` for
//! convenient error handling.
//!
//! Note that the query operations (`lookup`, `find_all`, `search`,
//! `validate`, `fix`) never return errors: absence and empty result
//! collections are normal outcomes there. Errors only arise at the
//! loading boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using GlossError
pub type Result<T> = std::result::Result<T, GlossError>;

/// Core error types for Gloss operations.
#[derive(Error, Debug)]
pub enum GlossError {
    /// A glossary source file could not be parsed.
    ///
    /// The loader treats this as non-fatal for individual term files
    /// (the file is skipped with a warning), but surfaces it from the
    /// strict parsing helpers.
    #[error("failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GlossError {
    /// Create a parse error for a source file.
    pub fn parse(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        GlossError::Parse {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
