//! Error types for Lineage operations.
//!
//! This module provides the main error type [`LineageError`] which wraps
//! the error conditions that can occur while reading and laying out a
//! document.

use std::io;

use thiserror::Error;

use lineage_parser::error::ParseError;

/// The main error type for Lineage operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries the document source next to the structured
/// parse error so callers can render source snippets.
#[derive(Debug, Error)]
pub enum LineageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Layout error: {0}")]
    Layout(String),
}

impl LineageError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
