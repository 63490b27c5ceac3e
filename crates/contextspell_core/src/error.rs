//! Checker error types.

use contextspell_ast::TextError;
use contextspell_parser::ParseError;
use thiserror::Error;

use crate::OracleError;

/// Errors that can occur while spellchecking a document.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The input file could not be read.
    #[error("File error: {0}")]
    File(String),

    /// The input is not valid UTF-8.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// A node's text could not be read from the source.
    #[error("Malformed tree: {0}")]
    Text(#[from] TextError),

    /// The spell oracle failed.
    #[error("Spell oracle error: {0}")]
    Oracle(#[from] OracleError),

    /// Writing the report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CheckError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a file error.
    pub fn file(message: impl Into<String>) -> Self {
        Self::File(message.into())
    }

    /// Creates a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }
}
