//! Parse error types.

use thiserror::Error;

/// Errors that can occur during parsing.
///
/// The ConTeXt parser is error tolerant: malformed markup becomes `ERROR`
/// nodes in the tree rather than a `ParseError`. These variants cover inputs
/// the tree cannot represent at all: sources past the 32-bit offset range and
/// groups nested deeper than [`MAX_NESTING`](crate::MAX_NESTING).
#[derive(Debug, Error)]
pub enum ParseError {
    /// The source text is invalid.
    #[error("Invalid source: {message}")]
    InvalidSource {
        /// Error message.
        message: String,
        /// Byte offset where the error occurred, when it has one.
        offset: Option<usize>,
    },

    /// An internal parser error occurred.
    #[error("Internal parser error: {0}")]
    Internal(String),
}

impl ParseError {
    /// Creates a new invalid source error.
    pub fn invalid_source(message: impl Into<String>) -> Self {
        Self::InvalidSource {
            message: message.into(),
            offset: None,
        }
    }

    /// Creates a new invalid source error at a byte offset.
    pub fn invalid_source_at(message: impl Into<String>, offset: usize) -> Self {
        Self::InvalidSource {
            message: message.into(),
            offset: Some(offset),
        }
    }

    /// Creates a new internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
