//! Spell oracle interface.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a spell oracle.
#[derive(Debug, Error)]
pub enum OracleError {
    /// No dictionary for the language was found in any search directory.
    #[error("No dictionary for '{language}' found (searched: {})", .searched.join(", "))]
    NotFound {
        /// Requested language tag.
        language: String,
        /// Directories that were searched.
        searched: Vec<String>,
    },

    /// A dictionary file could not be read.
    #[error("Failed to read dictionary file {}: {source}", .path.display())]
    Read {
        /// The file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A dictionary could not be parsed.
    #[error("Invalid dictionary {name}: {message}")]
    Invalid {
        /// Where the dictionary came from.
        name: String,
        /// Parser message.
        message: String,
    },

    /// A lookup failed.
    #[error("Spell check query failed: {0}")]
    Query(String),
}

/// Answers whether a word is spelled correctly and how to correct it.
///
/// Both operations are fallible so that oracles backed by external services
/// can report failures; the checker propagates them.
pub trait SpellOracle {
    /// Returns true if `word` is spelled correctly.
    fn is_correct(&self, word: &str) -> Result<bool, OracleError>;

    /// Returns likely corrections for `word`, best first.
    fn suggest(&self, word: &str) -> Result<Vec<String>, OracleError>;
}

impl<T: SpellOracle + ?Sized> SpellOracle for &T {
    fn is_correct(&self, word: &str) -> Result<bool, OracleError> {
        (**self).is_correct(word)
    }

    fn suggest(&self, word: &str) -> Result<Vec<String>, OracleError> {
        (**self).suggest(word)
    }
}

impl<T: SpellOracle + ?Sized> SpellOracle for Box<T> {
    fn is_correct(&self, word: &str) -> Result<bool, OracleError> {
        (**self).is_correct(word)
    }

    fn suggest(&self, word: &str) -> Result<Vec<String>, OracleError> {
        (**self).suggest(word)
    }
}
