//! # contextspell_core
//!
//! Spellchecking engine for ContextSpell.
//!
//! This crate provides:
//! - The [`SpellOracle`] interface and the Hunspell-backed [`HunspellDictionary`]
//! - The [`SpellChecker`] policy that walks a syntax tree and reports
//!   misspelled words in document order
//! - [`Reporter`] sinks for findings
//! - Configuration loading
//!
//! ## Example
//!
//! ```rust,no_run
//! use contextspell_ast::AstArena;
//! use contextspell_core::{HunspellDictionary, SpellChecker, SpellConfig, TextReporter, read_source, search_path};
//! use contextspell_parser::{ContextParser, Parser};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SpellConfig::from_file(".contextspell.jsonc")?;
//! let oracle = HunspellDictionary::load(&config.language, &search_path(&config.dictionary_dirs()))?
//!     .with_words(config.words.iter().cloned());
//!
//! let source = read_source(Path::new("document.tex"))?;
//! let arena = AstArena::for_source(source.len());
//! let tree = ContextParser::new().parse(&arena, &source)?;
//!
//! let mut reporter = TextReporter::new(std::io::stdout().lock());
//! SpellChecker::with_options(oracle, config.check_options()).check_tree(&tree, &mut reporter)?;
//! # Ok(())
//! # }
//! ```

mod checker;
mod config;
mod dictionary;
mod error;
mod finding;
mod oracle;
mod report;
mod source;

pub use checker::{CheckOptions, CheckSummary, SpellChecker};
pub use config::SpellConfig;
pub use dictionary::{HunspellDictionary, LOCAL_DICTIONARY_DIR, SYSTEM_DICTIONARY_DIRS, search_path};
pub use error::CheckError;
pub use finding::Finding;
pub use oracle::{OracleError, SpellOracle};
pub use report::{Reporter, TextReporter};
pub use source::read_source;

#[cfg(test)]
pub mod test_utils;
