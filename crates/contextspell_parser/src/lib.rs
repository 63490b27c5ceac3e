//! # contextspell_parser
//!
//! Parsers for ContextSpell.
//!
//! This crate provides the [`Parser`] trait and the built-in
//! [`ContextParser`], which turns ConTeXt source text into a concrete
//! syntax tree allocated in an [`AstArena`](contextspell_ast::AstArena).
//!
//! ## Usage
//!
//! ```rust
//! use contextspell_ast::AstArena;
//! use contextspell_parser::{ContextParser, Parser};
//!
//! let arena = AstArena::new();
//! let tree = ContextParser::new().parse(&arena, r"\starttext Hi \stoptext").unwrap();
//!
//! assert_eq!(
//!     tree.to_sexp(),
//!     "(document (preamble) (main (text_block (text))) (postamble))"
//! );
//! ```

mod context;
mod error;
mod line_index;
mod traits;

pub use context::{ContextParser, MAX_NESTING};
pub use error::ParseError;
pub use line_index::LineIndex;
pub use traits::Parser;
