//! ConTeXt parser.
//!
//! A hand-written, error-tolerant recursive-descent parser for ConTeXt
//! sources. It recognizes the document areas, commands with their option,
//! settings and scope arguments, groups, inline math, comments, and raw code
//! or typing environments. Anything between those is prose and becomes
//! `text` nodes inside `text_block`s.
//!
//! Malformed markup never fails the parse: stray closers become `ERROR`
//! nodes and missing closers are marked by zero-width `ERROR` nodes. Groups,
//! commands and setting values may nest at most [`MAX_NESTING`] levels deep;
//! deeper input is rejected with [`ParseError::InvalidSource`].

mod builder;
mod syntax;

use contextspell_ast::{AstArena, SyntaxTree};
use tracing::debug;

use crate::{ParseError, Parser};

use builder::Builder;
pub use builder::MAX_NESTING;

/// ConTeXt parser.
///
/// # Example
///
/// ```rust
/// use contextspell_ast::{AstArena, NodeKind};
/// use contextspell_parser::{ContextParser, Parser};
///
/// let arena = AstArena::new();
/// let parser = ContextParser::new();
/// let tree = parser.parse(&arena, r"\emph{Hello} world").unwrap();
///
/// let texts: Vec<_> = tree
///     .traverse()
///     .filter(|node| node.kind == NodeKind::Text)
///     .map(|node| tree.text(node).unwrap())
///     .collect();
/// assert_eq!(texts, ["Hello", "world"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextParser;

impl ContextParser {
    /// File extensions supported by this parser.
    const EXTENSIONS: &'static [&'static str] = &["tex", "mkiv", "mkxl", "mkvi"];

    /// Creates a new ConTeXt parser.
    pub fn new() -> Self {
        Self
    }
}

impl Parser for ContextParser {
    fn name(&self) -> &str {
        "context"
    }

    fn extensions(&self) -> &[&str] {
        Self::EXTENSIONS
    }

    fn parse<'a>(&self, arena: &'a AstArena, source: &'a str) -> Result<SyntaxTree<'a>, ParseError> {
        if u32::try_from(source.len()).is_err() {
            return Err(ParseError::invalid_source(format!(
                "source is {} bytes, the limit is {} bytes",
                source.len(),
                u32::MAX
            )));
        }

        let mut builder = Builder::new(arena, source);
        let document = builder.document();
        if let Some(offset) = builder.too_deep() {
            return Err(ParseError::invalid_source_at(
                format!("groups nested more than {MAX_NESTING} levels deep"),
                offset,
            ));
        }
        if builder.position() != source.len() {
            return Err(ParseError::internal(format!(
                "parser stopped at byte {} of {}",
                builder.position(),
                source.len()
            )));
        }

        debug!(
            "Parsed {} bytes into {} top-level areas",
            source.len(),
            document.children.len()
        );
        Ok(SyntaxTree::new(source, arena.alloc(document)))
    }
}
