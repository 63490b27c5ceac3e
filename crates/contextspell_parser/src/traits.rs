//! Parser trait definition.

use contextspell_ast::{AstArena, SyntaxTree};

use crate::ParseError;

/// Trait for parsing source text into a syntax tree.
///
/// # Example
///
/// ```rust,ignore
/// use contextspell_parser::Parser;
/// use contextspell_ast::{AstArena, SyntaxTree};
///
/// struct MyParser;
///
/// impl Parser for MyParser {
///     fn name(&self) -> &str {
///         "my-parser"
///     }
///
///     fn extensions(&self) -> &[&str] {
///         &["myext"]
///     }
///
///     fn parse<'a>(
///         &self,
///         arena: &'a AstArena,
///         source: &'a str,
///     ) -> Result<SyntaxTree<'a>, ParseError> {
///         todo!()
///     }
/// }
/// ```
pub trait Parser {
    /// Returns the name of this parser.
    fn name(&self) -> &str;

    /// Returns the file extensions this parser handles.
    ///
    /// Extensions should not include the leading dot (e.g., `["tex", "mkiv"]`).
    fn extensions(&self) -> &[&str];

    /// Parses the source text into a syntax tree.
    ///
    /// # Arguments
    ///
    /// * `arena` - The arena allocator for tree nodes
    /// * `source` - The source text to parse
    ///
    /// # Returns
    ///
    /// The parsed tree, which borrows both the arena and the source.
    fn parse<'a>(&self, arena: &'a AstArena, source: &'a str) -> Result<SyntaxTree<'a>, ParseError>;

    /// Returns true if this parser can handle the given file extension.
    fn can_parse(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
