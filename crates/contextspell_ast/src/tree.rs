//! Parsed document.

use crate::walk::{Traverse, TreeCursor, traverse};
use crate::{SyntaxNode, TextError};

/// A parsed document: the source text and the root of its syntax tree.
///
/// The tree is immutable once built. The source is kept alongside the root
/// because nodes only record byte spans.
#[derive(Debug, Clone, Copy)]
pub struct SyntaxTree<'a> {
    source: &'a str,
    root: &'a SyntaxNode<'a>,
}

impl<'a> SyntaxTree<'a> {
    /// Creates a tree from a source and the root node parsed from it.
    #[inline]
    pub const fn new(source: &'a str, root: &'a SyntaxNode<'a>) -> Self {
        Self { source, root }
    }

    /// Returns the root node.
    #[inline]
    pub const fn root(&self) -> &'a SyntaxNode<'a> {
        self.root
    }

    /// Returns the source text.
    #[inline]
    pub const fn source(&self) -> &'a str {
        self.source
    }

    /// Returns a cursor positioned on the root.
    pub fn walk(&self) -> TreeCursor<'a> {
        TreeCursor::new(self.root)
    }

    /// Returns a pre-order iterator over every node.
    pub fn traverse(&self) -> Traverse<'a> {
        traverse(self.root)
    }

    /// Returns the text a node spans in this tree's source.
    pub fn text(&self, node: &SyntaxNode<'_>) -> Result<&'a str, TextError> {
        node.utf8_text(self.source.as_bytes())
    }

    /// Renders the whole tree as an S-expression.
    pub fn to_sexp(&self) -> String {
        self.root.to_sexp()
    }
}
