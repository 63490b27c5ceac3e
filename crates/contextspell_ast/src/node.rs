//! SyntaxNode definition.
//!
//! The concrete syntax tree node type shared by the parser and the checker.

use std::str::Utf8Error;

use serde::Serialize;
use thiserror::Error;

use crate::walk::TreeCursor;
use crate::{NodeKind, Point, Span};

/// A node in a ConTeXt concrete syntax tree.
///
/// Nodes are allocated in an [`AstArena`](crate::AstArena); the `'a` lifetime
/// ties every child slice to that arena. A node never stores its own text,
/// only its byte span, and the text is decoded from the source on demand.
///
/// # Example
///
/// ```rust
/// use contextspell_ast::{AstArena, NodeKind, Point, Span, SyntaxNode};
///
/// let arena = AstArena::new();
/// let text = SyntaxNode::new_leaf(NodeKind::Text, Span::new(0, 5), Point::new(0, 0), Point::new(0, 5));
/// let children = arena.alloc_slice_copy(&[text]);
/// let root = SyntaxNode::new_parent(NodeKind::Document, Span::new(0, 5), Point::new(0, 0), Point::new(0, 5), children);
///
/// assert_eq!(root.to_sexp(), "(document (text))");
/// ```
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SyntaxNode<'a> {
    /// The grammar symbol of this node.
    #[serde(rename = "type")]
    pub kind: NodeKind,

    /// Byte span in the source text.
    pub span: Span,

    /// Position of the first byte.
    pub start: Point,

    /// Position just past the last byte.
    pub end: Point,

    /// Child nodes in source order.
    #[serde(skip_serializing_if = "is_leaf")]
    pub children: &'a [SyntaxNode<'a>],

    /// Additional node-specific data.
    #[serde(skip_serializing_if = "NodeData::is_none")]
    pub data: NodeData<'a>,
}

fn is_leaf(children: &&[SyntaxNode<'_>]) -> bool {
    children.is_empty()
}

/// Per-kind extra data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NodeData<'a> {
    #[default]
    None,
    /// Environment name of a code or typing inclusion (`luacode`, `XML`, ...).
    Environment(&'a str),
}

impl NodeData<'_> {
    /// Returns true if no data is attached.
    #[inline]
    pub const fn is_none(&self) -> bool {
        matches!(self, NodeData::None)
    }
}

/// Errors raised when reading a node's text out of the source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    /// The span does not fit the source it is applied to.
    #[error("node span {start}..{end} lies outside the {len}-byte source")]
    OutOfBounds {
        /// Span start.
        start: u32,
        /// Span end.
        end: u32,
        /// Source length in bytes.
        len: usize,
    },

    /// The spanned bytes are not valid UTF-8.
    #[error("node text is not valid UTF-8: {0}")]
    Utf8(#[from] Utf8Error),
}

impl<'a> SyntaxNode<'a> {
    /// Creates a new node with children.
    #[inline]
    pub const fn new_parent(
        kind: NodeKind,
        span: Span,
        start: Point,
        end: Point,
        children: &'a [SyntaxNode<'a>],
    ) -> Self {
        Self {
            kind,
            span,
            start,
            end,
            children,
            data: NodeData::None,
        }
    }

    /// Creates a new leaf node.
    #[inline]
    pub const fn new_leaf(kind: NodeKind, span: Span, start: Point, end: Point) -> Self {
        Self::new_parent(kind, span, start, end, &[])
    }

    /// Returns the same node with `data` attached.
    #[inline]
    pub const fn with_data(mut self, data: NodeData<'a>) -> Self {
        self.data = data;
        self
    }

    /// Returns the 0-based line of the node's first byte.
    #[inline]
    pub const fn start_line(&self) -> u32 {
        self.start.row
    }

    /// Returns true if this node has children.
    #[inline]
    pub const fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Decodes the node's bytes from `source` as UTF-8.
    pub fn utf8_text<'s>(&self, source: &'s [u8]) -> Result<&'s str, TextError> {
        let bytes = source
            .get(self.span.range())
            .ok_or(TextError::OutOfBounds {
                start: self.span.start,
                end: self.span.end,
                len: source.len(),
            })?;
        Ok(std::str::from_utf8(bytes)?)
    }

    /// Renders this subtree as an S-expression of node kinds.
    ///
    /// Uses a [`TreeCursor`] instead of recursion, so arbitrarily deep trees
    /// render without growing the call stack.
    pub fn to_sexp(&self) -> String {
        let mut out = String::new();
        let mut cursor = TreeCursor::new(self);

        loop {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push('(');
            out.push_str(cursor.node().kind.as_str());

            if cursor.goto_first_child() {
                continue;
            }
            out.push(')');

            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return out;
                }
                out.push(')');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AstArena;
    use pretty_assertions::assert_eq;

    fn leaf(kind: NodeKind, start: u32, end: u32) -> SyntaxNode<'static> {
        SyntaxNode::new_leaf(
            kind,
            Span::new(start, end),
            Point::new(0, start),
            Point::new(0, end),
        )
    }

    #[test]
    fn test_new_leaf() {
        let node = leaf(NodeKind::Text, 0, 5);

        assert_eq!(node.kind, NodeKind::Text);
        assert!(!node.has_children());
        assert!(node.data.is_none());
    }

    #[test]
    fn test_new_parent() {
        let arena = AstArena::new();
        let children = arena.alloc_slice_copy(&[leaf(NodeKind::Text, 0, 5)]);
        let node = SyntaxNode::new_parent(
            NodeKind::TextBlock,
            Span::new(0, 5),
            Point::new(0, 0),
            Point::new(0, 5),
            children,
        );

        assert!(node.has_children());
        assert_eq!(node.children.len(), 1);
    }

    #[test]
    fn test_start_line() {
        let node = SyntaxNode::new_leaf(
            NodeKind::Text,
            Span::new(40, 45),
            Point::new(3, 2),
            Point::new(3, 7),
        );
        assert_eq!(node.start_line(), 3);
    }

    #[test]
    fn test_utf8_text() {
        let source = "\\emph{naïve} text";
        let node = leaf(NodeKind::Text, 6, 12);
        assert_eq!(node.utf8_text(source.as_bytes()), Ok("naïve"));
    }

    #[test]
    fn test_utf8_text_out_of_bounds() {
        let node = leaf(NodeKind::Text, 4, 20);
        assert_eq!(
            node.utf8_text(b"short"),
            Err(TextError::OutOfBounds {
                start: 4,
                end: 20,
                len: 5
            })
        );
    }

    #[test]
    fn test_utf8_text_splitting_a_character() {
        // "ï" is two bytes; a span ending between them cannot decode.
        let node = leaf(NodeKind::Text, 0, 3);
        let err = node.utf8_text("naïve".as_bytes()).unwrap_err();
        assert!(matches!(err, TextError::Utf8(_)));
    }

    #[test]
    fn test_with_data() {
        let node = leaf(NodeKind::CodeInclusion, 0, 30).with_data(NodeData::Environment("luacode"));
        assert_eq!(node.data, NodeData::Environment("luacode"));
    }

    #[test]
    fn test_sexp_single_node() {
        assert_eq!(leaf(NodeKind::Document, 0, 0).to_sexp(), "(document)");
    }

    #[test]
    fn test_sexp_nested() {
        let arena = AstArena::new();
        let name = leaf(NodeKind::CommandName, 0, 5);
        let text = leaf(NodeKind::Text, 6, 10);
        let scope_children = arena.alloc_slice_copy(&[SyntaxNode::new_leaf(
            NodeKind::Text,
            Span::new(6, 10),
            Point::new(0, 6),
            Point::new(0, 10),
        )]);
        let scope = SyntaxNode::new_parent(
            NodeKind::CommandScope,
            Span::new(5, 11),
            Point::new(0, 5),
            Point::new(0, 11),
            scope_children,
        );
        let command_children = arena.alloc_slice_copy(&[name, scope]);
        let command = SyntaxNode::new_parent(
            NodeKind::Command,
            Span::new(0, 11),
            Point::new(0, 0),
            Point::new(0, 11),
            command_children,
        );
        let main_children = arena.alloc_slice_copy(&[command, text]);
        let main = SyntaxNode::new_parent(
            NodeKind::Main,
            Span::new(0, 11),
            Point::new(0, 0),
            Point::new(0, 11),
            main_children,
        );

        assert_eq!(
            main.to_sexp(),
            "(main (command (command_name) (command_scope (text))) (text))"
        );
    }

    #[test]
    fn test_serialization() {
        let arena = AstArena::new();
        let children = arena.alloc_slice_copy(&[leaf(NodeKind::CodeBody, 12, 20)]);
        let node = SyntaxNode::new_parent(
            NodeKind::CodeInclusion,
            Span::new(0, 30),
            Point::new(0, 0),
            Point::new(2, 11),
            children,
        )
        .with_data(NodeData::Environment("luacode"));

        let json = serde_json::to_value(node).unwrap();

        assert_eq!(json["type"], "code_inclusion");
        assert_eq!(json["span"]["start"], 0);
        assert_eq!(json["end"]["row"], 2);
        assert_eq!(json["data"], "luacode");
        assert_eq!(json["children"][0]["type"], "code_body");
        assert!(json["children"][0].get("children").is_none());
        assert!(json["children"][0].get("data").is_none());
    }
}
