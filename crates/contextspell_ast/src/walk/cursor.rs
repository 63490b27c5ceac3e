//! Stateful cursor over a syntax tree.

use std::slice;

use crate::SyntaxNode;

/// One level of the cursor's ancestor chain: the slice of siblings the
/// current node lives in and its index within that slice.
#[derive(Debug, Clone, Copy)]
struct Frame<'a> {
    siblings: &'a [SyntaxNode<'a>],
    index: usize,
}

impl<'a> Frame<'a> {
    #[inline]
    fn node(&self) -> &'a SyntaxNode<'a> {
        &self.siblings[self.index]
    }
}

/// A cursor that moves over a tree one edge at a time.
///
/// Nodes do not store parent or sibling links. The cursor provides them
/// instead by keeping a stack of frames, one per ancestor level, so moving to
/// a parent or to the next sibling is O(1) and never recurses.
///
/// The node the cursor was created on acts as the root: it has no parent and
/// no siblings, even if it is a child of some larger tree.
#[derive(Debug, Clone)]
pub struct TreeCursor<'a> {
    stack: Vec<Frame<'a>>,
}

impl<'a> TreeCursor<'a> {
    /// Creates a cursor positioned on `root`.
    pub fn new(root: &'a SyntaxNode<'a>) -> Self {
        Self {
            stack: vec![Frame {
                siblings: slice::from_ref(root),
                index: 0,
            }],
        }
    }

    /// Returns the node the cursor is positioned on.
    #[inline]
    pub fn node(&self) -> &'a SyntaxNode<'a> {
        // The stack always holds at least the root frame.
        self.stack[self.stack.len() - 1].node()
    }

    /// Returns how many edges separate the current node from the root.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Moves to the first child of the current node.
    ///
    /// Returns false, leaving the cursor in place, if the node is a leaf.
    pub fn goto_first_child(&mut self) -> bool {
        let children = self.node().children;
        if children.is_empty() {
            return false;
        }
        self.stack.push(Frame {
            siblings: children,
            index: 0,
        });
        true
    }

    /// Moves to the next sibling of the current node.
    ///
    /// Returns false, leaving the cursor in place, if the node is the last
    /// child of its parent or is the root.
    pub fn goto_next_sibling(&mut self) -> bool {
        if self.stack.len() == 1 {
            return false;
        }
        let last = self.stack.len() - 1;
        let frame = &mut self.stack[last];
        if frame.index + 1 >= frame.siblings.len() {
            return false;
        }
        frame.index += 1;
        true
    }

    /// Moves to the parent of the current node.
    ///
    /// Returns false, leaving the cursor in place, if the node is the root.
    pub fn goto_parent(&mut self) -> bool {
        if self.stack.len() == 1 {
            return false;
        }
        self.stack.pop();
        true
    }

    /// Repositions the cursor on a new root.
    pub fn reset(&mut self, root: &'a SyntaxNode<'a>) {
        self.stack.clear();
        self.stack.push(Frame {
            siblings: slice::from_ref(root),
            index: 0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AstArena, NodeKind, Point, Span};

    fn node<'a>(kind: NodeKind, start: u32, children: &'a [SyntaxNode<'a>]) -> SyntaxNode<'a> {
        SyntaxNode::new_parent(
            kind,
            Span::new(start, start + 1),
            Point::new(start, 0),
            Point::new(start, 1),
            children,
        )
    }

    /// document -> [main -> [text, command], postamble]
    fn sample(arena: &AstArena) -> &SyntaxNode<'_> {
        let leaves = arena.alloc_slice_copy(&[
            node(NodeKind::Text, 2, &[]),
            node(NodeKind::Command, 3, &[]),
        ]);
        let areas = arena.alloc_slice_copy(&[
            node(NodeKind::Main, 1, leaves),
            node(NodeKind::Postamble, 4, &[]),
        ]);
        arena.alloc(node(NodeKind::Document, 0, areas))
    }

    #[test]
    fn test_starts_at_root() {
        let arena = AstArena::new();
        let cursor = TreeCursor::new(sample(&arena));

        assert_eq!(cursor.node().kind, NodeKind::Document);
        assert_eq!(cursor.depth(), 0);
    }

    #[test]
    fn test_root_has_no_parent_or_sibling() {
        let arena = AstArena::new();
        let mut cursor = TreeCursor::new(sample(&arena));

        assert!(!cursor.goto_parent());
        assert!(!cursor.goto_next_sibling());
        assert_eq!(cursor.node().kind, NodeKind::Document);
    }

    #[test]
    fn test_moves_along_edges() {
        let arena = AstArena::new();
        let mut cursor = TreeCursor::new(sample(&arena));

        assert!(cursor.goto_first_child());
        assert_eq!(cursor.node().kind, NodeKind::Main);
        assert!(cursor.goto_first_child());
        assert_eq!(cursor.node().kind, NodeKind::Text);
        assert_eq!(cursor.depth(), 2);

        assert!(!cursor.goto_first_child());
        assert!(cursor.goto_next_sibling());
        assert_eq!(cursor.node().kind, NodeKind::Command);
        assert!(!cursor.goto_next_sibling());

        assert!(cursor.goto_parent());
        assert_eq!(cursor.node().kind, NodeKind::Main);
        assert!(cursor.goto_next_sibling());
        assert_eq!(cursor.node().kind, NodeKind::Postamble);
        assert!(!cursor.goto_next_sibling());

        assert!(cursor.goto_parent());
        assert_eq!(cursor.node().kind, NodeKind::Document);
        assert_eq!(cursor.depth(), 0);
    }

    #[test]
    fn test_subtree_root_ignores_real_siblings() {
        let arena = AstArena::new();
        let root = sample(&arena);
        let mut cursor = TreeCursor::new(&root.children[0]);

        assert_eq!(cursor.node().kind, NodeKind::Main);
        assert!(!cursor.goto_next_sibling());
        assert!(!cursor.goto_parent());
    }

    #[test]
    fn test_reset() {
        let arena = AstArena::new();
        let root = sample(&arena);
        let mut cursor = TreeCursor::new(root);
        cursor.goto_first_child();
        cursor.goto_first_child();

        cursor.reset(root);

        assert_eq!(cursor.node().kind, NodeKind::Document);
        assert_eq!(cursor.depth(), 0);
    }
}
