//! Pre-order, depth-first node iterator.

use std::iter::FusedIterator;

use crate::SyntaxNode;

use super::TreeCursor;

/// Where the traversal stands between two calls to [`Iterator::next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// The root has not been yielded yet.
    Start,
    /// The cursor is on the most recently yielded node.
    Walking,
    /// Every node has been yielded.
    Done,
}

/// Lazy pre-order, depth-first iterator over every node of a tree.
///
/// Each node is visited before its descendants, descendants are visited left
/// to right, and a subtree is exhausted before the next sibling is visited.
/// This is document order for the nodes' starting positions.
///
/// The iterator is single pass: once it returns `None` it stays exhausted,
/// and walking the tree again needs a fresh `Traverse`.
///
/// # Example
///
/// ```rust
/// use contextspell_ast::{AstArena, NodeKind, Point, Span, SyntaxNode};
/// use contextspell_ast::walk::traverse;
///
/// let arena = AstArena::new();
/// let leaf = |kind| SyntaxNode::new_leaf(kind, Span::new(0, 0), Point::new(0, 0), Point::new(0, 0));
/// let children = arena.alloc_slice_copy(&[leaf(NodeKind::Text), leaf(NodeKind::Command)]);
/// let root = arena.alloc(SyntaxNode::new_parent(
///     NodeKind::Main,
///     Span::new(0, 0),
///     Point::new(0, 0),
///     Point::new(0, 0),
///     children,
/// ));
///
/// let kinds: Vec<_> = traverse(root).map(|node| node.kind).collect();
/// assert_eq!(kinds, [NodeKind::Main, NodeKind::Text, NodeKind::Command]);
/// ```
#[derive(Debug, Clone)]
pub struct Traverse<'a> {
    cursor: TreeCursor<'a>,
    state: State,
}

/// Returns a pre-order iterator over `root` and all of its descendants.
pub fn traverse<'a>(root: &'a SyntaxNode<'a>) -> Traverse<'a> {
    Traverse::new(TreeCursor::new(root))
}

impl<'a> Traverse<'a> {
    /// Creates an iterator that starts from the cursor's current node.
    ///
    /// The cursor's current node is treated as the root of the walk.
    pub fn new(mut cursor: TreeCursor<'a>) -> Self {
        let root = cursor.node();
        cursor.reset(root);
        Self {
            cursor,
            state: State::Start,
        }
    }
}

impl<'a> Iterator for Traverse<'a> {
    type Item = &'a SyntaxNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            State::Done => return None,
            State::Start => {
                self.state = State::Walking;
                return Some(self.cursor.node());
            }
            State::Walking => {}
        }

        if self.cursor.goto_first_child() || self.cursor.goto_next_sibling() {
            return Some(self.cursor.node());
        }

        // Subtree exhausted: climb until an ancestor has a next sibling.
        loop {
            if !self.cursor.goto_parent() {
                self.state = State::Done;
                return None;
            }
            if self.cursor.goto_next_sibling() {
                return Some(self.cursor.node());
            }
        }
    }
}

impl FusedIterator for Traverse<'_> {}
