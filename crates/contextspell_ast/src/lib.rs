//! # contextspell_ast
//!
//! Concrete syntax tree definitions for ContextSpell.
//!
//! This crate provides the node model the parser produces and the checker
//! consumes, plus the cursor-based traversal that linearizes a tree into
//! document order.
//!
//! ## Architecture
//!
//! - Uses `bumpalo` for arena allocation
//! - All nodes of a document are allocated in a single arena and freed together
//! - Nodes store byte spans and positions, never copies of the text
//! - Parent and sibling access goes through [`walk::TreeCursor`], so nodes
//!   carry no back-references
//!
//! ## Example
//!
//! ```rust
//! use contextspell_ast::{AstArena, NodeKind, Point, Span, SyntaxNode, SyntaxTree};
//!
//! let arena = AstArena::new();
//! let source = "Hello";
//! let text = SyntaxNode::new_leaf(NodeKind::Text, Span::new(0, 5), Point::new(0, 0), Point::new(0, 5));
//! let root = arena.alloc(SyntaxNode::new_parent(
//!     NodeKind::Document,
//!     Span::new(0, 5),
//!     Point::new(0, 0),
//!     Point::new(0, 5),
//!     arena.alloc_slice_copy(&[text]),
//! ));
//!
//! let tree = SyntaxTree::new(source, root);
//! let texts: Vec<_> = tree
//!     .traverse()
//!     .filter(|node| node.kind == NodeKind::Text)
//!     .map(|node| tree.text(node).unwrap())
//!     .collect();
//! assert_eq!(texts, ["Hello"]);
//! ```

mod arena;
mod node;
mod node_kind;
mod span;
mod tree;
pub mod walk;

pub use arena::AstArena;
pub use node::{NodeData, SyntaxNode, TextError};
pub use node_kind::{NodeKind, UnknownNodeKind};
pub use span::{Point, Span};
pub use tree::SyntaxTree;

// Re-export the walker for convenience
pub use walk::{Traverse, TreeCursor, traverse};
