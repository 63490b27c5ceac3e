//! Arena allocator for syntax tree nodes.
//!
//! All nodes for a single document are bump-allocated in the same arena and
//! freed together once checking is complete.

use bumpalo::Bump;

/// Arena allocator for [`SyntaxNode`](crate::SyntaxNode)s.
///
/// # Example
///
/// ```rust
/// use contextspell_ast::AstArena;
///
/// let arena = AstArena::new();
///
/// let value = arena.alloc(42u32);
/// assert_eq!(*value, 42);
///
/// let s = arena.alloc_str("hello");
/// assert_eq!(s, "hello");
/// ```
pub struct AstArena {
    bump: Bump,
}

impl AstArena {
    /// Creates a new arena allocator.
    #[inline]
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Creates a new arena sized for a document of `source_len` bytes.
    ///
    /// Reserves eight bytes of arena per source byte, which holds the nodes
    /// and child slices of typical documents without growing the arena.
    #[inline]
    pub fn for_source(source_len: usize) -> Self {
        Self {
            bump: Bump::with_capacity(source_len.saturating_mul(8)),
        }
    }

    /// Allocates a value in the arena and returns a reference to it.
    #[inline]
    pub fn alloc<T>(&self, val: T) -> &T {
        self.bump.alloc(val)
    }

    /// Allocates a string slice in the arena.
    #[inline]
    pub fn alloc_str(&self, s: &str) -> &str {
        self.bump.alloc_str(s)
    }

    /// Allocates a slice in the arena by copying from the input slice.
    #[inline]
    pub fn alloc_slice_copy<T: Copy>(&self, slice: &[T]) -> &[T] {
        self.bump.alloc_slice_copy(slice)
    }

    /// Returns the total bytes allocated in this arena.
    #[inline]
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }
}

impl Default for AstArena {
    fn default() -> Self {
        Self::new()
    }
}
