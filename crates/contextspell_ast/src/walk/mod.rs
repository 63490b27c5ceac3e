//! Tree walking.
//!
//! - [`TreeCursor`] - edge-by-edge movement with parent and sibling access
//! - [`Traverse`] / [`traverse`] - lazy pre-order iterator built on the cursor
//!
//! Neither recurses, so trees of any depth can be walked on a fixed stack.

mod cursor;
mod traverse;

pub use cursor::TreeCursor;
pub use traverse::{Traverse, traverse};
