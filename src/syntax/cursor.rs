use std::{fmt, sync::Arc};

use tree_sitter::ffi;

use crate::{tree::RawTree, Node};

/// A stateful walker over a syntax tree.
///
/// A cursor keeps one private position and moves it in place. Moving a cursor reuses the path it already walked,
/// which makes sequential and structural walks cheaper than repeated [`Node`] navigation. Cloning a cursor yields
/// an independent cursor at the same position.
///
/// Moves never fail loudly: a move that does not exist returns `false` (or `None`) and leaves the position
/// unchanged. A cursor created from a node treats that node as its root and cannot move above or beside it.
///
/// A cursor is `Send` but not `Sync`, and all moves take `&mut self`.
pub struct TreeCursor {
    tree: Arc<RawTree>,
    raw:  ffi::TSTreeCursor,
}

// safety: the cursor owns its position stack, and only reads the tree, which the `Arc` keeps alive
unsafe impl Send for TreeCursor {}

impl TreeCursor {
    pub(crate) fn new(node: &Node) -> Self {
        Self {
            tree: Arc::clone(node.tree()),
            raw:  unsafe { ffi::ts_tree_cursor_new(node.raw()) },
        }
    }

    /// The node at the cursor's current position.
    #[inline]
    pub fn node(&self) -> Node {
        Node::new(Arc::clone(&self.tree), unsafe {
            ffi::ts_tree_cursor_current_node(&self.raw)
        })
    }

    /// How far the cursor is below the node it was created from.
    #[inline]
    pub fn depth(&self) -> u32 {
        unsafe { ffi::ts_tree_cursor_current_depth(&self.raw) }
    }

    /// Moves to the first child of the current node. Returns `false` if the current node is a leaf.
    #[inline]
    pub fn goto_first_child(&mut self) -> bool {
        unsafe { ffi::ts_tree_cursor_goto_first_child(&mut self.raw) }
    }

    /// Moves to the parent of the current node. Returns `false` at the node the cursor was created from.
    #[inline]
    pub fn goto_parent(&mut self) -> bool {
        unsafe { ffi::ts_tree_cursor_goto_parent(&mut self.raw) }
    }

    /// Moves to the next sibling of the current node. Returns `false` at the last sibling.
    #[inline]
    pub fn goto_next_sibling(&mut self) -> bool {
        unsafe { ffi::ts_tree_cursor_goto_next_sibling(&mut self.raw) }
    }

    /// Descends directly into the first child of the current node that extends beyond `byte`, without visiting the
    /// children before it.
    ///
    /// For an offset inside a child's span this is the child containing it. Returns the index of the child moved
    /// to, or `None` if the offset is at or beyond the end of every child; the position is then unchanged.
    #[inline]
    pub fn goto_first_child_for_byte(&mut self, byte: u32) -> Option<u32> {
        let index = unsafe { ffi::ts_tree_cursor_goto_first_child_for_byte(&mut self.raw, byte) };
        u32::try_from(index).ok()
    }

    /// Repositions the cursor at `node`, which becomes its new root. `node` may belong to a different tree.
    pub fn reset(&mut self, node: &Node) {
        unsafe { ffi::ts_tree_cursor_reset(&mut self.raw, node.raw()) };
        self.tree = Arc::clone(node.tree());
    }
}

impl Clone for TreeCursor {
    fn clone(&self) -> Self {
        Self {
            tree: Arc::clone(&self.tree),
            raw:  unsafe { ffi::ts_tree_cursor_copy(&self.raw) },
        }
    }
}

impl Drop for TreeCursor {
    fn drop(&mut self) {
        // safety: `tree` is dropped after this, so the cursor is released while its tree is still alive
        unsafe { ffi::ts_tree_cursor_delete(&mut self.raw) }
    }
}

impl fmt::Debug for TreeCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeCursor")
            .field("node", &self.node())
            .field("depth", &self.depth())
            .finish()
    }
}
