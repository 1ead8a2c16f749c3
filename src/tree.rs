//! Owned syntax trees and the edit descriptors used to prepare them for incremental reparsing.

mod edit;
mod raw;

use std::{fmt, sync::Arc};

use tracing::{debug, trace};

pub(crate) use self::raw::RawTree;
pub use self::{
    edit::{InputEdit, Point},
    raw::live_trees,
};
use crate::{Grammar, Node, TreeCursor};

/// A syntax tree produced by a successful parse.
///
/// The tree owns one native tree. [`Node`]s and [`TreeCursor`]s derived from it share that ownership, so the native
/// tree is deleted once the tree and all of its views are gone. Use [`Tree::release`] to free it deterministically.
pub struct Tree {
    raw: Arc<RawTree>,
}

impl Tree {
    pub(crate) fn new(raw: RawTree) -> Self {
        Self { raw: Arc::new(raw) }
    }

    #[inline]
    pub(crate) fn raw(&self) -> &RawTree {
        &self.raw
    }

    /// The root of the tree. The root never has a parent.
    #[inline]
    pub fn root_node(&self) -> Node {
        Node::new(Arc::clone(&self.raw), self.raw.root())
    }

    /// The grammar this tree was parsed with.
    pub fn grammar(&self) -> Grammar {
        // safety: the tree's language is the grammar it was parsed with, which outlives it
        unsafe { Grammar::from_raw(self.raw.language()) }
    }

    /// A cursor positioned at the root of the tree.
    #[inline]
    pub fn walk(&self) -> TreeCursor {
        self.root_node().walk()
    }

    /// Marks a text change in the tree, so the tree can be passed as the previous tree of the next parse.
    ///
    /// This shifts the offsets of everything after the edit and flags the subtrees that overlap it as changed. It
    /// never reparses. Nodes and cursors obtained before the edit are not affected: if any of them are still alive,
    /// the tree first detaches onto its own copy of the structure and they keep observing the pre-edit state.
    pub fn edit(&mut self, edit: &InputEdit) {
        let views = Arc::strong_count(&self.raw) - 1;
        if views > 0 {
            trace!(views, "detaching tree from outstanding views before edit");
        }
        trace!(
            start = edit.start_byte,
            old_end = edit.old_end_byte,
            new_end = edit.new_end_byte,
            "editing tree"
        );
        Arc::make_mut(&mut self.raw).edit(&edit.to_raw());
    }

    /// A second, independently owned tree sharing all structure with this one.
    ///
    /// Either tree may be edited, dropped or sent to another thread without affecting the other.
    pub fn copy(&self) -> Tree {
        Self::new(RawTree::clone(&self.raw))
    }

    /// Gives up this handle and releases the native tree right away if no node or cursor still refers to it.
    ///
    /// Returns `true` if the native tree was freed, `false` if live views keep it alive. In the latter case it is
    /// freed as soon as the last of them is dropped.
    pub fn release(self) -> bool {
        match Arc::try_unwrap(self.raw) {
            Ok(raw) => {
                drop(raw);
                debug!("released native tree");
                true
            }
            Err(shared) => {
                debug!(
                    views = Arc::strong_count(&shared) - 1,
                    "native tree release deferred to outstanding views"
                );
                false
            }
        }
    }
}

impl Clone for Tree {
    /// Same as [`Tree::copy`].
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree").field("root", &self.root_node()).finish()
    }
}
