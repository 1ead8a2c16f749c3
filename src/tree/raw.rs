use std::{
    ptr::NonNull,
    sync::atomic::{AtomicU64, AtomicUsize, Ordering},
};

use tree_sitter::ffi;

static LIVE_TREES: AtomicUsize = AtomicUsize::new(0);
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(0);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// The number of native trees allocated through this crate that have not been deleted yet.
///
/// Every successful parse and every [`Tree::copy`](crate::Tree::copy) adds one, every native deletion removes one.
pub fn live_trees() -> usize {
    LIVE_TREES.load(Ordering::Acquire)
}

/// Sole owner of one native tree.
///
/// The native tree is deleted exactly once, when this value is dropped. Everything that needs the tree to stay
/// alive shares a `RawTree` through an `Arc` instead of copying the pointer.
///
/// The generation names one state of the tree structure. Every parse starts a new generation, copies keep the
/// generation of their source, and every edit moves the edited tree to a new one.
pub(crate) struct RawTree {
    ptr:        NonNull<ffi::TSTree>,
    generation: u64,
}

// safety: the engine only reads a tree through `*const` accessors, and the single mutating operation (`edit`)
// requires `&mut self`, i.e. exclusive access. Structural sharing between copies is reference counted atomically
// by the engine.
unsafe impl Send for RawTree {}
unsafe impl Sync for RawTree {}

impl RawTree {
    /// Takes ownership of a native tree.
    ///
    /// # Safety
    /// `ptr` must be a tree returned by the engine that nothing else will delete.
    pub(crate) unsafe fn from_raw(ptr: NonNull<ffi::TSTree>) -> Self {
        Self::with_generation(ptr, next_generation())
    }

    unsafe fn with_generation(ptr: NonNull<ffi::TSTree>, generation: u64) -> Self {
        LIVE_TREES.fetch_add(1, Ordering::AcqRel);
        Self { ptr, generation }
    }

    #[inline]
    pub(crate) fn as_ptr(&self) -> *const ffi::TSTree {
        self.ptr.as_ptr()
    }

    #[inline]
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub(crate) fn root(&self) -> ffi::TSNode {
        unsafe { ffi::ts_tree_root_node(self.as_ptr()) }
    }

    #[inline]
    pub(crate) fn language(&self) -> *const ffi::TSLanguage {
        unsafe { ffi::ts_tree_language(self.as_ptr()) }
    }

    /// Shifts offsets and marks changed subtrees in place.
    pub(crate) fn edit(&mut self, edit: &ffi::TSInputEdit) {
        unsafe { ffi::ts_tree_edit(self.ptr.as_ptr(), edit) };
        self.generation = next_generation();
    }
}

impl Clone for RawTree {
    /// Creates a second native tree sharing all subtrees with this one.
    fn clone(&self) -> Self {
        let ptr = unsafe { ffi::ts_tree_copy(self.as_ptr()) };
        // safety: the engine aborts on allocation failure, so a copy is never null, and we are its only owner
        unsafe { Self::with_generation(NonNull::new_unchecked(ptr), self.generation) }
    }
}

impl Drop for RawTree {
    fn drop(&mut self) {
        // safety: we own the tree, and every view into it holds a reference to `self`, so none are left
        unsafe { ffi::ts_tree_delete(self.ptr.as_ptr()) };
        LIVE_TREES.fetch_sub(1, Ordering::AcqRel);
    }
}
