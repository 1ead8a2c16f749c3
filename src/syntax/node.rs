use std::{
    ffi::c_void,
    fmt,
    hash::{Hash, Hasher},
    iter,
    ops::Range,
    ptr,
    sync::Arc,
};

use text_size::{TextRange, TextSize};
use tree_sitter::ffi;

use super::{dump, Children, NamedChildren, Preorder, TreeCursor};
use crate::{grammar::static_str, tree::RawTree, Direction, Grammar, Point};

/// A view of one node in a syntax tree.
///
/// Nodes are cheap to clone and hold a strong reference to their tree, so the tree stays alive for as long as any
/// of its nodes do. Every accessor is a pure read. Relations that may not exist (the root's parent, the last
/// child's next sibling, ...) return `Option`s.
///
/// Equality and hashing go by identity: two nodes are equal if they denote the same position in the same tree
/// structure. That includes the corresponding position in a [`copy`](crate::Tree::copy) of the tree, for as long as
/// neither side is edited. Nodes from before and after an [`edit`](crate::Tree::edit) are never equal, and neither
/// are nodes of separate parses, even if one reused parts of the other or the parsed texts are the same.
#[derive(Clone)]
pub struct Node {
    tree: Arc<RawTree>,
    raw:  ffi::TSNode,
}

// safety: node accessors only read the tree, which is immutable while shared (see `Tree::edit`), and the `Arc`
// keeps it alive on every thread holding a node
unsafe impl Send for Node {}
unsafe impl Sync for Node {}

impl Node {
    #[inline]
    pub(crate) fn new(tree: Arc<RawTree>, raw: ffi::TSNode) -> Self {
        Self { tree, raw }
    }

    #[inline]
    pub(crate) fn raw(&self) -> ffi::TSNode {
        self.raw
    }

    #[inline]
    pub(crate) fn tree(&self) -> &Arc<RawTree> {
        &self.tree
    }

    /// The identity of this node's position: the structure generation of its tree, and the engine's id for the
    /// position. The root's id lives in the native tree handle rather than in the shared structure, so all roots of
    /// a generation share one key.
    fn identity(&self) -> (u64, *const c_void) {
        let id = if self.raw.id == self.tree.root().id {
            ptr::null()
        } else {
            self.raw.id
        };
        (self.tree.generation(), id)
    }

    /// Wraps a node related to this one, sharing ownership of the same tree.
    #[inline]
    fn related(&self, raw: ffi::TSNode) -> Option<Node> {
        if unsafe { ffi::ts_node_is_null(raw) } {
            None
        } else {
            Some(Self::new(Arc::clone(&self.tree), raw))
        }
    }

    /// The grammar's numeric id for this node's kind.
    #[inline]
    pub fn kind_id(&self) -> u16 {
        unsafe { ffi::ts_node_symbol(self.raw) }
    }

    /// The grammar's name for this node's kind. Error nodes are named `ERROR`.
    #[inline]
    pub fn kind(&self) -> &'static str {
        // safety: kind names are owned by the grammar, which lives forever
        unsafe { static_str(ffi::ts_node_type(self.raw)) }.unwrap_or_default()
    }

    /// The grammar this node's tree was parsed with.
    pub fn grammar(&self) -> Grammar {
        // safety: see `Tree::grammar`
        unsafe { Grammar::from_raw(self.tree.language()) }
    }

    /// Whether the node is a named construct of the grammar, as opposed to punctuation or other anonymous tokens.
    #[inline]
    pub fn is_named(&self) -> bool {
        unsafe { ffi::ts_node_is_named(self.raw) }
    }

    /// Whether the node was inserted by error recovery to stand in for a missing token.
    #[inline]
    pub fn is_missing(&self) -> bool {
        unsafe { ffi::ts_node_is_missing(self.raw) }
    }

    /// Whether the node is an extra, e.g. a comment, that may appear anywhere in the grammar.
    #[inline]
    pub fn is_extra(&self) -> bool {
        unsafe { ffi::ts_node_is_extra(self.raw) }
    }

    /// Whether the node was touched by an [`edit`](crate::Tree::edit) that has not been reparsed yet.
    #[inline]
    pub fn has_changes(&self) -> bool {
        unsafe { ffi::ts_node_has_changes(self.raw) }
    }

    /// Whether the node or any of its descendants is a syntax error or was recovered from one.
    #[inline]
    pub fn has_error(&self) -> bool {
        unsafe { ffi::ts_node_has_error(self.raw) }
    }

    #[inline]
    pub fn start_byte(&self) -> u32 {
        unsafe { ffi::ts_node_start_byte(self.raw) }
    }

    #[inline]
    pub fn end_byte(&self) -> u32 {
        unsafe { ffi::ts_node_end_byte(self.raw) }
    }

    /// The range this node covers in the source text, in bytes.
    #[inline]
    pub fn text_range(&self) -> TextRange {
        TextRange::new(TextSize::from(self.start_byte()), TextSize::from(self.end_byte()))
    }

    #[inline]
    pub fn byte_range(&self) -> Range<usize> {
        self.start_byte() as usize..self.end_byte() as usize
    }

    #[inline]
    pub fn start_position(&self) -> Point {
        Point::from_raw(unsafe { ffi::ts_node_start_point(self.raw) })
    }

    #[inline]
    pub fn end_position(&self) -> Point {
        Point::from_raw(unsafe { ffi::ts_node_end_point(self.raw) })
    }

    /// The source text covered by this node, if `source` is the text the tree was parsed from and the covered
    /// bytes are valid UTF-8.
    pub fn utf8_text<'s>(&self, source: &'s [u8]) -> Option<&'s str> {
        std::str::from_utf8(source.get(self.byte_range())?).ok()
    }

    /// The number of children of this node, named and anonymous.
    #[inline]
    pub fn child_count(&self) -> u32 {
        unsafe { ffi::ts_node_child_count(self.raw) }
    }

    /// The number of named children of this node.
    #[inline]
    pub fn named_child_count(&self) -> u32 {
        unsafe { ffi::ts_node_named_child_count(self.raw) }
    }

    /// The `index`-th child of this node, counting named and anonymous children.
    ///
    /// Iterating with [`children`](Node::children) is cheaper than repeated indexing.
    #[inline]
    pub fn child(&self, index: u32) -> Option<Node> {
        self.related(unsafe { ffi::ts_node_child(self.raw, index) })
    }

    /// The `index`-th named child of this node. Anonymous children are skipped and not counted.
    #[inline]
    pub fn named_child(&self, index: u32) -> Option<Node> {
        self.related(unsafe { ffi::ts_node_named_child(self.raw, index) })
    }

    /// The parent of this node, except if this node is the root.
    #[inline]
    pub fn parent(&self) -> Option<Node> {
        self.related(unsafe { ffi::ts_node_parent(self.raw) })
    }

    #[inline]
    pub fn next_sibling(&self) -> Option<Node> {
        self.related(unsafe { ffi::ts_node_next_sibling(self.raw) })
    }

    #[inline]
    pub fn prev_sibling(&self) -> Option<Node> {
        self.related(unsafe { ffi::ts_node_prev_sibling(self.raw) })
    }

    #[inline]
    pub fn next_named_sibling(&self) -> Option<Node> {
        self.related(unsafe { ffi::ts_node_next_named_sibling(self.raw) })
    }

    #[inline]
    pub fn prev_named_sibling(&self) -> Option<Node> {
        self.related(unsafe { ffi::ts_node_prev_named_sibling(self.raw) })
    }

    /// Returns an iterator along the chain of parents of this node, starting with this node.
    pub fn ancestors(&self) -> impl Iterator<Item = Node> {
        iter::successors(Some(self.clone()), Node::parent)
    }

    /// Returns an iterator over this node and its siblings in the given direction.
    pub fn siblings(&self, direction: Direction) -> impl Iterator<Item = Node> {
        iter::successors(Some(self.clone()), move |node| match direction {
            Direction::Next => node.next_sibling(),
            Direction::Prev => node.prev_sibling(),
        })
    }

    /// Returns an iterator over all children of this node, named and anonymous.
    #[inline]
    pub fn children(&self) -> Children {
        Children::new(self)
    }

    /// Returns an iterator over the named children of this node.
    #[inline]
    pub fn named_children(&self) -> NamedChildren {
        NamedChildren::new(self)
    }

    /// Returns an iterator over the subtree rooted at this node, in preorder.
    #[inline]
    pub fn preorder(&self) -> Preorder {
        Preorder::new(self)
    }

    /// A cursor positioned at this node. The cursor cannot move above this node.
    #[inline]
    pub fn walk(&self) -> TreeCursor {
        TreeCursor::new(self)
    }

    /// Renders the kind structure of this subtree as an S-expression, e.g. `(document (array (number) (null)))`.
    ///
    /// Named nodes are rendered as `(kind children...)`, anonymous tokens are left out, and tokens inserted by
    /// error recovery appear as `(MISSING kind)`. The output is deterministic for a given tree, but meant for
    /// debugging and tests, not as a stable interchange format.
    pub fn to_sexp(&self) -> String {
        dump::sexp(self)
    }
}

// Identity semantics for hash & eq
impl PartialEq for Node {
    fn eq(&self, other: &Node) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:?}", self.kind(), self.text_range())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sexp())
    }
}
