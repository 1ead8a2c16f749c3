//! Node iterators, all driven by a [`TreeCursor`].

use std::iter::FusedIterator;

use crate::{Node, TreeCursor, WalkEvent};

/// An iterator over the children of a [`Node`].
#[derive(Clone, Debug)]
pub struct Children {
    cursor:    TreeCursor,
    started:   bool,
    remaining: u32,
}

impl Children {
    pub(super) fn new(parent: &Node) -> Self {
        Self {
            cursor:    parent.walk(),
            started:   false,
            remaining: parent.child_count(),
        }
    }
}

impl Iterator for Children {
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let moved = if self.started {
            self.cursor.goto_next_sibling()
        } else {
            self.started = true;
            self.cursor.goto_first_child()
        };
        if !moved {
            self.remaining = 0;
            return None;
        }
        self.remaining -= 1;
        Some(self.cursor.node())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Children {}
impl FusedIterator for Children {}

/// An iterator over the named children of a [`Node`].
#[derive(Clone, Debug)]
pub struct NamedChildren {
    inner: Children,
}

impl NamedChildren {
    pub(super) fn new(parent: &Node) -> Self {
        Self {
            inner: Children::new(parent),
        }
    }
}

impl Iterator for NamedChildren {
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().find(Node::is_named)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

impl FusedIterator for NamedChildren {}

#[derive(Clone, Copy, Debug)]
enum Step {
    Start,
    Entered,
    Skipped,
    Left,
    Done,
}

/// A preorder walk over a subtree, reporting when each node is entered and left.
#[derive(Clone, Debug)]
pub struct Preorder {
    cursor: TreeCursor,
    step:   Step,
}

impl Preorder {
    pub(super) fn new(start: &Node) -> Self {
        Self {
            cursor: start.walk(),
            step:   Step::Start,
        }
    }

    /// Skips the subtree below the node that was just entered; the next event leaves it.
    pub fn skip_subtree(&mut self) {
        if let Step::Entered = self.step {
            self.step = Step::Skipped;
        }
    }
}

impl Iterator for Preorder {
    type Item = WalkEvent<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        let event = match self.step {
            Step::Start => WalkEvent::Enter(self.cursor.node()),
            Step::Entered => {
                if self.cursor.goto_first_child() {
                    WalkEvent::Enter(self.cursor.node())
                } else {
                    WalkEvent::Leave(self.cursor.node())
                }
            }
            Step::Skipped => WalkEvent::Leave(self.cursor.node()),
            Step::Left => {
                if self.cursor.depth() == 0 {
                    self.step = Step::Done;
                    return None;
                }
                if self.cursor.goto_next_sibling() {
                    WalkEvent::Enter(self.cursor.node())
                } else {
                    self.cursor.goto_parent();
                    WalkEvent::Leave(self.cursor.node())
                }
            }
            Step::Done => return None,
        };
        self.step = if event.is_enter() { Step::Entered } else { Step::Left };
        Some(event)
    }
}

impl FusedIterator for Preorder {}
