/// Direction of a sibling walk, see [`Node::siblings`](crate::Node::siblings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Next,
    Prev,
}

/// `WalkEvent` describes tree walking process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkEvent<T> {
    /// Fired before traversing the node.
    Enter(T),
    /// Fired after the node is traversed.
    Leave(T),
}

impl<T> WalkEvent<T> {
    pub fn map<F: FnOnce(T) -> U, U>(self, f: F) -> WalkEvent<U> {
        match self {
            WalkEvent::Enter(it) => WalkEvent::Enter(f(it)),
            WalkEvent::Leave(it) => WalkEvent::Leave(f(it)),
        }
    }

    /// The node this event is about.
    pub fn into_inner(self) -> T {
        match self {
            WalkEvent::Enter(it) | WalkEvent::Leave(it) => it,
        }
    }

    pub fn is_enter(&self) -> bool {
        matches!(self, WalkEvent::Enter(_))
    }
}
