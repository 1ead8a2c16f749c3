//! Views into a [`Tree`](crate::Tree).
//!
//! [`Node`]s are cheap, stateless views that recompute every relation on demand; hold as many as you like.
//! A [`TreeCursor`] keeps a single mutable position and reuses its path through the tree, which makes sequential
//! and structural walks cheaper than repeated node navigation. Both keep their tree alive.

mod cursor;
mod dump;
mod iter;
mod node;

pub use self::{
    cursor::TreeCursor,
    iter::{Children, NamedChildren, Preorder},
    node::Node,
};
