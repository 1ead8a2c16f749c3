//! `tsbind` is a safe ownership layer over the [tree-sitter](https://tree-sitter.github.io/) incremental
//! parsing runtime.
//!
//! The runtime hands out manually reclaimed native trees. This crate wraps every native handle in exactly one
//! owning Rust value and lets any number of lightweight views point into it:
//! - A [`Tree`] owns its native tree through an atomically reference counted owner. The
//!   native tree is deleted exactly once, when the last handle referring to it goes away, or right away through
//!   [`Tree::release`] if nothing else holds on to it.
//! - [`Node`]s are cheap, cloneable, side-effect free views. Each one holds a strong reference to the tree it was
//!   derived from, so a node can never outlive the structure it points into. Nodes are `Send` and `Sync`.
//! - A [`TreeCursor`] is a stateful walker with a private position. It also keeps its tree alive, and all moves
//!   take `&mut self`, so a single cursor cannot be driven from two threads at once.
//! - [`Tree::copy`] yields a second, independently owned native tree sharing immutable structure with the first.
//!   Edits to one copy never affect the other.
//!
//! [`Tree::edit`] only ever touches a native tree that no other handle can observe: if nodes or cursors into the
//! tree are still alive, the tree detaches onto a fresh copy first and those views keep seeing the pre-edit state.
//!
//! ```no_run
//! use tsbind::{Grammar, InputEdit, Parser};
//! # fn grammar() -> Grammar { unimplemented!() }
//! let mut parser = Parser::new();
//! parser.set_grammar(grammar()).unwrap();
//!
//! let source = b"[1, 2]";
//! let mut tree = parser.parse(source, None).unwrap();
//! assert!(!tree.root_node().has_error());
//!
//! let edited = b"[1, 23]";
//! tree.edit(&InputEdit::replace(source, 4, 5, b"23"));
//! let tree = parser.parse(edited, Some(&tree)).unwrap();
//! println!("{}", tree.root_node().to_sexp());
//! ```
#![forbid(
    // missing_debug_implementations,
    unconditional_recursion,
    future_incompatible,
    // missing_docs,
)]
#![deny(unsafe_code)]

mod config;
mod error;
#[allow(unsafe_code)]
mod grammar;
#[allow(unsafe_code)]
mod parser;
#[allow(unsafe_code)]
pub mod syntax;
#[allow(unsafe_code)]
pub mod tree;
mod utility_types;

/// Raw engine bindings, for interop with code that talks to the runtime directly.
pub use tree_sitter::ffi;
// Reexport types for working with byte spans.
pub use text_size::{TextRange, TextSize};

pub use crate::{
    config::ParserConfig,
    error::{LanguageError, ParseError},
    grammar::{Grammar, LANGUAGE_VERSION, MIN_COMPATIBLE_LANGUAGE_VERSION},
    parser::Parser,
    syntax::{Children, NamedChildren, Node, Preorder, TreeCursor},
    tree::{live_trees, InputEdit, Point, Tree},
    utility_types::{Direction, WalkEvent},
};
