//! Document tree for the arbor HTML tree builder.
//!
//! This crate provides an arena-based node tree following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/) closely enough for the
//! [HTML tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
//! stage to drive it.
//!
//! # Design
//!
//! Every node lives in a single `Vec` owned by [`DomTree`]. Parent, child and
//! sibling relationships are [`NodeId`] indices into that arena rather than
//! owning pointers, so back-references and cycles in the link graph are
//! harmless and detaching a node only clears indices.
//!
//! Each node keeps `parent`, `first_child`, `last_child`, `prev_sibling` and
//! `next_sibling` links, which makes insertion and removal O(1) without ever
//! scanning a child list.

mod error;
mod invariants;
mod node;
mod outline;
mod tag;
mod tree;

use std::fmt;

pub use error::{DomError, InvariantViolation};
pub use node::{Attribute, Namespace, Node, NodeKind};
pub use outline::outline;
pub use tag::TagId;
pub use tree::{Ancestors, Children, Descendants, DomTree, PrecedingSiblings};

/// A type-safe index into the [`DomTree`] arena.
///
/// `NodeId` provides O(1) access to any node without borrowing the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
