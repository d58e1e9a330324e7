use thiserror::Error;

use crate::NodeId;

/// Structural precondition violations reported by [`DomTree`](crate::DomTree)
/// operations.
///
/// These indicate the caller broke the contract of the operation, not a
/// transient condition. The tree is left unchanged when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DomError {
    /// The node to insert still has a parent or siblings; detach it first.
    #[error("node {child} is already attached to a tree")]
    AlreadyAttached {
        /// The node that was being inserted.
        child: NodeId,
    },

    /// `child` is not a child of `parent`.
    #[error("node {child} is not a child of {parent}")]
    NotAChild {
        /// The expected parent.
        parent: NodeId,
        /// The node whose parent did not match.
        child: NodeId,
    },

    /// [§ 4.2.3 Mutation algorithms](https://dom.spec.whatwg.org/#concept-node-ensure-pre-insertion-validity)
    ///
    /// "If node is a host-including inclusive ancestor of parent, then throw a
    /// `HierarchyRequestError`."
    #[error("node {child} is an inclusive ancestor of {parent}")]
    HierarchyCycle {
        /// The node that would have become the parent.
        parent: NodeId,
        /// The node that would have become its own ancestor.
        child: NodeId,
    },

    /// The id does not name a node in this tree's arena.
    #[error("node {0} does not exist in this tree")]
    UnknownNode(NodeId),
}

/// A broken structural invariant found by
/// [`DomTree::check_invariants`](crate::DomTree::check_invariants).
///
/// The tree's own operations never produce these; they exist so tests and
/// callers that poke at arena state can verify the tree independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// A link points outside the arena.
    #[error("node {node} links to {target}, which does not exist")]
    DanglingLink {
        /// The node holding the link.
        node: NodeId,
        /// The missing target.
        target: NodeId,
    },

    /// Walking `next_sibling` from `first_child` disagrees with walking
    /// `prev_sibling` from `last_child`.
    #[error("child list of {parent} is inconsistent between forward and backward walks")]
    SiblingMismatch {
        /// The parent whose child list is broken.
        parent: NodeId,
    },

    /// A node in a child list does not point back at that list's parent.
    #[error("node {child} is listed under {parent} but its parent link disagrees")]
    ParentMismatch {
        /// The parent whose list contains the node.
        parent: NodeId,
        /// The listed node.
        child: NodeId,
    },

    /// A node has a parent link but is not in that parent's child list.
    #[error("node {child} claims parent {parent} but is not among its children")]
    Unlisted {
        /// The claimed parent.
        parent: NodeId,
        /// The node with the stale parent link.
        child: NodeId,
    },

    /// A parentless node still has sibling links.
    #[error("node {node} has no parent but has sibling links")]
    OrphanSibling {
        /// The offending node.
        node: NodeId,
    },

    /// A node is its own ancestor.
    #[error("node {node} is its own ancestor")]
    Cycle {
        /// A node on the cycle.
        node: NodeId,
    },

    /// A scope marker carries data or attributes.
    #[error("scope marker {node} carries data or attributes")]
    MarkerPayload {
        /// The offending marker.
        node: NodeId,
    },
}
