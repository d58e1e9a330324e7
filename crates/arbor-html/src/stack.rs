use arbor_common::warning::warn_once;
use arbor_dom::{DomTree, NodeId, NodeKind, TagId};

use crate::StackError;

/// [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
///
/// "Initially, the stack of open elements is empty. The stack grows
/// downwards; the topmost node on the stack is the first one added to the
/// stack, and the bottommost node of the stack is the most recently added
/// node in the stack."
///
/// Here index 0 is the first node pushed (normally `html`) and the last index
/// is the current node. Entries are [`NodeId`]s into a [`DomTree`] the stack
/// does not own: popping never detaches, and detaching never pops.
///
/// Entries are compared by identity. Searches go from the current node
/// downwards because the same node can be open more than once after
/// recovery, and the innermost occurrence is the one that matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackOfOpenElements {
    entries: Vec<NodeId>,
}

impl StackOfOpenElements {
    /// An empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Push `node`; it becomes the current node.
    pub fn push(&mut self, node: NodeId) {
        self.entries.push(node);
    }

    /// Pop the current node.
    ///
    /// # Errors
    ///
    /// [`StackError::EmptyStack`] if nothing is open.
    pub fn pop(&mut self) -> Result<NodeId, StackError> {
        self.entries.pop().ok_or(StackError::EmptyStack)
    }

    /// "The current node is the bottommost node in this stack of open
    /// elements."
    #[must_use]
    pub fn top(&self) -> Option<NodeId> {
        self.entries.last().copied()
    }

    /// The top-most entry that is not a scope marker: where a tree builder
    /// inserts new content while a marker is open.
    #[must_use]
    pub fn current_element(&self, tree: &DomTree) -> Option<NodeId> {
        self.entries
            .iter()
            .rev()
            .copied()
            .find(|&entry| !is_marker(tree, entry))
    }

    /// The first node pushed (the `html` element once parsing is under way).
    #[must_use]
    pub fn bottom(&self) -> Option<NodeId> {
        self.entries.first().copied()
    }

    /// Position of the top-most occurrence of `node`.
    #[must_use]
    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        self.entries.iter().rposition(|&entry| entry == node)
    }

    /// Insert `node` at `position`, shifting the entries above it up by one.
    /// `position == len()` is a push.
    ///
    /// # Errors
    ///
    /// [`StackError::PositionOutOfRange`] if `position > len()`.
    pub fn insert_at(&mut self, position: usize, node: NodeId) -> Result<(), StackError> {
        if position > self.entries.len() {
            return Err(StackError::PositionOutOfRange {
                position,
                len: self.entries.len(),
            });
        }
        self.entries.insert(position, node);
        Ok(())
    }

    /// Remove the top-most occurrence of `node`. Returns `false` (and changes
    /// nothing) if it is not open.
    pub fn remove(&mut self, node: NodeId) -> bool {
        match self.index_of(node) {
            Some(index) => {
                let _ = self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Replace the top-most occurrence of `old` with `new`, as the adoption
    /// agency algorithm does when it swaps an element for its clone. Returns
    /// `false` if `old` is not open.
    pub fn replace(&mut self, old: NodeId, new: NodeId) -> bool {
        match self.index_of(old) {
            Some(index) => {
                self.entries[index] = new;
                true
            }
            None => false,
        }
    }

    /// Number of open entries, markers included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `position` (0 is the bottom).
    #[must_use]
    pub fn get(&self, position: usize) -> Option<NodeId> {
        self.entries.get(position).copied()
    }

    /// Whether `node` is open.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.entries.contains(&node)
    }

    /// Entries from the bottom up. `.rev()` walks from the current node down.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = NodeId> + ExactSizeIterator + '_ {
        self.entries.iter().copied()
    }

    /// The entries, bottom first.
    #[must_use]
    pub fn as_slice(&self) -> &[NodeId] {
        &self.entries
    }

    /// Drop every entry above the first `len`.
    pub fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    /// "Pop elements from the stack of open elements until a `tag` element
    /// has been popped from the stack."
    ///
    /// Returns the popped entries, current node first. If no HTML element
    /// with that tag is open, nothing is popped.
    pub fn pop_until(&mut self, tree: &DomTree, tag: TagId) -> Vec<NodeId> {
        self.pop_until_one_of(tree, &[tag])
    }

    /// Pop until an HTML element with any of `tags` has been popped, e.g.
    /// "until an h1, h2, h3, h4, h5, or h6 element has been popped".
    ///
    /// Returns the popped entries, current node first. If none of the tags
    /// is open, nothing is popped.
    pub fn pop_until_one_of(&mut self, tree: &DomTree, tags: &[TagId]) -> Vec<NodeId> {
        let target = self.entries.iter().rposition(|&entry| {
            tree.get(entry)
                .is_some_and(|node| tags.iter().any(|&tag| node.is_html_element(tag)))
        });
        let Some(index) = target else {
            let names: Vec<&str> = tags.iter().map(|tag| tag.name()).collect();
            warn_once(
                "HTML",
                &format!("pop until <{}> found no such open element", names.join("|")),
            );
            return Vec::new();
        };
        self.entries.drain(index..).rev().collect()
    }

    /// Push the tree's scope marker (see [`DomTree::scope_marker`]).
    ///
    /// Markers are pushed when entering applet, object, marquee, template,
    /// td, th and caption so that scope walks and formatting reconstruction
    /// stop at the boundary. Every push reuses the same marker node.
    pub fn push_marker(&mut self, tree: &mut DomTree) -> NodeId {
        let marker = tree.scope_marker();
        self.entries.push(marker);
        marker
    }

    /// Pop entries until a scope marker has been popped, or the stack is
    /// empty. Returns the popped entries, current node first.
    pub fn clear_to_last_marker(&mut self, tree: &DomTree) -> Vec<NodeId> {
        let start = self
            .entries
            .iter()
            .rposition(|&entry| is_marker(tree, entry))
            .unwrap_or(0);
        self.entries.drain(start..).rev().collect()
    }
}

impl<'a> IntoIterator for &'a StackOfOpenElements {
    type Item = NodeId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, NodeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().copied()
    }
}

pub(crate) fn is_marker(tree: &DomTree, id: NodeId) -> bool {
    tree.get(id)
        .is_some_and(|node| node.kind == NodeKind::ScopeMarker)
}
