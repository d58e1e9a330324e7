//! Independent verification of the tree's structural invariants.

use crate::{DomTree, InvariantViolation, Node, NodeId, NodeKind};

impl DomTree {
    /// Walk the whole arena and verify that:
    ///
    /// 1. every link points at a node in the arena;
    /// 2. each child list reads the same forwards (`first_child`,
    ///    `next_sibling`) as backwards (`last_child`, `prev_sibling`);
    /// 3. every listed child points back at its parent, and every node with a
    ///    parent is listed by it;
    /// 4. parentless nodes have no siblings;
    /// 5. scope markers carry no payload;
    /// 6. no node is its own ancestor.
    ///
    /// Runs in O(n · depth). Meant for tests and debug assertions.
    ///
    /// # Errors
    ///
    /// The first [`InvariantViolation`] found.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let len = self.len();
        // Which parent's list each node was found in.
        let mut listed_under: Vec<Option<NodeId>> = vec![None; len];

        for id in self.node_ids() {
            let Some(node) = self.get(id) else { continue };
            let links = node.links;

            for target in [
                links.parent,
                links.first_child,
                links.last_child,
                links.prev_sibling,
                links.next_sibling,
            ]
            .into_iter()
            .flatten()
            {
                if !self.contains(target) {
                    return Err(InvariantViolation::DanglingLink { node: id, target });
                }
            }

            if node.kind == NodeKind::ScopeMarker
                && (!node.data.is_empty() || !node.attributes.is_empty())
            {
                return Err(InvariantViolation::MarkerPayload { node: id });
            }

            if links.parent.is_none() && (links.prev_sibling.is_some() || links.next_sibling.is_some())
            {
                return Err(InvariantViolation::OrphanSibling { node: id });
            }

            let forward = self.walk(id, links.first_child, |child| {
                self.get(child).and_then(Node::next_sibling)
            })?;
            let mut backward = self.walk(id, links.last_child, |child| {
                self.get(child).and_then(Node::prev_sibling)
            })?;
            backward.reverse();
            if forward != backward {
                return Err(InvariantViolation::SiblingMismatch { parent: id });
            }

            for child in forward {
                if self.parent(child) != Some(id) {
                    return Err(InvariantViolation::ParentMismatch { parent: id, child });
                }
                listed_under[child.0] = Some(id);
            }
        }

        for id in self.node_ids() {
            if let Some(parent) = self.parent(id)
                && listed_under[id.0] != Some(parent)
            {
                return Err(InvariantViolation::Unlisted { parent, child: id });
            }
            if self.ancestors(id).take(len).any(|ancestor| ancestor == id) {
                return Err(InvariantViolation::Cycle { node: id });
            }
        }

        Ok(())
    }

    /// Follow `step` from `start`, giving up if the walk is longer than the
    /// arena (which means the sibling chain loops).
    fn walk(
        &self,
        parent: NodeId,
        start: Option<NodeId>,
        step: impl Fn(NodeId) -> Option<NodeId>,
    ) -> Result<Vec<NodeId>, InvariantViolation> {
        let mut seen = Vec::new();
        let mut current = start;
        while let Some(id) = current {
            if seen.len() >= self.len() {
                return Err(InvariantViolation::SiblingMismatch { parent });
            }
            seen.push(id);
            current = step(id);
        }
        Ok(seen)
    }
}
