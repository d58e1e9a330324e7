use arbor_common::warning::warn_once;

use crate::node::Links;
use crate::{DomError, Node, NodeId, NodeKind, TagId};

macro_rules! trace_mutation {
    ($($arg:tt)*) => {
        #[cfg(feature = "mutation-trace")]
        eprintln!("[TREE] {}", format_args!($($arg)*));
    };
}

/// Arena-based document tree with O(1) node access and mutation.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// "The DOM represents a document as a tree."
///
/// All nodes live in one contiguous vector and refer to each other by
/// [`NodeId`]. Nodes are never freed: a detached node keeps its slot and can
/// be attached again, and the whole arena goes away with the tree.
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The Document node is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node>,
    /// The shared scope marker, allocated on first use.
    scope_marker: Option<NodeId>,
}

impl DomTree {
    /// Create a new tree holding just the Document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            scope_marker: None,
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    ///
    /// Only the payload (kind, data, namespace, attributes, tag id) can be
    /// changed this way; links stay under the tree's control. `tag_id` is not
    /// recomputed when `data` or `namespace` change: rename elements with
    /// [`Node::rename`].
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Number of nodes in the arena, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty. Never true for a tree built with
    /// [`DomTree::new`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` names a node in this arena.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Allocate a node and return its ID.
    ///
    /// The node is stored detached whatever links the value carried.
    pub fn alloc(&mut self, mut node: Node) -> NodeId {
        node.links = Links::default();
        let id = NodeId(self.nodes.len());
        trace_mutation!("alloc {} {id}", node.kind);
        self.nodes.push(node);
        id
    }

    /// The tree's scope marker.
    ///
    /// One detached marker node is allocated the first time this is called and
    /// the same id is returned afterwards, so pushing markers does not grow the
    /// arena. A stack may hold it several times; searches go by identity from
    /// the top.
    pub fn scope_marker(&mut self) -> NodeId {
        if let Some(marker) = self.scope_marker {
            return marker;
        }
        let marker = self.alloc(Node::scope_marker());
        self.scope_marker = Some(marker);
        marker
    }

    /// IDs of every node in the arena, in allocation order.
    pub fn node_ids(&self) -> impl ExactSizeIterator<Item = NodeId> + use<> {
        (0..self.nodes.len()).map(NodeId)
    }

    fn checked(&self, id: NodeId) -> Result<&Node, DomError> {
        self.nodes.get(id.0).ok_or(DomError::UnknownNode(id))
    }

    fn links(&self, id: NodeId) -> Links {
        self.nodes[id.0].links
    }

    fn links_mut(&mut self, id: NodeId) -> &mut Links {
        &mut self.nodes[id.0].links
    }

    /// [§ 4.2.3 Insert](https://dom.spec.whatwg.org/#concept-node-insert)
    ///
    /// Insert `new_child` into `parent` immediately before `reference`, or as
    /// the last child when `reference` is `None`.
    ///
    /// # Errors
    ///
    /// - [`DomError::AlreadyAttached`] if `new_child` has a parent or siblings.
    /// - [`DomError::NotAChild`] if `reference` is not a child of `parent`.
    /// - [`DomError::HierarchyCycle`] if `new_child` is `parent` or one of its
    ///   ancestors.
    /// - [`DomError::UnknownNode`] for an id outside the arena.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DomError> {
        let _ = self.checked(parent)?;
        if self.checked(new_child)?.links.has_parent_or_siblings() {
            return Err(DomError::AlreadyAttached { child: new_child });
        }
        if let Some(reference) = reference
            && self.checked(reference)?.links.parent != Some(parent)
        {
            return Err(DomError::NotAChild {
                parent,
                child: reference,
            });
        }
        if new_child == parent || self.is_descendant_of(parent, new_child) {
            return Err(DomError::HierarchyCycle {
                parent,
                child: new_child,
            });
        }

        self.link(parent, new_child, reference);
        Ok(())
    }

    /// [§ 4.2.3 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before null."
    ///
    /// # Errors
    ///
    /// Same as [`DomTree::insert_before`].
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.insert_before(parent, child, None)
    }

    /// [§ 4.2.3 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// Detach `child` from `parent`. The child keeps its own subtree.
    ///
    /// # Errors
    ///
    /// - [`DomError::NotAChild`] if `child`'s parent is not `parent`.
    /// - [`DomError::UnknownNode`] for an id outside the arena.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let _ = self.checked(parent)?;
        if self.checked(child)?.links.parent != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        self.unlink(parent, child);
        Ok(())
    }

    /// Remove `node` from whatever parent it has. Detached nodes are left
    /// alone.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] for an id outside the arena.
    pub fn detach(&mut self, node: NodeId) -> Result<(), DomError> {
        if let Some(parent) = self.checked(node)?.links.parent {
            self.unlink(parent, node);
        }
        Ok(())
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#adoption-agency-algorithm)
    ///
    /// "Take all of the child nodes of furthest block and append them to the
    /// element created in the last step."
    ///
    /// Moves every child of `source` to the end of `destination`, keeping
    /// their order. Each child is removed from the front of `source` and
    /// appended, so the cost is O(1) per child. Passing the same node twice is
    /// a no-op.
    ///
    /// # Errors
    ///
    /// - [`DomError::HierarchyCycle`] if `destination` is inside `source`'s
    ///   subtree; nothing is moved.
    /// - [`DomError::UnknownNode`] for an id outside the arena.
    pub fn reparent_children(
        &mut self,
        destination: NodeId,
        source: NodeId,
    ) -> Result<(), DomError> {
        let _ = self.checked(destination)?;
        let _ = self.checked(source)?;
        if destination == source {
            warn_once("DOM", "reparenting a node's children onto itself is ignored");
            return Ok(());
        }
        if self.is_descendant_of(destination, source) {
            return Err(DomError::HierarchyCycle {
                parent: destination,
                child: source,
            });
        }

        trace_mutation!("reparent children of {source} to {destination}");
        while let Some(child) = self.links(source).first_child {
            self.unlink(source, child);
            self.link(destination, child, None);
        }
        Ok(())
    }

    /// [§ 4.5 Clone](https://dom.spec.whatwg.org/#concept-node-clone)
    ///
    /// Allocate a shallow copy of `node`: same kind, namespace, tag id, data
    /// and an independent copy of the attributes. The copy is detached and
    /// has no children.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] for an id outside the arena.
    pub fn clone_node(&mut self, node: NodeId) -> Result<NodeId, DomError> {
        let copy = self.checked(node)?.detached_copy();
        Ok(self.alloc(copy))
    }

    /// [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    ///
    /// "If there is a Text node immediately before the adjusted insertion
    /// location, then append data to that Text node's data. Otherwise, create
    /// a new Text node whose data is data ... and insert the newly created
    /// node at the adjusted insertion location."
    ///
    /// Returns the text node that now holds `text`.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] for an id outside the arena.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> Result<NodeId, DomError> {
        if let Some(last) = self.checked(parent)?.links.last_child {
            let node = &mut self.nodes[last.0];
            if node.kind == NodeKind::Text {
                node.data.push_str(text);
                return Ok(last);
            }
        }
        let id = self.alloc(Node::text(text));
        self.link(parent, id, None);
        Ok(id)
    }

    /// Splice a validated, detached `child` into `parent` before `reference`.
    fn link(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        let prev = match reference {
            Some(reference) => self.links(reference).prev_sibling,
            None => self.links(parent).last_child,
        };

        let links = self.links_mut(child);
        links.parent = Some(parent);
        links.prev_sibling = prev;
        links.next_sibling = reference;
        match prev {
            Some(prev) => self.links_mut(prev).next_sibling = Some(child),
            None => self.links_mut(parent).first_child = Some(child),
        }
        match reference {
            Some(reference) => self.links_mut(reference).prev_sibling = Some(child),
            None => self.links_mut(parent).last_child = Some(child),
        }
        trace_mutation!("insert {child} into {parent} before {reference:?}");
    }

    /// Take `child` out of `parent`'s child list and clear its links.
    fn unlink(&mut self, parent: NodeId, child: NodeId) {
        let Links {
            prev_sibling,
            next_sibling,
            ..
        } = self.links(child);

        match prev_sibling {
            Some(prev) => self.links_mut(prev).next_sibling = next_sibling,
            None => self.links_mut(parent).first_child = next_sibling,
        }
        match next_sibling {
            Some(next) => self.links_mut(next).prev_sibling = prev_sibling,
            None => self.links_mut(parent).last_child = prev_sibling,
        }

        let links = self.links_mut(child);
        links.parent = None;
        links.prev_sibling = None;
        links.next_sibling = None;
        trace_mutation!("remove {child} from {parent}");
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::parent)
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::first_child)
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::last_child)
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::prev_sibling)
    }

    /// Iterate over the children of a node, first to last. Use `.rev()` to
    /// walk from `last_child` backwards.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            front: self.first_child(id),
            back: self.last_child(id),
        }
    }

    /// Number of children of a node.
    #[must_use]
    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).count()
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// "An object A is called a descendant of an object B, if either A is a
    /// child of B or A is a child of an object C that is a descendant of B."
    ///
    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over preceding siblings (from immediately before to first child).
    #[must_use]
    pub fn preceding_siblings(&self, id: NodeId) -> PrecedingSiblings<'_> {
        PrecedingSiblings {
            tree: self,
            current: self.prev_sibling(id),
        }
    }

    /// [§ 4.2.6 Tree order](https://dom.spec.whatwg.org/#concept-tree-order)
    ///
    /// Iterate over the descendants of a node in tree order (pre-order,
    /// depth-first), not including the node itself.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            root: id,
            next: self.first_child(id),
        }
    }

    /// Get the node if it is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&Node> {
        self.get(id).filter(|node| node.is_element())
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id)
            .filter(|node| node.kind == NodeKind::Text)
            .map(|node| node.data.as_str())
    }

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// "The document element of a document is the element whose parent is that
    /// document, if it exists; otherwise null."
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .find(|&id| self.as_element(id).is_some())
    }

    /// [§ 3.1.3 The body element](https://html.spec.whatwg.org/multipage/dom.html#the-body-element-2)
    ///
    /// "The body element of a document is the first of the html element's children
    /// that is either a body element or a frameset element, or null if there is
    /// no such element."
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        let html = self.document_element()?;

        self.children(html).find(|&id| {
            self.get(id).is_some_and(|node| {
                node.is_html_element(TagId::Body) || node.is_html_element(TagId::Frameset)
            })
        })
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the children of a node.
pub struct Children<'a> {
    tree: &'a DomTree,
    front: Option<NodeId>,
    back: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.front?;
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.front = self.tree.next_sibling(id);
        }
        Some(id)
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let id = self.back?;
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.back = self.tree.prev_sibling(id);
        }
        Some(id)
    }
}

/// Iterator over ancestors of a node.
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Iterator over preceding siblings of a node.
pub struct PrecedingSiblings<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for PrecedingSiblings<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.prev_sibling(id);
        Some(id)
    }
}

/// Pre-order iterator over the descendants of a node.
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = self.tree.first_child(id).or_else(|| {
            // No children: climb until some ancestor below the root has a
            // following sibling.
            let mut current = id;
            loop {
                if current == self.root {
                    return None;
                }
                if let Some(sibling) = self.tree.next_sibling(current) {
                    return Some(sibling);
                }
                current = self.tree.parent(current)?;
            }
        });
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_clears_links() {
        let mut tree = DomTree::new();
        let a = tree.alloc(Node::element("a"));
        tree.append_child(NodeId::ROOT, a).unwrap();
        // A value copied out of an attached slot carries its links.
        let attached = tree.get(a).unwrap().clone();
        assert_eq!(attached.parent(), Some(NodeId::ROOT));

        let b = tree.alloc(attached);
        assert!(tree.get(b).unwrap().is_detached());
        assert_eq!(tree.children(NodeId::ROOT).collect::<Vec<_>>(), vec![a]);
    }

    #[test]
    fn test_scope_marker_is_allocated_once() {
        let mut tree = DomTree::new();
        let marker = tree.scope_marker();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.scope_marker(), marker);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get(marker).unwrap().kind, NodeKind::ScopeMarker);
    }

    #[test]
    fn test_unknown_ids_are_rejected() {
        let mut tree = DomTree::new();
        let ghost = NodeId(42);
        assert!(!tree.contains(ghost));
        assert_eq!(
            tree.append_child(NodeId::ROOT, ghost),
            Err(DomError::UnknownNode(ghost))
        );
        assert_eq!(
            tree.remove_child(ghost, NodeId::ROOT),
            Err(DomError::UnknownNode(ghost))
        );
        assert_eq!(tree.clone_node(ghost), Err(DomError::UnknownNode(ghost)));
        assert_eq!(tree.parent(ghost), None);
        assert_eq!(tree.children(ghost).count(), 0);
    }

    #[test]
    fn test_descendants_stop_at_subtree_root() {
        let mut tree = DomTree::new();
        let div = tree.alloc(Node::element("div"));
        let p = tree.alloc(Node::element("p"));
        let span = tree.alloc(Node::element("span"));
        let after = tree.alloc(Node::element("footer"));
        tree.append_child(NodeId::ROOT, div).unwrap();
        tree.append_child(div, p).unwrap();
        tree.append_child(p, span).unwrap();
        tree.append_child(NodeId::ROOT, after).unwrap();

        assert_eq!(tree.descendants(div).collect::<Vec<_>>(), vec![p, span]);
        assert_eq!(
            tree.descendants(NodeId::ROOT).collect::<Vec<_>>(),
            vec![div, p, span, after]
        );
    }
}
