//! Property tests: random mutation sequences keep the tree consistent and
//! agree with a naive `Vec`-of-children model.

use arbor_dom::{DomError, DomTree, InvariantViolation, Node, NodeId};
use quickcheck_macros::quickcheck;

/// Nodes the random operations pick from (plus the document root).
const POOL: usize = 8;

/// Reference model: parent and ordered children per node, by arena index.
struct Model {
    parent: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
}

impl Model {
    fn new(len: usize) -> Self {
        Self {
            parent: vec![None; len],
            children: vec![Vec::new(); len],
        }
    }

    fn is_ancestor(&self, ancestor: usize, mut node: usize) -> bool {
        while let Some(parent) = self.parent[node] {
            if parent == ancestor {
                return true;
            }
            node = parent;
        }
        false
    }

    fn can_insert(&self, parent: usize, child: usize) -> bool {
        self.parent[child].is_none() && child != parent && !self.is_ancestor(child, parent)
    }

    fn insert(&mut self, parent: usize, child: usize, before: Option<usize>) {
        let position = before
            .and_then(|r| self.children[parent].iter().position(|&c| c == r))
            .unwrap_or(self.children[parent].len());
        self.children[parent].insert(position, child);
        self.parent[child] = Some(parent);
    }

    fn remove(&mut self, parent: usize, child: usize) {
        self.children[parent].retain(|&c| c != child);
        self.parent[child] = None;
    }
}

fn build() -> (DomTree, Model) {
    let mut tree = DomTree::new();
    for i in 0..POOL {
        let _ = tree.alloc(Node::element(if i % 2 == 0 { "div" } else { "span" }));
    }
    let len = tree.len();
    (tree, Model::new(len))
}

fn pick(byte: u8) -> usize {
    usize::from(byte) % (POOL + 1)
}

/// Apply one encoded operation to both tree and model; `false` if they
/// disagree about whether it was allowed.
fn apply(tree: &mut DomTree, model: &mut Model, (op, x, y, z): (u8, u8, u8, u8)) -> bool {
    let (x, y, z) = (pick(x), pick(y), pick(z));
    match op % 4 {
        // append_child(x, y)
        0 => {
            let expected = model.can_insert(x, y);
            let result = tree.append_child(NodeId(x), NodeId(y));
            if result.is_ok() {
                model.insert(x, y, None);
            }
            result.is_ok() == expected
        }
        // insert_before(x, y, z) where z is a child of x
        1 => {
            let reference_ok = model.parent[z] == Some(x);
            let expected = reference_ok && model.can_insert(x, y);
            let result = tree.insert_before(NodeId(x), NodeId(y), Some(NodeId(z)));
            if result.is_ok() {
                model.insert(x, y, Some(z));
            }
            result.is_ok() == expected
        }
        // remove_child(x, y)
        2 => {
            let expected = model.parent[y] == Some(x);
            let result = tree.remove_child(NodeId(x), NodeId(y));
            if result.is_ok() {
                model.remove(x, y);
            }
            result.is_ok() == expected
        }
        // reparent_children(x, y)
        _ => {
            let result = tree.reparent_children(NodeId(x), NodeId(y));
            match result {
                Ok(()) if x != y => {
                    for child in std::mem::take(&mut model.children[y]) {
                        model.insert(x, child, None);
                    }
                    true
                }
                Ok(()) => true,
                Err(DomError::HierarchyCycle { .. }) => model.is_ancestor(y, x),
                Err(_) => false,
            }
        }
    }
}

fn matches_model(tree: &DomTree, model: &Model) -> bool {
    (0..tree.len()).all(|i| {
        let id = NodeId(i);
        let forward: Vec<usize> = tree.children(id).map(|c| c.0).collect();
        let mut backward: Vec<usize> = tree.children(id).rev().map(|c| c.0).collect();
        backward.reverse();
        forward == model.children[i]
            && backward == model.children[i]
            && tree.parent(id).map(|p| p.0) == model.parent[i]
    })
}

#[quickcheck]
fn prop_mutations_keep_invariants(ops: Vec<(u8, u8, u8, u8)>) -> bool {
    let (mut tree, mut model) = build();
    ops.into_iter().all(|op| {
        apply(&mut tree, &mut model, op)
            && tree.check_invariants().is_ok()
            && matches_model(&tree, &model)
    })
}

#[quickcheck]
fn prop_reparent_moves_all_in_order(count: u8) -> bool {
    let mut tree = DomTree::new();
    let source = tree.alloc(Node::element("b"));
    let destination = tree.alloc(Node::element("b"));
    let moved: Vec<NodeId> = (0..count % 16)
        .map(|_| tree.alloc(Node::element("i")))
        .collect();
    for &child in &moved {
        tree.append_child(source, child).unwrap();
    }

    tree.reparent_children(destination, source).unwrap();

    tree.children(destination).collect::<Vec<_>>() == moved
        && tree.first_child(source).is_none()
        && tree.check_invariants().is_ok()
}

#[quickcheck]
fn prop_clone_is_detached(attrs: Vec<(String, String)>) -> bool {
    let mut tree = DomTree::new();
    let mut node = Node::element("a");
    for (name, value) in &attrs {
        node = node.with_attribute(name.clone(), value.clone());
    }
    let original = tree.alloc(node);
    tree.append_child(NodeId::ROOT, original).unwrap();

    let copy = tree.clone_node(original).unwrap();
    let cloned = tree.get(copy).unwrap();
    cloned.is_detached()
        && cloned.first_child().is_none()
        && cloned.attributes == tree.get(original).unwrap().attributes
}

#[test]
fn test_check_invariants_reports_marker_payload() {
    let mut tree = DomTree::new();
    let marker = tree.alloc(Node::scope_marker());
    tree.get_mut(marker).unwrap().data.push('x');
    assert_eq!(
        tree.check_invariants(),
        Err(InvariantViolation::MarkerPayload { node: marker })
    );
}
