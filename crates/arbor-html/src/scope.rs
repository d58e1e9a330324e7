use arbor_dom::{DomTree, Namespace, Node, NodeId, NodeKind, TagId};

use crate::StackOfOpenElements;
use crate::stack::is_marker;

/// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
///
/// The element-type lists that end a scope walk. Every variant also stops at
/// scope markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// "has an element in scope": applet, caption, html, table, td, th,
    /// marquee, object, template, plus the MathML text integration points,
    /// annotation-xml, and SVG foreignObject, desc and title.
    Default,
    /// "has an element in list item scope": default plus ol and ul.
    ListItem,
    /// "has an element in button scope": default plus button.
    Button,
    /// "has an element in table scope": html, table, template.
    Table,
    /// "has an element in select scope": every element except optgroup and
    /// option.
    Select,
}

impl Scope {
    /// Whether `node` ends a walk in this scope.
    #[must_use]
    pub fn is_boundary(self, node: &Node) -> bool {
        if node.kind == NodeKind::ScopeMarker {
            return true;
        }
        if node.kind != NodeKind::Element {
            return false;
        }
        match self {
            Self::Default => is_default_boundary(node),
            Self::ListItem => {
                is_default_boundary(node)
                    || node.is_html_element(TagId::Ol)
                    || node.is_html_element(TagId::Ul)
            }
            Self::Button => is_default_boundary(node) || node.is_html_element(TagId::Button),
            Self::Table => {
                node.is_html_element(TagId::Html)
                    || node.is_html_element(TagId::Table)
                    || node.is_html_element(TagId::Template)
            }
            Self::Select => {
                !(node.is_html_element(TagId::Optgroup) || node.is_html_element(TagId::Option))
            }
        }
    }
}

fn is_default_boundary(node: &Node) -> bool {
    match node.namespace {
        Namespace::Html => node.tag_id.is_some_and(|tag| {
            matches!(
                tag,
                TagId::Applet
                    | TagId::Caption
                    | TagId::Html
                    | TagId::Table
                    | TagId::Td
                    | TagId::Th
                    | TagId::Marquee
                    | TagId::Object
                    | TagId::Template
            )
        }),
        Namespace::MathMl => matches!(
            node.data.as_str(),
            "mi" | "mo" | "mn" | "ms" | "mtext" | "annotation-xml"
        ),
        Namespace::Svg => matches!(node.data.as_str(), "foreignObject" | "desc" | "title"),
        Namespace::Other(_) => false,
    }
}

impl StackOfOpenElements {
    /// Walk from the current node down. Matching `target` wins; reaching a
    /// boundary of `scope` first loses.
    ///
    /// STEP 2: "If node is the target node, terminate in a match state."
    ///
    /// STEP 3: "Otherwise, if node is one of the element types in list,
    ///          terminate in a failure state."
    ///
    /// STEP 4: "Otherwise, set node to the previous entry in the stack of
    ///          open elements and return to step 2."
    fn in_specific_scope(
        &self,
        tree: &DomTree,
        scope: Scope,
        is_target: impl Fn(NodeId, &Node) -> bool,
    ) -> bool {
        for id in self.iter().rev() {
            let Some(node) = tree.get(id) else { continue };
            if is_target(id, node) {
                return true;
            }
            if scope.is_boundary(node) {
                return false;
            }
        }
        false
    }

    /// Whether an HTML element with `tag` is in `scope`.
    #[must_use]
    pub fn has_element_in(&self, tree: &DomTree, tag: TagId, scope: Scope) -> bool {
        self.in_specific_scope(tree, scope, |_, node| node.is_html_element(tag))
    }

    /// Whether this particular node is open and in `scope`.
    #[must_use]
    pub fn has_node_in(&self, tree: &DomTree, target: NodeId, scope: Scope) -> bool {
        self.in_specific_scope(tree, scope, |id, _| id == target)
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-scope)
    #[must_use]
    pub fn has_element_in_scope(&self, tree: &DomTree, tag: TagId) -> bool {
        self.has_element_in(tree, tag, Scope::Default)
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-list-item-scope)
    #[must_use]
    pub fn has_element_in_list_item_scope(&self, tree: &DomTree, tag: TagId) -> bool {
        self.has_element_in(tree, tag, Scope::ListItem)
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-button-scope)
    #[must_use]
    pub fn has_element_in_button_scope(&self, tree: &DomTree, tag: TagId) -> bool {
        self.has_element_in(tree, tag, Scope::Button)
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-table-scope)
    #[must_use]
    pub fn has_element_in_table_scope(&self, tree: &DomTree, tag: TagId) -> bool {
        self.has_element_in(tree, tag, Scope::Table)
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-select-scope)
    #[must_use]
    pub fn has_element_in_select_scope(&self, tree: &DomTree, tag: TagId) -> bool {
        self.has_element_in(tree, tag, Scope::Select)
    }

    /// Whether any scope marker is open.
    #[must_use]
    pub fn has_marker(&self, tree: &DomTree) -> bool {
        self.iter().any(|id| is_marker(tree, id))
    }
}
