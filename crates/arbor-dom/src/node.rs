use std::fmt;

use strum_macros::{Display, EnumString};

use crate::{NodeId, TagId};

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type"
///
/// `Error` and `ScopeMarker` are tree-builder additions: an error node stands
/// in for content the builder could not represent, and a scope marker is a
/// sentinel pushed onto the stack of open elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum NodeKind {
    /// Placeholder for content that failed to build.
    Error,
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    /// "Text nodes are known as text."
    Text,
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    /// "Element nodes are simply known as elements."
    Element,
    /// [§ 4.7 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    Comment,
    /// [§ 4.6 Interface DocumentType](https://dom.spec.whatwg.org/#interface-documenttype)
    Doctype,
    /// Sentinel that stops scope walks (table cells, applet, object, marquee,
    /// template, caption). Carries no data and no attributes.
    ScopeMarker,
}

/// [§ 2.1.3 XML compatibility](https://html.spec.whatwg.org/multipage/infrastructure.html#namespaces)
///
/// The namespace an element lives in. Parsing accepts the full URI, the
/// short names `html`, `math` and `svg`, or an empty string for HTML. Any
/// other string is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, EnumString)]
pub enum Namespace {
    /// "The HTML namespace is: http://www.w3.org/1999/xhtml"
    #[default]
    #[strum(serialize = "", serialize = "html", serialize = "http://www.w3.org/1999/xhtml")]
    Html,
    /// "The MathML namespace is: http://www.w3.org/1998/Math/MathML"
    #[strum(serialize = "math", serialize = "http://www.w3.org/1998/Math/MathML")]
    MathMl,
    /// "The SVG namespace is: http://www.w3.org/2000/svg"
    #[strum(serialize = "svg", serialize = "http://www.w3.org/2000/svg")]
    Svg,
    /// Any namespace URI the tree has no shorthand for.
    #[strum(default)]
    Other(String),
}

impl Namespace {
    /// Parse a namespace string. Never fails: unknown URIs become
    /// [`Namespace::Other`].
    #[must_use]
    pub fn from_uri(uri: &str) -> Self {
        uri.parse().unwrap_or_else(|_| Self::Other(uri.to_string()))
    }

    /// The full namespace URI.
    #[must_use]
    pub fn uri(&self) -> &str {
        match self {
            Self::Html => "http://www.w3.org/1999/xhtml",
            Self::MathMl => "http://www.w3.org/1998/Math/MathML",
            Self::Svg => "http://www.w3.org/2000/svg",
            Self::Other(uri) => uri,
        }
    }

    /// Whether this is the HTML namespace.
    #[must_use]
    pub const fn is_html(&self) -> bool {
        matches!(self, Self::Html)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uri())
    }
}

/// [§ 4.9.2 Interface Attr](https://dom.spec.whatwg.org/#interface-attr)
///
/// "Attr nodes are simply known as attributes. They are sometimes referred
/// to as content attributes..."
///
/// An empty `namespace` means no namespace, which is what every attribute
/// outside foreign content has.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Attribute {
    /// "An attribute has a namespace (null or a non-empty string)"
    pub namespace: String,
    /// "local name"
    pub name: String,
    /// "value"
    pub value: String,
}

impl Attribute {
    /// An attribute in no namespace.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            namespace: String::new(),
            name: name.into(),
            value: value.into(),
        }
    }

    /// A namespaced attribute, as produced by foreign-content attribute
    /// adjustment (`xlink:href`, `xml:lang`, ...).
    pub fn with_namespace(
        namespace: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Tree links of a node. Only [`DomTree`](crate::DomTree) writes these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Links {
    pub(crate) parent: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) last_child: Option<NodeId>,
    pub(crate) prev_sibling: Option<NodeId>,
    pub(crate) next_sibling: Option<NodeId>,
}

impl Links {
    pub(crate) const fn has_parent_or_siblings(self) -> bool {
        self.parent.is_some() || self.prev_sibling.is_some() || self.next_sibling.is_some()
    }
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
///
/// The payload fields are public so a tree builder can fill them in before
/// (or after) attaching the node. The structural links are private: they can
/// be read through accessors here or on [`DomTree`](crate::DomTree), and only
/// the tree's operations change them.
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub kind: NodeKind,
    /// Text of a text or comment node, local name of an element, name of a
    /// doctype. Stored unescaped.
    pub data: String,
    /// Element namespace. HTML for everything that is not an element.
    pub namespace: Namespace,
    /// "An element has an associated attribute list", in source order.
    /// Duplicate names are allowed; [`Node::add_attribute_if_missing`] is the
    /// policy HTML applies when it needs them merged.
    pub attributes: Vec<Attribute>,
    /// Identifier of a known HTML tag name, if `data` is one.
    pub tag_id: Option<TagId>,
    pub(crate) links: Links,
}

impl Node {
    fn with_kind(kind: NodeKind, data: String) -> Self {
        Self {
            kind,
            data,
            namespace: Namespace::Html,
            attributes: Vec::new(),
            tag_id: None,
            links: Links::default(),
        }
    }

    /// A document node.
    #[must_use]
    pub fn document() -> Self {
        Self::with_kind(NodeKind::Document, String::new())
    }

    /// A doctype node with the given name (`html` for `<!DOCTYPE html>`).
    pub fn doctype(name: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Doctype, name.into())
    }

    /// An HTML element. Known tag names get a [`TagId`].
    pub fn element(tag_name: impl Into<String>) -> Self {
        Self::element_ns(Namespace::Html, tag_name)
    }

    /// An element in `namespace`. Only HTML elements get a [`TagId`]: an SVG
    /// `title` is not an HTML `title`.
    pub fn element_ns(namespace: Namespace, tag_name: impl Into<String>) -> Self {
        let tag_name = tag_name.into();
        let tag_id = tag_id_for(&namespace, &tag_name);
        Self {
            namespace,
            tag_id,
            ..Self::with_kind(NodeKind::Element, tag_name)
        }
    }

    /// A text node.
    pub fn text(data: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Text, data.into())
    }

    /// A comment node.
    pub fn comment(data: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Comment, data.into())
    }

    /// A scope marker.
    #[must_use]
    pub fn scope_marker() -> Self {
        Self::with_kind(NodeKind::ScopeMarker, String::new())
    }

    /// An error node carrying a description of what could not be built.
    pub fn error(message: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Error, message.into())
    }

    /// Builder-style: append an attribute in no namespace.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    /// Builder-style: append several attributes in order.
    #[must_use]
    pub fn with_attributes(mut self, attributes: impl IntoIterator<Item = Attribute>) -> Self {
        self.attributes.extend(attributes);
        self
    }

    /// Whether this is an element.
    #[must_use]
    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    /// Whether this is an HTML element with the given tag.
    #[must_use]
    pub fn is_html_element(&self, tag: TagId) -> bool {
        self.kind == NodeKind::Element && self.namespace.is_html() && self.tag_id == Some(tag)
    }

    /// Give this node a new namespace and local name, recomputing its
    /// [`TagId`]. Writing `data` or `namespace` directly leaves `tag_id`
    /// stale, and scope walks trust `tag_id`.
    pub fn rename(&mut self, namespace: Namespace, local_name: impl Into<String>) {
        self.data = local_name.into();
        self.tag_id = tag_id_for(&namespace, &self.data);
        self.namespace = namespace;
    }

    /// Whether this is an element named `local_name` in `namespace`.
    #[must_use]
    pub fn is_element_named(&self, namespace: &Namespace, local_name: &str) -> bool {
        self.kind == NodeKind::Element && self.namespace == *namespace && self.data == local_name
    }

    /// Value of the first attribute called `name` in no namespace.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.namespace.is_empty() && attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Whether an attribute called `name` in no namespace is present.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Append an attribute, even if one with the same name exists.
    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    ///
    /// "...for each attribute on the token, check to see if the attribute is
    /// already present on the top element of the stack of open elements. If it
    /// is not, add the attribute and its corresponding value to that element."
    ///
    /// Returns `true` if the attribute was added.
    pub fn add_attribute_if_missing(&mut self, attribute: Attribute) -> bool {
        let present = self
            .attributes
            .iter()
            .any(|attr| attr.namespace == attribute.namespace && attr.name == attribute.name);
        if !present {
            self.attributes.push(attribute);
        }
        !present
    }

    /// Same kind, namespace, tag id, data and attributes; no links.
    pub(crate) fn detached_copy(&self) -> Self {
        Self {
            kind: self.kind,
            data: self.data.clone(),
            namespace: self.namespace.clone(),
            attributes: self.attributes.clone(),
            tag_id: self.tag_id,
            links: Links::default(),
        }
    }

    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.links.parent
    }

    /// "The first child of an object is its first child or null if it has
    /// no children."
    #[must_use]
    pub const fn first_child(&self) -> Option<NodeId> {
        self.links.first_child
    }

    /// "The last child of an object is its last child or null if it has no
    /// children."
    #[must_use]
    pub const fn last_child(&self) -> Option<NodeId> {
        self.links.last_child
    }

    /// "The previous sibling of an object is its first preceding sibling or
    /// null if it has no preceding sibling."
    #[must_use]
    pub const fn prev_sibling(&self) -> Option<NodeId> {
        self.links.prev_sibling
    }

    /// "The next sibling of an object is its first following sibling or null
    /// if it has no following sibling."
    #[must_use]
    pub const fn next_sibling(&self) -> Option<NodeId> {
        self.links.next_sibling
    }

    /// Whether the node has no parent and no siblings.
    #[must_use]
    pub const fn is_detached(&self) -> bool {
        !self.links.has_parent_or_siblings()
    }
}

fn tag_id_for(namespace: &Namespace, tag_name: &str) -> Option<TagId> {
    if namespace.is_html() {
        TagId::from_name(tag_name)
    } else {
        None
    }
}
