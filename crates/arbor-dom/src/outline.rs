use crate::{DomTree, Namespace, NodeId, NodeKind};

/// Render the subtree under `id` as an indented outline, one node per line.
///
/// This is a debugging aid, not markup serialization: text is quoted with
/// newlines escaped, foreign elements are prefixed with `svg` or `math`, and
/// scope markers and error nodes show up as `#scope-marker` and
/// `#error <message>`.
///
/// ```text
/// Document
///   <!DOCTYPE html>
///   <html>
///     <body class="main">
///       "hello"
/// ```
#[must_use]
pub fn outline(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, id, 0, &mut out);
    out
}

fn write_node(tree: &DomTree, id: NodeId, depth: usize, out: &mut String) {
    let Some(node) = tree.get(id) else { return };
    out.push_str(&"  ".repeat(depth));
    match node.kind {
        NodeKind::Document => out.push_str("Document"),
        NodeKind::Doctype => out.push_str(&format!("<!DOCTYPE {}>", node.data)),
        NodeKind::Element => {
            out.push('<');
            match &node.namespace {
                Namespace::Html => {}
                Namespace::Svg => out.push_str("svg "),
                Namespace::MathMl => out.push_str("math "),
                Namespace::Other(uri) => out.push_str(&format!("{{{uri}}} ")),
            }
            out.push_str(&node.data);
            for attr in &node.attributes {
                out.push(' ');
                if !attr.namespace.is_empty() {
                    out.push_str(&format!("{{{}}}", attr.namespace));
                }
                out.push_str(&attr.name);
                if !attr.value.is_empty() {
                    out.push_str(&format!("=\"{}\"", attr.value));
                }
            }
            out.push('>');
        }
        NodeKind::Text => out.push_str(&format!("\"{}\"", node.data.replace('\n', "\\n"))),
        NodeKind::Comment => out.push_str(&format!("<!-- {} -->", node.data)),
        NodeKind::ScopeMarker => out.push_str(&format!("#{}", node.kind)),
        NodeKind::Error => out.push_str(&format!("#{} {}", node.kind, node.data)),
    }
    out.push('\n');

    for child in tree.children(id) {
        write_node(tree, child, depth + 1, out);
    }
}
