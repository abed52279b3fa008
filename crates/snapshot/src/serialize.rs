// ABOUTME: HTML serializer for snapshot trees.
// ABOUTME: Renders elements with escaped attributes and text, using void-element forms where required.

use ego_tree::NodeRef;

use crate::snapshot::SnapshotNode;

/// Render `node` and its subtree as HTML into `out`.
pub fn serialize_node(node: NodeRef<'_, SnapshotNode>, out: &mut String) {
    match node.value() {
        SnapshotNode::Document => serialize_children(node, out),
        SnapshotNode::Text(text) => out.push_str(&escape_text(text)),
        SnapshotNode::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->");
        }
        SnapshotNode::Element(element) => {
            out.push('<');
            out.push_str(element.name());

            for (name, value) in element.attrs() {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape_attr(value));
                out.push('"');
            }

            if is_void_element(element.name()) {
                out.push_str(" />");
                return;
            }

            out.push('>');
            serialize_children(node, out);
            out.push_str("</");
            out.push_str(element.name());
            out.push('>');
        }
    }
}

/// Render the children of `node`, without the node itself.
pub fn serialize_children(node: NodeRef<'_, SnapshotNode>, out: &mut String) {
    for child in node.children() {
        serialize_node(child, out);
    }
}

/// Escape attribute value
fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape text node content
fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Check if tag is void element
fn is_void_element(tag: &str) -> bool {
    matches!(
        tag.to_ascii_lowercase().as_str(),
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}
