// ABOUTME: Output tree model for captured snapshots: node types, documents, fragments.
// ABOUTME: Snapshot trees are fresh arenas with no identity shared with the source DOM.

use ego_tree::{NodeId, NodeRef, Tree};

use crate::serialize::{serialize_children, serialize_node};

/// A single node in a snapshot tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotNode {
    /// The synthetic root of a snapshot tree.
    Document,
    /// An element with its tag name and attributes.
    Element(SnapshotElement),
    /// A text node.
    Text(String),
    /// A comment node.
    Comment(String),
}

impl SnapshotNode {
    /// Returns the element payload, if this node is an element.
    pub fn as_element(&self) -> Option<&SnapshotElement> {
        match self {
            SnapshotNode::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Returns the text payload, if this node is a text node.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SnapshotNode::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns true if this node is an element.
    pub fn is_element(&self) -> bool {
        matches!(self, SnapshotNode::Element(_))
    }
}

/// An element node in a snapshot tree: tag name plus attributes in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotElement {
    name: String,
    attrs: Vec<(String, String)>,
}

impl SnapshotElement {
    /// Create an element with no attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
        }
    }

    /// Create an element with the given attributes.
    pub fn with_attrs(name: impl Into<String>, attrs: Vec<(String, String)>) -> Self {
        Self {
            name: name.into(),
            attrs,
        }
    }

    /// The element's tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate the element's attributes in source order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// Concatenated text content of a snapshot subtree, in document order.
pub fn collect_text(node: NodeRef<'_, SnapshotNode>) -> String {
    let mut text = String::new();
    for descendant in node.descendants() {
        if let SnapshotNode::Text(payload) = descendant.value() {
            text.push_str(payload);
        }
    }
    text
}

/// A captured document: an independent tree with head and body sections.
///
/// Created empty before population; after capture, ownership belongs to the
/// caller and the tree holds no references back into the source document.
#[derive(Debug, Clone)]
pub struct Snapshot {
    tree: Tree<SnapshotNode>,
    head: NodeId,
    body: NodeId,
}

impl Snapshot {
    /// Create a snapshot document with empty head and body sections.
    pub(crate) fn empty() -> Self {
        let mut tree = Tree::new(SnapshotNode::Document);
        let html = tree
            .root_mut()
            .append(SnapshotNode::Element(SnapshotElement::new("html")))
            .id();
        let head = tree
            .get_mut(html)
            .unwrap()
            .append(SnapshotNode::Element(SnapshotElement::new("head")))
            .id();
        let body = tree
            .get_mut(html)
            .unwrap()
            .append(SnapshotNode::Element(SnapshotElement::new("body")))
            .id();

        Self { tree, head, body }
    }

    pub(crate) fn tree_mut(&mut self) -> &mut Tree<SnapshotNode> {
        &mut self.tree
    }

    pub(crate) fn head_id(&self) -> NodeId {
        self.head
    }

    pub(crate) fn body_id(&self) -> NodeId {
        self.body
    }

    /// The head section element.
    pub fn head(&self) -> NodeRef<'_, SnapshotNode> {
        self.tree.get(self.head).unwrap()
    }

    /// The body section element.
    pub fn body(&self) -> NodeRef<'_, SnapshotNode> {
        self.tree.get(self.body).unwrap()
    }

    /// Inner HTML of the head section.
    pub fn head_html(&self) -> String {
        let mut out = String::new();
        serialize_children(self.head(), &mut out);
        out
    }

    /// Inner HTML of the body section.
    pub fn body_html(&self) -> String {
        let mut out = String::new();
        serialize_children(self.body(), &mut out);
        out
    }

    /// The whole snapshot document rendered as HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        serialize_children(self.tree.root(), &mut out);
        out
    }

    /// Concatenated text content of the whole document.
    pub fn text_content(&self) -> String {
        collect_text(self.tree.root())
    }

    /// Returns true when neither section captured any content.
    pub fn is_empty(&self) -> bool {
        !self.head().has_children() && !self.body().has_children()
    }
}

/// The result of cloning a single node: an owned tree rooted at the clone.
#[derive(Debug, Clone)]
pub struct SnapshotFragment {
    tree: Tree<SnapshotNode>,
    node: NodeId,
}

impl SnapshotFragment {
    pub(crate) fn new(tree: Tree<SnapshotNode>, node: NodeId) -> Self {
        Self { tree, node }
    }

    /// The cloned node.
    pub fn node(&self) -> NodeRef<'_, SnapshotNode> {
        self.tree.get(self.node).unwrap()
    }

    /// The cloned subtree rendered as HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        serialize_node(self.node(), &mut out);
        out
    }

    /// Concatenated text content of the cloned subtree.
    pub fn text_content(&self) -> String {
        collect_text(self.node())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_snapshot_renders_bare_sections() {
        let snapshot = Snapshot::empty();

        assert!(snapshot.is_empty());
        assert_eq!(snapshot.to_html(), "<html><head></head><body></body></html>");
        assert_eq!(snapshot.head_html(), "");
        assert_eq!(snapshot.body_html(), "");
    }

    #[test]
    fn is_empty_flips_once_a_section_has_content() {
        let mut snapshot = Snapshot::empty();
        let body = snapshot.body_id();
        snapshot
            .tree_mut()
            .get_mut(body)
            .unwrap()
            .append(SnapshotNode::Text("hello".to_string()));

        assert!(!snapshot.is_empty());
        assert_eq!(snapshot.body_html(), "hello");
    }

    #[test]
    fn collect_text_concatenates_in_document_order() {
        let mut tree = Tree::new(SnapshotNode::Document);
        let div = tree
            .root_mut()
            .append(SnapshotNode::Element(SnapshotElement::new("div")))
            .id();
        let span = tree
            .get_mut(div)
            .unwrap()
            .append(SnapshotNode::Element(SnapshotElement::new("span")))
            .id();
        tree.get_mut(span)
            .unwrap()
            .append(SnapshotNode::Text("first".to_string()));
        tree.get_mut(div)
            .unwrap()
            .append(SnapshotNode::Text(" second".to_string()));

        assert_eq!(collect_text(tree.root()), "first second");
    }

    #[test]
    fn element_attr_lookup() {
        let element = SnapshotElement::with_attrs(
            "img",
            vec![
                ("src".to_string(), "a.png".to_string()),
                ("alt".to_string(), "photo".to_string()),
            ],
        );

        assert_eq!(element.name(), "img");
        assert_eq!(element.attr("alt"), Some("photo"));
        assert_eq!(element.attr("missing"), None);
        assert_eq!(element.attrs().count(), 2);
    }
}
