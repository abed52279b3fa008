// ABOUTME: Shadow-aware node and document cloners producing flattened snapshots.
// ABOUTME: Merges shadow-root children ahead of light-DOM children and prunes text-empty web components.

use ego_tree::{NodeId, NodeRef, Tree};
use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, trace};

use crate::filter::CompiledExclusions;
use crate::options::SnapshotOptions;
use crate::shadow::{is_custom_tag, shadow_root};
use crate::snapshot::{collect_text, Snapshot, SnapshotElement, SnapshotFragment, SnapshotNode};

/// Tag emitted in place of a web component's own tag name.
///
/// The original name must never reach the output: re-emitting it could
/// re-trigger custom-element behavior when the snapshot is handed to a live
/// environment.
const FLATTENED_COMPONENT_TAG: &str = "div";

/// Capture a flattened snapshot of `document`.
///
/// The snapshot document starts empty; every non-excluded top-level child of
/// the source head and body is cloned through the shadow-aware algorithm and
/// appended to the matching section when it survives pruning. A source
/// without a head or body section leaves that section empty.
pub fn clone_document(document: &Html, options: &SnapshotOptions) -> Snapshot {
    let exclusions = CompiledExclusions::compile(options);
    let mut snapshot = Snapshot::empty();
    let head_id = snapshot.head_id();
    let body_id = snapshot.body_id();

    let head_selector = Selector::parse("head").unwrap();
    if let Some(head) = document.select(&head_selector).next() {
        append_filtered_children(snapshot.tree_mut(), head_id, head.children(), 1, &exclusions);
    }

    let body_selector = Selector::parse("body").unwrap();
    if let Some(body) = document.select(&body_selector).next() {
        append_filtered_children(snapshot.tree_mut(), body_id, body.children(), 1, &exclusions);
    }

    debug!(
        head_children = snapshot.head().children().count(),
        body_children = snapshot.body().children().count(),
        "captured document snapshot"
    );

    snapshot
}

/// Parse `html` and capture a snapshot of the resulting document.
pub fn clone_html(html: &str, options: &SnapshotOptions) -> Snapshot {
    clone_document(&Html::parse_document(html), options)
}

/// Clone a single node into an independent snapshot fragment.
///
/// `depth` seeds the diagnostic depth reported on trace events and has no
/// effect on the result. Returns `None` when the node has no snapshot
/// representation: a web component whose flattened subtree carries no visible
/// text, or a parser construct the snapshot model does not keep.
///
/// The node itself is not run through the exclusion filter; filtering a node
/// is its caller's decision.
pub fn clone_node(
    node: NodeRef<'_, Node>,
    depth: usize,
    options: &SnapshotOptions,
) -> Option<SnapshotFragment> {
    let exclusions = CompiledExclusions::compile(options);
    let mut tree = Tree::new(SnapshotNode::Document);
    let root = tree.root().id();

    let cloned = clone_into(&mut tree, node, depth, &exclusions)?;
    tree.get_mut(root).unwrap().append_id(cloned);

    Some(SnapshotFragment::new(tree, cloned))
}

/// Clone every non-excluded child in `children` under `parent`, in order.
///
/// `depth` is the depth the children are cloned at. Children dropped by the
/// filter or by pruning leave no trace in the output.
fn append_filtered_children<'a>(
    tree: &mut Tree<SnapshotNode>,
    parent: NodeId,
    children: impl Iterator<Item = NodeRef<'a, Node>>,
    depth: usize,
    exclusions: &CompiledExclusions,
) {
    for child in children {
        if exclusions.is_excluded(child) {
            trace!(depth, tag = node_tag(child), "skipping excluded node");
            continue;
        }

        if let Some(cloned) = clone_into(tree, child, depth, exclusions) {
            tree.get_mut(parent).unwrap().append_id(cloned);
        }
    }
}

/// The recursive clone step.
///
/// Returns the id of the clone allocated in `tree`, or `None` when the node
/// is dropped. Dropped subtrees stay behind as unreachable orphans in the
/// arena; nothing observable through the snapshot API reaches them.
fn clone_into(
    tree: &mut Tree<SnapshotNode>,
    source: NodeRef<'_, Node>,
    depth: usize,
    exclusions: &CompiledExclusions,
) -> Option<NodeId> {
    let element = ElementRef::wrap(source);
    let shadow = element.and_then(shadow_root);
    let is_web_component =
        shadow.is_some() || element.map_or(false, |el| is_custom_tag(el.value().name()));

    // A web component is rebuilt as a bare container: neither its tag name
    // nor its attributes reach the output.
    let value = if is_web_component {
        SnapshotNode::Element(SnapshotElement::new(FLATTENED_COMPONENT_TAG))
    } else {
        shallow_clone(source.value())?
    };
    let clone = tree.orphan(value).id();

    // Shadow children first, light children after; each group keeps source
    // document order.
    if let Some(shadow) = shadow {
        append_filtered_children(tree, clone, shadow.children(), depth + 1, exclusions);
    }
    append_filtered_children(tree, clone, source.children(), depth + 1, exclusions);

    if is_web_component && collect_text(tree.get(clone).unwrap()).trim().is_empty() {
        trace!(
            depth,
            tag = node_tag(source),
            "dropping web component with no text content"
        );
        return None;
    }

    Some(clone)
}

/// Shallow clone of a non-web-component node: kind and payload, no children.
///
/// Parser constructs outside the snapshot model (doctype, processing
/// instruction, nested document roots) have no representation.
fn shallow_clone(node: &Node) -> Option<SnapshotNode> {
    match node {
        Node::Element(element) => Some(SnapshotNode::Element(SnapshotElement::with_attrs(
            element.name().to_string(),
            element
                .attrs()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        ))),
        Node::Text(text) => Some(SnapshotNode::Text(String::from(&**text))),
        Node::Comment(comment) => Some(SnapshotNode::Comment(String::from(&**comment))),
        _ => None,
    }
}

fn node_tag<'a>(node: NodeRef<'a, Node>) -> &'a str {
    match node.value() {
        Node::Element(element) => element.name(),
        Node::Text(_) => "#text",
        Node::Comment(_) => "#comment",
        _ => "#node",
    }
}
