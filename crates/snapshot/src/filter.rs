// ABOUTME: Exclusion filter deciding which source nodes a capture skips entirely.
// ABOUTME: Compiles per-operation tag/class sets and exposes the pure is_excluded predicate.

use std::collections::HashSet;

use ego_tree::NodeRef;
use once_cell::sync::Lazy;
use scraper::Node;

use crate::options::{SnapshotOptions, DEFAULT_EXCLUDE_TAGS};

static BUILTIN_EXCLUDED_TAGS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| DEFAULT_EXCLUDE_TAGS.iter().copied().collect());

/// Effective exclusion sets for one capture operation.
///
/// Compiled once from the caller's [`SnapshotOptions`] and threaded by
/// reference through the traversal. The built-in tag set is always included;
/// tag comparison is case-insensitive.
#[derive(Debug, Clone)]
pub struct CompiledExclusions {
    tags: HashSet<String>,
    classes: HashSet<String>,
}

impl CompiledExclusions {
    /// Merge the built-in tag set with the caller-supplied exclusions.
    pub fn compile(options: &SnapshotOptions) -> Self {
        let mut tags: HashSet<String> = BUILTIN_EXCLUDED_TAGS
            .iter()
            .map(|tag| (*tag).to_string())
            .collect();
        tags.extend(
            options
                .exclude_tags
                .iter()
                .map(|tag| tag.to_ascii_lowercase()),
        );

        let classes = options.exclude_classes.iter().cloned().collect();

        Self { tags, classes }
    }

    /// Returns true when `node` and its whole subtree must be skipped.
    ///
    /// Only element nodes are ever excluded; text and comment nodes always
    /// pass. An element is excluded when its tag is in the effective tag set
    /// or any of its classes is in the class set.
    pub fn is_excluded(&self, node: NodeRef<'_, Node>) -> bool {
        let element = match node.value().as_element() {
            Some(element) => element,
            None => return false,
        };

        if self.tags.contains(&element.name().to_ascii_lowercase()) {
            return true;
        }

        element.classes().any(|class| self.classes.contains(class))
    }
}
