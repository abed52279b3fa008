// ABOUTME: Configuration options for snapshot capture: exclusion sets and builder.
// ABOUTME: SnapshotOptions deserializes from the camelCase config shape used by embedders.

use serde::{Deserialize, Serialize};

/// Tags that are never captured, regardless of caller configuration.
///
/// `shadowflat-container` is the host element an embedding overlay UI injects
/// into the page; the rest are structural or non-content tags.
pub const DEFAULT_EXCLUDE_TAGS: &[&str] = &[
    "shadowflat-container",
    "template",
    "slot",
    "script",
    "style",
    "svg",
];

/// Minimum character count for "significant" content.
///
/// Carried on the options surface but not consulted by pruning: a web
/// component is dropped only when its flattened text is empty, with no
/// length threshold.
pub const MIN_CONTENT_LENGTH: usize = 50;

/// Options controlling which nodes a snapshot capture skips.
///
/// Constructed once by the caller and held constant through a whole capture;
/// the effective exclusion sets are compiled from it per operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SnapshotOptions {
    /// Class names whose elements are skipped together with their subtrees.
    pub exclude_classes: Vec<String>,
    /// Lower-case tag names to skip, unioned with [`DEFAULT_EXCLUDE_TAGS`].
    pub exclude_tags: Vec<String>,
    /// Reserved significance threshold; see [`MIN_CONTENT_LENGTH`].
    pub min_content_length: usize,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            exclude_classes: Vec::new(),
            exclude_tags: Vec::new(),
            min_content_length: MIN_CONTENT_LENGTH,
        }
    }
}

impl SnapshotOptions {
    /// Create a builder with default options.
    pub fn builder() -> SnapshotOptionsBuilder {
        SnapshotOptionsBuilder::new()
    }
}

/// Builder for constructing [`SnapshotOptions`] with custom exclusions.
#[derive(Debug, Clone)]
pub struct SnapshotOptionsBuilder {
    opts: SnapshotOptions,
}

impl SnapshotOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            opts: SnapshotOptions::default(),
        }
    }

    /// Add a class name to exclude.
    pub fn exclude_class(mut self, class: impl Into<String>) -> Self {
        self.opts.exclude_classes.push(class.into());
        self
    }

    /// Add several class names to exclude.
    pub fn exclude_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.opts
            .exclude_classes
            .extend(classes.into_iter().map(Into::into));
        self
    }

    /// Add a tag name to exclude.
    pub fn exclude_tag(mut self, tag: impl Into<String>) -> Self {
        self.opts.exclude_tags.push(tag.into());
        self
    }

    /// Add several tag names to exclude.
    pub fn exclude_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.opts
            .exclude_tags
            .extend(tags.into_iter().map(Into::into));
        self
    }

    /// Override the reserved significance threshold.
    pub fn min_content_length(mut self, length: usize) -> Self {
        self.opts.min_content_length = length;
        self
    }

    /// Build the options.
    pub fn build(self) -> SnapshotOptions {
        self.opts
    }
}

impl Default for SnapshotOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_exclusions() {
        let options = SnapshotOptions::builder()
            .exclude_class("ads")
            .exclude_classes(["promo", "banner"])
            .exclude_tag("nav")
            .exclude_tags(["aside"])
            .build();

        assert_eq!(options.exclude_classes, vec!["ads", "promo", "banner"]);
        assert_eq!(options.exclude_tags, vec!["nav", "aside"]);
        assert_eq!(options.min_content_length, MIN_CONTENT_LENGTH);
    }

    #[test]
    fn deserializes_camel_case_config() {
        let options: SnapshotOptions =
            serde_json::from_str(r#"{"excludeClasses":["ads"],"excludeTags":["nav"]}"#).unwrap();

        assert_eq!(options.exclude_classes, vec!["ads"]);
        assert_eq!(options.exclude_tags, vec!["nav"]);
        assert_eq!(options.min_content_length, MIN_CONTENT_LENGTH);
    }

    #[test]
    fn deserializes_empty_config_to_defaults() {
        let options: SnapshotOptions = serde_json::from_str("{}").unwrap();

        assert!(options.exclude_classes.is_empty());
        assert!(options.exclude_tags.is_empty());
        assert_eq!(options.min_content_length, MIN_CONTENT_LENGTH);
    }

    #[test]
    fn serializes_camel_case_keys() {
        let json = serde_json::to_string(&SnapshotOptions::default()).unwrap();

        assert!(json.contains("\"excludeClasses\""));
        assert!(json.contains("\"excludeTags\""));
        assert!(json.contains("\"minContentLength\""));
    }

    #[test]
    fn default_tags_cover_structural_entries() {
        for tag in ["template", "slot", "script", "style", "svg"] {
            assert!(DEFAULT_EXCLUDE_TAGS.contains(&tag), "missing {}", tag);
        }
    }
}
