// ABOUTME: Declarative shadow root discovery and web-component tag classification.
// ABOUTME: Resolves open shadow templates on host elements; closed or absent roots count as missing.

use ego_tree::NodeRef;
use scraper::node::Element;
use scraper::{ElementRef, Node};

/// Attribute names that declare a shadow root on a template element.
/// `shadowroot` is the legacy spelling of `shadowrootmode`.
const SHADOW_MODE_ATTRS: &[&str] = &["shadowrootmode", "shadowroot"];

/// Returns the open declarative shadow root attached to `host`, if any.
///
/// The shadow root is a `<template>` child carrying an open mode attribute;
/// its children are the shadow sub-tree (the parser keeps template contents
/// as ordinary children). A closed template, or one without a mode, is not a
/// shadow root.
pub fn shadow_root(host: ElementRef<'_>) -> Option<NodeRef<'_, Node>> {
    host.children()
        .find(|child| match child.value().as_element() {
            Some(element) => is_open_shadow_template(element),
            None => false,
        })
}

fn is_open_shadow_template(element: &Element) -> bool {
    if !element.name().eq_ignore_ascii_case("template") {
        return false;
    }

    SHADOW_MODE_ATTRS
        .iter()
        .find_map(|attr| element.attr(attr))
        .map_or(false, |mode| mode.eq_ignore_ascii_case("open"))
}

/// Returns true for tag names following the custom-element naming convention.
pub fn is_custom_tag(name: &str) -> bool {
    name.contains('-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn host<'a>(document: &'a Html, selector: &str) -> ElementRef<'a> {
        document
            .select(&Selector::parse(selector).unwrap())
            .next()
            .unwrap()
    }

    #[test]
    fn finds_open_shadow_template() {
        let document = Html::parse_document(
            r#"<body><x-host><template shadowrootmode="open"><p>inner</p></template></x-host></body>"#,
        );

        let root = shadow_root(host(&document, "x-host")).unwrap();
        let template = root.value().as_element().unwrap();
        assert_eq!(template.name(), "template");
    }

    #[test]
    fn accepts_legacy_shadowroot_attribute() {
        let document = Html::parse_document(
            r#"<body><x-host><template shadowroot="open"><p>inner</p></template></x-host></body>"#,
        );

        assert!(shadow_root(host(&document, "x-host")).is_some());
    }

    #[test]
    fn closed_template_is_not_a_shadow_root() {
        let document = Html::parse_document(
            r#"<body><x-host><template shadowrootmode="closed"><p>inner</p></template></x-host></body>"#,
        );

        assert!(shadow_root(host(&document, "x-host")).is_none());
    }

    #[test]
    fn plain_template_is_not_a_shadow_root() {
        let document = Html::parse_document(
            r#"<body><div><template><p>inner</p></template></div></body>"#,
        );

        assert!(shadow_root(host(&document, "div")).is_none());
    }

    #[test]
    fn host_without_template_has_no_shadow_root() {
        let document = Html::parse_document("<body><x-host><p>light</p></x-host></body>");

        assert!(shadow_root(host(&document, "x-host")).is_none());
    }

    #[test]
    fn custom_tag_requires_a_hyphen() {
        assert!(is_custom_tag("custom-widget"));
        assert!(is_custom_tag("x-a"));
        assert!(!is_custom_tag("div"));
        assert!(!is_custom_tag("article"));
    }
}
