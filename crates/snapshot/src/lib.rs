// ABOUTME: Library entry point for the shadowflat snapshot engine.
// ABOUTME: Re-exports capture operations, options, and the snapshot tree types.

//! shadowflat - flattens a DOM tree, shadow roots included, into a single
//! self-contained snapshot suitable for downstream content extraction.
//!
//! Shadow-root children are merged ahead of light-DOM children under their
//! host, web components are rewritten into plain containers, and excluded or
//! text-empty component subtrees are dropped. The source document is never
//! mutated; the snapshot is an independent tree with no identity shared with
//! the source.
//!
//! # Example
//!
//! ```
//! use shadowflat_snapshot::{clone_html, SnapshotOptions};
//!
//! let options = SnapshotOptions::builder().exclude_class("ads").build();
//! let snapshot = clone_html(
//!     r#"<body><my-widget><template shadowrootmode="open">Hi</template></my-widget></body>"#,
//!     &options,
//! );
//! assert_eq!(snapshot.body_html(), "<div>Hi</div>");
//! ```

pub mod cloner;
pub mod filter;
pub mod options;
pub mod serialize;
pub mod shadow;
pub mod snapshot;

pub use crate::cloner::{clone_document, clone_html, clone_node};
pub use crate::options::{
    SnapshotOptions, SnapshotOptionsBuilder, DEFAULT_EXCLUDE_TAGS, MIN_CONTENT_LENGTH,
};
pub use crate::snapshot::{
    collect_text, Snapshot, SnapshotElement, SnapshotFragment, SnapshotNode,
};
