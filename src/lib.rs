//! # booq
//!
//! Document addressing and rendering core for an e-book reader.
//!
//! ## Features
//!
//! - Positional addressing with [`BooqPath`] and [`BooqRange`], including the
//!   `3-0-2` string form used in deep links
//! - Pure traversals: positions, previews, text extraction, table of contents
//! - Fragment windowing for page-at-a-time display
//! - Highlight augmentation: splitting text runs under overlapping ranges
//! - A framework-neutral render tree with stable, path-derived identities
//! - Sidebar navigation interleaving headings and annotations
//!
//! Everything in the core is synchronous and side-effect free: the same
//! inputs always produce the same output.
//!
//! ## Quick Start
//!
//! ```
//! use booq::{Augmentation, BooqNode, BooqPath, BooqRange, RenderOptions, render_nodes};
//!
//! let nodes = vec![BooqNode::text("Hello World")];
//! let highlight = Augmentation::new("h1", BooqRange::from_start(BooqPath::from([0, 5])))
//!     .with_color("yellow");
//!
//! let rendered = render_nodes(&nodes, &RenderOptions::new().with_augmentations(vec![highlight]));
//! let keys: Vec<&str> = rendered.iter().map(|node| node.key()).collect();
//! assert_eq!(keys, ["0-0", "0-5"]);
//! ```
//!
//! ## Paths
//!
//! ```
//! use booq::{BooqPath, path_from_string, path_less_than};
//!
//! let path = path_from_string("3-0-2").unwrap();
//! assert_eq!(path, BooqPath::from([3, 0, 2]));
//! assert!(path_less_than(&BooqPath::from([3, 0]), &path));
//! assert!(path_from_string("3-x").is_none());
//! ```

pub mod augment;
pub mod error;
pub mod fragment;
#[cfg(feature = "serde")]
pub mod io;
pub mod model;
pub mod navigation;
pub mod render;
pub mod toc;
pub mod traverse;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use augment::{AugmentedSpan, Augmentation, Underline, augment_text, augmentation_at};
pub use error::{Error, Result};
pub use fragment::{
    BooqFragment, DEFAULT_CHUNK_LENGTH, FragmentAnchor, FragmentConfig, build_fragment,
    build_fragment_with_config,
};
pub use model::{
    BooqElement, BooqNode, BooqPath, BooqRange, BooqStub, BooqText, TextOffset, path_from_string,
    path_in_range, path_less_than, path_to_string, same_path,
};
pub use navigation::{
    Annotated, AnnotationGroup, NavigationMode, NavigationNode, build_navigation,
};
pub use render::{
    LinkTarget, RenderElement, RenderNode, RenderOptions, RenderSpan, RenderStyle,
    augmentation_for_key, render_fragment, render_nodes,
};
pub use toc::{TocItem, extract_toc, toc_item_for_path};
pub use traverse::{
    NodeIter, iter_nodes, node_for_path, node_length, nodes_length, position_for_path,
    preview_for_path, text_for_range,
};
