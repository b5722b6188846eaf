//! Table-of-contents extraction.
//!
//! Headings are `h1`..`h6` elements and elements with `role="heading"`.
//! Levels are zero-based: `h1` is level 0.

use crate::model::{BooqNode, BooqPath};
use crate::traverse::{iter_nodes, node_length};
use crate::util::normalize_whitespace;

/// One heading in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TocItem {
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub title: Option<String>,
    pub level: usize,
    pub path: BooqPath,
    /// Monotonic position of the heading, see [`crate::position_for_path`].
    pub position: usize,
}

impl TocItem {
    pub fn new(title: impl Into<String>, level: usize, path: BooqPath, position: usize) -> Self {
        Self {
            title: Some(title.into()),
            level,
            path,
            position,
        }
    }
}

/// Collect every heading of the document.
pub fn extract_toc(nodes: &[BooqNode]) -> Vec<TocItem> {
    let mut items = Vec::new();
    let mut position = 0;

    for (path, node) in iter_nodes(nodes) {
        match node {
            BooqNode::Element(element) => {
                if let Some(level) = element.heading_level() {
                    let title = normalize_whitespace(&node_text(node));
                    items.push(TocItem {
                        title: (!title.is_empty()).then_some(title),
                        level,
                        path,
                        position,
                    });
                }
            }
            // Pre-order walk: leaves seen so far are exactly what precedes the next node.
            BooqNode::Text(_) | BooqNode::Stub(_) => {
                position = position.saturating_add(node_length(node));
            }
        }
    }

    items
}

/// Last TOC item at or before `path`.
pub fn toc_item_for_path<'a>(toc: &'a [TocItem], path: &BooqPath) -> Option<&'a TocItem> {
    toc.iter().take_while(|item| &item.path <= path).last()
}

fn node_text(node: &BooqNode) -> String {
    let mut text = String::new();
    collect_text(node, &mut text);
    text
}

fn collect_text(node: &BooqNode, result: &mut String) {
    match node {
        BooqNode::Text(t) => result.push_str(&t.content),
        BooqNode::Element(element) => {
            for child in &element.children {
                collect_text(child, result);
            }
        }
        BooqNode::Stub(_) => {}
    }
}
