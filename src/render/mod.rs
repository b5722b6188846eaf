//! Document tree → renderable tree.
//!
//! The output is framework-neutral: elements with attributes and styles,
//! decorated text spans and injected stylesheets. A UI layer maps it onto
//! whatever it draws with.
//!
//! Every element and span carries a `key` derived from its path (the path
//! string for elements, the flat character path for spans) so a host can map
//! a clicked position back to a document path and to the augmentation
//! covering it, see [`augmentation_for_key`].
//!
//! ## Rendering rules
//!
//! - Stubs render nothing.
//! - Text directly inside `table`/`thead`/`tbody`/`tfoot`/`tr` is dropped
//!   (stray whitespace in legacy markup).
//! - Whitespace-only text is dropped.
//! - An `a` nested in another `a` becomes a plain `span`.
//! - Embedded CSS becomes a `style` node ahead of the element's children.
//! - Internal references resolve to a same-page anchor when the target is in
//!   the rendered range, otherwise to a navigation request.

mod href;

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::augment::{Augmentation, Underline, augment_text, augmentation_at};
use crate::fragment::BooqFragment;
use crate::model::{BooqElement, BooqNode, BooqPath, BooqRange, path_from_string};
use crate::util::is_blank;

pub use href::LinkTarget;

/// Tags whose direct text children are never rendered.
const TABULAR_CONTAINERS: &[&str] = &["table", "thead", "tbody", "tfoot", "tr"];

/// Configuration for a render pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    /// Range on display; internal links into it become anchors.
    pub range: BooqRange,
    /// Decorations to overlay, applied in order (later wins).
    pub augmentations: Vec<Augmentation>,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_range(mut self, range: BooqRange) -> Self {
        self.range = range;
        self
    }

    pub fn with_augmentations(mut self, augmentations: Vec<Augmentation>) -> Self {
        self.augmentations = augmentations;
        self
    }
}

/// A node of the rendered tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum RenderNode {
    Element(RenderElement),
    Span(RenderSpan),
    Style(RenderStyle),
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderElement {
    pub tag: String,
    /// Path string of the source element.
    pub key: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "BTreeMap::is_empty")
    )]
    pub attrs: BTreeMap<String, String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "BTreeMap::is_empty")
    )]
    pub style: BTreeMap<String, String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub paragraph: bool,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub link: Option<LinkTarget>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub children: Vec<RenderNode>,
}

/// A piece of text with its decoration.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderSpan {
    /// Flat path string of the first character.
    pub key: String,
    pub text: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub augmentation: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub color: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub underline: Option<Underline>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderStyle {
    pub key: String,
    pub css: String,
}

impl RenderNode {
    pub fn key(&self) -> &str {
        match self {
            RenderNode::Element(element) => &element.key,
            RenderNode::Span(span) => &span.key,
            RenderNode::Style(style) => &style.key,
        }
    }

    /// Visible text of this subtree.
    pub fn text(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, result: &mut String) {
        match self {
            RenderNode::Element(element) => {
                for child in &element.children {
                    child.collect_text(result);
                }
            }
            RenderNode::Span(span) => result.push_str(&span.text),
            RenderNode::Style(_) => {}
        }
    }

    /// All spans of this subtree in document order.
    pub fn spans(&self) -> Vec<&RenderSpan> {
        let mut spans = Vec::new();
        self.collect_spans(&mut spans);
        spans
    }

    fn collect_spans<'a>(&'a self, result: &mut Vec<&'a RenderSpan>) {
        match self {
            RenderNode::Element(element) => {
                for child in &element.children {
                    child.collect_spans(result);
                }
            }
            RenderNode::Span(span) => result.push(span),
            RenderNode::Style(_) => {}
        }
    }
}

/// Per-node walk state.
#[derive(Clone, Copy)]
struct Scope<'a> {
    parent: Option<&'a BooqElement>,
    within_anchor: bool,
}

/// Render a node list.
pub fn render_nodes(nodes: &[BooqNode], options: &RenderOptions) -> Vec<RenderNode> {
    debug!(
        nodes = nodes.len(),
        augmentations = options.augmentations.len(),
        "rendering nodes"
    );
    let scope = Scope {
        parent: None,
        within_anchor: false,
    };
    render_children(nodes, &BooqPath::root(), options, scope)
}

/// Render a fragment over its own display range.
pub fn render_fragment(fragment: &BooqFragment, augmentations: Vec<Augmentation>) -> Vec<RenderNode> {
    let options = RenderOptions::new()
        .with_range(fragment.range.clone())
        .with_augmentations(augmentations);
    render_nodes(&fragment.nodes, &options)
}

fn render_children(
    nodes: &[BooqNode],
    parent_path: &BooqPath,
    options: &RenderOptions,
    scope: Scope<'_>,
) -> Vec<RenderNode> {
    nodes
        .iter()
        .enumerate()
        .flat_map(|(index, node)| render_node(node, &parent_path.child(index), options, scope))
        .collect()
}

fn render_node(
    node: &BooqNode,
    path: &BooqPath,
    options: &RenderOptions,
    scope: Scope<'_>,
) -> Vec<RenderNode> {
    match node {
        BooqNode::Stub(_) => Vec::new(),
        BooqNode::Text(text) => {
            let in_table = scope.parent.is_some_and(|parent| {
                TABULAR_CONTAINERS
                    .iter()
                    .any(|tag| parent.name.eq_ignore_ascii_case(tag))
            });
            if in_table || is_blank(&text.content) {
                return Vec::new();
            }
            render_text(&text.content, path, options)
        }
        BooqNode::Element(element) => vec![render_element(element, path, options, scope)],
    }
}

fn render_text(content: &str, path: &BooqPath, options: &RenderOptions) -> Vec<RenderNode> {
    let spans = augment_text(content, path, &options.augmentations);
    trace!(path = %path, spans = spans.len(), "split text run");
    spans
        .into_iter()
        .map(|span| {
            RenderNode::Span(RenderSpan {
                key: span.path().to_string(),
                text: span.text.to_string(),
                augmentation: span.augmentation.map(|a| a.id.clone()),
                color: span.augmentation.and_then(|a| a.color.clone()),
                underline: span.augmentation.and_then(|a| a.underline),
            })
        })
        .collect()
}

fn render_element(
    element: &BooqElement,
    path: &BooqPath,
    options: &RenderOptions,
    scope: Scope<'_>,
) -> RenderNode {
    let key = path.to_string();
    let nested_anchor = element.is_anchor() && scope.within_anchor;

    let mut attrs = element.attrs.clone();
    let mut link = None;
    let tag = if nested_anchor {
        attrs.remove("href");
        "span".to_string()
    } else {
        if let Some(target) = &element.target {
            let resolved = LinkTarget::resolve(target, &options.range);
            match resolved.fragment() {
                Some(fragment) => {
                    attrs.insert("href".to_string(), fragment);
                }
                None => {
                    attrs.remove("href");
                }
            }
            link = Some(resolved);
        }
        element.name.clone()
    };

    let child_scope = Scope {
        parent: Some(element),
        within_anchor: scope.within_anchor || element.is_anchor(),
    };
    let mut children = Vec::with_capacity(element.children.len() + 1);
    if let Some(css) = &element.css {
        children.push(RenderNode::Style(RenderStyle {
            key: format!("{key}-style"),
            css: css.clone(),
        }));
    }
    children.extend(render_children(&element.children, path, options, child_scope));

    RenderNode::Element(RenderElement {
        tag,
        key,
        attrs,
        style: element.style.clone(),
        paragraph: element.pph,
        link,
        children,
    })
}

/// Map a rendered span key back to the augmentation covering it.
///
/// Returns `None` for unparsable keys and for plain text.
pub fn augmentation_for_key<'a>(
    key: &str,
    augmentations: &'a [Augmentation],
) -> Option<&'a Augmentation> {
    let path = path_from_string(key)?;
    augmentation_at(&path, augmentations)
}
