//! Document tree node types.

use std::collections::BTreeMap;

use super::path::BooqPath;

/// A node of a parsed book.
///
/// A document is a `Vec<BooqNode>` of top-level siblings; child order defines
/// path indices.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum BooqNode {
    Element(BooqElement),
    Text(BooqText),
    /// Placeholder for a node that was skipped or windowed out.
    Stub(BooqStub),
}

/// An element with a tag name and ordered children.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BooqElement {
    /// Tag name (`p`, `h1`, `a`, `table`, ...).
    pub name: String,
    /// Inline style declarations, property name to value.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "BTreeMap::is_empty")
    )]
    pub style: BTreeMap<String, String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "BTreeMap::is_empty")
    )]
    pub attrs: BTreeMap<String, String>,
    /// Embedded stylesheet text, rendered as a sibling `style` node.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub css: Option<String>,
    /// Marks paragraph-level blocks.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "is_false"))]
    pub pph: bool,
    /// Internal link target.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "ref", default, skip_serializing_if = "Option::is_none")
    )]
    pub target: Option<BooqPath>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub children: Vec<BooqNode>,
}

/// A run of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BooqText {
    pub content: String,
}

/// A node that renders nothing but still occupies `length` positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BooqStub {
    #[cfg_attr(feature = "serde", serde(default))]
    pub length: usize,
}

#[cfg(feature = "serde")]
fn is_false(value: &bool) -> bool {
    !*value
}

impl BooqNode {
    pub fn text(content: impl Into<String>) -> Self {
        BooqNode::Text(BooqText {
            content: content.into(),
        })
    }

    pub fn element(name: impl Into<String>, children: Vec<BooqNode>) -> Self {
        BooqNode::Element(BooqElement::new(name).with_children(children))
    }

    pub fn stub(length: usize) -> Self {
        BooqNode::Stub(BooqStub { length })
    }

    pub fn as_element(&self) -> Option<&BooqElement> {
        match self {
            BooqNode::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            BooqNode::Text(text) => Some(&text.content),
            _ => None,
        }
    }

    /// Children of an element; text and stubs have none.
    pub fn children(&self) -> &[BooqNode] {
        match self {
            BooqNode::Element(element) => &element.children,
            BooqNode::Text(_) | BooqNode::Stub(_) => &[],
        }
    }
}

impl BooqElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_children(mut self, children: Vec<BooqNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }

    pub fn with_css(mut self, css: impl Into<String>) -> Self {
        self.css = Some(css.into());
        self
    }

    pub fn with_target(mut self, target: BooqPath) -> Self {
        self.target = Some(target);
        self
    }

    pub fn paragraph(mut self) -> Self {
        self.pph = true;
        self
    }

    /// Heading level for `h1`..`h6` (zero-based) or an ARIA heading.
    pub fn heading_level(&self) -> Option<usize> {
        let name = self.name.to_ascii_lowercase();
        if let Some(digit) = name.strip_prefix('h')
            && let Ok(level @ 1..=6) = digit.parse::<usize>()
        {
            return Some(level - 1);
        }
        if self.attrs.get("role").map(String::as_str) == Some("heading") {
            let level = self
                .attrs
                .get("aria-level")
                .and_then(|l| l.parse::<usize>().ok())
                .unwrap_or(2);
            return Some(level.saturating_sub(1));
        }
        None
    }

    pub fn is_anchor(&self) -> bool {
        self.name.eq_ignore_ascii_case("a")
    }
}

impl From<BooqElement> for BooqNode {
    fn from(element: BooqElement) -> Self {
        BooqNode::Element(element)
    }
}
