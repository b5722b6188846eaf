//! Link targets for rendered elements.

use crate::model::{BooqPath, BooqRange};

/// Where an element with an internal reference points.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "path", rename_all = "snake_case"))]
pub enum LinkTarget {
    /// Target is in the displayed window: jump to the element with this
    /// identity.
    Anchor(BooqPath),
    /// Target is outside the window: the host must navigate to it.
    Navigate(BooqPath),
}

impl LinkTarget {
    /// Resolve `target` against the displayed `range`.
    pub fn resolve(target: &BooqPath, range: &BooqRange) -> Self {
        if range.contains(target) {
            LinkTarget::Anchor(target.clone())
        } else {
            LinkTarget::Navigate(target.clone())
        }
    }

    pub fn path(&self) -> &BooqPath {
        match self {
            LinkTarget::Anchor(path) | LinkTarget::Navigate(path) => path,
        }
    }

    /// Same-document fragment (`#3-0-2`) for anchors.
    pub fn fragment(&self) -> Option<String> {
        match self {
            LinkTarget::Anchor(path) => Some(format!("#{path}")),
            LinkTarget::Navigate(_) => None,
        }
    }
}
