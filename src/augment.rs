//! Augmentation engine: overlaying highlight decorations on text runs.
//!
//! An [`Augmentation`] decorates a path range with a color and/or underline.
//! For one text node, [`augment_text`] partitions the node's content into
//! contiguous spans, each either plain or carrying exactly one augmentation.
//!
//! Augmentations are applied as a fold in list order. Each pass re-splits the
//! spans produced so far, so where ranges overlap the later augmentation wins.
//! Reordering the list changes the result.

use crate::model::{BooqPath, BooqRange, TextOffset, character_cut};
use crate::util::{char_len, char_slice};

/// Underline style of an augmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Underline {
    Solid,
    Dashed,
}

impl Underline {
    pub fn as_str(self) -> &'static str {
        match self {
            Underline::Solid => "solid",
            Underline::Dashed => "dashed",
        }
    }
}

/// A decoration over a path range.
///
/// `id` is chosen by the caller and must be unique among the augmentations
/// applied together; rendered spans report it back (e.g. on click).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Augmentation {
    pub range: BooqRange,
    pub id: String,
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

impl Augmentation {
    pub fn new(id: impl Into<String>, range: BooqRange) -> Self {
        Self {
            range,
            id: id.into(),
            color: None,
            underline: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_underline(mut self, underline: Underline) -> Self {
        self.underline = Some(underline);
        self
    }
}

/// A contiguous piece of a text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentedSpan<'a> {
    pub text: &'a str,
    /// Where the span starts: the text node and the character offset in it.
    pub offset: TextOffset,
    /// Decoration covering the span, `None` for plain text.
    pub augmentation: Option<&'a Augmentation>,
}

impl AugmentedSpan<'_> {
    /// Flat path of the span's first character.
    pub fn path(&self) -> BooqPath {
        self.offset.to_path()
    }

    pub fn augmentation_id(&self) -> Option<&str> {
        self.augmentation.map(|a| a.id.as_str())
    }

    pub fn color(&self) -> Option<&str> {
        self.augmentation.and_then(|a| a.color.as_deref())
    }
}

/// Split the text of the node at `node` by `augmentations`.
///
/// The returned spans concatenate back to `text` in order. Adjacent spans may
/// carry the same augmentation; they are not merged.
pub fn augment_text<'a>(
    text: &'a str,
    node: &BooqPath,
    augmentations: &'a [Augmentation],
) -> Vec<AugmentedSpan<'a>> {
    if text.is_empty() {
        return Vec::new();
    }
    let initial = vec![AugmentedSpan {
        text,
        offset: TextOffset::new(node.clone(), 0),
        augmentation: None,
    }];
    augmentations.iter().fold(initial, |spans, augmentation| {
        spans
            .into_iter()
            .flat_map(|span| split_span(span, augmentation))
            .collect()
    })
}

/// Split one span into up to three pieces around `augmentation`.
fn split_span<'a>(span: AugmentedSpan<'a>, augmentation: &'a Augmentation) -> Vec<AugmentedSpan<'a>> {
    let len = char_len(span.text);
    let (start, end) = local_cuts(&span.offset, len, &augmentation.range);
    if start >= end {
        return vec![span];
    }

    [
        (0, start, span.augmentation),
        (start, end, Some(augmentation)),
        (end, len, span.augmentation),
    ]
    .into_iter()
    .filter(|&(from, to, _)| from < to)
    .map(|(from, to, decoration)| AugmentedSpan {
        text: char_slice(span.text, from, to),
        offset: span.offset.advance(from),
        augmentation: decoration,
    })
    .collect()
}

/// Cut points of `range` within a span of `len` characters at `offset`,
/// clamped to `[0, len]` with `start <= end`.
fn local_cuts(offset: &TextOffset, len: usize, range: &BooqRange) -> (usize, usize) {
    let local = |bound: &BooqPath| {
        character_cut(bound, &offset.node)
            .saturating_sub(offset.offset)
            .min(len)
    };
    let start = local(&range.start);
    // No end: the range runs past this span to the end of the document.
    let end = range.end.as_ref().map_or(len, local);
    (start, end.max(start))
}

/// The augmentation that wins at `path`: the last one whose range contains it.
pub fn augmentation_at<'a>(
    path: &BooqPath,
    augmentations: &'a [Augmentation],
) -> Option<&'a Augmentation> {
    augmentations.iter().rev().find(|a| a.range.contains(path))
}
