//! Sidebar navigation: table of contents interleaved with annotations.
//!
//! Headings split the document into gaps `[heading.path, next.path)`. Every
//! annotation is placed in the gap its start falls into. Annotations before
//! the first heading form a gap of their own with no enclosing headings.
//!
//! Choosing which annotations to show (by author, kind, ...) is up to the
//! caller; the builder takes the list as given.

use tracing::debug;

use crate::augment::Augmentation;
use crate::model::{BooqPath, BooqRange, path_in_range};
use crate::toc::TocItem;

/// Anything positioned by a range.
pub trait Annotated {
    fn range(&self) -> &BooqRange;
}

impl Annotated for Augmentation {
    fn range(&self) -> &BooqRange {
        &self.range
    }
}

/// What the navigation list shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NavigationMode {
    /// Only gaps holding annotations, one group per gap.
    #[default]
    Annotations,
    /// Every heading and every annotation, in document order.
    Full,
}

/// Annotations of one gap together with the headings enclosing it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(bound(serialize = "A: serde::Serialize")))]
pub struct AnnotationGroup<'a, A> {
    /// Breadcrumb from the outermost heading to the one opening the gap.
    pub headings: Vec<&'a TocItem>,
    pub annotations: Vec<&'a A>,
}

impl<A> AnnotationGroup<'_, A> {
    /// Start of the gap (the root for annotations before any heading).
    pub fn path(&self) -> BooqPath {
        self.headings
            .last()
            .map(|heading| heading.path.clone())
            .unwrap_or_default()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.headings
            .iter()
            .filter_map(|heading| heading.title.as_deref())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "item", rename_all = "snake_case"))]
#[cfg_attr(feature = "serde", serde(bound(serialize = "A: serde::Serialize")))]
pub enum NavigationNode<'a, A> {
    Toc(&'a TocItem),
    Annotation(&'a A),
    Group(AnnotationGroup<'a, A>),
}

/// Interleave `toc` (in document order) with `annotations`.
pub fn build_navigation<'a, A: Annotated>(
    toc: &'a [TocItem],
    annotations: &'a [A],
    mode: NavigationMode,
) -> Vec<NavigationNode<'a, A>> {
    let mut sorted: Vec<&A> = annotations.iter().collect();
    sorted.sort_by(|a, b| a.range().start.cmp(&b.range().start));

    let mut nodes = Vec::new();
    let mut breadcrumb: Vec<&TocItem> = Vec::new();

    let leading = BooqRange {
        start: BooqPath::root(),
        end: toc.first().map(|item| item.path.clone()),
    };
    push_gap(&mut nodes, mode, None, &breadcrumb, bucket(&sorted, &leading));

    for (index, item) in toc.iter().enumerate() {
        while breadcrumb.last().is_some_and(|last| last.level >= item.level) {
            breadcrumb.pop();
        }
        breadcrumb.push(item);

        let gap = BooqRange {
            start: item.path.clone(),
            end: toc.get(index + 1).map(|next| next.path.clone()),
        };
        push_gap(&mut nodes, mode, Some(item), &breadcrumb, bucket(&sorted, &gap));
    }

    debug!(
        headings = toc.len(),
        annotations = annotations.len(),
        nodes = nodes.len(),
        ?mode,
        "built navigation"
    );
    nodes
}

fn bucket<'a, A: Annotated>(sorted: &[&'a A], gap: &BooqRange) -> Vec<&'a A> {
    sorted
        .iter()
        .copied()
        .filter(|annotation| path_in_range(&annotation.range().start, gap))
        .collect()
}

fn push_gap<'a, A>(
    nodes: &mut Vec<NavigationNode<'a, A>>,
    mode: NavigationMode,
    heading: Option<&'a TocItem>,
    breadcrumb: &[&'a TocItem],
    annotations: Vec<&'a A>,
) {
    match mode {
        NavigationMode::Full => {
            nodes.extend(heading.map(NavigationNode::Toc));
            nodes.extend(annotations.into_iter().map(NavigationNode::Annotation));
        }
        NavigationMode::Annotations => {
            if !annotations.is_empty() {
                nodes.push(NavigationNode::Group(AnnotationGroup {
                    headings: breadcrumb.to_vec(),
                    annotations,
                }));
            }
        }
    }
}
