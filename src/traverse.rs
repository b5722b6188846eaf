//! Pure traversals over a document tree.
//!
//! Every function here takes the top-level node list and tolerates paths
//! that point past the end of the tree: client-supplied paths come from URLs
//! and stale bookmarks, so they are clamped instead of rejected.
//!
//! Positions count characters of text content. Stubs count as their declared
//! `length` so a windowed fragment keeps the positions of the full book.

use std::ops::ControlFlow;

use crate::model::{BooqNode, BooqPath, BooqRange, character_cut};
use crate::util::{char_len, char_slice};

/// Size of a node in positions.
pub fn node_length(node: &BooqNode) -> usize {
    match node {
        BooqNode::Element(element) => nodes_length(&element.children),
        BooqNode::Text(text) => char_len(&text.content),
        BooqNode::Stub(stub) => stub.length,
    }
}

/// Total size of a node list.
pub fn nodes_length(nodes: &[BooqNode]) -> usize {
    nodes
        .iter()
        .map(node_length)
        .fold(0, usize::saturating_add)
}

/// Find the node a path addresses. The root path addresses no single node.
pub fn node_for_path<'a>(nodes: &'a [BooqNode], path: &BooqPath) -> Option<&'a BooqNode> {
    let (&head, tail) = path.indices().split_first()?;
    let mut node = nodes.get(head)?;
    for &index in tail {
        node = node.children().get(index)?;
    }
    Some(node)
}

/// Position of `path` in the document.
///
/// Sums the sizes of everything before the addressed point. A trailing index
/// into a text node counts characters. Indices past the end clamp to the size
/// of what was traversed, so the result is monotonic in path order.
pub fn position_for_path(nodes: &[BooqNode], path: &BooqPath) -> usize {
    position_in(nodes, path.indices())
}

fn position_in(nodes: &[BooqNode], indices: &[usize]) -> usize {
    let Some((&head, tail)) = indices.split_first() else {
        return 0;
    };
    let preceding = nodes[..head.min(nodes.len())]
        .iter()
        .map(node_length)
        .fold(0, usize::saturating_add);
    let Some(node) = nodes.get(head) else {
        return preceding;
    };
    let inner = match node {
        BooqNode::Element(element) => position_in(&element.children, tail),
        BooqNode::Text(text) => tail
            .first()
            .map_or(0, |&offset| offset.min(char_len(&text.content))),
        BooqNode::Stub(_) => 0,
    };
    preceding.saturating_add(inner)
}

/// Text starting at `path`, for snippets.
///
/// Leading and trailing whitespace is dropped. Collection stops after
/// `max_len` characters, or at the end of the document when `max_len` is
/// `None`. Whitespace only counts toward `max_len` once text follows it.
pub fn preview_for_path(nodes: &[BooqNode], path: &BooqPath, max_len: Option<usize>) -> String {
    let limit = max_len.unwrap_or(usize::MAX);
    let mut preview = String::new();
    let mut pending = String::new();
    let mut collected = 0;
    let range = BooqRange::from_start(path.clone());

    let _ = visit_text(nodes, &range, &mut |_, text| {
        for ch in text.chars() {
            if collected >= limit {
                return ControlFlow::Break(());
            }
            if ch.is_whitespace() {
                if collected > 0 {
                    pending.push(ch);
                }
                continue;
            }
            // Leave room for `ch` itself.
            let room = limit - collected - 1;
            if room == 0 && !pending.is_empty() {
                return ControlFlow::Break(());
            }
            for space in pending.drain(..).take(room) {
                preview.push(space);
                collected += 1;
            }
            preview.push(ch);
            collected += 1;
        }
        if collected >= limit {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });

    preview
}

/// All text within `[range.start, range.end)`.
///
/// Text nodes straddling a boundary contribute only their in-range part.
pub fn text_for_range(nodes: &[BooqNode], range: &BooqRange) -> String {
    let mut result = String::new();
    let _ = visit_text(nodes, range, &mut |_, text| {
        result.push_str(text);
        ControlFlow::<()>::Continue(())
    });
    result
}

/// Call `visit` with every in-range piece of text in document order.
///
/// `visit` receives the path of the text node and the in-range substring.
/// Subtrees entirely outside the range are skipped.
pub(crate) fn visit_text<B>(
    nodes: &[BooqNode],
    range: &BooqRange,
    visit: &mut impl FnMut(&BooqPath, &str) -> ControlFlow<B>,
) -> ControlFlow<B> {
    visit_text_in(nodes, &BooqPath::root(), range, visit)
}

fn visit_text_in<B>(
    nodes: &[BooqNode],
    parent: &BooqPath,
    range: &BooqRange,
    visit: &mut impl FnMut(&BooqPath, &str) -> ControlFlow<B>,
) -> ControlFlow<B> {
    for (index, node) in nodes.iter().enumerate() {
        let path = parent.child(index);
        if let Some(end) = &range.end
            && end <= &path
        {
            // Everything from here on sorts at or after `end`.
            break;
        }
        if parent.child(index + 1) <= range.start {
            continue;
        }
        match node {
            BooqNode::Element(element) => {
                visit_text_in(&element.children, &path, range, visit)?;
            }
            BooqNode::Text(text) => {
                let len = char_len(&text.content);
                let from = character_cut(&range.start, &path).min(len);
                let to = range
                    .end
                    .as_ref()
                    .map_or(len, |end| character_cut(end, &path).min(len));
                if from < to {
                    visit(&path, char_slice(&text.content, from, to))?;
                }
            }
            BooqNode::Stub(_) => {}
        }
    }
    ControlFlow::Continue(())
}

/// Depth-first iterator yielding every node with its path, in document order.
pub struct NodeIter<'a> {
    stack: Vec<(BooqPath, &'a BooqNode)>,
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = (BooqPath, &'a BooqNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (path, node) = self.stack.pop()?;

        // Push children in reverse order so they're visited left-to-right
        let children = node.children();
        for (index, child) in children.iter().enumerate().rev() {
            self.stack.push((path.child(index), child));
        }

        Some((path, node))
    }
}

/// Iterate over all nodes in document order.
pub fn iter_nodes(nodes: &[BooqNode]) -> NodeIter<'_> {
    let stack = nodes
        .iter()
        .enumerate()
        .rev()
        .map(|(index, node)| (BooqPath::new(vec![index]), node))
        .collect();
    NodeIter { stack }
}
