//! Windowing a document into displayable fragments.
//!
//! A fragment is one "page" of the reader. Consecutive top-level nodes are
//! grouped into chunks of roughly [`FragmentConfig::chunk_length`]
//! characters; cuts only ever fall between top-level nodes.
//!
//! The fragment keeps the full top-level list so paths stay valid: nodes
//! outside the window are replaced by stubs of the same length, which also
//! keeps positions identical to the full book.

use tracing::debug;

use crate::model::{BooqNode, BooqPath, BooqRange};
use crate::toc::{TocItem, extract_toc, toc_item_for_path};
use crate::traverse::node_length;

/// Default target size of a chunk, in characters.
pub const DEFAULT_CHUNK_LENGTH: usize = 4500;

/// Configuration for fragment windowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentConfig {
    /// A chunk closes once it holds at least this many characters.
    /// Zero makes every top-level node its own chunk.
    pub chunk_length: usize,
}

impl Default for FragmentConfig {
    fn default() -> Self {
        Self {
            chunk_length: DEFAULT_CHUNK_LENGTH,
        }
    }
}

impl FragmentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chunk_length(mut self, chunk_length: usize) -> Self {
        self.chunk_length = chunk_length;
        self
    }
}

/// Navigational anchor to the start of a chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FragmentAnchor {
    /// Title of the nearest heading at or before the anchor.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub title: Option<String>,
    pub path: BooqPath,
    pub position: usize,
}

/// A windowed view of the document.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BooqFragment {
    /// Top-level nodes; those outside `range` are stubs.
    pub nodes: Vec<BooqNode>,
    /// Range of the displayed window.
    pub range: BooqRange,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub previous: Option<FragmentAnchor>,
    pub current: FragmentAnchor,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub next: Option<FragmentAnchor>,
}

/// A run of top-level nodes `[start, end)` starting at `position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Chunk {
    start: usize,
    end: usize,
    position: usize,
}

/// Build the fragment containing `path` with the default configuration.
pub fn build_fragment(nodes: &[BooqNode], path: &BooqPath) -> BooqFragment {
    build_fragment_with_config(nodes, path, &FragmentConfig::default())
}

/// Build the fragment containing `path`.
///
/// Paths beyond the document land in the last fragment; the root path lands
/// in the first.
pub fn build_fragment_with_config(
    nodes: &[BooqNode],
    path: &BooqPath,
    config: &FragmentConfig,
) -> BooqFragment {
    let lengths: Vec<usize> = nodes.iter().map(node_length).collect();
    let chunks = split_chunks(&lengths, config.chunk_length);
    let toc = extract_toc(nodes);

    let target = path.head().unwrap_or(0);
    let index = chunks
        .iter()
        .position(|chunk| target < chunk.end)
        .unwrap_or(chunks.len().saturating_sub(1));

    let Some(&chunk) = chunks.get(index) else {
        // Empty document.
        return BooqFragment {
            nodes: Vec::new(),
            range: BooqRange::everything(),
            previous: None,
            current: FragmentAnchor {
                title: None,
                path: BooqPath::root(),
                position: 0,
            },
            next: None,
        };
    };

    debug!(
        target_index = target,
        chunk_start = chunk.start,
        chunk_end = chunk.end,
        chunk_count = chunks.len(),
        "built fragment window"
    );

    let windowed = nodes
        .iter()
        .zip(&lengths)
        .enumerate()
        .map(|(i, (node, &length))| {
            if (chunk.start..chunk.end).contains(&i) {
                node.clone()
            } else {
                BooqNode::stub(length)
            }
        })
        .collect();

    let range = BooqRange {
        start: BooqPath::new(vec![chunk.start]),
        end: (chunk.end < nodes.len()).then(|| BooqPath::new(vec![chunk.end])),
    };

    let anchor = |chunk: &Chunk| anchor_for_chunk(&toc, chunk);
    BooqFragment {
        nodes: windowed,
        range,
        previous: index.checked_sub(1).and_then(|i| chunks.get(i)).map(anchor),
        current: anchor(&chunk),
        next: chunks.get(index + 1).map(anchor),
    }
}

fn split_chunks(lengths: &[usize], chunk_length: usize) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut position = 0;
    let mut accumulated: usize = 0;

    for (i, &length) in lengths.iter().enumerate() {
        accumulated = accumulated.saturating_add(length);
        if accumulated >= chunk_length {
            chunks.push(Chunk {
                start,
                end: i + 1,
                position,
            });
            start = i + 1;
            position = position.saturating_add(accumulated);
            accumulated = 0;
        }
    }
    if start < lengths.len() {
        chunks.push(Chunk {
            start,
            end: lengths.len(),
            position,
        });
    }

    chunks
}

fn anchor_for_chunk(toc: &[TocItem], chunk: &Chunk) -> FragmentAnchor {
    let path = BooqPath::new(vec![chunk.start]);
    // Prefer a heading inside the chunk over the one before it.
    let end = BooqPath::new(vec![chunk.end]);
    let title = toc
        .iter()
        .find(|item| item.path >= path && item.path < end)
        .or_else(|| toc_item_for_path(toc, &path))
        .and_then(|item| item.title.clone());

    FragmentAnchor {
        title,
        path,
        position: chunk.position,
    }
}
