//! Positional addressing inside a document tree.
//!
//! A [`BooqPath`] is a sequence of child indices starting from the list of
//! top-level nodes. `[3, 0, 2]` means "child 3, then its child 0, then its
//! child 2". The empty path is the document root.
//!
//! Characters inside a text node are addressed by extending the node's path
//! with one trailing index: the character offset within the run. That
//! extended form is wrapped in [`TextOffset`] wherever the code needs to tell
//! it apart from a plain tree path.
//!
//! Paths serialize to `-`-joined integers (`3-0-2`) for URL fragments and
//! query parameters. Existing deep links depend on this exact format.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Separator used by the string form of a path.
pub const PATH_SEPARATOR: char = '-';

/// Hierarchical address of a position in a document tree.
///
/// Ordering is lexicographic and a strict prefix sorts before any of its
/// extensions, so a container comes before everything inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BooqPath(Vec<usize>);

impl BooqPath {
    /// The document root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Path of the `index`-th child of the node at this path.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = Vec::with_capacity(self.0.len() + 1);
        indices.extend_from_slice(&self.0);
        indices.push(index);
        Self(indices)
    }

    /// Break the path into the container prefix and the last index.
    ///
    /// Returns `None` for the root path, which has no last index.
    pub fn split_last(&self) -> Option<(Self, usize)> {
        let (&last, prefix) = self.0.split_last()?;
        Some((Self(prefix.to_vec()), last))
    }

    /// Whether `self` is a prefix of `other` (every path is a prefix of itself).
    pub fn is_prefix_of(&self, other: &BooqPath) -> bool {
        other.0.starts_with(&self.0)
    }

    /// Index of the top-level node this path descends into.
    pub fn head(&self) -> Option<usize> {
        self.0.first().copied()
    }
}

impl From<Vec<usize>> for BooqPath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl<const N: usize> From<[usize; N]> for BooqPath {
    fn from(indices: [usize; N]) -> Self {
        Self(indices.to_vec())
    }
}

impl fmt::Display for BooqPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{PATH_SEPARATOR}")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}

impl FromStr for BooqPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        path_from_string(s).ok_or_else(|| Error::InvalidPath(s.to_string()))
    }
}

/// Serialize a path as `-`-joined indices.
pub fn path_to_string(path: &BooqPath) -> String {
    path.to_string()
}

/// Parse a `-`-joined path string.
///
/// Returns `None` if any segment is not a non-negative integer. The empty
/// string is the root path, so every path round-trips through
/// [`path_to_string`].
pub fn path_from_string(s: &str) -> Option<BooqPath> {
    if s.is_empty() {
        return Some(BooqPath::root());
    }
    s.split(PATH_SEPARATOR)
        .map(|segment| {
            // `usize::from_str` accepts a leading '+', which no serialized path has.
            if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                None
            } else {
                segment.parse().ok()
            }
        })
        .collect::<Option<Vec<_>>>()
        .map(BooqPath)
}

/// Strict document-order comparison.
pub fn path_less_than(a: &BooqPath, b: &BooqPath) -> bool {
    a.cmp(b) == Ordering::Less
}

pub fn same_path(a: &BooqPath, b: &BooqPath) -> bool {
    a == b
}

/// Whether `path` falls within `[range.start, range.end)`.
pub fn path_in_range(path: &BooqPath, range: &BooqRange) -> bool {
    range.contains(path)
}

/// Half-open interval of document positions.
///
/// `end: None` extends to the end of the document. Nothing enforces
/// `start <= end`; an inverted range simply contains nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BooqRange {
    pub start: BooqPath,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub end: Option<BooqPath>,
}

impl BooqRange {
    pub fn new(start: BooqPath, end: BooqPath) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Range from `start` to the end of the document.
    pub fn from_start(start: BooqPath) -> Self {
        Self { start, end: None }
    }

    /// The whole document.
    pub fn everything() -> Self {
        Self::from_start(BooqPath::root())
    }

    pub fn contains(&self, path: &BooqPath) -> bool {
        if path < &self.start {
            return false;
        }
        match &self.end {
            Some(end) => path < end,
            None => true,
        }
    }

    /// True when no path can fall inside the range.
    pub fn is_empty(&self) -> bool {
        matches!(&self.end, Some(end) if end <= &self.start)
    }
}

/// A character position inside a text node.
///
/// `node` is the path of the text node and `offset` the character index in
/// its content. The flat form used in URLs and span identities is the node
/// path with `offset` appended, see [`TextOffset::to_path`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextOffset {
    pub node: BooqPath,
    pub offset: usize,
}

impl TextOffset {
    pub fn new(node: BooqPath, offset: usize) -> Self {
        Self { node, offset }
    }

    /// Interpret a flat path as `(text node, character offset)`.
    pub fn from_path(path: &BooqPath) -> Option<Self> {
        path.split_last()
            .map(|(node, offset)| Self { node, offset })
    }

    pub fn to_path(&self) -> BooqPath {
        self.node.child(self.offset)
    }

    /// The same node, `delta` characters further along.
    pub fn advance(&self, delta: usize) -> Self {
        Self {
            node: self.node.clone(),
            offset: self.offset + delta,
        }
    }
}

impl fmt::Display for TextOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.node.is_root() {
            write!(f, "{}", self.offset)
        } else {
            write!(f, "{}{PATH_SEPARATOR}{}", self.node, self.offset)
        }
    }
}

/// Where a boundary path falls relative to the characters of a text node.
///
/// The characters of the node at `node` have paths `node ++ [k]`. The result
/// is the number of those character paths that sort strictly before
/// `bound`, unbounded above: `usize::MAX` when `bound` comes after the whole
/// node. Callers clamp it to the run they are looking at.
pub(crate) fn character_cut(bound: &BooqPath, node: &BooqPath) -> usize {
    let bound_indices = bound.indices();
    let node_indices = node.indices();
    if bound_indices.len() > node_indices.len() && node.is_prefix_of(bound) {
        let column = bound_indices[node_indices.len()];
        // A bound deeper than a character sorts after that character's path.
        if bound_indices.len() > node_indices.len() + 1 {
            column.saturating_add(1)
        } else {
            column
        }
    } else if bound <= node {
        0
    } else {
        usize::MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(indices: &[usize]) -> BooqPath {
        BooqPath::new(indices.to_vec())
    }

    #[test]
    fn test_path_to_string() {
        assert_eq!(path_to_string(&p(&[3, 0, 2])), "3-0-2");
        assert_eq!(path_to_string(&p(&[7])), "7");
        assert_eq!(path_to_string(&BooqPath::root()), "");
    }

    #[test]
    fn test_path_from_string() {
        assert_eq!(path_from_string("3-0-2"), Some(p(&[3, 0, 2])));
        assert_eq!(path_from_string("12"), Some(p(&[12])));
        assert_eq!(path_from_string(""), Some(BooqPath::root()));
    }

    #[test]
    fn test_path_from_string_rejects_garbage() {
        assert_eq!(path_from_string("a-1"), None);
        assert_eq!(path_from_string("1--2"), None);
        assert_eq!(path_from_string("1-"), None);
        assert_eq!(path_from_string("-1"), None);
        assert_eq!(path_from_string("+1"), None);
        assert_eq!(path_from_string("1.5"), None);
        assert!("x".parse::<BooqPath>().is_err());
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert!(path_less_than(&p(&[1, 2]), &p(&[1, 2, 0])));
        assert!(!path_less_than(&p(&[1, 2, 0]), &p(&[1, 2])));
        assert!(path_less_than(&BooqPath::root(), &p(&[0])));
    }

    #[test]
    fn test_lexicographic_order() {
        assert!(path_less_than(&p(&[1, 9, 9]), &p(&[2])));
        assert!(path_less_than(&p(&[2, 3]), &p(&[2, 10])));
        assert!(!path_less_than(&p(&[4]), &p(&[4])));
    }

    #[test]
    fn test_range_boundaries() {
        let range = BooqRange::new(p(&[2]), p(&[5]));
        assert!(path_in_range(&p(&[2]), &range));
        assert!(!path_in_range(&p(&[5]), &range));
        assert!(path_in_range(&p(&[4, 9]), &range));
        assert!(!path_in_range(&p(&[1, 100]), &range));
    }

    #[test]
    fn test_open_range() {
        let range = BooqRange::from_start(p(&[3]));
        assert!(range.contains(&p(&[1000])));
        assert!(!range.contains(&p(&[2, 5])));
        assert!(!range.is_empty());
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let range = BooqRange::new(p(&[5]), p(&[2]));
        assert!(range.is_empty());
        assert!(!range.contains(&p(&[3])));
    }

    #[test]
    fn test_split_last() {
        assert_eq!(p(&[3, 0, 2]).split_last(), Some((p(&[3, 0]), 2)));
        assert_eq!(BooqPath::root().split_last(), None);
    }

    #[test]
    fn test_text_offset() {
        let offset = TextOffset::from_path(&p(&[0, 5])).unwrap();
        assert_eq!(offset, TextOffset::new(p(&[0]), 5));
        assert_eq!(offset.advance(3).to_path(), p(&[0, 8]));
        assert_eq!(offset.to_string(), "0-5");
    }

    #[test]
    fn test_character_cut() {
        let node = p(&[1, 2]);
        assert_eq!(character_cut(&p(&[1, 2, 4]), &node), 4);
        assert_eq!(character_cut(&p(&[1, 2]), &node), 0);
        assert_eq!(character_cut(&p(&[1]), &node), 0);
        assert_eq!(character_cut(&p(&[0, 7]), &node), 0);
        assert_eq!(character_cut(&p(&[1, 3]), &node), usize::MAX);
        assert_eq!(character_cut(&p(&[2]), &node), usize::MAX);
        assert_eq!(character_cut(&p(&[1, 2, 4, 0]), &node), 5);
    }

    fn arb_path() -> impl Strategy<Value = BooqPath> {
        prop::collection::vec(0usize..50, 0..6).prop_map(BooqPath::new)
    }

    proptest! {
        #[test]
        fn prop_path_string_round_trip(path in arb_path()) {
            prop_assert_eq!(path_from_string(&path_to_string(&path)), Some(path));
        }

        #[test]
        fn prop_ordering_is_total(a in arb_path(), b in arb_path()) {
            let forward = path_less_than(&a, &b);
            let backward = path_less_than(&b, &a);
            if same_path(&a, &b) {
                prop_assert!(!forward && !backward);
            } else {
                prop_assert!(forward ^ backward);
            }
        }

        #[test]
        fn prop_character_cut_counts_preceding_characters(
            bound in arb_path(),
            node in arb_path(),
            len in 0usize..20
        ) {
            let expected = (0..len).filter(|&k| node.child(k) < bound).count();
            prop_assert_eq!(character_cut(&bound, &node).min(len), expected);
        }
    }
}
