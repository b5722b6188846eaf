//! Core data model for document addressing.
//!
//! This module contains:
//! - Paths, ranges and character offsets (the path algebra)
//! - Document tree node types

mod node;
mod path;

pub use node::{BooqElement, BooqNode, BooqStub, BooqText};
pub use path::{
    BooqPath, BooqRange, PATH_SEPARATOR, TextOffset, path_from_string, path_in_range,
    path_less_than, path_to_string, same_path,
};

pub(crate) use path::character_cut;
