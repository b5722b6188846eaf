//! WASM bindings for in-browser readers.
//!
//! Documents, ranges and augmentations cross the boundary as JSON strings in
//! the shapes produced by the serde derives; results come back the same way.

use wasm_bindgen::prelude::*;

use crate::augment::Augmentation;
use crate::fragment::{FragmentConfig, build_fragment_with_config};
use crate::model::{BooqNode, BooqRange, path_from_string};
use crate::render::{RenderOptions, augmentation_for_key, render_nodes as render_tree};
use crate::toc::extract_toc;
use crate::traverse;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn parse<T: serde::de::DeserializeOwned>(json: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render nodes with augmentations over a display range.
///
/// Takes the node array, the displayed range and the augmentation list as
/// JSON and returns the render tree as JSON.
#[wasm_bindgen]
pub fn render_nodes(nodes: &str, range: &str, augmentations: &str) -> Result<String, JsValue> {
    let nodes: Vec<BooqNode> = parse(nodes)?;
    let options = RenderOptions::new()
        .with_range(parse(range)?)
        .with_augmentations(parse(augmentations)?);
    to_json(&render_tree(&nodes, &options))
}

/// Extract the table of contents of a document.
#[wasm_bindgen]
pub fn build_toc(nodes: &str) -> Result<String, JsValue> {
    let nodes: Vec<BooqNode> = parse(nodes)?;
    to_json(&extract_toc(&nodes))
}

/// Build the fragment holding `path` (a `-`-joined path string).
///
/// A malformed path opens the first fragment.
#[wasm_bindgen]
pub fn fragment_for_path(nodes: &str, path: &str, chunk_length: usize) -> Result<String, JsValue> {
    let nodes: Vec<BooqNode> = parse(nodes)?;
    let path = path_from_string(path).unwrap_or_default();
    let config = FragmentConfig::new().with_chunk_length(chunk_length);
    to_json(&build_fragment_with_config(&nodes, &path, &config))
}

/// Text within a JSON range.
#[wasm_bindgen]
pub fn text_for_range(nodes: &str, range: &str) -> Result<String, JsValue> {
    let nodes: Vec<BooqNode> = parse(nodes)?;
    let range: BooqRange = parse(range)?;
    Ok(traverse::text_for_range(&nodes, &range))
}

/// Id of the augmentation under a clicked span key, if any.
#[wasm_bindgen]
pub fn augmentation_id_for_key(key: &str, augmentations: &str) -> Result<Option<String>, JsValue> {
    let augmentations: Vec<Augmentation> = parse(augmentations)?;
    Ok(augmentation_for_key(key, &augmentations).map(|a| a.id.clone()))
}
