//! JSON loading and the serialized shapes hosts depend on.

#![cfg(feature = "serde")]

use std::fs;

use booq::io::{read_augmentations, read_nodes, write_json};
use booq::{
    Augmentation, BooqPath, BooqRange, Error, RenderOptions, Underline, extract_toc, render_nodes,
};
use tempfile::TempDir;

const DOCUMENT: &str = r#"[
    {"kind": "element", "name": "h1", "children": [{"kind": "text", "content": "Chapter"}]},
    {"kind": "element", "name": "p", "pph": true, "children": [
        {"kind": "text", "content": "Hello World"}
    ]},
    {"kind": "stub", "length": 250}
]"#;

const AUGMENTATIONS: &str = r#"[
    {"id": "q1", "range": {"start": [1, 0, 6]}, "color": "yellow", "underline": "dashed"}
]"#;

#[test]
fn test_read_document_and_augmentations() {
    let dir = TempDir::new().unwrap();
    let document = dir.path().join("book.json");
    let notes = dir.path().join("notes.json");
    fs::write(&document, DOCUMENT).unwrap();
    fs::write(&notes, AUGMENTATIONS).unwrap();

    let nodes = read_nodes(&document).expect("Failed to read document");
    assert_eq!(nodes.len(), 3);

    let augmentations = read_augmentations(&notes).expect("Failed to read augmentations");
    assert_eq!(
        augmentations,
        vec![
            Augmentation::new("q1", BooqRange::from_start(BooqPath::from(vec![1, 0, 6])))
                .with_color("yellow")
                .with_underline(Underline::Dashed)
        ]
    );

    let rendered = render_nodes(&nodes, &RenderOptions::new().with_augmentations(augmentations));
    let json = serde_json::to_value(&rendered).unwrap();
    let spans = &json[1]["children"];
    assert_eq!(spans[0]["key"], "1-0-0");
    assert_eq!(spans[0]["text"], "Hello ");
    assert!(spans[0].get("augmentation").is_none());
    assert_eq!(spans[1]["key"], "1-0-6");
    assert_eq!(spans[1]["augmentation"], "q1");
    assert_eq!(spans[1]["underline"], "dashed");
    assert_eq!(json[1]["paragraph"], true);
}

#[test]
fn test_write_then_read_toc() {
    let dir = TempDir::new().unwrap();
    let document = dir.path().join("book.json");
    fs::write(&document, DOCUMENT).unwrap();

    let toc = extract_toc(&read_nodes(&document).unwrap());
    let out = dir.path().join("toc.json");
    write_json(&toc, &out).unwrap();

    let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(
        written,
        serde_json::json!([{"title": "Chapter", "level": 0, "path": [0], "position": 0}])
    );
}

#[test]
fn test_invalid_document_reports_json_error() {
    let dir = TempDir::new().unwrap();
    let document = dir.path().join("broken.json");
    fs::write(&document, r#"[{"kind": "paragraph"}]"#).unwrap();

    let err = read_nodes(&document).unwrap_err();
    assert!(matches!(err, Error::Json(_)), "unexpected error: {err}");
}
