//! End-to-end reader scenarios through the public API.

use booq::{
    Augmentation, BooqElement, BooqNode, BooqPath, BooqRange, FragmentConfig, LinkTarget,
    NavigationMode, NavigationNode, RenderNode, RenderOptions, TocItem, augmentation_for_key,
    build_fragment_with_config, build_navigation, extract_toc, path_from_string, path_in_range,
    path_less_than, path_to_string, position_for_path, preview_for_path, render_fragment,
    render_nodes, text_for_range,
};

fn p(indices: &[usize]) -> BooqPath {
    BooqPath::new(indices.to_vec())
}

fn span_summary(nodes: &[RenderNode]) -> Vec<(String, String, Option<String>)> {
    nodes
        .iter()
        .flat_map(|node| node.spans())
        .map(|span| {
            (
                span.text.clone(),
                span.key.clone(),
                span.augmentation.clone(),
            )
        })
        .collect()
}

/// Three short chapters, each a heading followed by two paragraphs.
fn book() -> Vec<BooqNode> {
    let chapter = |title: &str, first: &str, second: &str| {
        BooqNode::element(
            "section",
            vec![
                BooqNode::element("h1", vec![BooqNode::text(title)]),
                BooqNode::text("\n  "),
                BooqNode::Element(
                    BooqElement::new("p")
                        .paragraph()
                        .with_children(vec![BooqNode::text(first)]),
                ),
                BooqNode::Element(
                    BooqElement::new("p")
                        .paragraph()
                        .with_children(vec![BooqNode::text(second)]),
                ),
            ],
        )
    };
    vec![
        chapter("Loomings", "Call me Ishmael.", "Some years ago."),
        chapter("The Carpet-Bag", "I stuffed a shirt or two.", "See [0]."),
        chapter("The Spouter-Inn", "Entering that gable-ended inn.", "The end."),
    ]
}

// ============================================================================
// Path algebra
// ============================================================================

#[test]
fn test_path_string_format() {
    let path = p(&[3, 0, 2]);
    assert_eq!(path_to_string(&path), "3-0-2");
    assert_eq!(path_from_string("3-0-2"), Some(path));
    assert_eq!(path_from_string("3-zero-2"), None);
}

#[test]
fn test_range_containment_boundary() {
    let range = BooqRange::new(p(&[2]), p(&[5]));
    assert!(path_in_range(&p(&[2]), &range));
    assert!(!path_in_range(&p(&[5]), &range));
    assert!(path_in_range(&p(&[4, 9]), &range));
    assert!(path_less_than(&p(&[1, 2]), &p(&[1, 2, 0])));
    assert!(!path_less_than(&p(&[1, 2, 0]), &p(&[1, 2])));
}

// ============================================================================
// Augmentation through the renderer
// ============================================================================

#[test]
fn test_open_ended_highlight_on_root_text() {
    let nodes = vec![BooqNode::text("Hello World")];
    let options = RenderOptions::new().with_augmentations(vec![
        Augmentation::new("h1", BooqRange::from_start(p(&[0, 5]))).with_color("yellow"),
    ]);
    assert_eq!(
        span_summary(&render_nodes(&nodes, &options)),
        vec![
            ("Hello".to_string(), "0-0".to_string(), None),
            (" World".to_string(), "0-5".to_string(), Some("h1".to_string())),
        ]
    );
}

#[test]
fn test_bounded_highlight_on_root_text() {
    let nodes = vec![BooqNode::text("Hello World")];
    let options = RenderOptions::new().with_augmentations(vec![
        Augmentation::new("r", BooqRange::new(p(&[0, 0]), p(&[0, 5]))).with_color("red"),
    ]);
    assert_eq!(
        span_summary(&render_nodes(&nodes, &options)),
        vec![
            ("Hello".to_string(), "0-0".to_string(), Some("r".to_string())),
            (" World".to_string(), "0-5".to_string(), None),
        ]
    );
}

#[test]
fn test_highlight_spanning_chapters_resolves_clicks() {
    let nodes = book();
    let augmentations = vec![
        Augmentation::new("quote", BooqRange::new(p(&[0, 3, 0, 5]), p(&[1, 2, 0, 9])))
            .with_color("blue"),
        Augmentation::new("note", BooqRange::new(p(&[1, 0]), p(&[1, 1]))).with_color("green"),
    ];
    let options = RenderOptions::new().with_augmentations(augmentations.clone());
    let rendered = render_nodes(&nodes, &options);

    let text: String = rendered.iter().map(RenderNode::text).collect();
    let quoted = text_for_range(&nodes, &augmentations[0].range);
    // Whitespace between blocks is document text even though it never renders.
    assert_eq!(quoted, "years ago.The Carpet-Bag\n  I stuffed");

    // Every rendered span reports the augmentation that wins at its key.
    for span in rendered.iter().flat_map(|node| node.spans()) {
        let expected = augmentation_for_key(&span.key, &augmentations).map(|a| a.id.clone());
        assert_eq!(span.augmentation, expected, "span {}", span.key);
    }
    assert!(text.contains("Call me Ishmael."));

    let heading = rendered[1].spans()[0];
    assert_eq!(heading.key, "1-0-0-0");
    assert_eq!(heading.augmentation.as_deref(), Some("note"));
}

// ============================================================================
// Document traversals
// ============================================================================

#[test]
fn test_positions_are_monotonic_across_siblings() {
    let nodes = vec![
        BooqNode::text("abcde"),
        BooqNode::text("fgh"),
        BooqNode::text("ijklmno"),
    ];
    let positions: Vec<usize> = (0..3)
        .map(|i| position_for_path(&nodes, &p(&[i])))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_preview_skips_leading_whitespace() {
    let nodes = book();
    assert_eq!(
        preview_for_path(&nodes, &p(&[0, 1]), Some(12)),
        "Call me Ishm"
    );
}

#[test]
fn test_toc_of_book() {
    let nodes = book();
    let toc = extract_toc(&nodes);
    let titles: Vec<&str> = toc.iter().filter_map(|i| i.title.as_deref()).collect();
    assert_eq!(titles, ["Loomings", "The Carpet-Bag", "The Spouter-Inn"]);
    assert!(toc.windows(2).all(|w| w[0].position <= w[1].position));
    assert_eq!(toc[1].path, p(&[1, 0]));
    assert_eq!(toc[1].position, position_for_path(&nodes, &p(&[1, 0])));
}

// ============================================================================
// Fragments
// ============================================================================

#[test]
fn test_fragment_render_resolves_links_by_window() {
    let mut nodes = book();
    if let BooqNode::Element(section) = &mut nodes[1] {
        section.children.push(BooqNode::Element(
            BooqElement::new("a")
                .with_target(p(&[0, 0]))
                .with_children(vec![BooqNode::text("back")]),
        ));
        section.children.push(BooqNode::Element(
            BooqElement::new("a")
                .with_target(p(&[1, 2]))
                .with_children(vec![BooqNode::text("here")]),
        ));
    }

    let config = FragmentConfig::new().with_chunk_length(1);
    let fragment = build_fragment_with_config(&nodes, &p(&[1, 3, 0, 2]), &config);
    assert_eq!(fragment.range, BooqRange::new(p(&[1]), p(&[2])));
    assert_eq!(fragment.current.title.as_deref(), Some("The Carpet-Bag"));
    assert_eq!(fragment.previous.as_ref().map(|a| a.path.clone()), Some(p(&[0])));
    assert_eq!(fragment.next.as_ref().map(|a| a.path.clone()), Some(p(&[2])));

    let rendered = render_fragment(&fragment, Vec::new());
    assert_eq!(rendered.len(), 1);
    let RenderNode::Element(section) = &rendered[0] else {
        panic!("expected section element");
    };
    assert_eq!(section.key, "1");

    let links: Vec<&LinkTarget> = section
        .children
        .iter()
        .filter_map(|child| match child {
            RenderNode::Element(element) => element.link.as_ref(),
            _ => None,
        })
        .collect();
    assert_eq!(
        links,
        vec![
            &LinkTarget::Navigate(p(&[0, 0])),
            &LinkTarget::Anchor(p(&[1, 2]))
        ]
    );
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn test_navigation_groups_annotation_under_first_chapter() {
    let toc = vec![
        TocItem::new("Ch1", 0, p(&[0]), 0),
        TocItem::new("Ch2", 0, p(&[10]), 100),
    ];
    let annotations = vec![Augmentation::new("n", BooqRange::from_start(p(&[3])))];
    let nodes = build_navigation(&toc, &annotations, NavigationMode::Annotations);

    assert_eq!(nodes.len(), 1);
    match &nodes[0] {
        NavigationNode::Group(group) => {
            assert_eq!(group.titles(), ["Ch1"]);
            assert_eq!(group.annotations.len(), 1);
        }
        other => panic!("expected group, got {other:?}"),
    }
}
