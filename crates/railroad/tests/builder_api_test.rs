//! Integration tests for the DiagramBuilder API
//!
//! These tests verify that the public API works and is usable.

use railroad::{
    DiagramBuilder, Drawable, Item, Node, RailroadError,
    config::AppConfig,
    node::{MultipleChoiceKind, Terminal},
};

#[test]
fn test_builder_api_exists() {
    let _builder = DiagramBuilder::default();
}

#[test]
fn test_render_simple_diagram() {
    let builder = DiagramBuilder::new(AppConfig::default());
    let mut diagram = builder.diagram(["a", "b"]).expect("two items");
    let svg = diagram.to_svg();
    assert!(svg.starts_with("<svg"), "Output should start with the svg tag");
    assert!(svg.ends_with("</svg>"), "Output should be complete SVG");
}

#[test]
fn test_structural_equality() {
    let builder = DiagramBuilder::default();
    let build = |last: &str| {
        builder
            .sequence(vec![
                Item::from("a"),
                builder.optional("b", false).into(),
                builder.choice(0, ["c", last]).expect("valid").into(),
            ])
            .expect("three items")
    };
    assert_eq!(build("d"), build("d"));
    assert_ne!(build("d"), build("e"));

    let shorter = builder.sequence(["a"]).expect("one item");
    assert_ne!(build("d"), shorter);
}

#[test]
fn test_equal_trees_render_equally() {
    let builder = DiagramBuilder::default();
    let mut first = builder.diagram(["x", "y"]).expect("two items");
    let mut second = builder.diagram(["x", "y"]).expect("two items");
    assert_eq!(first, second);
    assert_eq!(first.to_svg(), second.to_svg());
}

#[test]
fn test_builder_reusability() {
    let builder = DiagramBuilder::default();
    let mut one = builder.diagram(["one"]).expect("one item");
    let mut two = builder.diagram(["two"]).expect("one item");
    assert!(one.to_svg().contains(">one<"));
    assert!(two.to_svg().contains(">two<"));
}

#[test]
fn test_every_constructor_error_is_reported() {
    let builder = DiagramBuilder::default();
    let empty: Vec<Item> = Vec::new();
    assert!(matches!(
        builder.sequence(empty.clone()),
        Err(RailroadError::EmptyContainer("Sequence"))
    ));
    assert!(matches!(
        builder.stack(empty.clone()),
        Err(RailroadError::EmptyContainer("Stack"))
    ));
    assert!(matches!(
        builder.choice(0, empty.clone()),
        Err(RailroadError::EmptyContainer("Choice"))
    ));
    assert!(matches!(
        builder.multiple_choice(2, MultipleChoiceKind::All, ["a", "b"]),
        Err(RailroadError::DefaultOutOfRange {
            container: "MultipleChoice",
            ..
        })
    ));
    assert!(matches!(
        builder.optional_sequence(empty.clone()),
        Err(RailroadError::EmptyContainer("OptionalSequence"))
    ));
    assert!(matches!(
        builder.horizontal_choice(empty),
        Err(RailroadError::EmptyContainer("HorizontalChoice"))
    ));
    let err = builder
        .alternating_sequence(["a"])
        .expect_err("one item is not two");
    assert_eq!(
        err.to_string(),
        "AlternatingSequence takes exactly two items, got 1"
    );
}

#[test]
fn test_leaf_options() {
    let builder = DiagramBuilder::default();
    let terminal: Terminal = builder
        .terminal("if")
        .with_href("#if")
        .with_title("keyword")
        .with_class("keyword");
    assert_eq!(terminal.text(), "if");
    let node: Node = terminal.into();
    let element = node.format(builder.config(), 0.0, 0.0, node.extents().width());
    assert_eq!(
        element.attr("class").map(|class| class.to_string()).as_deref(),
        Some("terminal keyword")
    );
}
