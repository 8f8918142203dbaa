//! Diagram corpus shared by the integration tests.

use railroad::{
    Diagram, DiagramBuilder, Item,
    node::{DiagramKind, MultipleChoiceKind},
};

/// One diagram per node kind, each exercised at least once.
pub fn corpus(builder: &DiagramBuilder) -> Vec<(&'static str, Diagram)> {
    let b = builder;
    let diagrams = vec![
        ("sequence", b.diagram(["1", "2", "3"])),
        (
            "comment",
            b.diagram([
                Item::from("a"),
                b.comment("then").into(),
                b.non_terminal("rule").into(),
            ]),
        ),
        ("choice", b.choice(1, ["a", "b", "c"]).and_then(|n| b.diagram([n]))),
        ("stack", b.stack(["first", "second", "third"]).and_then(|n| b.diagram([n]))),
        (
            "group",
            b.diagram([b.group(
                b.sequence(["a", "b"]).expect("two items"),
                Some("pair".into()),
            )]),
        ),
        (
            "alternating",
            b.alternating_sequence(["foo", "bar"])
                .and_then(|n| b.diagram([n])),
        ),
        (
            "horizontal",
            b.horizontal_choice(["a", "b", "c"])
                .and_then(|n| b.diagram([n])),
        ),
        (
            "multiple",
            b.multiple_choice(0, MultipleChoiceKind::Any, ["x", "y"])
                .and_then(|n| b.diagram([n])),
        ),
        (
            "one_or_more",
            b.diagram([b.one_or_more("item", Some(",".into()))]),
        ),
        ("optional", b.diagram([b.optional("x", false), b.optional("y", true)])),
        (
            "optional_sequence",
            b.optional_sequence(["a", "b", "c"])
                .and_then(|n| b.diagram([n])),
        ),
        ("zero_or_more", b.diagram([b.zero_or_more("x", None, false)])),
        (
            "whitespace",
            b.diagram([b.terminal("  spaced  out  ")]),
        ),
        (
            "linked",
            b.complex_diagram([
                b.start(DiagramKind::Complex, Some("rule")),
                b.terminal("a&b").with_href("https://example.com/?a=1&b=2").into(),
                b.non_terminal("\"quoted\"").with_title("see <here>").into(),
            ]),
        ),
    ];
    diagrams
        .into_iter()
        .map(|(name, diagram)| (name, diagram.expect("corpus diagram builds")))
        .collect()
}
