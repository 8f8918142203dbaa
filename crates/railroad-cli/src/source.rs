//! JSON diagram descriptions.
//!
//! A description is a tree of tagged objects mirroring the node kinds:
//!
//! ```json
//! {
//!   "kind": "simple",
//!   "items": [
//!     {"type": "Optional", "item": "-"},
//!     {"type": "OneOrMore", "item": {"type": "NonTerminal", "text": "digit"}}
//!   ]
//! }
//! ```
//!
//! A bare string anywhere an item is expected is a terminal.

use serde::Deserialize;

use railroad::{
    Diagram, DiagramBuilder, Item, Node, RailroadError,
    node::{DiagramKind, MultipleChoiceKind},
};

/// The root of a description.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagramSource {
    #[serde(default)]
    kind: DiagramKind,
    items: Vec<Source>,
}

impl DiagramSource {
    pub fn kind(&self) -> DiagramKind {
        self.kind
    }

    /// Lowers the description into a diagram measured by `builder`.
    ///
    /// # Errors
    ///
    /// Returns the first [`RailroadError`] raised by a node constructor.
    pub fn build(&self, builder: &DiagramBuilder) -> Result<Diagram, RailroadError> {
        let items = lower_all(&self.items, builder)?;
        match self.kind {
            DiagramKind::Simple => builder.diagram(items),
            DiagramKind::Complex => builder.complex_diagram(items),
        }
    }
}

/// An item: either shorthand text or a full node description.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Source {
    Text(String),
    Node(Box<SourceNode>),
}

/// Label and link options shared by the text-carrying leaves.
#[derive(Debug, Deserialize)]
pub struct LabelSource {
    text: String,
    #[serde(default)]
    href: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    class: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum SourceNode {
    Terminal(LabelSource),
    NonTerminal(LabelSource),
    Comment(LabelSource),
    Skip,
    Start {
        #[serde(default)]
        kind: DiagramKind,
        #[serde(default)]
        label: Option<String>,
    },
    End {
        #[serde(default)]
        kind: DiagramKind,
    },
    Sequence {
        items: Vec<Source>,
    },
    Stack {
        items: Vec<Source>,
    },
    Choice {
        #[serde(default)]
        default: usize,
        items: Vec<Source>,
    },
    MultipleChoice {
        #[serde(default)]
        default: usize,
        kind: MultipleChoiceKind,
        items: Vec<Source>,
    },
    Optional {
        item: Source,
        #[serde(default)]
        skip: bool,
    },
    OptionalSequence {
        items: Vec<Source>,
    },
    AlternatingSequence {
        items: Vec<Source>,
    },
    HorizontalChoice {
        items: Vec<Source>,
    },
    OneOrMore {
        item: Source,
        #[serde(default)]
        repeat: Option<Source>,
    },
    ZeroOrMore {
        item: Source,
        #[serde(default)]
        repeat: Option<Source>,
        #[serde(default)]
        skip: bool,
    },
    Group {
        item: Source,
        #[serde(default)]
        label: Option<Source>,
    },
}

/// Applies the optional link, title and class of a label to a leaf.
macro_rules! decorate {
    ($leaf:expr, $label:expr) => {{
        let label = $label;
        let mut leaf = $leaf;
        if let Some(href) = &label.href {
            leaf = leaf.with_href(href.as_str());
        }
        if let Some(title) = &label.title {
            leaf = leaf.with_title(title.as_str());
        }
        if let Some(class) = &label.class {
            leaf = leaf.with_class(class.as_str());
        }
        Node::from(leaf)
    }};
}

impl Source {
    fn lower(&self, builder: &DiagramBuilder) -> Result<Item, RailroadError> {
        match self {
            Self::Text(text) => Ok(Item::Text(text.clone())),
            Self::Node(node) => Ok(Item::Node(node.lower(builder)?)),
        }
    }
}

fn lower_all(sources: &[Source], builder: &DiagramBuilder) -> Result<Vec<Item>, RailroadError> {
    sources.iter().map(|source| source.lower(builder)).collect()
}

fn lower_opt(
    source: &Option<Source>,
    builder: &DiagramBuilder,
) -> Result<Option<Item>, RailroadError> {
    source
        .as_ref()
        .map(|source| source.lower(builder))
        .transpose()
}

impl SourceNode {
    fn lower(&self, builder: &DiagramBuilder) -> Result<Node, RailroadError> {
        let node = match self {
            Self::Terminal(label) => decorate!(builder.terminal(label.text.as_str()), label),
            Self::NonTerminal(label) => {
                decorate!(builder.non_terminal(label.text.as_str()), label)
            }
            Self::Comment(label) => decorate!(builder.comment(label.text.as_str()), label),
            Self::Skip => builder.skip(),
            Self::Start { kind, label } => builder.start(*kind, label.as_deref()),
            Self::End { kind } => builder.end(*kind),
            Self::Sequence { items } => builder.sequence(lower_all(items, builder)?)?,
            Self::Stack { items } => builder.stack(lower_all(items, builder)?)?,
            Self::Choice { default, items } => {
                builder.choice(*default, lower_all(items, builder)?)?
            }
            Self::MultipleChoice {
                default,
                kind,
                items,
            } => builder.multiple_choice(*default, *kind, lower_all(items, builder)?)?,
            Self::Optional { item, skip } => builder.optional(item.lower(builder)?, *skip),
            Self::OptionalSequence { items } => {
                builder.optional_sequence(lower_all(items, builder)?)?
            }
            Self::AlternatingSequence { items } => {
                builder.alternating_sequence(lower_all(items, builder)?)?
            }
            Self::HorizontalChoice { items } => {
                builder.horizontal_choice(lower_all(items, builder)?)?
            }
            Self::OneOrMore { item, repeat } => {
                builder.one_or_more(item.lower(builder)?, lower_opt(repeat, builder)?)
            }
            Self::ZeroOrMore { item, repeat, skip } => {
                builder.zero_or_more(item.lower(builder)?, lower_opt(repeat, builder)?, *skip)
            }
            Self::Group { item, label } => {
                builder.group(item.lower(builder)?, lower_opt(label, builder)?)
            }
        };
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> DiagramSource {
        serde_json::from_str(json).expect("valid description")
    }

    #[test]
    fn test_bare_strings_are_terminals() {
        let source = parse(r#"{"items": ["a", {"type": "NonTerminal", "text": "b"}]}"#);
        let diagram = source.build(&DiagramBuilder::default()).expect("builds");
        let kinds: Vec<&str> = diagram.items().iter().map(Node::kind).collect();
        assert_eq!(kinds, ["Start", "Terminal", "NonTerminal", "End"]);
    }

    #[test]
    fn test_nested_tree() {
        let source = parse(
            r#"{
                "kind": "complex",
                "items": [{
                    "type": "Choice",
                    "default": 1,
                    "items": [
                        {"type": "Skip"},
                        {"type": "ZeroOrMore", "item": "x", "repeat": ",", "skip": true},
                        {"type": "Group", "item": "y", "label": "note"}
                    ]
                }]
            }"#,
        );
        assert_eq!(source.kind(), DiagramKind::Complex);
        let diagram = source.build(&DiagramBuilder::default()).expect("builds");

        let mut kinds = Vec::new();
        for item in diagram.items() {
            item.walk(&mut |node: &Node| kinds.push(node.kind()));
        }
        assert!(kinds.contains(&"Skip"));
        assert!(kinds.contains(&"OneOrMore"));
        assert!(kinds.contains(&"Group"));
        assert!(kinds.contains(&"Comment"));
    }

    #[test]
    fn test_link_options() {
        let source = parse(
            r##"{"items": [{"type": "Terminal", "text": "a", "href": "#a", "title": "Letter"}]}"##,
        );
        let mut diagram = source.build(&DiagramBuilder::default()).expect("builds");
        let svg = diagram.to_svg();
        assert!(svg.contains(r##"xlink:href="#a""##));
        assert!(svg.contains("<title>Letter</title>"));
    }

    #[test]
    fn test_constructor_errors_surface() {
        let source = parse(r#"{"items": [{"type": "AlternatingSequence", "items": ["a"]}]}"#);
        assert!(matches!(
            source.build(&DiagramBuilder::default()),
            Err(RailroadError::AlternatingArity(1))
        ));

        let source = parse(r#"{"items": [{"type": "Choice", "default": 4, "items": ["a"]}]}"#);
        assert!(matches!(
            source.build(&DiagramBuilder::default()),
            Err(RailroadError::DefaultOutOfRange { .. })
        ));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result = serde_json::from_str::<DiagramSource>(r#"{"items": [{"type": "Loop"}]}"#);
        assert!(result.is_err());

        let result = serde_json::from_str::<DiagramSource>(
            r#"{"items": [{"type": "MultipleChoice", "kind": "some", "items": ["a"]}]}"#,
        );
        assert!(result.is_err());
    }
}
