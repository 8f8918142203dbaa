//! Construction facade that measures every node with one configuration.

use log::{debug, info};

use crate::{
    RailroadError,
    config::{AppConfig, LayoutConfig},
    diagram::Diagram,
    node::{
        AlternatingSequence, Choice, Comment, DiagramKind, End, Group, HorizontalChoice, Item,
        MultipleChoice, MultipleChoiceKind, Node, NonTerminal, OneOrMore, OptionalSequence,
        Sequence, Skip, Stack, Start, Terminal,
    },
};

/// Builder for railroad diagram trees.
///
/// Every node is measured when it is built, so the builder holds the
/// configuration whose layout constants the whole tree is measured with.
/// Anywhere an item is expected a plain string may be given; it becomes a
/// [`Terminal`].
///
/// # Examples
///
/// ```rust
/// use railroad::{DiagramBuilder, config::AppConfig};
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let digits = builder.one_or_more("digit", None);
/// let sign = builder.optional("-", false);
/// let mut diagram = builder
///     .diagram([sign, digits])
///     .expect("non-empty diagram");
///
/// let svg = diagram.to_svg();
/// assert!(svg.starts_with("<svg"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn layout(&self) -> &LayoutConfig {
        self.config.layout()
    }

    fn node(&self, item: impl Into<Item>) -> Node {
        item.into().into_node(self.layout())
    }

    fn nodes<I>(&self, items: I) -> Vec<Node>
    where
        I: IntoIterator,
        I::Item: Into<Item>,
    {
        items.into_iter().map(|item| self.node(item)).collect()
    }

    pub fn terminal(&self, text: impl Into<String>) -> Terminal {
        Terminal::new(self.layout(), text)
    }

    pub fn non_terminal(&self, text: impl Into<String>) -> NonTerminal {
        NonTerminal::new(self.layout(), text)
    }

    pub fn comment(&self, text: impl Into<String>) -> Comment {
        Comment::new(self.layout(), text)
    }

    pub fn skip(&self) -> Node {
        Skip::new().into()
    }

    /// A start marker, optionally labelled; only needed to label a diagram.
    pub fn start(&self, kind: DiagramKind, label: Option<&str>) -> Node {
        Start::new(self.layout(), kind, label.map(str::to_string)).into()
    }

    pub fn end(&self, kind: DiagramKind) -> Node {
        End::new(kind).into()
    }

    /// # Errors
    ///
    /// Returns [`RailroadError::EmptyContainer`] if `items` is empty.
    pub fn sequence<I>(&self, items: I) -> Result<Node, RailroadError>
    where
        I: IntoIterator,
        I::Item: Into<Item>,
    {
        Ok(Sequence::new(self.nodes(items))?.into())
    }

    /// # Errors
    ///
    /// Returns [`RailroadError::EmptyContainer`] if `items` is empty.
    pub fn stack<I>(&self, items: I) -> Result<Node, RailroadError>
    where
        I: IntoIterator,
        I::Item: Into<Item>,
    {
        Ok(Stack::new(self.layout(), self.nodes(items))?.into())
    }

    /// # Errors
    ///
    /// Returns [`RailroadError::EmptyContainer`] if `items` is empty and
    /// [`RailroadError::DefaultOutOfRange`] if `default` names no item.
    pub fn choice<I>(&self, default: usize, items: I) -> Result<Node, RailroadError>
    where
        I: IntoIterator,
        I::Item: Into<Item>,
    {
        Ok(Choice::new(self.layout(), default, self.nodes(items))?.into())
    }

    /// # Errors
    ///
    /// As [`DiagramBuilder::choice`].
    pub fn multiple_choice<I>(
        &self,
        default: usize,
        kind: MultipleChoiceKind,
        items: I,
    ) -> Result<Node, RailroadError>
    where
        I: IntoIterator,
        I::Item: Into<Item>,
    {
        let items = self.nodes(items);
        Ok(MultipleChoice::new(self.layout(), default, kind, items)?.into())
    }

    /// A two-way [`Choice`] between skipping and taking `item`.
    pub fn optional(&self, item: impl Into<Item>, skip: bool) -> Node {
        Choice::optional(self.layout(), self.node(item), skip).into()
    }

    /// Returns a [`Sequence`] for a single item.
    ///
    /// # Errors
    ///
    /// Returns [`RailroadError::EmptyContainer`] if `items` is empty.
    pub fn optional_sequence<I>(&self, items: I) -> Result<Node, RailroadError>
    where
        I: IntoIterator,
        I::Item: Into<Item>,
    {
        OptionalSequence::new(self.layout(), self.nodes(items))
    }

    /// # Errors
    ///
    /// Returns [`RailroadError::AlternatingArity`] unless there are exactly
    /// two items.
    pub fn alternating_sequence<I>(&self, items: I) -> Result<Node, RailroadError>
    where
        I: IntoIterator,
        I::Item: Into<Item>,
    {
        Ok(AlternatingSequence::new(self.layout(), self.nodes(items))?.into())
    }

    /// Returns a [`Sequence`] for a single item.
    ///
    /// # Errors
    ///
    /// Returns [`RailroadError::EmptyContainer`] if `items` is empty.
    pub fn horizontal_choice<I>(&self, items: I) -> Result<Node, RailroadError>
    where
        I: IntoIterator,
        I::Item: Into<Item>,
    {
        HorizontalChoice::new(self.layout(), self.nodes(items))
    }

    /// `item` one or more times, passing through `repeat` on the way back.
    pub fn one_or_more(&self, item: impl Into<Item>, repeat: Option<Item>) -> Node {
        let repeat = repeat.map(|repeat| self.node(repeat));
        OneOrMore::new(self.layout(), self.node(item), repeat).into()
    }

    /// An optional [`OneOrMore`].
    pub fn zero_or_more(&self, item: impl Into<Item>, repeat: Option<Item>, skip: bool) -> Node {
        let repeat = repeat.map(|repeat| self.node(repeat));
        Choice::zero_or_more(self.layout(), self.node(item), repeat, skip).into()
    }

    /// A dashed box around `item`. A plain string label is drawn as a
    /// [`Comment`].
    pub fn group(&self, item: impl Into<Item>, label: Option<Item>) -> Node {
        let label = label.map(|label| match label {
            Item::Text(text) => self.comment(text).into(),
            Item::Node(node) => node,
        });
        Group::new(self.layout(), self.node(item), label).into()
    }

    /// A diagram with simple start and end markers.
    ///
    /// # Errors
    ///
    /// Returns [`RailroadError::EmptyContainer`] if `items` is empty.
    pub fn diagram<I>(&self, items: I) -> Result<Diagram, RailroadError>
    where
        I: IntoIterator,
        I::Item: Into<Item>,
    {
        self.build(DiagramKind::Simple, self.nodes(items))
    }

    /// A diagram with the complex start and end markers used for rules that
    /// are part of a larger grammar.
    ///
    /// # Errors
    ///
    /// Returns [`RailroadError::EmptyContainer`] if `items` is empty.
    pub fn complex_diagram<I>(&self, items: I) -> Result<Diagram, RailroadError>
    where
        I: IntoIterator,
        I::Item: Into<Item>,
    {
        self.build(DiagramKind::Complex, self.nodes(items))
    }

    fn build(&self, kind: DiagramKind, items: Vec<Node>) -> Result<Diagram, RailroadError> {
        info!(kind:% = kind; "Building diagram");
        let diagram = Diagram::new(self.config.clone(), kind, items)?;
        debug!(
            items = diagram.items().len(),
            width = diagram.extents().width();
            "Diagram built"
        );
        Ok(diagram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::node::Drawable;

    #[test]
    fn test_strings_become_terminals() {
        let builder = DiagramBuilder::default();
        let node = builder.sequence(["a", "b"]).expect("two items");
        let children = node.children();
        assert_eq!(children.len(), 2);
        assert!(children.iter().all(|child| matches!(child, Node::Terminal(_))));
    }

    #[test]
    fn test_mixed_items() {
        let builder = DiagramBuilder::default();
        let items: Vec<Item> = vec![
            "a".into(),
            builder.non_terminal("rule").into(),
            builder.comment("note").into(),
        ];
        let node = builder.choice(1, items).expect("valid default");
        assert_eq!(node.kind(), "Choice");
        assert!(matches!(node.children()[1], Node::NonTerminal(_)));
    }

    #[test]
    fn test_single_item_collapses_to_sequence() {
        let builder = DiagramBuilder::default();
        let optional = builder.optional_sequence(["a"]).expect("one item");
        let horizontal = builder.horizontal_choice(["a"]).expect("one item");
        assert_eq!(optional.kind(), "Sequence");
        assert_eq!(horizontal.kind(), "Sequence");
        assert_eq!(optional, horizontal);
    }

    #[test]
    fn test_group_text_label_is_comment() {
        let builder = DiagramBuilder::default();
        let node = builder.group("a", Some("label".into()));
        let Node::Group(group) = &node else {
            panic!("expected a group");
        };
        assert!(matches!(group.label(), Some(Node::Comment(_))));
    }

    #[test]
    fn test_errors_propagate() {
        let builder = DiagramBuilder::default();
        assert!(matches!(
            builder.alternating_sequence(["a", "b", "c"]),
            Err(RailroadError::AlternatingArity(3))
        ));
        assert!(matches!(
            builder.choice(3, ["a", "b"]),
            Err(RailroadError::DefaultOutOfRange { default: 3, len: 2, .. })
        ));
        assert!(matches!(
            builder.diagram(Vec::<Item>::new()),
            Err(RailroadError::EmptyContainer("Diagram"))
        ));
    }

    #[test]
    fn test_layout_constants_reach_nodes() {
        let config = AppConfig::new(
            LayoutConfig::default().with_char_width(10.0),
            Default::default(),
            Default::default(),
        );
        let builder = DiagramBuilder::new(config);
        assert_eq!(builder.terminal("abc").extents().width(), 50.0);
    }

    #[test]
    fn test_complex_diagram_markers() {
        let builder = DiagramBuilder::default();
        let diagram = builder.complex_diagram(["a"]).expect("one item");
        assert_eq!(diagram.kind(), DiagramKind::Complex);
        assert!(matches!(
            diagram.items().first(),
            Some(Node::Start(start)) if start.kind() == DiagramKind::Complex
        ));
    }

    #[test]
    fn test_diagram_keeps_measuring_config() {
        let config = AppConfig::new(
            LayoutConfig::default()
                .with_char_width(10.0)
                .with_arc_radius(16.0),
            Default::default(),
            Default::default(),
        );
        let builder = DiagramBuilder::new(config.clone());
        let mut diagram = builder
            .diagram([builder.optional("abc", false)])
            .expect("one item");
        assert_eq!(diagram.config(), &config);
        assert_eq!(diagram.items()[1].children()[1].extents().width(), 50.0);
        // Arcs are drawn with the radius the tree was measured with.
        let svg = diagram.to_svg();
        assert!(svg.contains("a16 16 0"));
        assert!(!svg.contains("a10 10 0"));
    }
}
