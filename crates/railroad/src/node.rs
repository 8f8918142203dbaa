//! The railroad node type set.
//!
//! Every node measures itself when it is constructed, from the already
//! measured children it owns, and never changes afterwards. Rendering is a
//! single top-down walk: the vector back end calls [`Drawable::format`] with
//! an absolute entry point and an allotted width, the text back end calls
//! [`Drawable::text_diagram`] and composes the returned grids.
//!
//! # Overview
//!
//! - [`Node`] - Closed sum of every node kind.
//! - [`Drawable`] - Measurement and the two render methods.
//! - [`Item`] - A node or a bare string; strings become [`Terminal`]s.
//!
//! Leaves: [`Terminal`], [`NonTerminal`], [`Comment`], [`Skip`], [`Start`], [`End`].
//! Containers: [`Sequence`], [`Stack`], [`Choice`], [`MultipleChoice`],
//! [`OptionalSequence`], [`AlternatingSequence`], [`HorizontalChoice`],
//! [`OneOrMore`], [`Group`].

mod alternating_sequence;
mod choice;
mod group;
mod horizontal_choice;
mod leaf;
mod marker;
mod multiple_choice;
mod one_or_more;
mod optional_sequence;
mod sequence;
mod stack;

pub use alternating_sequence::AlternatingSequence;
pub use choice::Choice;
pub use group::Group;
pub use horizontal_choice::HorizontalChoice;
pub use leaf::{Comment, NonTerminal, Skip, Terminal};
pub use marker::{DiagramKind, End, Start};
pub use multiple_choice::{MultipleChoice, MultipleChoiceKind};
pub use one_or_more::OneOrMore;
pub use optional_sequence::OptionalSequence;
pub use sequence::Sequence;
pub use stack::Stack;

pub(crate) use sequence::{format_sequence, measure_sequence, sequence_text};

use std::iter;

use log::trace;

use railroad_core::{
    geometry::Extents,
    path::PathData,
    svg::{SvgElement, format_number},
    text_diagram::{TextDiagram, TextStyle},
};

use crate::config::{AppConfig, LayoutConfig};

/// Measurement plus the two render methods shared by every node kind.
pub trait Drawable {
    /// The footprint computed at construction.
    fn extents(&self) -> Extents;

    /// Whether a sequence must leave a 10-unit gap on either side of this node.
    fn needs_space(&self) -> bool;

    /// Places the node with its entry point at `(x, y)` in a slot `width`
    /// wide, returning the drawn subtree. `width` must not be smaller than
    /// the measured width.
    fn format(&self, config: &AppConfig, x: f32, y: f32, width: f32) -> SvgElement;

    /// Draws the node as a character grid.
    fn text_diagram(&self, style: &TextStyle) -> TextDiagram;
}

/// A node in a railroad diagram tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
    Comment(Comment),
    Skip(Skip),
    Start(Start),
    End(End),
    Sequence(Sequence),
    Stack(Stack),
    Choice(Choice),
    MultipleChoice(MultipleChoice),
    OptionalSequence(OptionalSequence),
    AlternatingSequence(AlternatingSequence),
    HorizontalChoice(HorizontalChoice),
    OneOrMore(OneOrMore),
    Group(Group),
}

/// A node, or a string to be wrapped into a [`Terminal`].
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Text(String),
    Node(Node),
}

impl Item {
    /// Resolves the item, measuring bare strings as terminals.
    pub fn into_node(self, layout: &LayoutConfig) -> Node {
        match self {
            Self::Text(text) => Terminal::new(layout, text).into(),
            Self::Node(node) => node,
        }
    }
}

impl From<&str> for Item {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Item {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Node> for Item {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

macro_rules! node_variants {
    ($($variant:ident),* $(,)?) => {
        impl Node {
            fn as_drawable(&self) -> &dyn Drawable {
                match self {
                    $( Self::$variant(node) => node as &dyn Drawable, )*
                }
            }

            /// Name of the node kind, as used in debug annotations.
            pub fn kind(&self) -> &'static str {
                match self {
                    $( Self::$variant(_) => stringify!($variant), )*
                }
            }
        }

        $(
            impl From<$variant> for Node {
                fn from(node: $variant) -> Self {
                    Self::$variant(node)
                }
            }

            impl From<$variant> for Item {
                fn from(node: $variant) -> Self {
                    Self::Node(Node::$variant(node))
                }
            }
        )*
    };
}

node_variants!(
    Terminal,
    NonTerminal,
    Comment,
    Skip,
    Start,
    End,
    Sequence,
    Stack,
    Choice,
    MultipleChoice,
    OptionalSequence,
    AlternatingSequence,
    HorizontalChoice,
    OneOrMore,
    Group,
);

impl Node {
    /// Direct children in drawing order.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Self::Terminal(_)
            | Self::NonTerminal(_)
            | Self::Comment(_)
            | Self::Skip(_)
            | Self::Start(_)
            | Self::End(_) => Vec::new(),
            Self::Sequence(node) => node.items().iter().collect(),
            Self::Stack(node) => node.items().iter().collect(),
            Self::Choice(node) => node.items().iter().collect(),
            Self::MultipleChoice(node) => node.items().iter().collect(),
            Self::OptionalSequence(node) => node.items().iter().collect(),
            Self::AlternatingSequence(node) => node.items().iter().collect(),
            Self::HorizontalChoice(node) => node.items().iter().collect(),
            Self::OneOrMore(node) => vec![node.item(), node.repeat()],
            Self::Group(node) => iter::once(node.item()).chain(node.label()).collect(),
        }
    }

    /// Visits this node and its descendants depth-first, parents first.
    pub fn walk<F: FnMut(&Node)>(&self, visit: &mut F) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    fn debug_label(&self) -> String {
        let extents = self.extents();
        format!(
            "{} w:{} h:{}/{}/{}",
            self.kind(),
            format_number(extents.width()),
            format_number(extents.up()),
            format_number(extents.height()),
            format_number(extents.down())
        )
    }
}

impl Drawable for Node {
    fn extents(&self) -> Extents {
        self.as_drawable().extents()
    }

    fn needs_space(&self) -> bool {
        self.as_drawable().needs_space()
    }

    fn format(&self, config: &AppConfig, x: f32, y: f32, width: f32) -> SvgElement {
        trace!(kind = self.kind(), x, y, width; "Placing node");
        let mut element = self.as_drawable().format(config, x, y, width);
        if config.style().debug() {
            element.set_attr("data-x", self.debug_label());
        }
        element
    }

    fn text_diagram(&self, style: &TextStyle) -> TextDiagram {
        self.as_drawable().text_diagram(style)
    }
}

// =============================================================================
// Shared helpers
// =============================================================================

/// Width a node takes up inside a sequence, including its spacing.
pub(crate) fn spaced_width(node: &Node) -> f32 {
    node.extents().width() + if node.needs_space() { 20.0 } else { 0.0 }
}

/// Text grid of a node, with one rail cell on each side if it needs space.
pub(crate) fn spaced_text(node: &Node, style: &TextStyle) -> TextDiagram {
    let diagram = node.text_diagram(style);
    if node.needs_space() {
        diagram.expand(style, 1, 1, 0, 0)
    } else {
        diagram
    }
}

/// Widens a grid to `width` with rails on its entry and exit rows.
pub(crate) fn widen_text(diagram: &TextDiagram, style: &TextStyle, width: usize) -> TextDiagram {
    let (left, right) = style.alignment().cell_gaps(width, diagram.width());
    diagram.expand(style, left, right, 0, 0)
}

/// Adds a column of cells on both sides of every row; `cells` receives the
/// row index and returns the `(left, right)` strings for it.
pub(crate) fn frame_text(
    diagram: &TextDiagram,
    mut cells: impl FnMut(usize) -> (String, String),
) -> TextDiagram {
    let lines = diagram
        .lines()
        .iter()
        .enumerate()
        .map(|(row, line)| {
            let (left, right) = cells(row);
            format!("{left}{line}{right}")
        })
        .collect();
    TextDiagram::new(diagram.entry(), diagram.exit(), lines)
}

/// How the items laid out by [`tracked_parts`] line up vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rails {
    /// Each item is entered on the row where the previous one leaves.
    Chained,
    /// Every item is entered on the first item's entry row.
    Shared,
}

/// Lays item grids out side by side between a shared track row above and a
/// shared track row below.
///
/// All parts come back with the same height, the tracks on their first and
/// last rows, and their entry rows placed as `rails` asks. `tracks` says
/// whether the top and bottom tracks are drawn over the item at a given
/// index.
pub(crate) fn tracked_parts(
    style: &TextStyle,
    texts: &[TextDiagram],
    rails: Rails,
    tracks: impl Fn(usize) -> (bool, bool),
) -> Vec<TextDiagram> {
    let line = style.glyphs().line();

    // First row of every item, relative to the first item's entry row.
    let mut tops = Vec::with_capacity(texts.len());
    let mut rail = 0isize;
    for text in texts {
        tops.push(rail - text.entry() as isize);
        if rails == Rails::Chained {
            rail += text.exit() as isize - text.entry() as isize;
        }
    }
    let top = tops.iter().copied().min().unwrap_or(0);
    let bottom = texts
        .iter()
        .zip(&tops)
        .map(|(text, first)| first + text.height() as isize)
        .max()
        .unwrap_or(0);

    texts
        .iter()
        .zip(&tops)
        .enumerate()
        .map(|(index, (text, first))| {
            let (over, under) = tracks(index);
            let width = text.width();
            let track = |drawn: bool| {
                if drawn {
                    repeat_glyph(line, width)
                } else {
                    " ".repeat(width)
                }
            };
            let blank = " ".repeat(width);
            let lead = (first - top) as usize;
            let tail = (bottom - first) as usize - text.height();

            let mut lines = Vec::with_capacity(lead + text.height() + tail + 2);
            lines.push(track(over));
            lines.extend(iter::repeat_n(blank.clone(), lead));
            lines.extend(text.lines().iter().cloned());
            lines.extend(iter::repeat_n(blank, tail));
            lines.push(track(under));
            TextDiagram::new(1 + lead + text.entry(), 1 + lead + text.exit(), lines)
        })
        .collect()
}

/// `count` copies of a glyph.
pub(crate) fn repeat_glyph(glyph: char, count: usize) -> String {
    iter::repeat_n(glyph, count).collect()
}

/// Starts a path with the configured arc radius.
pub(crate) fn path(config: &AppConfig, x: f32, y: f32) -> PathData {
    PathData::new(x, y, config.layout().arc_radius())
}

/// Connects the slack on either side of a node placed in a wider slot and
/// returns the x at which the node itself starts.
pub(crate) fn push_gaps(
    element: &mut SvgElement,
    config: &AppConfig,
    (x, y): (f32, f32),
    width: f32,
    extents: Extents,
) -> f32 {
    let (left, right) = config
        .layout()
        .internal_alignment()
        .gaps(width, extents.width());
    if left > 0.0 {
        element.push(path(config, x, y).h(left).into_element());
    }
    if right > 0.0 {
        let end = x + left + extents.width();
        element.push(
            path(config, end, y + extents.height())
                .h(right)
                .into_element(),
        );
    }
    x + left
}
