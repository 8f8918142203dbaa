//! Left-to-right concatenation, shared with the diagram root.

use railroad_core::{
    geometry::Extents,
    svg::SvgElement,
    text_diagram::{TextDiagram, TextStyle},
};

use super::{Drawable, Node, path, push_gaps, spaced_text};
use crate::{RailroadError, config::AppConfig};

/// Measures items laid end to end.
///
/// Each item that needs space gets 10 units on both sides, except on the
/// outer edges of the run.
pub(crate) fn measure_sequence(items: &[Node]) -> Extents {
    let mut width = 0.0;
    let mut up: f32 = 0.0;
    let mut height = 0.0;
    let mut down: f32 = 0.0;
    for item in items {
        let extents = item.extents();
        width += extents.width() + if item.needs_space() { 20.0 } else { 0.0 };
        up = up.max(extents.up() - height);
        height += extents.height();
        down = (down - extents.height()).max(extents.down());
    }
    if items.first().is_some_and(|item| item.needs_space()) {
        width -= 10.0;
    }
    if items.last().is_some_and(|item| item.needs_space()) {
        width -= 10.0;
    }
    Extents::new(width, up, height, down)
}

/// Places items end to end starting at `(x, y)`, joining neighbours with a
/// single connector that covers both of their spacing needs.
pub(crate) fn format_sequence(
    element: &mut SvgElement,
    config: &AppConfig,
    items: &[Node],
    (mut x, mut y): (f32, f32),
) {
    for (index, item) in items.iter().enumerate() {
        let extents = item.extents();
        element.push(item.format(config, x, y, extents.width()));
        x += extents.width();
        y += extents.height();

        let Some(next) = items.get(index + 1) else {
            break;
        };
        let gap = [item, next]
            .iter()
            .filter(|node| node.needs_space())
            .count() as f32
            * 10.0;
        if gap > 0.0 {
            element.push(path(config, x, y).h(gap).into_element());
            x += gap;
        }
    }
}

/// Joins the items' text grids on their rails, with `between` separating
/// neighbours.
pub(crate) fn sequence_text(items: &[Node], style: &TextStyle, between: &str) -> TextDiagram {
    items
        .iter()
        .enumerate()
        .fold(TextDiagram::new(0, 0, Vec::new()), |diagram, (index, item)| {
            let seam = if index == 0 { "" } else { between };
            diagram.append_right(&spaced_text(item, style), seam)
        })
}

/// Items in a row, each entered where the previous one exits.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    items: Vec<Node>,
    extents: Extents,
}

impl Sequence {
    /// # Errors
    ///
    /// Returns [`RailroadError::EmptyContainer`] if `items` is empty.
    pub fn new(items: Vec<Node>) -> Result<Self, RailroadError> {
        if items.is_empty() {
            return Err(RailroadError::EmptyContainer("Sequence"));
        }
        let extents = measure_sequence(&items);
        Ok(Self { items, extents })
    }

    pub fn items(&self) -> &[Node] {
        &self.items
    }
}

impl Drawable for Sequence {
    fn extents(&self) -> Extents {
        self.extents
    }

    fn needs_space(&self) -> bool {
        true
    }

    fn format(&self, config: &AppConfig, x: f32, y: f32, width: f32) -> SvgElement {
        let mut element = SvgElement::new("g");
        let x = push_gaps(&mut element, config, (x, y), width, self.extents);
        format_sequence(&mut element, config, &self.items, (x, y));
        element
    }

    fn text_diagram(&self, style: &TextStyle) -> TextDiagram {
        sequence_text(&self.items, style, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use float_cmp::assert_approx_eq;

    use crate::{
        config::LayoutConfig,
        node::{Comment, Skip, Terminal},
    };

    fn terminal(text: &str) -> Node {
        Terminal::new(&LayoutConfig::default(), text).into()
    }

    #[test]
    fn test_measure_trims_outer_spacing() {
        let sequence =
            Sequence::new(vec![terminal("1"), terminal("2"), terminal("3")]).expect("items");
        assert_approx_eq!(f32, sequence.extents().width(), 3.0 * 48.5 - 20.0);
        assert_eq!(sequence.extents().up(), 11.0);
        assert_eq!(sequence.extents().height(), 0.0);
        assert_eq!(sequence.extents().down(), 11.0);
    }

    #[test]
    fn test_measure_takes_tallest_neighbours() {
        let layout = LayoutConfig::default();
        let sequence = Sequence::new(vec![
            Comment::new(&layout, "c").into(),
            terminal("t"),
            Skip::new().into(),
        ])
        .expect("items");
        assert_eq!(sequence.extents().up(), 11.0);
        assert_eq!(sequence.extents().down(), 11.0);
        // The skip needs no space, so only the comment's leading gap is trimmed.
        assert_approx_eq!(f32, sequence.extents().width(), 17.0 + 20.0 + 28.5 + 20.0 - 10.0);
    }

    #[test]
    fn test_empty_sequence_is_rejected() {
        assert!(matches!(
            Sequence::new(Vec::new()),
            Err(RailroadError::EmptyContainer("Sequence"))
        ));
    }

    #[test]
    fn test_one_connector_between_neighbours() {
        let config = AppConfig::default();
        let sequence =
            Sequence::new(vec![terminal("1"), terminal("2"), terminal("3")]).expect("items");
        let element = sequence.format(&config, 0.0, 0.0, sequence.extents().width());
        let connectors: Vec<String> = element
            .elements()
            .filter(|child| child.name() == "path")
            .filter_map(|child| child.attr("d").map(|d| d.to_string()))
            .collect();
        assert_eq!(connectors, ["M28.5 0h20", "M77 0h20"]);
    }

    #[test]
    fn test_no_connector_between_unspaced_items() {
        let config = AppConfig::default();
        let sequence = Sequence::new(vec![Skip::new().into(), Skip::new().into()]).expect("items");
        let element = sequence.format(&config, 0.0, 0.0, 0.0);
        assert_eq!(element.elements().filter(|c| c.name() == "path").count(), 0);
    }

    #[test]
    fn test_text_joins_on_rail() {
        let style = TextStyle::default();
        let sequence = Sequence::new(vec![terminal("a"), terminal("b")]).expect("items");
        let text = sequence.text_diagram(&style);
        assert_eq!(
            text.lines(),
            [" ╭───╮  ╭───╮ ", "─┤ a ├──┤ b ├─", " ╰───╯  ╰───╯ "]
        );
        assert_eq!((text.entry(), text.exit()), (1, 1));
    }
}
