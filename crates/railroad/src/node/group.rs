//! A dashed box around an item, optionally labelled.

use railroad_core::{
    geometry::Extents,
    svg::SvgElement,
    text_diagram::{TextDiagram, TextStyle},
};

use super::{Drawable, Node, push_gaps, spaced_text, spaced_width};
use crate::config::{AppConfig, LayoutConfig};

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    item: Box<Node>,
    label: Option<Box<Node>>,
    /// Height of the box above the rail.
    box_up: f32,
    extents: Extents,
}

impl Group {
    pub fn new(layout: &LayoutConfig, item: Node, label: Option<Node>) -> Self {
        let ar = layout.arc_radius();
        let vs = layout.vertical_separation();
        let item_extents = item.extents();

        let label_width = label.as_ref().map_or(0.0, |label| label.extents().width());
        let width = spaced_width(&item).max(label_width).max(ar * 2.0);
        let box_up = (item_extents.up() + vs).max(ar);
        let up = box_up + label.as_ref().map_or(0.0, |label| label.extents().total_height());
        let down = (item_extents.down() + vs).max(ar);

        Self {
            item: Box::new(item),
            label: label.map(Box::new),
            box_up,
            extents: Extents::new(width, up, item_extents.height(), down),
        }
    }

    pub fn item(&self) -> &Node {
        &self.item
    }

    pub fn label(&self) -> Option<&Node> {
        self.label.as_deref()
    }
}

impl Drawable for Group {
    fn extents(&self) -> Extents {
        self.extents
    }

    fn needs_space(&self) -> bool {
        true
    }

    fn format(&self, config: &AppConfig, x: f32, y: f32, width: f32) -> SvgElement {
        let ar = config.layout().arc_radius();
        let mut element = SvgElement::new("g");
        let x = push_gaps(&mut element, config, (x, y), width, self.extents);

        element.push(
            SvgElement::new("rect")
                .with_attr("x", x)
                .with_attr("y", y - self.box_up)
                .with_attr("width", self.extents.width())
                .with_attr(
                    "height",
                    self.box_up + self.extents.height() + self.extents.down(),
                )
                .with_attr("rx", ar)
                .with_attr("ry", ar)
                .with_attr("class", "group-box"),
        );
        element.push(self.item.format(config, x, y, self.extents.width()));
        if let Some(label) = &self.label {
            let extents = label.extents();
            let label_y = y - (self.box_up + extents.down() + extents.height());
            element.push(label.format(config, x, label_y, extents.width()));
        }
        element
    }

    fn text_diagram(&self, style: &TextStyle) -> TextDiagram {
        let inner = spaced_text(&self.item, style);
        let boxed = TextDiagram::roundrect(style, &inner, true);
        match &self.label {
            Some(label) => label
                .text_diagram(style)
                .append_below(style, &boxed, &[], true, true),
            None => boxed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use float_cmp::assert_approx_eq;

    use crate::node::{Comment, Terminal};

    #[test]
    fn test_measure_unlabelled() {
        let layout = LayoutConfig::default();
        let group = Group::new(&layout, Terminal::new(&layout, "a").into(), None);
        assert_approx_eq!(f32, group.extents().width(), 48.5);
        assert_eq!(group.extents().up(), 19.0);
        assert_eq!(group.extents().down(), 19.0);
        assert!(group.label().is_none());
    }

    #[test]
    fn test_label_adds_height_and_width() {
        let layout = LayoutConfig::default();
        let group = Group::new(
            &layout,
            Terminal::new(&layout, "a").into(),
            Some(Comment::new(&layout, "a long group label").into()),
        );
        assert_approx_eq!(f32, group.extents().width(), 18.0 * 7.0 + 10.0);
        assert_eq!(group.extents().up(), 19.0 + 16.0);
    }

    #[test]
    fn test_box_and_label_placement() {
        let config = AppConfig::default();
        let layout = config.layout();
        let group = Group::new(
            layout,
            Terminal::new(layout, "a").into(),
            Some(Comment::new(layout, "g").into()),
        );
        let element = group.format(&config, 0.0, 50.0, group.extents().width());
        let rect = element
            .elements()
            .find(|child| child.name() == "rect")
            .expect("group box")
            .to_string();
        assert_eq!(
            rect,
            "<rect class=\"group-box\" height=\"38\" rx=\"10\" ry=\"10\" width=\"48.5\" x=\"0\" y=\"31\"></rect>"
        );
        let label = element.find_all("text").pop().expect("label text");
        assert_eq!(label.attr("y").map(|y| y.to_string()), Some("28".to_string()));
    }

    #[test]
    fn test_text_dashed_box_under_label() {
        let layout = LayoutConfig::default();
        let group = Group::new(
            &layout,
            Terminal::new(&layout, "a").into(),
            Some(Comment::new(&layout, "g").into()),
        );
        let text = group.text_diagram(&TextStyle::default());
        assert_eq!(
            text.lines(),
            [
                "     g     ",
                "╭┄┄┄┄┄┄┄┄┄╮",
                "┆  ╭───╮  ┆",
                "┼──┤ a ├──┼",
                "┆  ╰───╯  ┆",
                "╰┄┄┄┄┄┄┄┄┄╯",
            ]
        );
        assert_eq!((text.entry(), text.exit()), (3, 3));
    }
}
