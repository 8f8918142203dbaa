//! Repetition loop.

use std::cmp::Ordering;

use railroad_core::{
    geometry::Extents,
    path::Quarter,
    svg::SvgElement,
    text_diagram::{TextDiagram, TextStyle},
};

use super::{Drawable, Node, Skip, frame_text, path, push_gaps, spaced_text, widen_text};
use crate::config::{AppConfig, LayoutConfig};

/// An item taken at least once, with a loop back underneath it that passes
/// through `repeat` (an empty [`Skip`] unless given).
#[derive(Debug, Clone, PartialEq)]
pub struct OneOrMore {
    item: Box<Node>,
    repeat: Box<Node>,
    /// Distance from the item's entry rail down to the repeat's entry rail.
    repeat_offset: f32,
    extents: Extents,
}

impl OneOrMore {
    pub fn new(layout: &LayoutConfig, item: Node, repeat: Option<Node>) -> Self {
        let ar = layout.arc_radius();
        let repeat = repeat.unwrap_or_else(|| Skip::new().into());
        let item_extents = item.extents();
        let repeat_extents = repeat.extents();

        let repeat_offset = (ar * 2.0).max(
            item_extents.height()
                + item_extents.down()
                + layout.vertical_separation()
                + repeat_extents.up(),
        );
        let width = item_extents.width().max(repeat_extents.width()) + ar * 2.0;
        let down = repeat_offset - item_extents.height()
            + repeat_extents.height()
            + repeat_extents.down();

        Self {
            item: Box::new(item),
            repeat: Box::new(repeat),
            repeat_offset,
            extents: Extents::new(width, item_extents.up(), item_extents.height(), down),
        }
    }

    pub fn item(&self) -> &Node {
        &self.item
    }

    pub fn repeat(&self) -> &Node {
        &self.repeat
    }
}

impl Drawable for OneOrMore {
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
        let inner_width = self.extents.width() - ar * 2.0;
        let height = self.extents.height();

        element.push(path(config, x, y).right(ar).into_element());
        element.push(self.item.format(config, x + ar, y, inner_width));
        element.push(
            path(config, x + ar + inner_width, y + height)
                .right(ar)
                .into_element(),
        );

        let offset = self.repeat_offset;
        let repeat_height = self.repeat.extents().height();
        element.push(
            path(config, x + ar, y)
                .arc(Quarter::NorthWest)
                .down(offset - ar * 2.0)
                .arc(Quarter::WestSouth)
                .into_element(),
        );
        element.push(self.repeat.format(config, x + ar, y + offset, inner_width));
        element.push(
            path(config, x + ar + inner_width, y + offset + repeat_height)
                .arc(Quarter::SouthEast)
                .up(offset - ar * 2.0 + repeat_height - height)
                .arc(Quarter::EastNorth)
                .into_element(),
        );
        element
    }

    fn text_diagram(&self, style: &TextStyle) -> TextDiagram {
        let g = style.glyphs();
        let (line, bar) = (g.line(), g.line_vertical());
        let item = spaced_text(&self.item, style);
        let repeat = spaced_text(&self.repeat, style);
        let width = item.width().max(repeat.width());
        let item = widen_text(&item, style, width);
        let repeat = widen_text(&repeat, style, width);

        let item = frame_text(&item, |row| {
            let left = match row.cmp(&item.entry()) {
                Ordering::Less => "  ".to_string(),
                Ordering::Equal => format!("{line}{}", g.tee_down()),
                Ordering::Greater => format!(" {bar}"),
            };
            let right = match row.cmp(&item.exit()) {
                Ordering::Less => "  ".to_string(),
                Ordering::Equal => format!("{}{line}", g.tee_down()),
                Ordering::Greater => format!("{bar} "),
            };
            (left, right)
        });
        let repeat = frame_text(&repeat, |row| {
            let left = match row.cmp(&repeat.entry()) {
                Ordering::Less => format!(" {bar}"),
                Ordering::Equal => format!(" {}", g.roundcorner_bot_left()),
                Ordering::Greater => "  ".to_string(),
            };
            let right = match row.cmp(&repeat.exit()) {
                Ordering::Less => format!("{bar} "),
                Ordering::Equal => format!("{} ", g.roundcorner_bot_right()),
                Ordering::Greater => "  ".to_string(),
            };
            (left, right)
        });
        let separator = format!(" {bar}{}{bar} ", " ".repeat(width));
        item.append_below(style, &repeat, &[separator], false, false)
    }
}
