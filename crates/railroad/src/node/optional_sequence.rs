//! A sequence in which any item may be skipped, but not all of them.

use std::cmp::Ordering;

use railroad_core::{
    geometry::Extents,
    path::Quarter,
    svg::SvgElement,
    text_diagram::{TextDiagram, TextStyle},
};

use super::{
    Drawable, Node, Rails, Sequence, frame_text, path, push_gaps, spaced_text, tracked_parts,
};
use crate::{
    RailroadError,
    config::{AppConfig, LayoutConfig},
};

/// Items in order with a track over the top that skips ahead to the last
/// item and a track under each later item that skips it.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionalSequence {
    items: Vec<Node>,
    extents: Extents,
}

impl OptionalSequence {
    /// Builds the optional sequence, or a plain [`Sequence`] when there is
    /// only one item to skip.
    ///
    /// # Errors
    ///
    /// Returns [`RailroadError::EmptyContainer`] if `items` is empty.
    pub fn new(layout: &LayoutConfig, items: Vec<Node>) -> Result<Node, RailroadError> {
        match items.len() {
            0 => Err(RailroadError::EmptyContainer("OptionalSequence")),
            1 => Ok(Sequence::new(items)?.into()),
            _ => Ok(Self::measure(layout, items).into()),
        }
    }

    fn measure(layout: &LayoutConfig, items: Vec<Node>) -> Self {
        let ar = layout.arc_radius();
        let vs = layout.vertical_separation();
        let height: f32 = items.iter().map(|item| item.extents().height()).sum();
        let mut width = 0.0;
        let mut up: f32 = 0.0;
        let mut down = items[0].extents().down();
        let mut height_so_far = 0.0;

        for (index, item) in items.iter().enumerate() {
            let extents = item.extents();
            up = up.max((ar * 2.0).max(extents.up() + vs) - height_so_far);
            height_so_far += extents.height();
            if index > 0 {
                down = (height + down).max(height_so_far + (ar * 2.0).max(extents.down() + vs))
                    - height;
            }
            let item_width = spaced_item_width(item).max(ar);
            width += if index == 0 {
                ar + item_width
            } else {
                ar * 2.0 + item_width + ar
            };
        }

        Self {
            items,
            extents: Extents::new(width, up, height, down),
        }
    }

    pub fn items(&self) -> &[Node] {
        &self.items
    }
}

/// Item width plus the single 10-unit lead an item that needs space gets.
fn spaced_item_width(item: &Node) -> f32 {
    item.extents().width() + if item.needs_space() { 10.0 } else { 0.0 }
}

impl Drawable for OptionalSequence {
    fn extents(&self) -> Extents {
        self.extents
    }

    fn needs_space(&self) -> bool {
        false
    }

    fn format(&self, config: &AppConfig, x: f32, y: f32, width: f32) -> SvgElement {
        let ar = config.layout().arc_radius();
        let vs = config.layout().vertical_separation();
        let mut element = SvgElement::new("g");
        let mut x = push_gaps(&mut element, config, (x, y), width, self.extents);
        let mut y = y;
        let upper_y = y - self.extents.up();
        let last = self.items.len() - 1;

        for (index, item) in self.items.iter().enumerate() {
            let extents = item.extents();
            let item_space = if item.needs_space() { 10.0 } else { 0.0 };
            let item_width = extents.width() + item_space;

            if index == 0 {
                // Over the top to the last item.
                element.push(
                    path(config, x, y)
                        .arc(Quarter::SouthEast)
                        .up(y - upper_y - ar * 2.0)
                        .arc(Quarter::WestNorth)
                        .right(item_width - ar)
                        .arc(Quarter::NorthEast)
                        .down(y + extents.height() - upper_y - ar * 2.0)
                        .arc(Quarter::WestSouth)
                        .into_element(),
                );
                element.push(path(config, x, y).right(item_space + ar).into_element());
                element.push(item.format(config, x + item_space + ar, y, extents.width()));
                x += item_width + ar;
                y += extents.height();
                continue;
            }

            if index < last {
                element.push(
                    path(config, x, upper_y)
                        .right(ar * 2.0 + item_width.max(ar) + ar)
                        .arc(Quarter::NorthEast)
                        .down(y - upper_y + extents.height() - ar * 2.0)
                        .arc(Quarter::WestSouth)
                        .into_element(),
                );
            }
            element.push(path(config, x, y).right(ar * 2.0).into_element());
            element.push(item.format(config, x + ar * 2.0, y, extents.width()));
            element.push(
                path(config, x + extents.width() + ar * 2.0, y + extents.height())
                    .right(item_space + ar)
                    .into_element(),
            );
            // Under the item.
            element.push(
                path(config, x, y)
                    .arc(Quarter::NorthEast)
                    .down(extents.height() + (extents.down() + vs).max(ar * 2.0) - ar * 2.0)
                    .arc(Quarter::WestSouth)
                    .right(item_width - ar)
                    .arc(Quarter::SouthEast)
                    .up(extents.down() + vs - ar * 2.0)
                    .arc(Quarter::WestNorth)
                    .into_element(),
            );
            x += ar * 2.0 + item_width.max(ar) + ar;
            y += extents.height();
        }
        element
    }

    fn text_diagram(&self, style: &TextStyle) -> TextDiagram {
        let g = style.glyphs();
        let (line, bar) = (g.line(), g.line_vertical());
        let texts: Vec<TextDiagram> = self
            .items
            .iter()
            .map(|item| spaced_text(item, style))
            .collect();
        let last = texts.len() - 1;
        let parts = tracked_parts(style, &texts, Rails::Chained, |index| {
            (index < last, index > 0)
        });

        let mut diagram = TextDiagram::new(0, 0, Vec::new());
        for (index, part) in parts.iter().enumerate() {
            let under = part.height() - 1;
            let framed = if index == 0 {
                frame_text(part, |row| {
                    let left = match row.cmp(&part.entry()) {
                        _ if row == 0 => format!("{}{line}", g.roundcorner_top_left()),
                        Ordering::Less => format!("{bar} "),
                        Ordering::Equal => format!("{}{line}", g.tee_up()),
                        Ordering::Greater => "  ".to_string(),
                    };
                    (left, String::new())
                })
            } else {
                // The top track drops in on the entry row of every later
                // item and the loop underneath rejoins on its exit row.
                let is_last = index == last;
                frame_text(part, |row| {
                    let left = match row.cmp(&part.entry()) {
                        _ if row == 0 && is_last => format!("{} ", g.roundcorner_top_right()),
                        _ if row == 0 => format!("{}{line}", g.tee_down()),
                        _ if row == under => format!("{}{line}", g.roundcorner_bot_left()),
                        Ordering::Equal => format!("{}{line}", g.cross()),
                        Ordering::Less | Ordering::Greater => format!("{bar} "),
                    };
                    let right = match row.cmp(&part.exit()) {
                        _ if row == 0 && !is_last => format!("{line}{line}"),
                        _ if row == under => format!("{line}{}", g.roundcorner_bot_right()),
                        Ordering::Less => "  ".to_string(),
                        Ordering::Equal => format!("{line}{}", g.tee_down()),
                        Ordering::Greater => format!(" {bar}"),
                    };
                    (left, right)
                })
            };
            diagram = diagram.append_right(&framed, "");
        }
        diagram
    }
}
