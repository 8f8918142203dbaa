//! Vertical stacking of items that are read in order.

use std::cmp::Ordering;

use railroad_core::{
    geometry::Extents,
    path::Quarter,
    svg::SvgElement,
    text_diagram::{TextDiagram, TextStyle},
};

use super::{
    Drawable, Node, frame_text, path, push_gaps, repeat_glyph, spaced_text, spaced_width,
    widen_text,
};
use crate::{
    RailroadError,
    config::{AppConfig, LayoutConfig},
};

/// Items drawn one under another; the rail wraps from each item's exit back
/// to the next item's entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    items: Vec<Node>,
    extents: Extents,
}

impl Stack {
    /// # Errors
    ///
    /// Returns [`RailroadError::EmptyContainer`] if `items` is empty.
    pub fn new(layout: &LayoutConfig, items: Vec<Node>) -> Result<Self, RailroadError> {
        let (Some(first), Some(last)) = (items.first(), items.last()) else {
            return Err(RailroadError::EmptyContainer("Stack"));
        };
        let arc = layout.arc_radius() * 2.0;
        let vs = layout.vertical_separation();

        let mut width = items.iter().map(spaced_width).fold(0.0, f32::max);
        if items.len() > 1 {
            width += arc;
        }
        let up = first.extents().up();
        let down = last.extents().down();

        let last_index = items.len() - 1;
        let mut height = 0.0;
        for (index, item) in items.iter().enumerate() {
            let extents = item.extents();
            height += extents.height();
            if index > 0 {
                height += arc.max(extents.up() + vs);
            }
            if index < last_index {
                height += arc.max(extents.down() + vs);
            }
        }

        Ok(Self {
            items,
            extents: Extents::new(width, up, height, down),
        })
    }

    pub fn items(&self) -> &[Node] {
        &self.items
    }
}

impl Drawable for Stack {
    fn extents(&self) -> Extents {
        self.extents
    }

    fn needs_space(&self) -> bool {
        true
    }

    fn format(&self, config: &AppConfig, x: f32, y: f32, width: f32) -> SvgElement {
        let ar = config.layout().arc_radius();
        let vs = config.layout().vertical_separation();
        let mut element = SvgElement::new("g");
        let mut x = push_gaps(&mut element, config, (x, y), width, self.extents);
        let mut y = y;
        let x_initial = x;

        let stacked = self.items.len() > 1;
        let inner_width = if stacked {
            element.push(path(config, x, y).h(ar).into_element());
            x += ar;
            self.extents.width() - ar * 2.0
        } else {
            self.extents.width()
        };

        for (index, item) in self.items.iter().enumerate() {
            element.push(item.format(config, x, y, inner_width));
            x += inner_width;
            y += item.extents().height();

            let Some(next) = self.items.get(index + 1) else {
                break;
            };
            let drop_after = item.extents().down() + vs;
            let drop_before = next.extents().up() + vs;
            element.push(
                path(config, x, y)
                    .arc(Quarter::NorthEast)
                    .down(drop_after - ar * 2.0)
                    .arc(Quarter::EastSouth)
                    .left(inner_width)
                    .arc(Quarter::NorthWest)
                    .down(drop_before - ar * 2.0)
                    .arc(Quarter::WestSouth)
                    .into_element(),
            );
            y += drop_after.max(ar * 2.0) + drop_before.max(ar * 2.0);
            x = x_initial + ar;
        }

        if stacked {
            element.push(path(config, x, y).h(ar).into_element());
        }
        element
    }

    fn text_diagram(&self, style: &TextStyle) -> TextDiagram {
        let texts: Vec<TextDiagram> = self
            .items
            .iter()
            .map(|item| spaced_text(item, style))
            .collect();
        if let [only] = texts.as_slice() {
            return only.clone();
        }

        let g = style.glyphs();
        let line = g.line();
        let width = texts.iter().map(TextDiagram::width).max().unwrap_or(0);
        let separator = format!(
            "{}{}{}",
            g.roundcorner_top_left(),
            repeat_glyph(line, width + 2),
            g.roundcorner_bot_right()
        );
        let rail = repeat_glyph(line, 2);
        let last = texts.len() - 1;

        let mut stacked: Option<TextDiagram> = None;
        for (index, text) in texts.iter().enumerate() {
            let text = widen_text(text, style, width);
            let framed = frame_text(&text, |row| {
                let left = match (index, row.cmp(&text.entry())) {
                    (0, Ordering::Equal) => rail.clone(),
                    (0, _) | (_, Ordering::Greater) => "  ".to_string(),
                    (_, Ordering::Less) => format!("{} ", g.line_vertical()),
                    (_, Ordering::Equal) => format!("{}{line}", g.roundcorner_bot_left()),
                };
                let right = match (index == last, row.cmp(&text.exit())) {
                    (true, Ordering::Equal) => rail.clone(),
                    (true, _) | (false, Ordering::Less) => "  ".to_string(),
                    (false, Ordering::Equal) => format!("{line}{}", g.roundcorner_top_right()),
                    (false, Ordering::Greater) => format!(" {}", g.line_vertical()),
                };
                (left, right)
            });
            stacked = Some(match stacked {
                None => framed,
                Some(above) => {
                    above.append_below(style, &framed, &[separator.clone()], false, true)
                }
            });
        }
        stacked.unwrap_or_else(|| TextDiagram::new(0, 0, Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use float_cmp::assert_approx_eq;

    use crate::node::Terminal;

    fn stack(texts: &[&str]) -> Stack {
        let layout = LayoutConfig::default();
        let items = texts
            .iter()
            .map(|text| Terminal::new(&layout, *text).into())
            .collect();
        Stack::new(&layout, items).expect("non-empty")
    }

    #[test]
    fn test_measure_two_items() {
        let stack = stack(&["a", "b"]);
        assert_approx_eq!(f32, stack.extents().width(), 48.5 + 20.0);
        assert_eq!(stack.extents().up(), 11.0);
        assert_eq!(stack.extents().height(), 40.0);
        assert_eq!(stack.extents().down(), 11.0);
    }

    #[test]
    fn test_single_item_has_no_arc_allowance() {
        let stack = stack(&["a"]);
        assert_approx_eq!(f32, stack.extents().width(), 48.5);
        assert_eq!(stack.extents().height(), 0.0);
    }

    #[test]
    fn test_empty_stack_is_rejected() {
        assert!(matches!(
            Stack::new(&LayoutConfig::default(), Vec::new()),
            Err(RailroadError::EmptyContainer("Stack"))
        ));
    }

    #[test]
    fn test_wrap_around_path() {
        let config = AppConfig::default();
        let stack = stack(&["a", "b"]);
        let element = stack.format(&config, 0.0, 0.0, stack.extents().width());
        let paths: Vec<String> = element
            .elements()
            .filter(|child| child.name() == "path")
            .filter_map(|child| child.attr("d").map(|d| d.to_string()))
            .collect();
        assert_eq!(
            paths,
            [
                "M0 0h10",
                "M58.5 0a10 10 0 0 1 10 10v0a10 10 0 0 1 -10 10h-48.5a10 10 0 0 0 -10 10v0a10 10 0 0 0 10 10",
                "M58.5 40h10",
            ]
        );
    }

    #[test]
    fn test_text_wraps_between_items() {
        let text = stack(&["a", "b"]).text_diagram(&TextStyle::default());
        assert_eq!(
            text.lines(),
            [
                "   ╭───╮   ",
                "───┤ a ├──╮",
                "   ╰───╯  │",
                "╭─────────╯",
                "│  ╭───╮   ",
                "╰──┤ b ├───",
                "   ╰───╯   ",
            ]
        );
        assert_eq!((text.entry(), text.exit()), (1, 5));
    }
}
