//! A choice laid out left to right instead of top to bottom.

use std::cmp::Ordering;

use railroad_core::{
    geometry::Extents,
    path::Quarter,
    svg::SvgElement,
    text_diagram::{TextDiagram, TextStyle},
};

use super::{
    Drawable, Node, Rails, Sequence, frame_text, path, push_gaps, spaced_text, spaced_width,
    tracked_parts,
};
use crate::{
    RailroadError,
    config::{AppConfig, LayoutConfig},
};

/// Alternatives side by side. A track over the top reaches every item but
/// the last; a track underneath collects every item but the first.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalChoice {
    items: Vec<Node>,
    /// Distance from the rail up to the track over the items.
    upper_track: f32,
    /// Distance from the rail down to the track under the items.
    lower_track: f32,
    extents: Extents,
}

impl HorizontalChoice {
    /// Builds the choice, or a plain [`Sequence`] when there is nothing to
    /// choose between.
    ///
    /// # Errors
    ///
    /// Returns [`RailroadError::EmptyContainer`] if `items` is empty.
    pub fn new(layout: &LayoutConfig, items: Vec<Node>) -> Result<Node, RailroadError> {
        match items.len() {
            0 => Err(RailroadError::EmptyContainer("HorizontalChoice")),
            1 => Ok(Sequence::new(items)?.into()),
            _ => Ok(Self::measure(layout, items).into()),
        }
    }

    fn measure(layout: &LayoutConfig, items: Vec<Node>) -> Self {
        let ar = layout.arc_radius();
        let vs = layout.vertical_separation();
        let last_index = items.len() - 1;
        let first = items[0].extents();
        let last = items[last_index].extents();

        let curve_up = if last.height() > 0.0 { ar } else { 0.0 };
        let width = ar
            + ar * 2.0 * last_index as f32
            + items.iter().map(spaced_width).sum::<f32>()
            + curve_up
            + ar;

        let upper_track = items[..last_index]
            .iter()
            .map(|item| item.extents().up() + vs)
            .fold((ar * 2.0).max(vs), f32::max);
        let up = upper_track.max(last.up());

        let mut lower_track = items[1..last_index]
            .iter()
            .map(|item| {
                let extents = item.extents();
                extents.height() + (extents.down() + vs).max(ar * 2.0)
            })
            .fold(vs.max(last.height() + last.down() + vs), f32::max);
        if first.height() < lower_track {
            lower_track = lower_track.max(first.height() + ar * 2.0);
        }
        let down = lower_track.max(first.height() + first.down());

        Self {
            items,
            upper_track,
            lower_track,
            extents: Extents::new(width, up, 0.0, down),
        }
    }

    pub fn items(&self) -> &[Node] {
        &self.items
    }
}

impl Drawable for HorizontalChoice {
    fn extents(&self) -> Extents {
        self.extents
    }

    fn needs_space(&self) -> bool {
        false
    }

    fn format(&self, config: &AppConfig, x: f32, y: f32, width: f32) -> SvgElement {
        let ar = config.layout().arc_radius();
        let mut element = SvgElement::new("g");
        let mut x = push_gaps(&mut element, config, (x, y), width, self.extents);
        let last_index = self.items.len() - 1;
        let between = (last_index as f32 - 1.0) * ar * 2.0;
        let (upper, lower) = (self.upper_track, self.lower_track);
        let last_height = self.items[last_index].extents().height();

        let upper_span =
            self.items[..last_index].iter().map(spaced_width).sum::<f32>() + between - ar;
        element.push(
            path(config, x, y)
                .arc(Quarter::SouthEast)
                .up(upper - ar * 2.0)
                .arc(Quarter::WestNorth)
                .h(upper_span)
                .into_element(),
        );

        let curve_up = if last_height > 0.0 { ar } else { 0.0 };
        let lower_span =
            self.items[1..].iter().map(spaced_width).sum::<f32>() + between + curve_up - ar;
        let lower_start = x + ar + spaced_width(&self.items[0]) + ar * 2.0;
        element.push(
            path(config, lower_start, y + lower)
                .h(lower_span)
                .arc(Quarter::SouthEast)
                .up(lower - ar * 2.0)
                .arc(Quarter::WestNorth)
                .into_element(),
        );

        for (index, item) in self.items.iter().enumerate() {
            if index == 0 {
                element.push(path(config, x, y).h(ar).into_element());
                x += ar;
            } else {
                element.push(
                    path(config, x, y - upper)
                        .arc(Quarter::NorthEast)
                        .v(upper - ar * 2.0)
                        .arc(Quarter::WestSouth)
                        .into_element(),
                );
                x += ar * 2.0;
            }

            let item_width = spaced_width(item);
            let height = item.extents().height();
            element.push(item.format(config, x, y, item_width));
            x += item_width;

            let exit = if index == last_index {
                if height == 0.0 {
                    path(config, x, y).h(ar)
                } else {
                    path(config, x, y + height).arc(Quarter::SouthEast)
                }
            } else if index == 0 && height > lower {
                // The first item reaches below the lower track and climbs to it.
                if height - lower >= ar * 2.0 {
                    path(config, x, y + height)
                        .arc(Quarter::SouthEast)
                        .v(lower - height + ar * 2.0)
                        .arc(Quarter::WestNorth)
                } else {
                    path(config, x, y + height).l(ar * 2.0, lower - height)
                }
            } else {
                path(config, x, y + height)
                    .arc(Quarter::NorthEast)
                    .v(lower - height - ar * 2.0)
                    .arc(Quarter::WestSouth)
            };
            element.push(exit.into_element());
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
        let parts = tracked_parts(style, &texts, Rails::Shared, |index| {
            (index < last, index > 0)
        });

        let mut diagram: Option<TextDiagram> = None;
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
                // The previous item drops from its exit row to the lower
                // track while this one is fed from the upper track.
                let is_last = index == last;
                let dropped = parts[index - 1].exit();
                frame_text(part, |row| {
                    let left = if row == 0 {
                        let corner = if is_last {
                            g.roundcorner_top_right()
                        } else {
                            g.tee_down()
                        };
                        format!("{line}{corner}")
                    } else if row == under {
                        let corner = if index == 1 {
                            g.roundcorner_bot_left()
                        } else {
                            g.tee_up()
                        };
                        format!("{corner}{line}")
                    } else {
                        let drop = match row.cmp(&dropped) {
                            Ordering::Less => ' ',
                            Ordering::Equal => g.roundcorner_top_right(),
                            Ordering::Greater => bar,
                        };
                        let feed = match row.cmp(&part.entry()) {
                            Ordering::Less => bar,
                            Ordering::Equal => g.roundcorner_bot_left(),
                            Ordering::Greater => ' ',
                        };
                        format!("{drop}{feed}")
                    };
                    if !is_last {
                        return (left, String::new());
                    }
                    let right = match row.cmp(&part.exit()) {
                        _ if row == under => format!("{} ", g.roundcorner_bot_right()),
                        Ordering::Less => "  ".to_string(),
                        Ordering::Equal => format!("{}{line}", g.tee_down()),
                        Ordering::Greater => format!("{bar} "),
                    };
                    (left, right)
                })
            };
            // Parts share their rows, so the previous exit is not realigned.
            diagram = Some(match diagram {
                None => framed,
                Some(joined) => joined
                    .with_entry_exit(joined.entry(), framed.entry())
                    .append_right(&framed, ""),
            });
        }
        diagram.unwrap_or_else(|| TextDiagram::new(0, 0, Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use float_cmp::assert_approx_eq;

    use crate::node::{Stack, Terminal};

    fn choice(texts: &[&str]) -> Node {
        let layout = LayoutConfig::default();
        let items = texts
            .iter()
            .map(|text| Terminal::new(&layout, *text).into())
            .collect();
        HorizontalChoice::new(&layout, items).expect("non-empty")
    }

    #[test]
    fn test_arity() {
        assert!(matches!(choice(&["a"]), Node::Sequence(_)));
        assert!(matches!(choice(&["a", "b"]), Node::HorizontalChoice(_)));
        assert!(matches!(
            HorizontalChoice::new(&LayoutConfig::default(), Vec::new()),
            Err(RailroadError::EmptyContainer("HorizontalChoice"))
        ));
    }

    #[test]
    fn test_measure() {
        let node = choice(&["a", "b"]);
        let extents = node.extents();
        assert_approx_eq!(f32, extents.width(), 10.0 + 20.0 + 48.5 * 2.0 + 10.0);
        assert_eq!(extents.up(), 20.0);
        assert_eq!(extents.height(), 0.0);
        // The lower track keeps two arcs of room under the first exit.
        assert_eq!(extents.down(), 20.0);
        assert!(!node.needs_space());
    }

    #[test]
    fn test_track_paths() {
        let config = AppConfig::default();
        let node = choice(&["a", "b"]);
        let element = node.format(&config, 0.0, 0.0, node.extents().width());
        let paths: Vec<String> = element
            .elements()
            .filter(|child| child.name() == "path")
            .filter_map(|child| child.attr("d").map(|d| d.to_string()))
            .collect();
        assert_eq!(
            paths[0],
            "M0 0a10 10 0 0 0 10 -10v0a10 10 0 0 1 10 -10h38.5"
        );
        assert_eq!(
            paths[1],
            "M78.5 20h38.5a10 10 0 0 0 10 -10v0a10 10 0 0 1 10 -10"
        );
        assert_eq!(paths.last().map(String::as_str), Some("M127 0h10"));
    }

    #[test]
    fn test_text_tracks() {
        let text = choice(&["a", "b"]).text_diagram(&TextStyle::default());
        assert_eq!(
            text.lines(),
            [
                "╭─────────╮         ",
                "│  ╭───╮  │ ╭───╮   ",
                "┴──┤ a ├─╮╰─┤ b ├─┬─",
                "   ╰───╯ │  ╰───╯ │ ",
                "         ╰────────╯ ",
            ]
        );
        assert_eq!((text.entry(), text.exit()), (2, 2));
    }

    #[test]
    fn test_text_items_share_rail_row() {
        let layout = LayoutConfig::default();
        let stack = Stack::new(
            &layout,
            vec![
                Terminal::new(&layout, "a").into(),
                Terminal::new(&layout, "b").into(),
            ],
        )
        .expect("two items");
        let items = vec![
            Node::from(stack),
            Terminal::new(&layout, "c").into(),
            Terminal::new(&layout, "d").into(),
        ];
        let text = HorizontalChoice::new(&layout, items)
            .expect("three items")
            .text_diagram(&TextStyle::default());
        assert_eq!(
            text.lines(),
            [
                "╭───────────────┬────────╮         ",
                "│     ╭───╮     │ ╭───╮  │ ╭───╮   ",
                "┴─────┤ a ├──╮  ╰─┤ c ├─╮╰─┤ d ├─┬─",
                "      ╰───╯  │    ╰───╯ │  ╰───╯ │ ",
                "   ╭─────────╯          │        │ ",
                "   │  ╭───╮             │        │ ",
                "   ╰──┤ b ├────╮        │        │ ",
                "      ╰───╯    │        │        │ ",
                "               ╰────────┴────────╯ ",
            ]
        );
        assert_eq!((text.entry(), text.exit()), (2, 2));
    }
}
