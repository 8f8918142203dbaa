//! Two items taken in strict alternation, starting with either one.

use std::f32::consts::FRAC_1_SQRT_2;

use railroad_core::{
    geometry::Extents,
    path::{Compass, Quarter, Rotation},
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

/// Horizontal and vertical reach of the crossover in the middle.
struct Crossover {
    arc_x: f32,
    arc_y: f32,
    cross_x: f32,
    cross_y: f32,
}

impl Crossover {
    fn new(layout: &LayoutConfig) -> Self {
        let ar = layout.arc_radius();
        let arc_x = FRAC_1_SQRT_2 * ar * 2.0;
        let arc_y = (1.0 - FRAC_1_SQRT_2) * ar * 2.0;
        let cross_y = ar.max(layout.vertical_separation());
        Self {
            arc_x,
            arc_y,
            cross_x: cross_y - arc_y + arc_x,
            cross_y,
        }
    }
}

/// The first item above the rail, the second below, with crossing tracks
/// between them so that either may follow the other any number of times.
#[derive(Debug, Clone, PartialEq)]
pub struct AlternatingSequence {
    items: Box<[Node; 2]>,
    extents: Extents,
}

impl AlternatingSequence {
    /// # Errors
    ///
    /// Returns [`RailroadError::AlternatingArity`] unless exactly two items
    /// are given.
    pub fn new(layout: &LayoutConfig, items: Vec<Node>) -> Result<Self, RailroadError> {
        let count = items.len();
        let [first, second]: [Node; 2] = items
            .try_into()
            .map_err(|_| RailroadError::AlternatingArity(count))?;

        let ar = layout.arc_radius();
        let vs = layout.vertical_separation();
        let crossover = Crossover::new(layout);
        let half_cross = crossover.cross_y / 2.0;
        let (fe, se) = (first.extents(), second.extents());

        let first_out = (ar * 2.0)
            .max(half_cross + ar * 2.0)
            .max(half_cross + vs + fe.down());
        let second_in = (ar * 2.0)
            .max(half_cross + ar * 2.0)
            .max(half_cross + vs + se.up());
        let inner = spaced_width(&first)
            .max(crossover.cross_x)
            .max(spaced_width(&second));

        Ok(Self {
            extents: Extents::new(
                ar * 4.0 + inner,
                first_out + fe.height() + fe.up(),
                0.0,
                second_in + se.height() + se.down(),
            ),
            items: Box::new([first, second]),
        })
    }

    pub fn items(&self) -> &[Node] {
        &self.items[..]
    }
}

impl Drawable for AlternatingSequence {
    fn extents(&self) -> Extents {
        self.extents
    }

    fn needs_space(&self) -> bool {
        false
    }

    fn format(&self, config: &AppConfig, x: f32, y: f32, width: f32) -> SvgElement {
        let ar = config.layout().arc_radius();
        let mut element = SvgElement::new("g");
        let x = push_gaps(&mut element, config, (x, y), width, self.extents);
        let [first, second] = &*self.items;
        let (fe, se) = (first.extents(), second.extents());
        let inner_width = self.extents.width() - ar * 4.0;

        let first_in = self.extents.up() - fe.up();
        let first_out = first_in - fe.height();
        element.push(
            path(config, x, y)
                .arc(Quarter::SouthEast)
                .up(first_in - ar * 2.0)
                .arc(Quarter::WestNorth)
                .into_element(),
        );
        element.push(first.format(config, x + ar * 2.0, y - first_in, inner_width));
        element.push(
            path(config, x + self.extents.width() - ar * 2.0, y - first_out)
                .arc(Quarter::NorthEast)
                .down(first_out - ar * 2.0)
                .arc(Quarter::WestSouth)
                .into_element(),
        );

        let second_out = self.extents.down() - se.down();
        let second_in = second_out - se.height();
        element.push(
            path(config, x, y)
                .arc(Quarter::NorthEast)
                .down(second_in - ar * 2.0)
                .arc(Quarter::WestSouth)
                .into_element(),
        );
        element.push(second.format(config, x + ar * 2.0, y + second_in, inner_width));
        element.push(
            path(config, x + self.extents.width() - ar * 2.0, y + second_out)
                .arc(Quarter::SouthEast)
                .up(second_out - ar * 2.0)
                .arc(Quarter::WestNorth)
                .into_element(),
        );

        let Crossover {
            arc_x,
            arc_y,
            cross_x,
            cross_y,
        } = Crossover::new(config.layout());
        let bar = (inner_width - cross_x) / 2.0;
        element.push(
            path(config, x + ar, y - cross_y / 2.0 - ar)
                .arc(Quarter::WestSouth)
                .right(bar)
                .arc_8(Compass::North, Rotation::Clockwise)
                .l(cross_x - arc_x, cross_y - arc_y)
                .arc_8(Compass::SouthWest, Rotation::CounterClockwise)
                .right(bar)
                .arc(Quarter::NorthEast)
                .into_element(),
        );
        element.push(
            path(config, x + ar, y + cross_y / 2.0 + ar)
                .arc(Quarter::WestNorth)
                .right(bar)
                .arc_8(Compass::South, Rotation::CounterClockwise)
                .l(cross_x - arc_x, -(cross_y - arc_y))
                .arc_8(Compass::NorthWest, Rotation::Clockwise)
                .right(bar)
                .arc(Quarter::SouthEast)
                .into_element(),
        );
        element
    }

    fn text_diagram(&self, style: &TextStyle) -> TextDiagram {
        let g = style.glyphs();
        let (line, bar) = (g.line(), g.line_vertical());
        let [first, second] = &*self.items;
        let first = spaced_text(first, style);
        let second = spaced_text(second, style);
        let width = first.width().max(second.width()).max(3);
        let first = widen_text(&first, style, width);
        let second = widen_text(&second, style, width);

        let lead = (width - 3) / 2;
        let trail = width - 3 - lead;
        let cross = |left: char, right: char| {
            format!(
                "{}{left} {right}{}",
                repeat_glyph(line, lead),
                repeat_glyph(line, trail)
            )
        };
        let mut lines = first.lines().to_vec();
        lines.push(cross(g.roundcorner_top_right(), g.roundcorner_top_left()));
        lines.push(format!(
            "{}{}{}",
            " ".repeat(lead + 1),
            g.cross_diag(),
            " ".repeat(trail + 1)
        ));
        lines.push(cross(g.roundcorner_bot_right(), g.roundcorner_bot_left()));
        lines.extend(second.lines().iter().cloned());

        let middle = first.height() + 1;
        let first_entry = first.entry();
        let first_exit = first.exit();
        let second_entry = middle + 2 + second.entry();
        let second_exit = middle + 2 + second.exit();
        let center = TextDiagram::new(middle, middle, lines);

        frame_text(&center, |row| {
            let left = if row == first_entry {
                format!("{}{line}", g.roundcorner_top_left())
            } else if row == middle {
                format!("{} ", g.tee_left())
            } else if row + 1 == middle || row == middle + 1 {
                format!("{}{line}", g.tee_right())
            } else if row == second_entry {
                format!("{}{line}", g.roundcorner_bot_left())
            } else if row > first_entry && row < second_entry {
                format!("{bar} ")
            } else {
                "  ".to_string()
            };
            let right = if row == first_exit {
                format!("{line}{}", g.roundcorner_top_right())
            } else if row == middle {
                format!(" {}", g.tee_right())
            } else if row + 1 == middle || row == middle + 1 {
                format!("{line}{}", g.tee_left())
            } else if row == second_exit {
                format!("{line}{}", g.roundcorner_bot_right())
            } else if row > first_exit && row < second_exit {
                format!(" {bar}")
            } else {
                "  ".to_string()
            };
            (left, right)
        })
    }
}
