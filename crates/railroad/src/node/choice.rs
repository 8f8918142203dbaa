//! Alternatives branching above and below a default path.

use std::cmp::Ordering;

use railroad_core::{
    geometry::Extents,
    glyphs::Glyphs,
    path::Quarter,
    svg::SvgElement,
    text_diagram::{TextDiagram, TextStyle},
};

use super::{
    Drawable, Node, OneOrMore, Skip, frame_text, path, push_gaps, spaced_text, widen_text,
};
use crate::{
    RailroadError,
    config::{AppConfig, LayoutConfig},
};

/// Vertical spacing between neighbouring branches.
///
/// Entry `i` above the default is the distance from branch `i` to branch
/// `i + 1`; entry `i` below it is the distance from branch `i - 1` to branch
/// `i`. The default's own entry is zero. `adjacent` is the floor for the two
/// branches next to the default, the arc radius the floor elsewhere.
pub(crate) fn separators(
    layout: &LayoutConfig,
    items: &[Node],
    default: usize,
    adjacent: f32,
) -> Vec<f32> {
    let vs = layout.vertical_separation();
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let floor = if index + 1 == default || index == default + 1 {
                adjacent
            } else {
                layout.arc_radius()
            };
            let extents = item.extents();
            match index.cmp(&default) {
                Ordering::Less => {
                    let next = items[index + 1].extents();
                    floor.max(extents.height() + extents.down() + vs + next.up())
                }
                Ordering::Equal => 0.0,
                Ordering::Greater => {
                    let previous = items[index - 1].extents();
                    floor.max(extents.up() + vs + previous.down() + previous.height())
                }
            }
        })
        .collect()
}

/// Distance of each branch's entry rail from the default's, accumulated
/// outward from the default.
pub(crate) fn branch_distances(separators: &[f32], default: usize) -> Vec<f32> {
    let mut distances = vec![0.0; separators.len()];
    let mut distance = 0.0;
    for index in (0..default).rev() {
        distance += separators[index];
        distances[index] = distance;
    }
    distance = 0.0;
    for index in default + 1..separators.len() {
        distance += separators[index];
        distances[index] = distance;
    }
    distances
}

/// `(up, down)` of a branching container, measured from its cached
/// separators.
pub(crate) fn measure_branches(
    items: &[Node],
    default: usize,
    separators: &[f32],
) -> (f32, f32) {
    let default_extents = items[default].extents();
    let up = items[0].extents().up() + separators[..default].iter().sum::<f32>();
    let down = match items.last() {
        Some(last) if items.len() > default + 1 => {
            let last = last.extents();
            let below: f32 = separators[default + 1..].iter().sum();
            let reach = below + last.height() + last.down() - default_extents.height();
            reach.max(default_extents.down())
        }
        _ => default_extents.down(),
    };
    (up, down)
}

/// Checks the shared preconditions of the branching containers.
pub(crate) fn check_branches(
    container: &'static str,
    items: &[Node],
    default: usize,
) -> Result<(), RailroadError> {
    if items.is_empty() {
        return Err(RailroadError::EmptyContainer(container));
    }
    if default >= items.len() {
        return Err(RailroadError::DefaultOutOfRange {
            container,
            default,
            len: items.len(),
        });
    }
    Ok(())
}

/// Junction glyph where a vertical bus meets a horizontal rail.
///
/// The arm toward the branch is always present; `outer`, `up` and `down`
/// say which other arms are. `left_side` selects the glyphs for a
/// bus on the left of the branches.
fn junction(glyphs: &Glyphs, left_side: bool, outer: bool, up: bool, down: bool) -> char {
    match (outer, up, down) {
        (true, true, true) => glyphs.cross(),
        (true, true, false) => glyphs.tee_up(),
        (true, false, true) => glyphs.tee_down(),
        (true, false, false) | (false, false, false) => glyphs.line(),
        (false, true, true) if left_side => glyphs.tee_right(),
        (false, true, true) => glyphs.tee_left(),
        (false, true, false) if left_side => glyphs.roundcorner_bot_left(),
        (false, true, false) => glyphs.roundcorner_bot_right(),
        (false, false, true) if left_side => glyphs.roundcorner_top_left(),
        (false, false, true) => glyphs.roundcorner_top_right(),
    }
}

/// Text grid of branches joined by a vertical bus on either side.
///
/// The rail enters and leaves on the default branch.
pub(crate) fn choice_text(items: &[Node], default: usize, style: &TextStyle) -> TextDiagram {
    let g = style.glyphs();
    let texts: Vec<TextDiagram> = items.iter().map(|item| spaced_text(item, style)).collect();
    let width = texts.iter().map(TextDiagram::width).max().unwrap_or(0);
    let last = texts.len().saturating_sub(1);
    let bar = g.line_vertical();
    let separator = format!("{bar}{}{bar}", " ".repeat(width + 2));

    let mut stacked: Option<TextDiagram> = None;
    for (index, text) in texts.iter().enumerate() {
        let text = widen_text(text, style, width);
        let (outer, up, down) = (index == default, index > 0, index < last);
        let framed = frame_text(&text, |row| {
            let left = match row.cmp(&text.entry()) {
                Ordering::Equal => {
                    format!("{}{}", junction(g, true, outer, up, down), g.line())
                }
                Ordering::Less if up => format!("{bar} "),
                Ordering::Greater if down => format!("{bar} "),
                _ => "  ".to_string(),
            };
            let right = match row.cmp(&text.exit()) {
                Ordering::Equal => {
                    format!("{}{}", g.line(), junction(g, false, outer, up, down))
                }
                Ordering::Less if up => format!(" {bar}"),
                Ordering::Greater if down => format!(" {bar}"),
                _ => "  ".to_string(),
            };
            (left, right)
        });
        stacked = Some(match stacked {
            None => framed,
            Some(above) => above.append_below(
                style,
                &framed,
                &[separator.clone()],
                index == default,
                index == default,
            ),
        });
    }
    stacked.unwrap_or_else(|| TextDiagram::new(0, 0, Vec::new()))
}

/// One of several alternatives; the default is drawn on the straight path.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    default: usize,
    items: Vec<Node>,
    separators: Vec<f32>,
    extents: Extents,
}

impl Choice {
    /// # Errors
    ///
    /// Returns [`RailroadError::EmptyContainer`] for no items and
    /// [`RailroadError::DefaultOutOfRange`] if `default` names no item.
    pub fn new(
        layout: &LayoutConfig,
        default: usize,
        items: Vec<Node>,
    ) -> Result<Self, RailroadError> {
        check_branches("Choice", &items, default)?;
        Ok(Self::measure(layout, default, items))
    }

    /// A choice between skipping and taking `item`; the straight path takes
    /// the item unless `skip` is set.
    pub fn optional(layout: &LayoutConfig, item: Node, skip: bool) -> Self {
        let default = if skip { 0 } else { 1 };
        Self::measure(layout, default, vec![Skip::new().into(), item])
    }

    /// An optional loop: skip entirely, or take `item` one or more times.
    pub fn zero_or_more(
        layout: &LayoutConfig,
        item: Node,
        repeat: Option<Node>,
        skip: bool,
    ) -> Self {
        let repeated = OneOrMore::new(layout, item, repeat);
        Self::optional(layout, repeated.into(), skip)
    }

    /// Measures pre-validated branches.
    fn measure(layout: &LayoutConfig, default: usize, items: Vec<Node>) -> Self {
        let ar = layout.arc_radius();
        let separators = separators(layout, &items, default, ar * 2.0);
        let inner = items
            .iter()
            .map(|item| item.extents().width())
            .fold(0.0, f32::max);
        let (up, down) = measure_branches(&items, default, &separators);
        let height = items[default].extents().height();
        Self {
            default,
            items,
            separators,
            extents: Extents::new(ar * 4.0 + inner, up, height, down),
        }
    }

    pub fn default_index(&self) -> usize {
        self.default
    }

    pub fn items(&self) -> &[Node] {
        &self.items
    }
}

impl Drawable for Choice {
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

        let inner_width = self.extents.width() - ar * 4.0;
        let default = self.items[self.default].extents();
        let distances = branch_distances(&self.separators, self.default);

        for index in (0..self.default).rev() {
            let item = &self.items[index];
            let distance = distances[index];
            let height = item.extents().height();
            element.push(
                path(config, x, y)
                    .arc(Quarter::SouthEast)
                    .up(distance - ar * 2.0)
                    .arc(Quarter::WestNorth)
                    .into_element(),
            );
            element.push(item.format(config, x + ar * 2.0, y - distance, inner_width));
            element.push(
                path(config, x + ar * 2.0 + inner_width, y - distance + height)
                    .arc(Quarter::NorthEast)
                    .down(distance - height + default.height() - ar * 2.0)
                    .arc(Quarter::WestSouth)
                    .into_element(),
            );
        }

        element.push(path(config, x, y).right(ar * 2.0).into_element());
        element.push(self.items[self.default].format(config, x + ar * 2.0, y, inner_width));
        element.push(
            path(config, x + ar * 2.0 + inner_width, y + self.extents.height())
                .right(ar * 2.0)
                .into_element(),
        );

        for index in self.default + 1..self.items.len() {
            let item = &self.items[index];
            let distance = distances[index];
            let height = item.extents().height();
            element.push(
                path(config, x, y)
                    .arc(Quarter::NorthEast)
                    .down(distance - ar * 2.0)
                    .arc(Quarter::WestSouth)
                    .into_element(),
            );
            element.push(item.format(config, x + ar * 2.0, y + distance, inner_width));
            element.push(
                path(config, x + ar * 2.0 + inner_width, y + distance + height)
                    .arc(Quarter::SouthEast)
                    .up(distance - ar * 2.0 + height - default.height())
                    .arc(Quarter::WestNorth)
                    .into_element(),
            );
        }
        element
    }

    fn text_diagram(&self, style: &TextStyle) -> TextDiagram {
        choice_text(&self.items, self.default, style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use float_cmp::assert_approx_eq;

    use crate::node::Terminal;

    fn terminals(texts: &[&str]) -> Vec<Node> {
        let layout = LayoutConfig::default();
        texts
            .iter()
            .map(|text| Terminal::new(&layout, *text).into())
            .collect()
    }

    #[test]
    fn test_measure_three_way_choice() {
        let choice =
            Choice::new(&LayoutConfig::default(), 1, terminals(&["a", "b", "c"])).expect("valid");
        assert_approx_eq!(f32, choice.extents().width(), 40.0 + 28.5);
        // One branch above at 11 + 8 + 11 = 30, and one below.
        assert_eq!(choice.extents().up(), 41.0);
        assert_eq!(choice.extents().height(), 0.0);
        assert_eq!(choice.extents().down(), 41.0);
    }

    #[test]
    fn test_far_branches_accumulate() {
        let choice = Choice::new(
            &LayoutConfig::default(),
            0,
            terminals(&["a", "b", "c"]),
        )
        .expect("valid");
        assert_eq!(choice.separators, [0.0, 30.0, 30.0]);
        assert_eq!(branch_distances(&choice.separators, 0), [0.0, 30.0, 60.0]);
        assert_eq!(choice.extents().up(), 11.0);
        assert_eq!(choice.extents().down(), 71.0);
    }

    #[test]
    fn test_invalid_construction() {
        let layout = LayoutConfig::default();
        assert!(matches!(
            Choice::new(&layout, 3, terminals(&["a", "b"])),
            Err(RailroadError::DefaultOutOfRange {
                container: "Choice",
                default: 3,
                len: 2
            })
        ));
        assert!(matches!(
            Choice::new(&layout, 0, Vec::new()),
            Err(RailroadError::EmptyContainer("Choice"))
        ));
    }

    #[test]
    fn test_optional_defaults() {
        let layout = LayoutConfig::default();
        let item: Node = Terminal::new(&layout, "x").into();
        let taken = Choice::optional(&layout, item.clone(), false);
        assert_eq!(taken.default_index(), 1);
        assert!(matches!(taken.items()[0], Node::Skip(_)));
        // The skip branch sits above: 0 + 0 + 8 + 11 floors to 20.
        assert_eq!(taken.extents().up(), 20.0);
        assert_eq!(taken.extents().down(), 11.0);

        let skipped = Choice::optional(&layout, item, true);
        assert_eq!(skipped.default_index(), 0);
        assert_eq!(skipped.extents().up(), 0.0);
        assert_eq!(skipped.extents().down(), 31.0);
    }

    #[test]
    fn test_branch_paths() {
        let config = AppConfig::default();
        let choice =
            Choice::new(config.layout(), 1, terminals(&["a", "b", "c"])).expect("valid");
        let element = choice.format(&config, 0.0, 0.0, choice.extents().width());
        let paths: Vec<String> = element
            .elements()
            .filter(|child| child.name() == "path")
            .filter_map(|child| child.attr("d").map(|d| d.to_string()))
            .collect();
        assert_eq!(
            paths,
            [
                "M0 0a10 10 0 0 0 10 -10v-10a10 10 0 0 1 10 -10",
                "M48.5 -30a10 10 0 0 1 10 10v10a10 10 0 0 0 10 10",
                "M0 0h20",
                "M48.5 0h20",
                "M0 0a10 10 0 0 1 10 10v10a10 10 0 0 0 10 10",
                "M48.5 30a10 10 0 0 0 10 -10v-10a10 10 0 0 1 10 -10",
            ]
        );
    }

    #[test]
    fn test_text_bus_on_both_sides() {
        let choice =
            Choice::new(&LayoutConfig::default(), 1, terminals(&["a", "b", "c"])).expect("valid");
        let text = choice.text_diagram(&TextStyle::default());
        assert_eq!(
            text.lines(),
            [
                "   ╭───╮   ",
                "╭──┤ a ├──╮",
                "│  ╰───╯  │",
                "│         │",
                "│  ╭───╮  │",
                "┼──┤ b ├──┼",
                "│  ╰───╯  │",
                "│         │",
                "│  ╭───╮  │",
                "╰──┤ c ├──╯",
                "   ╰───╯   ",
            ]
        );
        assert_eq!((text.entry(), text.exit()), (5, 5));
    }
}
