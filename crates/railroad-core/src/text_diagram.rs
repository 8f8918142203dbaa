//! Character-grid compositing for the text back end.
//!
//! A [`TextDiagram`] is an immutable rectangle of equal-width rows plus two
//! row markers: `entry`, where the rail meets the left edge, and `exit`,
//! where it leaves on the right. Diagrams are combined with
//! [`TextDiagram::append_right`] (rail-aligned horizontal join) and
//! [`TextDiagram::append_below`] (vertical stacking), padded with
//! [`TextDiagram::expand`], and boxed with [`TextDiagram::rect`] and
//! [`TextDiagram::roundrect`].
//!
//! Widths are counted in `char`s, so every glyph is assumed to occupy one
//! cell.
//!
//! ```
//! # use railroad_core::text_diagram::{TextDiagram, TextStyle};
//! let style = TextStyle::default();
//! let a = TextDiagram::roundrect(&style, "a", false);
//! let b = TextDiagram::rect(&style, "b", false);
//! let joined = a.append_right(&b, "─");
//! assert_eq!(
//!     joined.lines(),
//!     ["╭───╮ ┌───┐", "┤ a ├─┤ b ├", "╰───╯ └───┘"]
//! );
//! assert_eq!((joined.entry(), joined.exit()), (1, 1));
//! ```

use std::iter;

use crate::{geometry::Alignment, glyphs::Glyphs};

/// Rendering context for text output: the glyph table and the slack policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextStyle {
    glyphs: Glyphs,
    alignment: Alignment,
}

impl TextStyle {
    pub fn new(glyphs: Glyphs, alignment: Alignment) -> Self {
        Self { glyphs, alignment }
    }

    pub fn glyphs(&self) -> &Glyphs {
        &self.glyphs
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }
}

/// What a box drawn by [`TextDiagram::rect`] or [`TextDiagram::roundrect`] wraps.
#[derive(Debug, Clone, Copy)]
pub enum BoxContent<'a> {
    /// A single-line label; the rail attaches to the box sides.
    Label(&'a str),
    /// A nested diagram; the rail runs through the box border.
    Diagram(&'a TextDiagram),
}

impl<'a> From<&'a str> for BoxContent<'a> {
    fn from(label: &'a str) -> Self {
        Self::Label(label)
    }
}

impl<'a> From<&'a TextDiagram> for BoxContent<'a> {
    fn from(diagram: &'a TextDiagram) -> Self {
        Self::Diagram(diagram)
    }
}

/// Number of cells a string occupies.
pub fn cell_width(s: &str) -> usize {
    s.chars().count()
}

fn repeat_char(ch: char, count: usize) -> String {
    iter::repeat_n(ch, count).collect()
}

/// An immutable rectangular block of text with entry and exit rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDiagram {
    entry: usize,
    exit: usize,
    lines: Vec<String>,
    width: usize,
}

impl TextDiagram {
    /// Creates a diagram from its rows.
    ///
    /// # Panics
    ///
    /// Panics if the rows differ in width or if `entry`/`exit` lie beyond
    /// the number of rows.
    pub fn new(entry: usize, exit: usize, lines: Vec<String>) -> Self {
        let width = lines.first().map_or(0, |line| cell_width(line));
        for (index, line) in lines.iter().enumerate() {
            assert_eq!(
                cell_width(line),
                width,
                "row {index} of a text diagram is {} cells wide, expected {width}: {line:?}",
                cell_width(line)
            );
        }
        assert!(
            entry <= lines.len(),
            "entry row {entry} is outside a diagram of {} rows",
            lines.len()
        );
        assert!(
            exit <= lines.len(),
            "exit row {exit} is outside a diagram of {} rows",
            lines.len()
        );
        Self {
            entry,
            exit,
            lines,
            width,
        }
    }

    /// A single-row diagram holding `text`, entered and left on that row.
    pub fn from_label(text: &str) -> Self {
        Self::new(0, 0, vec![text.to_string()])
    }

    pub fn entry(&self) -> usize {
        self.entry
    }

    pub fn exit(&self) -> usize {
        self.exit
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Same rows with different entry and exit markers.
    pub fn with_entry_exit(&self, entry: usize, exit: usize) -> Self {
        Self::new(entry, exit, self.lines.clone())
    }

    /// Pads the diagram on every side.
    ///
    /// Side padding on the entry row (left) and the exit row (right) is drawn
    /// with the rail glyph so the connection stays continuous; everything
    /// else is blank.
    pub fn expand(
        &self,
        style: &TextStyle,
        left: usize,
        right: usize,
        top: usize,
        bottom: usize,
    ) -> Self {
        let line = style.glyphs().line();
        let blank = " ".repeat(self.width + left + right);
        let mut lines = Vec::with_capacity(top + self.height() + bottom);
        lines.extend(iter::repeat_n(blank.clone(), top));
        for (index, row) in self.lines.iter().enumerate() {
            let left_pad = if index == self.entry { line } else { ' ' };
            let right_pad = if index == self.exit { line } else { ' ' };
            lines.push(format!(
                "{}{row}{}",
                repeat_char(left_pad, left),
                repeat_char(right_pad, right)
            ));
        }
        lines.extend(iter::repeat_n(blank, bottom));
        Self::new(self.entry + top, self.exit + top, lines)
    }

    /// Adds blank rows above and below.
    fn pad_vertical(&self, top: usize, bottom: usize) -> Self {
        let blank = " ".repeat(self.width);
        let lines = iter::repeat_n(blank.clone(), top)
            .chain(self.lines.iter().cloned())
            .chain(iter::repeat_n(blank, bottom))
            .collect();
        Self::new(self.entry + top, self.exit + top, lines)
    }

    /// Joins `other` to the right so that this diagram's exit row meets its
    /// entry row.
    ///
    /// The shorter side is padded with blank rows. `between` is placed on the
    /// join row; the same number of blank cells separates all other rows.
    pub fn append_right(&self, other: &TextDiagram, between: &str) -> Self {
        let join = self.exit.max(other.entry);
        let below = (self.height() - self.exit).max(other.height() - other.entry);
        let height = join + below;

        let left_top = join - self.exit;
        let left = self.pad_vertical(left_top, height - self.height() - left_top);
        let right_top = join - other.entry;
        let right = other.pad_vertical(right_top, height - other.height() - right_top);

        let gap = " ".repeat(cell_width(between));
        let lines = left
            .lines
            .iter()
            .zip(&right.lines)
            .enumerate()
            .map(|(index, (l, r))| {
                let seam = if index == join { between } else { gap.as_str() };
                format!("{l}{seam}{r}")
            })
            .collect();
        Self::new(left.entry, right.exit, lines)
    }

    /// Stacks `other` below this diagram with `lines_between` in the middle.
    ///
    /// Both blocks are placed per the style's alignment within the wider of
    /// the two; separator lines are padded on the right. Entry and exit stay
    /// with this diagram unless `move_entry`/`move_exit` hand them to `other`.
    pub fn append_below(
        &self,
        style: &TextStyle,
        other: &TextDiagram,
        lines_between: &[String],
        move_entry: bool,
        move_exit: bool,
    ) -> Self {
        let width = lines_between
            .iter()
            .map(|line| cell_width(line))
            .chain([self.width, other.width])
            .max()
            .unwrap_or(0);

        let mut lines = self.center(style, width).lines;
        lines.extend(lines_between.iter().map(|line| {
            let fill = width - cell_width(line);
            format!("{line}{}", " ".repeat(fill))
        }));
        let offset = lines.len();
        lines.extend(other.center(style, width).lines);

        let entry = if move_entry {
            offset + other.entry
        } else {
            self.entry
        };
        let exit = if move_exit {
            offset + other.exit
        } else {
            self.exit
        };
        Self::new(entry, exit, lines)
    }

    /// Widens the diagram to `width` cells with blank padding per the style's
    /// alignment.
    ///
    /// # Panics
    ///
    /// Panics if `width` is narrower than the diagram.
    pub fn center(&self, style: &TextStyle, width: usize) -> Self {
        let (left, right) = style.alignment().cell_gaps(width, self.width);
        let lines = self
            .lines
            .iter()
            .map(|row| format!("{}{row}{}", " ".repeat(left), " ".repeat(right)))
            .collect();
        Self::new(self.entry, self.exit, lines)
    }

    /// Wraps content in a square-cornered box.
    pub fn rect<'a>(style: &TextStyle, content: impl Into<BoxContent<'a>>, dashed: bool) -> Self {
        let g = style.glyphs();
        let corners = (
            g.rect_top_left(),
            g.rect_top_right(),
            g.rect_bot_left(),
            g.rect_bot_right(),
        );
        Self::enclose(style, content.into(), corners, dashed)
    }

    /// Wraps content in a round-cornered box.
    pub fn roundrect<'a>(
        style: &TextStyle,
        content: impl Into<BoxContent<'a>>,
        dashed: bool,
    ) -> Self {
        let g = style.glyphs();
        let corners = (
            g.roundrect_top_left(),
            g.roundrect_top_right(),
            g.roundrect_bot_left(),
            g.roundrect_bot_right(),
        );
        Self::enclose(style, content.into(), corners, dashed)
    }

    fn enclose(
        style: &TextStyle,
        content: BoxContent<'_>,
        (top_left, top_right, bot_left, bot_right): (char, char, char, char),
        dashed: bool,
    ) -> Self {
        let g = style.glyphs();
        let (horizontal, vertical) = if dashed {
            (g.box_horizontal_dashed(), g.box_vertical_dashed())
        } else {
            (g.box_horizontal(), g.box_vertical())
        };
        let label;
        let (inner, through) = match content {
            BoxContent::Label(text) => {
                label = Self::from_label(text);
                (&label, false)
            }
            BoxContent::Diagram(diagram) => (diagram, true),
        };
        let (entry_border, exit_border, rail) = if through {
            (g.cross(), g.cross(), g.line())
        } else {
            (g.tee_left(), g.tee_right(), ' ')
        };

        let bar = repeat_char(horizontal, inner.width + 2);
        let mut lines = Vec::with_capacity(inner.height() + 2);
        lines.push(format!("{top_left}{bar}{top_right}"));
        for (index, row) in inner.lines.iter().enumerate() {
            let (left_border, left_pad) = if index == inner.entry {
                (entry_border, rail)
            } else {
                (vertical, ' ')
            };
            let (right_border, right_pad) = if index == inner.exit {
                (exit_border, rail)
            } else {
                (vertical, ' ')
            };
            lines.push(format!(
                "{left_border}{left_pad}{row}{right_pad}{right_border}"
            ));
        }
        lines.push(format!("{bot_left}{bar}{bot_right}"));
        Self::new(inner.entry + 1, inner.exit + 1, lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    use crate::glyphs::GlyphSet;

    fn diagram(entry: usize, exit: usize, lines: &[&str]) -> TextDiagram {
        TextDiagram::new(entry, exit, lines.iter().map(|l| l.to_string()).collect())
    }

    #[test]
    fn test_roundrect_label() {
        let style = TextStyle::default();
        let boxed = TextDiagram::roundrect(&style, "x", false);
        assert_eq!(boxed.lines(), ["╭───╮", "┤ x ├", "╰───╯"]);
        assert_eq!(boxed.width(), 5);
        assert!(boxed.lines()[0].starts_with("╭─"));
        assert_eq!((boxed.entry(), boxed.exit()), (1, 1));
    }

    #[test]
    fn test_rect_dashed_ascii() {
        let style = TextStyle::new(Glyphs::from(GlyphSet::Ascii), Alignment::Center);
        let boxed = TextDiagram::rect(&style, "ab", true);
        assert_eq!(boxed.lines(), ["+~~~~+", "+ ab +", "+~~~~+"]);
    }

    #[test]
    fn test_box_around_diagram_carries_rail_through() {
        let style = TextStyle::default();
        let inner = diagram(1, 2, &["a  ", "bcd", "e  "]);
        let boxed = TextDiagram::roundrect(&style, &inner, true);
        assert_eq!(
            boxed.lines(),
            [
                "╭┄┄┄┄┄╮",
                "┆ a   ┆",
                "┼─bcd ┆",
                "┆ e  ─┼",
                "╰┄┄┄┄┄╯",
            ]
        );
        assert_eq!((boxed.entry(), boxed.exit()), (2, 3));
    }

    #[test]
    fn test_expand_draws_rail_on_entry_and_exit_rows() {
        let style = TextStyle::default();
        let expanded = diagram(0, 1, &["ab", "cd"]).expand(&style, 2, 1, 1, 1);
        assert_eq!(
            expanded.lines(),
            ["     ", "──ab ", "  cd─", "     "]
        );
        assert_eq!((expanded.entry(), expanded.exit()), (1, 2));
    }

    #[test]
    fn test_append_right_pads_shorter_side() {
        let left = diagram(0, 2, &["a", "b", "c"]);
        let right = diagram(0, 0, &["x"]);
        let joined = left.append_right(&right, "-");
        assert_eq!(joined.lines(), ["a  ", "b  ", "c-x"]);
        assert_eq!((joined.entry(), joined.exit()), (0, 2));

        let joined = right.append_right(&left.with_entry_exit(2, 0), "");
        assert_eq!(joined.lines(), [" a", " b", "xc"]);
        assert_eq!((joined.entry(), joined.exit()), (2, 0));
    }

    #[test]
    fn test_append_right_from_empty() {
        let empty = TextDiagram::new(0, 0, Vec::new());
        let item = diagram(1, 1, &["ab", "cd", "ef"]);
        let joined = empty.append_right(&item, "");
        assert_eq!(joined, item);
    }

    #[test]
    fn test_append_below_moves_markers() {
        let style = TextStyle::default();
        let top = diagram(0, 0, &["abcd"]);
        let bottom = diagram(0, 0, &["x"]);
        let stacked = top.append_below(&style, &bottom, &["|".to_string()], false, true);
        assert_eq!(stacked.lines(), ["abcd", "|   ", " x  "]);
        assert_eq!((stacked.entry(), stacked.exit()), (0, 2));
    }

    #[test]
    fn test_center_respects_alignment() {
        let item = diagram(0, 0, &["x"]);
        let left = TextStyle::new(Glyphs::default(), Alignment::Left);
        let right = TextStyle::new(Glyphs::default(), Alignment::Right);
        assert_eq!(item.center(&left, 3).lines(), ["x  "]);
        assert_eq!(item.center(&right, 3).lines(), ["  x"]);
    }

    #[test]
    #[should_panic(expected = "cells wide")]
    fn test_new_rejects_ragged_rows() {
        diagram(0, 0, &["ab", "c"]);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_new_rejects_entry_out_of_range() {
        diagram(3, 0, &["ab", "cd"]);
    }

    #[test]
    #[should_panic(expected = "cannot fit")]
    fn test_center_rejects_shrinking() {
        diagram(0, 0, &["abc"]).center(&TextStyle::default(), 2);
    }

    // =========================================================================
    // Property tests
    // =========================================================================

    fn arb_diagram() -> impl Strategy<Value = TextDiagram> {
        (1usize..5, 0usize..5)
            .prop_flat_map(|(height, width)| {
                let cell = prop::sample::select(vec!['a', '─', '│', ' ', '╭']);
                let row = prop::collection::vec(cell, width);
                (
                    0..height,
                    0..height,
                    prop::collection::vec(row, height),
                )
            })
            .prop_map(|(entry, exit, rows)| {
                let lines = rows
                    .into_iter()
                    .map(|row| row.into_iter().collect::<String>())
                    .collect();
                TextDiagram::new(entry, exit, lines)
            })
    }

    fn is_rectangular(diagram: &TextDiagram) -> bool {
        diagram
            .lines()
            .iter()
            .all(|line| cell_width(line) == diagram.width())
            && diagram.entry() <= diagram.height()
            && diagram.exit() <= diagram.height()
    }

    proptest! {
        #[test]
        fn prop_append_right_keeps_rows_rectangular(a in arb_diagram(), b in arb_diagram()) {
            let joined = a.append_right(&b, "──");
            prop_assert!(is_rectangular(&joined));
            prop_assert_eq!(joined.width(), a.width() + 2 + b.width());
            let above = a.exit().max(b.entry());
            let below = (a.height() - a.exit()).max(b.height() - b.entry());
            prop_assert_eq!(joined.height(), above + below);
        }

        #[test]
        fn prop_append_right_seam_sits_on_join_row(a in arb_diagram(), b in arb_diagram()) {
            let joined = a.append_right(&b, "=");
            let seam: Vec<usize> = joined
                .lines()
                .iter()
                .enumerate()
                .filter(|(_, line)| line.chars().nth(a.width()) == Some('='))
                .map(|(index, _)| index)
                .collect();
            prop_assert_eq!(seam, vec![a.exit().max(b.entry())]);
        }

        #[test]
        fn prop_append_right_grouping_is_irrelevant(
            a in arb_diagram(),
            b in arb_diagram(),
            c in arb_diagram(),
        ) {
            let left_first = a.append_right(&b, "─").append_right(&c, "─");
            let right_first = a.append_right(&b.append_right(&c, "─"), "─");
            prop_assert_eq!(left_first, right_first);
        }

        #[test]
        fn prop_append_below_keeps_rows_rectangular(
            a in arb_diagram(),
            b in arb_diagram(),
            move_entry in any::<bool>(),
            move_exit in any::<bool>(),
        ) {
            let style = TextStyle::default();
            let stacked = a.append_below(&style, &b, &["│".to_string()], move_entry, move_exit);
            prop_assert!(is_rectangular(&stacked));
            prop_assert_eq!(stacked.height(), a.height() + 1 + b.height());
            let expected_entry = if move_entry { a.height() + 1 + b.entry() } else { a.entry() };
            prop_assert_eq!(stacked.entry(), expected_entry);
            let expected_exit = if move_exit { a.height() + 1 + b.exit() } else { a.exit() };
            prop_assert_eq!(stacked.exit(), expected_exit);
        }

        #[test]
        fn prop_expand_grows_every_side(
            a in arb_diagram(),
            left in 0usize..3,
            right in 0usize..3,
            top in 0usize..3,
            bottom in 0usize..3,
        ) {
            let expanded = a.expand(&TextStyle::default(), left, right, top, bottom);
            prop_assert!(is_rectangular(&expanded));
            prop_assert_eq!(expanded.width(), a.width() + left + right);
            prop_assert_eq!(expanded.height(), a.height() + top + bottom);
            prop_assert_eq!(expanded.entry(), a.entry() + top);
        }
    }
}
