//! Branches that may each be taken, in any order.

use std::{fmt, str::FromStr};

use serde::Deserialize;

use railroad_core::{
    geometry::Extents,
    path::Quarter,
    svg::{SvgElement, format_number},
    text_diagram::{TextDiagram, TextStyle},
};

use super::{
    Drawable, Node,
    choice::{branch_distances, check_branches, choice_text, measure_branches, separators},
    path, push_gaps,
};
use crate::{
    RailroadError,
    config::{AppConfig, LayoutConfig},
};

/// Whether at least one branch or every branch must be taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultipleChoiceKind {
    Any,
    All,
}

impl MultipleChoiceKind {
    fn badge(self) -> &'static str {
        match self {
            Self::Any => "1+",
            Self::All => "all",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Any => "take one or more branches, once each, in any order",
            Self::All => "take all branches, once each, in any order",
        }
    }
}

impl FromStr for MultipleChoiceKind {
    type Err = RailroadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(Self::Any),
            "all" => Ok(Self::All),
            _ => Err(RailroadError::InvalidChoiceKind(s.to_string())),
        }
    }
}

impl fmt::Display for MultipleChoiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Any => "any",
            Self::All => "all",
        })
    }
}

/// A choice whose branches are badged with how many must be taken, and
/// marked as repeatable on the way out.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipleChoice {
    default: usize,
    kind: MultipleChoiceKind,
    items: Vec<Node>,
    separators: Vec<f32>,
    inner_width: f32,
    extents: Extents,
}

impl MultipleChoice {
    /// # Errors
    ///
    /// Returns [`RailroadError::EmptyContainer`] for no items and
    /// [`RailroadError::DefaultOutOfRange`] if `default` names no item.
    pub fn new(
        layout: &LayoutConfig,
        default: usize,
        kind: MultipleChoiceKind,
        items: Vec<Node>,
    ) -> Result<Self, RailroadError> {
        check_branches("MultipleChoice", &items, default)?;
        let ar = layout.arc_radius();
        let separators = separators(layout, &items, default, 10.0 + ar);
        let inner_width = items
            .iter()
            .map(|item| item.extents().width())
            .fold(0.0, f32::max);
        let (up, down) = measure_branches(&items, default, &separators);
        let height = items[default].extents().height();
        Ok(Self {
            default,
            kind,
            items,
            separators,
            inner_width,
            extents: Extents::new(30.0 + ar + inner_width + ar + 20.0, up, height, down),
        })
    }

    pub fn default_index(&self) -> usize {
        self.default
    }

    pub fn kind(&self) -> MultipleChoiceKind {
        self.kind
    }

    pub fn items(&self) -> &[Node] {
        &self.items
    }

    /// The badge on the way in and the repeat arrow on the way out.
    fn badges(&self, x: f32, y: f32) -> SvgElement {
        let left = x + 30.0;
        let right = x + self.extents.width() - 20.0;
        let top = format_number(y - 10.0);
        SvgElement::new("g")
            .with_attr("class", "diagram-text")
            .with_child(SvgElement::new("title").with_text(self.kind.title()))
            .with_child(
                SvgElement::new("path")
                    .with_attr(
                        "d",
                        format!(
                            "M {} {top} h -26 a 4 4 0 0 0 -4 4 v 12 a 4 4 0 0 0 4 4 h 26 z",
                            format_number(left)
                        ),
                    )
                    .with_attr("class", "diagram-text"),
            )
            .with_child(
                SvgElement::new("text")
                    .with_attr("x", x + 15.0)
                    .with_attr("y", y + 4.0)
                    .with_attr("class", "diagram-text")
                    .with_text(self.kind.badge()),
            )
            .with_child(
                SvgElement::new("path")
                    .with_attr(
                        "d",
                        format!(
                            "M {} {top} h 16 a 4 4 0 0 1 4 4 v 12 a 4 4 0 0 1 -4 4 h -16 z",
                            format_number(right)
                        ),
                    )
                    .with_attr("class", "diagram-text"),
            )
            .with_child(
                SvgElement::new("text")
                    .with_attr("x", x + self.extents.width() - 10.0)
                    .with_attr("y", y + 4.0)
                    .with_attr("class", "diagram-arrow")
                    .with_text("↺"),
            )
    }
}

impl Drawable for MultipleChoice {
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

        let inner = self.inner_width;
        let branch_x = x + 30.0;
        let default = self.items[self.default].extents();
        let distances = branch_distances(&self.separators, self.default);

        for index in (0..self.default).rev() {
            let item = &self.items[index];
            let distance = distances[index];
            let height = item.extents().height();
            element.push(
                path(config, branch_x, y)
                    .up(distance - ar)
                    .arc(Quarter::WestNorth)
                    .into_element(),
            );
            element.push(item.format(config, branch_x + ar, y - distance, inner));
            element.push(
                path(config, branch_x + ar + inner, y - distance + height)
                    .arc(Quarter::NorthEast)
                    .down(distance - height + default.height() - ar - 10.0)
                    .into_element(),
            );
        }

        element.push(path(config, branch_x, y).right(ar).into_element());
        element.push(self.items[self.default].format(config, branch_x + ar, y, inner));
        element.push(
            path(config, branch_x + ar + inner, y + self.extents.height())
                .right(ar)
                .into_element(),
        );

        for index in self.default + 1..self.items.len() {
            let item = &self.items[index];
            let distance = distances[index];
            let height = item.extents().height();
            element.push(
                path(config, branch_x, y)
                    .down(distance - ar)
                    .arc(Quarter::WestSouth)
                    .into_element(),
            );
            element.push(item.format(config, branch_x + ar, y + distance, inner));
            element.push(
                path(config, branch_x + ar + inner, y + distance + height)
                    .arc(Quarter::SouthEast)
                    .up(distance - ar + height - default.height() - 10.0)
                    .into_element(),
            );
        }

        element.push(self.badges(x, y));
        element
    }

    fn text_diagram(&self, style: &TextStyle) -> TextDiagram {
        let badge = TextDiagram::rect(style, self.kind.badge(), false);
        let repeat = style.glyphs().multi_repeat().to_string();
        let arrow = TextDiagram::rect(style, repeat.as_str(), false);
        badge
            .append_right(&choice_text(&self.items, self.default, style), "")
            .append_right(&arrow, "")
    }
}
