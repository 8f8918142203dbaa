//! Geometric primitives shared by the vector and text back ends.
//!
//! # Overview
//!
//! - [`Alignment`] - How slack space is split when a node is placed into a
//!   wider slot than it measured.
//! - [`Extents`] - The measured footprint of a node around its rail.
//! - [`Insets`] - Padding around the root of a diagram.
//!
//! # Coordinate System
//!
//! Railroad diagrams use the SVG convention: origin at the top-left, X
//! growing rightward and Y growing downward. A node is entered on the left
//! at its rail and leaves on the right `height` units further down:
//!
//! ```text
//!            ▲ up
//!   entry ───┼──────────┐
//!            │  height  │
//!            ▼          └──── exit
//!                           ▼ down
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;

/// Policy for distributing slack width around a narrower item.
///
/// Used for vector placement ([`Alignment::gaps`]) and for text-grid
/// centering ([`Alignment::cell_gaps`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// All slack goes to the right of the item.
    Left,
    /// All slack goes to the left of the item.
    Right,
    /// Slack is split evenly on both sides.
    #[default]
    Center,
}

impl Alignment {
    /// Splits `outer - inner` into a `(left, right)` gap pair.
    ///
    /// # Examples
    ///
    /// ```
    /// # use railroad_core::geometry::Alignment;
    /// assert_eq!(Alignment::Center.gaps(30.0, 10.0), (10.0, 10.0));
    /// assert_eq!(Alignment::Left.gaps(30.0, 10.0), (0.0, 20.0));
    /// assert_eq!(Alignment::Right.gaps(30.0, 10.0), (20.0, 0.0));
    /// ```
    pub fn gaps(self, outer: f32, inner: f32) -> (f32, f32) {
        let diff = outer - inner;
        match self {
            Self::Left => (0.0, diff),
            Self::Right => (diff, 0.0),
            Self::Center => (diff / 2.0, diff / 2.0),
        }
    }

    /// Integer variant of [`Alignment::gaps`] for character cells.
    ///
    /// With centering, an odd remainder goes to the right side.
    ///
    /// # Panics
    ///
    /// Panics if `inner` is wider than `outer`; the grid engine never shrinks.
    pub fn cell_gaps(self, outer: usize, inner: usize) -> (usize, usize) {
        assert!(
            outer >= inner,
            "cannot fit {inner} cells into {outer} cells"
        );
        let diff = outer - inner;
        match self {
            Self::Left => (0, diff),
            Self::Right => (diff, 0),
            Self::Center => (diff / 2, diff - diff / 2),
        }
    }
}

impl FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "center" => Ok(Self::Center),
            _ => Err(format!("Invalid alignment: {s}")),
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
        })
    }
}

/// The measured footprint of a node.
///
/// `up` is how far the drawing rises above the entry rail, `height` is the
/// vertical distance from the entry rail to the exit rail, and `down` is how
/// far the drawing reaches below the exit rail.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Extents {
    width: f32,
    up: f32,
    height: f32,
    down: f32,
}

impl Extents {
    /// Creates extents from the four measured values.
    pub fn new(width: f32, up: f32, height: f32, down: f32) -> Self {
        Self {
            width,
            up,
            height,
            down,
        }
    }

    /// Horizontal span of the node's rail.
    pub fn width(self) -> f32 {
        self.width
    }

    /// Extent above the entry rail.
    pub fn up(self) -> f32 {
        self.up
    }

    /// Distance from the entry rail down to the exit rail.
    pub fn height(self) -> f32 {
        self.height
    }

    /// Extent below the exit rail.
    pub fn down(self) -> f32 {
        self.down
    }

    /// Full vertical span, `up + height + down`.
    pub fn total_height(self) -> f32 {
        self.up + self.height + self.down
    }

    /// Returns a copy with a different width.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }
}

/// Space left around a diagram, per side.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same value on all four sides.
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Fills unspecified sides from the others: `right` defaults to `top`,
    /// `bottom` to `top` and `left` to `right`.
    pub fn cascade(top: f32, right: Option<f32>, bottom: Option<f32>, left: Option<f32>) -> Self {
        let right = right.unwrap_or(top);
        Self::new(top, right, bottom.unwrap_or(top), left.unwrap_or(right))
    }

    pub fn top(self) -> f32 {
        self.top
    }

    pub fn right(self) -> f32 {
        self.right
    }

    pub fn bottom(self) -> f32 {
        self.bottom
    }

    pub fn left(self) -> f32 {
        self.left
    }

    /// Returns the sum of left and right insets.
    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    /// Returns the sum of top and bottom insets.
    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}
