//! Path-segment vocabulary for the vector back end.
//!
//! [`PathData`] accumulates an SVG `d` attribute from relative moves, lines
//! and circular arcs. Every connector in a railroad diagram is built from
//! straight runs joined by quarter arcs ([`Quarter`]) or, for diagonal
//! crossovers, eighth arcs ([`Compass`] + [`Rotation`]).
//!
//! ```
//! # use railroad_core::path::{PathData, Quarter};
//! let path = PathData::new(0.0, 0.0, 10.0)
//!     .right(20.0)
//!     .arc(Quarter::NorthEast)
//!     .down(5.0);
//! assert_eq!(path.d(), "M0 0h20a10 10 0 0 1 10 10v5");
//! ```

use std::f32::consts::SQRT_2;

use crate::svg::{SvgElement, format_number};

// =============================================================================
// Arc codes
// =============================================================================

/// Quarter-circle sweeps, named by the two compass points they travel between.
///
/// `NorthEast`, `EastSouth`, `SouthWest` and `WestNorth` turn clockwise; the
/// other four turn counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quarter {
    NorthEast,
    EastSouth,
    SouthWest,
    WestNorth,
    SouthEast,
    EastNorth,
    NorthWest,
    WestSouth,
}

impl Quarter {
    /// Signs of the `(dx, dy)` end-point offset, and the SVG sweep flag.
    fn offsets(self) -> (f32, f32, u8) {
        match self {
            Self::NorthEast => (1.0, 1.0, 1),
            Self::EastSouth => (-1.0, 1.0, 1),
            Self::SouthWest => (-1.0, -1.0, 1),
            Self::WestNorth => (1.0, -1.0, 1),
            Self::SouthEast => (1.0, -1.0, 0),
            Self::EastNorth => (-1.0, -1.0, 0),
            Self::NorthWest => (-1.0, 1.0, 0),
            Self::WestSouth => (1.0, 1.0, 0),
        }
    }
}

/// The eight compass points an eighth arc may start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compass {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

/// Turning direction of an eighth arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

/// End-point offset of a 45° arc of radius `radius`.
///
/// With `s2 = r/√2` and `s2inv = r - s2`, each of the sixteen start/rotation
/// combinations moves by some signed pairing of the two.
fn octant_offset(start: Compass, rotation: Rotation, radius: f32) -> (f32, f32) {
    let s2 = radius / SQRT_2;
    let s2inv = radius - s2;
    match (rotation, start) {
        (Rotation::Clockwise, Compass::North) => (s2, s2inv),
        (Rotation::Clockwise, Compass::NorthEast) => (s2inv, s2),
        (Rotation::Clockwise, Compass::East) => (-s2inv, s2),
        (Rotation::Clockwise, Compass::SouthEast) => (-s2, s2inv),
        (Rotation::Clockwise, Compass::South) => (-s2, -s2inv),
        (Rotation::Clockwise, Compass::SouthWest) => (-s2inv, -s2),
        (Rotation::Clockwise, Compass::West) => (s2inv, -s2),
        (Rotation::Clockwise, Compass::NorthWest) => (s2, -s2inv),
        (Rotation::CounterClockwise, Compass::North) => (-s2, s2inv),
        (Rotation::CounterClockwise, Compass::NorthWest) => (-s2inv, s2),
        (Rotation::CounterClockwise, Compass::West) => (s2inv, s2),
        (Rotation::CounterClockwise, Compass::SouthWest) => (s2, s2inv),
        (Rotation::CounterClockwise, Compass::South) => (s2, -s2inv),
        (Rotation::CounterClockwise, Compass::SouthEast) => (s2inv, -s2),
        (Rotation::CounterClockwise, Compass::East) => (-s2inv, -s2),
        (Rotation::CounterClockwise, Compass::NorthEast) => (-s2, -s2inv),
    }
}

// =============================================================================
// Path builder
// =============================================================================

/// Builder for an SVG path's `d` attribute, starting with an absolute move.
#[derive(Debug, Clone, PartialEq)]
pub struct PathData {
    d: String,
    radius: f32,
}

impl PathData {
    /// Starts a path at `(x, y)`; `radius` is used by every arc segment.
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            d: format!("M{} {}", format_number(x), format_number(y)),
            radius,
        }
    }

    /// The accumulated `d` attribute.
    pub fn d(&self) -> &str {
        &self.d
    }

    /// Relative move.
    pub fn m(mut self, dx: f32, dy: f32) -> Self {
        self.d
            .push_str(&format!("m{} {}", format_number(dx), format_number(dy)));
        self
    }

    /// Relative line.
    pub fn l(mut self, dx: f32, dy: f32) -> Self {
        self.d
            .push_str(&format!("l{} {}", format_number(dx), format_number(dy)));
        self
    }

    /// Relative horizontal line (may be negative).
    pub fn h(mut self, dx: f32) -> Self {
        self.d.push_str(&format!("h{}", format_number(dx)));
        self
    }

    /// Relative vertical line (may be negative).
    pub fn v(mut self, dy: f32) -> Self {
        self.d.push_str(&format!("v{}", format_number(dy)));
        self
    }

    /// Horizontal line rightward; negative lengths clamp to zero.
    pub fn right(self, length: f32) -> Self {
        self.h(length.max(0.0))
    }

    /// Horizontal line leftward; negative lengths clamp to zero.
    pub fn left(self, length: f32) -> Self {
        self.h(-length.max(0.0))
    }

    /// Vertical line downward; negative lengths clamp to zero.
    pub fn down(self, length: f32) -> Self {
        self.v(length.max(0.0))
    }

    /// Vertical line upward; negative lengths clamp to zero.
    pub fn up(self, length: f32) -> Self {
        self.v(-length.max(0.0))
    }

    /// Quarter-circle arc.
    pub fn arc(mut self, sweep: Quarter) -> Self {
        let (sx, sy, flag) = sweep.offsets();
        let r = format_number(self.radius);
        self.d.push_str(&format!(
            "a{r} {r} 0 0 {flag} {} {}",
            format_number(sx * self.radius),
            format_number(sy * self.radius)
        ));
        self
    }

    /// Eighth-circle arc starting at compass point `start`.
    pub fn arc_8(mut self, start: Compass, rotation: Rotation) -> Self {
        let (dx, dy) = octant_offset(start, rotation, self.radius);
        let flag = match rotation {
            Rotation::Clockwise => 1,
            Rotation::CounterClockwise => 0,
        };
        let r = format_number(self.radius);
        self.d.push_str(&format!(
            "a {r} {r} 0 0 {flag} {} {}",
            format_number(dx),
            format_number(dy)
        ));
        self
    }

    /// Finishes the path as a `<path>` element.
    pub fn into_element(self) -> SvgElement {
        SvgElement::new("path").with_attr("d", self.d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use float_cmp::assert_approx_eq;

    #[test]
    fn test_starts_with_absolute_move() {
        assert_eq!(PathData::new(10.5, 20.0, 10.0).d(), "M10.5 20");
    }

    #[test]
    fn test_directional_lines_clamp_negative_lengths() {
        let path = PathData::new(0.0, 0.0, 10.0)
            .right(-5.0)
            .left(3.0)
            .down(-1.0)
            .up(2.0);
        assert_eq!(path.d(), "M0 0h0h-3v0v-2");
    }

    #[test]
    fn test_quarter_arcs() {
        let path = PathData::new(0.0, 0.0, 10.0)
            .arc(Quarter::NorthEast)
            .arc(Quarter::EastSouth)
            .arc(Quarter::SouthWest)
            .arc(Quarter::WestNorth);
        assert_eq!(
            path.d(),
            "M0 0a10 10 0 0 1 10 10a10 10 0 0 1 -10 10a10 10 0 0 1 -10 -10a10 10 0 0 1 10 -10"
        );

        let path = PathData::new(0.0, 0.0, 10.0)
            .arc(Quarter::SouthEast)
            .arc(Quarter::EastNorth)
            .arc(Quarter::NorthWest)
            .arc(Quarter::WestSouth);
        assert_eq!(
            path.d(),
            "M0 0a10 10 0 0 0 10 -10a10 10 0 0 0 -10 -10a10 10 0 0 0 -10 10a10 10 0 0 0 10 10"
        );
    }

    #[test]
    fn test_octant_offsets_lie_on_the_circle() {
        let starts = [
            Compass::North,
            Compass::NorthEast,
            Compass::East,
            Compass::SouthEast,
            Compass::South,
            Compass::SouthWest,
            Compass::West,
            Compass::NorthWest,
        ];
        let chord = 10.0 * (2.0 - SQRT_2).sqrt();
        for rotation in [Rotation::Clockwise, Rotation::CounterClockwise] {
            for start in starts {
                let (dx, dy) = octant_offset(start, rotation, 10.0);
                assert_approx_eq!(f32, (dx * dx + dy * dy).sqrt(), chord, epsilon = 0.0001);
            }
        }
    }

    #[test]
    fn test_octant_arc_formatting() {
        let path = PathData::new(0.0, 0.0, 10.0).arc_8(Compass::North, Rotation::Clockwise);
        assert_eq!(path.d(), "M0 0a 10 10 0 0 1 7.07107 2.92893");
        let path = PathData::new(0.0, 0.0, 10.0).arc_8(Compass::East, Rotation::CounterClockwise);
        assert_eq!(path.d(), "M0 0a 10 10 0 0 0 -2.92893 -7.07107");
    }

    #[test]
    fn test_into_element() {
        let element = PathData::new(0.0, 0.0, 10.0).h(10.0).into_element();
        assert_eq!(element.to_string(), r#"<path d="M0 0h10" />"#);
    }
}
