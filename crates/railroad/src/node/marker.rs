//! Start and end markers that cap a diagram's rail.

use std::{fmt, str::FromStr};

use serde::Deserialize;

use railroad_core::{
    geometry::Extents,
    svg::{SvgElement, format_number},
    text_diagram::{TextDiagram, TextStyle, cell_width},
};

use super::{Drawable, path};
use crate::{
    RailroadError,
    config::{AppConfig, LayoutConfig},
};

/// Marker style: a double bar for a full diagram, a single bar for a
/// fragment meant to be continued elsewhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramKind {
    #[default]
    Simple,
    Complex,
}

impl FromStr for DiagramKind {
    type Err = RailroadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(Self::Simple),
            "complex" => Ok(Self::Complex),
            _ => Err(RailroadError::InvalidDiagramKind(s.to_string())),
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Simple => "simple",
            Self::Complex => "complex",
        })
    }
}

/// The entry marker, optionally labelled.
#[derive(Debug, Clone, PartialEq)]
pub struct Start {
    kind: DiagramKind,
    label: Option<String>,
    extents: Extents,
}

impl Start {
    pub fn new(layout: &LayoutConfig, kind: DiagramKind, label: Option<String>) -> Self {
        let width = match &label {
            Some(label) => (cell_width(label) as f32 * layout.char_width() + 10.0).max(20.0),
            None => 20.0,
        };
        Self {
            kind,
            label,
            extents: Extents::new(width, 10.0, 0.0, 10.0),
        }
    }

    pub fn kind(&self) -> DiagramKind {
        self.kind
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl Drawable for Start {
    fn extents(&self) -> Extents {
        self.extents
    }

    fn needs_space(&self) -> bool {
        false
    }

    fn format(&self, config: &AppConfig, x: f32, y: f32, _width: f32) -> SvgElement {
        let bar = path(config, x, y - 10.0).down(20.0);
        let bar = match self.kind {
            DiagramKind::Complex => bar.m(0.0, -10.0),
            DiagramKind::Simple => bar.m(10.0, -20.0).down(20.0).m(-10.0, -10.0),
        };
        let mut element =
            SvgElement::new("g").with_child(bar.right(self.extents.width()).into_element());
        if let Some(label) = &self.label {
            element.push(
                SvgElement::new("text")
                    .with_attr("x", x)
                    .with_attr("y", y - 15.0)
                    .with_attr("style", "text-anchor:start")
                    .with_text(label.as_str()),
            );
        }
        element
    }

    fn text_diagram(&self, style: &TextStyle) -> TextDiagram {
        let g = style.glyphs();
        let mut start = match self.kind {
            DiagramKind::Simple => format!("{}{}{}", g.tee_right(), g.cross(), g.line()),
            DiagramKind::Complex => format!("{}{}", g.tee_right(), g.line()),
        };
        let Some(label) = &self.label else {
            return TextDiagram::from_label(&start);
        };
        let fill = cell_width(label).saturating_sub(cell_width(&start));
        start.extend(std::iter::repeat_n(g.line(), fill));
        TextDiagram::from_label(label).append_below(
            style,
            &TextDiagram::from_label(&start),
            &[],
            true,
            true,
        )
    }
}

/// The exit marker.
#[derive(Debug, Clone, PartialEq)]
pub struct End {
    kind: DiagramKind,
}

impl End {
    pub fn new(kind: DiagramKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> DiagramKind {
        self.kind
    }
}

impl Drawable for End {
    fn extents(&self) -> Extents {
        Extents::new(20.0, 10.0, 0.0, 10.0)
    }

    fn needs_space(&self) -> bool {
        false
    }

    fn format(&self, _config: &AppConfig, x: f32, y: f32, _width: f32) -> SvgElement {
        let bars = match self.kind {
            DiagramKind::Simple => "h 20 m -10 -10 v 20 m 10 -20 v 20",
            DiagramKind::Complex => "h 20 m 0 -10 v 20",
        };
        SvgElement::new("path").with_attr(
            "d",
            format!("M {} {} {bars}", format_number(x), format_number(y)),
        )
    }

    fn text_diagram(&self, style: &TextStyle) -> TextDiagram {
        let g = style.glyphs();
        let end = match self.kind {
            DiagramKind::Simple => format!("{}{}{}", g.line(), g.cross(), g.tee_left()),
            DiagramKind::Complex => format!("{}{}", g.line(), g.tee_left()),
        };
        TextDiagram::from_label(&end)
    }
}
