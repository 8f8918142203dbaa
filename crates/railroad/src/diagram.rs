//! The diagram root: start and end markers around a sequence of items,
//! placed once and then serialized as SVG or text.

use std::fmt;

use log::debug;

use railroad_core::{
    geometry::{Extents, Insets},
    svg::{SvgChild, SvgElement, format_number},
};

use crate::{
    RailroadError,
    config::AppConfig,
    node::{DiagramKind, End, Node, Start, format_sequence, measure_sequence, sequence_text},
};

/// Stylesheet embedded by [`Diagram::write_standalone`] when none is given.
pub const DEFAULT_STYLE: &str = "\
\tsvg.railroad-diagram {
\t\tbackground-color:hsl(30,20%,95%);
\t}
\tsvg.railroad-diagram path {
\t\tstroke-width:3;
\t\tstroke:black;
\t\tfill:rgba(0,0,0,0);
\t}
\tsvg.railroad-diagram text {
\t\tfont:bold 14px monospace;
\t\ttext-anchor:middle;
\t}
\tsvg.railroad-diagram text.label{
\t\ttext-anchor:start;
\t}
\tsvg.railroad-diagram text.comment{
\t\tfont:italic 12px monospace;
\t}
\tsvg.railroad-diagram rect{
\t\tstroke-width:3;
\t\tstroke:black;
\t\tfill:hsl(120,100%,90%);
\t}
\tsvg.railroad-diagram rect.group-box {
\t\tstroke: gray;
\t\tstroke-dasharray: 10 5;
\t\tfill: none;
\t}
";

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// A complete railroad diagram.
///
/// The diagram owns a copy of the configuration its nodes were measured
/// with, so placement and text output agree with the measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    items: Vec<Node>,
    kind: DiagramKind,
    config: AppConfig,
    extents: Extents,
    rendered: Option<SvgElement>,
}

impl Diagram {
    /// Wraps `items` in start and end markers of the given kind.
    ///
    /// A [`Start`] already at the front or an [`End`] already at the back is
    /// kept instead of adding another.
    ///
    /// # Errors
    ///
    /// Returns [`RailroadError::EmptyContainer`] if `items` is empty.
    pub(crate) fn new(
        config: AppConfig,
        kind: DiagramKind,
        mut items: Vec<Node>,
    ) -> Result<Self, RailroadError> {
        if items.is_empty() {
            return Err(RailroadError::EmptyContainer("Diagram"));
        }
        if !matches!(items.first(), Some(Node::Start(_))) {
            items.insert(0, Start::new(config.layout(), kind, None).into());
        }
        if !matches!(items.last(), Some(Node::End(_))) {
            items.push(End::new(kind).into());
        }
        let extents = measure_sequence(&items);
        debug!(
            kind:% = kind,
            items = items.len(),
            width = extents.width(),
            height = extents.total_height();
            "Diagram measured"
        );
        Ok(Self {
            items,
            kind,
            config,
            extents,
            rendered: None,
        })
    }

    pub fn kind(&self) -> DiagramKind {
        self.kind
    }

    /// Every item, including the start and end markers.
    pub fn items(&self) -> &[Node] {
        &self.items
    }

    pub fn extents(&self) -> Extents {
        self.extents
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Whether [`Diagram::format`] has already placed the diagram.
    pub fn is_formatted(&self) -> bool {
        self.rendered.is_some()
    }

    /// Places every item, leaving `padding` around the drawing.
    ///
    /// Only the first call has any effect; later calls, and the writers,
    /// reuse the placed tree.
    pub fn format(&mut self, padding: Insets) -> &SvgElement {
        self.placed(padding)
    }

    fn placed(&mut self, padding: Insets) -> &mut SvgElement {
        let Self {
            items,
            config,
            extents,
            rendered,
            ..
        } = self;
        rendered.get_or_insert_with(|| render(items, config, *extents, padding))
    }

    fn placed_with_default_padding(&mut self) -> &mut SvgElement {
        let padding = Insets::uniform(self.config.style().padding());
        self.placed(padding)
    }

    /// Writes the `<svg>` element, formatting with the configured padding
    /// first if needed.
    pub fn write_svg<W: fmt::Write>(&mut self, out: &mut W) -> fmt::Result {
        self.placed_with_default_padding().write_to(out)
    }

    pub fn to_svg(&mut self) -> String {
        let mut out = String::new();
        self.write_svg(&mut out)
            .expect("Writing to String buffer is infallible");
        out
    }

    /// Writes a self-contained SVG document: the `<svg>` element with XML
    /// namespaces and an embedded stylesheet (`css`, or [`DEFAULT_STYLE`]).
    ///
    /// The stylesheet and namespaces are removed again afterwards, so the
    /// diagram can be written in either form any number of times.
    pub fn write_standalone<W: fmt::Write>(
        &mut self,
        out: &mut W,
        css: Option<&str>,
    ) -> fmt::Result {
        let root = self.placed_with_default_padding();
        root.push_child(SvgChild::Style(css.unwrap_or(DEFAULT_STYLE).to_string()));
        root.set_attr("xmlns", SVG_NAMESPACE);
        root.set_attr("xmlns:xlink", XLINK_NAMESPACE);
        let result = root.write_to(out);
        root.pop_child();
        root.remove_attr("xmlns");
        root.remove_attr("xmlns:xlink");
        result
    }

    pub fn to_standalone(&mut self, css: Option<&str>) -> String {
        let mut out = String::new();
        self.write_standalone(&mut out, css)
            .expect("Writing to String buffer is infallible");
        out
    }

    /// Writes the text rendering, one row per line.
    ///
    /// # Errors
    ///
    /// Returns [`RailroadError::Glyph`] or
    /// [`RailroadError::InvalidGlyphOverride`] if the text configuration
    /// names a bad glyph override.
    pub fn to_text(&self) -> Result<String, RailroadError> {
        let style = self.config.text_style()?;
        let separator = style.glyphs().separator().to_string();
        let diagram = sequence_text(&self.items, &style, &separator);
        let mut out = String::new();
        for line in diagram.lines() {
            if self.config.text().escape_html() {
                out.push_str(&escape_html(line));
            } else {
                out.push_str(line);
            }
            out.push('\n');
        }
        Ok(out)
    }

    /// Writes [`Diagram::to_text`] to `out`.
    ///
    /// # Errors
    ///
    /// As [`Diagram::to_text`]; a failing writer is reported as
    /// [`RailroadError::Write`].
    pub fn write_text<W: fmt::Write>(&self, out: &mut W) -> Result<(), RailroadError> {
        out.write_str(&self.to_text()?)?;
        Ok(())
    }
}

fn render(items: &[Node], config: &AppConfig, extents: Extents, padding: Insets) -> SvgElement {
    let mut group = SvgElement::new("g");
    if config.style().stroke_odd_pixel_length() {
        group.set_attr("transform", "translate(.5 .5)");
    }
    format_sequence(
        &mut group,
        config,
        items,
        (padding.left(), padding.top() + extents.up()),
    );

    let width = extents.width() + padding.horizontal_sum();
    let height = extents.total_height() + padding.vertical_sum();
    debug!(width, height; "Diagram formatted");
    SvgElement::new("svg")
        .with_attr("class", config.style().diagram_class())
        .with_attr("width", width)
        .with_attr("height", height)
        .with_attr(
            "viewBox",
            format!("0 0 {} {}", format_number(width), format_number(height)),
        )
        .with_child(group)
}

fn escape_html(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for ch in line.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
