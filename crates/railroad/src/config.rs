//! Configuration types for railroad diagram rendering.
//!
//! This module provides the configuration structures that control how
//! diagrams are measured, styled and drawn as text. All types implement
//! [`serde::Deserialize`] so they can be loaded from TOML; every field has a
//! default, so partial files are fine.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the three sections.
//! - [`LayoutConfig`] - Measurement constants (arc radius, spacing, character advance).
//! - [`StyleConfig`] - Vector output options (CSS class, pixel parity, debug annotations).
//! - [`TextConfig`] - Text output options (glyph preset, overrides, HTML escaping).
//!
//! | Key | Default |
//! |-----|---------|
//! | `layout.arc_radius` | `10` |
//! | `layout.vertical_separation` | `8` |
//! | `layout.char_width` | `8.5` |
//! | `layout.comment_char_width` | `7` |
//! | `layout.internal_alignment` | `"center"` |
//! | `style.diagram_class` | `"railroad-diagram"` |
//! | `style.stroke_odd_pixel_length` | `true` |
//! | `style.debug` | `false` |
//! | `style.padding` | `20` |
//! | `text.glyphs` | `"unicode"` |
//! | `text.escape_html` | `false` |
//!
//! # Example
//!
//! ```
//! # use railroad::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().arc_radius(), 10.0);
//! assert!(config.text_style().is_ok());
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use railroad_core::{
    geometry::Alignment,
    glyphs::{GlyphSet, Glyphs},
    text_diagram::TextStyle,
};

use crate::RailroadError;

/// Top-level configuration combining layout, style and text settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Text output configuration section.
    #[serde(default)]
    text: TextConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its three sections.
    pub fn new(layout: LayoutConfig, style: StyleConfig, text: TextConfig) -> Self {
        Self {
            layout,
            style,
            text,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the text configuration.
    pub fn text(&self) -> &TextConfig {
        &self.text
    }

    /// Resolves the glyph table and alignment policy used for text output.
    ///
    /// # Errors
    ///
    /// Returns [`RailroadError::Glyph`] for an override naming an unknown
    /// glyph and [`RailroadError::InvalidGlyphOverride`] for an override that
    /// is not exactly one character.
    pub fn text_style(&self) -> Result<TextStyle, RailroadError> {
        let glyphs = self.text.glyphs()?;
        Ok(TextStyle::new(glyphs, self.layout.internal_alignment))
    }
}

/// Measurement constants shared by every node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    arc_radius: f32,
    vertical_separation: f32,
    char_width: f32,
    comment_char_width: f32,
    internal_alignment: Alignment,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            arc_radius: 10.0,
            vertical_separation: 8.0,
            char_width: 8.5,
            comment_char_width: 7.0,
            internal_alignment: Alignment::Center,
        }
    }
}

impl LayoutConfig {
    /// Radius of every connector arc.
    pub fn arc_radius(&self) -> f32 {
        self.arc_radius
    }

    /// Minimum vertical gap between stacked items.
    pub fn vertical_separation(&self) -> f32 {
        self.vertical_separation
    }

    /// Horizontal advance of one label character.
    pub fn char_width(&self) -> f32 {
        self.char_width
    }

    /// Horizontal advance of one comment character.
    pub fn comment_char_width(&self) -> f32 {
        self.comment_char_width
    }

    /// How items narrower than their slot are positioned in it.
    pub fn internal_alignment(&self) -> Alignment {
        self.internal_alignment
    }

    pub fn with_arc_radius(mut self, arc_radius: f32) -> Self {
        self.arc_radius = arc_radius;
        self
    }

    pub fn with_vertical_separation(mut self, vertical_separation: f32) -> Self {
        self.vertical_separation = vertical_separation;
        self
    }

    pub fn with_char_width(mut self, char_width: f32) -> Self {
        self.char_width = char_width;
        self
    }

    pub fn with_comment_char_width(mut self, comment_char_width: f32) -> Self {
        self.comment_char_width = comment_char_width;
        self
    }

    pub fn with_internal_alignment(mut self, internal_alignment: Alignment) -> Self {
        self.internal_alignment = internal_alignment;
        self
    }
}

/// Visual options for vector output.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    diagram_class: String,
    stroke_odd_pixel_length: bool,
    debug: bool,
    padding: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            diagram_class: "railroad-diagram".to_string(),
            stroke_odd_pixel_length: true,
            debug: false,
            padding: 20.0,
        }
    }
}

impl StyleConfig {
    /// CSS class placed on the root `<svg>` element.
    pub fn diagram_class(&self) -> &str {
        &self.diagram_class
    }

    /// Whether the drawing is shifted by half a pixel so odd-width strokes
    /// land on whole pixels.
    pub fn stroke_odd_pixel_length(&self) -> bool {
        self.stroke_odd_pixel_length
    }

    /// Whether each node's group carries its measured extents in `data-x`.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Padding used when a diagram is formatted without an explicit one.
    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn with_diagram_class(mut self, diagram_class: impl Into<String>) -> Self {
        self.diagram_class = diagram_class.into();
        self
    }

    pub fn with_stroke_odd_pixel_length(mut self, enabled: bool) -> Self {
        self.stroke_odd_pixel_length = enabled;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }
}

/// Options for text output.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    glyphs: GlyphSet,
    escape_html: bool,
    overrides: BTreeMap<String, String>,
}

impl TextConfig {
    /// The preset glyph table before overrides.
    pub fn glyph_set(&self) -> GlyphSet {
        self.glyphs
    }

    /// Whether `& < > "` are replaced by HTML entities in text output.
    pub fn escape_html(&self) -> bool {
        self.escape_html
    }

    pub fn with_glyph_set(mut self, glyphs: GlyphSet) -> Self {
        self.glyphs = glyphs;
        self
    }

    pub fn with_escape_html(mut self, escape_html: bool) -> Self {
        self.escape_html = escape_html;
        self
    }

    /// Replaces a single glyph by name; validated when the style is resolved.
    pub fn with_override(mut self, name: impl Into<String>, glyph: impl Into<String>) -> Self {
        self.overrides.insert(name.into(), glyph.into());
        self
    }

    /// The preset table with every override applied.
    fn glyphs(&self) -> Result<Glyphs, RailroadError> {
        let mut glyphs = Glyphs::from(self.glyphs);
        for (name, value) in &self.overrides {
            let mut chars = value.chars();
            let glyph = match (chars.next(), chars.next()) {
                (Some(glyph), None) => glyph,
                _ => {
                    return Err(RailroadError::InvalidGlyphOverride {
                        name: name.clone(),
                        value: value.clone(),
                    });
                }
            };
            glyphs.set(name, glyph)?;
        }
        Ok(glyphs)
    }
}
