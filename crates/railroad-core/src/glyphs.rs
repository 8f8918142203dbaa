//! Glyph tables for the text back end.
//!
//! A [`Glyphs`] value maps every semantic glyph name to a single character.
//! Two presets exist, selected through [`GlyphSet`]; individual entries can
//! be overridden by name.
//!
//! ```
//! # use railroad_core::glyphs::{GlyphSet, Glyphs};
//! let mut glyphs = Glyphs::from(GlyphSet::Ascii);
//! assert_eq!(glyphs.line(), '-');
//! glyphs.set("line", '=').unwrap();
//! assert_eq!(glyphs.get("line"), Some('='));
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

/// Error returned when a glyph name is not part of the table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown glyph name: {0}")]
pub struct UnknownGlyph(pub String);

/// Built-in glyph presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphSet {
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Plain ASCII approximations.
    Ascii,
}

impl FromStr for GlyphSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unicode" => Ok(Self::Unicode),
            "ascii" => Ok(Self::Ascii),
            _ => Err(format!("Invalid glyph set: {s}")),
        }
    }
}

impl fmt::Display for GlyphSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unicode => "unicode",
            Self::Ascii => "ascii",
        })
    }
}

/// Declares the glyph table: one private field, getter and name per glyph.
macro_rules! glyph_table {
    ($( $(#[$doc:meta])* $name:ident => ($unicode:literal, $ascii:literal), )*) => {
        /// A complete glyph table for text rendering.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct Glyphs {
            $( $name: char, )*
        }

        impl Glyphs {
            /// Every semantic glyph name, in declaration order.
            pub const NAMES: &'static [&'static str] = &[$( stringify!($name), )*];

            /// The Unicode box-drawing preset.
            pub fn unicode() -> Self {
                Self { $( $name: $unicode, )* }
            }

            /// The ASCII preset.
            pub fn ascii() -> Self {
                Self { $( $name: $ascii, )* }
            }

            /// Looks up a glyph by its semantic name.
            pub fn get(&self, name: &str) -> Option<char> {
                match name {
                    $( stringify!($name) => Some(self.$name), )*
                    _ => None,
                }
            }

            /// Replaces a glyph by its semantic name.
            ///
            /// # Errors
            ///
            /// Returns [`UnknownGlyph`] if `name` is not in [`Glyphs::NAMES`].
            pub fn set(&mut self, name: &str, glyph: char) -> Result<(), UnknownGlyph> {
                match name {
                    $( stringify!($name) => {
                        log::trace!(name, glyph:%; "Glyph overridden");
                        self.$name = glyph;
                        Ok(())
                    } )*
                    _ => Err(UnknownGlyph(name.to_string())),
                }
            }

            $(
                $(#[$doc])*
                pub fn $name(&self) -> char {
                    self.$name
                }
            )*
        }
    };
}

glyph_table! {
    /// Horizontal rail.
    line => ('─', '-'),
    /// Vertical rail.
    line_vertical => ('│', '|'),
    /// Filler between top-level diagram items.
    separator => ('─', '-'),
    cross => ('┼', '+'),
    /// Diagonal crossing of two rails.
    cross_diag => ('╳', 'X'),
    /// Junction open to the left, up and down.
    tee_left => ('┤', '+'),
    /// Junction open to the right, up and down.
    tee_right => ('├', '+'),
    /// Junction open to the left, right and up.
    tee_up => ('┴', '+'),
    /// Junction open to the left, right and down.
    tee_down => ('┬', '+'),
    roundcorner_top_left => ('╭', '/'),
    roundcorner_top_right => ('╮', '\\'),
    roundcorner_bot_left => ('╰', '\\'),
    roundcorner_bot_right => ('╯', '/'),
    rect_top_left => ('┌', '+'),
    rect_top_right => ('┐', '+'),
    rect_bot_left => ('└', '+'),
    rect_bot_right => ('┘', '+'),
    roundrect_top_left => ('╭', '/'),
    roundrect_top_right => ('╮', '\\'),
    roundrect_bot_left => ('╰', '\\'),
    roundrect_bot_right => ('╯', '/'),
    box_horizontal => ('─', '-'),
    box_vertical => ('│', '|'),
    box_horizontal_dashed => ('┄', '~'),
    box_vertical_dashed => ('┆', ':'),
    /// Marker on the repeat box of a multiple choice.
    multi_repeat => ('↺', '*'),
}

impl Default for Glyphs {
    fn default() -> Self {
        Self::unicode()
    }
}

impl From<GlyphSet> for Glyphs {
    fn from(set: GlyphSet) -> Self {
        match set {
            GlyphSet::Unicode => Self::unicode(),
            GlyphSet::Ascii => Self::ascii(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_resolves_in_both_presets() {
        let unicode = Glyphs::unicode();
        let ascii = Glyphs::ascii();
        for name in Glyphs::NAMES {
            assert!(unicode.get(name).is_some(), "missing unicode glyph {name}");
            let ascii_glyph = ascii.get(name).expect("ascii glyph");
            assert!(ascii_glyph.is_ascii(), "{name} is not ascii");
        }
    }

    #[test]
    fn test_set_rejects_unknown_names() {
        let mut glyphs = Glyphs::default();
        assert_eq!(
            glyphs.set("wiggle", '~'),
            Err(UnknownGlyph("wiggle".to_string()))
        );
        glyphs.set("cross", 'x').expect("known glyph");
        assert_eq!(glyphs.cross(), 'x');
    }

    #[test]
    fn test_glyph_set_from_str() {
        assert_eq!("ascii".parse::<GlyphSet>(), Ok(GlyphSet::Ascii));
        assert!("ebcdic".parse::<GlyphSet>().is_err());
        assert_eq!(Glyphs::from(GlyphSet::Unicode), Glyphs::unicode());
    }
}
