//! Error types for railroad diagram construction.
//!
//! This module provides the main error type [`RailroadError`]. Construction
//! of a malformed tree (an out-of-range default, the wrong number of
//! children) fails immediately with one of these errors; nothing is
//! defaulted or truncated.

use std::fmt;

use thiserror::Error;

use railroad_core::glyphs::UnknownGlyph;

/// The main error type for railroad operations.
#[derive(Debug, Error)]
pub enum RailroadError {
    #[error("{container} default index {default} is out of range for {len} items")]
    DefaultOutOfRange {
        container: &'static str,
        default: usize,
        len: usize,
    },

    #[error("AlternatingSequence takes exactly two items, got {0}")]
    AlternatingArity(usize),

    #[error("MultipleChoice kind must be 'any' or 'all', got '{0}'")]
    InvalidChoiceKind(String),

    #[error("{0} needs at least one item")]
    EmptyContainer(&'static str),

    #[error("Invalid diagram kind '{0}', expected 'simple' or 'complex'")]
    InvalidDiagramKind(String),

    #[error(transparent)]
    Glyph(#[from] UnknownGlyph),

    #[error("Failed to write diagram output")]
    Write(#[from] fmt::Error),

    #[error("Glyph override for '{name}' must be a single character, got '{value}'")]
    InvalidGlyphOverride { name: String, value: String },
}
