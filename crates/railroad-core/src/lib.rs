//! Railroad Core Primitives
//!
//! This crate provides the node-independent building blocks for rendering
//! railroad (syntax) diagrams. It includes:
//!
//! - **Geometry**: Alignment policy and measured extents ([`geometry`] module)
//! - **Paths**: Line and arc vocabulary for connectors ([`path::PathData`])
//! - **SVG**: A small element tree with exact number formatting and escaping ([`svg`] module)
//! - **Glyphs**: Unicode and ASCII glyph tables ([`glyphs::Glyphs`])
//! - **Text grids**: The compositing engine of the text back end ([`text_diagram::TextDiagram`])

pub mod geometry;
pub mod glyphs;
pub mod path;
pub mod svg;
pub mod text_diagram;
