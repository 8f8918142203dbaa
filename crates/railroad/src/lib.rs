//! Railroad - syntax diagrams drawn as SVG or as box-drawing text.
//!
//! A diagram is a tree of nodes (terminals, sequences, choices, loops,
//! groups) built through [`DiagramBuilder`]. Each node measures itself when
//! it is constructed; a [`Diagram`] then places the tree once and writes it
//! as an `<svg>` element, a standalone SVG document, or a character grid.
//!
//! ```rust
//! use railroad::DiagramBuilder;
//!
//! let builder = DiagramBuilder::default();
//! let expr = builder
//!     .choice(0, ["number", "(expr)"])
//!     .expect("valid default");
//! let diagram = builder.diagram([expr]).expect("non-empty diagram");
//!
//! let text = diagram.to_text().expect("default glyphs");
//! assert!(text.contains("number"));
//! ```

pub mod config;
pub mod node;

mod builder;
mod diagram;
mod error;

pub use railroad_core::{geometry, glyphs, path, svg, text_diagram};

pub use builder::DiagramBuilder;
pub use diagram::{DEFAULT_STYLE, Diagram};
pub use error::RailroadError;
pub use node::{Drawable, Item, Node};
