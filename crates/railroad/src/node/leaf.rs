//! Label-carrying leaves and the empty skip.

use railroad_core::{
    geometry::Extents,
    svg::SvgElement,
    text_diagram::{TextDiagram, TextStyle, cell_width},
};

use super::{Drawable, path, push_gaps};
use crate::config::{AppConfig, LayoutConfig};

/// Text shared by the three labelled leaves, with optional link and tooltip.
#[derive(Debug, Clone, PartialEq)]
struct Label {
    text: String,
    href: Option<String>,
    title: Option<String>,
    class: Option<String>,
}

impl Label {
    fn new(text: String) -> Self {
        Self {
            text,
            href: None,
            title: None,
            class: None,
        }
    }

    fn group_class(&self, base: &str) -> String {
        match &self.class {
            Some(class) => format!("{base} {class}"),
            None => base.to_string(),
        }
    }

    /// Appends the `<text>` (wrapped in `<a>` if linked) and `<title>`.
    fn push_text(&self, element: &mut SvgElement, text: SvgElement) {
        let text = text.with_text(self.text.as_str());
        match &self.href {
            Some(href) => element.push(
                SvgElement::new("a")
                    .with_attr("xlink:href", href.as_str())
                    .with_child(text),
            ),
            None => element.push(text),
        }
        if let Some(title) = &self.title {
            element.push(SvgElement::new("title").with_text(title.as_str()));
        }
    }
}

/// Generates the builder methods shared by the labelled leaves.
macro_rules! label_accessors {
    ($ty:ident) => {
        impl $ty {
            /// The label text.
            pub fn text(&self) -> &str {
                &self.label.text
            }

            /// Wraps the label in a hyperlink.
            pub fn with_href(mut self, href: impl Into<String>) -> Self {
                self.label.href = Some(href.into());
                self
            }

            /// Adds a tooltip.
            pub fn with_title(mut self, title: impl Into<String>) -> Self {
                self.label.title = Some(title.into());
                self
            }

            /// Adds an extra CSS class to the node's group.
            pub fn with_class(mut self, class: impl Into<String>) -> Self {
                self.label.class = Some(class.into());
                self
            }
        }
    };
}

// =============================================================================
// Terminal
// =============================================================================

/// A literal token, drawn as a rounded box.
#[derive(Debug, Clone, PartialEq)]
pub struct Terminal {
    label: Label,
    extents: Extents,
}

impl Terminal {
    pub fn new(layout: &LayoutConfig, text: impl Into<String>) -> Self {
        let label = Label::new(text.into());
        let width = cell_width(&label.text) as f32 * layout.char_width() + 20.0;
        Self {
            label,
            extents: Extents::new(width, 11.0, 0.0, 11.0),
        }
    }
}

label_accessors!(Terminal);

impl Drawable for Terminal {
    fn extents(&self) -> Extents {
        self.extents
    }

    fn needs_space(&self) -> bool {
        true
    }

    fn format(&self, config: &AppConfig, x: f32, y: f32, width: f32) -> SvgElement {
        let mut element =
            SvgElement::new("g").with_attr("class", self.label.group_class("terminal"));
        let x = push_gaps(&mut element, config, (x, y), width, self.extents);
        element.push(
            SvgElement::new("rect")
                .with_attr("x", x)
                .with_attr("y", y - 11.0)
                .with_attr("width", self.extents.width())
                .with_attr("height", self.extents.up() + self.extents.down())
                .with_attr("rx", 10.0)
                .with_attr("ry", 10.0),
        );
        let text = SvgElement::new("text")
            .with_attr("x", x + self.extents.width() / 2.0)
            .with_attr("y", y + 4.0);
        self.label.push_text(&mut element, text);
        element
    }

    fn text_diagram(&self, style: &TextStyle) -> TextDiagram {
        TextDiagram::roundrect(style, self.label.text.as_str(), false)
    }
}

// =============================================================================
// NonTerminal
// =============================================================================

/// A reference to another rule, drawn as a square box.
#[derive(Debug, Clone, PartialEq)]
pub struct NonTerminal {
    label: Label,
    extents: Extents,
}

impl NonTerminal {
    pub fn new(layout: &LayoutConfig, text: impl Into<String>) -> Self {
        let label = Label::new(text.into());
        let width = cell_width(&label.text) as f32 * layout.char_width() + 20.0;
        Self {
            label,
            extents: Extents::new(width, 11.0, 0.0, 11.0),
        }
    }
}

label_accessors!(NonTerminal);

impl Drawable for NonTerminal {
    fn extents(&self) -> Extents {
        self.extents
    }

    fn needs_space(&self) -> bool {
        true
    }

    fn format(&self, config: &AppConfig, x: f32, y: f32, width: f32) -> SvgElement {
        let mut element =
            SvgElement::new("g").with_attr("class", self.label.group_class("non-terminal"));
        let x = push_gaps(&mut element, config, (x, y), width, self.extents);
        element.push(
            SvgElement::new("rect")
                .with_attr("x", x)
                .with_attr("y", y - 11.0)
                .with_attr("width", self.extents.width())
                .with_attr("height", self.extents.up() + self.extents.down()),
        );
        let text = SvgElement::new("text")
            .with_attr("x", x + self.extents.width() / 2.0)
            .with_attr("y", y + 4.0);
        self.label.push_text(&mut element, text);
        element
    }

    fn text_diagram(&self, style: &TextStyle) -> TextDiagram {
        TextDiagram::rect(style, self.label.text.as_str(), false)
    }
}

// =============================================================================
// Comment
// =============================================================================

/// Free text on the rail, drawn without a box.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    label: Label,
    extents: Extents,
}

impl Comment {
    pub fn new(layout: &LayoutConfig, text: impl Into<String>) -> Self {
        let label = Label::new(text.into());
        let width = cell_width(&label.text) as f32 * layout.comment_char_width() + 10.0;
        Self {
            label,
            extents: Extents::new(width, 8.0, 0.0, 8.0),
        }
    }
}

label_accessors!(Comment);

impl Drawable for Comment {
    fn extents(&self) -> Extents {
        self.extents
    }

    fn needs_space(&self) -> bool {
        true
    }

    fn format(&self, config: &AppConfig, x: f32, y: f32, width: f32) -> SvgElement {
        let mut element =
            SvgElement::new("g").with_attr("class", self.label.group_class("non-terminal"));
        let x = push_gaps(&mut element, config, (x, y), width, self.extents);
        let text = SvgElement::new("text")
            .with_attr("x", x + self.extents.width() / 2.0)
            .with_attr("y", y + 5.0)
            .with_attr("class", "comment");
        self.label.push_text(&mut element, text);
        element
    }

    fn text_diagram(&self, _style: &TextStyle) -> TextDiagram {
        TextDiagram::from_label(&self.label.text)
    }
}

// =============================================================================
// Skip
// =============================================================================

/// An empty path segment; stretches to whatever width it is given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Skip;

impl Skip {
    pub fn new() -> Self {
        Self
    }
}

impl Drawable for Skip {
    fn extents(&self) -> Extents {
        Extents::default()
    }

    fn needs_space(&self) -> bool {
        false
    }

    fn format(&self, config: &AppConfig, x: f32, y: f32, width: f32) -> SvgElement {
        SvgElement::new("g").with_child(path(config, x, y).right(width).into_element())
    }

    fn text_diagram(&self, style: &TextStyle) -> TextDiagram {
        TextDiagram::from_label(&style.glyphs().line().to_string())
    }
}
