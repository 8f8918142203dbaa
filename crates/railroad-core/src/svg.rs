//! A minimal SVG element tree and its serializer.
//!
//! Nodes render into [`SvgElement`] trees that mirror the node tree. The
//! serializer controls two details exactly: numbers are written in a short
//! general form (six significant digits, no trailing zeros) and strings are
//! escaped for `&`, `'` and `"` (plus `<` inside text content).
//!
//! ```
//! # use railroad_core::svg::SvgElement;
//! let rect = SvgElement::new("rect")
//!     .with_attr("x", 0.5)
//!     .with_attr("class", "box");
//! let group = SvgElement::new("g").with_child(rect);
//! assert_eq!(
//!     group.to_string(),
//!     "<g>\n<rect class=\"box\" x=\"0.5\"></rect></g>"
//! );
//! ```

use std::{collections::BTreeMap, fmt};

/// Formats a number the way `%g` does, with negative zero folded to `0`.
///
/// Six significant digits, trailing zeros dropped. Exponents below -4 or
/// from 6 up switch to exponent form with a signed two-digit exponent.
///
/// # Examples
///
/// ```
/// # use railroad_core::svg::format_number;
/// assert_eq!(format_number(20.0), "20");
/// assert_eq!(format_number(8.5), "8.5");
/// assert_eq!(format_number(7.0710678), "7.07107");
/// assert_eq!(format_number(-0.0), "0");
/// assert_eq!(format_number(1_000_000.0), "1e+06");
/// assert_eq!(format_number(0.00001), "1e-05");
/// ```
pub fn format_number(value: f32) -> String {
    const PRECISION: i32 = 6;

    let value = f64::from(value);
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }
    // Rounding to the precision first decides the exponent, so 999999.5
    // becomes 1e+06 as it does in C.
    let scientific = format!("{value:.prec$e}", prec = (PRECISION - 1) as usize);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        );
    }
    let decimals = (PRECISION - 1 - exponent) as usize;
    trim_fraction(&format!("{value:.decimals$}")).to_string()
}

/// Drops trailing zeros after a decimal point, and the point itself.
fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// Escapes a string for use inside a double-quoted attribute.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escapes a string for use as element text content.
pub fn escape_text(value: &str) -> String {
    escape_attr(value).replace('<', "&lt;")
}

/// An attribute value; numbers and strings serialize differently.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Number(f32),
    Text(String),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => f.write_str(&format_number(*value)),
            Self::Text(value) => f.write_str(&escape_attr(value)),
        }
    }
}

impl From<f32> for AttrValue {
    fn from(value: f32) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A child of an [`SvgElement`].
#[derive(Debug, Clone, PartialEq)]
pub enum SvgChild {
    Element(SvgElement),
    /// Text content, escaped on output.
    Text(String),
    /// A stylesheet, written verbatim inside a CDATA section.
    Style(String),
}

/// A named SVG element with sorted attributes and ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgElement {
    name: String,
    attrs: BTreeMap<String, AttrValue>,
    children: Vec<SvgChild>,
}

impl SvgElement {
    /// Creates an element with no attributes and no children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    pub fn children(&self) -> &[SvgChild] {
        &self.children
    }

    /// Sets an attribute (builder style).
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set_attr(key, value);
        self
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.attrs.insert(key.into(), value.into());
    }

    pub fn remove_attr(&mut self, key: &str) -> Option<AttrValue> {
        self.attrs.remove(key)
    }

    /// Appends a child element (builder style).
    pub fn with_child(mut self, child: SvgElement) -> Self {
        self.push(child);
        self
    }

    /// Appends text content (builder style).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(SvgChild::Text(text.into()));
        self
    }

    pub fn push(&mut self, child: SvgElement) {
        self.children.push(SvgChild::Element(child));
    }

    pub fn push_child(&mut self, child: SvgChild) {
        self.children.push(child);
    }

    pub fn pop_child(&mut self) -> Option<SvgChild> {
        self.children.pop()
    }

    /// Direct element children, skipping text and style children.
    pub fn elements(&self) -> impl Iterator<Item = &SvgElement> {
        self.children.iter().filter_map(|child| match child {
            SvgChild::Element(element) => Some(element),
            _ => None,
        })
    }

    /// All descendant elements with the given name, in document order.
    pub fn find_all<'a>(&'a self, name: &str) -> Vec<&'a SvgElement> {
        let mut found = Vec::new();
        self.collect_named(name, &mut found);
        found
    }

    fn collect_named<'a>(&'a self, name: &str, found: &mut Vec<&'a SvgElement>) {
        for element in self.elements() {
            if element.name == name {
                found.push(element);
            }
            element.collect_named(name, found);
        }
    }

    /// Serializes this element and its subtree.
    pub fn write_to<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        write!(out, "<{}", self.name)?;
        for (key, value) in &self.attrs {
            write!(out, " {key}=\"{value}\"")?;
        }
        if self.name == "path" && self.children.is_empty() {
            return out.write_str(" />");
        }
        out.write_char('>')?;
        if self.name == "g" || self.name == "svg" {
            out.write_char('\n')?;
        }
        for child in &self.children {
            match child {
                SvgChild::Element(element) => element.write_to(out)?,
                SvgChild::Text(text) => out.write_str(&escape_text(text))?,
                SvgChild::Style(css) => {
                    write!(out, "<style>/* <![CDATA[ */\n{css}\n/* ]]> */\n</style>")?;
                }
            }
        }
        write!(out, "</{}>", self.name)
    }
}

impl fmt::Display for SvgElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}
