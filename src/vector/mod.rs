//! In-memory model of a parsed vector icon.
//!
//! A [`VectorDocument`] is produced by [`VectorDocument::parse`] and never
//! mutated afterwards. It holds a canvas ([`ViewBox`]) and an ordered list of
//! [`PathElement`]s. Element order is paint order: later elements are drawn
//! over earlier ones, and nothing in the crate reorders them.
//!
//! All geometry is reduced to four segment kinds (move, line, cubic, close).
//! Shapes, arcs, quadratics and transforms are lowered while parsing.

mod markup;
mod path_data;

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ParseError, Result};

use markup::parse_color;

// ============================================================================
// Geometry
// ============================================================================

/// A point in canvas (source) units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One drawing command of a path outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// Starts a new subpath at the point.
    MoveTo(Point),
    /// Straight line from the current point.
    LineTo(Point),
    /// Cubic Bézier: first control, second control, end point.
    CubicTo(Point, Point, Point),
    /// Closes the current subpath back to its starting point.
    Close,
}

impl Segment {
    /// Applies `f` to every coordinate of the segment.
    pub(crate) fn map_points(self, f: impl Fn(Point) -> Point) -> Self {
        match self {
            Self::MoveTo(p) => Self::MoveTo(f(p)),
            Self::LineTo(p) => Self::LineTo(f(p)),
            Self::CubicTo(c1, c2, p) => Self::CubicTo(f(c1), f(c2), f(p)),
            Self::Close => Self::Close,
        }
    }
}

/// Rule deciding which regions of a self-intersecting outline are inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

// ============================================================================
// Paint
// ============================================================================

/// A straight (non-premultiplied) RGBA color.
///
/// Serializes as a hex string; deserializes from any CSS color form the
/// markup reader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the color with its alpha multiplied by `factor` (clamped to 0-1).
    pub fn with_opacity(self, factor: f32) -> Self {
        let a = (self.a as f32 * factor.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// Formats the color as `#rrggbb`, or `#rrggbbaa` when not opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for Color {
    type Err = ParseError;

    /// Parses any color form accepted in `fill`/`stroke` attributes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s).ok_or_else(|| ParseError::InvalidAttribute {
            attribute: "color".into(),
            value: s.into(),
        })
    }
}

impl TryFrom<String> for Color {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Fill and stroke attributes of a single element.
///
/// `None` means the element is not filled (or not stroked).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f32,
}

impl Default for Paint {
    /// Filled black, no stroke.
    fn default() -> Self {
        Self {
            fill: Some(Color::BLACK),
            stroke: None,
            stroke_width: 1.0,
        }
    }
}

// ============================================================================
// Document
// ============================================================================

/// One drawable outline with its paint.
#[derive(Debug, Clone, PartialEq)]
pub struct PathElement {
    segments: Vec<Segment>,
    fill_rule: FillRule,
    paint: Paint,
}

impl PathElement {
    pub fn new(segments: Vec<Segment>, fill_rule: FillRule, paint: Paint) -> Self {
        Self {
            segments,
            fill_rule,
            paint,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    pub fn paint(&self) -> &Paint {
        &self.paint
    }
}

/// The canvas coordinate space of a document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f32,
    pub min_y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewBox {
    /// Creates a view box anchored at the origin.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            width,
            height,
        }
    }
}

/// A parsed vector graphic: a canvas plus paint-ordered path elements.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorDocument {
    view_box: ViewBox,
    elements: Vec<PathElement>,
}

impl VectorDocument {
    /// Parses SVG markup into a document.
    ///
    /// Fails with [`Error::MalformedSource`] when the bytes are not
    /// well-formed markup, the root has no usable canvas size, or any path
    /// geometry violates the path-data grammar. No partial document is
    /// ever returned.
    ///
    /// ```
    /// use checkout_button::VectorDocument;
    ///
    /// let doc = VectorDocument::parse(
    ///     br#"<svg viewBox="0 0 24 24"><path d="M2 2 H22 V22 H2 Z"/></svg>"#,
    /// ).unwrap();
    /// assert_eq!(doc.elements().len(), 1);
    ///
    /// assert!(VectorDocument::parse(br#"<svg><path d="Z Q 1"/></svg>"#).is_err());
    /// ```
    pub fn parse(source: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(source).map_err(|_| ParseError::Encoding)?;
        Ok(markup::parse_document(text)?)
    }

    /// Reads and parses an SVG file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&bytes)
    }

    /// Builds a document directly from already-lowered elements.
    pub fn from_elements(view_box: ViewBox, elements: Vec<PathElement>) -> Self {
        Self { view_box, elements }
    }

    pub fn view_box(&self) -> ViewBox {
        self.view_box
    }

    /// Elements in paint order.
    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    /// Returns a copy with every fill and stroke replaced by `color`.
    ///
    /// Unpainted fills/strokes stay unpainted, and each paint keeps its own
    /// alpha so translucent parts remain translucent. Element order is kept.
    pub fn repainted(&self, color: Color) -> Self {
        let recolor = |c: Color| Color { a: c.a, ..color };
        let elements = self
            .elements
            .iter()
            .map(|element| PathElement {
                paint: Paint {
                    fill: element.paint.fill.map(recolor),
                    stroke: element.paint.stroke.map(recolor),
                    ..element.paint
                },
                ..element.clone()
            })
            .collect();
        Self {
            view_box: self.view_box,
            elements,
        }
    }
}

impl FromStr for VectorDocument {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s.as_bytes())
    }
}
