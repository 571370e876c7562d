//! Where a button's vector icon comes from.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::vector::VectorDocument;

/// The checkout mark shipped with the crate.
pub const BUILT_IN_ICON: &str = include_str!("assets/checkout.svg");

/// A source for the button's SVG data.
///
/// Serializes as `"builtIn"`, `{ "svgData": "<svg>...</svg>" }` or
/// `{ "svgPath": "/path/to/icon.svg" }`.
///
/// ```
/// use checkout_button::IconSource;
///
/// let raw = IconSource::from_svg(r#"<svg width="1" height="1"/>"#);
/// assert!(raw.load().is_ok());
/// assert!(IconSource::BuiltIn.load().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum IconSource {
    /// The crate's bundled checkout mark ([`BUILT_IN_ICON`]).
    #[default]
    BuiltIn,

    /// Raw SVG markup.
    SvgData(String),

    /// An SVG file read at render time.
    SvgPath(PathBuf),
}

impl IconSource {
    /// Creates a source from raw SVG markup.
    pub fn from_svg(svg: impl Into<String>) -> Self {
        Self::SvgData(svg.into())
    }

    /// Creates a source that reads an SVG file.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::SvgPath(path.into())
    }

    /// Reads (if needed) and parses the source.
    pub fn load(&self) -> Result<VectorDocument> {
        match self {
            Self::BuiltIn => VectorDocument::parse(BUILT_IN_ICON.as_bytes()),
            Self::SvgData(svg) => VectorDocument::parse(svg.as_bytes()),
            Self::SvgPath(path) => VectorDocument::open(path),
        }
    }

    /// Returns `true` if this is the bundled icon.
    pub fn is_built_in(&self) -> bool {
        matches!(self, Self::BuiltIn)
    }
}

impl From<String> for IconSource {
    fn from(svg: String) -> Self {
        Self::SvgData(svg)
    }
}

impl From<&str> for IconSource {
    fn from(svg: &str) -> Self {
        Self::SvgData(svg.to_string())
    }
}
