//! Serializable button configuration.
//!
//! A [`ButtonProfile`] captures everything that decides how the factory's
//! default button looks, in a form that can be shipped as JSON alongside an
//! app's other configuration.
//!
//! # Example
//!
//! ```
//! use checkout_button::{ButtonProfile, ButtonStyle, Color};
//!
//! let profile = ButtonProfile::new()
//!     .with_size(200.0, 48.0)
//!     .with_scale(3.0)
//!     .with_style(ButtonStyle::Monochrome(Color::WHITE));
//!
//! let json = profile.to_json().unwrap();
//! let restored = ButtonProfile::from_json(&json).unwrap();
//! assert_eq!(restored, profile);
//! ```

use serde::{Deserialize, Serialize};

use crate::factory::IconRequest;
use crate::source::IconSource;
use crate::vector::Color;

// ============================================================================
// ButtonStyle
// ============================================================================

/// Visual variant of the checkout icon.
///
/// Serializes as `"standard"` or `{ "monochrome": "#ffffff" }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum ButtonStyle {
    /// The icon's own colors.
    #[default]
    Standard,

    /// Every painted area recolored with one color (e.g. white on a dark bar).
    Monochrome(Color),
}

#[cfg(feature = "jsonschema")]
impl schemars::JsonSchema for Color {
    fn schema_name() -> String {
        "Color".to_owned()
    }

    fn json_schema(generator: &mut schemars::r#gen::SchemaGenerator) -> schemars::schema::Schema {
        String::json_schema(generator)
    }
}

// ============================================================================
// ButtonProfile
// ============================================================================

fn default_width() -> f32 {
    160.0
}

fn default_height() -> f32 {
    44.0
}

fn default_scale() -> f32 {
    2.0
}

fn default_label() -> String {
    "Checkout".to_owned()
}

/// Settings for the buttons a [`ButtonFactory`](crate::ButtonFactory) builds
/// by default.
///
/// # JSON Format
///
/// ```json
/// {
///   "width": 160.0,
///   "height": 44.0,
///   "scale": 2.0,
///   "style": "standard",
///   "source": "builtIn",
///   "accessibilityLabel": "Checkout"
/// }
/// ```
///
/// Every field is optional when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ButtonProfile {
    /// Icon width in points.
    #[serde(default = "default_width")]
    pub width: f32,

    /// Icon height in points.
    #[serde(default = "default_height")]
    pub height: f32,

    /// Display scale (pixels per point).
    #[serde(default = "default_scale")]
    pub scale: f32,

    #[serde(default)]
    pub style: ButtonStyle,

    /// Vector source rasterized for the icon.
    #[serde(default)]
    pub source: IconSource,

    #[serde(default = "default_label")]
    pub accessibility_label: String,
}

impl Default for ButtonProfile {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            scale: default_scale(),
            style: ButtonStyle::default(),
            source: IconSource::default(),
            accessibility_label: default_label(),
        }
    }
}

impl ButtonProfile {
    /// Creates a profile with the default size, scale and built-in icon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the icon size in points.
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the display scale.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_source(mut self, source: impl Into<IconSource>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_accessibility_label(mut self, label: impl Into<String>) -> Self {
        self.accessibility_label = label.into();
        self
    }

    /// The icon request used by [`ButtonFactory::checkout_button`](crate::ButtonFactory::checkout_button).
    pub fn default_request(&self) -> IconRequest {
        IconRequest::new(self.width, self.height, self.scale).with_style(self.style)
    }

    /// Serializes the profile to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the profile to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// Tests
// ============================================================================
