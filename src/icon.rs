//! Raster icon types.
//!
//! A [`RasterImage`] is the output of the rasterizer and the image a
//! [`CheckoutButton`](crate::CheckoutButton) displays. It is immutable once
//! built; buttons and the icon cache share it through `Arc`.

use image::RgbaImage;

/// A rectangle defined in pixel coordinates.
///
/// Used to describe where the drawn icon sits inside a bitmap that was
/// letterboxed to preserve aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectPx {
    /// X offset from the left edge of the image
    pub x: u32,
    /// Y offset from the top edge of the image
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl RectPx {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle starting at origin (0, 0) with the given dimensions.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height }
    }
}

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A rendered icon: straight-alpha RGBA pixels plus display metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    data: RgbaImage,

    /// Physical pixels per logical point.
    ///
    /// - 1.0 for standard resolution (@1x)
    /// - 2.0 for retina/HiDPI (@2x)
    /// - 3.0 for @3x, etc.
    scale: f32,

    /// The region of the bitmap covered by the drawn canvas.
    ///
    /// Equals `RectPx::from_size(width, height)` when the canvas aspect
    /// ratio matches the target.
    content_bounds: RectPx,
}

impl RasterImage {
    pub fn new(data: RgbaImage, scale: f32, content_bounds: RectPx) -> Self {
        Self {
            data,
            scale,
            content_bounds,
        }
    }

    /// Wraps a pre-rendered bitmap whose content fills the whole image.
    ///
    /// This is how callers supply their own artwork to
    /// [`ButtonFactory::checkout_button_with_image`](crate::ButtonFactory::checkout_button_with_image).
    pub fn new_full_content(data: RgbaImage, scale: f32) -> Self {
        let content_bounds = RectPx::from_size(data.width(), data.height());
        Self::new(data, scale, content_bounds)
    }

    /// Returns the pixel dimensions of the image.
    pub fn dimensions(&self) -> SizePx {
        SizePx::new(self.data.width(), self.data.height())
    }

    /// Returns the logical size of the icon (dimensions / scale).
    ///
    /// For a 64x64 @2x icon, the logical size is 32x32.
    pub fn logical_size(&self) -> (f32, f32) {
        (
            self.data.width() as f32 / self.scale,
            self.data.height() as f32 / self.scale,
        )
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn content_bounds(&self) -> RectPx {
        self.content_bounds
    }

    /// The underlying bitmap.
    pub fn pixels(&self) -> &RgbaImage {
        &self.data
    }

    /// Raw RGBA bytes, row-major, four bytes per pixel.
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_raw()
    }
}
