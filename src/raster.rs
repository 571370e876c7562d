//! Rasterization of [`VectorDocument`]s with `tiny-skia`.
//!
//! The document's canvas is scaled uniformly to fit the pixel target,
//! centered, and every element is painted in document order onto a
//! transparent pixmap. Rendering depends only on its arguments, so equal
//! inputs always produce byte-identical bitmaps.

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{self, Pixmap, Transform};

use crate::error::{Error, Result};
use crate::icon::{RasterImage, RectPx};
use crate::vector::{FillRule, PathElement, Segment, VectorDocument};

/// Renders `document` into a bitmap of `width` x `height` points at `scale`
/// pixels per point.
///
/// The pixel size is `ceil(width * scale)` x `ceil(height * scale)`. The
/// canvas keeps its aspect ratio and is centered; nothing is cropped.
///
/// Fails with [`Error::Rasterization`] if any argument is non-positive or
/// not finite.
///
/// ```
/// use checkout_button::{rasterize, VectorDocument};
///
/// let doc = VectorDocument::parse(br#"<svg width="10" height="10"><rect width="10" height="10"/></svg>"#).unwrap();
/// let icon = rasterize(&doc, 16.0, 16.0, 2.0).unwrap();
/// assert_eq!(icon.dimensions().width, 32);
/// ```
pub fn rasterize(
    document: &VectorDocument,
    width: f32,
    height: f32,
    scale: f32,
) -> Result<RasterImage> {
    for (name, value) in [("width", width), ("height", height), ("scale", scale)] {
        if !(value.is_finite() && value > 0.0) {
            return Err(Error::Rasterization(format!(
                "{name} must be positive, got {value}"
            )));
        }
    }

    let pixel_width = (width * scale).ceil() as u32;
    let pixel_height = (height * scale).ceil() as u32;
    let mut pixmap = Pixmap::new(pixel_width, pixel_height).ok_or_else(|| {
        Error::Rasterization(format!(
            "cannot allocate a {pixel_width}x{pixel_height} bitmap"
        ))
    })?;

    // Fit the canvas inside the target, centered
    let view_box = document.view_box();
    let fit = (pixel_width as f32 / view_box.width).min(pixel_height as f32 / view_box.height);
    let drawn_width = view_box.width * fit;
    let drawn_height = view_box.height * fit;
    let offset_x = (pixel_width as f32 - drawn_width) / 2.0;
    let offset_y = (pixel_height as f32 - drawn_height) / 2.0;
    let transform = Transform::from_row(
        fit,
        0.0,
        0.0,
        fit,
        offset_x - view_box.min_x * fit,
        offset_y - view_box.min_y * fit,
    );

    // Painter's order: later elements land on top
    for element in document.elements() {
        paint_element(&mut pixmap, element, transform);
    }

    let content_bounds = content_bounds(
        offset_x,
        offset_y,
        drawn_width,
        drawn_height,
        pixel_width,
        pixel_height,
    );
    log::debug!(
        "rasterized {} elements into {pixel_width}x{pixel_height} @{scale}x",
        document.elements().len()
    );

    Ok(RasterImage::new(pixmap_to_rgba_image(&pixmap), scale, content_bounds))
}

fn paint_element(pixmap: &mut Pixmap, element: &PathElement, transform: Transform) {
    let Some(path) = build_path(element.segments()) else {
        return;
    };
    let paint = element.paint();

    if let Some(color) = paint.fill {
        let mut fill = tiny_skia::Paint::default();
        fill.set_color_rgba8(color.r, color.g, color.b, color.a);
        fill.anti_alias = true;
        let rule = match element.fill_rule() {
            FillRule::NonZero => tiny_skia::FillRule::Winding,
            FillRule::EvenOdd => tiny_skia::FillRule::EvenOdd,
        };
        pixmap.fill_path(&path, &fill, rule, transform, None);
    }

    if let Some(color) = paint.stroke {
        if paint.stroke_width > 0.0 {
            let mut stroke_paint = tiny_skia::Paint::default();
            stroke_paint.set_color_rgba8(color.r, color.g, color.b, color.a);
            stroke_paint.anti_alias = true;
            let stroke = tiny_skia::Stroke {
                width: paint.stroke_width,
                ..Default::default()
            };
            pixmap.stroke_path(&path, &stroke_paint, &stroke, transform, None);
        }
    }
}

/// Converts segments into a tiny-skia path. Returns `None` for degenerate
/// outlines (e.g. a lone move-to).
fn build_path(segments: &[Segment]) -> Option<tiny_skia::Path> {
    let mut builder = tiny_skia::PathBuilder::new();
    for segment in segments {
        match *segment {
            Segment::MoveTo(p) => builder.move_to(p.x, p.y),
            Segment::LineTo(p) => builder.line_to(p.x, p.y),
            Segment::CubicTo(c1, c2, p) => builder.cubic_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
            Segment::Close => builder.close(),
        }
    }
    builder.finish()
}

fn content_bounds(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    max_width: u32,
    max_height: u32,
) -> RectPx {
    let left = (x.floor().max(0.0) as u32).min(max_width);
    let top = (y.floor().max(0.0) as u32).min(max_height);
    let right = ((x + width).ceil() as u32).clamp(left, max_width);
    let bottom = ((y + height).ceil() as u32).clamp(top, max_height);
    RectPx::new(left, top, right - left, bottom - top)
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let pixels = pixmap.pixels();
    RgbaImage::from_fn(width, pixmap.height(), |x, y| {
        let pixel = pixels[(y * width + x) as usize];
        // tiny_skia uses premultiplied alpha, we need to unpremultiply
        let (r, g, b, a) = unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
        Rgba([r, g, b, a])
    })
}

/// Unpremultiplies a premultiplied alpha pixel.
fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100"><rect width="100" height="100" fill="#ff0000"/></svg>"##;

    fn doc(svg: &[u8]) -> VectorDocument {
        VectorDocument::parse(svg).unwrap()
    }

    #[test]
    fn pixel_size_follows_scale() {
        let img = rasterize(&doc(SQUARE), 20.0, 10.0, 3.0).unwrap();
        assert_eq!(img.dimensions().width, 60);
        assert_eq!(img.dimensions().height, 30);
        assert_eq!(img.scale(), 3.0);
        assert_eq!(img.logical_size(), (20.0, 10.0));
    }

    #[test]
    fn fractional_sizes_round_up() {
        let img = rasterize(&doc(SQUARE), 10.5, 10.0, 1.0).unwrap();
        assert_eq!(img.dimensions().width, 11);
    }

    #[test]
    fn aspect_ratio_is_preserved_and_centered() {
        // A square canvas in a 40x20 target occupies the middle 20x20.
        let img = rasterize(&doc(SQUARE), 40.0, 20.0, 1.0).unwrap();
        assert_eq!(img.content_bounds(), RectPx::new(10, 0, 20, 20));

        let pixels = img.pixels();
        assert_eq!(pixels.get_pixel(20, 10).0, [255, 0, 0, 255]);
        assert_eq!(pixels.get_pixel(2, 10).0, [0, 0, 0, 0]);
        assert_eq!(pixels.get_pixel(37, 10).0, [0, 0, 0, 0]);
    }

    #[test]
    fn later_elements_paint_over_earlier_ones() {
        let svg = br##"<svg width="10" height="10">
            <rect width="10" height="10" fill="#ff0000"/>
            <rect x="0" y="0" width="5" height="10" fill="#0000ff"/>
        </svg>"##;
        let img = rasterize(&doc(svg), 10.0, 10.0, 1.0).unwrap();
        assert_eq!(img.pixels().get_pixel(2, 5).0, [0, 0, 255, 255]);
        assert_eq!(img.pixels().get_pixel(8, 5).0, [255, 0, 0, 255]);
    }

    #[test]
    fn viewbox_origin_is_honored() {
        let svg = br##"<svg viewBox="10 10 10 10"><rect x="10" y="10" width="5" height="10" fill="#00ff00"/></svg>"##;
        let img = rasterize(&doc(svg), 10.0, 10.0, 1.0).unwrap();
        assert_eq!(img.pixels().get_pixel(2, 5).0, [0, 255, 0, 255]);
        assert_eq!(img.pixels().get_pixel(8, 5).0[3], 0);
    }

    #[test]
    fn even_odd_leaves_a_hole() {
        let svg = br#"<svg width="10" height="10">
            <path fill-rule="evenodd" d="M0 0 H10 V10 H0 Z M3 3 H7 V7 H3 Z"/>
        </svg>"#;
        let img = rasterize(&doc(svg), 10.0, 10.0, 1.0).unwrap();
        assert_eq!(img.pixels().get_pixel(5, 5).0[3], 0);
        assert_eq!(img.pixels().get_pixel(1, 1).0, [0, 0, 0, 255]);
    }

    #[test]
    fn stroke_only_elements_are_drawn() {
        let svg = br##"<svg width="10" height="10">
            <line x1="0" y1="5" x2="10" y2="5" stroke="#ffffff" stroke-width="2"/>
        </svg>"##;
        let img = rasterize(&doc(svg), 10.0, 10.0, 1.0).unwrap();
        assert_eq!(img.pixels().get_pixel(5, 4).0, [255, 255, 255, 255]);
        assert_eq!(img.pixels().get_pixel(5, 0).0[3], 0);
    }

    #[test]
    fn rendering_is_deterministic() {
        let svg = br##"<svg viewBox="0 0 24 24">
            <circle cx="12" cy="12" r="9" fill="#1a1f71" opacity="0.7"/>
            <path d="M4 12 q8 -10 16 0 t-16 0" stroke="#f79e1b" stroke-width="1.5" fill="none"/>
        </svg>"##;
        let document = doc(svg);
        let first = rasterize(&document, 33.0, 21.0, 2.5).unwrap();
        let second = rasterize(&document, 33.0, 21.0, 2.5).unwrap();
        assert_eq!(first.as_bytes(), second.as_bytes());
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_non_positive_targets() {
        let document = doc(SQUARE);
        for (w, h, s) in [
            (0.0, 10.0, 1.0),
            (10.0, -1.0, 1.0),
            (10.0, 10.0, 0.0),
            (f32::NAN, 10.0, 1.0),
            (10.0, f32::INFINITY, 1.0),
        ] {
            assert!(
                matches!(rasterize(&document, w, h, s), Err(Error::Rasterization(_))),
                "({w}, {h}, {s}) should be rejected"
            );
        }
    }

    #[test]
    fn empty_document_renders_transparent() {
        let img = rasterize(&doc(br#"<svg width="4" height="4"/>"#), 4.0, 4.0, 1.0).unwrap();
        assert!(img.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn unpremultiply_edges() {
        assert_eq!(unpremultiply(0, 0, 0, 0), (0, 0, 0, 0));
        assert_eq!(unpremultiply(255, 0, 0, 255), (255, 0, 0, 255));
        assert_eq!(unpremultiply(51, 0, 0, 51), (255, 0, 0, 51));
    }
}
