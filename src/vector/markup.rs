//! SVG markup reader.
//!
//! Walks the element tree with `roxmltree`, resolving inherited paint
//! attributes and transforms, and emits [`PathElement`]s in document order.

use resvg::tiny_skia::Transform;
use roxmltree::{Document, Node};

use super::path_data;
use super::{Color, FillRule, Paint, PathElement, Point, Segment, VectorDocument, ViewBox};
use crate::error::ParseError;

/// Bézier handle length for approximating a quarter ellipse.
const KAPPA: f32 = 0.552_284_8;

pub(super) fn parse_document(text: &str) -> Result<VectorDocument, ParseError> {
    let doc = Document::parse(text).map_err(|e| ParseError::Markup(e.to_string()))?;
    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(ParseError::UnexpectedRoot(root.tag_name().name().to_string()));
    }

    let view_box = canvas(root)?;
    let style = Style::default().inherit(root)?;
    let transform = element_transform(root)?;

    let mut elements = Vec::new();
    collect(root, &style, transform, &mut elements)?;
    log::trace!(
        "parsed vector document: {}x{} canvas, {} elements",
        view_box.width,
        view_box.height,
        elements.len()
    );

    Ok(VectorDocument::from_elements(view_box, elements))
}

/// Resolves the root canvas: `viewBox` wins, then `width`/`height`.
fn canvas(root: Node<'_, '_>) -> Result<ViewBox, ParseError> {
    if let Some(value) = root.attribute("viewBox") {
        let numbers = path_data::parse_number_list(value).map_err(|_| invalid("viewBox", value))?;
        let [min_x, min_y, width, height] = numbers[..] else {
            return Err(invalid("viewBox", value));
        };
        if width <= 0.0 || height <= 0.0 {
            return Err(ParseError::MissingCanvas);
        }
        return Ok(ViewBox {
            min_x,
            min_y,
            width,
            height,
        });
    }

    match (root.attribute("width"), root.attribute("height")) {
        (Some(w), Some(h)) => {
            let width = length("width", w)?;
            let height = length("height", h)?;
            if width <= 0.0 || height <= 0.0 {
                return Err(ParseError::MissingCanvas);
            }
            Ok(ViewBox::from_size(width, height))
        }
        _ => Err(ParseError::MissingCanvas),
    }
}

fn collect(
    parent: Node<'_, '_>,
    style: &Style,
    transform: Transform,
    out: &mut Vec<PathElement>,
) -> Result<(), ParseError> {
    for node in parent.children().filter(Node::is_element) {
        if is_hidden(node) {
            continue;
        }
        let name = node.tag_name().name();
        let style = style.inherit(node)?;
        let transform = transform.pre_concat(element_transform(node)?);

        let segments = match name {
            "g" | "svg" | "a" | "switch" => {
                collect(node, &style, transform, out)?;
                continue;
            }
            "path" => match node.attribute("d") {
                Some(d) => path_data::parse(d)?,
                None => continue,
            },
            "rect" => rect(node)?,
            "circle" => {
                let r = number_attr(node, "r", 0.0)?;
                ellipse(number_attr(node, "cx", 0.0)?, number_attr(node, "cy", 0.0)?, r, r)
            }
            "ellipse" => ellipse(
                number_attr(node, "cx", 0.0)?,
                number_attr(node, "cy", 0.0)?,
                number_attr(node, "rx", 0.0)?,
                number_attr(node, "ry", 0.0)?,
            ),
            "line" => vec![
                Segment::MoveTo(Point::new(
                    number_attr(node, "x1", 0.0)?,
                    number_attr(node, "y1", 0.0)?,
                )),
                Segment::LineTo(Point::new(
                    number_attr(node, "x2", 0.0)?,
                    number_attr(node, "y2", 0.0)?,
                )),
            ],
            "polyline" => poly(node, false)?,
            "polygon" => poly(node, true)?,
            "defs" | "title" | "desc" | "metadata" | "style" | "symbol" | "clipPath"
            | "mask" | "linearGradient" | "radialGradient" | "pattern" | "filter" => continue,
            other => {
                log::warn!("skipping unsupported element <{other}>");
                continue;
            }
        };

        if segments.is_empty() {
            continue;
        }
        out.push(style.element(segments, transform));
    }
    Ok(())
}

fn is_hidden(node: Node<'_, '_>) -> bool {
    property(node, "display") == Some("none")
        || matches!(property(node, "visibility"), Some("hidden" | "collapse"))
}

// ============================================================================
// Inherited style
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum PaintSpec {
    None,
    Color(Color),
    /// A paint server such as `url(#gradient)`; rendered as unpainted.
    Unsupported,
}

#[derive(Debug, Clone, Copy)]
struct Style {
    fill: PaintSpec,
    stroke: PaintSpec,
    stroke_width: f32,
    fill_rule: FillRule,
    opacity: f32,
    fill_opacity: f32,
    stroke_opacity: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: PaintSpec::Color(Color::BLACK),
            stroke: PaintSpec::None,
            stroke_width: 1.0,
            fill_rule: FillRule::NonZero,
            opacity: 1.0,
            fill_opacity: 1.0,
            stroke_opacity: 1.0,
        }
    }
}

impl Style {
    /// Returns this style overridden by the node's own attributes.
    fn inherit(&self, node: Node<'_, '_>) -> Result<Self, ParseError> {
        let mut style = *self;
        if let Some(value) = specified(node, "fill") {
            style.fill = paint_spec("fill", value)?;
        }
        if let Some(value) = specified(node, "stroke") {
            style.stroke = paint_spec("stroke", value)?;
        }
        if let Some(value) = specified(node, "stroke-width") {
            style.stroke_width = length("stroke-width", value)?.max(0.0);
        }
        if let Some(value) = specified(node, "fill-rule") {
            style.fill_rule = match value {
                "nonzero" => FillRule::NonZero,
                "evenodd" => FillRule::EvenOdd,
                _ => return Err(invalid("fill-rule", value)),
            };
        }
        // Group opacity is folded into each descendant's paint alpha.
        if let Some(value) = specified(node, "opacity") {
            style.opacity *= opacity("opacity", value)?;
        }
        if let Some(value) = specified(node, "fill-opacity") {
            style.fill_opacity = opacity("fill-opacity", value)?;
        }
        if let Some(value) = specified(node, "stroke-opacity") {
            style.stroke_opacity = opacity("stroke-opacity", value)?;
        }
        Ok(style)
    }

    fn element(&self, segments: Vec<Segment>, transform: Transform) -> PathElement {
        let resolve = |spec: PaintSpec, alpha: f32| match spec {
            PaintSpec::Color(color) => Some(color.with_opacity(alpha * self.opacity)),
            PaintSpec::None | PaintSpec::Unsupported => None,
        };
        let segments = if transform.is_identity() {
            segments
        } else {
            segments
                .into_iter()
                .map(|segment| segment.map_points(|p| map_point(transform, p)))
                .collect()
        };
        let stroke_scale = (transform.sx * transform.sy - transform.kx * transform.ky)
            .abs()
            .sqrt();

        PathElement::new(
            segments,
            self.fill_rule,
            Paint {
                fill: resolve(self.fill, self.fill_opacity),
                stroke: resolve(self.stroke, self.stroke_opacity),
                stroke_width: self.stroke_width * stroke_scale,
            },
        )
    }
}

/// Looks a presentation property up, preferring `style="..."` declarations.
fn property<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    let from_style = node.attribute("style").and_then(|style| {
        style.split(';').rev().find_map(|declaration| {
            let (key, value) = declaration.split_once(':')?;
            (key.trim() == name).then(|| value.trim())
        })
    });
    from_style.or_else(|| node.attribute(name).map(str::trim))
}

/// Like [`property`], but treats `inherit` as "not specified".
fn specified<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    property(node, name).filter(|value| *value != "inherit")
}

fn paint_spec(attribute: &str, value: &str) -> Result<PaintSpec, ParseError> {
    if value == "none" {
        return Ok(PaintSpec::None);
    }
    if value.starts_with("url(") {
        log::warn!("paint server {value:?} in `{attribute}` is not supported");
        return Ok(PaintSpec::Unsupported);
    }
    parse_color(value)
        .map(PaintSpec::Color)
        .ok_or_else(|| invalid(attribute, value))
}

/// Parses `#rgb`, `#rrggbb`, `rgb(...)`, `currentColor` and CSS color names.
pub(crate) fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("currentColor") {
        return Some(Color::BLACK);
    }
    if let Some(hex) = value.strip_prefix('#') {
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        return match hex.len() {
            3 | 6 => {
                let rgb: palette::Srgb<u8> = hex.parse().ok()?;
                Some(Color::rgb(rgb.red, rgb.green, rgb.blue))
            }
            8 => {
                let alpha = u8::from_str_radix(&hex[6..], 16).ok()?;
                let rgb: palette::Srgb<u8> = hex[..6].parse().ok()?;
                Some(Color::rgba(rgb.red, rgb.green, rgb.blue, alpha))
            }
            _ => None,
        };
    }
    if let Some(args) = value
        .strip_prefix("rgb(")
        .or_else(|| value.strip_prefix("rgba("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return rgb_function(args);
    }
    let named = palette::named::from_str(&value.to_ascii_lowercase())?;
    Some(Color::rgb(named.red, named.green, named.blue))
}

fn rgb_function(args: &str) -> Option<Color> {
    let channel = |s: &str| -> Option<u8> {
        let s = s.trim();
        let value = match s.strip_suffix('%') {
            Some(pct) => pct.trim().parse::<f32>().ok()? * 2.55,
            None => s.parse::<f32>().ok()?,
        };
        value.is_finite().then(|| value.clamp(0.0, 255.0).round() as u8)
    };
    let parts: Vec<&str> = args.split(',').collect();
    match parts[..] {
        [r, g, b] => Some(Color::rgb(channel(r)?, channel(g)?, channel(b)?)),
        [r, g, b, a] => {
            let alpha: f32 = a.trim().parse().ok()?;
            Some(Color::rgb(channel(r)?, channel(g)?, channel(b)?).with_opacity(alpha))
        }
        _ => None,
    }
}

// ============================================================================
// Transforms
// ============================================================================

fn element_transform(node: Node<'_, '_>) -> Result<Transform, ParseError> {
    match node.attribute("transform") {
        Some(value) => parse_transform(value).ok_or_else(|| invalid("transform", value)),
        None => Ok(Transform::identity()),
    }
}

/// Parses a transform list such as `translate(4 4) rotate(45)`.
fn parse_transform(value: &str) -> Option<Transform> {
    let mut result = Transform::identity();
    let mut rest = value.trim();
    while !rest.is_empty() {
        let open = rest.find('(')?;
        let close = open + rest[open..].find(')')?;
        let name = rest[..open].trim().trim_start_matches(',').trim();
        let args = path_data::parse_number_list(&rest[open + 1..close]).ok()?;
        let item = match (name, args.as_slice()) {
            ("matrix", &[a, b, c, d, e, f]) => Transform::from_row(a, b, c, d, e, f),
            ("translate", &[tx]) => Transform::from_translate(tx, 0.0),
            ("translate", &[tx, ty]) => Transform::from_translate(tx, ty),
            ("scale", &[s]) => Transform::from_scale(s, s),
            ("scale", &[sx, sy]) => Transform::from_scale(sx, sy),
            ("rotate", &[deg]) => Transform::from_rotate(deg),
            ("rotate", &[deg, cx, cy]) => Transform::from_translate(cx, cy)
                .pre_concat(Transform::from_rotate(deg))
                .pre_concat(Transform::from_translate(-cx, -cy)),
            ("skewX", &[deg]) => Transform::from_skew(deg.to_radians().tan(), 0.0),
            ("skewY", &[deg]) => Transform::from_skew(0.0, deg.to_radians().tan()),
            _ => return None,
        };
        result = result.pre_concat(item);
        rest = rest[close + 1..].trim_start();
    }
    Some(result)
}

fn map_point(t: Transform, p: Point) -> Point {
    Point::new(
        t.sx * p.x + t.kx * p.y + t.tx,
        t.ky * p.x + t.sy * p.y + t.ty,
    )
}

// ============================================================================
// Shapes
// ============================================================================

fn rect(node: Node<'_, '_>) -> Result<Vec<Segment>, ParseError> {
    let x = number_attr(node, "x", 0.0)?;
    let y = number_attr(node, "y", 0.0)?;
    let w = number_attr(node, "width", 0.0)?;
    let h = number_attr(node, "height", 0.0)?;
    if w <= 0.0 || h <= 0.0 {
        return Ok(Vec::new());
    }

    let rx = optional_number(node, "rx")?;
    let ry = optional_number(node, "ry")?;
    let (rx, ry) = match (rx, ry) {
        (Some(rx), Some(ry)) => (rx, ry),
        (Some(r), None) | (None, Some(r)) => (r, r),
        (None, None) => (0.0, 0.0),
    };
    let rx = rx.clamp(0.0, w / 2.0);
    let ry = ry.clamp(0.0, h / 2.0);

    if rx == 0.0 || ry == 0.0 {
        return Ok(vec![
            Segment::MoveTo(Point::new(x, y)),
            Segment::LineTo(Point::new(x + w, y)),
            Segment::LineTo(Point::new(x + w, y + h)),
            Segment::LineTo(Point::new(x, y + h)),
            Segment::Close,
        ]);
    }

    let (kx, ky) = (rx * KAPPA, ry * KAPPA);
    let (right, bottom) = (x + w, y + h);
    let p = Point::new;
    Ok(vec![
        Segment::MoveTo(p(x + rx, y)),
        Segment::LineTo(p(right - rx, y)),
        Segment::CubicTo(p(right - rx + kx, y), p(right, y + ry - ky), p(right, y + ry)),
        Segment::LineTo(p(right, bottom - ry)),
        Segment::CubicTo(
            p(right, bottom - ry + ky),
            p(right - rx + kx, bottom),
            p(right - rx, bottom),
        ),
        Segment::LineTo(p(x + rx, bottom)),
        Segment::CubicTo(p(x + rx - kx, bottom), p(x, bottom - ry + ky), p(x, bottom - ry)),
        Segment::LineTo(p(x, y + ry)),
        Segment::CubicTo(p(x, y + ry - ky), p(x + rx - kx, y), p(x + rx, y)),
        Segment::Close,
    ])
}

fn ellipse(cx: f32, cy: f32, rx: f32, ry: f32) -> Vec<Segment> {
    if rx <= 0.0 || ry <= 0.0 {
        return Vec::new();
    }
    let (kx, ky) = (rx * KAPPA, ry * KAPPA);
    let p = Point::new;
    vec![
        Segment::MoveTo(p(cx + rx, cy)),
        Segment::CubicTo(p(cx + rx, cy + ky), p(cx + kx, cy + ry), p(cx, cy + ry)),
        Segment::CubicTo(p(cx - kx, cy + ry), p(cx - rx, cy + ky), p(cx - rx, cy)),
        Segment::CubicTo(p(cx - rx, cy - ky), p(cx - kx, cy - ry), p(cx, cy - ry)),
        Segment::CubicTo(p(cx + kx, cy - ry), p(cx + rx, cy - ky), p(cx + rx, cy)),
        Segment::Close,
    ]
}

fn poly(node: Node<'_, '_>, closed: bool) -> Result<Vec<Segment>, ParseError> {
    let value = node.attribute("points").unwrap_or_default();
    let numbers = path_data::parse_number_list(value).map_err(|_| invalid("points", value))?;
    // A dangling odd coordinate is ignored.
    let mut points = numbers.chunks_exact(2).map(|xy| Point::new(xy[0], xy[1]));

    let Some(first) = points.next() else {
        return Ok(Vec::new());
    };
    let mut segments = vec![Segment::MoveTo(first)];
    segments.extend(points.map(Segment::LineTo));
    if closed {
        segments.push(Segment::Close);
    }
    Ok(segments)
}

// ============================================================================
// Attribute values
// ============================================================================

fn invalid(attribute: &str, value: &str) -> ParseError {
    ParseError::InvalidAttribute {
        attribute: attribute.to_string(),
        value: value.to_string(),
    }
}

/// Parses a unitless or `px` length.
fn length(attribute: &str, value: &str) -> Result<f32, ParseError> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed);
    match number.trim().parse::<f32>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(invalid(attribute, value)),
    }
}

fn opacity(attribute: &str, value: &str) -> Result<f32, ParseError> {
    let trimmed = value.trim();
    let parsed = match trimmed.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f32>().map(|p| p / 100.0),
        None => trimmed.parse::<f32>(),
    };
    match parsed {
        Ok(n) if n.is_finite() => Ok(n.clamp(0.0, 1.0)),
        _ => Err(invalid(attribute, value)),
    }
}

fn optional_number(node: Node<'_, '_>, name: &str) -> Result<Option<f32>, ParseError> {
    node.attribute(name).map(|v| length(name, v)).transpose()
}

fn number_attr(node: Node<'_, '_>, name: &str, default: f32) -> Result<f32, ParseError> {
    Ok(optional_number(node, name)?.unwrap_or(default))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PathDataError;

    fn parse(svg: &str) -> Result<VectorDocument, ParseError> {
        parse_document(svg)
    }

    #[test]
    fn viewbox_defines_canvas() {
        let doc = parse(r#"<svg viewBox="-2 -2 28 24" width="100" height="50"/>"#).unwrap();
        assert_eq!(
            doc.view_box(),
            ViewBox {
                min_x: -2.0,
                min_y: -2.0,
                width: 28.0,
                height: 24.0
            }
        );
    }

    #[test]
    fn width_height_fallback_with_px() {
        let doc = parse(r#"<svg width="32px" height="16"/>"#).unwrap();
        assert_eq!(doc.view_box(), ViewBox::from_size(32.0, 16.0));
    }

    #[test]
    fn missing_or_empty_canvas_is_rejected() {
        assert_eq!(parse("<svg/>"), Err(ParseError::MissingCanvas));
        assert_eq!(
            parse(r#"<svg width="10"/>"#),
            Err(ParseError::MissingCanvas)
        );
        assert_eq!(
            parse(r#"<svg viewBox="0 0 0 10"/>"#),
            Err(ParseError::MissingCanvas)
        );
        assert!(matches!(
            parse(r#"<svg width="50%" height="10"/>"#),
            Err(ParseError::InvalidAttribute { .. })
        ));
    }

    #[test]
    fn rejects_non_svg_and_broken_markup() {
        assert!(matches!(
            parse(r#"<html width="1" height="1"/>"#),
            Err(ParseError::UnexpectedRoot(_))
        ));
        assert!(matches!(
            parse(r#"<svg width="1" height="1"><path d="M0 0"></svg>"#),
            Err(ParseError::Markup(_))
        ));
    }

    #[test]
    fn bad_path_fails_whole_document() {
        let err = parse(
            r#"<svg width="10" height="10">
                <path d="M0 0 H10 V10 Z"/>
                <path d="Z Q 1"/>
            </svg>"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ParseError::PathData(PathDataError::UnmatchedClose { offset: 0 })
        );
    }

    #[test]
    fn elements_keep_document_order() {
        let doc = parse(
            r##"<svg width="10" height="10">
                <rect width="10" height="10" fill="red"/>
                <g fill="#00ff00"><circle cx="5" cy="5" r="2"/></g>
                <path d="M0 0 L10 10" fill="none" stroke="blue" stroke-width="2"/>
            </svg>"##,
        )
        .unwrap();

        let paints: Vec<_> = doc.elements().iter().map(|e| *e.paint()).collect();
        assert_eq!(paints[0].fill, Some(Color::rgb(255, 0, 0)));
        assert_eq!(paints[1].fill, Some(Color::rgb(0, 255, 0)));
        assert_eq!(paints[2].fill, None);
        assert_eq!(paints[2].stroke, Some(Color::rgb(0, 0, 255)));
        assert_eq!(paints[2].stroke_width, 2.0);
    }

    #[test]
    fn style_attribute_overrides_presentation_attribute() {
        let doc = parse(
            r##"<svg width="4" height="4">
                <path d="M0 0 H4 V4 Z" fill="red" style="fill: #0000ff; fill-rule: evenodd"/>
            </svg>"##,
        )
        .unwrap();
        let element = &doc.elements()[0];
        assert_eq!(element.paint().fill, Some(Color::rgb(0, 0, 255)));
        assert_eq!(element.fill_rule(), FillRule::EvenOdd);
    }

    #[test]
    fn opacity_is_folded_into_alpha() {
        let doc = parse(
            r#"<svg width="4" height="4">
                <g opacity="0.5"><rect width="4" height="4" fill-opacity="0.5"/></g>
            </svg>"#,
        )
        .unwrap();
        assert_eq!(doc.elements()[0].paint().fill, Some(Color::rgba(0, 0, 0, 64)));
    }

    #[test]
    fn transforms_are_baked_into_coordinates() {
        let doc = parse(
            r#"<svg width="20" height="20">
                <g transform="translate(10 0)">
                    <path transform="scale(2)" d="M1 1 L2 2" stroke="black" stroke-width="1"/>
                </g>
            </svg>"#,
        )
        .unwrap();
        let element = &doc.elements()[0];
        assert_eq!(
            element.segments(),
            &[
                Segment::MoveTo(Point::new(12.0, 2.0)),
                Segment::LineTo(Point::new(14.0, 4.0)),
            ]
        );
        assert_eq!(element.paint().stroke_width, 2.0);
    }

    #[test]
    fn hidden_and_unsupported_elements_are_skipped() {
        let doc = parse(
            r#"<svg width="4" height="4">
                <defs><path id="x" d="M0 0 H1 V1 Z"/></defs>
                <text x="0" y="0">Pay</text>
                <rect width="4" height="4" display="none"/>
                <rect width="0" height="4"/>
                <rect width="4" height="4" fill="url(#gradient)" stroke="black"/>
            </svg>"#,
        )
        .unwrap();
        assert_eq!(doc.elements().len(), 1);
        assert_eq!(doc.elements()[0].paint().fill, None);
        assert_eq!(doc.elements()[0].paint().stroke, Some(Color::BLACK));
    }

    #[test]
    fn rounded_rect_and_polygon_lowering() {
        let doc = parse(
            r#"<svg width="10" height="10">
                <rect width="10" height="6" rx="2"/>
                <polygon points="0,0 4,0 4,4"/>
                <polyline points="0 0 1 1 2"/>
            </svg>"#,
        )
        .unwrap();
        assert_eq!(doc.elements()[0].segments().len(), 10);
        assert_eq!(doc.elements()[1].segments().len(), 4);
        assert_eq!(doc.elements()[1].segments()[3], Segment::Close);
        assert_eq!(doc.elements()[2].segments().len(), 2);
    }

    #[test]
    fn color_forms() {
        assert_eq!(parse_color("#f00"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(parse_color("#00FF0080"), Some(Color::rgba(0, 255, 0, 128)));
        assert_eq!(parse_color("rgb(0, 128, 255)"), Some(Color::rgb(0, 128, 255)));
        assert_eq!(parse_color("rgb(100%, 0%, 0%)"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(parse_color("White"), Some(Color::WHITE));
        assert_eq!(parse_color("currentColor"), Some(Color::BLACK));
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("nonsense"), None);
    }

    #[test]
    fn invalid_paint_is_rejected() {
        assert!(matches!(
            parse(r#"<svg width="1" height="1"><rect width="1" height="1" fill="bogus"/></svg>"#),
            Err(ParseError::InvalidAttribute { .. })
        ));
    }

    #[test]
    fn transform_list_parsing() {
        let t = parse_transform("translate(5, 5) scale(2)").unwrap();
        assert_eq!(map_point(t, Point::new(1.0, 1.0)), Point::new(7.0, 7.0));
        let m = parse_transform("matrix(1 0 0 1 3 4)").unwrap();
        assert_eq!(map_point(m, Point::new(0.0, 0.0)), Point::new(3.0, 4.0));
        assert!(parse_transform("wobble(1)").is_none());
        assert!(parse_transform("scale(1 2 3)").is_none());
        assert!(parse_transform(")(").is_none());
        assert!(parse_transform(") translate(1 2)").is_none());
    }

    #[test]
    fn misordered_transform_parentheses_are_rejected() {
        for transform in [")(", ") translate(1 2)", "translate(1 2) )("] {
            let svg = format!(
                r#"<svg width="4" height="4"><g transform="{transform}"><rect width="1" height="1"/></g></svg>"#
            );
            assert!(
                matches!(parse(&svg), Err(ParseError::InvalidAttribute { .. })),
                "{transform:?}"
            );
        }
    }

    #[test]
    fn non_hex_color_digits_are_rejected() {
        assert_eq!(parse_color("#\u{e9}0"), None);
        assert_eq!(parse_color("#\u{e9}\u{e9}\u{e9}"), None);
        assert_eq!(parse_color("#a\u{e9}\u{e9}\u{e9}a"), None);
        assert_eq!(parse_color("#ggg"), None);
        assert_eq!(parse_color("#12345"), None);

        let err = VectorDocument::parse(
            "<svg width=\"1\" height=\"1\"><rect width=\"1\" height=\"1\" fill=\"#\u{e9}0\"/></svg>".as_bytes(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            crate::Error::MalformedSource(ParseError::InvalidAttribute { .. })
        ));
    }
}
