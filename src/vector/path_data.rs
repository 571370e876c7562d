//! Path-data (`d` attribute) parser.
//!
//! Accepts the full command set (`M L H V C S Q T A Z`, absolute and
//! relative) and lowers it to [`Segment`]s: horizontal/vertical lines become
//! line-tos, quadratics are elevated to cubics, and elliptical arcs are
//! approximated with one cubic per quarter turn.

use std::f64::consts::{FRAC_PI_2, TAU};

use super::{Point, Segment};
use crate::error::PathDataError;

/// Parses a path-data string into segments.
///
/// An empty (or whitespace-only) string yields no segments.
pub fn parse(d: &str) -> Result<Vec<Segment>, PathDataError> {
    let mut cursor = Cursor::new(d);
    let mut pen = Pen::default();
    let mut segments = Vec::new();

    cursor.skip_whitespace();
    while let Some(byte) = cursor.peek() {
        let offset = cursor.pos;
        let command = byte as char;
        if !byte.is_ascii_alphabetic() {
            return Err(PathDataError::UnknownCommand { command, offset });
        }
        cursor.pos += 1;

        if !pen.started {
            match command {
                'M' | 'm' => {}
                'Z' | 'z' => return Err(PathDataError::UnmatchedClose { offset }),
                _ => return Err(PathDataError::MissingMoveTo { found: command }),
            }
        }

        if matches!(command, 'Z' | 'z') {
            pen.close(&mut segments);
            cursor.skip_whitespace();
            continue;
        }

        if !cursor.has_number() {
            return Err(PathDataError::MissingCoordinates { command, offset });
        }

        // The first pair after a move-to opens the subpath; repeats are line-tos.
        let mut current = command;
        while cursor.has_number() {
            pen.apply(current, &mut cursor, &mut segments)?;
            current = match current {
                'M' => 'L',
                'm' => 'l',
                other => other,
            };
        }
        cursor.skip_whitespace();
    }

    Ok(segments)
}

/// Parses a whitespace/comma separated list of numbers (`points`, `viewBox`).
pub fn parse_number_list(s: &str) -> Result<Vec<f32>, PathDataError> {
    let mut cursor = Cursor::new(s);
    let mut numbers = Vec::new();
    cursor.skip_whitespace();
    while cursor.peek().is_some() {
        numbers.push(cursor.number('#')?);
    }
    Ok(numbers)
}

// ============================================================================
// Pen state
// ============================================================================

#[derive(Default)]
struct Pen {
    current: Point,
    subpath_start: Point,
    started: bool,
    /// Second control point of the previous cubic, for `S`.
    last_cubic: Option<Point>,
    /// Control point of the previous quadratic, for `T`.
    last_quad: Option<Point>,
}

impl Pen {
    fn close(&mut self, out: &mut Vec<Segment>) {
        out.push(Segment::Close);
        self.current = self.subpath_start;
        self.last_cubic = None;
        self.last_quad = None;
    }

    fn apply(
        &mut self,
        command: char,
        cursor: &mut Cursor<'_>,
        out: &mut Vec<Segment>,
    ) -> Result<(), PathDataError> {
        let relative = command.is_ascii_lowercase();
        let origin = if relative { self.current } else { Point::default() };
        let point = |cursor: &mut Cursor<'_>| -> Result<Point, PathDataError> {
            let x = cursor.number(command)?;
            let y = cursor.number(command)?;
            Ok(Point::new(origin.x + x, origin.y + y))
        };

        let mut cubic = None;
        let mut quad = None;

        match command.to_ascii_uppercase() {
            'M' => {
                let p = point(cursor)?;
                out.push(Segment::MoveTo(p));
                self.subpath_start = p;
                self.started = true;
                self.current = p;
            }
            'L' => {
                let p = point(cursor)?;
                out.push(Segment::LineTo(p));
                self.current = p;
            }
            'H' => {
                let x = cursor.number(command)? + origin.x;
                let p = Point::new(x, self.current.y);
                out.push(Segment::LineTo(p));
                self.current = p;
            }
            'V' => {
                let y = cursor.number(command)? + origin.y;
                let p = Point::new(self.current.x, y);
                out.push(Segment::LineTo(p));
                self.current = p;
            }
            'C' => {
                let c1 = point(cursor)?;
                let c2 = point(cursor)?;
                let p = point(cursor)?;
                out.push(Segment::CubicTo(c1, c2, p));
                cubic = Some(c2);
                self.current = p;
            }
            'S' => {
                let c1 = reflect(self.last_cubic, self.current);
                let c2 = point(cursor)?;
                let p = point(cursor)?;
                out.push(Segment::CubicTo(c1, c2, p));
                cubic = Some(c2);
                self.current = p;
            }
            'Q' => {
                let q = point(cursor)?;
                let p = point(cursor)?;
                out.push(quad_to_cubic(self.current, q, p));
                quad = Some(q);
                self.current = p;
            }
            'T' => {
                let q = reflect(self.last_quad, self.current);
                let p = point(cursor)?;
                out.push(quad_to_cubic(self.current, q, p));
                quad = Some(q);
                self.current = p;
            }
            'A' => {
                let rx = cursor.number(command)?;
                let ry = cursor.number(command)?;
                let rotation = cursor.number(command)?;
                let large_arc = cursor.flag()?;
                let sweep = cursor.flag()?;
                let p = point(cursor)?;
                arc_to_cubics(self.current, rx, ry, rotation, large_arc, sweep, p, out);
                self.current = p;
            }
            _ => {
                return Err(PathDataError::UnknownCommand {
                    command,
                    offset: cursor.pos.saturating_sub(1),
                });
            }
        }

        self.last_cubic = cubic;
        self.last_quad = quad;
        Ok(())
    }
}

fn reflect(control: Option<Point>, around: Point) -> Point {
    match control {
        Some(c) => Point::new(2.0 * around.x - c.x, 2.0 * around.y - c.y),
        None => around,
    }
}

fn quad_to_cubic(from: Point, control: Point, to: Point) -> Segment {
    let lerp = |a: Point, b: Point| {
        Point::new(a.x + (b.x - a.x) * 2.0 / 3.0, a.y + (b.y - a.y) * 2.0 / 3.0)
    };
    Segment::CubicTo(lerp(from, control), lerp(to, control), to)
}

/// Converts an endpoint-parameterized elliptical arc to cubic segments.
#[allow(clippy::too_many_arguments)]
fn arc_to_cubics(
    from: Point,
    rx: f32,
    ry: f32,
    rotation_deg: f32,
    large_arc: bool,
    sweep: bool,
    to: Point,
    out: &mut Vec<Segment>,
) {
    if from == to {
        return;
    }
    let (mut rx, mut ry) = (rx.abs() as f64, ry.abs() as f64);
    if rx == 0.0 || ry == 0.0 {
        out.push(Segment::LineTo(to));
        return;
    }

    let (sin_phi, cos_phi) = (rotation_deg as f64).to_radians().sin_cos();
    let (x0, y0) = (from.x as f64, from.y as f64);
    let (x1, y1) = (to.x as f64, to.y as f64);

    let dx = (x0 - x1) / 2.0;
    let dy = (y0 - y1) / 2.0;
    let xp = cos_phi * dx + sin_phi * dy;
    let yp = -sin_phi * dx + cos_phi * dy;

    let lambda = (xp * xp) / (rx * rx) + (yp * yp) / (ry * ry);
    if lambda > 1.0 {
        rx *= lambda.sqrt();
        ry *= lambda.sqrt();
    }

    let num = rx * rx * ry * ry - rx * rx * yp * yp - ry * ry * xp * xp;
    let den = rx * rx * yp * yp + ry * ry * xp * xp;
    let mut coef = if den == 0.0 { 0.0 } else { (num / den).max(0.0).sqrt() };
    if large_arc == sweep {
        coef = -coef;
    }
    let cxp = coef * rx * yp / ry;
    let cyp = -coef * ry * xp / rx;
    let cx = cos_phi * cxp - sin_phi * cyp + (x0 + x1) / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (y0 + y1) / 2.0;

    let angle = |ux: f64, uy: f64, vx: f64, vy: f64| (ux * vy - uy * vx).atan2(ux * vx + uy * vy);
    let ux = (xp - cxp) / rx;
    let uy = (yp - cyp) / ry;
    let vx = (-xp - cxp) / rx;
    let vy = (-yp - cyp) / ry;
    let theta = angle(1.0, 0.0, ux, uy);
    let mut delta = angle(ux, uy, vx, vy) % TAU;
    if !sweep && delta > 0.0 {
        delta -= TAU;
    } else if sweep && delta < 0.0 {
        delta += TAU;
    }

    let pieces = (delta.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
    let step = delta / pieces as f64;
    let handle = 4.0 / 3.0 * (step / 4.0).tan();
    let map = |ux: f64, uy: f64| {
        Point::new(
            (cx + rx * cos_phi * ux - ry * sin_phi * uy) as f32,
            (cy + rx * sin_phi * ux + ry * cos_phi * uy) as f32,
        )
    };

    for i in 0..pieces {
        let a1 = theta + step * i as f64;
        let a2 = a1 + step;
        let (s1, c1) = a1.sin_cos();
        let (s2, c2) = a2.sin_cos();
        let ctrl1 = map(c1 - handle * s1, s1 + handle * c1);
        let ctrl2 = map(c2 + handle * s2, s2 - handle * c2);
        let end = if i + 1 == pieces { to } else { map(c2, s2) };
        out.push(Segment::CubicTo(ctrl1, ctrl2, end));
    }
}

// ============================================================================
// Tokenizer
// ============================================================================

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(s: &'a str) -> Self {
        Self {
            bytes: s.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Skips whitespace and at most one comma.
    fn skip_separator(&mut self) {
        self.skip_whitespace();
        if self.peek() == Some(b',') {
            self.pos += 1;
            self.skip_whitespace();
        }
    }

    /// True if the next token (after separators) starts a number.
    fn has_number(&mut self) -> bool {
        self.skip_separator();
        self.peek()
            .is_some_and(|b| b.is_ascii_digit() || matches!(b, b'.' | b'+' | b'-'))
    }

    fn number(&mut self, command: char) -> Result<f32, PathDataError> {
        self.skip_separator();
        let start = self.pos;
        match self.peek() {
            None => {
                return Err(PathDataError::MissingCoordinates {
                    command,
                    offset: start,
                });
            }
            Some(b) if b.is_ascii_alphabetic() => {
                return Err(PathDataError::MissingCoordinates {
                    command,
                    offset: start,
                });
            }
            _ => {}
        }

        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        let int_digits = self.digits();
        let mut frac_digits = 0;
        if self.peek() == Some(b'.') {
            self.pos += 1;
            frac_digits = self.digits();
        }
        if int_digits + frac_digits == 0 {
            return Err(PathDataError::InvalidNumber { offset: start });
        }

        // Only treat `e` as an exponent when digits follow it.
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.digits() == 0 {
                self.pos = mark;
            }
        }

        let text = std::str::from_utf8(&self.bytes[start..self.pos])
            .map_err(|_| PathDataError::InvalidNumber { offset: start })?;
        let value: f32 = text
            .parse()
            .map_err(|_| PathDataError::InvalidNumber { offset: start })?;
        if !value.is_finite() {
            return Err(PathDataError::InvalidNumber { offset: start });
        }
        Ok(value)
    }

    fn digits(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Arc flags are a single `0` or `1` and need no separator after them.
    fn flag(&mut self) -> Result<bool, PathDataError> {
        self.skip_separator();
        let offset = self.pos;
        let flag = match self.peek() {
            Some(b'0') => false,
            Some(b'1') => true,
            _ => return Err(PathDataError::InvalidFlag { offset }),
        };
        self.pos += 1;
        Ok(flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn absolute_lines_and_close() {
        let segs = parse("M 1 2 L 3 4 H 10 V 0 Z").unwrap();
        assert_eq!(
            segs,
            vec![
                Segment::MoveTo(p(1.0, 2.0)),
                Segment::LineTo(p(3.0, 4.0)),
                Segment::LineTo(p(10.0, 4.0)),
                Segment::LineTo(p(10.0, 0.0)),
                Segment::Close,
            ]
        );
    }

    #[test]
    fn relative_commands_and_implicit_lineto() {
        let segs = parse("m10 10 5 0 0 5 h-5z").unwrap();
        assert_eq!(
            segs,
            vec![
                Segment::MoveTo(p(10.0, 10.0)),
                Segment::LineTo(p(15.0, 10.0)),
                Segment::LineTo(p(15.0, 15.0)),
                Segment::LineTo(p(10.0, 15.0)),
                Segment::Close,
            ]
        );
    }

    #[test]
    fn number_format_variations() {
        let segs = parse("M-1.5-.5L1e1,+2E-1 .5.25").unwrap();
        assert_eq!(
            segs,
            vec![
                Segment::MoveTo(p(-1.5, -0.5)),
                Segment::LineTo(p(10.0, 0.2)),
                Segment::LineTo(p(0.5, 0.25)),
            ]
        );
    }

    #[test]
    fn smooth_cubic_reflects_control_point() {
        let segs = parse("M0 0 C0 10 10 10 10 0 S20 -10 20 0").unwrap();
        assert_eq!(
            segs[2],
            Segment::CubicTo(p(10.0, -10.0), p(20.0, -10.0), p(20.0, 0.0))
        );
    }

    #[test]
    fn quadratic_is_elevated_to_cubic() {
        let segs = parse("M0 0 Q3 3 6 0").unwrap();
        assert_eq!(
            segs[1],
            Segment::CubicTo(p(2.0, 2.0), p(4.0, 2.0), p(6.0, 0.0))
        );
    }

    #[test]
    fn arc_ends_exactly_at_target() {
        let segs = parse("M0 10 A10 10 0 0 1 20 10").unwrap();
        // A half turn needs two quarter-turn cubics.
        assert_eq!(segs.len(), 3);
        match segs[2] {
            Segment::CubicTo(_, _, end) => assert_eq!(end, p(20.0, 10.0)),
            other => panic!("expected cubic, got {other:?}"),
        }
        // Sweep flag 1 bulges toward negative y (clockwise on screen).
        match segs[1] {
            Segment::CubicTo(_, _, mid) => {
                assert!((mid.x - 10.0).abs() < 1e-3);
                assert!((mid.y - 0.0).abs() < 1e-3);
            }
            other => panic!("expected cubic, got {other:?}"),
        }
    }

    #[test]
    fn compact_arc_flags() {
        let segs = parse("M0 0a5 5 0 1010 0").unwrap();
        assert!(matches!(segs.last(), Some(Segment::CubicTo(_, _, end)) if *end == p(10.0, 0.0)));
    }

    #[test]
    fn zero_radius_arc_is_a_line() {
        let segs = parse("M0 0 A0 5 0 0 1 4 4").unwrap();
        assert_eq!(segs[1], Segment::LineTo(p(4.0, 4.0)));
    }

    #[test]
    fn empty_path_has_no_segments() {
        assert!(parse("   ").unwrap().is_empty());
    }

    #[test]
    fn rejects_close_without_subpath() {
        assert_eq!(
            parse("Z Q 1"),
            Err(PathDataError::UnmatchedClose { offset: 0 })
        );
    }

    #[test]
    fn rejects_missing_moveto() {
        assert_eq!(
            parse("L 1 1"),
            Err(PathDataError::MissingMoveTo { found: 'L' })
        );
    }

    #[test]
    fn rejects_incomplete_coordinates() {
        assert!(matches!(
            parse("M0 0 Q 1"),
            Err(PathDataError::MissingCoordinates { command: 'Q', .. })
        ));
        assert!(matches!(
            parse("M0 0 L"),
            Err(PathDataError::MissingCoordinates { command: 'L', .. })
        ));
    }

    #[test]
    fn rejects_unknown_command_and_garbage() {
        assert!(matches!(
            parse("M0 0 X 1 1"),
            Err(PathDataError::UnknownCommand { command: 'X', .. })
        ));
        assert!(matches!(
            parse("M0 0 #"),
            Err(PathDataError::UnknownCommand { command: '#', .. })
        ));
        assert!(matches!(
            parse("M0 0 L . 1"),
            Err(PathDataError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn rejects_bad_arc_flag() {
        assert!(matches!(
            parse("M0 0 A5 5 0 2 1 10 0"),
            Err(PathDataError::InvalidFlag { .. })
        ));
    }

    #[test]
    fn number_list() {
        assert_eq!(
            parse_number_list("0 0, 24 -1e1").unwrap(),
            vec![0.0, 0.0, 24.0, -10.0]
        );
        assert!(parse_number_list("1 x").is_err());
    }
}
