//! Frontal boundary iconography.
//!
//! Fronts are drawn in pixel space along an already-projected polyline.
//! Glyphs sit on the left of the direction of travel, which is the side the
//! coded bulletin lists points for.

use std::f32::consts::PI;

use crate::canvas::{pixel_path, LineStyle, MapCanvas};
use crate::color::{Rgba, BLUE, PURPLE, RED};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontKind {
    Warm,
    Cold,
    Occluded,
    Stationary,
}

impl FrontKind {
    pub fn color(&self) -> Rgba {
        match self {
            FrontKind::Warm => RED,
            FrontKind::Cold => BLUE,
            FrontKind::Occluded => PURPLE,
            FrontKind::Stationary => RED,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FrontStyle {
    pub line_width: f32,
    /// Distance between glyph centers along the line.
    pub spacing: f32,
    /// Half-width of a glyph's base, and its height.
    pub size: f32,
}

impl Default for FrontStyle {
    fn default() -> Self {
        Self {
            line_width: 2.5,
            spacing: 36.0,
            size: 7.0,
        }
    }
}

/// Position on a polyline plus the unit direction of travel there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
}

impl Marker {
    /// Unit normal to the left of travel (screen coordinates, y down).
    pub fn left_normal(&self) -> (f32, f32) {
        (self.dy, -self.dx)
    }
}

fn segment_length(a: (f32, f32), b: (f32, f32)) -> f32 {
    ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt()
}

pub fn polyline_length(points: &[(f32, f32)]) -> f32 {
    points.windows(2).map(|w| segment_length(w[0], w[1])).sum()
}

/// Markers every `spacing` pixels, starting `offset` pixels in.
pub fn markers_along(points: &[(f32, f32)], spacing: f32, offset: f32) -> Vec<Marker> {
    let mut markers = Vec::new();
    if spacing <= 0.0 {
        return markers;
    }

    let mut next = offset;
    let mut travelled = 0.0;
    for w in points.windows(2) {
        let (a, b) = (w[0], w[1]);
        let len = segment_length(a, b);
        if len <= f32::EPSILON {
            continue;
        }
        let (dx, dy) = ((b.0 - a.0) / len, (b.1 - a.1) / len);
        while next <= travelled + len {
            let t = next - travelled;
            markers.push(Marker {
                x: a.0 + dx * t,
                y: a.1 + dy * t,
                dx,
                dy,
            });
            next += spacing;
        }
        travelled += len;
    }
    markers
}

/// Cut a polyline into consecutive pieces of `length` pixels.
pub fn split_by_length(points: &[(f32, f32)], length: f32) -> Vec<Vec<(f32, f32)>> {
    let mut pieces = Vec::new();
    if points.len() < 2 || length <= 0.0 {
        return pieces;
    }

    let mut current = vec![points[0]];
    let mut remaining = length;
    for w in points.windows(2) {
        let (mut a, b) = (w[0], w[1]);
        let mut len = segment_length(a, b);
        while len > remaining {
            let t = remaining / len;
            let cut = (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t);
            current.push(cut);
            pieces.push(std::mem::replace(&mut current, vec![cut]));
            a = cut;
            len -= remaining;
            remaining = length;
        }
        current.push(b);
        remaining -= len;
    }
    if current.len() > 1 {
        pieces.push(current);
    }
    pieces
}

fn triangle(m: &Marker, size: f32, flip: bool) -> Vec<(f32, f32)> {
    let (nx, ny) = side_normal(m, flip);
    vec![
        (m.x - m.dx * size, m.y - m.dy * size),
        (m.x + m.dx * size, m.y + m.dy * size),
        (m.x + nx * size * 1.4, m.y + ny * size * 1.4),
    ]
}

fn semicircle(m: &Marker, radius: f32, flip: bool) -> Vec<(f32, f32)> {
    let (nx, ny) = side_normal(m, flip);
    (0..=16)
        .map(|i| {
            let theta = PI * i as f32 / 16.0;
            let (c, s) = (theta.cos(), theta.sin());
            (
                m.x + m.dx * radius * c + nx * radius * s,
                m.y + m.dy * radius * c + ny * radius * s,
            )
        })
        .collect()
}

fn side_normal(m: &Marker, flip: bool) -> (f32, f32) {
    let (nx, ny) = m.left_normal();
    if flip {
        (-nx, -ny)
    } else {
        (nx, ny)
    }
}

fn fill_glyph(canvas: &mut MapCanvas, outline: &[(f32, f32)], color: Rgba) {
    if let Some(path) = pixel_path(outline, true) {
        canvas.fill_path(&path, color);
    }
}

/// Draw a front along pixel-space `points`.
pub fn draw_front(canvas: &mut MapCanvas, points: &[(f32, f32)], kind: FrontKind, style: &FrontStyle) {
    if points.len() < 2 {
        return;
    }

    if kind == FrontKind::Stationary {
        draw_stationary(canvas, points, style);
        return;
    }

    let color = kind.color();
    if let Some(path) = pixel_path(points, false) {
        canvas.stroke_path(&path, &LineStyle::solid(color, style.line_width));
    }

    let markers = markers_along(points, style.spacing, style.spacing / 2.0);
    for (i, m) in markers.iter().enumerate() {
        let outline = match kind {
            FrontKind::Cold => triangle(m, style.size, false),
            FrontKind::Warm => semicircle(m, style.size, false),
            _ if i % 2 == 0 => triangle(m, style.size, false),
            _ => semicircle(m, style.size, false),
        };
        fill_glyph(canvas, &outline, color);
    }
}

/// Alternating cold (blue, triangles on the left) and warm (red, semicircles
/// on the right) pieces.
fn draw_stationary(canvas: &mut MapCanvas, points: &[(f32, f32)], style: &FrontStyle) {
    for (i, piece) in split_by_length(points, style.spacing).iter().enumerate() {
        let cold = i % 2 == 0;
        let color = if cold { BLUE } else { RED };
        if let Some(path) = pixel_path(piece, false) {
            canvas.stroke_path(&path, &LineStyle::solid(color, style.line_width));
        }

        let length = polyline_length(piece);
        if length < style.size * 2.0 {
            continue;
        }
        if let Some(m) = markers_along(piece, length, length / 2.0).first() {
            let outline = if cold {
                triangle(m, style.size, false)
            } else {
                semicircle(m, style.size, true)
            };
            fill_glyph(canvas, &outline, color);
        }
    }
}
