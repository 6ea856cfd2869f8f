//! Procedural wind barbs for station plots.
//!
//! Northern-hemisphere convention: the staff points toward the direction the
//! wind blows from and feathers sit clockwise of the staff. Speeds round to
//! the nearest 5 knots; 50 kt pennants, 10 kt full barbs, 5 kt half barbs.

use crate::canvas::{pixel_path, LineStyle, MapCanvas};
use crate::color::{Rgba, BLACK};

/// Configuration for wind barb rendering
#[derive(Debug, Clone)]
pub struct BarbConfig {
    /// Staff length in pixels
    pub length: f32,
    /// Line width of staff and feathers
    pub line_width: f32,
    pub color: Rgba,
}

impl Default for BarbConfig {
    fn default() -> Self {
        Self {
            length: 28.0,
            line_width: 1.5,
            color: BLACK,
        }
    }
}

/// Feather counts for a wind speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BarbElements {
    pub pennants: u32,
    pub full: u32,
    pub half: u32,
}

impl BarbElements {
    pub fn from_speed(speed_kt: f64) -> Self {
        let rounded = ((speed_kt.max(0.0) / 5.0).round() * 5.0) as u32;
        let pennants = rounded / 50;
        let rest = rounded % 50;
        Self {
            pennants,
            full: rest / 10,
            half: u32::from(rest % 10 >= 5),
        }
    }

    pub fn is_calm(&self) -> bool {
        *self == Self::default()
    }
}

/// Draw one barb at pixel position (`x`, `y`).
///
/// `direction_deg` is the meteorological direction the wind comes from.
pub fn draw_barb(
    canvas: &mut MapCanvas,
    x: f32,
    y: f32,
    direction_deg: f64,
    speed_kt: f64,
    config: &BarbConfig,
) {
    let elements = BarbElements::from_speed(speed_kt);
    let style = LineStyle::solid(config.color, config.line_width);

    if elements.is_calm() {
        let r = config.length * 0.3;
        if let Some(path) = tiny_skia::PathBuilder::from_circle(x, y, r) {
            canvas.stroke_path(&path, &style);
        }
        return;
    }

    // Unit vector along the staff, outward from the station (y down)
    let theta = (direction_deg as f32).to_radians();
    let (ux, uy) = (theta.sin(), -theta.cos());
    // Feathers point clockwise of the staff
    let (fx, fy) = (-uy, ux);

    let len = config.length;
    let tip = (x + ux * len, y + uy * len);
    if let Some(path) = pixel_path(&[(x, y), tip], false) {
        canvas.stroke_path(&path, &style);
    }

    let feather = len * 0.45;
    let step = len * 0.14;
    let at = |d: f32| (x + ux * (len - d), y + uy * (len - d));
    let mut d = 0.0;

    for _ in 0..elements.pennants {
        let base = at(d);
        let next = at(d + step * 1.4);
        let outer = (
            base.0 + fx * feather + ux * step * 0.3,
            base.1 + fy * feather + uy * step * 0.3,
        );
        if let Some(path) = pixel_path(&[base, outer, next], true) {
            canvas.fill_path(&path, config.color);
        }
        d += step * 1.8;
    }

    for _ in 0..elements.full {
        draw_feather(canvas, at(d), (fx, fy), (ux, uy), feather, &style);
        d += step;
    }

    if elements.half > 0 {
        // A lone half barb sits one step in from the tip
        if elements.pennants == 0 && elements.full == 0 {
            d += step;
        }
        draw_feather(canvas, at(d), (fx, fy), (ux, uy), feather / 2.0, &style);
    }
}

fn draw_feather(
    canvas: &mut MapCanvas,
    base: (f32, f32),
    (fx, fy): (f32, f32),
    (ux, uy): (f32, f32),
    length: f32,
    style: &LineStyle,
) {
    let end = (
        base.0 + fx * length + ux * length * 0.35,
        base.1 + fy * length + uy * length * 0.35,
    );
    if let Some(path) = pixel_path(&[base, end], false) {
        canvas.stroke_path(&path, style);
    }
}
