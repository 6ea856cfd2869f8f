//! Station-model sky cover symbol.

use std::f32::consts::PI;

use tiny_skia::PathBuilder;

use crate::canvas::{pixel_path, LineStyle, MapCanvas};
use crate::color::{Rgba, BLACK, WHITE};

/// Reported cloud amount, from the most opaque layer of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkyCover {
    Clear,
    Few,
    Scattered,
    Broken,
    Overcast,
    /// Sky obscured (vertical visibility)
    Obscured,
}

impl SkyCover {
    /// Parse a METAR cloud group prefix such as `BKN` or `VV`.
    pub fn from_metar(code: &str) -> Option<Self> {
        match code {
            "SKC" | "CLR" | "NSC" | "NCD" | "CAVOK" => Some(SkyCover::Clear),
            "FEW" => Some(SkyCover::Few),
            "SCT" => Some(SkyCover::Scattered),
            "BKN" => Some(SkyCover::Broken),
            "OVC" => Some(SkyCover::Overcast),
            "VV" => Some(SkyCover::Obscured),
            _ => None,
        }
    }

    /// Filled fraction of the station circle.
    pub fn filled_fraction(&self) -> f32 {
        match self {
            SkyCover::Clear | SkyCover::Obscured => 0.0,
            SkyCover::Few => 0.25,
            SkyCover::Scattered => 0.5,
            SkyCover::Broken => 0.75,
            SkyCover::Overcast => 1.0,
        }
    }
}

/// Draw the station circle with its cloud fill at pixel position (`x`, `y`).
pub fn draw_sky_cover(canvas: &mut MapCanvas, x: f32, y: f32, radius: f32, cover: SkyCover) {
    draw_sky_cover_colored(canvas, x, y, radius, cover, BLACK);
}

pub fn draw_sky_cover_colored(
    canvas: &mut MapCanvas,
    x: f32,
    y: f32,
    radius: f32,
    cover: SkyCover,
    color: Rgba,
) {
    let Some(circle) = PathBuilder::from_circle(x, y, radius) else {
        return;
    };
    canvas.fill_path(&circle, WHITE);

    let fraction = cover.filled_fraction();
    if fraction >= 1.0 {
        canvas.fill_path(&circle, color);
    } else if fraction > 0.0 {
        // Wedge clockwise from north
        let steps = (32.0 * fraction).ceil() as usize;
        let sweep = 2.0 * PI * fraction;
        let mut wedge = vec![(x, y)];
        for i in 0..=steps {
            let a = sweep * i as f32 / steps as f32;
            wedge.push((x + radius * a.sin(), y - radius * a.cos()));
        }
        if let Some(path) = pixel_path(&wedge, true) {
            canvas.fill_path(&path, color);
        }
    }

    let style = LineStyle::solid(color, 1.2);
    if cover == SkyCover::Obscured {
        let d = radius * std::f32::consts::FRAC_1_SQRT_2;
        for (a, b) in [((-d, -d), (d, d)), ((-d, d), (d, -d))] {
            if let Some(path) = pixel_path(&[(x + a.0, y + a.1), (x + b.0, y + b.1)], false) {
                canvas.stroke_path(&path, &style);
            }
        }
    }
    canvas.stroke_path(&circle, &style);
}
