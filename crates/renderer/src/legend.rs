//! Legend boxes and centered annotations for outlook maps.

use image::{Rgba as Pixel, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;
use projection::PixelRect;

use crate::color::{Rgba, BLACK, WHITE};
use crate::text::FontBook;

/// Sample drawn to the left of a legend label.
#[derive(Debug, Clone, PartialEq)]
pub enum Swatch {
    /// Informational row, text only
    None,
    Filled { fill: Rgba, stroke: Rgba },
    /// Outline with `/` diagonal hatching, no fill
    Hatched { stroke: Rgba },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub swatch: Swatch,
}

impl LegendEntry {
    pub fn header(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            swatch: Swatch::None,
        }
    }

    pub fn filled(label: impl Into<String>, fill: Rgba, stroke: Rgba) -> Self {
        Self {
            label: label.into(),
            swatch: Swatch::Filled { fill, stroke },
        }
    }

    pub fn hatched(label: impl Into<String>, stroke: Rgba) -> Self {
        Self {
            label: label.into(),
            swatch: Swatch::Hatched { stroke },
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LegendStyle {
    pub font_px: f32,
    pub padding: u32,
    pub swatch_width: u32,
    pub swatch_height: u32,
    pub row_gap: u32,
    /// Distance from the map corner.
    pub margin: u32,
    pub hatch_spacing: u32,
}

impl Default for LegendStyle {
    fn default() -> Self {
        Self {
            font_px: 18.0,
            padding: 10,
            swatch_width: 36,
            swatch_height: 18,
            row_gap: 6,
            margin: 12,
            hatch_spacing: 6,
        }
    }
}

fn row_height(font: &FontBook, entry: &LegendEntry, style: &LegendStyle) -> u32 {
    let (_, text_h) = font.block_size(&entry.label, style.font_px);
    match entry.swatch {
        Swatch::None => text_h,
        _ => text_h.max(style.swatch_height),
    }
}

fn row_width(font: &FontBook, entry: &LegendEntry, style: &LegendStyle) -> u32 {
    let (text_w, _) = font.block_size(&entry.label, style.font_px);
    match entry.swatch {
        Swatch::None => text_w,
        _ => style.swatch_width + style.padding + text_w,
    }
}

/// Outer size of the legend box.
pub fn legend_size(font: &FontBook, entries: &[LegendEntry], style: &LegendStyle) -> (u32, u32) {
    let width = entries
        .iter()
        .map(|e| row_width(font, e, style))
        .max()
        .unwrap_or(0);
    let rows: u32 = entries.iter().map(|e| row_height(font, e, style)).sum();
    let gaps = style.row_gap * entries.len().saturating_sub(1) as u32;
    (width + 2 * style.padding, rows + gaps + 2 * style.padding)
}

/// Draw a legend box anchored to the lower-right corner of `map`.
///
/// Returns the box position and size.
pub fn draw_legend(
    image: &mut RgbaImage,
    font: &FontBook,
    entries: &[LegendEntry],
    map: PixelRect,
    style: &LegendStyle,
) -> Option<Rect> {
    if entries.is_empty() {
        return None;
    }
    let (w, h) = legend_size(font, entries, style);
    if w == 0 || h == 0 {
        return None;
    }
    let x = (map.right() as i32) - style.margin as i32 - w as i32;
    let y = (map.bottom() as i32) - style.margin as i32 - h as i32;
    let frame = Rect::at(x, y).of_size(w, h);

    draw_filled_rect_mut(image, frame, Pixel(WHITE));
    draw_hollow_rect_mut(image, frame, Pixel(BLACK));

    let mut row_y = y + style.padding as i32;
    let left = x + style.padding as i32;
    for entry in entries {
        let row_h = row_height(font, entry, style);
        let mut text_x = left;
        match entry.swatch {
            Swatch::None => {}
            Swatch::Filled { fill, stroke } => {
                let swatch = swatch_rect(left, row_y, row_h, style);
                draw_filled_rect_mut(image, swatch, Pixel(fill));
                draw_hollow_rect_mut(image, swatch, Pixel(stroke));
                text_x += (style.swatch_width + style.padding) as i32;
            }
            Swatch::Hatched { stroke } => {
                let swatch = swatch_rect(left, row_y, row_h, style);
                hatch_rect(image, swatch, stroke, style.hatch_spacing);
                draw_hollow_rect_mut(image, swatch, Pixel(stroke));
                text_x += (style.swatch_width + style.padding) as i32;
            }
        }
        let (_, text_h) = font.block_size(&entry.label, style.font_px);
        let text_y = row_y + (row_h as i32 - text_h as i32) / 2;
        font.draw_block(image, &entry.label, text_x, text_y, style.font_px, BLACK);
        row_y += (row_h + style.row_gap) as i32;
    }

    Some(frame)
}

fn swatch_rect(left: i32, row_y: i32, row_h: u32, style: &LegendStyle) -> Rect {
    let top = row_y + (row_h as i32 - style.swatch_height as i32) / 2;
    Rect::at(left, top).of_size(style.swatch_width.max(1), style.swatch_height.max(1))
}

/// Paint `/` diagonals inside `rect`.
fn hatch_rect(image: &mut RgbaImage, rect: Rect, color: Rgba, spacing: u32) {
    let spacing = spacing.max(2) as i32;
    for j in 0..rect.height() as i32 {
        for i in 0..rect.width() as i32 {
            if (i + j).rem_euclid(spacing) != 0 {
                continue;
            }
            let (px, py) = (rect.left() + i, rect.top() + j);
            if px >= 0 && py >= 0 && (px as u32) < image.width() && (py as u32) < image.height() {
                image.put_pixel(px as u32, py as u32, Pixel(color));
            }
        }
    }
}

/// Draw `text` centered in `area` on a white box.
pub fn draw_annotation(image: &mut RgbaImage, font: &FontBook, text: &str, area: PixelRect, px: f32) {
    let (w, h) = font.text_size(text, px);
    let (cx, cy) = area.center();
    let pad = 12;
    if w > 0 && h > 0 {
        let frame = Rect::at(
            (cx - w as f64 / 2.0) as i32 - pad,
            (cy - h as f64 / 2.0) as i32 - pad,
        )
        .of_size(w + 2 * pad as u32, h + 2 * pad as u32);
        draw_filled_rect_mut(image, frame, Pixel(WHITE));
        draw_hollow_rect_mut(image, frame, Pixel(BLACK));
    }
    font.draw_centered(image, text, cx as f32, cy as f32, px, BLACK);
}
