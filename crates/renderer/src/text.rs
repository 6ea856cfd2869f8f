//! Text drawing on finished map images.
//!
//! Labels use DejaVu Sans compiled into the binary, so titles, legends and
//! annotations render the same on every host. A different TrueType font can
//! be supplied at startup.

use std::path::Path;

use image::{Rgba as Pixel, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use rusttype::{Font, Scale};
use tracing::debug;

use crate::color::Rgba;
use crate::error::{RenderError, Result};

/// Embedded font data - DejaVu Sans
const FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Line spacing relative to the font size.
const LINE_HEIGHT: f32 = 1.25;

pub struct FontBook {
    font: Font<'static>,
}

impl FontBook {
    /// Load `explicit` if given, otherwise the embedded font.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                let data = std::fs::read(path)
                    .map_err(|e| RenderError::Font(format!("{}: {}", path.display(), e)))?;
                debug!(path = %path.display(), "Loaded font");
                Self::from_bytes(data)
            }
            None => Self::embedded(),
        }
    }

    /// The compiled-in DejaVu Sans.
    pub fn embedded() -> Result<Self> {
        let font = Font::try_from_bytes(FONT_DATA)
            .ok_or_else(|| RenderError::Font("embedded font is unreadable".to_string()))?;
        Ok(Self { font })
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = Font::try_from_vec(data)
            .ok_or_else(|| RenderError::Font("not a TrueType font".to_string()))?;
        Ok(Self { font })
    }

    /// Width and height of a single line in pixels.
    pub fn text_size(&self, text: &str, px: f32) -> (u32, u32) {
        let (w, _) = text_size(Scale::uniform(px), &self.font, text);
        (w.max(0) as u32, px.ceil() as u32)
    }

    /// Width and height of `\n`-separated text.
    pub fn block_size(&self, text: &str, px: f32) -> (u32, u32) {
        let lines: Vec<&str> = text.lines().collect();
        let width = lines
            .iter()
            .map(|line| self.text_size(line, px).0)
            .max()
            .unwrap_or(0);
        let height = if lines.is_empty() {
            0.0
        } else {
            (lines.len() - 1) as f32 * px * LINE_HEIGHT + px
        };
        (width, height.ceil() as u32)
    }

    /// Draw one line with its top-left corner at (`x`, `y`).
    pub fn draw_text(&self, image: &mut RgbaImage, text: &str, x: i32, y: i32, px: f32, color: Rgba) {
        draw_text_mut(image, Pixel(color), x, y, Scale::uniform(px), &self.font, text);
    }

    /// Draw `\n`-separated text starting at (`x`, `y`).
    pub fn draw_block(&self, image: &mut RgbaImage, text: &str, x: i32, y: i32, px: f32, color: Rgba) {
        for (i, line) in text.lines().enumerate() {
            let line_y = y + (i as f32 * px * LINE_HEIGHT).round() as i32;
            self.draw_text(image, line, x, line_y, px, color);
        }
    }

    /// Draw one line centered on (`cx`, `cy`).
    pub fn draw_centered(&self, image: &mut RgbaImage, text: &str, cx: f32, cy: f32, px: f32, color: Rgba) {
        let (w, h) = self.text_size(text, px);
        let x = (cx - w as f32 / 2.0).round() as i32;
        let y = (cy - h as f32 / 2.0).round() as i32;
        self.draw_text(image, text, x, y, px, color);
    }

    /// Draw text surrounded by a `halo`-colored outline for contrast over
    /// busy backgrounds.
    pub fn draw_with_halo(
        &self,
        image: &mut RgbaImage,
        text: &str,
        x: i32,
        y: i32,
        px: f32,
        color: Rgba,
        halo: Rgba,
    ) {
        for dy in -2..=2 {
            for dx in -2..=2 {
                if dx != 0 || dy != 0 {
                    self.draw_text(image, text, x + dx, y + dy, px, halo);
                }
            }
        }
        self.draw_text(image, text, x, y, px, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLACK, WHITE};

    fn dark_pixels(image: &RgbaImage) -> usize {
        image.pixels().filter(|p| p.0[0] < 128).count()
    }

    #[test]
    fn test_embedded_font_draws_words() {
        let book = FontBook::embedded().unwrap();
        let mut image = RgbaImage::from_pixel(120, 30, Pixel(WHITE));
        book.draw_text(&mut image, "Slight", 2, 2, 16.0, BLACK);
        assert!(dark_pixels(&image) > 0);
    }

    #[test]
    fn test_text_size_grows_with_length() {
        let book = FontBook::embedded().unwrap();
        let (short, h) = book.text_size("No", 20.0);
        let (long, _) = book.text_size("No areas", 20.0);
        assert!(long > short);
        assert_eq!(h, 20);
    }

    #[test]
    fn test_block_size_counts_lines() {
        let book = FontBook::embedded().unwrap();
        let (_, one) = book.block_size("1", 10.0);
        let (_, two) = book.block_size("1\n2", 10.0);
        assert!(two > one);
    }

    #[test]
    fn test_centered_text_straddles_center() {
        let book = FontBook::embedded().unwrap();
        let mut image = RgbaImage::from_pixel(200, 60, Pixel(WHITE));
        book.draw_centered(&mut image, "HHHH", 100.0, 30.0, 24.0, BLACK);
        let left = (0..100).any(|x| image.get_pixel(x, 30).0[0] < 128);
        let right = (100..200).any(|x| image.get_pixel(x, 30).0[0] < 128);
        assert!(left && right);
    }

    #[test]
    fn test_explicit_missing_font_is_error() {
        assert!(FontBook::load(Some(Path::new("/nonexistent/font.ttf"))).is_err());
        assert!(FontBook::from_bytes(vec![0, 1, 2, 3]).is_err());
        assert!(FontBook::load(None).is_ok());
    }
}
