//! Sink strategies for finished products.
//!
//! `HelperSink` feeds the display system: it writes metadata records and
//! stamps a title band on every image. `PlainSink` writes bare images only.
//! Both write images through [`write_atomic`].

use std::fmt;
use std::path::Path;
use std::rc::Rc;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use image::{Rgba as Pixel, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use renderer::color::{BLACK, WHITE};
use renderer::FontBook;
use tracing::{debug, info};
use wx_common::valid_line;

use crate::error::{Result, StorageError};
use crate::fs::write_atomic;
use crate::metadata::ProductMetadata;

pub use renderer::canvas::DRESS_BAND_HEIGHT;

const TITLE_PX: f32 = 30.0;
const SUBTITLE_PX: f32 = 20.0;
const ATTRIBUTION: &str = "HDWX";

/// How finished images leave the pipeline.
pub trait ProductSink {
    fn name(&self) -> &'static str;

    /// Record an image for the display system before it is saved.
    fn write_metadata(&self, base_path: &Path, metadata: &ProductMetadata) -> Result<()>;

    /// Stamp title and validity on the bottom band of `image`.
    fn dress(
        &self,
        image: &mut RgbaImage,
        title: &str,
        reference: DateTime<Utc>,
        through: Option<DateTime<Utc>>,
    );

    /// Encode `image` as PNG and move it into place at `path`.
    fn save(&self, image: &RgbaImage, path: &Path) -> Result<()> {
        let png = renderer::png::encode_image(image)?;
        write_atomic(path, &png)?;
        info!(path = %path.display(), bytes = png.len(), "Saved product image");
        Ok(())
    }
}

/// Metadata plus decorated images.
pub struct HelperSink {
    font: Rc<FontBook>,
}

impl HelperSink {
    pub fn new(font: Rc<FontBook>) -> Self {
        Self { font }
    }
}

impl ProductSink for HelperSink {
    fn name(&self) -> &'static str {
        "helpers"
    }

    fn write_metadata(&self, base_path: &Path, metadata: &ProductMetadata) -> Result<()> {
        metadata.write(base_path)?;
        Ok(())
    }

    fn dress(
        &self,
        image: &mut RgbaImage,
        title: &str,
        reference: DateTime<Utc>,
        through: Option<DateTime<Utc>>,
    ) {
        let (width, height) = image.dimensions();
        let band = DRESS_BAND_HEIGHT.min(height);
        let top = height - band;
        if band > 0 && width > 0 {
            draw_filled_rect_mut(image, Rect::at(0, top as i32).of_size(width, band), Pixel(WHITE));
        }
        for x in 0..width {
            image.put_pixel(x, top, Pixel(BLACK));
        }

        let x = 20;
        let title_y = top as i32 + 12;
        self.font.draw_text(image, title, x, title_y, TITLE_PX, BLACK);
        let subtitle_y = title_y + (TITLE_PX * 1.4) as i32;
        self.font
            .draw_text(image, &valid_line(reference, through), x, subtitle_y, SUBTITLE_PX, BLACK);

        let (w, _) = self.font.text_size(ATTRIBUTION, SUBTITLE_PX);
        let attr_x = width as i32 - w as i32 - 20;
        self.font
            .draw_text(image, ATTRIBUTION, attr_x, subtitle_y, SUBTITLE_PX, BLACK);
        debug!(title, "Dressed image");
    }
}

/// Bare images, no metadata, no decoration.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainSink;

impl ProductSink for PlainSink {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn write_metadata(&self, _base_path: &Path, _metadata: &ProductMetadata) -> Result<()> {
        Ok(())
    }

    fn dress(
        &self,
        _image: &mut RgbaImage,
        _title: &str,
        _reference: DateTime<Utc>,
        _through: Option<DateTime<Utc>>,
    ) {
    }
}

/// Sink selection from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SinkMode {
    /// Helpers when `<base>/output/metadata` exists, otherwise plain.
    #[default]
    Auto,
    Helpers,
    Plain,
}

impl SinkMode {
    /// Resolve `Auto` against the output tree under `base_path`.
    pub fn resolve(self, base_path: &Path) -> SinkMode {
        match self {
            SinkMode::Auto => {
                if base_path.join("output").join("metadata").is_dir() {
                    SinkMode::Helpers
                } else {
                    SinkMode::Plain
                }
            }
            other => other,
        }
    }

    /// Build the sink this mode selects.
    pub fn build(self, base_path: &Path, font: Rc<FontBook>) -> Box<dyn ProductSink> {
        let sink: Box<dyn ProductSink> = match self.resolve(base_path) {
            SinkMode::Helpers => Box::new(HelperSink::new(font)),
            _ => Box::new(PlainSink),
        };
        info!(requested = %self, sink = sink.name(), "Selected product sink");
        sink
    }
}

impl FromStr for SinkMode {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(SinkMode::Auto),
            "helpers" => Ok(SinkMode::Helpers),
            "plain" => Ok(SinkMode::Plain),
            _ => Err(StorageError::UnknownSinkMode(s.to_string())),
        }
    }
}

impl fmt::Display for SinkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SinkMode::Auto => "auto",
            SinkMode::Helpers => "helpers",
            SinkMode::Plain => "plain",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modes() {
        assert_eq!("auto".parse::<SinkMode>().unwrap(), SinkMode::Auto);
        assert_eq!("Helpers".parse::<SinkMode>().unwrap(), SinkMode::Helpers);
        assert_eq!("plain".parse::<SinkMode>().unwrap(), SinkMode::Plain);
        assert!("fancy".parse::<SinkMode>().is_err());
    }

    #[test]
    fn test_auto_resolution() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(SinkMode::Auto.resolve(dir.path()), SinkMode::Plain);
        std::fs::create_dir_all(dir.path().join("output/metadata")).unwrap();
        assert_eq!(SinkMode::Auto.resolve(dir.path()), SinkMode::Helpers);
        assert_eq!(SinkMode::Plain.resolve(dir.path()), SinkMode::Plain);
    }

    #[test]
    fn test_plain_dress_is_noop() {
        let mut image = RgbaImage::from_pixel(10, 10, Pixel([1, 2, 3, 255]));
        let before = image.clone();
        PlainSink.dress(&mut image, "Title", Utc::now(), None);
        assert_eq!(image, before);
    }
}
