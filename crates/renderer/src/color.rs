//! Color parsing for source-supplied and named colors.
//!
//! Outlook shapefiles carry `#RRGGBB` strings; the bulletin styling uses a
//! handful of named colors.

use crate::error::{RenderError, Result};

/// Straight (non-premultiplied) RGBA color.
pub type Rgba = [u8; 4];

pub const BLACK: Rgba = [0, 0, 0, 255];
pub const WHITE: Rgba = [255, 255, 255, 255];
pub const TRANSPARENT: Rgba = [0, 0, 0, 0];
pub const BLUE: Rgba = [0, 0, 255, 255];
pub const RED: Rgba = [255, 0, 0, 255];
pub const DARK_ORANGE: Rgba = [255, 140, 0, 255];
pub const PURPLE: Rgba = [128, 0, 128, 255];
pub const GRAY: Rgba = [128, 128, 128, 255];

/// Named colors accepted by [`parse_color`].
const NAMED_COLORS: &[(&str, Rgba)] = &[
    ("black", BLACK),
    ("white", WHITE),
    ("blue", BLUE),
    ("red", RED),
    ("darkorange", DARK_ORANGE),
    ("purple", PURPLE),
    ("gray", GRAY),
    ("grey", GRAY),
    ("green", [0, 128, 0, 255]),
    ("brown", [165, 42, 42, 255]),
    ("none", TRANSPARENT),
    ("transparent", TRANSPARENT),
];

/// Parse `#RGB`, `#RRGGBB`, `#RRGGBBAA` or a named color.
pub fn parse_color(value: &str) -> Result<Rgba> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| RenderError::InvalidColor(value.to_string()));
    }

    let lower = value.to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, rgba)| *rgba)
        .ok_or_else(|| RenderError::InvalidColor(value.to_string()))
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let r = channel(&hex[0..1])?;
            let g = channel(&hex[1..2])?;
            let b = channel(&hex[2..3])?;
            Some([r * 17, g * 17, b * 17, 255])
        }
        6 => Some([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            255,
        ]),
        8 => Some([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            channel(&hex[6..8])?,
        ]),
        _ => None,
    }
}

/// Convert to a tiny-skia color.
pub fn to_skia(color: Rgba) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color[0], color[1], color[2], color[3])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_color("#FF0000").unwrap(), RED);
        assert_eq!(parse_color("#c1e9c1").unwrap(), [193, 233, 193, 255]);
        assert_eq!(parse_color("#fff").unwrap(), WHITE);
        assert_eq!(parse_color("#00000080").unwrap(), [0, 0, 0, 128]);
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(parse_color("darkorange").unwrap(), DARK_ORANGE);
        assert_eq!(parse_color("Blue").unwrap(), BLUE);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("#gg0000").is_err());
        assert!(parse_color("chartreuse-ish").is_err());
    }
}
