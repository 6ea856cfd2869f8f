//! Drawing tests for the map canvas and its layers.

use image::Rgba as Pixel;
use projection::{MapView, PixelRect, Projection};
use renderer::barbs::{draw_barb, BarbConfig};
use renderer::color::{BLACK, BLUE, RED, TRANSPARENT, WHITE};
use renderer::fronts::{draw_front, FrontKind, FrontStyle};
use renderer::sky::{draw_sky_cover, SkyCover};
use renderer::MapCanvas;
use wx_common::CONUS_EXTENT;

fn conus_canvas(background: [u8; 4]) -> MapCanvas {
    let view = MapView::fit(
        Projection::lambert_conus(),
        CONUS_EXTENT,
        PixelRect::new(20.0, 20.0, 760.0, 420.0),
    );
    MapCanvas::new(800, 480, view, background).unwrap()
}

fn count(image: &image::RgbaImage, color: [u8; 4]) -> usize {
    image.pixels().filter(|p| **p == Pixel(color)).count()
}

// ============================================================================
// Front tests
// ============================================================================

#[test]
fn test_cold_front_is_blue() {
    let mut canvas = conus_canvas(WHITE);
    let line = canvas.project_line(&[(-100.0, 30.0), (-95.0, 35.0), (-90.0, 40.0)]);
    draw_front(&mut canvas, &line, FrontKind::Cold, &FrontStyle::default());
    let image = canvas.into_image().unwrap();
    assert!(count(&image, BLUE) > 0);
    assert_eq!(count(&image, RED), 0);
}

#[test]
fn test_stationary_front_uses_both_colors() {
    let mut canvas = conus_canvas(WHITE);
    let line = canvas.project_line(&[(-110.0, 40.0), (-90.0, 40.0), (-80.0, 42.0)]);
    draw_front(&mut canvas, &line, FrontKind::Stationary, &FrontStyle::default());
    let image = canvas.into_image().unwrap();
    assert!(count(&image, BLUE) > 0);
    assert!(count(&image, RED) > 0);
}

#[test]
fn test_single_point_front_draws_nothing() {
    let mut canvas = conus_canvas(WHITE);
    let line = canvas.project_line(&[(-100.0, 30.0)]);
    draw_front(&mut canvas, &line, FrontKind::Warm, &FrontStyle::default());
    let image = canvas.into_image().unwrap();
    assert_eq!(count(&image, WHITE), (800 * 480) as usize);
}

// ============================================================================
// Station symbol tests
// ============================================================================

#[test]
fn test_overcast_circle_is_filled() {
    let mut canvas = conus_canvas(WHITE);
    let (x, y) = canvas.to_pixel(-97.0, 38.0);
    draw_sky_cover(&mut canvas, x, y, 6.0, SkyCover::Overcast);
    let image = canvas.into_image().unwrap();
    assert_eq!(image.get_pixel(x as u32, y as u32).0, BLACK);
}

#[test]
fn test_clear_circle_is_hollow() {
    let mut canvas = conus_canvas(TRANSPARENT);
    let (x, y) = canvas.to_pixel(-97.0, 38.0);
    draw_sky_cover(&mut canvas, x, y, 6.0, SkyCover::Clear);
    let image = canvas.into_image().unwrap();
    assert_eq!(image.get_pixel(x as u32, y as u32).0, WHITE);
}

#[test]
fn test_barb_extends_upwind() {
    let mut canvas = conus_canvas(WHITE);
    let (x, y) = canvas.to_pixel(-97.0, 38.0);
    // North wind: staff points up from the station
    draw_barb(&mut canvas, x, y, 0.0, 20.0, &BarbConfig::default());
    let image = canvas.into_image().unwrap();
    let above = (1..20).any(|d| image.get_pixel(x as u32, (y - d as f32) as u32).0 != WHITE);
    let below = (5..20).any(|d| image.get_pixel(x as u32, (y + d as f32) as u32).0 != WHITE);
    assert!(above);
    assert!(!below);
}
