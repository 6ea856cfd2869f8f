//! Drawing a surface bulletin: fronts, troughs and pressure centers.
//!
//! Two variants share the same feature styling. The geo-referenced overlay
//! is a transparent Web Mercator image sized exactly to the map; the static
//! analysis is a Lambert Conformal map with base map and station plots.

use basemap::Basemap;
use image::RgbaImage;
use projection::{MapView, PixelRect, Projection};
use renderer::canvas::{static_plot_area, STATIC_HEIGHT, STATIC_WIDTH};
use renderer::color::{BLACK, BLUE, DARK_ORANGE, RED, TRANSPARENT, WHITE};
use renderer::fronts::{draw_front, FrontStyle};
use renderer::{FontBook, LineStyle, MapCanvas};
use tracing::debug;
use wx_common::CONUS_EXTENT;

use crate::error::Result;
use crate::feature::{FeatureType, Geometry, SurfaceBulletin};
use crate::stations::{draw_station_symbols, draw_station_text, StationObservation};

/// Width of the geo-referenced overlay; height follows the map aspect.
pub const GIS_WIDTH: u32 = 1920;

const TROUGH_WIDTH: f32 = 2.0;
const TROUGH_DASH: [f32; 2] = [10.0, 6.0];
const CENTER_PX: f32 = 30.0;
const STRENGTH_PX: f32 = 16.0;

/// Draw boundaries in the order warm, cold, stationary, occluded, trough.
pub fn draw_boundaries(canvas: &mut MapCanvas, bulletin: &SurfaceBulletin) {
    let front_style = FrontStyle::default();
    let trough_style = LineStyle::dashed(DARK_ORANGE, TROUGH_WIDTH, &TROUGH_DASH);

    for feature_type in [
        FeatureType::Warm,
        FeatureType::Cold,
        FeatureType::Stationary,
        FeatureType::Occluded,
        FeatureType::Trough,
    ] {
        for feature in bulletin.of_type(feature_type) {
            // Single-position boundaries have nothing to draw
            let Geometry::Line(points) = &feature.geometry else {
                continue;
            };
            match feature_type.front_kind() {
                Some(kind) => {
                    let pixels = canvas.project_line(points);
                    draw_front(canvas, &pixels, kind, &front_style);
                }
                None => canvas.stroke_line(points, &trough_style),
            }
        }
    }
}

/// Blue `H` and red `L` glyphs with the central pressure below.
pub fn draw_pressure_centers(
    image: &mut RgbaImage,
    font: &FontBook,
    view: &MapView,
    bulletin: &SurfaceBulletin,
) {
    let map = view.map_rect();
    for (feature_type, glyph, color) in [(FeatureType::High, "H", BLUE), (FeatureType::Low, "L", RED)] {
        for feature in bulletin.of_type(feature_type) {
            let Geometry::Point((lon, lat)) = feature.geometry else {
                continue;
            };
            let (x, y) = view.to_pixel(lon, lat);
            if !map.contains(x, y) {
                continue;
            }
            font.draw_centered(image, glyph, x as f32, y as f32, CENTER_PX, color);
            if let Some(strength) = feature.strength {
                let below = y as f32 + CENTER_PX * 0.5 + STRENGTH_PX * 0.75;
                font.draw_centered(
                    image,
                    &format!("{:.0}", strength),
                    x as f32,
                    below,
                    STRENGTH_PX,
                    color,
                );
            }
        }
    }
}

/// Transparent Web Mercator overlay and its `"lat,lon"` corners.
pub fn render_gis(bulletin: &SurfaceBulletin, font: &FontBook) -> Result<(RgbaImage, [String; 2])> {
    let projection = Projection::web_mercator();
    let (width, height) = MapView::fitted_size(&projection, &CONUS_EXTENT, GIS_WIDTH);
    let view = MapView::fit(
        projection,
        CONUS_EXTENT,
        PixelRect::new(0.0, 0.0, width as f64, height as f64),
    );
    let corners = view.corner_coordinates();

    let mut canvas = MapCanvas::new(width, height, view.clone(), TRANSPARENT)?;
    draw_boundaries(&mut canvas, bulletin);
    let mut image = canvas.into_image()?;
    draw_pressure_centers(&mut image, font, &view, bulletin);

    debug!(width, height, "Rendered geo-referenced bulletin");
    Ok((image, corners))
}

/// Static Lambert Conformal analysis with optional base map and stations.
pub fn render_static(
    bulletin: &SurfaceBulletin,
    basemap: Option<&Basemap>,
    stations: &[StationObservation],
    font: &FontBook,
) -> Result<RgbaImage> {
    let view = MapView::fit(Projection::lambert_conus(), CONUS_EXTENT, static_plot_area());
    let mut canvas = MapCanvas::new(STATIC_WIDTH, STATIC_HEIGHT, view.clone(), WHITE)?;

    draw_station_symbols(&mut canvas, stations);
    draw_boundaries(&mut canvas, bulletin);
    if let Some(basemap) = basemap {
        basemap.draw(&mut canvas);
    }
    canvas.frame_map(&LineStyle::solid(BLACK, 1.0));

    let mut image = canvas.into_image()?;
    draw_station_text(&mut image, font, &view, stations);
    draw_pressure_centers(&mut image, font, &view, bulletin);

    debug!(stations = stations.len(), "Rendered static bulletin");
    Ok(image)
}
