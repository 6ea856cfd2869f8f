//! Drawing an outlook layout onto a static CONUS map.

use basemap::Basemap;
use image::RgbaImage;
use projection::{MapView, Projection};
use renderer::canvas::{static_plot_area, STATIC_HEIGHT, STATIC_WIDTH};
use renderer::color::{BLACK, WHITE};
use renderer::legend::{draw_annotation, draw_legend, LegendStyle};
use renderer::{FontBook, LineStyle, MapCanvas};
use tracing::debug;
use wx_common::CONUS_EXTENT;

use crate::error::Result;
use crate::layout::{OutlookLayout, PolygonStyle, HATCHED_LINE_WIDTH};

/// Pixel distance between hatch lines of significant areas.
const HATCH_SPACING: f32 = 8.0;
const NO_AREAS_PX: f32 = 28.0;

/// Render `layout` on a Lambert Conformal CONUS map.
pub fn render_outlook(
    layout: &OutlookLayout,
    basemap: Option<&Basemap>,
    font: &FontBook,
) -> Result<RgbaImage> {
    let view = MapView::fit(Projection::lambert_conus(), CONUS_EXTENT, static_plot_area());
    let map_rect = view.map_rect();
    let mut canvas = MapCanvas::new(STATIC_WIDTH, STATIC_HEIGHT, view, WHITE)?;

    for geometry in &layout.geometries {
        let outline = geometry.style.outline();
        for rings in &geometry.polygons {
            match &geometry.style {
                PolygonStyle::Filled { fill, .. } => canvas.fill_polygon(rings, *fill),
                PolygonStyle::Hatched { stroke } => {
                    canvas.hatch_polygon(rings, *stroke, HATCH_SPACING, HATCHED_LINE_WIDTH)
                }
            }
            canvas.stroke_polygon(rings, &outline);
        }
    }

    if let Some(basemap) = basemap {
        basemap.draw(&mut canvas);
    }
    canvas.frame_map(&LineStyle::solid(BLACK, 1.0));

    let mut image = canvas.into_image()?;
    if layout.has_no_areas() {
        draw_annotation(&mut image, font, "No areas", map_rect, NO_AREAS_PX);
    } else {
        draw_legend(&mut image, font, &layout.legend, map_rect, &LegendStyle::default());
    }

    debug!(
        hazard = %layout.hazard,
        categories = layout.geometries.len(),
        "Rendered outlook"
    );
    Ok(image)
}
