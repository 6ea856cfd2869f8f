//! Fitting a projected map extent into a pixel rectangle.

use wx_common::BoundingBox;

use crate::{MapProjection, Projection};

/// Segments per edge when densifying a lon/lat box before projecting it.
const OUTLINE_STEPS: usize = 64;

/// Axis-aligned pixel rectangle, origin at the top-left of the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }
}

/// A projection plus the affine transform that places its projected extent
/// into a pixel rectangle.
///
/// The extent is fitted preserving aspect ratio and centered within the
/// available area.
#[derive(Debug, Clone)]
pub struct MapView {
    projection: Projection,
    /// Geographic extent the view was fitted to.
    extent: BoundingBox,
    /// Projected (meter) footprint of the extent.
    projected: BoundingBox,
    /// Pixel rectangle the map occupies.
    map_rect: PixelRect,
    /// Pixels per projected meter.
    scale: f64,
}

impl MapView {
    /// Fit `extent` (lon/lat degrees) into `area`.
    pub fn fit(projection: Projection, extent: BoundingBox, area: PixelRect) -> Self {
        let projected = Self::projected_footprint(&projection, &extent);

        let scale_x = area.width / projected.width();
        let scale_y = area.height / projected.height();
        let scale = scale_x.min(scale_y);

        let width = projected.width() * scale;
        let height = projected.height() * scale;
        let map_rect = PixelRect::new(
            area.x + (area.width - width) / 2.0,
            area.y + (area.height - height) / 2.0,
            width,
            height,
        );

        Self {
            projection,
            extent,
            projected,
            map_rect,
            scale,
        }
    }

    /// Pixel size of `extent` in `projection` when fitted to `width` pixels.
    ///
    /// Used to size canvases that are cropped tightly to the map.
    pub fn fitted_size(projection: &Projection, extent: &BoundingBox, width: u32) -> (u32, u32) {
        let projected = Self::projected_footprint(projection, extent);
        let height = (width as f64 * projected.height() / projected.width()).round();
        (width, height.max(1.0) as u32)
    }

    fn projected_footprint(projection: &Projection, extent: &BoundingBox) -> BoundingBox {
        let outline = extent
            .densified_outline(OUTLINE_STEPS)
            .into_iter()
            .map(|(lon, lat)| projection.project(lon, lat));
        BoundingBox::from_points(outline).unwrap_or(*extent)
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn extent(&self) -> &BoundingBox {
        &self.extent
    }

    pub fn map_rect(&self) -> PixelRect {
        self.map_rect
    }

    /// Pixels per projected meter.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Projected meters to pixel coordinates.
    pub fn projected_to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        let px = self.map_rect.x + (x - self.projected.min_x) * self.scale;
        let py = self.map_rect.y + (self.projected.max_y - y) * self.scale;
        (px, py)
    }

    /// Geographic coordinates to pixel coordinates.
    pub fn to_pixel(&self, lon: f64, lat: f64) -> (f64, f64) {
        let (x, y) = self.projection.project(lon, lat);
        self.projected_to_pixel(x, y)
    }

    /// Pixel coordinates back to geographic coordinates.
    pub fn to_geo(&self, px: f64, py: f64) -> (f64, f64) {
        let x = self.projected.min_x + (px - self.map_rect.x) / self.scale;
        let y = self.projected.max_y - (py - self.map_rect.y) / self.scale;
        self.projection.unproject(x, y)
    }

    /// Lon/lat box covering the full map rectangle.
    ///
    /// For Lambert this is wider than the fitted extent since the projected
    /// footprint is curved.
    pub fn geographic_extent(&self) -> BoundingBox {
        let r = self.map_rect;
        let outline = BoundingBox::new(r.x, r.y, r.right(), r.bottom())
            .densified_outline(OUTLINE_STEPS)
            .into_iter()
            .map(|(px, py)| self.to_geo(px, py));
        BoundingBox::from_points(outline).unwrap_or(self.extent)
    }

    /// Corner strings `["{lat_min},{lon_min}", "{lat_max},{lon_max}"]` of
    /// the map rectangle.
    pub fn corner_coordinates(&self) -> [String; 2] {
        let r = self.map_rect;
        let (lon_min, lat_min) = self.to_geo(r.x, r.bottom());
        let (lon_max, lat_max) = self.to_geo(r.right(), r.y);
        [
            format!("{},{}", lat_min, lon_min),
            format!("{},{}", lat_max, lon_max),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wx_common::CONUS_EXTENT;

    #[test]
    fn test_fit_preserves_aspect_and_centers() {
        let area = PixelRect::new(20.0, 20.0, 1880.0, 970.0);
        let view = MapView::fit(Projection::lambert_conus(), CONUS_EXTENT, area);
        let rect = view.map_rect();

        assert!(rect.width <= area.width + 1e-6);
        assert!(rect.height <= area.height + 1e-6);
        // One dimension fills the area exactly
        assert!(
            (rect.width - area.width).abs() < 1e-6 || (rect.height - area.height).abs() < 1e-6
        );
        let (cx, cy) = rect.center();
        let (ax, ay) = area.center();
        assert!((cx - ax).abs() < 1e-6 && (cy - ay).abs() < 1e-6);
    }

    #[test]
    fn test_pixel_roundtrip() {
        let area = PixelRect::new(0.0, 0.0, 1920.0, 1080.0);
        let view = MapView::fit(Projection::lambert_conus(), CONUS_EXTENT, area);
        let (px, py) = view.to_pixel(-97.4, 35.2);
        assert!(view.map_rect().contains(px, py));
        let (lon, lat) = view.to_geo(px, py);
        assert!((lon + 97.4).abs() < 1e-6);
        assert!((lat - 35.2).abs() < 1e-6);
    }

    #[test]
    fn test_north_is_up() {
        let area = PixelRect::new(0.0, 0.0, 1920.0, 1080.0);
        let view = MapView::fit(Projection::web_mercator(), CONUS_EXTENT, area);
        let (_, south) = view.to_pixel(-95.0, 25.0);
        let (_, north) = view.to_pixel(-95.0, 45.0);
        assert!(north < south);
    }

    #[test]
    fn test_mercator_corners_match_extent() {
        let (w, h) = MapView::fitted_size(&Projection::web_mercator(), &CONUS_EXTENT, 1920);
        assert_eq!(w, 1920);
        let view = MapView::fit(
            Projection::web_mercator(),
            CONUS_EXTENT,
            PixelRect::new(0.0, 0.0, w as f64, h as f64),
        );
        let corners = view.corner_coordinates();
        let parse = |s: &str| -> (f64, f64) {
            let mut parts = s.split(',').map(|p| p.parse::<f64>().unwrap());
            (parts.next().unwrap(), parts.next().unwrap())
        };
        let (lat_min, lon_min) = parse(&corners[0]);
        let (lat_max, lon_max) = parse(&corners[1]);
        assert!((lat_min - 20.0).abs() < 0.05);
        assert!((lon_min + 130.0).abs() < 0.05);
        assert!((lat_max - 50.0).abs() < 0.05);
        assert!((lon_max + 60.0).abs() < 0.05);
    }

    #[test]
    fn test_lambert_geographic_extent_covers_conus() {
        let view = MapView::fit(
            Projection::lambert_conus(),
            CONUS_EXTENT,
            PixelRect::new(0.0, 0.0, 1920.0, 1080.0),
        );
        let geo = view.geographic_extent();
        assert!(geo.min_x <= -130.0 + 1e-6);
        assert!(geo.max_x >= -60.0 - 1e-6);
        assert!(geo.min_y <= 20.0 + 1e-6);
    }
}
