//! Spherical Web Mercator (EPSG:3857).
//!
//! Used for the geo-referenced overlays so that they line up with slippy-map
//! tiles in the display system.

use std::f64::consts::PI;

use crate::MapProjection;

/// Sphere radius used by EPSG:3857.
pub const WEB_MERCATOR_RADIUS: f64 = 6378137.0;

/// Latitude limit where the projection becomes square.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

#[derive(Debug, Clone, Copy, Default)]
pub struct WebMercator;

impl MapProjection for WebMercator {
    fn project(&self, lon_deg: f64, lat_deg: f64) -> (f64, f64) {
        let lat = lat_deg.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        let x = WEB_MERCATOR_RADIUS * lon_deg.to_radians();
        let y = WEB_MERCATOR_RADIUS * (PI / 4.0 + lat.to_radians() / 2.0).tan().ln();
        (x, y)
    }

    fn unproject(&self, x: f64, y: f64) -> (f64, f64) {
        let lon = (x / WEB_MERCATOR_RADIUS).to_degrees();
        let lat = (2.0 * (y / WEB_MERCATOR_RADIUS).exp().atan() - PI / 2.0).to_degrees();
        (lon, lat)
    }
}
