//! Map projections and the pixel view used by the product renderers.
//!
//! Implements the two projections the products need from scratch, without
//! external dependencies.

pub mod lambert;
pub mod mercator;
pub mod view;

pub use lambert::LambertConformal;
pub use mercator::WebMercator;
pub use view::{MapView, PixelRect};

/// Forward and inverse transform between lon/lat degrees and projected
/// meters.
pub trait MapProjection {
    /// Geographic (lon, lat) in degrees to projected (x, y) in meters.
    fn project(&self, lon_deg: f64, lat_deg: f64) -> (f64, f64);

    /// Projected (x, y) in meters back to geographic (lon, lat) in degrees.
    fn unproject(&self, x: f64, y: f64) -> (f64, f64);
}

/// Projections available to the renderers.
#[derive(Debug, Clone)]
pub enum Projection {
    LambertConformal(LambertConformal),
    WebMercator(WebMercator),
}

impl Projection {
    /// Default Lambert Conformal used for the static CONUS products.
    pub fn lambert_conus() -> Self {
        Projection::LambertConformal(LambertConformal::conus())
    }

    pub fn web_mercator() -> Self {
        Projection::WebMercator(WebMercator)
    }
}

impl MapProjection for Projection {
    fn project(&self, lon_deg: f64, lat_deg: f64) -> (f64, f64) {
        match self {
            Projection::LambertConformal(p) => p.project(lon_deg, lat_deg),
            Projection::WebMercator(p) => p.project(lon_deg, lat_deg),
        }
    }

    fn unproject(&self, x: f64, y: f64) -> (f64, f64) {
        match self {
            Projection::LambertConformal(p) => p.unproject(x, y),
            Projection::WebMercator(p) => p.unproject(x, y),
        }
    }
}
